/// The host process' command line, only queried for `-param` switches and `-key=value` pairs.
///
/// Matching ignores ASCII case and accepts both `-` and `/` as switch prefix.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct CommandLine {
	args: Vec<String>,
}

impl CommandLine {
	pub fn new(line: &str) -> Self {
		Self::from_args(line.split_whitespace())
	}

	pub fn from_args<I, S>(args: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			args: args.into_iter().map(Into::into).collect(),
		}
	}

	fn switches(&self) -> impl Iterator<Item = &str> {
		self.args
			.iter()
			.filter_map(|arg| arg.strip_prefix('-').or_else(|| arg.strip_prefix('/')))
	}

	/// Whether `-name` is present. `name` is given without the leading `-`.
	pub fn has_param(&self, name: &str) -> bool {
		self.switches().any(|arg| arg.eq_ignore_ascii_case(name))
	}

	/// The value of the first `-key=value` argument. `key` includes the trailing `=`, e.g. `"slloglevel="`.
	pub fn value(&self, key: &str) -> Option<&str> {
		self.switches().find_map(|arg| {
			let prefix = arg.get(..key.len())?;
			prefix.eq_ignore_ascii_case(key).then(|| &arg[key.len()..])
		})
	}

	/// Evaluates an `-sl<suffix>` / `-slno<suffix>` switch pair. The positive form wins if both are present.
	pub fn switch(&self, suffix: &str) -> Option<bool> {
		if self.has_param(&format!("sl{suffix}")) {
			Some(true)
		} else if self.has_param(&format!("slno{suffix}")) {
			Some(false)
		} else {
			None
		}
	}
}
