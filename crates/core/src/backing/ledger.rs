use rustc_hash::FxHashSet;
use smallvec::SmallVec;

pub type StaleViews = SmallVec<[u32; 4]>;

/// Remembers which views were tagged in which frame, so that each view is tagged at most once per frame and
/// engine resources of views that stopped rendering can be released.
#[derive(Debug, Default)]
pub struct FrameLedger {
	entries: FxHashSet<(u64, u32)>,
}

impl FrameLedger {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn contains(&self, frame: u64, view_key: u32) -> bool {
		self.entries.contains(&(frame, view_key))
	}

	/// Returns `false` if the entry already existed.
	pub fn record(&mut self, frame: u64, view_key: u32) -> bool {
		self.entries.insert((frame, view_key))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Removes all entries older than `max_frames_in_flight` and returns the sorted view keys that have no newer
	/// entry left, and whose resources should thus be released.
	pub fn collect_stale(&mut self, current_frame: u64, max_frames_in_flight: u64) -> StaleViews {
		let mut stale = StaleViews::new();
		let mut active = FxHashSet::default();
		self.entries.retain(|&(frame, view_key)| {
			if current_frame > frame.saturating_add(max_frames_in_flight) {
				stale.push(view_key);
				false
			} else {
				active.insert(view_key);
				true
			}
		});
		stale.sort_unstable();
		stale.dedup();
		stale.retain(|view_key| !active.contains(view_key));
		stale
	}
}
