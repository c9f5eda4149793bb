use crate::engine::Feature;
use crate::platform::NativeApi;
use crate::settings::CommandLine;
use bitflags::bitflags;
use smallvec::SmallVec;
use tracing::{info, warn};

#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq)]
pub enum LogLevel {
	Off,
	#[default]
	Default,
	Verbose,
}

bitflags! {
	#[repr(transparent)]
	#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
	pub struct PreferenceFlags: u32 {
		/// The host restores command list state itself
		const DISABLE_COMMAND_LIST_STATE_TRACKING = 1 << 0;
		const USE_MANUAL_HOOKING = 1 << 1;
		/// Allow over the air updates of engine plugins
		const ALLOW_OTA = 1 << 2;
		const LOAD_DOWNLOADED_PLUGINS = 1 << 3;
	}
}

/// Host project configuration consulted when building [`Preferences`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct EngineConfig {
	/// `false` disables initialization altogether, like `-slno`
	pub initialize: bool,
	pub enable_d3d11: bool,
	pub enable_d3d12: bool,
	pub allow_ota_update: bool,
	/// Whether the host plugin exposing frame generation is enabled
	pub frame_gen_plugin_enabled: bool,
	pub detail_enhancement_plugin_enabled: bool,
	pub load_debug_overlay: bool,
	/// Overrides [`Self::load_debug_overlay`] if set
	pub load_debug_overlay_override: Option<bool>,
	/// Shipping builds never load the debug overlay
	pub is_shipping: bool,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			initialize: true,
			enable_d3d11: true,
			enable_d3d12: true,
			allow_ota_update: true,
			frame_gen_plugin_enabled: true,
			detail_enhancement_plugin_enabled: false,
			load_debug_overlay: false,
			load_debug_overlay_override: None,
			is_shipping: false,
		}
	}
}

/// Everything the external engine needs to be initialized.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Preferences {
	pub log_level: LogLevel,
	/// Log every engine API call, requested with `-slloglevel=3`
	pub log_api_calls: bool,
	pub show_console: bool,
	pub flags: PreferenceFlags,
	pub features_to_load: SmallVec<[Feature; Feature::COUNT]>,
	pub render_api: NativeApi,
}

impl Preferences {
	/// Builds the init preferences, or returns `None` if the engine should not be initialized at all, either since
	/// it was disabled or `active_api` has no backend.
	pub fn new(config: &EngineConfig, active_api: NativeApi, cmd: &CommandLine) -> Option<Self> {
		if !config.initialize || cmd.has_param("slno") {
			info!("Initialization of the frame generation engine is disabled");
			return None;
		}

		let render_api = match active_api {
			NativeApi::D3D12 if config.enable_d3d12 => NativeApi::D3D12,
			NativeApi::D3D11 if config.enable_d3d11 => NativeApi::D3D11,
			api => {
				warn!("Unsupported graphics API {:?}, skipping frame generation engine init", api);
				return None;
			}
		};

		let mut log_level = LogLevel::Default;
		let mut log_api_calls = false;
		match cmd.value("slloglevel=") {
			Some("0") => log_level = LogLevel::Off,
			Some("1") => log_level = LogLevel::Default,
			Some("2") => log_level = LogLevel::Verbose,
			Some("3") => {
				log_level = LogLevel::Verbose;
				log_api_calls = true;
			}
			_ => (),
		}
		let show_console = cmd.value("sllogconsole=") == Some("1");

		let mut flags = PreferenceFlags::DISABLE_COMMAND_LIST_STATE_TRACKING | PreferenceFlags::USE_MANUAL_HOOKING;
		if config.allow_ota_update {
			flags |= PreferenceFlags::ALLOW_OTA | PreferenceFlags::LOAD_DOWNLOADED_PLUGINS;
		}

		let mut features_to_load = SmallVec::new();
		features_to_load.push(Feature::LatencyReduction);
		for (feature, plugin_enabled) in [
			(Feature::FrameGeneration, config.frame_gen_plugin_enabled),
			(Feature::DetailEnhancement, config.detail_enhancement_plugin_enabled),
		] {
			if !plugin_enabled {
				info!("Skipping loading {} since the host plugin is not enabled", feature);
				continue;
			}
			let suffix = feature.command_line_suffix();
			let allowed = match suffix.and_then(|suffix| cmd.switch(suffix)) {
				Some(allowed) => {
					info!(
						"{} {} due to -sl{}{} command line option",
						if allowed { "Loading" } else { "Not loading" },
						feature,
						if allowed { "" } else { "no" },
						suffix.unwrap_or_default()
					);
					allowed
				}
				None => true,
			};
			if allowed {
				features_to_load.push(feature);
			}
		}
		if !config.is_shipping && Self::should_load_debug_overlay(config, cmd) {
			features_to_load.push(Feature::DebugOverlay);
		}

		info!(
			?log_level,
			show_console,
			?features_to_load,
			"Frame generation engine preferences, override with -slloglevel={{0,1,2,3}} -sllogconsole={{0,1}} -sl{{no}}dlssg -sl{{no}}deepdvc -sl{{no}}debugoverlay"
		);
		Some(Self {
			log_level,
			log_api_calls,
			show_console,
			flags,
			features_to_load,
			render_api,
		})
	}

	fn should_load_debug_overlay(config: &EngineConfig, cmd: &CommandLine) -> bool {
		let configured = config.load_debug_overlay_override.unwrap_or(config.load_debug_overlay);
		cmd.switch("debugoverlay").unwrap_or(configured)
	}
}
