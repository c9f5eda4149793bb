use crate::backing::{FrameLedger, FrameTokenProvider};
use crate::context::{CapabilityGate, FeatureStatus, HostEnvironment};
use crate::descriptor::NativeHandle;
use crate::engine::{EngineConfig, EngineResult, Feature, FrameGenEngine, Preferences, ViewportHandle};
use crate::platform::{GraphicsBackend, IMPLEMENTED_APIS};
use crate::settings::{CommandLine, Settings};
use crate::view::{TrackedView, ViewTracker};
use parking_lot::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};
use smallvec::SmallVec;
use std::ops::Deref;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use tracing::{error, info};

pub type FeatureSet = SmallVec<[Feature; Feature::COUNT]>;

#[derive(Debug, Clone, Default)]
pub struct FrameGenCreateInfo {
	pub settings: Settings,
	pub engine_config: EngineConfig,
	pub command_line: CommandLine,
	pub host: HostEnvironment,
}

/// Shared handle to the frame generation integration, cheap to clone and hand to every host hook.
pub struct FrameGen<B: GraphicsBackend>(Arc<FrameGenInner<B>>);

impl<B: GraphicsBackend> Clone for FrameGen<B> {
	fn clone(&self) -> Self {
		Self(self.0.clone())
	}
}

impl<B: GraphicsBackend> Deref for FrameGen<B> {
	type Target = Arc<FrameGenInner<B>>;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

pub struct FrameGenInner<B: GraphicsBackend> {
	pub backend: B,
	pub engine: Arc<dyn FrameGenEngine>,
	pub host: HostEnvironment,
	command_line: CommandLine,
	settings: RwLock<Settings>,
	initialized: bool,
	loaded_features: FeatureSet,
	supported_features: FeatureSet,
	pub(crate) capability: CapabilityGate,
	pub(crate) tracker: Mutex<ViewTracker>,
	pub(crate) ledger: Mutex<FrameLedger>,
	pub(crate) tokens: FrameTokenProvider,
	pub(crate) swapchain_proxies: AtomicI32,
	pub(crate) status: Mutex<FeatureStatus>,
	play_in_editor: AtomicBool,
}

/// The engine stays initialized for as long as the initially returned [`FrameGenInstance`] is alive. Dropping it
/// shuts the engine down, remaining [`FrameGen`] clones must not be used afterward.
pub struct FrameGenInstance<B: GraphicsBackend>(FrameGen<B>);

impl<B: GraphicsBackend> Deref for FrameGenInstance<B> {
	type Target = FrameGen<B>;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl<B: GraphicsBackend> Drop for FrameGenInstance<B> {
	fn drop(&mut self) {
		if self.initialized {
			if let Err(e) = self.engine.shutdown() {
				error!("Failed to shut down the frame generation engine: {}", e);
			}
		}
	}
}

impl<B: GraphicsBackend> FrameGenInstance<B> {
	/// Initializes `engine` for `backend`. Initialization failing is not an error, all features just report being
	/// unsupported.
	pub fn new(ci: FrameGenCreateInfo, backend: B, engine: Arc<dyn FrameGenEngine>) -> Self {
		let FrameGenCreateInfo {
			mut settings,
			engine_config,
			command_line,
			host,
		} = ci;
		settings.apply_command_line(&command_line);

		let mut initialized = false;
		let mut loaded_features = FeatureSet::new();
		let preferences = host
			.can_ever_render
			.then(|| Preferences::new(&engine_config, B::API, &command_line))
			.flatten();
		if let Some(preferences) = preferences {
			match engine.init(&preferences) {
				Ok(()) => {
					initialized = true;
					loaded_features = preferences
						.features_to_load
						.iter()
						.copied()
						.filter(|&feature| engine.is_feature_loaded(feature))
						.collect();
				}
				Err(e) => error!("Failed to initialize the frame generation engine: {}", e),
			}
		}

		let adapter = backend.adapter_info();
		let supported_features = loaded_features
			.iter()
			.copied()
			.filter(|&feature| engine.is_feature_supported(feature, &adapter).is_ok())
			.collect::<FeatureSet>();
		info!(?loaded_features, ?supported_features, "Frame generation engine features");
		for &feature in &loaded_features {
			log_feature_requirements(&*engine, feature);
		}

		let tracker = ViewTracker::new(settings.log_tracked_views);
		Self(FrameGen(Arc::new(FrameGenInner {
			backend,
			engine,
			host,
			command_line,
			settings: RwLock::new(settings),
			initialized,
			loaded_features,
			supported_features,
			capability: CapabilityGate::default(),
			tracker: Mutex::new(tracker),
			ledger: Mutex::new(FrameLedger::new()),
			tokens: FrameTokenProvider::new(),
			swapchain_proxies: AtomicI32::new(0),
			status: Mutex::new(FeatureStatus::default()),
			play_in_editor: AtomicBool::new(false),
		})))
	}
}

fn log_feature_requirements(engine: &dyn FrameGenEngine, feature: Feature) {
	match engine.feature_requirements(feature) {
		Ok(requirements) => {
			let requirements = requirements.with_implemented_apis(IMPLEMENTED_APIS);
			info!(
				%feature,
				flags = ?requirements.flags,
				max_num_viewports = requirements.max_num_viewports,
				"Feature requires OS {} (detected {}), driver {} (detected {})",
				requirements.min_os,
				requirements.detected_os,
				requirements.min_driver,
				requirements.detected_driver,
			);
		}
		Err(e) => error!(%feature, "Failed to query feature requirements: {}", e),
	}
}

impl<B: GraphicsBackend> FrameGen<B> {
	#[inline]
	pub fn is_initialized(&self) -> bool {
		self.initialized
	}

	/// Requested features the engine actually loaded.
	pub fn loaded_features(&self) -> &[Feature] {
		&self.loaded_features
	}

	/// Loaded features the engine reported as supported on our adapter during init.
	pub fn supported_features(&self) -> &[Feature] {
		&self.supported_features
	}

	pub fn is_feature_loaded(&self, feature: Feature) -> bool {
		self.loaded_features.contains(&feature)
	}

	pub fn command_line(&self) -> &CommandLine {
		&self.command_line
	}

	pub fn settings(&self) -> RwLockReadGuard<'_, Settings> {
		self.settings.read()
	}

	pub fn settings_mut(&self) -> RwLockWriteGuard<'_, Settings> {
		self.settings.write()
	}

	/// Snapshot of the currently tracked views.
	pub fn tracked_views(&self) -> Vec<TrackedView> {
		self.tracker.lock().tracked_views().to_vec()
	}

	/// Forgets all views rendering into `backbuffer`. Call before a backbuffer is resized or its window destroyed.
	pub fn untrack_views_for_backbuffer(&self, backbuffer: NativeHandle) {
		self.tracker.lock().untrack_views_for_backbuffer(backbuffer);
	}

	/// Frees the engine resources of all loaded features for `view`. Every feature is freed even if one fails, the
	/// first failure is returned.
	pub fn release_resources_for_all_features(&self, view: ViewportHandle) -> EngineResult<()> {
		let mut result = Ok(());
		for &feature in &self.loaded_features {
			if let Err(e) = self.engine.free_resources(feature, view) {
				error!(%feature, %view, "Failed to free resources: {}", e);
				if result.is_ok() {
					result = Err(e);
				}
			}
		}
		result
	}

	/// Whether the swapchain needs to be wrapped in a proxy for any supported feature. Can be forced with
	/// `-slswapchainprovider` or `-slnoswapchainprovider`.
	pub fn is_swapchain_provider_required(&self) -> bool {
		if let Some(forced) = self.command_line.switch("swapchainprovider") {
			info!(
				"Swapchain provider {} by command line",
				if forced { "required" } else { "not required" }
			);
			return forced;
		}

		let adapter = self.backend.adapter_info();
		let mut results = SmallVec::<[(Feature, EngineResult<()>); Feature::COUNT]>::new();
		for feature in Feature::ALL.into_iter().filter(Feature::requires_swapchain_provider) {
			results.push((feature, self.engine.is_feature_supported(feature, &adapter)));
		}
		let required = results.iter().any(|(_, result)| result.is_ok());
		info!(
			?results,
			"Swapchain provider {}, override with -sl{{no}}swapchainprovider",
			if required { "required" } else { "not required" }
		);
		required
	}

	pub fn is_play_in_editor_active(&self) -> bool {
		self.play_in_editor.load(Ordering::Relaxed)
	}

	/// Call when play-in-editor sessions begin and end.
	pub fn set_play_in_editor(&self, active: bool) {
		self.play_in_editor.store(active, Ordering::Relaxed);
	}
}
