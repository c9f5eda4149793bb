use crate::backing::FrameToken;
use crate::descriptor::{NativeCommandBuffer, NativeHandle};
use crate::engine::{
	DetailEnhancementOptions, DetailEnhancementState, EngineResult, Feature, FeatureRequirements, FrameGenOptions,
	FrameGenState, Preferences,
};
use crate::pipeline::{CameraConstants, ResourceTag};
use crate::platform::AdapterInfo;
use std::fmt::{Display, Formatter};

/// Identifies a view towards the external engine. All per-view engine state is keyed by it.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct ViewportHandle(pub u32);

impl Display for ViewportHandle {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "ViewportHandle({})", self.0)
	}
}

/// The external frame generation and detail enhancement engine.
///
/// Every method maps to a single call of the engine's C API. Implementations must be callable from any thread, the
/// engine synchronizes internally.
pub trait FrameGenEngine: Send + Sync + 'static {
	/// Loads the engine and the requested [`Preferences::features_to_load`].
	fn init(&self, preferences: &Preferences) -> EngineResult<()>;

	fn shutdown(&self) -> EngineResult<()>;

	/// Whether `feature` was actually loaded during [`Self::init`]. Features may fail to load even if requested.
	fn is_feature_loaded(&self, feature: Feature) -> bool;

	/// Whether `feature` can run on the adapter described by `adapter`.
	fn is_feature_supported(&self, feature: Feature, adapter: &AdapterInfo) -> EngineResult<()>;

	fn feature_requirements(&self, feature: Feature) -> EngineResult<FeatureRequirements>;

	/// Mints a new opaque token handle for the truncated frame counter `frame_index`.
	fn new_frame_token(&self, frame_index: u32) -> EngineResult<u64>;

	fn set_constants(&self, constants: &CameraConstants, frame: &FrameToken, view: ViewportHandle) -> EngineResult<()>;

	/// Tags all `tags` for `view` in a single call. A tag with a null handle untags its role.
	fn set_tag(&self, view: ViewportHandle, tags: &[ResourceTag], cmd: NativeCommandBuffer) -> EngineResult<()>;

	fn evaluate_feature(
		&self,
		feature: Feature,
		frame: &FrameToken,
		view: ViewportHandle,
		cmd: NativeCommandBuffer,
	) -> EngineResult<()>;

	/// Releases all resources `feature` allocated for `view`.
	fn free_resources(&self, feature: Feature, view: ViewportHandle) -> EngineResult<()>;

	/// Resolves a possibly proxied interface to the native one underneath. Returns `proxy` itself if it is not a
	/// proxy.
	fn native_interface(&self, proxy: NativeHandle) -> EngineResult<NativeHandle>;

	fn set_frame_gen_options(&self, view: ViewportHandle, options: &FrameGenOptions) -> EngineResult<()>;

	fn frame_gen_state(&self, view: ViewportHandle, options: &FrameGenOptions) -> EngineResult<FrameGenState>;

	fn set_detail_enhancement_options(
		&self,
		view: ViewportHandle,
		options: &DetailEnhancementOptions,
	) -> EngineResult<()>;

	fn detail_enhancement_state(&self, view: ViewportHandle) -> EngineResult<DetailEnhancementState>;
}
