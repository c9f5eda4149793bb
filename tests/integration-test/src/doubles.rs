use framegen_bridge_core::backing::FrameToken;
use framegen_bridge_core::context::{HostRenderer, PostProcessInputs, ScreenPassTexture};
use framegen_bridge_core::descriptor::{NativeCommandBuffer, NativeHandle, Texture, TextureDesc, TextureUsage};
use framegen_bridge_core::engine::{
	DetailEnhancementOptions, DetailEnhancementState, EngineError, EngineResult, Feature, FeatureRequirements,
	FrameGenEngine, FrameGenMode, FrameGenOptions, FrameGenState, Preferences, ViewportHandle,
};
use framegen_bridge_core::pipeline::{CameraConstants, ResourceRole, ResourceTag};
use framegen_bridge_core::platform::AdapterInfo;
use framegen_bridge_core::platform::d3d12::{D3D12Device, D3D12Transition};
use framegen_bridge_core::view::{CameraInfo, Rect, StereoPass, ViewInfo};
use glam::UVec2;
use parking_lot::Mutex;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

pub const EXTENT: UVec2 = UVec2::new(1920, 1080);

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
	Init,
	Constants { view: ViewportHandle, frame_index: u32 },
	Tag { view: ViewportHandle, roles: SmallVec<[ResourceRole; 6]> },
	FrameGenOptions { view: ViewportHandle, mode: FrameGenMode },
	DetailEnhancementOptions { view: ViewportHandle },
	Evaluate { feature: Feature, view: ViewportHandle },
	Free { feature: Feature, view: ViewportHandle },
}

#[derive(Debug, Default)]
struct Inner {
	calls: Vec<Call>,
	loaded: SmallVec<[Feature; 4]>,
	/// What the engine currently has tagged, null tags remove entries
	tags: HashMap<(ViewportHandle, ResourceRole), NativeHandle>,
	proxies: HashMap<NativeHandle, NativeHandle>,
	minted_tokens: u32,
	frame_gen_state: FrameGenState,
}

/// Loads and supports everything it is asked to, remembering the resulting tag state per view.
#[derive(Debug, Default)]
pub struct RecordingEngine {
	inner: Mutex<Inner>,
}

impl RecordingEngine {
	pub fn calls(&self) -> Vec<Call> {
		self.inner.lock().calls.clone()
	}

	pub fn tagged(&self, view: ViewportHandle, role: ResourceRole) -> Option<NativeHandle> {
		self.inner.lock().tags.get(&(view, role)).copied()
	}

	/// All tagged roles of `view`, in role order.
	pub fn tag_state(&self, view: ViewportHandle) -> Vec<(ResourceRole, NativeHandle)> {
		let inner = self.inner.lock();
		ResourceRole::ALL
			.into_iter()
			.filter_map(|role| inner.tags.get(&(view, role)).map(|native| (role, *native)))
			.collect()
	}

	pub fn freed(&self) -> Vec<(Feature, ViewportHandle)> {
		self.inner
			.lock()
			.calls
			.iter()
			.filter_map(|call| match call {
				Call::Free { feature, view } => Some((*feature, *view)),
				_ => None,
			})
			.collect()
	}

	pub fn minted_tokens(&self) -> u32 {
		self.inner.lock().minted_tokens
	}

	/// `proxy` wraps the swapchain `native`.
	pub fn register_proxy(&self, proxy: NativeHandle, native: NativeHandle) {
		self.inner.lock().proxies.insert(proxy, native);
	}

	pub fn set_frame_gen_state(&self, state: FrameGenState) {
		self.inner.lock().frame_gen_state = state;
	}

	fn record(&self, call: Call) {
		self.inner.lock().calls.push(call);
	}
}

impl FrameGenEngine for RecordingEngine {
	fn init(&self, preferences: &Preferences) -> EngineResult<()> {
		let mut inner = self.inner.lock();
		inner.loaded = preferences.features_to_load.iter().copied().collect();
		inner.calls.push(Call::Init);
		Ok(())
	}

	fn shutdown(&self) -> EngineResult<()> {
		Ok(())
	}

	fn is_feature_loaded(&self, feature: Feature) -> bool {
		self.inner.lock().loaded.contains(&feature)
	}

	fn is_feature_supported(&self, feature: Feature, _adapter: &AdapterInfo) -> EngineResult<()> {
		if self.is_feature_loaded(feature) {
			Ok(())
		} else {
			Err(EngineError::FeatureMissing)
		}
	}

	fn feature_requirements(&self, _feature: Feature) -> EngineResult<FeatureRequirements> {
		Ok(FeatureRequirements::default())
	}

	fn new_frame_token(&self, frame_index: u32) -> EngineResult<u64> {
		self.inner.lock().minted_tokens += 1;
		Ok(u64::from(frame_index) | 1 << 32)
	}

	fn set_constants(&self, _constants: &CameraConstants, frame: &FrameToken, view: ViewportHandle) -> EngineResult<()> {
		self.record(Call::Constants {
			view,
			frame_index: frame.frame_index,
		});
		Ok(())
	}

	fn set_tag(&self, view: ViewportHandle, tags: &[ResourceTag], _cmd: NativeCommandBuffer) -> EngineResult<()> {
		let mut inner = self.inner.lock();
		for tag in tags {
			match tag.resource.native.non_null() {
				Some(native) => inner.tags.insert((view, tag.role), native),
				None => inner.tags.remove(&(view, tag.role)),
			};
		}
		inner.calls.push(Call::Tag {
			view,
			roles: tags.iter().map(|tag| tag.role).collect(),
		});
		Ok(())
	}

	fn evaluate_feature(
		&self,
		feature: Feature,
		_frame: &FrameToken,
		view: ViewportHandle,
		_cmd: NativeCommandBuffer,
	) -> EngineResult<()> {
		self.record(Call::Evaluate { feature, view });
		Ok(())
	}

	fn free_resources(&self, feature: Feature, view: ViewportHandle) -> EngineResult<()> {
		self.record(Call::Free { feature, view });
		Ok(())
	}

	fn native_interface(&self, proxy: NativeHandle) -> EngineResult<NativeHandle> {
		Ok(self.inner.lock().proxies.get(&proxy).copied().unwrap_or(proxy))
	}

	fn set_frame_gen_options(&self, view: ViewportHandle, options: &FrameGenOptions) -> EngineResult<()> {
		self.record(Call::FrameGenOptions {
			view,
			mode: options.mode,
		});
		Ok(())
	}

	fn frame_gen_state(&self, _view: ViewportHandle, _options: &FrameGenOptions) -> EngineResult<FrameGenState> {
		Ok(self.inner.lock().frame_gen_state)
	}

	fn set_detail_enhancement_options(
		&self,
		view: ViewportHandle,
		_options: &DetailEnhancementOptions,
	) -> EngineResult<()> {
		self.record(Call::DetailEnhancementOptions { view });
		Ok(())
	}

	fn detail_enhancement_state(&self, _view: ViewportHandle) -> EngineResult<DetailEnhancementState> {
		Ok(DetailEnhancementState::default())
	}
}

/// A single NVIDIA GPU that accepts every barrier.
#[derive(Debug, Default)]
pub struct SingleGpuDevice;

impl D3D12Device for SingleGpuDevice {
	fn adapter_info(&self) -> AdapterInfo {
		AdapterInfo {
			vendor_id: 0x10DE,
			luid: 7,
		}
	}

	fn resource_device_index(&self, _resource: NativeHandle) -> u32 {
		0
	}

	fn graphics_command_list(&self, _device_index: u32) -> NativeCommandBuffer {
		NativeCommandBuffer::new(0xC0)
	}

	fn transition_resource(&self, _transition: &D3D12Transition) {}

	fn flush_resource_barriers(&self, _device_index: u32) {}

	fn finish_external_compute_work(&self, _device_index: u32, _cmd: NativeCommandBuffer) {}
}

/// Hands out fresh texture handles and counts the passes added to it.
#[derive(Debug)]
pub struct CountingRenderer {
	next_handle: AtomicU64,
	passes: Mutex<Vec<&'static str>>,
}

impl Default for CountingRenderer {
	fn default() -> Self {
		Self {
			next_handle: AtomicU64::new(0x10_0000),
			passes: Mutex::default(),
		}
	}
}

impl CountingRenderer {
	pub fn passes(&self) -> Vec<&'static str> {
		self.passes.lock().clone()
	}

	fn mint(&self, desc: TextureDesc) -> Texture {
		Texture::new(NativeHandle::new(self.next_handle.fetch_add(1, Ordering::Relaxed)), desc)
	}

	fn uav(&self, name: &str, extent: UVec2) -> Texture {
		self.mint(TextureDesc::new(
			name,
			extent,
			TextureUsage::SHADER_RESOURCE | TextureUsage::UNORDERED_ACCESS,
		))
	}
}

impl HostRenderer for CountingRenderer {
	fn create_texture(&self, desc: TextureDesc) -> Texture {
		self.passes.lock().push("create_texture");
		self.mint(desc)
	}

	fn add_copy_pass(&self, _src: &Texture, _dst: &Texture) {
		self.passes.lock().push("copy");
	}

	fn add_velocity_combine_pass(&self, depth: &Texture, _velocity: Option<&Texture>, _dilate: bool) -> Texture {
		self.passes.lock().push("velocity_combine");
		self.uav("CombinedVelocity", depth.extent())
	}

	fn add_ui_hint_extraction_pass(&self, _alpha_threshold: f32, backbuffer: &Texture) -> Texture {
		self.passes.lock().push("ui_hint_extraction");
		self.uav("UIColorAndAlpha", backbuffer.extent())
	}

	fn add_clear_alpha_pass(&self, _texture: &Texture, _rect: Rect) {
		self.passes.lock().push("clear_alpha");
	}

	fn is_foreground(&self) -> bool {
		true
	}
}

pub fn backbuffer(raw: u64) -> Texture {
	Texture::new(
		NativeHandle::new(raw),
		TextureDesc::new(
			"BufferedRT",
			EXTENT,
			TextureUsage::RENDER_TARGETABLE | TextureUsage::SHADER_RESOURCE | TextureUsage::PRESENTABLE,
		),
	)
}

pub fn view(view_key: u32, family_index: usize, render_target: &Texture) -> ViewInfo {
	let rect = Rect::from(EXTENT);
	ViewInfo {
		view_key,
		family_index,
		is_scene_capture: false,
		is_offline_render: false,
		is_game_view: true,
		stereo_pass: StereoPass::Full,
		view_rect: rect,
		unscaled_view_rect: rect,
		unconstrained_view_rect: rect,
		secondary_view_size: EXTENT.as_ivec2(),
		render_target: Some(render_target.clone()),
		camera: CameraInfo::default(),
		camera_cut: false,
	}
}

/// Distinct scene textures per `seed`, so tags of different views can be told apart.
pub fn post_process_inputs(seed: u64) -> PostProcessInputs {
	let texture = |offset: u64, name: &str, usage| {
		Texture::new(
			NativeHandle::new(seed << 8 | offset),
			TextureDesc::new(name, EXTENT, usage),
		)
	};
	PostProcessInputs {
		scene_color: ScreenPassTexture::new(
			texture(1, "SceneColor", TextureUsage::RENDER_TARGETABLE | TextureUsage::SHADER_RESOURCE),
			Rect::from(EXTENT),
		),
		scene_depth: texture(
			2,
			"SceneDepth",
			TextureUsage::DEPTH_STENCIL_TARGETABLE | TextureUsage::SHADER_RESOURCE,
		),
		velocity: None,
		override_output: None,
	}
}
