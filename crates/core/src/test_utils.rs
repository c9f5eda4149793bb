//! Recording doubles of the engine, the graphics devices and the host renderer.

use crate::backing::FrameToken;
use crate::context::{FrameGenCreateInfo, FrameGenInstance, HostRenderer, PostProcessInputs, ScreenPassTexture};
use crate::descriptor::{NativeCommandBuffer, NativeHandle, Texture, TextureDesc, TextureUsage};
use crate::engine::{
	DetailEnhancementOptions, DetailEnhancementState, EngineError, EngineResult, Feature, FeatureRequirements,
	FrameGenEngine, FrameGenOptions, FrameGenState, Preferences, ViewportHandle,
};
use crate::pipeline::{CameraConstants, ResourceTag, TagBatch};
use crate::platform::d3d11::D3D11Device;
use crate::platform::d3d12::{D3D12Backend, D3D12Device, D3D12Transition};
use crate::platform::AdapterInfo;
use crate::view::{CameraInfo, Rect, StereoPass, ViewInfo};
use glam::UVec2;
use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

pub const NVIDIA_VENDOR_ID: u32 = 0x10DE;

/// Engine calls that do work for a view. Token minting and state queries are counted separately.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
	SetConstants {
		view: ViewportHandle,
		frame_index: u32,
	},
	SetTag {
		view: ViewportHandle,
		tags: TagBatch,
		cmd: NativeCommandBuffer,
	},
	EvaluateFeature {
		feature: Feature,
		frame_index: u32,
		view: ViewportHandle,
		cmd: NativeCommandBuffer,
	},
	FreeResources {
		feature: Feature,
		view: ViewportHandle,
	},
	SetFrameGenOptions {
		view: ViewportHandle,
		options: FrameGenOptions,
	},
	SetDetailEnhancementOptions {
		view: ViewportHandle,
		options: DetailEnhancementOptions,
	},
}

#[derive(Debug, Default)]
struct EngineState {
	calls: Vec<EngineCall>,
	requested: SmallVec<[Feature; Feature::COUNT]>,
	unloaded: FxHashSet<Feature>,
	unsupported: FxHashMap<Feature, EngineError>,
	fail_init: Option<EngineError>,
	fail_next_token: Option<EngineError>,
	fail_next_set_tag: Option<EngineError>,
	native_interfaces: FxHashMap<NativeHandle, NativeHandle>,
	failing_native_interfaces: FxHashSet<NativeHandle>,
	frame_gen_state: FrameGenState,
	last_frame_gen_state_options: Option<FrameGenOptions>,
	detail_enhancement_state: DetailEnhancementState,
	init_calls: usize,
	shutdown_calls: usize,
	minted_tokens: u64,
	support_queries: usize,
	frame_gen_state_queries: usize,
}

/// A [`FrameGenEngine`] that loads every requested feature, supports everything it loaded and records all calls.
#[derive(Debug, Default)]
pub struct RecordingEngine {
	state: Mutex<EngineState>,
}

impl RecordingEngine {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn calls(&self) -> Vec<EngineCall> {
		self.state.lock().calls.clone()
	}

	pub fn set_tag_calls(&self) -> Vec<(ViewportHandle, TagBatch, NativeCommandBuffer)> {
		self.state
			.lock()
			.calls
			.iter()
			.filter_map(|call| match call {
				EngineCall::SetTag { view, tags, cmd } => Some((*view, tags.clone(), *cmd)),
				_ => None,
			})
			.collect()
	}

	pub fn freed_resources(&self) -> Vec<(Feature, ViewportHandle)> {
		self.state
			.lock()
			.calls
			.iter()
			.filter_map(|call| match call {
				EngineCall::FreeResources { feature, view } => Some((*feature, *view)),
				_ => None,
			})
			.collect()
	}

	pub fn minted_tokens(&self) -> u64 {
		self.state.lock().minted_tokens
	}

	pub fn init_calls(&self) -> usize {
		self.state.lock().init_calls
	}

	pub fn shutdown_calls(&self) -> usize {
		self.state.lock().shutdown_calls
	}

	pub fn support_queries(&self) -> usize {
		self.state.lock().support_queries
	}

	pub fn frame_gen_state_queries(&self) -> usize {
		self.state.lock().frame_gen_state_queries
	}

	pub fn last_frame_gen_state_options(&self) -> Option<FrameGenOptions> {
		self.state.lock().last_frame_gen_state_options
	}

	pub fn fail_init(&self, error: EngineError) {
		self.state.lock().fail_init = Some(error);
	}

	pub fn fail_next_token(&self, error: EngineError) {
		self.state.lock().fail_next_token = Some(error);
	}

	pub fn fail_next_set_tag(&self, error: EngineError) {
		self.state.lock().fail_next_set_tag = Some(error);
	}

	/// `feature` fails to load even if requested.
	pub fn set_unloaded(&self, feature: Feature) {
		self.state.lock().unloaded.insert(feature);
	}

	/// `feature` reports `error` when asked whether it's supported, loaded or not.
	pub fn set_unsupported(&self, feature: Feature, error: EngineError) {
		self.state.lock().unsupported.insert(feature, error);
	}

	pub fn set_native_interface(&self, proxy: NativeHandle, native: NativeHandle) {
		self.state.lock().native_interfaces.insert(proxy, native);
	}

	pub fn fail_native_interface(&self, proxy: NativeHandle) {
		self.state.lock().failing_native_interfaces.insert(proxy);
	}

	pub fn set_frame_gen_state(&self, state: FrameGenState) {
		self.state.lock().frame_gen_state = state;
	}

	pub fn set_detail_enhancement_state(&self, state: DetailEnhancementState) {
		self.state.lock().detail_enhancement_state = state;
	}

	fn record(&self, call: EngineCall) {
		self.state.lock().calls.push(call);
	}
}

impl FrameGenEngine for RecordingEngine {
	fn init(&self, preferences: &Preferences) -> EngineResult<()> {
		let mut state = self.state.lock();
		state.init_calls += 1;
		if let Some(error) = state.fail_init {
			return Err(error);
		}
		state.requested = preferences.features_to_load.clone();
		Ok(())
	}

	fn shutdown(&self) -> EngineResult<()> {
		self.state.lock().shutdown_calls += 1;
		Ok(())
	}

	fn is_feature_loaded(&self, feature: Feature) -> bool {
		let state = self.state.lock();
		state.requested.contains(&feature) && !state.unloaded.contains(&feature)
	}

	fn is_feature_supported(&self, feature: Feature, _adapter: &AdapterInfo) -> EngineResult<()> {
		let mut state = self.state.lock();
		state.support_queries += 1;
		if let Some(error) = state.unsupported.get(&feature) {
			return Err(*error);
		}
		if !state.requested.contains(&feature) || state.unloaded.contains(&feature) {
			return Err(EngineError::FeatureMissing);
		}
		Ok(())
	}

	fn feature_requirements(&self, _feature: Feature) -> EngineResult<FeatureRequirements> {
		Ok(FeatureRequirements::default())
	}

	fn new_frame_token(&self, _frame_index: u32) -> EngineResult<u64> {
		let mut state = self.state.lock();
		if let Some(error) = state.fail_next_token.take() {
			return Err(error);
		}
		state.minted_tokens += 1;
		Ok(0x7000 + state.minted_tokens)
	}

	fn set_constants(&self, _constants: &CameraConstants, frame: &FrameToken, view: ViewportHandle) -> EngineResult<()> {
		self.record(EngineCall::SetConstants {
			view,
			frame_index: frame.frame_index,
		});
		Ok(())
	}

	fn set_tag(&self, view: ViewportHandle, tags: &[ResourceTag], cmd: NativeCommandBuffer) -> EngineResult<()> {
		let mut state = self.state.lock();
		state.calls.push(EngineCall::SetTag {
			view,
			tags: tags.iter().copied().collect(),
			cmd,
		});
		state.fail_next_set_tag.take().map_or(Ok(()), Err)
	}

	fn evaluate_feature(
		&self,
		feature: Feature,
		frame: &FrameToken,
		view: ViewportHandle,
		cmd: NativeCommandBuffer,
	) -> EngineResult<()> {
		self.record(EngineCall::EvaluateFeature {
			feature,
			frame_index: frame.frame_index,
			view,
			cmd,
		});
		Ok(())
	}

	fn free_resources(&self, feature: Feature, view: ViewportHandle) -> EngineResult<()> {
		self.record(EngineCall::FreeResources { feature, view });
		Ok(())
	}

	fn native_interface(&self, proxy: NativeHandle) -> EngineResult<NativeHandle> {
		let state = self.state.lock();
		if state.failing_native_interfaces.contains(&proxy) {
			return Err(EngineError::InvalidParameter);
		}
		Ok(state.native_interfaces.get(&proxy).copied().unwrap_or(proxy))
	}

	fn set_frame_gen_options(&self, view: ViewportHandle, options: &FrameGenOptions) -> EngineResult<()> {
		self.record(EngineCall::SetFrameGenOptions {
			view,
			options: *options,
		});
		Ok(())
	}

	fn frame_gen_state(&self, _view: ViewportHandle, options: &FrameGenOptions) -> EngineResult<FrameGenState> {
		let mut state = self.state.lock();
		state.frame_gen_state_queries += 1;
		state.last_frame_gen_state_options = Some(*options);
		Ok(state.frame_gen_state)
	}

	fn set_detail_enhancement_options(
		&self,
		view: ViewportHandle,
		options: &DetailEnhancementOptions,
	) -> EngineResult<()> {
		self.record(EngineCall::SetDetailEnhancementOptions {
			view,
			options: *options,
		});
		Ok(())
	}

	fn detail_enhancement_state(&self, _view: ViewportHandle) -> EngineResult<DetailEnhancementState> {
		Ok(self.state.lock().detail_enhancement_state)
	}
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum D3D12Call {
	Transition(D3D12Transition),
	Flush(u32),
	FinishExternalComputeWork(u32, NativeCommandBuffer),
}

/// Single NVIDIA GPU unless [`Self::set_device_index`] moves resources elsewhere.
#[derive(Debug)]
pub struct TestD3D12Device {
	pub adapter: AdapterInfo,
	device_indices: Mutex<FxHashMap<NativeHandle, u32>>,
	calls: Mutex<Vec<D3D12Call>>,
}

impl Default for TestD3D12Device {
	fn default() -> Self {
		Self {
			adapter: AdapterInfo {
				vendor_id: NVIDIA_VENDOR_ID,
				luid: 1,
			},
			device_indices: Mutex::default(),
			calls: Mutex::default(),
		}
	}
}

impl TestD3D12Device {
	pub fn command_list(device_index: u32) -> NativeCommandBuffer {
		NativeCommandBuffer::new(0xC000 + u64::from(device_index))
	}

	pub fn set_device_index(&self, resource: NativeHandle, device_index: u32) {
		self.device_indices.lock().insert(resource, device_index);
	}

	pub fn calls(&self) -> Vec<D3D12Call> {
		self.calls.lock().clone()
	}
}

impl D3D12Device for TestD3D12Device {
	fn adapter_info(&self) -> AdapterInfo {
		self.adapter
	}

	fn resource_device_index(&self, resource: NativeHandle) -> u32 {
		self.device_indices.lock().get(&resource).copied().unwrap_or(0)
	}

	fn graphics_command_list(&self, device_index: u32) -> NativeCommandBuffer {
		Self::command_list(device_index)
	}

	fn transition_resource(&self, transition: &D3D12Transition) {
		self.calls.lock().push(D3D12Call::Transition(*transition));
	}

	fn flush_resource_barriers(&self, device_index: u32) {
		self.calls.lock().push(D3D12Call::Flush(device_index));
	}

	fn finish_external_compute_work(&self, device_index: u32, cmd: NativeCommandBuffer) {
		self.calls
			.lock()
			.push(D3D12Call::FinishExternalComputeWork(device_index, cmd));
	}
}

#[derive(Debug, Default)]
pub struct TestD3D11Device;

impl TestD3D11Device {
	pub const IMMEDIATE_CONTEXT: NativeCommandBuffer = NativeCommandBuffer::new(0xD11);
}

impl D3D11Device for TestD3D11Device {
	fn adapter_info(&self) -> AdapterInfo {
		AdapterInfo {
			vendor_id: NVIDIA_VENDOR_ID,
			luid: 1,
		}
	}

	fn immediate_context(&self) -> NativeCommandBuffer {
		Self::IMMEDIATE_CONTEXT
	}
}

pub type TestBackend = D3D12Backend<TestD3D12Device>;
pub type TestFrameGen = FrameGenInstance<TestBackend>;

pub fn frame_gen_with(ci: FrameGenCreateInfo, engine: Arc<RecordingEngine>) -> TestFrameGen {
	frame_gen_with_device(ci, engine, TestD3D12Device::default())
}

pub fn frame_gen_with_device(
	ci: FrameGenCreateInfo,
	engine: Arc<RecordingEngine>,
	device: TestD3D12Device,
) -> TestFrameGen {
	FrameGenInstance::new(ci, D3D12Backend::new(device), engine)
}

pub const VIEW_EXTENT: UVec2 = UVec2::new(1920, 1080);

/// A full HD game view, rendered without dynamic resolution.
pub fn game_view(view_key: u32, render_target: Option<Texture>) -> ViewInfo {
	let rect = Rect::from(VIEW_EXTENT);
	ViewInfo {
		view_key,
		family_index: 0,
		is_scene_capture: false,
		is_offline_render: false,
		is_game_view: true,
		stereo_pass: StereoPass::Full,
		view_rect: rect,
		unscaled_view_rect: rect,
		unconstrained_view_rect: rect,
		secondary_view_size: VIEW_EXTENT.as_ivec2(),
		render_target,
		camera: CameraInfo::default(),
		camera_cut: false,
	}
}

pub fn render_target(name: &str, raw: u64) -> Texture {
	Texture::new(
		NativeHandle::new(raw),
		TextureDesc::new(
			name,
			VIEW_EXTENT,
			TextureUsage::RENDER_TARGETABLE | TextureUsage::SHADER_RESOURCE | TextureUsage::PRESENTABLE,
		),
	)
}

/// Scene color without UAV usage, depth and velocity of a full HD view.
pub fn scene_inputs() -> PostProcessInputs {
	let texture = |raw, name: &str, usage| Texture::new(NativeHandle::new(raw), TextureDesc::new(name, VIEW_EXTENT, usage));
	PostProcessInputs {
		scene_color: ScreenPassTexture::new(
			texture(
				0x500,
				"SceneColor",
				TextureUsage::RENDER_TARGETABLE | TextureUsage::SHADER_RESOURCE,
			),
			Rect::from(VIEW_EXTENT),
		),
		scene_depth: texture(
			0x600,
			"SceneDepth",
			TextureUsage::DEPTH_STENCIL_TARGETABLE | TextureUsage::SHADER_RESOURCE,
		),
		velocity: Some(texture(
			0x700,
			"Velocity",
			TextureUsage::RENDER_TARGETABLE | TextureUsage::SHADER_RESOURCE,
		)),
		override_output: None,
	}
}

#[derive(Debug, Clone, PartialEq)]
pub enum RendererCall {
	CreateTexture(Texture),
	Copy {
		src: NativeHandle,
		dst: NativeHandle,
	},
	VelocityCombine {
		depth: NativeHandle,
		velocity: Option<NativeHandle>,
		dilate: bool,
		output: Texture,
	},
	UiHintExtraction {
		threshold: f32,
		backbuffer: NativeHandle,
		output: Texture,
	},
	ClearAlpha {
		texture: NativeHandle,
		rect: Rect,
	},
}

/// A [`HostRenderer`] recording the passes added to it. The application starts out in the foreground.
#[derive(Debug)]
pub struct RecordingRenderer {
	foreground: AtomicBool,
	next_handle: AtomicU64,
	calls: Mutex<Vec<RendererCall>>,
}

impl RecordingRenderer {
	pub fn new() -> Self {
		Self {
			foreground: AtomicBool::new(true),
			next_handle: AtomicU64::new(0x1_0000),
			calls: Mutex::default(),
		}
	}

	pub fn calls(&self) -> Vec<RendererCall> {
		self.calls.lock().clone()
	}

	pub fn set_foreground(&self, foreground: bool) {
		self.foreground.store(foreground, Ordering::Relaxed);
	}

	/// A new full HD UAV texture, without recording anything.
	pub fn texture(&self, name: &str) -> Texture {
		self.mint(TextureDesc::new(
			name,
			VIEW_EXTENT,
			TextureUsage::SHADER_RESOURCE | TextureUsage::UNORDERED_ACCESS,
		))
	}

	fn mint(&self, desc: TextureDesc) -> Texture {
		Texture::new(
			NativeHandle::new(self.next_handle.fetch_add(1, Ordering::Relaxed)),
			desc,
		)
	}
}

impl HostRenderer for RecordingRenderer {
	fn create_texture(&self, desc: TextureDesc) -> Texture {
		let texture = self.mint(desc);
		self.calls.lock().push(RendererCall::CreateTexture(texture.clone()));
		texture
	}

	fn add_copy_pass(&self, src: &Texture, dst: &Texture) {
		self.calls.lock().push(RendererCall::Copy {
			src: src.native,
			dst: dst.native,
		});
	}

	fn add_velocity_combine_pass(&self, depth: &Texture, velocity: Option<&Texture>, dilate: bool) -> Texture {
		let output = self.mint(TextureDesc::new(
			"FrameGen.CombinedVelocity",
			depth.extent(),
			TextureUsage::SHADER_RESOURCE | TextureUsage::UNORDERED_ACCESS,
		));
		self.calls.lock().push(RendererCall::VelocityCombine {
			depth: depth.native,
			velocity: velocity.map(|velocity| velocity.native),
			dilate,
			output: output.clone(),
		});
		output
	}

	fn add_ui_hint_extraction_pass(&self, alpha_threshold: f32, backbuffer: &Texture) -> Texture {
		let output = self.mint(TextureDesc::new(
			"FrameGen.UIColorAndAlpha",
			backbuffer.extent(),
			TextureUsage::SHADER_RESOURCE | TextureUsage::UNORDERED_ACCESS,
		));
		self.calls.lock().push(RendererCall::UiHintExtraction {
			threshold: alpha_threshold,
			backbuffer: backbuffer.native,
			output: output.clone(),
		});
		output
	}

	fn add_clear_alpha_pass(&self, texture: &Texture, rect: Rect) {
		self.calls.lock().push(RendererCall::ClearAlpha {
			texture: texture.native,
			rect,
		});
	}

	fn is_foreground(&self) -> bool {
		self.foreground.load(Ordering::Relaxed)
	}
}

