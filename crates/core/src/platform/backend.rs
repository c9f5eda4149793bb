use crate::descriptor::{NativeCommandBuffer, NativeHandle};
use crate::engine::{Feature, FrameGenEngine, RequirementFlags, ViewportHandle, handle_api_error};
use crate::pipeline::{TagError, TagInput};

/// Graphics APIs the host renderer may run on.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum NativeApi {
	D3D11,
	D3D12,
	Vulkan,
}

impl NativeApi {
	pub fn name(&self) -> &'static str {
		match self {
			NativeApi::D3D11 => "D3D11",
			NativeApi::D3D12 => "D3D12",
			NativeApi::Vulkan => "Vulkan",
		}
	}

	pub fn requirement_flag(&self) -> RequirementFlags {
		match self {
			NativeApi::D3D11 => RequirementFlags::D3D11,
			NativeApi::D3D12 => RequirementFlags::D3D12,
			NativeApi::Vulkan => RequirementFlags::VULKAN,
		}
	}
}

/// APIs that have a [`GraphicsBackend`] in this crate
pub const IMPLEMENTED_APIS: RequirementFlags = RequirementFlags::D3D11.union(RequirementFlags::D3D12);

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum GpuVendor {
	Nvidia,
	Amd,
	Intel,
	Other(u32),
}

impl GpuVendor {
	pub fn from_vendor_id(vendor_id: u32) -> Self {
		match vendor_id {
			0x10DE => GpuVendor::Nvidia,
			0x1002 => GpuVendor::Amd,
			0x8086 => GpuVendor::Intel,
			other => GpuVendor::Other(other),
		}
	}
}

/// The adapter the host renders with, identified by its LUID towards the engine.
#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq)]
pub struct AdapterInfo {
	pub vendor_id: u32,
	pub luid: u64,
}

impl AdapterInfo {
	pub fn vendor(&self) -> GpuVendor {
		GpuVendor::from_vendor_id(self.vendor_id)
	}
}

/// The per graphics API part of talking to the external engine: translating resources into tags with the API's
/// resource state model, and finding the command buffer to record engine work into.
pub trait GraphicsBackend: Send + Sync + 'static {
	const API: NativeApi;

	fn adapter_info(&self) -> AdapterInfo;

	fn supports_frame_generation(&self) -> bool;

	fn supports_detail_enhancement(&self) -> bool;

	/// Whether this backend can drive `feature` at all, independent of the adapter.
	fn supports_feature(&self, feature: Feature) -> bool {
		match feature {
			Feature::FrameGeneration => self.supports_frame_generation(),
			Feature::DetailEnhancement => self.supports_detail_enhancement(),
			Feature::LatencyReduction | Feature::DebugOverlay => true,
		}
	}

	/// The command buffer engine work on `resource` should be recorded into.
	fn command_buffer(&self, resource: NativeHandle) -> NativeCommandBuffer;

	/// Tags all `inputs` for `view`. An empty slice does nothing.
	fn tag_textures(&self, engine: &dyn FrameGenEngine, view: ViewportHandle, inputs: &[TagInput])
	-> Result<(), TagError>;

	/// Restores host renderer state after the engine recorded work into the command buffer of `resource`.
	fn post_evaluation_barrier(&self, resource: NativeHandle);

	/// Called by the engine with HRESULTs of D3D and DXGI calls it made on our behalf.
	fn api_error_handler(&self, hresult: i32) {
		handle_api_error(Self::API.name(), hresult);
	}
}
