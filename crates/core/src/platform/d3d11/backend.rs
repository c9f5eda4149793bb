use crate::descriptor::{NativeCommandBuffer, NativeHandle};
use crate::engine::{FrameGenEngine, ViewportHandle};
use crate::pipeline::{ResourceKind, ResourceTag, TagError, TagInput, TagLifecycle, TaggedResource};
use crate::platform::{AdapterInfo, GraphicsBackend, NativeApi};

/// The host renderer's D3D11 device, as far as tagging needs it.
pub trait D3D11Device: Send + Sync + 'static {
	fn adapter_info(&self) -> AdapterInfo;

	/// The immediate `ID3D11DeviceContext`, all D3D11 work is recorded into it.
	fn immediate_context(&self) -> NativeCommandBuffer;
}

/// D3D11 has no explicit resource states, so tags are submitted as-is, one at a time.
pub struct D3D11Backend<D: D3D11Device> {
	device: D,
}

impl<D: D3D11Device> D3D11Backend<D> {
	pub fn new(device: D) -> Self {
		Self { device }
	}

	pub fn device(&self) -> &D {
		&self.device
	}
}

impl<D: D3D11Device> GraphicsBackend for D3D11Backend<D> {
	const API: NativeApi = NativeApi::D3D11;

	fn adapter_info(&self) -> AdapterInfo {
		self.device.adapter_info()
	}

	fn supports_frame_generation(&self) -> bool {
		true
	}

	fn supports_detail_enhancement(&self) -> bool {
		true
	}

	fn command_buffer(&self, _resource: NativeHandle) -> NativeCommandBuffer {
		self.device.immediate_context()
	}

	fn tag_textures(
		&self,
		engine: &dyn FrameGenEngine,
		view: ViewportHandle,
		inputs: &[TagInput],
	) -> Result<(), TagError> {
		let cmd = self.device.immediate_context();
		let mut first_error = None;
		for input in inputs {
			let tag = ResourceTag {
				resource: TaggedResource {
					native: input.native,
					kind: ResourceKind::Tex2d,
					state: 0,
				},
				role: input.role,
				lifecycle: TagLifecycle::OnlyValidNow,
				extent: (!input.is_null()).then(|| input.rect.into()),
			};
			if let Err(source) = engine.set_tag(view, &[tag], cmd) {
				first_error.get_or_insert(TagError::Engine { view, source });
			}
		}
		first_error.map_or(Ok(()), Err)
	}

	fn post_evaluation_barrier(&self, _resource: NativeHandle) {}
}
