use crate::descriptor::{NativeCommandBuffer, NativeHandle};
use crate::engine::{FrameGenEngine, ViewportHandle};
use crate::pipeline::{
	ResourceKind, ResourceRole, ResourceTag, TagBatch, TagError, TagInput, TagLifecycle, TaggedResource,
};
use crate::platform::d3d12::D3D12Transition;
use crate::platform::{AdapterInfo, GraphicsBackend, NativeApi};
use smallvec::SmallVec;

/// The host renderer's D3D12 device, as far as tagging needs it.
pub trait D3D12Device: Send + Sync + 'static {
	fn adapter_info(&self) -> AdapterInfo;

	/// Index of the GPU `resource` lives on, in multi GPU setups.
	fn resource_device_index(&self, resource: NativeHandle) -> u32;

	/// The `ID3D12GraphicsCommandList` currently recording on the device `device_index`.
	fn graphics_command_list(&self, device_index: u32) -> NativeCommandBuffer;

	/// Records a resource barrier into the host's pending barrier batch.
	fn transition_resource(&self, transition: &D3D12Transition);

	fn flush_resource_barriers(&self, device_index: u32);

	/// The engine recorded compute work into `cmd`, the host must reset its cached root signature and descriptor
	/// heaps.
	fn finish_external_compute_work(&self, device_index: u32, cmd: NativeCommandBuffer);
}

pub struct D3D12Backend<D: D3D12Device> {
	device: D,
}

type Transitions = SmallVec<[D3D12Transition; ResourceRole::COUNT]>;

impl<D: D3D12Device> D3D12Backend<D> {
	pub fn new(device: D) -> Self {
		Self { device }
	}

	pub fn device(&self) -> &D {
		&self.device
	}

	/// Device index shared by all non-null `inputs`, `None` if there are none.
	fn device_index(&self, view: ViewportHandle, inputs: &[TagInput]) -> Result<Option<u32>, TagError> {
		let mut device_index = None;
		for input in inputs.iter().filter(|input| !input.is_null()) {
			let index = self.device.resource_device_index(input.native);
			match device_index {
				None => device_index = Some(index),
				Some(first) if first != index => {
					return Err(TagError::MixedDeviceIndices {
						view,
						first,
						other: index,
					});
				}
				Some(_) => (),
			}
		}
		Ok(device_index)
	}
}

impl<D: D3D12Device> GraphicsBackend for D3D12Backend<D> {
	const API: NativeApi = NativeApi::D3D12;

	fn adapter_info(&self) -> AdapterInfo {
		self.device.adapter_info()
	}

	fn supports_frame_generation(&self) -> bool {
		true
	}

	fn supports_detail_enhancement(&self) -> bool {
		true
	}

	fn command_buffer(&self, resource: NativeHandle) -> NativeCommandBuffer {
		self.device
			.graphics_command_list(self.device.resource_device_index(resource))
	}

	fn tag_textures(
		&self,
		engine: &dyn FrameGenEngine,
		view: ViewportHandle,
		inputs: &[TagInput],
	) -> Result<(), TagError> {
		if inputs.is_empty() {
			return Ok(());
		}
		let device_index = self.device_index(view, inputs)?;
		// may be null if we only untag
		let cmd = device_index
			.map(|index| self.device.graphics_command_list(index))
			.unwrap_or(NativeCommandBuffer::NULL);

		let mut tags = TagBatch::new();
		let mut pre_tag = Transitions::new();
		let mut post_tag = Transitions::new();
		for input in inputs {
			if input.is_null() {
				tags.push(ResourceTag::null(input.role));
				continue;
			}
			let role_state = input.role.to_d3d12_role_state();
			pre_tag.extend(role_state.pre_tag_transition(input.native));
			post_tag.extend(role_state.post_tag_transition(input.native));
			tags.push(ResourceTag {
				resource: TaggedResource {
					native: input.native,
					kind: ResourceKind::Tex2d,
					state: role_state.state.bits(),
				},
				role: input.role,
				lifecycle: TagLifecycle::OnlyValidNow,
				extent: Some(input.rect.into()),
			});
		}

		for transition in &pre_tag {
			self.device.transition_resource(transition);
		}
		if let (false, Some(index)) = (pre_tag.is_empty(), device_index) {
			self.device.flush_resource_barriers(index);
		}

		let result = engine.set_tag(view, &tags, cmd);

		// restore even if tagging failed
		for transition in &post_tag {
			self.device.transition_resource(transition);
		}
		result.map_err(|source| TagError::Engine { view, source })
	}

	fn post_evaluation_barrier(&self, resource: NativeHandle) {
		let device_index = self.device.resource_device_index(resource);
		let cmd = self.device.graphics_command_list(device_index);
		self.device.finish_external_compute_work(device_index, cmd);
	}
}
