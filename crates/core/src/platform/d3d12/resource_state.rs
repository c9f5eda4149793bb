use crate::descriptor::NativeHandle;
use crate::pipeline::ResourceRole;
use bitflags::bitflags;

bitflags! {
	/// `D3D12_RESOURCE_STATES`
	#[repr(transparent)]
	#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
	pub struct D3D12ResourceStates: u32 {
		const VERTEX_AND_CONSTANT_BUFFER = 0x1;
		const INDEX_BUFFER = 0x2;
		const RENDER_TARGET = 0x4;
		const UNORDERED_ACCESS = 0x8;
		const DEPTH_WRITE = 0x10;
		const DEPTH_READ = 0x20;
		const NON_PIXEL_SHADER_RESOURCE = 0x40;
		const PIXEL_SHADER_RESOURCE = 0x80;
		const STREAM_OUT = 0x100;
		const INDIRECT_ARGUMENT = 0x200;
		const COPY_DEST = 0x400;
		const COPY_SOURCE = 0x800;
		const RESOLVE_DEST = 0x1000;
		const RESOLVE_SOURCE = 0x2000;
	}
}

impl D3D12ResourceStates {
	/// `D3D12_RESOURCE_STATE_COMMON`, also `D3D12_RESOURCE_STATE_PRESENT`
	pub const COMMON: Self = Self::empty();
}

/// The subresource of a depth target that is tagged. Depth subresources are in different states, only this one is
/// transitioned for tagging.
pub const DEPTH_TAG_SUBRESOURCE: u32 = 1;

/// The backbuffer is tagged in the same state as [`ResourceRole::ScalingOutputColor`] instead of `COMMON`.
pub const BACKBUFFER_SHARES_OUTPUT_STATE: bool = true;

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub struct D3D12Transition {
	pub resource: NativeHandle,
	pub state: D3D12ResourceStates,
	pub subresource: u32,
}

/// State a resource must be tagged in, plus the transitions to get it there and back.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub struct D3D12RoleState {
	pub state: D3D12ResourceStates,
	/// `(state, subresource)` to transition into before tagging
	pub pre_tag: Option<(D3D12ResourceStates, u32)>,
	/// `(state, subresource)` to transition back into after tagging
	pub post_tag: Option<(D3D12ResourceStates, u32)>,
}

impl D3D12RoleState {
	pub const fn new(state: D3D12ResourceStates) -> Self {
		Self {
			state,
			pre_tag: None,
			post_tag: None,
		}
	}

	pub fn pre_tag_transition(&self, resource: NativeHandle) -> Option<D3D12Transition> {
		self.pre_tag.map(|(state, subresource)| D3D12Transition {
			resource,
			state,
			subresource,
		})
	}

	pub fn post_tag_transition(&self, resource: NativeHandle) -> Option<D3D12Transition> {
		self.post_tag.map(|(state, subresource)| D3D12Transition {
			resource,
			state,
			subresource,
		})
	}
}

impl ResourceRole {
	pub fn to_d3d12_role_state(&self) -> D3D12RoleState {
		match self {
			ResourceRole::Depth => {
				let read = D3D12ResourceStates::DEPTH_READ.union(D3D12ResourceStates::NON_PIXEL_SHADER_RESOURCE);
				D3D12RoleState {
					state: read,
					pre_tag: Some((read, DEPTH_TAG_SUBRESOURCE)),
					post_tag: Some((D3D12ResourceStates::DEPTH_WRITE, DEPTH_TAG_SUBRESOURCE)),
				}
			}
			ResourceRole::MotionVectors => D3D12RoleState::new(D3D12ResourceStates::UNORDERED_ACCESS),
			// copied into by the host renderer right before tagging
			ResourceRole::ColorWithoutUi => D3D12RoleState::new(D3D12ResourceStates::COPY_DEST),
			ResourceRole::UiColorAndAlpha => D3D12RoleState::new(D3D12ResourceStates::UNORDERED_ACCESS),
			ResourceRole::Backbuffer if BACKBUFFER_SHARES_OUTPUT_STATE => {
				ResourceRole::ScalingOutputColor.to_d3d12_role_state()
			}
			ResourceRole::Backbuffer => D3D12RoleState::new(D3D12ResourceStates::COMMON),
			ResourceRole::ScalingOutputColor => D3D12RoleState::new(D3D12ResourceStates::UNORDERED_ACCESS),
		}
	}
}
