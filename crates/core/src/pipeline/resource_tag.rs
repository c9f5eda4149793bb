use crate::descriptor::{NativeHandle, Texture};
use crate::pipeline::{ResourceRole, TagLifecycle};
use crate::view::Rect;
use smallvec::SmallVec;
use tracing::warn;

/// Sub-rectangle of a tagged resource the engine should read, in pixels.
#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq)]
pub struct TagExtent {
	pub left: u32,
	pub top: u32,
	pub width: u32,
	pub height: u32,
}

impl TagExtent {
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.width == 0 || self.height == 0
	}
}

impl From<Rect> for TagExtent {
	fn from(rect: Rect) -> Self {
		Self {
			left: rect.min.x.max(0) as u32,
			top: rect.min.y.max(0) as u32,
			width: rect.width().max(0) as u32,
			height: rect.height().max(0) as u32,
		}
	}
}

/// Kind of the native resource behind a tag. Null tags have no kind.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq)]
pub enum ResourceKind {
	#[default]
	Unknown,
	Tex2d,
}

#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq)]
pub struct TaggedResource {
	pub native: NativeHandle,
	pub kind: ResourceKind,
	/// Native resource state while tagged, `D3D12_RESOURCE_STATES` or 0 for APIs without resource states.
	pub state: u32,
}

impl TaggedResource {
	pub const NULL: Self = Self {
		native: NativeHandle::NULL,
		kind: ResourceKind::Unknown,
		state: 0,
	};
}

/// A single tag as submitted to the engine. Built fresh for each submission, never retained.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub struct ResourceTag {
	pub resource: TaggedResource,
	pub role: ResourceRole,
	pub lifecycle: TagLifecycle,
	pub extent: Option<TagExtent>,
}

impl ResourceTag {
	/// Explicitly untags `role`.
	pub fn null(role: ResourceRole) -> Self {
		Self {
			resource: TaggedResource::NULL,
			role,
			lifecycle: TagLifecycle::OnlyValidNow,
			extent: None,
		}
	}

	#[inline]
	pub fn is_null(&self) -> bool {
		self.resource.native.is_null()
	}
}

/// A resource to tag as recorded on the render thread, before a backend translates it into a [`ResourceTag`].
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub struct TagInput {
	pub role: ResourceRole,
	/// [`NativeHandle::NULL`] untags the role
	pub native: NativeHandle,
	pub rect: Rect,
}

impl TagInput {
	pub fn new(role: ResourceRole, native: NativeHandle, rect: Rect) -> Self {
		Self { role, native, rect }
	}

	pub fn null(role: ResourceRole, rect: Rect) -> Self {
		Self::new(role, NativeHandle::NULL, rect)
	}

	/// Tags `texture`, or untags `role` if `texture` is `None`.
	pub fn texture(role: ResourceRole, texture: Option<&Texture>, rect: Rect) -> Self {
		match texture {
			Some(texture) => {
				let required = role.required_usage();
				if !texture.has_usage(required) {
					warn!(
						"Texture \"{}\" with usages {:?} is missing usage {:?} to be tagged as {:?}",
						texture.name(),
						texture.desc.usage,
						required - texture.desc.usage,
						role
					);
				}
				Self::new(role, texture.native, rect)
			}
			None => Self::null(role, rect),
		}
	}

	#[inline]
	pub fn is_null(&self) -> bool {
		self.native.is_null()
	}
}

pub type TagInputs = SmallVec<[TagInput; ResourceRole::COUNT]>;
pub type TagBatch = SmallVec<[ResourceTag; ResourceRole::COUNT]>;
