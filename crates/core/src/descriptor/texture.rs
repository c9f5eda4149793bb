use crate::descriptor::NativeHandle;
use bitflags::bitflags;
use glam::UVec2;

bitflags! {
	/// Mirrors the host engine's texture create flags, as far as they are relevant for tagging.
	#[repr(transparent)]
	#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
	pub struct TextureUsage: u32 {
		const SHADER_RESOURCE = 1 << 0;
		const UNORDERED_ACCESS = 1 << 1;
		const RENDER_TARGETABLE = 1 << 2;
		const RESOLVE_TARGETABLE = 1 << 3;
		const DEPTH_STENCIL_TARGETABLE = 1 << 4;
		const PRESENTABLE = 1 << 5;
	}
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TextureDesc {
	/// The debug name the host engine gave this texture
	pub name: String,
	pub extent: UVec2,
	pub usage: TextureUsage,
}

impl TextureDesc {
	pub fn new(name: impl Into<String>, extent: UVec2, usage: TextureUsage) -> Self {
		Self {
			name: name.into(),
			extent,
			usage,
		}
	}

	/// Desc for an intermediate copy of this texture that the external engine may access as an unordered access
	/// view. Presentable and resolve targets cannot have UAVs, so those usages are dropped.
	pub fn uav_compatible(&self, name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			extent: self.extent,
			usage: (self.usage | TextureUsage::SHADER_RESOURCE | TextureUsage::UNORDERED_ACCESS)
				- (TextureUsage::PRESENTABLE | TextureUsage::RESOLVE_TARGETABLE),
		}
	}
}

/// A host engine texture. Only its [`NativeHandle`] ends up in recorded commands, the desc is needed to make
/// decisions while recording.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Texture {
	pub native: NativeHandle,
	pub desc: TextureDesc,
}

impl Texture {
	pub fn new(native: NativeHandle, desc: TextureDesc) -> Self {
		Self { native, desc }
	}

	#[inline]
	pub fn name(&self) -> &str {
		&self.desc.name
	}

	#[inline]
	pub fn extent(&self) -> UVec2 {
		self.desc.extent
	}

	#[inline]
	pub fn has_usage(&self, usage: TextureUsage) -> bool {
		self.desc.usage.contains(usage)
	}
}
