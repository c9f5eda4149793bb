use crate::descriptor::TextureUsage;
use num_derive::{FromPrimitive, ToPrimitive};
use static_assertions::const_assert_eq;

/// The role a tagged resource plays for the external engine.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, FromPrimitive, ToPrimitive)]
pub enum ResourceRole {
	Depth,
	MotionVectors,
	/// Scene color before the UI was composited onto it
	ColorWithoutUi,
	UiColorAndAlpha,
	Backbuffer,
	/// Input and output of detail enhancement, evaluated in place
	ScalingOutputColor,
}

impl ResourceRole {
	pub const COUNT: usize = 6;
	pub const ALL: [ResourceRole; Self::COUNT] = [
		ResourceRole::Depth,
		ResourceRole::MotionVectors,
		ResourceRole::ColorWithoutUi,
		ResourceRole::UiColorAndAlpha,
		ResourceRole::Backbuffer,
		ResourceRole::ScalingOutputColor,
	];

	/// Returns the [`TextureUsage`] a texture needs to be tagged with this role. Null tags need nothing.
	///
	/// The external engine reads depth and color through SRVs, motion vectors come out of a compute pass and the
	/// engine writes UI color and the scaling output through UAVs.
	pub fn required_usage(&self) -> TextureUsage {
		match self {
			ResourceRole::Depth => TextureUsage::empty(),
			ResourceRole::MotionVectors => TextureUsage::UNORDERED_ACCESS,
			ResourceRole::ColorWithoutUi => TextureUsage::SHADER_RESOURCE,
			ResourceRole::UiColorAndAlpha => TextureUsage::UNORDERED_ACCESS,
			ResourceRole::Backbuffer => TextureUsage::empty(),
			ResourceRole::ScalingOutputColor => TextureUsage::UNORDERED_ACCESS,
		}
	}
}

const_assert_eq!(ResourceRole::ScalingOutputColor as usize + 1, ResourceRole::COUNT);

/// How long the external engine may assume a tagged resource stays valid.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq, FromPrimitive, ToPrimitive)]
pub enum TagLifecycle {
	/// The engine copies the resource immediately if it needs it later
	#[default]
	OnlyValidNow,
	ValidUntilPresent,
	ValidUntilEvaluate,
}
