use crate::engine::{EngineError, EngineResult};
use bitflags::bitflags;
use num_derive::{FromPrimitive, ToPrimitive};

#[repr(i32)]
#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq, FromPrimitive, ToPrimitive)]
pub enum FrameGenMode {
	#[default]
	Off = 0,
	On = 1,
	/// The engine decides per frame whether generating frames is beneficial
	Auto = 2,
}

#[repr(i32)]
#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq, FromPrimitive, ToPrimitive)]
pub enum DetailEnhancementMode {
	#[default]
	Off = 0,
	On = 1,
}

bitflags! {
	#[repr(transparent)]
	#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
	pub struct FrameGenFlags: u32 {
		/// Let the engine detect full screen menus and stop generating frames while they are up
		const FULLSCREEN_MENU_DETECTION = 1 << 0;
		const DYNAMIC_RESOLUTION = 1 << 1;
	}
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FrameGenOptions {
	pub mode: FrameGenMode,
	pub num_frames_to_generate: u32,
	pub flags: FrameGenFlags,
}

impl Default for FrameGenOptions {
	fn default() -> Self {
		Self {
			mode: FrameGenMode::Off,
			num_frames_to_generate: 1,
			flags: FrameGenFlags::empty(),
		}
	}
}

/// Runtime status the engine reports for frame generation.
#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq)]
pub enum FrameGenStatus {
	#[default]
	Ok,
	FailResolutionTooLow,
	FailReflexNotDetectedAtRuntime,
	FailHdrFormatNotSupported,
	FailCommonConstantsInvalid,
	FailGetCurrentBackBufferIndexNotCalled,
}

impl FrameGenStatus {
	pub fn is_ok(self) -> bool {
		self == FrameGenStatus::Ok
	}
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FrameGenState {
	pub status: FrameGenStatus,
	/// Smaller viewports can not run frame generation
	pub min_width_or_height: u32,
	/// Frames actually presented for the last presented frame, including generated ones
	pub num_frames_actually_presented: u32,
	pub estimated_vram_usage: u64,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DetailEnhancementOptions {
	pub mode: DetailEnhancementMode,
	pub intensity: f32,
	pub saturation_boost: f32,
}

impl Default for DetailEnhancementOptions {
	fn default() -> Self {
		Self {
			mode: DetailEnhancementMode::Off,
			intensity: 0.5,
			saturation_boost: 0.5,
		}
	}
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct DetailEnhancementState {
	pub estimated_vram_usage: u64,
}

/// Converts a raw setting into one of the numeric mode enums, failing with [`EngineError::InvalidParameter`] for
/// values outside the enum.
pub fn mode_from_raw<M: num_traits::FromPrimitive>(raw: i32) -> EngineResult<M> {
	M::from_i32(raw).ok_or(EngineError::InvalidParameter)
}
