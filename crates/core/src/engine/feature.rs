use crate::engine::{EngineError, EngineResult};
use bitflags::bitflags;
use num_derive::{FromPrimitive, ToPrimitive};
use std::fmt::{Display, Formatter};

/// Optional features of the external engine this layer drives.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, FromPrimitive, ToPrimitive)]
pub enum Feature {
	FrameGeneration,
	DetailEnhancement,
	LatencyReduction,
	DebugOverlay,
}

impl Feature {
	pub const COUNT: usize = 4;
	pub const ALL: [Feature; Self::COUNT] = [
		Feature::FrameGeneration,
		Feature::DetailEnhancement,
		Feature::LatencyReduction,
		Feature::DebugOverlay,
	];

	#[inline]
	pub fn index(self) -> usize {
		self as usize
	}

	pub fn name(&self) -> &'static str {
		match self {
			Feature::FrameGeneration => "FrameGeneration",
			Feature::DetailEnhancement => "DetailEnhancement",
			Feature::LatencyReduction => "LatencyReduction",
			Feature::DebugOverlay => "DebugOverlay",
		}
	}

	/// Suffix of the `-sl<suffix>` / `-slno<suffix>` command line switches that force loading this feature on or
	/// off. Latency reduction is always loaded and has none.
	pub fn command_line_suffix(&self) -> Option<&'static str> {
		match self {
			Feature::FrameGeneration => Some("dlssg"),
			Feature::DetailEnhancement => Some("deepdvc"),
			Feature::LatencyReduction => None,
			Feature::DebugOverlay => Some("debugoverlay"),
		}
	}

	/// Features that hook presentation and thus need the swapchain to be wrapped in a proxy.
	pub fn requires_swapchain_provider(&self) -> bool {
		matches!(self, Feature::FrameGeneration | Feature::DebugOverlay)
	}
}

impl Display for Feature {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

/// Whether a [`Feature`] can be used, as exposed to every caller of this crate.
#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq)]
pub enum FeatureSupport {
	Supported,
	#[default]
	NotSupported,
	IncompatibleHardware,
	DriverOutOfDate,
	OperatingSystemOutOfDate,
	HardwareSchedulingDisabled,
	IncompatibleRhi,
}

impl FeatureSupport {
	/// Translates the result of [`FrameGenEngine::is_feature_supported`].
	///
	/// [`FrameGenEngine::is_feature_supported`]: crate::engine::FrameGenEngine::is_feature_supported
	pub fn from_engine_result(result: EngineResult<()>) -> Self {
		match result {
			Ok(()) => FeatureSupport::Supported,
			Err(EngineError::OsDisabledHws) => FeatureSupport::HardwareSchedulingDisabled,
			Err(EngineError::OsOutOfDate) => FeatureSupport::OperatingSystemOutOfDate,
			Err(EngineError::DriverOutOfDate) => FeatureSupport::DriverOutOfDate,
			Err(EngineError::NoSupportedAdapterFound) | Err(EngineError::AdapterNotSupported) => {
				FeatureSupport::IncompatibleHardware
			}
			Err(EngineError::MissingOrInvalidApi) => FeatureSupport::IncompatibleRhi,
			Err(_) => FeatureSupport::NotSupported,
		}
	}

	#[inline]
	pub fn is_supported(self) -> bool {
		self == FeatureSupport::Supported
	}
}

bitflags! {
	#[repr(transparent)]
	#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
	pub struct RequirementFlags: u32 {
		const D3D11 = 1 << 0;
		const D3D12 = 1 << 1;
		const VULKAN = 1 << 2;
		const VSYNC_OFF_REQUIRED = 1 << 3;
		const HARDWARE_SCHEDULING_REQUIRED = 1 << 4;
	}
}

impl RequirementFlags {
	pub const ALL_APIS: Self = Self::D3D11.union(Self::D3D12).union(Self::VULKAN);
}

#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Version {
	pub major: u32,
	pub minor: u32,
	pub build: u32,
}

impl Version {
	pub const fn new(major: u32, minor: u32, build: u32) -> Self {
		Self { major, minor, build }
	}
}

impl Display for Version {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}.{}.{}", self.major, self.minor, self.build)
	}
}

/// What a feature needs from the platform, as reported by the external engine.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FeatureRequirements {
	pub flags: RequirementFlags,
	pub max_num_viewports: u32,
	pub min_os: Version,
	pub detected_os: Version,
	pub min_driver: Version,
	pub detected_driver: Version,
}

impl FeatureRequirements {
	/// Strips the API bits of APIs that have no backend in this crate, keeping all non-API flags.
	pub fn with_implemented_apis(mut self, implemented: RequirementFlags) -> Self {
		let implemented = implemented & RequirementFlags::ALL_APIS;
		self.flags = (self.flags & implemented) | (self.flags - RequirementFlags::ALL_APIS);
		self
	}
}
