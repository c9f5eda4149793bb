use crate::context::FrameGen;
use crate::engine::{DetailEnhancementMode, Feature, FeatureSupport, FrameGenMode};
use crate::platform::{GpuVendor, GraphicsBackend};
use once_cell::sync::OnceCell;
use tracing::info;

/// Support of each [`Feature`], computed once on first query.
#[derive(Debug, Default)]
pub struct CapabilityGate {
	support: [OnceCell<FeatureSupport>; Feature::COUNT],
}

impl<B: GraphicsBackend> FrameGen<B> {
	pub fn feature_support(&self, feature: Feature) -> FeatureSupport {
		let mut computed = false;
		let support = *self.capability.support[feature.index()].get_or_init(|| {
			computed = true;
			self.compute_feature_support(feature)
		});
		if computed && feature == Feature::FrameGeneration && support.is_supported() {
			// caches the minimum viewport size frame generation runs at
			self.poll_frame_generation_status(true);
		}
		support
	}

	fn compute_feature_support(&self, feature: Feature) -> FeatureSupport {
		let adapter = self.backend.adapter_info();
		let support = if !self.host.can_ever_render {
			FeatureSupport::NotSupported
		} else if adapter.vendor() != GpuVendor::Nvidia {
			FeatureSupport::IncompatibleHardware
		} else if !self.is_initialized() {
			FeatureSupport::NotSupported
		} else if !self.backend.supports_feature(feature) {
			FeatureSupport::IncompatibleRhi
		} else {
			FeatureSupport::from_engine_result(self.engine.is_feature_supported(feature, &adapter))
		};
		info!(%feature, ?support, "Feature support");
		support
	}

	#[inline]
	pub fn is_feature_supported(&self, feature: Feature) -> bool {
		self.feature_support(feature).is_supported()
	}

	pub fn is_frame_generation_active(&self) -> bool {
		self.is_feature_supported(Feature::FrameGeneration) && self.settings().frame_gen_mode() != FrameGenMode::Off
	}

	pub fn is_detail_enhancement_active(&self) -> bool {
		self.is_feature_supported(Feature::DetailEnhancement)
			&& self.settings().detail_enhancement_mode() != DetailEnhancementMode::Off
	}

	/// Whether the inputs of frame generation are tagged this frame, also true when tagging is forced without frame
	/// generation running.
	pub fn should_tag_frame_generation(&self) -> bool {
		self.settings().force_tagging || self.is_frame_generation_active()
	}
}
