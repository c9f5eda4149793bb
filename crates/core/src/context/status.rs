use crate::context::FrameGen;
use crate::engine::{DetailEnhancementState, Feature, FrameGenMode, FrameGenOptions, FrameGenState, ViewportHandle};
use crate::platform::GraphicsBackend;
use crate::settings::MotionBlurTimeScale;
use tracing::error;

/// What the engine last reported about its features.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FeatureStatus {
	pub frame_gen: Option<FrameGenState>,
	/// Queried once per application lifetime, 0 until then
	pub frame_gen_min_width_or_height: u32,
	pub detail_enhancement: Option<DetailEnhancementState>,
}

impl FeatureStatus {
	/// Frames presented per rendered frame, at least 1.
	pub fn frames_presented(&self) -> u32 {
		self.frame_gen
			.map_or(1, |state| state.num_frames_actually_presented.max(1))
	}
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameGenTiming {
	/// Presented frame rate including generated frames
	pub frame_rate: f32,
	pub frames_presented: u32,
}

/// All status queries address this view, features with per-view state only run on a single view.
const STATUS_VIEW: ViewportHandle = ViewportHandle(0);

impl<B: GraphicsBackend> FrameGen<B> {
	/// Asks the engine for the state of frame generation. With `query_once_values` the values that never change
	/// during the application's lifetime are refreshed too.
	pub fn poll_frame_generation_status(&self, query_once_values: bool) -> Option<FrameGenState> {
		if query_once_values {
			self.status.lock().frame_gen_min_width_or_height = 0;
		}
		if !self.is_feature_supported(Feature::FrameGeneration) {
			self.status.lock().frame_gen = None;
			return None;
		}

		let (options, check_status) = {
			let settings = self.settings();
			let mode = if settings.view_id_override_active() {
				FrameGenMode::Off
			} else {
				settings.frame_gen_mode()
			};
			let options = FrameGenOptions {
				mode,
				..FrameGenOptions::default()
			};
			(options, settings.check_status_per_frame)
		};

		let state = match self.engine.frame_gen_state(STATUS_VIEW, &options) {
			Ok(state) => state,
			Err(e) => {
				error!("Failed to query the frame generation state: {}", e);
				self.status.lock().frame_gen = None;
				return None;
			}
		};

		let mut status = self.status.lock();
		status.frame_gen = Some(state);
		if query_once_values {
			status.frame_gen_min_width_or_height = state.min_width_or_height;
		}
		if check_status && !state.status.is_ok() {
			error!(
				"Frame generation failed at runtime with {:?}. This check can be disabled with the check_status_per_frame setting",
				state.status
			);
		}
		Some(state)
	}

	pub fn poll_detail_enhancement_status(&self) -> Option<DetailEnhancementState> {
		let state = if self.is_feature_supported(Feature::DetailEnhancement) {
			self.engine
				.detail_enhancement_state(STATUS_VIEW)
				.map_err(|e| error!("Failed to query the detail enhancement state: {}", e))
				.ok()
		} else {
			None
		};
		self.status.lock().detail_enhancement = state;
		state
	}

	pub fn feature_status(&self) -> FeatureStatus {
		*self.status.lock()
	}

	/// Views whose upscaled output is smaller than this in either dimension don't generate frames.
	pub fn frame_gen_min_width_or_height(&self) -> u32 {
		self.status.lock().frame_gen_min_width_or_height
	}

	/// Presented frame timing given the host's `average_fps` of rendered frames.
	pub fn frame_gen_timing(&self, average_fps: f32) -> FrameGenTiming {
		let frames_presented = self.status.lock().frames_presented();
		FrameGenTiming {
			frame_rate: average_fps * frames_presented as f32,
			frames_presented,
		}
	}

	/// Factor to scale the motion blur time scale and target delta time of every view with, as motion blur must
	/// cover the time of one presented frame instead of one rendered frame.
	pub fn motion_blur_time_scale_correction(&self) -> f32 {
		if !self.is_frame_generation_active() {
			return 1.0;
		}
		let (time_scale, num_frames_to_generate) = {
			let settings = self.settings();
			(settings.motion_blur_time_scale(), FrameGenOptions::default().num_frames_to_generate)
		};
		let presented = match time_scale {
			MotionBlurTimeScale::Disabled => return 1.0,
			MotionBlurTimeScale::Enabled => 1 + num_frames_to_generate,
			MotionBlurTimeScale::LastPresented => self.status.lock().frames_presented(),
		};
		1.0 / presented as f32
	}
}
