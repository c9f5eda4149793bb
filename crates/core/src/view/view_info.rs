use crate::descriptor::Texture;
use crate::view::Rect;
use glam::{IVec2, Mat4, Vec2, Vec3};

#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq)]
pub enum StereoPass {
	/// A regular, non-stereo view
	#[default]
	Full,
	Primary,
	Secondary,
}

/// Camera state of a view for the current frame, as computed by the host renderer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraInfo {
	pub view_to_clip: Mat4,
	pub clip_to_view: Mat4,
	pub clip_to_prev_clip: Mat4,
	/// Temporal AA jitter in pixels
	pub jitter_offset: Vec2,
	/// Horizontal field of view in degrees
	pub fov_degrees: f32,
	pub is_perspective: bool,
	pub origin: Vec3,
	pub up: Vec3,
	pub right: Vec3,
	pub forward: Vec3,
}

impl Default for CameraInfo {
	fn default() -> Self {
		Self {
			view_to_clip: Mat4::IDENTITY,
			clip_to_view: Mat4::IDENTITY,
			clip_to_prev_clip: Mat4::IDENTITY,
			jitter_offset: Vec2::ZERO,
			fov_degrees: 90.0,
			is_perspective: true,
			origin: Vec3::ZERO,
			up: Vec3::Z,
			right: Vec3::Y,
			forward: Vec3::X,
		}
	}
}

/// Why a view is not eligible for tracking and tagging.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum IneligibleReason {
	SceneCapture,
	OfflineRender,
	NotGameView,
	StereoSideView,
}

/// A render view as handed to us by the host renderer. Only lives for the duration of a single callback.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewInfo {
	/// Stable across frames for the same view
	pub view_key: u32,
	/// Index of this view within its view family
	pub family_index: usize,
	pub is_scene_capture: bool,
	pub is_offline_render: bool,
	pub is_game_view: bool,
	pub stereo_pass: StereoPass,
	/// The rect rendered into, possibly scaled down by dynamic resolution
	pub view_rect: Rect,
	pub unscaled_view_rect: Rect,
	pub unconstrained_view_rect: Rect,
	/// Output size after upscaling
	pub secondary_view_size: IVec2,
	/// The view family's render target, if any. Game views without an editor viewport render straight to the
	/// backbuffer and have none.
	pub render_target: Option<Texture>,
	pub camera: CameraInfo,
	/// The camera jumped, history must not be reused
	pub camera_cut: bool,
}

impl ViewInfo {
	pub fn ineligibility_reason(&self) -> Option<IneligibleReason> {
		if self.is_scene_capture {
			Some(IneligibleReason::SceneCapture)
		} else if self.is_offline_render {
			Some(IneligibleReason::OfflineRender)
		} else if !self.is_game_view {
			Some(IneligibleReason::NotGameView)
		} else if self.stereo_pass != StereoPass::Full {
			Some(IneligibleReason::StereoSideView)
		} else {
			None
		}
	}

	/// Only regular game views are tracked and tagged.
	#[inline]
	pub fn is_eligible(&self) -> bool {
		self.ineligibility_reason().is_none()
	}

	/// The upscaled output rect, starting at the origin.
	pub fn secondary_view_rect(&self) -> Rect {
		Rect::from_size(self.secondary_view_size)
	}
}
