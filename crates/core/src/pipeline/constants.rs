use crate::settings::Settings;
use crate::view::ViewInfo;
use glam::{Mat4, Vec2, Vec3};

/// Per view, per frame camera constants the engine needs to reproject.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraConstants {
	pub camera_view_to_clip: Mat4,
	pub clip_to_camera_view: Mat4,
	pub clip_to_lens_clip: Mat4,
	pub clip_to_prev_clip: Mat4,
	pub prev_clip_to_clip: Mat4,
	pub jitter_offset: Vec2,
	/// Scales motion vectors into normalized `[-1, 1]` screen space
	pub motion_vector_scale: Vec2,
	pub camera_pinhole_offset: Vec2,
	pub camera_pos: Vec3,
	pub camera_up: Vec3,
	pub camera_right: Vec3,
	pub camera_forward: Vec3,
	pub camera_near: f32,
	pub camera_far: f32,
	/// In radians
	pub camera_fov: f32,
	pub camera_aspect_ratio: f32,
	pub depth_inverted: bool,
	pub camera_motion_included: bool,
	pub motion_vectors_3d: bool,
	/// History must be discarded, e.g. after a camera cut
	pub reset: bool,
	pub orthographic_projection: bool,
	pub motion_vectors_dilated: bool,
}

impl CameraConstants {
	pub fn from_view(view: &ViewInfo, settings: &Settings) -> Self {
		let camera = &view.camera;
		let dilated = settings.dilate_motion_vectors;
		let scale_size = if dilated {
			view.secondary_view_size
		} else {
			view.view_rect.size()
		};
		// zero sized views are never tagged, but don't produce infinities either way
		let scale_size = scale_size.max(glam::IVec2::ONE).as_vec2();
		let view_size = view.view_rect.size().max(glam::IVec2::ONE).as_vec2();

		Self {
			camera_view_to_clip: camera.view_to_clip,
			clip_to_camera_view: camera.clip_to_view,
			clip_to_lens_clip: Mat4::IDENTITY,
			clip_to_prev_clip: camera.clip_to_prev_clip,
			prev_clip_to_clip: camera.clip_to_prev_clip.inverse(),
			jitter_offset: camera.jitter_offset,
			motion_vector_scale: Vec2::splat(settings.motion_vector_scale) / scale_size,
			camera_pinhole_offset: Vec2::ZERO,
			camera_pos: camera.origin,
			camera_up: camera.up,
			camera_right: camera.right,
			camera_forward: camera.forward,
			camera_near: settings.camera_near_plane,
			camera_far: settings.camera_far_plane,
			camera_fov: camera.fov_degrees.to_radians(),
			camera_aspect_ratio: view_size.x / view_size.y,
			depth_inverted: true,
			camera_motion_included: true,
			motion_vectors_3d: false,
			reset: view.camera_cut,
			orthographic_projection: !camera.is_perspective,
			motion_vectors_dilated: dilated,
		}
	}
}
