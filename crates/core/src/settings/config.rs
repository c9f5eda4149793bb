use crate::engine::{DetailEnhancementMode, FrameGenMode, mode_from_raw};
use crate::settings::CommandLine;
use num_derive::{FromPrimitive, ToPrimitive};
use tracing::error;

#[repr(i32)]
#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq, FromPrimitive, ToPrimitive)]
pub enum PlayInEditorOverride {
	#[default]
	UseProjectSettings,
	Enabled,
	Disabled,
}

#[repr(i32)]
#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq, FromPrimitive, ToPrimitive)]
pub enum MotionBlurTimeScale {
	Disabled = 0,
	/// Assume every generated frame is presented
	Enabled = 1,
	/// Use the number of frames actually presented last frame, which also covers [`FrameGenMode::Auto`]
	#[default]
	LastPresented = 2,
}

/// Runtime configuration. Fields hold raw values as the host sets them, the accessors validate and clamp.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
	/// 0 off, 1 on, 2 auto
	pub frame_gen_mode: i32,
	/// 0 off, 1 on
	pub detail_enhancement_mode: i32,
	pub detail_enhancement_intensity: f32,
	pub detail_enhancement_saturation_boost: f32,
	/// Only views with this index in their view family are tagged, -1 for all views.
	pub view_index_to_tag: i32,
	/// -1 auto, 0 use the view key as view id, 1 always use view id 0
	pub view_id_override: i32,
	/// -1 auto (1), 0 unlimited
	pub max_num_swapchain_proxies: i32,
	pub tag_scene_color_without_hud: bool,
	pub editor_tag_scene_color_without_hud: bool,
	pub tag_ui_color_alpha: bool,
	pub editor_tag_ui_color_alpha: bool,
	pub tag_ui_color_alpha_threshold: f32,
	pub tag_backbuffer: bool,
	pub force_tagging: bool,
	pub dilate_motion_vectors: bool,
	pub motion_vector_scale: f32,
	pub camera_near_plane: f32,
	pub camera_far_plane: f32,
	pub check_status_per_frame: bool,
	pub full_screen_menu_detection: bool,
	pub dynamic_resolution: bool,
	pub clear_color_alpha: bool,
	pub adjust_motion_blur_time_scale: i32,
	pub log_tracked_views: bool,
	pub max_frames_in_flight: u64,
	/// Return engine call failures from [`FrameGen::execute`] instead of only logging them.
	///
	/// [`FrameGen::execute`]: crate::context::FrameGen::execute
	pub assert_on_engine_errors: bool,
	pub play_in_editor_override: PlayInEditorOverride,
	/// Project setting consulted when [`Self::play_in_editor_override`] is [`PlayInEditorOverride::UseProjectSettings`]
	pub enable_in_play_in_editor: bool,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			frame_gen_mode: 0,
			detail_enhancement_mode: 0,
			detail_enhancement_intensity: 0.5,
			detail_enhancement_saturation_boost: 0.5,
			view_index_to_tag: -1,
			view_id_override: -1,
			max_num_swapchain_proxies: -1,
			tag_scene_color_without_hud: true,
			editor_tag_scene_color_without_hud: true,
			tag_ui_color_alpha: true,
			editor_tag_ui_color_alpha: false,
			tag_ui_color_alpha_threshold: 0.0,
			tag_backbuffer: true,
			force_tagging: false,
			dilate_motion_vectors: false,
			motion_vector_scale: 1.0,
			camera_near_plane: 0.01,
			camera_far_plane: 75000.0,
			check_status_per_frame: true,
			full_screen_menu_detection: false,
			dynamic_resolution: false,
			clear_color_alpha: true,
			adjust_motion_blur_time_scale: MotionBlurTimeScale::LastPresented as i32,
			log_tracked_views: false,
			max_frames_in_flight: 5,
			assert_on_engine_errors: false,
			play_in_editor_override: PlayInEditorOverride::UseProjectSettings,
			enable_in_play_in_editor: false,
		}
	}
}

fn clamp_unit(value: f32, default: f32) -> f32 {
	if value.is_nan() { default } else { value.clamp(0.0, 1.0) }
}

impl Settings {
	/// Applies the command line switches that override settings.
	pub fn apply_command_line(&mut self, cmd: &CommandLine) {
		if cmd.has_param("slforcetagging") {
			self.force_tagging = true;
		}
		if let Some(log) = cmd.switch("logviewtracking") {
			self.log_tracked_views = log;
		}
	}

	pub fn frame_gen_mode(&self) -> FrameGenMode {
		mode_from_raw(self.frame_gen_mode).unwrap_or_else(|_| {
			error!("Invalid frame generation mode {}", self.frame_gen_mode);
			FrameGenMode::Off
		})
	}

	pub fn detail_enhancement_mode(&self) -> DetailEnhancementMode {
		mode_from_raw(self.detail_enhancement_mode).unwrap_or_else(|_| {
			error!("Invalid detail enhancement mode {}", self.detail_enhancement_mode);
			DetailEnhancementMode::Off
		})
	}

	pub fn detail_enhancement_intensity(&self) -> f32 {
		clamp_unit(self.detail_enhancement_intensity, 0.5)
	}

	pub fn detail_enhancement_saturation_boost(&self) -> f32 {
		clamp_unit(self.detail_enhancement_saturation_boost, 0.5)
	}

	/// The index within its view family a view must have to be tagged, `None` to tag all views.
	pub fn tag_view_index(&self) -> Option<usize> {
		usize::try_from(self.view_index_to_tag).ok()
	}

	/// Whether every view is submitted as view id 0 instead of its view key.
	pub fn view_id_override_active(&self) -> bool {
		match self.view_id_override {
			-1 => self.view_index_to_tag != -1,
			value => value == 1,
		}
	}

	/// Effective maximum of swapchain proxies, `None` if unlimited.
	pub fn max_swapchain_proxies(&self) -> Option<u32> {
		match self.max_num_swapchain_proxies {
			-1 => Some(1),
			0 => None,
			max => Some(max.max(0) as u32),
		}
	}

	pub fn tag_scene_color_without_hud(&self, is_editor: bool) -> bool {
		self.force_tagging
			|| if is_editor {
				self.editor_tag_scene_color_without_hud
			} else {
				self.tag_scene_color_without_hud
			}
	}

	pub fn tag_ui_color_alpha(&self, is_editor: bool) -> bool {
		self.force_tagging
			|| if is_editor {
				self.editor_tag_ui_color_alpha
			} else {
				self.tag_ui_color_alpha
			}
	}

	pub fn tag_backbuffer(&self) -> bool {
		self.force_tagging || self.tag_backbuffer
	}

	pub fn motion_blur_time_scale(&self) -> MotionBlurTimeScale {
		num_traits::FromPrimitive::from_i32(self.adjust_motion_blur_time_scale).unwrap_or(MotionBlurTimeScale::Disabled)
	}

	/// Whether tagging and frame generation is allowed while playing in the editor.
	pub fn enabled_in_play_in_editor(&self) -> bool {
		match self.play_in_editor_override {
			PlayInEditorOverride::UseProjectSettings => self.enable_in_play_in_editor,
			PlayInEditorOverride::Enabled => true,
			PlayInEditorOverride::Disabled => false,
		}
	}
}
