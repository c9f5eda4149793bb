use crate::context::{FrameGen, HostRenderer, PostProcessInputs, ScreenPassTexture};
use crate::descriptor::TextureUsage;
use crate::engine::{
	DetailEnhancementOptions, Feature, FrameGenFlags, FrameGenMode, FrameGenOptions, ViewportHandle,
};
use crate::pipeline::{CameraConstants, CommandQueue, RenderCommand, ResourceRole, TagInput, TagInputs};
use crate::platform::GraphicsBackend;
use crate::view::{Rect, ViewInfo};
use glam::IVec2;
use tracing::{debug, trace};

impl<B: GraphicsBackend> FrameGen<B> {
	/// Releases the engine resources of views that have not been tagged for more than
	/// [`Settings::max_frames_in_flight`] frames. Call once per view family before rendering it.
	///
	/// [`Settings::max_frames_in_flight`]: crate::settings::Settings::max_frames_in_flight
	pub fn begin_frame(&self, queue: &mut CommandQueue, frame: u64) {
		let max_frames_in_flight = self.settings().max_frames_in_flight;
		let stale = self.ledger.lock().collect_stale(frame, max_frames_in_flight);
		for view_key in stale {
			debug!(view_key, frame, "Releasing resources of stale view");
			queue.push(RenderCommand::ReleaseViewResources {
				view: ViewportHandle(view_key),
			});
		}
	}

	/// The id `view` is known to the engine by.
	pub fn viewport_handle(&self, view: &ViewInfo) -> ViewportHandle {
		self.viewport_handle_for_key(view.view_key)
	}

	pub(crate) fn viewport_handle_for_key(&self, view_key: u32) -> ViewportHandle {
		if self.settings().view_id_override_active() {
			ViewportHandle(0)
		} else {
			ViewportHandle(view_key)
		}
	}

	/// Post-processing injection point of `view`, after tonemapping but before the UI is composited. Records the
	/// tagging work for this view into `queue` and returns the texture post-processing should continue with.
	///
	/// A view is tagged at most once per frame, later calls for the same view and `frame` pass scene color through.
	pub fn post_process(
		&self,
		renderer: &dyn HostRenderer,
		queue: &mut CommandQueue,
		frame: u64,
		view: &ViewInfo,
		inputs: &PostProcessInputs,
	) -> ScreenPassTexture {
		profiling::scope!("FrameGen::post_process");
		{
			let mut tracker = self.tracker.lock();
			tracker.set_log_tracked_views(self.settings().log_tracked_views);
			tracker.add_tracked_view(view);
		}

		let tag_this_view = self
			.settings()
			.tag_view_index()
			.map_or(true, |index| index == view.family_index);
		let mut ledger = self.ledger.lock();
		if ledger.contains(frame, view.view_key) || !tag_this_view || !view.is_eligible() {
			trace!(view_key = view.view_key, frame, tag_this_view, "Not tagging view");
			return forward_scene_color(renderer, inputs);
		}
		ledger.record(frame, view.view_key);
		drop(ledger);

		let viewport = self.viewport_handle(view);
		let scene_color = &inputs.scene_color;
		let secondary_view_rect = view.secondary_view_rect();
		let should_tag = self.should_tag_frame_generation();

		if should_tag {
			let settings = self.settings().clone();
			queue.push(RenderCommand::SetConstants {
				frame,
				view: viewport,
				constants: CameraConstants::from_view(view, &settings),
			});

			let color_without_ui = settings.tag_scene_color_without_hud(self.host.is_editor).then(|| {
				let copy = renderer.create_texture(
					scene_color
						.texture
						.desc
						.uav_compatible("FrameGen.SceneColorWithoutHUD"),
				);
				renderer.add_copy_pass(&scene_color.texture, &copy);
				copy
			});
			let motion_vectors = renderer.add_velocity_combine_pass(
				&inputs.scene_depth,
				inputs.velocity.as_ref(),
				settings.dilate_motion_vectors,
			);

			let mut tags = TagInputs::new();
			tags.push(TagInput::texture(ResourceRole::Depth, Some(&inputs.scene_depth), view.view_rect));
			tags.push(TagInput::texture(
				ResourceRole::MotionVectors,
				Some(&motion_vectors),
				Rect::from(motion_vectors.extent()),
			));
			tags.push(TagInput::texture(
				ResourceRole::ColorWithoutUi,
				color_without_ui.as_ref(),
				scene_color.view_rect,
			));
			queue.push(RenderCommand::TagTextures { view: viewport, inputs: tags });
		}

		// recorded even when not tagging, so the engine turns frame generation off
		if self.is_feature_supported(Feature::FrameGeneration) {
			queue.push(RenderCommand::SetFrameGenOptions {
				view: viewport,
				options: self.frame_gen_options(renderer.is_foreground(), secondary_view_rect),
			});
		}

		if self.is_detail_enhancement_active() {
			self.record_detail_enhancement(renderer, queue, frame, viewport, scene_color);
		}

		if should_tag && self.settings().clear_color_alpha {
			renderer.add_clear_alpha_pass(&scene_color.texture, secondary_view_rect);
		}

		forward_scene_color(renderer, inputs)
	}

	/// Frame generation is turned off for views in the background or too small for it.
	fn frame_gen_options(&self, is_foreground: bool, secondary_view_rect: Rect) -> FrameGenOptions {
		let min_width_or_height = self.frame_gen_min_width_or_height();
		let settings = self.settings();
		let size = secondary_view_rect.size().max(IVec2::ZERO).as_uvec2();
		let large_enough = size.min_element() >= min_width_or_height;
		let mode = if is_foreground && large_enough {
			settings.frame_gen_mode()
		} else {
			FrameGenMode::Off
		};

		let mut flags = FrameGenFlags::empty();
		flags.set(FrameGenFlags::FULLSCREEN_MENU_DETECTION, settings.full_screen_menu_detection);
		flags.set(FrameGenFlags::DYNAMIC_RESOLUTION, settings.dynamic_resolution);
		FrameGenOptions {
			mode,
			flags,
			..FrameGenOptions::default()
		}
	}

	fn record_detail_enhancement(
		&self,
		renderer: &dyn HostRenderer,
		queue: &mut CommandQueue,
		frame: u64,
		viewport: ViewportHandle,
		scene_color: &ScreenPassTexture,
	) {
		let options = {
			let settings = self.settings();
			DetailEnhancementOptions {
				mode: settings.detail_enhancement_mode(),
				intensity: settings.detail_enhancement_intensity(),
				saturation_boost: settings.detail_enhancement_saturation_boost(),
			}
		};
		queue.push(RenderCommand::SetDetailEnhancementOptions {
			view: viewport,
			options,
		});

		// the engine accesses its input and output as an unordered access view
		let intermediate = (!scene_color.texture.has_usage(TextureUsage::UNORDERED_ACCESS)).then(|| {
			let intermediate = renderer.create_texture(
				scene_color
					.texture
					.desc
					.uav_compatible("FrameGen.SceneColorWithoutHUD.DetailEnhancement"),
			);
			renderer.add_copy_pass(&scene_color.texture, &intermediate);
			intermediate
		});
		let input_output = intermediate.as_ref().unwrap_or(&scene_color.texture);
		queue.push(RenderCommand::EvaluateDetailEnhancement {
			frame,
			view: viewport,
			input_output: input_output.native,
			rect: scene_color.view_rect,
		});
		if let Some(intermediate) = &intermediate {
			renderer.add_copy_pass(intermediate, &scene_color.texture);
		}
	}
}

/// Post-processing continues with the override output if there is one, which then needs scene color copied into it.
fn forward_scene_color(renderer: &dyn HostRenderer, inputs: &PostProcessInputs) -> ScreenPassTexture {
	match &inputs.override_output {
		Some(output) => {
			renderer.add_copy_pass(&inputs.scene_color.texture, &output.texture);
			output.clone()
		}
		None => inputs.scene_color.clone(),
	}
}
