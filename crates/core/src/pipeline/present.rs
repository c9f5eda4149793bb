use crate::context::{FrameGen, HostRenderer, WindowInfo};
use crate::descriptor::Texture;
use crate::pipeline::{CommandQueue, RenderCommand, ResourceRole, TagInput, TagInputs};
use crate::platform::GraphicsBackend;
use crate::view::Rect;
use tracing::trace;

impl<B: GraphicsBackend> FrameGen<B> {
	/// Present callback of `window`, right before `backbuffer` is presented. Claims all views that rendered into this
	/// window since its last present and tags the backbuffer and the extracted UI for each of them.
	pub fn on_backbuffer_ready_to_present(
		&self,
		renderer: &dyn HostRenderer,
		queue: &mut CommandQueue,
		window: &WindowInfo,
		backbuffer: &Texture,
	) {
		profiling::scope!("FrameGen::on_backbuffer_ready_to_present");
		if !window.kind.is_tagged() {
			return;
		}

		// the editor renders views into its viewport, which is then drawn into the window's backbuffer
		let claim_target = match &window.viewport_render_target {
			Some(target) if self.host.is_editor => target,
			_ => backbuffer,
		};
		let tag_index = self.settings().tag_view_index();
		let views = self
			.tracker
			.lock()
			.claim_views_for_backbuffer(claim_target.native, tag_index);
		if views.is_empty() || !self.should_tag_frame_generation() {
			trace!(claimed = views.len(), backbuffer = ?backbuffer.native, "Not tagging backbuffer");
			return;
		}

		let (tag_backbuffer, ui_threshold) = {
			let settings = self.settings();
			let ui_threshold = settings
				.tag_ui_color_alpha(self.host.is_editor)
				.then_some(settings.tag_ui_color_alpha_threshold);
			(settings.tag_backbuffer(), ui_threshold)
		};
		let ui_color_and_alpha =
			ui_threshold.map(|threshold| renderer.add_ui_hint_extraction_pass(threshold, backbuffer));

		for view in &views {
			let rect = view.unscaled_view_rect.offset(window.client_rect.min);
			let mut inputs = TagInputs::new();
			inputs.push(if tag_backbuffer {
				TagInput::texture(ResourceRole::Backbuffer, Some(backbuffer), rect)
			} else {
				TagInput::null(ResourceRole::Backbuffer, Rect::ZERO)
			});
			inputs.push(TagInput::texture(
				ResourceRole::UiColorAndAlpha,
				ui_color_and_alpha.as_ref(),
				rect,
			));
			queue.push(RenderCommand::TagTextures {
				view: self.viewport_handle_for_key(view.view_key),
				inputs,
			});
		}
	}
}
