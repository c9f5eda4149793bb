use crate::context::FrameGen;
use crate::engine::{EngineError, Feature, ViewportHandle};
use crate::pipeline::{CommandQueue, RenderCommand, ResourceRole, TagError, TagInput};
use crate::platform::GraphicsBackend;
use thiserror::Error;
use tracing::error;

#[derive(Error)]
#[non_exhaustive]
pub enum ExecuteError {
	#[error("Engine call {call} for {view} failed: {source}")]
	Engine {
		call: &'static str,
		view: ViewportHandle,
		#[source]
		source: EngineError,
	},
	#[error(transparent)]
	Tag(#[from] TagError),
}

impl core::fmt::Debug for ExecuteError {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		core::fmt::Display::fmt(self, f)
	}
}

fn engine_error(call: &'static str, view: ViewportHandle) -> impl FnOnce(EngineError) -> ExecuteError {
	move |source| ExecuteError::Engine { call, view, source }
}

impl<B: GraphicsBackend> FrameGen<B> {
	/// Executes all recorded commands against the engine in recording order, leaving `queue` empty.
	///
	/// A failing command does not stop later ones from executing. Failures are logged and only returned if
	/// [`Settings::assert_on_engine_errors`] is set, in which case the first one is returned.
	///
	/// [`Settings::assert_on_engine_errors`]: crate::settings::Settings::assert_on_engine_errors
	pub fn execute(&self, queue: &mut CommandQueue) -> Result<(), ExecuteError> {
		profiling::scope!("FrameGen::execute");
		let assert_on_engine_errors = self.settings().assert_on_engine_errors;
		let mut first_error = None;
		for command in queue.drain() {
			if let Err(e) = self.execute_command(command) {
				error!("{}", e);
				first_error.get_or_insert(e);
			}
		}
		match first_error {
			Some(e) if assert_on_engine_errors => Err(e),
			_ => Ok(()),
		}
	}

	fn execute_command(&self, command: RenderCommand) -> Result<(), ExecuteError> {
		let engine = &*self.engine;
		match command {
			RenderCommand::SetConstants { frame, view, constants } => {
				let token = self
					.tokens
					.token_for_frame(engine, frame)
					.map_err(engine_error("new_frame_token", view))?;
				engine
					.set_constants(&constants, &token, view)
					.map_err(engine_error("set_constants", view))
			}
			RenderCommand::TagTextures { view, inputs } => Ok(self.backend.tag_textures(engine, view, &inputs)?),
			RenderCommand::SetFrameGenOptions { view, options } => engine
				.set_frame_gen_options(view, &options)
				.map_err(engine_error("set_frame_gen_options", view)),
			RenderCommand::SetDetailEnhancementOptions { view, options } => engine
				.set_detail_enhancement_options(view, &options)
				.map_err(engine_error("set_detail_enhancement_options", view)),
			RenderCommand::EvaluateDetailEnhancement {
				frame,
				view,
				input_output,
				rect,
			} => {
				let token = self
					.tokens
					.token_for_frame(engine, frame)
					.map_err(engine_error("new_frame_token", view))?;
				self.backend.tag_textures(
					engine,
					view,
					&[TagInput::new(ResourceRole::ScalingOutputColor, input_output, rect)],
				)?;
				let cmd = self.backend.command_buffer(input_output);
				let result = engine.evaluate_feature(Feature::DetailEnhancement, &token, view, cmd);
				self.backend.post_evaluation_barrier(input_output);
				result.map_err(engine_error("evaluate_feature", view))
			}
			RenderCommand::ReleaseViewResources { view } => self
				.release_resources_for_all_features(view)
				.map_err(engine_error("free_resources", view)),
		}
	}
}
