use crate::descriptor::NativeHandle;
use crate::engine::{DetailEnhancementOptions, FrameGenOptions, ViewportHandle};
use crate::pipeline::{CameraConstants, TagInputs};
use crate::view::Rect;
use std::collections::VecDeque;

/// Work recorded on the render thread, to be executed against the engine once the host's command list reaches it.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
	SetConstants {
		frame: u64,
		view: ViewportHandle,
		constants: CameraConstants,
	},
	TagTextures {
		view: ViewportHandle,
		inputs: TagInputs,
	},
	SetFrameGenOptions {
		view: ViewportHandle,
		options: FrameGenOptions,
	},
	SetDetailEnhancementOptions {
		view: ViewportHandle,
		options: DetailEnhancementOptions,
	},
	/// Tags `input_output` as [`ResourceRole::ScalingOutputColor`] and evaluates detail enhancement in place.
	///
	/// [`ResourceRole::ScalingOutputColor`]: crate::pipeline::ResourceRole::ScalingOutputColor
	EvaluateDetailEnhancement {
		frame: u64,
		view: ViewportHandle,
		input_output: NativeHandle,
		rect: Rect,
	},
	/// Frees the resources of all loaded features for a view that stopped rendering.
	ReleaseViewResources { view: ViewportHandle },
}

/// Ordered queue of [`RenderCommand`]s, drained front to back.
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
	commands: VecDeque<RenderCommand>,
}

impl CommandQueue {
	pub fn new() -> Self {
		Self::default()
	}

	#[inline]
	pub fn push(&mut self, command: RenderCommand) {
		self.commands.push_back(command);
	}

	pub fn len(&self) -> usize {
		self.commands.len()
	}

	pub fn is_empty(&self) -> bool {
		self.commands.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &RenderCommand> {
		self.commands.iter()
	}

	pub fn drain(&mut self) -> impl Iterator<Item = RenderCommand> + '_ {
		self.commands.drain(..)
	}
}
