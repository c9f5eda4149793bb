use crate::engine::{EngineResult, FrameGenEngine};
use parking_lot::Mutex;

/// Engine-issued token identifying a frame. All engine calls for the same frame must use the same token.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub struct FrameToken {
	/// The frame counter, truncated to the 32 bits the engine stores
	pub frame_index: u32,
	pub handle: u64,
}

/// Hands out one [`FrameToken`] per frame counter value, minting a new one whenever the frame counter changes.
#[derive(Debug, Default)]
pub struct FrameTokenProvider {
	last: Mutex<Option<FrameToken>>,
}

impl FrameTokenProvider {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn token_for_frame(&self, engine: &dyn FrameGenEngine, frame_counter: u64) -> EngineResult<FrameToken> {
		let frame_index = frame_counter as u32;
		let mut last = self.last.lock();
		if let Some(token) = *last {
			if token.frame_index == frame_index {
				return Ok(token);
			}
		}

		// minting multiple tokens for the same frame is fine, the engine only looks at the index
		let token = FrameToken {
			frame_index,
			handle: engine.new_frame_token(frame_index)?,
		};
		*last = Some(token);
		Ok(token)
	}
}
