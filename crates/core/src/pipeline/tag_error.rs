use crate::engine::{EngineError, ViewportHandle};
use thiserror::Error;

#[derive(Error)]
#[non_exhaustive]
pub enum TagError {
	#[error("Tagging resources of {view} failed: {source}")]
	Engine {
		view: ViewportHandle,
		#[source]
		source: EngineError,
	},
	/// All resources of one tag call must live on the same GPU, since they are tagged on a single command list.
	#[error("Tagged resources of {view} are on different devices, {first} and {other}")]
	MixedDeviceIndices { view: ViewportHandle, first: u32, other: u32 },
}

impl core::fmt::Debug for TagError {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		core::fmt::Display::fmt(self, f)
	}
}
