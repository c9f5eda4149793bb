//! The [`FrameGen`] context tying the engine, the graphics backend and all per-frame state together. Host hooks
//! are methods on it, spread over the modules they concern.

mod capability;
mod frame_gen;
mod host;
mod status;
mod swapchain;

pub use capability::*;
pub use frame_gen::*;
pub use host::*;
pub use status::*;
