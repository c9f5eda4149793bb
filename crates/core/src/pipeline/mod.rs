//! Recording the per-frame tagging work on the render thread and executing it against the engine.

mod command;
mod constants;
mod execute;
mod present;
mod resource_role;
mod resource_tag;
mod tag_error;
mod tagging;

pub use command::*;
pub use constants::*;
pub use execute::*;
pub use resource_role::*;
pub use resource_tag::*;
pub use tag_error::*;
