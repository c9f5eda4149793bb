mod backend;
mod resource_state;

pub use backend::*;
pub use resource_state::*;
