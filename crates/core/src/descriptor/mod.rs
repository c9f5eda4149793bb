mod native_handle;
mod texture;

pub use native_handle::*;
pub use texture::*;
