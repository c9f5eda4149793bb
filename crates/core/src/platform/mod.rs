mod backend;
pub mod d3d11;
pub mod d3d12;

pub use backend::*;
