mod rect;
mod tracker;
mod view_info;

pub use rect::*;
pub use tracker::*;
pub use view_info::*;
