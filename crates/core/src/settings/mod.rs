mod command_line;
mod config;

pub use command_line::*;
pub use config::*;
