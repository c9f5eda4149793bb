mod api;
mod error;
mod feature;
mod log_sink;
mod options;
mod preferences;

pub use api::*;
pub use error::*;
pub use feature::*;
pub use log_sink::*;
pub use options::*;
pub use preferences::*;
