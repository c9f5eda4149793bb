pub mod backing;
pub mod context;
pub mod descriptor;
pub mod engine;
pub mod pipeline;
pub mod platform;
pub mod settings;
pub mod view;

#[cfg(test)]
pub(crate) mod test_utils;
