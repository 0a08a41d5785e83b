pub mod app;
pub mod config;
pub mod format;
pub mod logging;
pub mod metric;
pub mod sampler;
pub mod store;
pub mod system;
