pub mod constants;
pub mod error;
pub mod logging;
pub mod render;
pub mod settings;
