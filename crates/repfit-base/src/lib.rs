pub mod logging;
pub mod vec2;

pub use logging::{StdoutLogger, init_stdout_logger};
pub use vec2::Vec2;

// Re-export log so downstream crates can use repfit_base::log::*
pub use log;
