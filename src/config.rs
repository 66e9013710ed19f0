//! configuration stuff
pub mod options;
pub mod validate;

pub use options::{ApiConfig, HttpConfig, LoggingConfig, LoggingFormat, PanicRs};
