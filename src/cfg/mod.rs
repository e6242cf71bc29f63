pub mod config;
pub mod error;

pub use config::ConfigSpec;
pub use error::ConfigResult;
