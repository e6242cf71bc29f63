pub mod app;
pub mod cfg;
pub mod cli;
pub mod ports;

pub use cfg::ConfigSpec;
pub use cli::{Completion, CompletionGenerator, CompletionType};
pub use ports::{FileSystem, MemFs, RealFs};
