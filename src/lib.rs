pub mod config;
pub mod engine;
pub mod key;
pub mod paths;
pub mod progress;
pub mod utils;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Result<T> = std::result::Result<T, Error>;
