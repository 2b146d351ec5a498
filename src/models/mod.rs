pub mod config;

pub use config::{AppConfig, OutputConfig, QualityConfig, CONFIG_ENV};
