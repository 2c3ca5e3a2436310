//! Configuration management for Gradient Fader
//!
//! - **settings**: AppConfig read from JSON in the platform config dir

pub mod settings;

pub use settings::AppConfig;
