//! FlixDesk Core Library
//!
//! This crate provides shared types, errors, configuration and the settings
//! store for FlixDesk.

pub mod config;
pub mod error;
pub mod settings;
pub mod types;

pub use config::ShellConfig;
pub use error::{ShellError, ShellResult};
pub use settings::{AccelerationSetting, AccelerationToggle, JsonSettingsStore, SettingsStore};
