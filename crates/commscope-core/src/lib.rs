//! Shared types and configuration for the commscope workspace.

pub mod app_config;
pub mod community;
pub mod config;
pub mod error;
pub mod platform;
pub mod record;
pub mod scaling;

pub use app_config::{AppConfig, Environment};
pub use community::CanonicalCommunity;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use platform::Platform;
pub use record::{RawRecord, RawValue};
pub use scaling::{load_scaling, parse_scaling, PlatformScaling};
