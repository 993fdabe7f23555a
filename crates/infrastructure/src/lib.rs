//! Infrastructure layer - Adapters for external systems
//!
//! Implements the application's source gateway port on top of
//! OpenWeatherMap and provides configuration loading and logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, ConfigError, LogFormat, LoggingConfig, OpenWeatherMapConfig};
pub use telemetry::{TelemetryError, init_logging};
