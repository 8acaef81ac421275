//! pharmpick - Selector overlay host for the pharmacy inventory front-end
//!
//! Wires the `pharmpick_ui` engine into an application: versioned JSON
//! configuration, logger setup and a scripted headless session that shows the
//! pickers working together.

pub mod config;
pub mod demo;
pub mod error;

#[cfg(not(target_arch = "wasm32"))]
pub mod logging;

pub use config::{AppConfig, ConfigError, DropdownSettings, LogLevel, UserPreferences};
pub use demo::{FormMessage, PharmacyForm};
pub use error::AppError;
