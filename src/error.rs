//! Application-level errors.

use pharmpick_ui::DropdownError;

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Dropdown(#[from] DropdownError),
}
