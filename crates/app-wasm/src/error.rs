//! Error types for the browser entry point.

use sculpt_config::ConfigError;
use sculpting::SculptError;

/// Errors raised while setting up or driving the session.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Sculpt error: {0}")]
    Sculpt(#[from] SculptError),
}
