use thiserror::Error;

use ferrosea_core::{ConfigError, EventsError, ParamError, ValidationError};

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Param(#[from] ParamError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Events(#[from] EventsError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Param(_) | Self::Validation(_) | Self::Config(_) => 2,
            Self::Events(error) => match error {
                EventsError::Validation(_) => 2,
                EventsError::Decode(_) => 4,
                _ => 3,
            },
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}
