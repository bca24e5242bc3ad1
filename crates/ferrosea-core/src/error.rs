use thiserror::Error;

use crate::http_client::HttpError;

/// Classification of a rejected request parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamErrorKind {
    /// The field holds a value of the wrong kind (e.g. a boolean where a timestamp is required).
    Type,
    /// The field holds a value of the right kind outside the allowed set or violating a
    /// cross-field rule.
    Value,
}

/// A single rejected request parameter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParamError {
    #[error("invalid {field} type: expected {expected}, got {actual} '{value}'")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
        actual: &'static str,
        value: String,
    },

    #[error("invalid {field} value '{value}': {reason}")]
    InvalidValue {
        field: &'static str,
        value: String,
        reason: String,
    },
}

impl ParamError {
    pub fn invalid_type(
        field: &'static str,
        expected: &'static str,
        actual: &'static str,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidType {
            field,
            expected,
            actual,
            value: value.into(),
        }
    }

    pub fn invalid_value(
        field: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub const fn kind(&self) -> ParamErrorKind {
        match self {
            Self::InvalidType { .. } => ParamErrorKind::Type,
            Self::InvalidValue { .. } => ParamErrorKind::Value,
        }
    }

    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidType { field, .. } | Self::InvalidValue { field, .. } => field,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::InvalidType { value, .. } | Self::InvalidValue { value, .. } => value,
        }
    }
}

/// Every parameter rejected while validating one query, in check order.
///
/// The first entry is the primary error; [`kind`](ValidationError::kind) and
/// [`field`](ValidationError::field) report on it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{}", describe(.errors))]
pub struct ValidationError {
    errors: Vec<ParamError>,
}

impl ValidationError {
    /// Build from a non-empty list of parameter errors.
    pub(crate) fn from_errors(errors: Vec<ParamError>) -> Self {
        debug_assert!(!errors.is_empty(), "validation error needs at least one cause");
        Self { errors }
    }

    pub fn primary(&self) -> Option<&ParamError> {
        self.errors.first()
    }

    pub fn kind(&self) -> ParamErrorKind {
        self.primary()
            .map_or(ParamErrorKind::Value, ParamError::kind)
    }

    pub fn field(&self) -> Option<&'static str> {
        self.primary().map(ParamError::field)
    }

    pub fn errors(&self) -> &[ParamError] {
        &self.errors
    }

    pub fn has_error_for(&self, field: &str) -> bool {
        self.errors.iter().any(|error| error.field() == field)
    }
}

impl From<ParamError> for ValidationError {
    fn from(value: ParamError) -> Self {
        Self::from_errors(vec![value])
    }
}

fn describe(errors: &[ParamError]) -> String {
    match errors {
        [] => String::from("invalid events query"),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
    }
}

/// Errors raised while loading client configuration from the environment.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a positive integer: '{value}'")]
    InvalidNumber { name: &'static str, value: String },

    #[error("{name} must be an http(s) URL: '{value}'")]
    InvalidUrl { name: &'static str, value: String },
}

/// Errors raised while issuing an events request or reading its response.
///
/// Transport and decoding failures are passed through unchanged.
#[derive(Debug, Error)]
pub enum EventsError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] HttpError),

    #[error("events upstream returned status {status}")]
    Status { status: u16, body: String },

    #[error(transparent)]
    Decode(#[from] serde_json::Error),

    #[error("events request was already issued for this query")]
    AlreadyRequested,

    #[error("events request has not been issued yet")]
    NotRequested,

    #[error("failed to start blocking runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_error_drives_kind_and_field() {
        let error = ValidationError::from_errors(vec![
            ParamError::invalid_type("auction_type", "text", "float", "0.0"),
            ParamError::invalid_value("event_type", "randomstr", "unknown event type"),
        ]);

        assert_eq!(error.kind(), ParamErrorKind::Type);
        assert_eq!(error.field(), Some("auction_type"));
        assert!(error.has_error_for("event_type"));
        assert_eq!(
            error.to_string(),
            "invalid auction_type type: expected text, got float '0.0' (and 1 more)"
        );
    }

    #[test]
    fn single_error_displays_without_suffix() {
        let error: ValidationError =
            ParamError::invalid_value("event_type", "randomstr", "unknown event type").into();

        assert_eq!(
            error.to_string(),
            "invalid event_type value 'randomstr': unknown event type"
        );
        assert_eq!(error.primary().map(ParamError::value), Some("randomstr"));
    }
}
