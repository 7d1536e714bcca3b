use thiserror::Error;

pub mod codes;

pub use codes::{describe_error_code, ErrorCode};

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// The unified error type for the shiftrank library
#[derive(Error, Debug)]
pub enum RankError {
    /// A page fetch returned a non-success HTTP status
    #[error("[E{code:04}] Request to {locator} failed with status {status}")]
    Transport {
        code: u16,
        locator: String,
        status: u16,
    },

    /// The request never produced a response (connection refused, timeout, ...)
    #[error("[E{code:04}] Request to {locator} failed: {message}")]
    Request {
        code: u16,
        locator: String,
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Malformed JSON or missing expected fields
    #[error("[E{code:04}] Unexpected response shape from {locator}: {message}")]
    UnexpectedResponseShape {
        code: u16,
        locator: String,
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("[E{code:04}] Configuration error: {message}")]
    Config {
        code: u16,
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },
}

impl RankError {
    /// Create a transport error for a non-success status
    pub fn transport(locator: impl Into<String>, status: u16) -> Self {
        Self::Transport {
            code: ErrorCode::TRANSPORT_STATUS,
            locator: locator.into(),
            status,
        }
    }

    /// Create a request error with specific code
    pub fn request_with_code(
        code: u16,
        locator: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Request {
            code,
            locator: locator.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a request error with default code
    pub fn request(locator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::request_with_code(ErrorCode::TRANSPORT_REQUEST_FAILED, locator, message)
    }

    /// Create a response shape error with default code
    pub fn unexpected_shape(locator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::unexpected_shape_with_code(ErrorCode::RESPONSE_SHAPE, locator, message)
    }

    /// Create a response shape error with specific code
    pub fn unexpected_shape_with_code(
        code: u16,
        locator: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::UnexpectedResponseShape {
            code,
            locator: locator.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with default code
    pub fn config(message: impl Into<String>) -> Self {
        Self::config_with_code(ErrorCode::CONFIG_GENERIC, message)
    }

    /// Create a configuration error with specific code
    pub fn config_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error to this error
    ///
    /// `Transport` has no source slot and is returned unchanged.
    pub fn with_source(mut self, source: impl Into<BoxedSource>) -> Self {
        match &mut self {
            Self::Request { source: src, .. }
            | Self::UnexpectedResponseShape { source: src, .. }
            | Self::Config { source: src, .. } => {
                *src = Some(source.into());
            }
            Self::Transport { .. } => {}
        }
        self
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::Transport { code, .. }
            | Self::Request { code, .. }
            | Self::UnexpectedResponseShape { code, .. }
            | Self::Config { code, .. } => *code,
        }
    }

    /// True for failures that happened while talking to the upstream API
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Request { .. })
    }

    /// Get a developer-friendly error message with the error code description
    pub fn developer_message(&self) -> String {
        format!("{} ({})", self, describe_error_code(self.code()))
    }
}

/// Type alias for Results using RankError
pub type Result<T> = std::result::Result<T, RankError>;

impl From<toml::de::Error> for RankError {
    fn from(err: toml::de::Error) -> Self {
        RankError::config_with_code(ErrorCode::CONFIG_PARSE_ERROR, "Invalid TOML syntax")
            .with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_rank_error_construction() {
        let err = RankError::transport("http://localhost:3000/workers", 503);
        assert!(matches!(err, RankError::Transport { status: 503, .. }));
        assert_eq!(err.code(), ErrorCode::TRANSPORT_STATUS);
        assert!(err.is_transport());

        let err = RankError::request("http://localhost:3000/workers", "connection failed");
        assert_eq!(err.code(), ErrorCode::TRANSPORT_REQUEST_FAILED);
        assert!(err.is_transport());

        let err = RankError::unexpected_shape("http://localhost:3000/shifts", "missing field");
        assert_eq!(err.code(), ErrorCode::RESPONSE_SHAPE);
        assert!(!err.is_transport());

        let err = RankError::config("bad value");
        assert_eq!(err.code(), ErrorCode::CONFIG_GENERIC);
        assert!(!err.is_transport());
    }

    #[test]
    fn test_display_includes_code_and_status() {
        let err = RankError::transport("http://localhost:3000/workers", 500);
        assert_eq!(
            err.to_string(),
            "[E2000] Request to http://localhost:3000/workers failed with status 500"
        );
    }

    #[test]
    fn test_with_source_preserves_cause() {
        let cause = serde_json::from_str::<u32>("not json").unwrap_err();
        let err = RankError::unexpected_shape("http://x/shifts", "bad page").with_source(cause);
        assert!(err.source().is_some());

        let err = RankError::transport("http://x/shifts", 404).with_source("ignored");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_developer_message() {
        let err = RankError::config_with_code(ErrorCode::CONFIG_INVALID_VALUE, "top_n must be >= 1");
        assert!(err
            .developer_message()
            .contains("Invalid value in configuration"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Table>("= nope").unwrap_err();
        let err: RankError = toml_err.into();
        assert_eq!(err.code(), ErrorCode::CONFIG_PARSE_ERROR);
        assert!(err.source().is_some());
    }
}
