//! Shared error type across metricstore crates.

use thiserror::Error;

/// Stable error codes (safe to match on from host code and tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Label set larger than [`crate::MAX_LABELS`].
    LabelLimitExceeded,
    /// Malformed or out-of-range configuration.
    InvalidConfig,
    /// Unsupported config schema version.
    UnsupportedVersion,
    /// Config file could not be read.
    Io,
}

impl ErrorCode {
    /// String representation used in logs and assertions.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::LabelLimitExceeded => "LABEL_LIMIT_EXCEEDED",
            ErrorCode::InvalidConfig => "INVALID_CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Io => "IO",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Unified error type used by core and registry.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("label count exceeded: got {count}, max is {max}")]
    LabelLimitExceeded { count: usize, max: usize },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("unsupported config version: {0}")]
    UnsupportedVersion(u32),
    #[error("io: {0}")]
    Io(String),
}

impl MetricsError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            MetricsError::LabelLimitExceeded { .. } => ErrorCode::LabelLimitExceeded,
            MetricsError::InvalidConfig(_) => ErrorCode::InvalidConfig,
            MetricsError::UnsupportedVersion(_) => ErrorCode::UnsupportedVersion,
            MetricsError::Io(_) => ErrorCode::Io,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        let e = MetricsError::LabelLimitExceeded { count: 11, max: 10 };
        assert_eq!(e.code().as_str(), "LABEL_LIMIT_EXCEEDED");
        assert_eq!(e.to_string(), "label count exceeded: got 11, max is 10");
        assert_eq!(MetricsError::UnsupportedVersion(2).code(), ErrorCode::UnsupportedVersion);
    }
}
