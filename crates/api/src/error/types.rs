//! Error type definitions for configuration and replay

/// Primary error type for keyscan operations
///
/// Only environmental problems are represented here. A broken curve-arithmetic
/// contract (for example mixed addition with a projective second operand) is a
/// bug and panics instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A required configuration field was never supplied
    #[error("missing value for {field}")]
    MissingParameter { field: &'static str },

    /// A parameter was supplied but could not be used
    #[error("{context}: {message}")]
    InvalidParameter {
        context: &'static str,
        message: String,
    },

    /// The curve's byte size does not fit the fixed window capacity
    #[error("key size of {actual} bytes exceeds the supported maximum of {max} bytes")]
    KeyTooLarge { actual: usize, max: usize },

    /// Malformed configuration document or tap index
    #[error("serialization error: {context}: {message}")]
    SerializationError {
        context: &'static str,
        message: String,
    },

    /// Reading a configuration or dump file, or writing a report, failed
    #[error("{context}: {message}")]
    Io {
        context: &'static str,
        message: String,
    },
}

/// Result type for keyscan operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Shorthand to create an InvalidParameter error
    pub fn param(context: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            context,
            message: message.into(),
        }
    }

    /// Shorthand to create a SerializationError
    pub fn serialization(context: &'static str, message: impl Into<String>) -> Self {
        Self::SerializationError {
            context,
            message: message.into(),
        }
    }

    /// Replace the context of an existing error, keeping its details
    pub fn with_context(self, context: &'static str) -> Self {
        match self {
            Self::InvalidParameter { message, .. } => Self::InvalidParameter { context, message },
            Self::SerializationError { message, .. } => {
                Self::SerializationError { context, message }
            }
            Self::Io { message, .. } => Self::Io { context, message },
            other @ (Self::MissingParameter { .. } | Self::KeyTooLarge { .. }) => other,
        }
    }
}
