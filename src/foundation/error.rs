/// Convenience result type used across wiremorph.
pub type WireResult<T> = Result<T, WireError>;

/// Top-level error taxonomy used by pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum WireError {
    /// An operation was invoked before its required predecessor stage.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Geometry the projection pipeline cannot work with (singular matrices).
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Matrix operands with incompatible shapes.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// A state that correct code can never reach.
    #[error("internal error: {0}")]
    Unreachable(String),

    /// Invalid user-provided configuration or input data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors from the external video encoder.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WireError {
    /// Build a [`WireError::InvalidState`] value.
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Build a [`WireError::DegenerateGeometry`] value.
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateGeometry(msg.into())
    }

    /// Build a [`WireError::DimensionMismatch`] value.
    pub fn dimension(msg: impl Into<String>) -> Self {
        Self::DimensionMismatch(msg.into())
    }

    /// Build a [`WireError::Unreachable`] value.
    pub fn unreachable(msg: impl Into<String>) -> Self {
        Self::Unreachable(msg.into())
    }

    /// Build a [`WireError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`WireError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`WireError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
