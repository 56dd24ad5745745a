//! Error types for network construction and annealer setup.

/// Errors raised while building a network or constructing an annealer.
///
/// Stepping an annealer never fails; every error surfaces before the
/// first step executes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnnealError {
    /// The network admits no usable search space, e.g. no source-to-sink
    /// path within the length cutoff.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A parameter lies outside its valid domain.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: String,
    },
}

impl AnnealError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        AnnealError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AnnealError>;
