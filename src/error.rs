//! Error types for sphere construction, addressing and output.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SphereError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SphereError {
    /// Ring boundaries or other configuration values are malformed.
    /// Raised at construction; the sphere is never built.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A boundary lookup found no bracketing pair. The tables are built so
    /// that this cannot happen for a normalized target, so seeing it means
    /// the table construction is wrong.
    #[error("no boundary bracket for angle {target} in a table of {len} samples")]
    InternalInvariant { target: f64, len: usize },

    /// A caller passed a non-finite angle, a malformed colour, an index off
    /// the end of the strip, or similar. Nothing was written.
    #[error("invalid argument: {0}")]
    Argument(String),

    /// The strip output failed (socket, universe registration, ...).
    #[error("strip output failed: {0}")]
    Transport(String),
}

impl SphereError {
    pub fn config(msg: impl Into<String>) -> Self {
        SphereError::Config(msg.into())
    }

    pub fn argument(msg: impl Into<String>) -> Self {
        SphereError::Argument(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_problem() {
        let err = SphereError::config("boundaries must start at 0");
        assert_eq!(err.to_string(), "invalid configuration: boundaries must start at 0");

        let err = SphereError::InternalInvariant { target: 725.0, len: 18 };
        assert!(err.to_string().contains("725"), "Message should carry the target angle");
    }
}
