//! Error types for the tabular RL crates

use std::fmt;

use thiserror::Error;

/// Which lookup domain a key was missing from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// A state key
    State,
    /// An action key
    Action,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::State => f.write_str("state"),
            Self::Action => f.write_str("action"),
        }
    }
}

/// Core error type for RL operations
#[derive(Error, Debug)]
pub enum RLError {
    /// Invalid learner or environment configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// State or action outside the domain the table was built for
    #[error("Unknown {kind}: {key}")]
    UnknownKey {
        /// Domain the key was looked up in
        kind: KeyKind,
        /// Debug rendering of the offending key
        key: String,
    },

    /// The environment rejected an action
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Environment-related errors
    #[error("Environment error: {0}")]
    Environment(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl RLError {
    /// Build an [`RLError::UnknownKey`] for a state
    pub fn unknown_state(state: &impl fmt::Debug) -> Self {
        Self::UnknownKey {
            kind: KeyKind::State,
            key: format!("{state:?}"),
        }
    }

    /// Build an [`RLError::UnknownKey`] for an action
    pub fn unknown_action(action: &impl fmt::Debug) -> Self {
        Self::UnknownKey {
            kind: KeyKind::Action,
            key: format!("{action:?}"),
        }
    }
}

/// Result type alias for RL operations
pub type Result<T> = std::result::Result<T, RLError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_key_messages_name_the_domain() {
        let err = RLError::unknown_state(&(9, 9));
        assert_eq!(err.to_string(), "Unknown state: (9, 9)");

        let err = RLError::unknown_action(&"jump");
        assert_eq!(err.to_string(), "Unknown action: \"jump\"");
    }
}
