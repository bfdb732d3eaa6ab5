use crate::types::Stage;

/// Result type for session intents
pub type SessionResult<T> = Result<T, SessionError>;

/// Reasons a session intent can be rejected. A rejected intent never
/// leaves the session partially mutated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("{0} cannot be empty")]
    Validation(&'static str),

    #[error("{0} already exists")]
    Duplicate(String),

    #[error("{what} cannot be changed during the {stage:?} stage")]
    Locked { what: &'static str, stage: Stage },

    #[error("unknown {kind}: {name}")]
    InvalidReference { kind: &'static str, name: String },

    #[error("{0} has already voted")]
    AlreadyVoted(String),

    #[error("{voter} has not voted in every category ({missing} left)")]
    Incomplete { voter: String, missing: usize },

    #[error("{0}")]
    Precondition(String),
}

impl SessionError {
    /// Stable code sent to clients alongside the message
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::Validation(_) => "VALIDATION_ERROR",
            SessionError::Duplicate(_) => "DUPLICATE",
            SessionError::Locked { .. } => "LOCKED",
            SessionError::InvalidReference { .. } => "INVALID_REFERENCE",
            SessionError::AlreadyVoted(_) => "ALREADY_VOTED",
            SessionError::Incomplete { .. } => "INCOMPLETE",
            SessionError::Precondition(_) => "PRECONDITION_FAILED",
        }
    }

    pub(crate) fn precondition(msg: impl Into<String>) -> Self {
        SessionError::Precondition(msg.into())
    }

    pub(crate) fn unknown(kind: &'static str, name: &str) -> Self {
        SessionError::InvalidReference {
            kind,
            name: name.to_string(),
        }
    }
}
