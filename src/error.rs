//! Error types shared by network actions and configuration loading.
//!
//! ERROR HANDLING
//! ==============
//! Remote actions fail in exactly two tiers: the server answered and said no
//! (`Rejected`), or the round trip itself broke (`Transport`/`Decode`). Widgets
//! branch on [`ActionError::is_transport`] to pick between showing the
//! server's message and logging plus a generic retry message.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Failure of a single remote action.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// The server returned a body reporting a logical failure
    /// (`success: false` or an `error` field).
    #[error("rejected by server: {}", message_or_placeholder(.message))]
    Rejected { message: Option<String> },

    /// The request could not be built, sent, or its body could not be read.
    #[error("request failed: {0}")]
    Transport(String),

    /// The body was received but is not the JSON shape the action expects.
    #[error("response parse failed: {0}")]
    Decode(String),
}

impl ActionError {
    /// Build a rejection carrying the server's message, if it sent one.
    pub fn rejected(message: Option<String>) -> Self {
        Self::Rejected { message: message.filter(|m| !m.trim().is_empty()) }
    }

    /// `true` for failures of the round trip itself rather than of the action.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Decode(_))
    }

    /// The server-supplied message of a rejection.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message } => message.as_deref(),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}

fn message_or_placeholder(message: &Option<String>) -> &str {
    message.as_deref().unwrap_or("no message")
}

impl From<serde_json::Error> for ActionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Error returned when the page's embedded configuration block is unusable.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The block exists but is not valid configuration JSON.
    #[error("config parse failed: {0}")]
    Parse(#[from] serde_json::Error),

    /// `log_level` names no known level.
    #[error("invalid log level: {0}")]
    LogLevel(String),
}
