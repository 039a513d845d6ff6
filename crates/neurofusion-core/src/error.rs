//! Error types for the fusion engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid proposal: {field} - {reason}")]
    InvalidProposal { field: &'static str, reason: String },

    #[error("unknown urgency: {0}")]
    UnknownUrgency(String),

    #[error("unknown moment: {0}")]
    UnknownMoment(String),

    #[error("unknown intervention kind: {0}")]
    UnknownInterventionKind(String),

    #[error("agent error: {agent} - {message}")]
    AgentFailed { agent: String, message: String },

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("json error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("toml error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_proposal(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidProposal {
            field,
            reason: reason.into(),
        }
    }

    pub fn agent_failed(agent: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AgentFailed {
            agent: agent.into(),
            message: message.into(),
        }
    }
}
