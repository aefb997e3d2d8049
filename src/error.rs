//! Error types for the guided assistant

use thiserror::Error;

use crate::models::TopicId;

/// Result type alias for assistant operations
pub type Result<T> = std::result::Result<T, AssistantError>;

#[derive(Error, Debug)]
pub enum AssistantError {

    // =============================
    // Dialog Errors
    // =============================

    #[error("Option '{label}' is not offered while topic is {topic}")]
    OptionNotOffered { label: String, topic: TopicId },

    #[error("A reply is still pending; selection '{0}' rejected")]
    ReplyPending(String),

    #[error("No pending reply matches ticket {0}")]
    NoPendingReply(u64),

    #[error("No option at index {index} ({offered} offered)")]
    OptionIndexOutOfRange { index: usize, offered: usize },

    #[error("Unknown topic id: {0}")]
    UnknownTopic(String),

    #[error("Invalid topic registry: {0}")]
    InvalidRegistry(String),

    // =============================
    // Host Errors
    // =============================

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No async runtime available: {0}")]
    NoRuntime(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
