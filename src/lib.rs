//! Guided Assistant
//!
//! The scripted assistant that floats over the Danka marketing page:
//! - Offers a fixed menu of canned topics, never free text
//! - Answers each choice from a fixed script after a short "typing" delay
//! - Keeps an append-only log of the conversation
//! - Sends users to the page's comparison calculator when they ask to simulate
//!
//! DIALOG LOOP:
//! OPEN → OFFER OPTIONS → SELECT → TYPING... → REPLY → OFFER OPTIONS

pub mod calculator;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod presentation;
pub mod scheduler;
pub mod script;
pub mod topics;
pub mod transcript;
pub mod widget;

pub use error::Result;

// Re-export common types
pub use models::*;
pub use config::AssistantConfig;
pub use engine::{DialogSession, PendingReply, Transition};
pub use widget::AssistantWidget;
