//! Core data models for the guided assistant

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AssistantError;

//
// ================= Enums =================
//

/// Who spoke a message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Assistant,
    User,
}

/// A state of the dialog: the topic currently being discussed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum TopicId {
    Start,
    HowItWorks,
    Advantages,
    Simulate,
    TalkConsultant,
}

impl TopicId {
    pub const ALL: [TopicId; 5] = [
        TopicId::Start,
        TopicId::HowItWorks,
        TopicId::Advantages,
        TopicId::Simulate,
        TopicId::TalkConsultant,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TopicId::Start => "start",
            TopicId::HowItWorks => "how_it_works",
            TopicId::Advantages => "advantages",
            TopicId::Simulate => "simulate",
            TopicId::TalkConsultant => "talk_consultant",
        }
    }

    /// Parse a raw topic id, degrading to `Start` when it is not recognized
    pub fn resolve(raw: &str) -> TopicId {
        raw.parse().unwrap_or(TopicId::Start)
    }
}

impl FromStr for TopicId {
    type Err = AssistantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TopicId::ALL
            .into_iter()
            .find(|topic| topic.as_str() == s.trim())
            .ok_or_else(|| AssistantError::UnknownTopic(s.to_string()))
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sections of the host page the assistant can bring into view
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PageSection {
    Calculator,
}

impl PageSection {
    /// Anchor id of the section on the page
    pub fn anchor(&self) -> &'static str {
        match self {
            PageSection::Calculator => "simulador",
        }
    }
}

/// Language of the scripted copy
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "en")]
    En,
}

impl FromStr for Locale {
    type Err = AssistantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pt-br" | "pt_br" | "pt" => Ok(Locale::PtBr),
            "en" | "en-us" | "en_us" => Ok(Locale::En),
            other => Err(AssistantError::Config(format!("unsupported locale '{}'", other))),
        }
    }
}

//
// ================= Messages =================
//

/// Position of a message in its log; strictly increasing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single exchanged message. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    id: MessageId,
    sender: Sender,
    text: String,
    sent_at: DateTime<Utc>,
}

impl Message {
    pub(crate) fn new(id: MessageId, sender: Sender, text: String) -> Self {
        Self {
            id,
            sender,
            text,
            sent_at: Utc::now(),
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }
}

//
// ================= Options =================
//

/// A selectable choice: a display label leading to a target topic
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DialogOption {
    pub label: String,
    pub target: TopicId,
}

impl DialogOption {
    pub fn new(label: impl Into<String>, target: TopicId) -> Self {
        Self {
            label: label.into(),
            target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_ids_parse() {
        for topic in TopicId::ALL {
            assert_eq!(topic.as_str().parse::<TopicId>().ok(), Some(topic));
        }
        assert!("pricing".parse::<TopicId>().is_err());
    }

    #[test]
    fn test_unknown_topic_resolves_to_start() {
        assert_eq!(TopicId::resolve("pricing"), TopicId::Start);
        assert_eq!(TopicId::resolve(""), TopicId::Start);
        assert_eq!(TopicId::resolve("simulate"), TopicId::Simulate);
    }

    #[test]
    fn test_topic_serde_names() {
        let json = serde_json::to_string(&TopicId::TalkConsultant).unwrap();
        assert_eq!(json, "\"talk_consultant\"");

        let sender = serde_json::to_string(&Sender::Assistant).unwrap();
        assert_eq!(sender, "\"assistant\"");
    }

    #[test]
    fn test_locale_parsing() {
        assert_eq!("pt-BR".parse::<Locale>().unwrap(), Locale::PtBr);
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
        assert!("fr".parse::<Locale>().is_err());
    }
}
