//! Dialog engine - the state machine behind the assistant
//!
//! SELECT → (user message, options hidden) → DELAY → REPLY → (next topic, options shown)
//!
//! The engine is synchronous. A selection is split in two phases so the
//! caller decides how the delay between them is spent.

use crate::error::AssistantError;
use crate::models::{DialogOption, Locale, Message, MessageId, PageSection, Sender, TopicId};
use crate::script;
use crate::topics::TopicRegistry;
use crate::transcript::Transcript;
use crate::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Ticket for a reply that has been promised but not yet delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingReply {
    ticket: u64,
    target: TopicId,
    user_message: MessageId,
}

impl PendingReply {
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    pub fn target(&self) -> TopicId {
        self.target
    }

    pub fn user_message(&self) -> MessageId {
        self.user_message
    }
}

/// Outcome of a completed reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: TopicId,
    pub to: TopicId,
    pub reply: MessageId,
    pub navigate: Option<PageSection>,
}

/// State of one conversation with the assistant
#[derive(Debug, Clone)]
pub struct DialogSession {
    session_id: Uuid,
    registry: Arc<TopicRegistry>,
    locale: Locale,
    current_topic: TopicId,
    log: Transcript,
    options_visible: bool,
    pending: Option<PendingReply>,
    tickets_issued: u64,
}

impl DialogSession {
    /// Start a session at `start` with the greeting already in the log
    pub fn new(registry: Arc<TopicRegistry>, locale: Locale) -> Self {
        let mut log = Transcript::new();
        log.push(Sender::Assistant, script::greeting(locale));

        let session_id = Uuid::new_v4();
        debug!(session_id = %session_id, ?locale, "Dialog session created");

        Self {
            session_id,
            registry,
            locale,
            current_topic: TopicId::Start,
            log,
            options_visible: true,
            pending: None,
            tickets_issued: 0,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn current_topic(&self) -> TopicId {
        self.current_topic
    }

    pub fn options_visible(&self) -> bool {
        self.options_visible
    }

    pub fn is_reply_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn log(&self) -> &Transcript {
        &self.log
    }

    pub fn messages(&self) -> &[Message] {
        self.log.as_slice()
    }

    /// Options the user may pick right now; empty while a reply is pending
    pub fn offered_options(&self) -> &[DialogOption] {
        if self.options_visible {
            self.registry.options(self.current_topic)
        } else {
            &[]
        }
    }

    /// First phase of a selection: record what the user said and hide the menu.
    ///
    /// Rejected selections leave the session untouched.
    pub fn begin_selection(&mut self, option: &DialogOption) -> Result<PendingReply> {
        if self.pending.is_some() {
            warn!(
                session_id = %self.session_id,
                label = %option.label,
                "Selection rejected while a reply is pending"
            );
            return Err(AssistantError::ReplyPending(option.label.clone()));
        }

        if !self.registry.offers(self.current_topic, option) {
            warn!(
                session_id = %self.session_id,
                topic = %self.current_topic,
                label = %option.label,
                target = %option.target,
                "Selection rejected: option not offered"
            );
            return Err(AssistantError::OptionNotOffered {
                label: option.label.clone(),
                topic: self.current_topic,
            });
        }

        let user_message = self.log.push(Sender::User, option.label.clone());
        self.options_visible = false;
        self.tickets_issued += 1;

        let pending = PendingReply {
            ticket: self.tickets_issued,
            target: option.target,
            user_message,
        };
        self.pending = Some(pending);

        debug!(
            session_id = %self.session_id,
            ticket = pending.ticket,
            target = %pending.target,
            "Selection accepted, reply pending"
        );

        Ok(pending)
    }

    /// Second phase: deliver the scripted reply and move to the next topic
    pub fn complete_reply(&mut self, pending: PendingReply) -> Result<Transition> {
        match self.pending {
            Some(current) if current == pending => {}
            _ => return Err(AssistantError::NoPendingReply(pending.ticket)),
        }

        let reply = script::reply_for(pending.target, self.locale);
        let from = self.current_topic;

        let reply_id = self.log.push(Sender::Assistant, reply.text);
        self.current_topic = reply.next;
        self.options_visible = true;
        self.pending = None;

        info!(
            session_id = %self.session_id,
            from = %from,
            to = %reply.next,
            navigate = ?reply.navigate,
            "Dialog transition"
        );

        Ok(Transition {
            from,
            to: reply.next,
            reply: reply_id,
            navigate: reply.navigate,
        })
    }

    /// Both phases back to back, with no delay in between
    pub fn select_now(&mut self, option: &DialogOption) -> Result<Transition> {
        let pending = self.begin_selection(option)?;
        self.complete_reply(pending)
    }
}
