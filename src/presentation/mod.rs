//! Presentation boundary
//!
//! The dialog engine never draws anything. It hands snapshots to an adapter
//! and asks it to bring page sections into view.

pub mod terminal;

use crate::models::{DialogOption, Message, PageSection, TopicId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use terminal::TerminalPresenter;

/// Everything an adapter needs to draw the widget
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WidgetView {
    pub session_id: Uuid,
    pub title: String,
    pub status: String,
    pub open: bool,
    pub topic: TopicId,
    pub messages: Vec<Message>,
    /// Menu to draw; empty while the assistant is "typing"
    pub options: Vec<DialogOption>,
    pub options_visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactLink>,
}

/// Static outbound action shown next to the menu
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactLink {
    pub label: String,
    pub url: String,
}

/// Trait for the surface hosting the widget
pub trait PresentationAdapter: Send + Sync {
    /// Called on every change of the log, topic, menu visibility or open state
    fn render(&self, view: &WidgetView);

    /// Bring a page section into view. Missing sections are ignored.
    fn focus_section(&self, section: PageSection);
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;
    use std::sync::{Mutex, PoisonError};

    /// Adapter that remembers every call
    #[derive(Default)]
    pub struct RecordingPresenter {
        views: Mutex<Vec<WidgetView>>,
        focused: Mutex<Vec<PageSection>>,
    }

    impl RecordingPresenter {
        pub fn views(&self) -> Vec<WidgetView> {
            self.views.lock().unwrap_or_else(PoisonError::into_inner).clone()
        }

        pub fn last_view(&self) -> Option<WidgetView> {
            self.views
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .last()
                .cloned()
        }

        pub fn focused(&self) -> Vec<PageSection> {
            self.focused.lock().unwrap_or_else(PoisonError::into_inner).clone()
        }
    }

    impl PresentationAdapter for RecordingPresenter {
        fn render(&self, view: &WidgetView) {
            self.views
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(view.clone());
        }

        fn focus_section(&self, section: PageSection) {
            self.focused
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(section);
        }
    }
}
