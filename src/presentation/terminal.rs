//! Terminal rendering of the assistant widget

use super::{PresentationAdapter, WidgetView};
use crate::calculator::{self, DEFAULT_CREDIT};
use crate::config::RenderMode;
use crate::models::{MessageId, PageSection, Sender};
use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::warn;

/// Draws the widget as text (or JSON lines) on any writer
pub struct TerminalPresenter {
    out: Mutex<Box<dyn Write + Send>>,
    mode: RenderMode,
    last_printed: Mutex<Option<MessageId>>,
    credit_value: AtomicU64,
}

impl TerminalPresenter {
    pub fn new(out: Box<dyn Write + Send>, mode: RenderMode) -> Self {
        Self {
            out: Mutex::new(out),
            mode,
            last_printed: Mutex::new(None),
            credit_value: AtomicU64::new(DEFAULT_CREDIT),
        }
    }

    pub fn stdout(mode: RenderMode) -> Self {
        Self::new(Box::new(io::stdout()), mode)
    }

    /// Value the calculator section shows when focused
    pub fn set_credit_value(&self, value: u64) -> u64 {
        let credit = calculator::clamp_credit(value);
        self.credit_value.store(credit, Ordering::SeqCst);
        credit
    }

    pub fn calculator_section(&self) -> String {
        let projection = calculator::project(self.credit_value.load(Ordering::SeqCst));
        let mut text = String::new();

        let _ = writeln!(text, "--- #{} ---", PageSection::Calculator.anchor());
        let _ = writeln!(
            text,
            "Credit value:      {} ({:.0}% of range)",
            calculator::format_brl(projection.credit_value),
            calculator::slider_percent(projection.credit_value)
        );
        let _ = writeln!(
            text,
            "Bank financing:    {}",
            calculator::format_brl(projection.financing_total)
        );
        let _ = writeln!(
            text,
            "Consortium:        {}",
            calculator::format_brl(projection.consortium_total)
        );
        let _ = writeln!(
            text,
            "You keep:          {}",
            calculator::format_brl(projection.savings)
        );
        text
    }

    fn render_text(&self, view: &WidgetView) -> String {
        let mut text = String::new();

        if !view.open {
            let _ = writeln!(text, "({} minimized)", view.title);
            return text;
        }

        let mut last_printed = self
            .last_printed
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let fresh: Vec<_> = view
            .messages
            .iter()
            .filter(|m| last_printed.map_or(true, |last| m.id() > last))
            .collect();

        if last_printed.is_none() {
            let _ = writeln!(text, "=== {} · {} ===", view.title, view.status);
        }

        for message in &fresh {
            match message.sender() {
                Sender::Assistant => {
                    let _ = writeln!(text, "  {}: {}", view.title, message.text());
                }
                Sender::User => {
                    let _ = writeln!(text, "{:>width$} :you", message.text(), width = 40);
                }
            }
        }

        if let Some(last) = view.messages.last() {
            *last_printed = Some(last.id());
        }

        if view.options_visible {
            let menu: Vec<String> = view
                .options
                .iter()
                .enumerate()
                .map(|(i, option)| format!("[{}] {}", i + 1, option.label))
                .collect();
            let _ = writeln!(text, "  {}", menu.join("  "));

            if let Some(contact) = &view.contact {
                let _ = writeln!(text, "  [{}] {}", contact.label, contact.url);
            }
        } else {
            let _ = writeln!(text, "  ...");
        }

        text
    }

    fn write(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(error) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            warn!("Terminal render failed: {}", error);
        }
    }
}

impl PresentationAdapter for TerminalPresenter {
    fn render(&self, view: &WidgetView) {
        let text = match self.mode {
            RenderMode::Text => self.render_text(view),
            RenderMode::Json => match serde_json::to_string(view) {
                Ok(json) => json + "\n",
                Err(error) => {
                    warn!("Failed to serialize widget view: {}", error);
                    return;
                }
            },
        };

        self.write(&text);
    }

    fn focus_section(&self, section: PageSection) {
        match section {
            PageSection::Calculator => {
                let text = self.calculator_section();
                self.write(&text);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DialogOption, Locale, TopicId};
    use crate::presentation::ContactLink;
    use crate::transcript::Transcript;
    use std::sync::Arc;
    use uuid::Uuid;

    /// Writer whose contents the test can read back
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn view(open: bool, contact: bool) -> WidgetView {
        let mut log = Transcript::new();
        log.push(Sender::Assistant, crate::script::greeting(Locale::En));
        log.push(Sender::User, "Talk to advisor");

        WidgetView {
            session_id: Uuid::new_v4(),
            title: "Danka Assistant".to_string(),
            status: "Online now".to_string(),
            open,
            topic: TopicId::TalkConsultant,
            messages: log.as_slice().to_vec(),
            options: vec![DialogOption::new("Back", TopicId::Start)],
            options_visible: true,
            contact: contact.then(|| ContactLink {
                label: "WhatsApp".to_string(),
                url: "https://wa.me/5511999999999".to_string(),
            }),
        }
    }

    #[test]
    fn test_text_render_shows_menu_and_contact() {
        let buffer = SharedBuffer::default();
        let presenter = TerminalPresenter::new(Box::new(buffer.clone()), RenderMode::Text);

        presenter.render(&view(true, true));
        let out = buffer.contents();

        assert!(out.contains("Danka Assistant"));
        assert!(out.contains("Talk to advisor :you"));
        assert!(out.contains("[1] Back"));
        assert!(out.contains("[WhatsApp] https://wa.me/5511999999999"));
    }

    #[test]
    fn test_messages_printed_once() {
        let buffer = SharedBuffer::default();
        let presenter = TerminalPresenter::new(Box::new(buffer.clone()), RenderMode::Text);

        let view = view(true, false);
        presenter.render(&view);
        presenter.render(&view);

        assert_eq!(buffer.contents().matches("Talk to advisor :you").count(), 1);
    }

    #[test]
    fn test_closed_widget_is_minimized() {
        let buffer = SharedBuffer::default();
        let presenter = TerminalPresenter::new(Box::new(buffer.clone()), RenderMode::Text);

        presenter.render(&view(false, false));
        assert_eq!(buffer.contents(), "(Danka Assistant minimized)\n");
    }

    #[test]
    fn test_json_render() {
        let buffer = SharedBuffer::default();
        let presenter = TerminalPresenter::new(Box::new(buffer.clone()), RenderMode::Json);

        presenter.render(&view(true, true));
        let parsed: serde_json::Value = serde_json::from_str(buffer.contents().trim()).unwrap();

        assert_eq!(parsed["topic"], "talk_consultant");
        assert_eq!(parsed["messages"][1]["sender"], "user");
        assert_eq!(parsed["contact"]["label"], "WhatsApp");
    }

    #[test]
    fn test_calculator_focus() {
        let buffer = SharedBuffer::default();
        let presenter = TerminalPresenter::new(Box::new(buffer.clone()), RenderMode::Text);

        assert_eq!(presenter.set_credit_value(1_000_000), 1_000_000);
        presenter.focus_section(PageSection::Calculator);
        let out = buffer.contents();

        assert!(out.contains("#simulador"));
        assert!(out.contains("R$ 2.800.000"));
        assert!(out.contains("R$ 1.250.000"));
        assert!(out.contains("R$ 1.550.000"));
    }
}
