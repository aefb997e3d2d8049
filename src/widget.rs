//! Floating assistant widget
//!
//! Owns the dialog session and wires it to a scheduler (reply latency) and a
//! presentation adapter (drawing and page navigation).

use crate::config::AssistantConfig;
use crate::engine::{DialogSession, PendingReply};
use crate::error::AssistantError;
use crate::models::{DialogOption, TopicId};
use crate::presentation::{ContactLink, PresentationAdapter, WidgetView};
use crate::scheduler::Scheduler;
use crate::script;
use crate::topics::TopicRegistry;
use crate::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// State shared between the widget and its deferred replies
struct Shared {
    session: Mutex<DialogSession>,
    open: AtomicBool,
    config: AssistantConfig,
    presenter: Arc<dyn PresentationAdapter>,
}

impl Shared {
    fn session(&self) -> MutexGuard<'_, DialogSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn capture(&self) -> WidgetView {
        let session = self.session();
        let locale = session.locale();
        let topic = session.current_topic();
        let options_visible = session.options_visible();

        WidgetView {
            session_id: session.session_id(),
            title: script::widget_title(locale).to_string(),
            status: script::status_line(locale).to_string(),
            open: self.open.load(Ordering::SeqCst),
            topic,
            messages: session.messages().to_vec(),
            options: session.offered_options().to_vec(),
            options_visible,
            contact: (options_visible && topic == TopicId::TalkConsultant).then(|| ContactLink {
                label: script::contact_label(locale).to_string(),
                url: self.config.contact_url.clone(),
            }),
        }
    }

    /// Snapshot and draw; the session lock is released before the adapter runs
    fn render(&self) {
        let view = self.capture();
        self.presenter.render(&view);
    }

    fn deliver(&self, pending: PendingReply) {
        let outcome = self.session().complete_reply(pending);

        match outcome {
            Ok(transition) => {
                self.render();
                if let Some(section) = transition.navigate {
                    debug!(?section, "Requesting page navigation");
                    self.presenter.focus_section(section);
                }
            }
            Err(error) => warn!("Deferred reply dropped: {}", error),
        }
    }
}

/// The assistant widget as seen by its host page
pub struct AssistantWidget {
    shared: Arc<Shared>,
    scheduler: Arc<dyn Scheduler>,
}

impl AssistantWidget {
    pub fn new(
        config: AssistantConfig,
        scheduler: Arc<dyn Scheduler>,
        presenter: Arc<dyn PresentationAdapter>,
    ) -> Result<Self> {
        let registry = TopicRegistry::standard(config.locale);
        Self::with_registry(config, registry, scheduler, presenter)
    }

    pub fn with_registry(
        config: AssistantConfig,
        registry: TopicRegistry,
        scheduler: Arc<dyn Scheduler>,
        presenter: Arc<dyn PresentationAdapter>,
    ) -> Result<Self> {
        config.validate()?;

        let session = DialogSession::new(Arc::new(registry), config.locale);
        info!(
            session_id = %session.session_id(),
            locale = ?config.locale,
            reply_delay_ms = config.reply_delay.as_millis() as u64,
            "Assistant widget created"
        );

        Ok(Self {
            shared: Arc::new(Shared {
                session: Mutex::new(session),
                open: AtomicBool::new(false),
                config,
                presenter,
            }),
            scheduler,
        })
    }

    pub fn is_open(&self) -> bool {
        self.shared.open.load(Ordering::SeqCst)
    }

    pub fn open(&self) {
        self.set_open(true);
    }

    /// Hide the panel. The conversation, including any pending reply, carries on.
    pub fn close(&self) {
        self.set_open(false);
    }

    pub fn toggle(&self) {
        self.set_open(!self.is_open());
    }

    fn set_open(&self, open: bool) {
        let was = self.shared.open.swap(open, Ordering::SeqCst);
        if was != open {
            debug!(open, "Widget visibility changed");
        }
        self.shared.render();
    }

    pub fn view(&self) -> WidgetView {
        self.shared.capture()
    }

    pub fn current_topic(&self) -> TopicId {
        self.shared.session().current_topic()
    }

    /// Options the user can pick right now
    pub fn offered_options(&self) -> Vec<DialogOption> {
        self.shared.session().offered_options().to_vec()
    }

    /// Pick an option from the menu.
    ///
    /// The user's message is logged and the menu hidden right away; the
    /// assistant answers after the configured delay.
    pub fn select_option(&self, option: &DialogOption) -> Result<()> {
        let pending = self.shared.session().begin_selection(option)?;
        self.shared.render();

        let shared = Arc::clone(&self.shared);
        self.scheduler.schedule(
            self.shared.config.reply_delay,
            Box::new(move || shared.deliver(pending)),
        );

        Ok(())
    }

    /// Pick the option at `index` (zero based) of the current menu
    pub fn select_index(&self, index: usize) -> Result<()> {
        let offered = self.offered_options();
        let option = offered
            .get(index)
            .cloned()
            .ok_or(AssistantError::OptionIndexOutOfRange {
                index,
                offered: offered.len(),
            })?;

        self.select_option(&option)
    }
}
