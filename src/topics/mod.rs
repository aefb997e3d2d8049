//! Topic registry
//!
//! Static table from topic to the ordered options offered while that topic is active.

use crate::error::AssistantError;
use crate::models::{DialogOption, Locale, TopicId};
use crate::Result;
use std::collections::HashMap;

/// Registry for looking up the options of a topic
#[derive(Debug, Clone)]
pub struct TopicRegistry {
    topics: HashMap<TopicId, Vec<DialogOption>>,
}

impl TopicRegistry {
    /// Build a registry from a custom table.
    ///
    /// Every topic needs an entry with at least one option, otherwise the
    /// conversation could reach a state with nothing to select.
    pub fn new(topics: HashMap<TopicId, Vec<DialogOption>>) -> Result<Self> {
        for topic in TopicId::ALL {
            match topics.get(&topic) {
                None => {
                    return Err(AssistantError::InvalidRegistry(format!(
                        "topic {} has no entry",
                        topic
                    )))
                }
                Some(options) if options.is_empty() => {
                    return Err(AssistantError::InvalidRegistry(format!(
                        "topic {} offers no options",
                        topic
                    )))
                }
                Some(options) => {
                    if let Some(blank) = options.iter().find(|o| o.label.trim().is_empty()) {
                        return Err(AssistantError::InvalidRegistry(format!(
                            "topic {} has an option to {} without a label",
                            topic, blank.target
                        )));
                    }
                }
            }
        }

        Ok(Self { topics })
    }

    /// The fixed menu of the site's assistant
    pub fn standard(locale: Locale) -> Self {
        let labels = StandardLabels::for_locale(locale);

        let topics = HashMap::from([
            (
                TopicId::Start,
                vec![
                    DialogOption::new(labels.how_it_works, TopicId::HowItWorks),
                    DialogOption::new(labels.simulate, TopicId::Simulate),
                    DialogOption::new(labels.talk_consultant, TopicId::TalkConsultant),
                ],
            ),
            (
                TopicId::HowItWorks,
                vec![
                    DialogOption::new(labels.see_advantages, TopicId::Advantages),
                    DialogOption::new(labels.simulate_now, TopicId::Simulate),
                    DialogOption::new(labels.back, TopicId::Start),
                ],
            ),
            (
                TopicId::Advantages,
                vec![
                    DialogOption::new(labels.want_to_simulate, TopicId::Simulate),
                    DialogOption::new(labels.back, TopicId::Start),
                ],
            ),
            (
                TopicId::Simulate,
                vec![
                    DialogOption::new(labels.got_it, TopicId::Start),
                    DialogOption::new(labels.questions, TopicId::HowItWorks),
                ],
            ),
            (
                TopicId::TalkConsultant,
                vec![DialogOption::new(labels.back, TopicId::Start)],
            ),
        ]);

        Self { topics }
    }

    /// Options offered at `topic`
    pub fn options(&self, topic: TopicId) -> &[DialogOption] {
        self.topics
            .get(&topic)
            .or_else(|| self.topics.get(&TopicId::Start))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Options for a raw topic id; unknown ids get the `start` menu
    pub fn options_for_id(&self, raw: &str) -> &[DialogOption] {
        self.options(TopicId::resolve(raw))
    }

    /// Whether `option` is offered at `topic`
    pub fn offers(&self, topic: TopicId, option: &DialogOption) -> bool {
        self.options(topic).iter().any(|o| o == option)
    }
}

struct StandardLabels {
    how_it_works: &'static str,
    simulate: &'static str,
    talk_consultant: &'static str,
    see_advantages: &'static str,
    simulate_now: &'static str,
    want_to_simulate: &'static str,
    got_it: &'static str,
    questions: &'static str,
    back: &'static str,
}

impl StandardLabels {
    fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::PtBr => Self {
                how_it_works: "Como funciona?",
                simulate: "Quero simular",
                talk_consultant: "Falar com consultor",
                see_advantages: "Ver vantagens",
                simulate_now: "Simular agora",
                want_to_simulate: "Quero simular",
                got_it: "Entendi!",
                questions: "Dúvidas?",
                back: "Voltar",
            },
            Locale::En => Self {
                how_it_works: "How it works",
                simulate: "Simulate",
                talk_consultant: "Talk to advisor",
                see_advantages: "See advantages",
                simulate_now: "Simulate now",
                want_to_simulate: "I want to simulate",
                got_it: "Got it!",
                questions: "Questions?",
                back: "Back",
            },
        }
    }
}
