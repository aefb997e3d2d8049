//! Scripted copy of the assistant
//!
//! The assistant has no language understanding: every reply comes from a
//! fixed table keyed by the topic the user asked for.

use crate::models::{Locale, PageSection, TopicId};

/// Reply computed for a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptedReply {
    pub text: &'static str,
    pub next: TopicId,
    pub navigate: Option<PageSection>,
}

pub fn greeting(locale: Locale) -> &'static str {
    match locale {
        Locale::PtBr => "Olá! Sou seu assistente virtual Danka. Como posso ajudar na sua jornada de crescimento patrimonial hoje?",
        Locale::En => "Hi! I'm your Danka virtual assistant. How can I help you grow your wealth today?",
    }
}

pub fn widget_title(_locale: Locale) -> &'static str {
    "Danka Assistant"
}

pub fn status_line(locale: Locale) -> &'static str {
    match locale {
        Locale::PtBr => "Online agora",
        Locale::En => "Online now",
    }
}

pub fn contact_label(_locale: Locale) -> &'static str {
    "WhatsApp"
}

/// Reply and next topic for a selection targeting `target`
pub fn reply_for(target: TopicId, locale: Locale) -> ScriptedReply {
    let text = match (target, locale) {
        (TopicId::HowItWorks, Locale::PtBr) => "Nossa Engenharia Financeira utiliza o sistema de consórcios de forma estratégica. Em vez de juros altos de financiamento, você paga uma taxa administrativa fixa e usa estratégias de lances inteligentes para captar capital barato e rápido.",
        (TopicId::HowItWorks, Locale::En) => "Our Financial Engineering uses consortium groups strategically. Instead of high financing interest, you pay a fixed administration fee and use smart bidding strategies to raise cheap capital fast.",
        (TopicId::Simulate, Locale::PtBr) => "Ótima escolha! Você pode usar nosso simulador logo acima para ver a economia real. Vou te levar para lá.",
        (TopicId::Simulate, Locale::En) => "Great choice! You can use our calculator right above to see the real savings. Let me take you there.",
        (TopicId::Advantages, Locale::PtBr) => "As principais vantagens são: Taxa 0% de juros, proteção contra inflação, poder de compra à vista e flexibilidade total para imóveis, frotas ou capital de giro.",
        (TopicId::Advantages, Locale::En) => "The main advantages are: 0% interest with a fixed fee, inflation-indexed credit, cash purchasing power and full flexibility for real estate, fleets or working capital.",
        (TopicId::TalkConsultant, Locale::PtBr) => "Nossos consultores estão prontos para desenhar sua estratégia personalizada. Clique no botão de WhatsApp abaixo ou me diga se quer voltar.",
        (TopicId::TalkConsultant, Locale::En) => "Our advisors are ready to design your personal strategy. Tap the WhatsApp button below or tell me if you want to go back.",
        (TopicId::Start, Locale::PtBr) => "No que mais posso te ajudar?",
        (TopicId::Start, Locale::En) => "How else can I help you?",
    };

    ScriptedReply {
        text,
        next: target,
        navigate: match target {
            TopicId::Simulate => Some(PageSection::Calculator),
            _ => None,
        },
    }
}

/// Reply for a raw target id coming from outside the type system.
///
/// Unrecognized ids never fail: they get a generic prompt and lead back to `start`.
pub fn reply_for_raw(raw: &str, locale: Locale) -> ScriptedReply {
    match raw.parse::<TopicId>() {
        Ok(target) => reply_for(target, locale),
        Err(_) => ScriptedReply {
            text: fallback_prompt(locale),
            next: TopicId::Start,
            navigate: None,
        },
    }
}

fn fallback_prompt(locale: Locale) -> &'static str {
    match locale {
        Locale::PtBr => "Entendi. Como posso prosseguir?",
        Locale::En => "Got it. How should we proceed?",
    }
}
