//! Assistant configuration loaded from the environment

use crate::error::AssistantError;
use crate::models::Locale;
use crate::Result;
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_REPLY_DELAY_MS: u64 = 600;
pub const DEFAULT_CONTACT_URL: &str = "https://wa.me/5511999999999";

/// How the terminal host renders the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Text,
    Json,
}

impl FromStr for RenderMode {
    type Err = AssistantError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(RenderMode::Text),
            "json" => Ok(RenderMode::Json),
            other => Err(AssistantError::Config(format!("unsupported render mode '{}'", other))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// Pause between the user's selection and the assistant's reply. Never zero.
    pub reply_delay: Duration,
    pub locale: Locale,
    /// Outbound link offered while talking about a consultant
    pub contact_url: String,
    pub render_mode: RenderMode,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            reply_delay: Duration::from_millis(DEFAULT_REPLY_DELAY_MS),
            locale: Locale::default(),
            contact_url: DEFAULT_CONTACT_URL.to_string(),
            render_mode: RenderMode::default(),
        }
    }
}

impl AssistantConfig {
    /// Read `ASSISTANT_*` variables, falling back to defaults for unset ones
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` uses the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let reply_delay = match lookup("ASSISTANT_REPLY_DELAY_MS") {
            Some(raw) => {
                let ms: u64 = raw.trim().parse().map_err(|_| {
                    AssistantError::Config(format!(
                        "ASSISTANT_REPLY_DELAY_MS must be a number of milliseconds, got '{}'",
                        raw
                    ))
                })?;
                Duration::from_millis(ms)
            }
            None => defaults.reply_delay,
        };

        let locale = match lookup("ASSISTANT_LOCALE") {
            Some(raw) => raw.parse()?,
            None => defaults.locale,
        };

        let contact_url = lookup("ASSISTANT_CONTACT_URL")
            .map(|url| url.trim().to_string())
            .unwrap_or(defaults.contact_url);

        let render_mode = match lookup("ASSISTANT_RENDER") {
            Some(raw) => raw.parse()?,
            None => defaults.render_mode,
        };

        let config = Self {
            reply_delay,
            locale,
            contact_url,
            render_mode,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.reply_delay.is_zero() {
            return Err(AssistantError::Config(
                "reply delay must be greater than zero".to_string(),
            ));
        }

        if !(self.contact_url.starts_with("https://") || self.contact_url.starts_with("http://")) {
            return Err(AssistantError::Config(format!(
                "contact url must be http(s), got '{}'",
                self.contact_url
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AssistantConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.reply_delay, Duration::from_millis(600));
        assert_eq!(config.locale, Locale::PtBr);
        assert_eq!(config.contact_url, DEFAULT_CONTACT_URL);
        assert_eq!(config.render_mode, RenderMode::Text);
    }

    #[test]
    fn test_overrides() {
        let config = AssistantConfig::from_lookup(lookup(&[
            ("ASSISTANT_REPLY_DELAY_MS", "250"),
            ("ASSISTANT_LOCALE", "en"),
            ("ASSISTANT_CONTACT_URL", "https://wa.me/5521000000000"),
            ("ASSISTANT_RENDER", "json"),
        ]))
        .unwrap();

        assert_eq!(config.reply_delay, Duration::from_millis(250));
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.contact_url, "https://wa.me/5521000000000");
        assert_eq!(config.render_mode, RenderMode::Json);
    }

    #[test]
    fn test_zero_delay_rejected() {
        let err = AssistantConfig::from_lookup(lookup(&[("ASSISTANT_REPLY_DELAY_MS", "0")]))
            .unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn test_bad_values_rejected() {
        assert!(AssistantConfig::from_lookup(lookup(&[("ASSISTANT_REPLY_DELAY_MS", "soon")])).is_err());
        assert!(AssistantConfig::from_lookup(lookup(&[("ASSISTANT_LOCALE", "de")])).is_err());
        assert!(AssistantConfig::from_lookup(lookup(&[("ASSISTANT_CONTACT_URL", "wa.me/1")])).is_err());
    }
}
