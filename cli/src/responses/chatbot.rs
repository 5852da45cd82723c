//! # CharcuBot Chatbot Facade
//!
//! File: cli/src/responses/chatbot.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The `Chatbot` bundles a loaded `ResponseConfig`, its compiled keyword
//! patterns, and the conversational copy from the `[bot]` settings (names,
//! welcome/farewell text, exit command, menu size). Every presentation surface
//! (`chat`, `ask`, `pick`, `srv`) talks to the responses through it.
//!
//! The chatbot holds no conversation state. Each call to `reply` or `select`
//! is resolved on its own, using the `Rng` supplied by the caller.
//!
//! ## Examples
//!
//! ```rust
//! use charcubot::core::config::BotConfig;
//! use charcubot::responses::{chatbot::Chatbot, BotOption, ResponseConfig};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let responses = ResponseConfig {
//!     options: vec![BotOption {
//!         label: "Jamón Ibérico".into(),
//!         keywords: vec!["jamón".into()],
//!         responses: vec!["El jamón de bellota está a 89 €/kg.".into()],
//!     }],
//!     default_responses: vec!["Lo siento, no tengo una respuesta para eso.".into()],
//! };
//! let bot = Chatbot::new(responses, &BotConfig::default());
//! let mut rng = StdRng::seed_from_u64(7);
//!
//! let reply = bot.reply("¿Tienen jamón ibérico?", &mut rng);
//! assert_eq!(reply.map(|r| r.text).as_deref(), Some("El jamón de bellota está a 89 €/kg."));
//! assert!(bot.reply("   ", &mut rng).is_none());
//! ```
//!
use super::{
    resolver::{self, KeywordMatcher},
    store, BotOption, ResponseConfig, LOAD_ERROR_RESPONSE,
};
use crate::core::config::BotConfig;
use rand::Rng;
use std::path::Path;
use tracing::{debug, warn};

/// One answer from the chatbot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// The customer asked to leave; the surface should end the conversation.
    pub end: bool,
}

impl Reply {
    fn answer(text: String) -> Self {
        Self { text, end: false }
    }
}

#[derive(Debug, Clone)]
pub struct Chatbot {
    responses: ResponseConfig,
    matcher: KeywordMatcher,
    name: String,
    customer_name: String,
    welcome: String,
    farewell: String,
    exit_command: String,
    max_menu_options: usize,
}

impl Chatbot {
    /// Builds a chatbot over already loaded responses.
    pub fn new(responses: ResponseConfig, bot: &BotConfig) -> Self {
        let matcher = KeywordMatcher::new(&responses.options);
        Self {
            responses,
            matcher,
            name: bot.name.clone(),
            customer_name: bot.customer_name.clone(),
            welcome: bot.welcome.clone(),
            farewell: bot.farewell.clone(),
            exit_command: bot.exit_command.clone(),
            max_menu_options: bot.max_menu_options,
        }
    }

    /// Loads `bot.responses_file` and builds a chatbot over it.
    ///
    /// Never fails: an unusable file yields a degraded chatbot (see `is_degraded`).
    pub fn load(bot: &BotConfig) -> Self {
        let responses = store::load_responses(Path::new(&bot.responses_file));
        let chatbot = Self::new(responses, bot);
        if chatbot.is_degraded() {
            warn!(
                "Chatbot has no options; check the responses file at {}",
                bot.responses_file
            );
        }
        chatbot
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn welcome(&self) -> &str {
        &self.welcome
    }

    pub fn responses(&self) -> &ResponseConfig {
        &self.responses
    }

    /// True when there are no options to talk about (typically a failed load).
    pub fn is_degraded(&self) -> bool {
        self.responses.options.is_empty()
    }

    /// Message shown in place of the conversation when the chatbot is degraded.
    pub fn unavailable_message(&self) -> &str {
        self.responses
            .default_responses
            .first()
            .map(String::as_str)
            .unwrap_or(LOAD_ERROR_RESPONSE)
    }

    /// Options offered as menu entries: labelled ones, in stored order, capped.
    pub fn menu(&self) -> Vec<&BotOption> {
        self.responses
            .options
            .iter()
            .filter(|option| option.has_label())
            .take(self.max_menu_options)
            .collect()
    }

    /// Answers free text typed by the customer.
    ///
    /// Returns `None` for blank input. The exit command yields the farewell
    /// with `end` set.
    pub fn reply<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> Option<Reply> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if text.to_lowercase() == self.exit_command.to_lowercase() {
            debug!("Exit command received");
            return Some(Reply {
                text: self.farewell.clone(),
                end: true,
            });
        }
        Some(Reply::answer(self.resolve(text, rng)))
    }

    /// Keyword resolution of `text` as is: no trimming, no exit command.
    pub fn resolve<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> String {
        resolver::resolve_with_matcher(
            &self.matcher,
            text,
            &self.responses.options,
            &self.responses.default_responses,
            rng,
        )
    }

    /// Answers a menu selection.
    pub fn select<R: Rng + ?Sized>(&self, label: &str, rng: &mut R) -> Reply {
        Reply::answer(resolver::resolve_by_label(
            label,
            &self.responses.options,
            &self.responses.default_responses,
            rng,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn labelled(label: &str, keyword: &str, response: &str) -> BotOption {
        BotOption {
            label: label.into(),
            keywords: vec![keyword.into()],
            responses: vec![response.into()],
        }
    }

    fn bot() -> Chatbot {
        let responses = ResponseConfig {
            options: vec![
                labelled("Jamón Ibérico", "jamón", "Jamón de bellota a 89 €/kg."),
                labelled("Quesos", "queso", "Manchego curado y Idiazábal."),
                labelled("", "pan", "Pan de masa madre."),
                labelled("Horario", "horario", "De 9:00 a 20:00."),
            ],
            default_responses: vec!["¿Puedes repetirlo?".into()],
        };
        let cfg = BotConfig {
            max_menu_options: 2,
            ..BotConfig::default()
        };
        Chatbot::new(responses, &cfg)
    }

    #[test]
    fn test_reply_resolves_keywords() {
        let mut rng = StdRng::seed_from_u64(11);
        let reply = bot().reply("  ¿hay QUESO? ", &mut rng).unwrap();
        assert_eq!(reply.text, "Manchego curado y Idiazábal.");
        assert!(!reply.end);
    }

    #[test]
    fn test_blank_input_has_no_reply() {
        let mut rng = StdRng::seed_from_u64(11);
        assert_eq!(bot().reply("   ", &mut rng), None);
    }

    #[test]
    fn test_exit_command_ends_conversation() {
        let mut rng = StdRng::seed_from_u64(11);
        let chatbot = bot();
        let reply = chatbot.reply("SALIR", &mut rng).unwrap();
        assert!(reply.end);
        assert_eq!(reply.text, BotConfig::default().farewell);
    }

    #[test]
    fn test_select_uses_label() {
        let mut rng = StdRng::seed_from_u64(11);
        assert_eq!(bot().select("horario", &mut rng).text, "De 9:00 a 20:00.");
        assert_eq!(bot().select("jamón", &mut rng).text, "¿Puedes repetirlo?");
    }

    #[test]
    fn test_menu_skips_unlabelled_and_caps() {
        let chatbot = bot();
        let labels: Vec<_> = chatbot.menu().iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Jamón Ibérico", "Quesos"]);
    }

    #[test]
    fn test_menu_skips_whitespace_labels() {
        let responses = ResponseConfig {
            options: vec![
                labelled("  ", "oferta", "15% en tablas de ibéricos."),
                labelled("Quesos", "queso", "Manchego curado y Idiazábal."),
            ],
            default_responses: vec!["¿Puedes repetirlo?".into()],
        };
        let chatbot = Chatbot::new(responses, &BotConfig::default());
        let labels: Vec<_> = chatbot.menu().iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Quesos"]);
    }

    #[test]
    fn test_degraded_chatbot() {
        let chatbot = Chatbot::new(ResponseConfig::degraded(), &BotConfig::default());
        let mut rng = StdRng::seed_from_u64(11);
        assert!(chatbot.is_degraded());
        assert!(chatbot.menu().is_empty());
        assert_eq!(chatbot.unavailable_message(), LOAD_ERROR_RESPONSE);
        assert_eq!(
            chatbot.reply("jamón", &mut rng).unwrap().text,
            LOAD_ERROR_RESPONSE
        );
    }

    #[test]
    fn test_load_missing_file_is_degraded() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = BotConfig {
            responses_file: dir.path().join("missing.json").to_string_lossy().into_owned(),
            ..BotConfig::default()
        };
        assert!(Chatbot::load(&cfg).is_degraded());
    }
}
