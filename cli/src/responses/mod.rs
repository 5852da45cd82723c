//! # CharcuBot Response Model
//!
//! File: cli/src/responses/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module owns everything the chatbot knows how to say: the data model of
//! the responses file, the loader that reads it, and the two resolvers that turn
//! customer input into a canned reply.
//!
//! ## Architecture
//!
//! - `store`: Loads `data/responses.json` into a `ResponseConfig`. Never fails;
//!   unreadable files degrade to an error-carrying default response.
//! - `resolver`: Keyword (whole-word, first-match-wins) and label resolution.
//! - `lint`: Non-fatal content checks used by `charcubot check`.
//! - `chatbot`: The `Chatbot` facade used by every presentation surface.
//!
//! ## File Format
//!
//! ```json
//! {
//!   "opciones": [
//!     {"label": "Jamón Ibérico", "keywords": ["jamón"], "responses": ["..."]}
//!   ],
//!   "default_responses": ["..."]
//! }
//! ```
//!
//! The loaded configuration is immutable for the lifetime of the process.
//!
use serde::{Deserialize, Serialize};

pub mod chatbot;
pub mod lint;
pub mod resolver;
pub mod store;

/// Reply used when the file has no usable `default_responses`.
pub const FALLBACK_RESPONSE: &str = "Lo siento, no tengo una respuesta para eso.";

/// Sole default reply when the responses file cannot be loaded.
pub const LOAD_ERROR_RESPONSE: &str = "Error al cargar respuestas.";

/// A configured topic: the label shown in the menu, the keywords that trigger
/// it from free text, and the candidate replies.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct BotOption {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub responses: Vec<String>,
}

impl BotOption {
    /// Whether the option has a label worth showing as a menu entry.
    pub fn has_label(&self) -> bool {
        !self.label.trim().is_empty()
    }
}

/// The loaded responses file.
///
/// `default_responses` is never empty once produced by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseConfig {
    pub options: Vec<BotOption>,
    pub default_responses: Vec<String>,
}

impl ResponseConfig {
    /// The state used when loading fails: no options and a single error reply.
    pub fn degraded() -> Self {
        Self {
            options: Vec::new(),
            default_responses: vec![LOAD_ERROR_RESPONSE.to_string()],
        }
    }

    /// Splits the configuration into `(options, default_responses)`.
    pub fn into_parts(self) -> (Vec<BotOption>, Vec<String>) {
        (self.options, self.default_responses)
    }
}
