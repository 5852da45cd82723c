//! # CharcuBot Resolvers
//!
//! File: cli/src/responses/resolver.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Turns customer input into a reply.
//!
//! - **Keyword resolution**: the input is lowercased and scanned option by
//!   option, keyword by keyword. A keyword matches only as a whole word
//!   (`\b` on both sides, Unicode-aware), so `queso` matches "un queso curado"
//!   but not "quesos". The first option with any matching keyword wins.
//! - **Label resolution**: case-insensitive exact comparison against each
//!   option's label, as sent by a menu selection. Labels are not trimmed.
//!
//! Both resolvers are total. When nothing matches they pick a default reply,
//! and when a candidate list is empty they answer with `FALLBACK_RESPONSE`.
//! Every random pick goes through the caller's `Rng`, so a seeded `StdRng`
//! makes the output reproducible.
//!
use super::{BotOption, FALLBACK_RESPONSE};
use rand::{seq::SliceRandom, Rng};
use regex::Regex;
use tracing::{debug, trace, warn};

/// Compiled whole-word patterns for every keyword of a list of options.
///
/// Patterns are stored in scan order (option order, then keyword order), so the
/// first pattern that matches belongs to the first matching option.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    patterns: Vec<(usize, Regex)>,
}

impl KeywordMatcher {
    /// Compiles the keywords of `options`. Blank keywords are skipped.
    pub fn new(options: &[BotOption]) -> Self {
        let mut patterns = Vec::new();
        for (index, option) in options.iter().enumerate() {
            for keyword in &option.keywords {
                if let Some(pattern) = keyword_pattern(keyword) {
                    patterns.push((index, pattern));
                }
            }
        }
        debug!("Compiled {} keyword pattern(s)", patterns.len());
        Self { patterns }
    }

    /// Index of the first option with a keyword present in `input` as a whole word.
    pub fn find(&self, input: &str) -> Option<usize> {
        let input = input.to_lowercase();
        self.patterns
            .iter()
            .find(|(_, pattern)| pattern.is_match(&input))
            .map(|(index, pattern)| {
                trace!("Keyword pattern '{}' matched option #{}", pattern, index);
                *index
            })
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

fn keyword_pattern(keyword: &str) -> Option<Regex> {
    if keyword.trim().is_empty() {
        return None;
    }
    let keyword = keyword.to_lowercase();
    match Regex::new(&format!(r"\b{}\b", regex::escape(&keyword))) {
        Ok(pattern) => Some(pattern),
        Err(e) => {
            warn!("Skipping keyword '{}': {}", keyword, e);
            None
        }
    }
}

/// Resolves free text against the keywords of `options`.
pub fn resolve_by_keyword<R: Rng + ?Sized>(
    input: &str,
    options: &[BotOption],
    defaults: &[String],
    rng: &mut R,
) -> String {
    let matcher = KeywordMatcher::new(options);
    resolve_with_matcher(&matcher, input, options, defaults, rng)
}

/// Same as `resolve_by_keyword`, reusing patterns compiled for `options`.
pub fn resolve_with_matcher<R: Rng + ?Sized>(
    matcher: &KeywordMatcher,
    input: &str,
    options: &[BotOption],
    defaults: &[String],
    rng: &mut R,
) -> String {
    match matcher.find(input).and_then(|index| options.get(index)) {
        Some(option) => {
            debug!("Input matched option '{}'", option.label);
            option_response(option, defaults, rng)
        }
        None => {
            debug!("No keyword matched, using a default response");
            choose_response(defaults, rng)
        }
    }
}

/// First option whose label equals `label`, ignoring case.
pub fn find_option_by_label<'a>(label: &str, options: &'a [BotOption]) -> Option<&'a BotOption> {
    let wanted = label.to_lowercase();
    options.iter().find(|option| option.label.to_lowercase() == wanted)
}

/// Resolves a menu selection by its label.
pub fn resolve_by_label<R: Rng + ?Sized>(
    label: &str,
    options: &[BotOption],
    defaults: &[String],
    rng: &mut R,
) -> String {
    match find_option_by_label(label, options) {
        Some(option) => option_response(option, defaults, rng),
        None => {
            debug!("No option labelled '{}', using a default response", label);
            choose_response(defaults, rng)
        }
    }
}

fn option_response<R: Rng + ?Sized>(option: &BotOption, defaults: &[String], rng: &mut R) -> String {
    if option.responses.is_empty() {
        warn!("Option '{}' has no responses, using a default response", option.label);
        return choose_response(defaults, rng);
    }
    choose_response(&option.responses, rng)
}

fn choose_response<R: Rng + ?Sized>(candidates: &[String], rng: &mut R) -> String {
    candidates
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| FALLBACK_RESPONSE.to_string())
}
