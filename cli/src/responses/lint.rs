//! # CharcuBot Responses Lint
//!
//! File: cli/src/responses/lint.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Content checks for a loaded `ResponseConfig`. None of these problems stop
//! the chatbot from answering (the resolvers fall back to defaults), but they
//! usually mean an option in `data/responses.json` will never be reached or
//! will never say anything of its own.
//!
use super::ResponseConfig;
use std::fmt;

/// A non-fatal problem found in the responses file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintWarning {
    /// Option has no label, so it never appears in the menu.
    BlankLabel { index: usize },
    /// Option cannot be reached from free text.
    NoKeywords { label: String },
    /// Keyword that is empty or only whitespace.
    BlankKeyword { label: String },
    /// Option answers with a default response.
    NoResponses { label: String },
    /// Label already used by an earlier option; selecting it reaches the first one.
    DuplicateLabel {
        label: String,
        first: usize,
        duplicate: usize,
    },
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintWarning::BlankLabel { index } => {
                write!(f, "option #{} has no label and will not be shown in the menu", index + 1)
            }
            LintWarning::NoKeywords { label } => {
                write!(f, "option '{}' has no keywords and can only be reached from the menu", label)
            }
            LintWarning::BlankKeyword { label } => {
                write!(f, "option '{}' has a blank keyword that never matches", label)
            }
            LintWarning::NoResponses { label } => {
                write!(f, "option '{}' has no responses and will answer with a default response", label)
            }
            LintWarning::DuplicateLabel {
                label,
                first,
                duplicate,
            } => write!(
                f,
                "option #{} repeats the label '{}' of option #{} and cannot be selected",
                duplicate + 1,
                label,
                first + 1
            ),
        }
    }
}

/// Collects content warnings for `config`, in option order.
pub fn lint(config: &ResponseConfig) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    let mut seen_labels: Vec<(String, usize)> = Vec::new();

    for (index, option) in config.options.iter().enumerate() {
        if !option.has_label() {
            warnings.push(LintWarning::BlankLabel { index });
        } else {
            let folded = option.label.to_lowercase();
            match seen_labels.iter().find(|(label, _)| *label == folded) {
                Some((_, first)) => warnings.push(LintWarning::DuplicateLabel {
                    label: option.label.clone(),
                    first: *first,
                    duplicate: index,
                }),
                None => seen_labels.push((folded, index)),
            }
        }

        if option.keywords.is_empty() {
            warnings.push(LintWarning::NoKeywords {
                label: option.label.clone(),
            });
        } else if option.keywords.iter().any(|k| k.trim().is_empty()) {
            warnings.push(LintWarning::BlankKeyword {
                label: option.label.clone(),
            });
        }

        if option.responses.is_empty() {
            warnings.push(LintWarning::NoResponses {
                label: option.label.clone(),
            });
        }
    }

    warnings
}
