//! # CharcuBot CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`: a handle on the
//! compiled `charcubot` binary and a temporary shop directory holding a known
//! responses file. Commands built with `shop_cmd` run inside that directory
//! with an empty config home, so settings on the developer's machine cannot
//! leak into the tests.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Responses used by the CLI tests. Every option but "Embutidos" has a single
/// response so replies are predictable without a seed.
pub const SHOP_RESPONSES: &str = r#"{
  "opciones": [
    {
      "label": "Jamón Ibérico",
      "keywords": ["jamón", "ibérico", "bellota"],
      "responses": ["Nuestro jamón ibérico de bellota cuesta 89 €/kg."]
    },
    {
      "label": "Quesos",
      "keywords": ["queso", "manchego"],
      "responses": ["Tenemos Manchego curado y Torta del Casar."]
    },
    {
      "label": "Embutidos",
      "keywords": ["chorizo", "salchichón", "lomo"],
      "responses": ["Chorizo de Cantimpalos.", "Salchichón de Vic.", "Lomo embuchado.", "Fuet artesano."]
    },
    {
      "label": "Horario",
      "keywords": ["horario", "abren", "cierran"],
      "responses": ["Abrimos de lunes a sábado, de 9:00 a 20:00."]
    }
  ],
  "default_responses": ["Lo siento, no tengo una respuesta para eso."]
}
"#;

/// Temporary working directory containing `responses.json`.
pub struct Shop {
    pub dir: TempDir,
}

impl Shop {
    pub fn new() -> Self {
        Self::with_responses(SHOP_RESPONSES)
    }

    pub fn with_responses(content: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp shop dir");
        fs::write(dir.path().join("responses.json"), content).expect("Failed to write responses");
        Self { dir }
    }

    pub fn responses_path(&self) -> PathBuf {
        self.dir.path().join("responses.json")
    }
}

/// # Get CharcuBot Command (`charcubot_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `charcubot` binary.
///
/// ## Panics
/// Panics if the binary cannot be found via `Command::cargo_bin`.
pub fn charcubot_cmd() -> Command {
    Command::cargo_bin("charcubot").expect("Failed to find charcubot binary for testing")
}

/// `charcubot` running inside `shop.dir` with no user or project settings.
pub fn shop_cmd(shop: &Shop) -> Command {
    let mut cmd = charcubot_cmd();
    cmd.current_dir(shop.dir.path())
        .env("HOME", shop.dir.path())
        .env("XDG_CONFIG_HOME", shop.dir.path().join("config"))
        .env_remove("CHARCUBOT_RESPONSES")
        .env_remove("RUST_LOG");
    cmd
}
