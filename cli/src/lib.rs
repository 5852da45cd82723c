//! # CharcuBot Library
//!
//! File: cli/src/lib.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Library half of the `charcubot` crate. The binary (`main.rs`) only parses
//! arguments and dispatches; everything else lives here so integration tests
//! in `cli/tests/` can use the response store and resolvers directly.
//!
//! - `responses`: Response store, keyword/label resolvers, `Chatbot` facade
//! - `commands`: One module per subcommand (`chat`, `ask`, `pick`, ...)
//! - `core`: Settings and error types
//!
pub mod commands;
pub mod core;
pub mod responses;
