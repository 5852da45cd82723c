//! # CharcuBot Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the infrastructure shared by every command:
//! - `config`: Settings loading, merging, and validation
//! - `error`: Error types and the crate-wide `Result` alias
//!
//! ## Usage
//!
//! ```rust
//! use charcubot::core::config; // For loading settings
//! use charcubot::core::error::{CharcuError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
