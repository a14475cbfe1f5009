//! # polyglot-core
//!
//! Core types, traits, configuration, and error handling for the Polyglot bot.

pub mod config;
pub mod error;
pub mod languages;
pub mod message;
pub mod traits;
