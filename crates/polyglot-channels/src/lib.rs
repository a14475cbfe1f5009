//! # polyglot-channels
//!
//! Messaging platform integrations for Polyglot.

pub mod discord;
pub mod utils;
