//! # polyglot-providers
//!
//! Translation provider implementations for Polyglot.

pub mod libretranslate;
