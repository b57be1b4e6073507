//! Chat model backends for skybrief.
//!
//! All providers implement the `skybrief_core::Provider` trait.

pub mod anthropic;

pub use anthropic::AnthropicProvider;
