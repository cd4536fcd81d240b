//! Persona prompt system.
//!
//! This crate turns persona files into chat messages:
//! - A lenient parser for a small YAML subset (`parser`)
//! - System prompt and message assembly (`builder`)
//! - Loading persona files from disk (`loader`)

pub mod builder;
pub mod loader;
pub mod parser;
pub mod types;

// Re-export main types
pub use builder::{attach_stop, build_messages, build_system_prompt, TTS_DIRECTIVE};
pub use loader::{list_specs, load_spec};
pub use parser::parse_spec;
pub use types::{ChatMessage, FewShotExample, PromptSpec};
