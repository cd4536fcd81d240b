//! Chat-completion request assembly for persona prompts.
//!
//! This crate sits between the prompt builder and whatever sends requests:
//! it shapes the JSON body (messages plus optional stop sequences) and reads
//! replies back out of response bodies. It performs no network I/O.
//!
//! # Example
//! ```
//! use persona_llm::ChatRequest;
//! use persona_prompt::parse_spec;
//!
//! # fn example() -> Result<(), persona_core::AppError> {
//! let spec = parse_spec("persona: You are Mira.\n");
//! let body = ChatRequest::from_spec("deepseek-chat", Some(&spec), &["user"], &["Hello!"])?
//!     .with_temperature(0.7)
//!     .to_json()?;
//! println!("{}", body);
//! # Ok(())
//! # }
//! ```

pub mod request;
pub mod response;

// Re-export main types
pub use request::{validate_transcript, ChatRequest};
pub use response::{extract_reply, stream_delta};
