//! `chat-client` — blocking driver for OpenAI-compatible chat completions.
//!
//! The lesson tooling treats the language model as an opaque boundary: a
//! system prompt and a user prompt go in, completion text comes out, or a
//! typed [`ChatError`] explains why not. This crate is that boundary and
//! nothing more. It does not retry, stream, or cache.
//!
//! # Architecture
//!
//! ```text
//! ChatRequest      ← model, system + user messages, optional JSON hint
//!     │
//!     ▼
//! ChatClient       ← POST {api_base}/chat/completions with a bearer token
//!     │              maps 401/403 → Auth, other non-2xx → Status
//!     ▼
//! ChatResponse     ← typed `choices[].message.content`
//! ```
//!
//! # Quick start
//!
//! ```rust,ignore
//! use chat_client::{ChatClient, ChatMessage, ChatRequest, ResponseFormat};
//!
//! let client = ChatClient::new(std::env::var("OPENAI_API_KEY")?)?;
//! let request = ChatRequest::new("gpt-4o")
//!     .message(ChatMessage::system("You are terse."))
//!     .message(ChatMessage::user("Reply with a JSON object."))
//!     .response_format(ResponseFormat::JsonObject);
//!
//! let text = client.complete(&request)?;
//! ```

pub mod client;
pub mod error;
pub mod types;


pub use client::{ChatClient, ChatClientBuilder, DEFAULT_API_BASE};
pub use error::ChatError;
pub use types::{
    ChatMessage, ChatRequest, ChatResponse, Choice, ResponseFormat, ResponseMessage, Role, Usage,
};

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, ChatError>;
