//! Model access for the daily digest
//!
//! One web-search-enabled request to the Anthropic Messages API per run.
//! The prompt asks for a pipe-delimited list that `digest::parser` understands.

mod client;
pub mod prompts;

pub use client::AnthropicClient;
