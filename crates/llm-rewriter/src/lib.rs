//! # llm-rewriter
//!
//! LLM-backed prompt rewriting ("AI mode").
//!
//! A [`TextGenerator`] turns an instruction into text.  [`LlmRewriter`]
//! builds the instruction for a prompt and domain, sends it, and parses the
//! reply into an [`LlmAnalysis`], whose biases can be mapped back onto the
//! rule-based [`BiasReport`](bias_detector::BiasReport) categories.
//!
//! [`GeminiClient`] talks to Google's Gemini `generateContent` endpoint.

pub mod client;
pub mod error;
pub mod prompt;
pub mod response;
pub mod rewriter;

pub use client::{
    GeminiClient, GeminiConfig, TextGenerator, DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL,
    DEFAULT_MODEL,
};
pub use error::LlmError;
pub use response::{LlmAnalysis, LlmBias};
pub use rewriter::LlmRewriter;
