//! Analysis service and HTTP API for the objectivity analyzer.
//!
//! [`Analyzer`] combines the bias detector, prompt rewriter and domain
//! classifier into one response per prompt, and routes AI-mode requests to an
//! [`LlmRewriter`](llm_rewriter::LlmRewriter).  [`create_router`] exposes it
//! over HTTP:
//!
//! ```text
//! Client  --JSON-->  axum router  -->  Analyzer  --> detector / rewriter / classifier
//!                                          |
//!                                     [LLM backend]   (mode = "ai")
//! ```
//!
//! Handlers hold no per-request state; the analyzer is built once and shared
//! behind an `Arc`.

pub mod analysis;
pub mod error;
pub mod routes;

pub use analysis::{
    AnalysisError, AnalysisMode, AnalysisRequest, AnalysisResponse, Analyzer, DetectionResponse,
    InitError,
};
pub use error::ApiError;
pub use routes::{create_router, serve, AppState};
