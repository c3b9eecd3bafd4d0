/// Errors from the LLM rewriting backend.
///
/// Call-time failures are split by where they happened: the request never
/// completed, the provider answered with a non-success status, or the answer
/// could not be understood.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("API key not set: environment variable {0} is missing or empty")]
    MissingApiKey(String),

    #[error("LLM request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("LLM provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not parse LLM response: {0}")]
    MalformedResponse(String),
}

impl LlmError {
    /// Short label for logs and API error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingApiKey(_) => "missing_api_key",
            Self::Transport(_) => "transport",
            Self::Status { .. } => "status",
            Self::MalformedResponse(_) => "malformed_response",
        }
    }
}
