//! Text generation backends.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::LlmError;

/// Default Gemini model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default Gemini REST endpoint for model calls.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Environment variable the API key is read from unless configured otherwise.
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Something that turns an instruction into free text.
///
/// [`GeminiClient`] is the production implementation; tests substitute a
/// canned generator.
pub trait TextGenerator: Send + Sync {
    /// Generate a reply for `instruction`.
    fn generate(&self, instruction: &str) -> impl Future<Output = Result<String, LlmError>> + Send;
}

// ---------------------------------------------------------------------------
// Gemini
// ---------------------------------------------------------------------------

/// Connection and sampling settings for [`GeminiClient`].
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    /// Without trailing slash.
    pub base_url: String,
    pub timeout: Duration,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
}

impl GeminiConfig {
    /// Defaults with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            temperature: 0.3,
            top_p: 0.8,
            top_k: 40,
        }
    }

    /// Defaults with the API key read from the environment variable `var`.
    pub fn from_env(var: &str) -> Result<Self, LlmError> {
        std::env::var(var)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(Self::new)
            .ok_or_else(|| LlmError::MissingApiKey(var.to_string()))
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .field("top_k", &self.top_k)
            .finish()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

/// Client for Gemini's `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Build a client whose requests time out after `config.timeout`.
    pub fn new(mut config: GeminiConfig) -> Result<Self, LlmError> {
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Endpoint without the key query parameter, safe to log.
    fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    fn request_body<'a>(&self, instruction: &'a str) -> GenerateRequest<'a> {
        GenerateRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: instruction }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                top_p: self.config.top_p,
                top_k: self.config.top_k,
            },
        }
    }
}

impl TextGenerator for GeminiClient {
    async fn generate(&self, instruction: &str) -> Result<String, LlmError> {
        let endpoint = self.endpoint();
        let url = format!("{endpoint}?key={}", self.config.api_key);

        info!(endpoint = %endpoint, "requesting rewrite from Gemini");
        let resp = self
            .client
            .post(&url)
            .json(&self.request_body(instruction))
            .send()
            .await
            .map_err(redact)?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await.map_err(redact)?;
        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;
        let text = parsed
            .into_text()
            .ok_or_else(|| LlmError::MalformedResponse("reply has no candidate text".into()))?;

        debug!(chars = text.chars().count(), "Gemini reply received");
        Ok(text)
    }
}

/// The request URL carries the API key; keep it out of error messages.
fn redact(err: reqwest::Error) -> LlmError {
    LlmError::Transport(err.without_url())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_matches_generate_content_shape() {
        let client = GeminiClient::new(GeminiConfig::new("k")).unwrap();
        let body = serde_json::to_value(client.request_body("hello")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "contents": [{ "parts": [{ "text": "hello" }] }],
                "generationConfig": { "temperature": 0.3_f32, "topP": 0.8_f32, "topK": 40 }
            })
        );
    }

    #[test]
    fn endpoint_uses_model_and_trims_base_url() {
        let mut config = GeminiConfig::new("secret");
        config.base_url = "http://localhost:9000/models/".into();
        config.model = "test-model".into();
        let client = GeminiClient::new(config).unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:9000/models/test-model:generateContent"
        );
        assert!(!client.endpoint().contains("secret"));
    }

    #[test]
    fn defaults_follow_provider_settings() {
        let config = GeminiConfig::new("k");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.top_k, 40);
    }

    #[test]
    fn debug_output_hides_api_key() {
        let rendered = format!("{:?}", GeminiConfig::new("super-secret"));
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("gemini-2.5-flash"));
    }

    #[test]
    fn missing_env_key_is_reported_by_name() {
        let err = GeminiConfig::from_env("OBJECTIVITY_TEST_KEY_THAT_IS_NEVER_SET").unwrap_err();
        match err {
            LlmError::MissingApiKey(var) => {
                assert_eq!(var, "OBJECTIVITY_TEST_KEY_THAT_IS_NEVER_SET")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn candidate_text_is_extracted() {
        let parsed: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"a\":1}"}],"role":"model"}}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.into_text().as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn empty_candidates_yield_no_text() {
        let parsed: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(parsed.into_text().is_none());
        let blocked: GenerateResponse =
            serde_json::from_str(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap();
        assert!(blocked.into_text().is_none());
    }
}
