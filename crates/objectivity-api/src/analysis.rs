//! The analysis service: one request in, one combined response out.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use bias_detector::{BiasDetector, BiasReport, DetectorError};
use domain_classifier::{ClassifierError, Confidence, Domain, DomainClassifier, DomainResult};
use llm_rewriter::{LlmError, LlmRewriter, TextGenerator};
use prompt_rewriter::{suggest_alternatives, PromptRewriter, RewriterError};

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Which rewriting backend handles a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisMode {
    /// Rule-based detector and rewriter.
    #[default]
    #[serde(rename = "nlp", alias = "rules")]
    Rules,
    /// LLM backend.
    #[serde(rename = "ai")]
    Ai,
}

/// Body of an analyze or detect request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    /// Overrides the classified domain when set.
    #[serde(default)]
    pub domain: Option<Domain>,
    #[serde(default)]
    pub mode: AnalysisMode,
}

impl AnalysisRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
            ..Self::default()
        }
    }

    /// The prompt, rejecting a missing or blank one.
    pub fn prompt(&self) -> Result<&str, AnalysisError> {
        self.prompt
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .ok_or(AnalysisError::EmptyPrompt)
    }
}

/// Everything known about one analyzed prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub original_prompt: String,
    pub rewritten_prompt: String,
    pub bias_score: u32,
    pub biases_detected: BiasReport,
    pub changes_made: Vec<String>,
    pub alternative_suggestions: Vec<String>,
    pub domain: Domain,
    pub domain_confidence: Confidence,
    pub domain_scores: BTreeMap<Domain, u32>,
    pub mode: AnalysisMode,
    /// Model commentary; AI mode only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Detection without rewriting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionResponse {
    pub prompt: String,
    pub bias_score: u32,
    pub biases_detected: BiasReport,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors while building an [`Analyzer`].
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("bias detector: {0}")]
    Detector(#[from] DetectorError),
    #[error("prompt rewriter: {0}")]
    Rewriter(#[from] RewriterError),
    #[error("domain classifier: {0}")]
    Classifier(#[from] ClassifierError),
}

/// Per-request analysis failures.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("No prompt provided")]
    EmptyPrompt,
    #[error("AI mode is not available: no LLM backend is configured")]
    AiUnavailable,
    #[error("AI analysis failed: {0}")]
    Llm(#[from] LlmError),
}

// ---------------------------------------------------------------------------
// Analyzer
// ---------------------------------------------------------------------------

/// Owns the compiled detector, rewriter and classifier.
///
/// Immutable after construction; share it behind an `Arc`.
#[derive(Debug)]
pub struct Analyzer {
    detector: BiasDetector,
    rewriter: PromptRewriter,
    classifier: DomainClassifier,
}

impl Analyzer {
    pub fn new() -> Result<Self, InitError> {
        Ok(Self {
            detector: BiasDetector::new()?,
            rewriter: PromptRewriter::new()?,
            classifier: DomainClassifier::new()?,
        })
    }

    /// Route `request` by its mode.  AI mode without a backend is an error,
    /// never a silent switch to rules.
    pub async fn handle<G: TextGenerator>(
        &self,
        request: &AnalysisRequest,
        llm: Option<&LlmRewriter<G>>,
    ) -> Result<AnalysisResponse, AnalysisError> {
        match request.mode {
            AnalysisMode::Rules => self.analyze(request),
            AnalysisMode::Ai => {
                request.prompt()?;
                let llm = llm.ok_or(AnalysisError::AiUnavailable)?;
                self.analyze_with_llm(request, llm).await
            }
        }
    }

    /// Rule-based analysis.
    pub fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, AnalysisError> {
        let prompt = request.prompt()?;
        let request_id = Uuid::new_v4();

        let (domain, confidence, classified) = self.resolve_domain(prompt, request.domain);
        let report = self.detector.detect_biases(prompt);
        let bias_score = report.score();
        let rewrite = self.rewriter.rewrite(prompt, &report);

        info!(
            %request_id,
            mode = "nlp",
            %domain,
            bias_score,
            changes = rewrite.changes.len(),
            "prompt analyzed"
        );

        Ok(AnalysisResponse {
            original_prompt: rewrite.original,
            rewritten_prompt: rewrite.rewritten,
            bias_score,
            biases_detected: report,
            changes_made: rewrite.changes,
            alternative_suggestions: alternatives(domain),
            domain,
            domain_confidence: confidence,
            domain_scores: classified.scores,
            mode: AnalysisMode::Rules,
            explanation: None,
        })
    }

    /// Detection and scoring only.
    pub fn detect(&self, request: &AnalysisRequest) -> Result<DetectionResponse, AnalysisError> {
        let prompt = request.prompt()?;
        let report = self.detector.detect_biases(prompt);
        let bias_score = report.score();

        info!(
            request_id = %Uuid::new_v4(),
            bias_score,
            categories = report.detected_categories().len(),
            "prompt scanned"
        );

        Ok(DetectionResponse {
            prompt: prompt.to_string(),
            bias_score,
            biases_detected: report,
        })
    }

    /// AI-mode analysis.
    ///
    /// The rewrite, score, change log and explanation come from the model;
    /// domain and alternatives still come from the classifier.
    pub async fn analyze_with_llm<G: TextGenerator>(
        &self,
        request: &AnalysisRequest,
        llm: &LlmRewriter<G>,
    ) -> Result<AnalysisResponse, AnalysisError> {
        let prompt = request.prompt()?;
        let request_id = Uuid::new_v4();

        let (domain, confidence, classified) = self.resolve_domain(prompt, request.domain);
        let analysis = llm.rewrite(prompt, domain).await?;

        info!(
            %request_id,
            mode = "ai",
            %domain,
            bias_score = analysis.bias_score,
            changes = analysis.changes_made.len(),
            "prompt analyzed"
        );

        Ok(AnalysisResponse {
            original_prompt: prompt.to_string(),
            biases_detected: analysis.report(),
            rewritten_prompt: analysis.rewritten_prompt,
            bias_score: analysis.bias_score,
            changes_made: analysis.changes_made,
            alternative_suggestions: alternatives(domain),
            domain,
            domain_confidence: confidence,
            domain_scores: classified.scores,
            mode: AnalysisMode::Ai,
            explanation: Some(analysis.explanation),
        })
    }

    /// Classified domain, or the override with high confidence.
    fn resolve_domain(
        &self,
        prompt: &str,
        requested: Option<Domain>,
    ) -> (Domain, Confidence, DomainResult) {
        let classified = self.classifier.detect_domain(prompt);
        match requested {
            Some(domain) => (domain, Confidence::High, classified),
            None => (classified.domain, classified.confidence, classified),
        }
    }
}

fn alternatives(domain: Domain) -> Vec<String> {
    suggest_alternatives(domain)
        .iter()
        .map(|s| s.to_string())
        .collect()
}
