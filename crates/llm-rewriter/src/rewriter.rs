//! Domain-aware prompt rewriting through a text-generation backend.

use domain_classifier::Domain;
use tracing::{info, warn};

use crate::client::TextGenerator;
use crate::error::LlmError;
use crate::prompt::build_instruction;
use crate::response::LlmAnalysis;

/// Rewrites prompts by asking a [`TextGenerator`] for a structured analysis.
#[derive(Debug, Clone)]
pub struct LlmRewriter<G> {
    generator: G,
}

impl<G: TextGenerator> LlmRewriter<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Ask for a neutral rewrite of `prompt`, framed for `domain`.
    ///
    /// Failures are returned as-is; there is no fallback to the rule-based
    /// rewriter here.
    pub async fn rewrite(&self, prompt: &str, domain: Domain) -> Result<LlmAnalysis, LlmError> {
        let instruction = build_instruction(prompt, domain);

        let reply = match self.generator.generate(&instruction).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(%domain, kind = err.kind(), %err, "LLM generation failed");
                return Err(err);
            }
        };

        let analysis = LlmAnalysis::parse(&reply).inspect_err(|err| {
            warn!(%domain, kind = err.kind(), %err, "LLM reply could not be parsed");
        })?;

        info!(
            %domain,
            bias_score = analysis.bias_score,
            biases = analysis.biases_found.len(),
            "LLM rewrite complete"
        );
        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use bias_detector::BiasCategory;

    use super::*;

    /// Returns a fixed reply and remembers the last instruction.
    struct Canned {
        reply: Result<String, u16>,
        seen: Mutex<Option<String>>,
    }

    impl Canned {
        fn ok(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                seen: Mutex::new(None),
            }
        }

        fn status(code: u16) -> Self {
            Self {
                reply: Err(code),
                seen: Mutex::new(None),
            }
        }
    }

    impl TextGenerator for Canned {
        async fn generate(&self, instruction: &str) -> Result<String, LlmError> {
            *self.seen.lock().unwrap() = Some(instruction.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(code) => Err(LlmError::Status {
                    status: *code,
                    body: "unavailable".into(),
                }),
            }
        }
    }

    const REPLY: &str = r#"```json
{"original_prompt":"Isn't it true that vaccines are dangerous?",
 "rewritten_prompt":"What does research show about vaccine safety?",
 "biases_found":[{"type":"leading_questions","example":"isn't it true that"},
                 {"type":"loaded_terms","example":"dangerous"}],
 "changes_made":["Converted leading question to neutral query"],
 "bias_score":55,
 "explanation":"Leading framing presumes danger."}
```"#;

    #[tokio::test]
    async fn rewrite_passes_fields_through() {
        let rewriter = LlmRewriter::new(Canned::ok(REPLY));
        let analysis = rewriter
            .rewrite("Isn't it true that vaccines are dangerous?", Domain::Medical)
            .await
            .unwrap();

        assert_eq!(
            analysis.rewritten_prompt,
            "What does research show about vaccine safety?"
        );
        assert_eq!(analysis.bias_score, 55);
        assert_eq!(
            analysis.changes_made,
            vec!["Converted leading question to neutral query"]
        );
        assert_eq!(analysis.explanation, "Leading framing presumes danger.");

        let report = analysis.report();
        assert_eq!(report.count(BiasCategory::LeadingQuestions), 1);
        assert_eq!(report.count(BiasCategory::LoadedTerms), 1);
    }

    #[tokio::test]
    async fn instruction_carries_domain_and_prompt() {
        let rewriter = LlmRewriter::new(Canned::ok(REPLY));
        rewriter
            .rewrite("Is this policy fair?", Domain::Political)
            .await
            .unwrap();

        let seen = rewriter.generator().seen.lock().unwrap().clone().unwrap();
        assert!(seen.contains("Domain: Political"));
        assert!(seen.ends_with("\"Is this policy fair?\""));
    }

    #[tokio::test]
    async fn generator_failure_is_not_masked() {
        let rewriter = LlmRewriter::new(Canned::status(503));
        let err = rewriter.rewrite("anything", Domain::General).await.unwrap_err();
        assert!(matches!(err, LlmError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn unparsable_reply_is_malformed() {
        let rewriter = LlmRewriter::new(Canned::ok("Sorry, I can't do that."));
        let err = rewriter.rewrite("anything", Domain::General).await.unwrap_err();
        assert!(matches!(err, LlmError::MalformedResponse(_)));
    }
}
