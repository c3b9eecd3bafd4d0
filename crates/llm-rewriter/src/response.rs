//! Parsing the generator's reply into a structured analysis.

use serde::{Deserialize, Serialize};

use bias_detector::{BiasCategory, BiasMatch, BiasReport};

use crate::error::LlmError;

/// One bias the model reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmBias {
    /// Category name as the model wrote it.
    #[serde(rename = "type")]
    pub kind: String,
    /// Text from the prompt that shows the bias.
    #[serde(default)]
    pub example: String,
}

/// The JSON object the instruction asks the model to return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmAnalysis {
    #[serde(default)]
    pub original_prompt: String,
    pub rewritten_prompt: String,
    #[serde(default)]
    pub biases_found: Vec<LlmBias>,
    #[serde(default)]
    pub changes_made: Vec<String>,
    #[serde(default)]
    pub bias_score: u32,
    #[serde(default)]
    pub explanation: String,
}

impl LlmAnalysis {
    /// Parse the raw reply text.
    ///
    /// Models often wrap the object in markdown fences or prose, so the span
    /// from the first `{` to the last `}` is what gets parsed.
    pub fn parse(reply: &str) -> Result<Self, LlmError> {
        let json = extract_object(reply)
            .ok_or_else(|| LlmError::MalformedResponse("no JSON object in reply".into()))?;
        serde_json::from_str(json).map_err(|e| LlmError::MalformedResponse(e.to_string()))
    }

    /// Map the reported biases onto the fixed category set.
    ///
    /// Unknown type names land in `subjective_language`.  The model gives no
    /// offsets, so every match sits at position 0.
    pub fn report(&self) -> BiasReport {
        let mut report = BiasReport::empty();
        for bias in &self.biases_found {
            let category =
                BiasCategory::from_name(&bias.kind).unwrap_or(BiasCategory::SubjectiveLanguage);
            report.push(category, BiasMatch::whole_text(bias.example.clone(), &bias.example));
        }
        report
    }
}

fn extract_object(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    (start < end).then(|| &reply[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    const FENCED: &str = r#"Here is the analysis:
```json
{
  "original_prompt": "Obviously this is terrible",
  "rewritten_prompt": "What are the effects of this?",
  "biases_found": [
    {"type": "subjective_language", "example": "obviously"},
    {"type": "loaded_terms", "example": "terrible"},
    {"type": "emotional_appeal", "example": "this"}
  ],
  "changes_made": ["Removed subjective qualifier 'obviously'"],
  "bias_score": 64,
  "explanation": "Subjective framing and loaded terms."
}
```"#;

    #[test]
    fn parses_object_inside_markdown_fence() {
        let analysis = LlmAnalysis::parse(FENCED).unwrap();
        assert_eq!(analysis.rewritten_prompt, "What are the effects of this?");
        assert_eq!(analysis.bias_score, 64);
        assert_eq!(analysis.biases_found.len(), 3);
        assert_eq!(analysis.changes_made.len(), 1);
    }

    #[test]
    fn unknown_types_default_to_subjective_language() {
        let report = LlmAnalysis::parse(FENCED).unwrap().report();
        let subjective = report.get(BiasCategory::SubjectiveLanguage);
        assert_eq!(subjective.len(), 2);
        assert_eq!(subjective[1].term, "this");
        assert_eq!(report.count(BiasCategory::LoadedTerms), 1);
        assert_eq!(report.iter().count(), 6);
    }

    #[test]
    fn mapped_matches_sit_at_zero_with_char_length() {
        let analysis = LlmAnalysis {
            original_prompt: String::new(),
            rewritten_prompt: String::new(),
            biases_found: vec![LlmBias {
                kind: "absolutist_language".into(),
                example: "jamás".into(),
            }],
            changes_made: Vec::new(),
            bias_score: 0,
            explanation: String::new(),
        };
        let report = analysis.report();
        let found = &report.get(BiasCategory::AbsolutistLanguage)[0];
        assert_eq!(found.position, 0);
        assert_eq!(found.length, 5);
    }

    #[test]
    fn reply_without_object_is_malformed() {
        let err = LlmAnalysis::parse("I cannot help with that.").unwrap_err();
        assert!(matches!(err, LlmError::MalformedResponse(_)));
    }

    #[test]
    fn reply_with_broken_json_is_malformed() {
        let err = LlmAnalysis::parse("{\"rewritten_prompt\": }").unwrap_err();
        assert!(matches!(err, LlmError::MalformedResponse(_)));
    }

    #[test]
    fn missing_rewrite_is_malformed() {
        let err = LlmAnalysis::parse(r#"{"bias_score": 10}"#).unwrap_err();
        assert!(matches!(err, LlmError::MalformedResponse(_)));
    }

    #[test]
    fn optional_fields_default() {
        let analysis = LlmAnalysis::parse(r#"{"rewritten_prompt": "What is X?"}"#).unwrap();
        assert_eq!(analysis.bias_score, 0);
        assert!(analysis.biases_found.is_empty());
        assert!(analysis.report().is_clean());
    }
}
