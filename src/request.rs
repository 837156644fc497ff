//! Request and response envelopes for callers that expose the engine over a
//! JSON boundary.
//!
//! A request is `{"code": ..., "language": ...}`. A successful response is
//! `{"success": true, "analysis": {...}}`; failures carry an `error` string
//! and map to a 400 or 500 status.

use crate::core::errors::{AnalysisError, Result};
use crate::core::types::AnalysisResult;
use crate::pipeline::Analyzer;
use serde::{Deserialize, Serialize};

const MISSING_FIELDS: &str = "Code and language are required";
const INTERNAL_FAILURE: &str = "Internal server error during analysis";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

impl AnalysisRequest {
    pub fn new(code: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            language: Some(language.into()),
        }
    }

    pub fn analyze(&self) -> Result<AnalysisResult> {
        self.analyze_with(&Analyzer::new())
    }

    /// Missing code is [`AnalysisError::EmptyInput`]; a missing language is
    /// an unsupported (empty) language tag.
    pub fn analyze_with(&self, analyzer: &Analyzer) -> Result<AnalysisResult> {
        let code = self.code.as_deref().ok_or(AnalysisError::EmptyInput)?;
        let language = self.language.as_deref().unwrap_or_default();
        analyzer.analyze(code, language)
    }

    /// Runs the request and wraps the outcome. `detailed` adds the internal
    /// error text to 500 responses.
    pub fn respond(&self, analyzer: &Analyzer, detailed: bool) -> AnalysisResponse {
        AnalysisResponse::from_result(self.analyze_with(analyzer), detailed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisResponse {
    Success {
        success: bool,
        analysis: AnalysisResult,
    },
    Failure {
        error: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

impl AnalysisResponse {
    pub fn from_result(result: Result<AnalysisResult>, detailed: bool) -> Self {
        match result {
            Ok(analysis) => Self::Success {
                success: true,
                analysis,
            },
            Err(AnalysisError::EmptyInput) => Self::failure(MISSING_FIELDS, None),
            Err(AnalysisError::UnsupportedLanguage { language }) if language.trim().is_empty() => {
                Self::failure(MISSING_FIELDS, None)
            }
            Err(error) if error.is_client_error() => Self::failure(&error.to_string(), None),
            Err(error) => {
                log::error!("Analysis error: {error}");
                Self::failure(INTERNAL_FAILURE, detailed.then(|| error.to_string()))
            }
        }
    }

    fn failure(error: &str, message: Option<String>) -> Self {
        Self::Failure {
            error: error.to_string(),
            message,
        }
    }

    /// HTTP status a server would send with this body.
    pub fn status(&self) -> u16 {
        match self {
            Self::Success { .. } => 200,
            Self::Failure { error, .. } if error == INTERNAL_FAILURE => 500,
            Self::Failure { .. } => 400,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_deserializes_with_missing_fields() {
        let request: AnalysisRequest = serde_json::from_value(json!({"code": "x = 1"})).unwrap();
        assert_eq!(request.language, None);
        assert_eq!(
            request.analyze(),
            Err(AnalysisError::unsupported_language(""))
        );
    }

    #[test]
    fn test_missing_code_is_bad_request() {
        let request = AnalysisRequest {
            code: None,
            language: Some("python".into()),
        };
        let response = request.respond(&Analyzer::new(), false);
        assert_eq!(response.status(), 400);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"error": "Code and language are required"})
        );
    }

    #[test]
    fn test_unknown_language_is_bad_request() {
        let response = AnalysisRequest::new("x = 1", "cobol").respond(&Analyzer::new(), false);
        assert_eq!(response.status(), 400);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"error": "Unsupported language: 'cobol'"})
        );
    }

    #[test]
    fn test_success_envelope() {
        let response = AnalysisRequest::new("let total = 0;", "javascript").respond(&Analyzer::new(), false);
        assert!(response.is_success());
        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["analysis"]["complexity"]["time"], json!("O(1)"));
        assert!(body["analysis"]["codeQuality"]["metrics"]["readability"].is_u64());
    }

    #[test]
    fn test_internal_failure_hides_detail_unless_requested() {
        let error = AnalysisError::invariant("quality_scorer", "score 140 is outside 0..=100");
        let hidden = AnalysisResponse::from_result(Err(error.clone()), false);
        assert_eq!(hidden.status(), 500);
        assert_eq!(
            serde_json::to_value(&hidden).unwrap(),
            json!({"error": "Internal server error during analysis"})
        );
        let shown = AnalysisResponse::from_result(Err(error), true);
        match shown {
            AnalysisResponse::Failure { message, .. } => {
                assert!(message.unwrap().contains("quality_scorer"))
            }
            AnalysisResponse::Success { .. } => panic!("expected a failure"),
        }
    }
}
