use serde::{Deserialize, Serialize};

use super::scoring::QualityWeights;
use super::thresholds::Thresholds;

/// Root configuration structure for algoscope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AnalyzerConfig {
    /// Metric weights for the overall quality score
    #[serde(default)]
    pub quality: QualityWeights,

    /// Scoring and suggestion thresholds
    #[serde(default)]
    pub thresholds: Thresholds,

    /// Suggestion output settings
    #[serde(default)]
    pub suggestions: SuggestionConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionConfig {
    /// Suggestions kept after ranking
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            max_suggestions: default_max_suggestions(),
        }
    }
}

pub fn default_max_suggestions() -> usize {
    10
}

impl AnalyzerConfig {
    pub fn with_max_suggestions(mut self, max_suggestions: usize) -> Self {
        self.suggestions.max_suggestions = max_suggestions;
        self
    }
}
