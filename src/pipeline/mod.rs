//! The analysis pipeline.
//!
//! `analyze` is a pure function of `(source, language)`: it tokenizes, detects
//! structures, estimates complexity, scores quality and generates suggestions,
//! strictly in that order. Each stage reads only what earlier stages produced.
//! Unterminated literals or comments do not abort the run; the result is
//! returned with `partial` set and the damage listed in `malformed`.

pub mod invariants;
pub mod stage;

pub use stage::Stage;

use crate::complexity::{estimate_from_flow, ControlFlow};
use crate::config::AnalyzerConfig;
use crate::core::errors::{AnalysisError, Result};
use crate::core::lines::LineIndex;
use crate::core::syntax::Syntax;
use crate::core::types::AnalysisResult;
use crate::languages::ProfileRegistry;
use crate::observability::set_language;
use crate::quality;
use crate::structures::detect_structures;
use crate::suggestions::{suggest, SuggestionFacts};
use crate::tokenizer::tokenize;
use std::sync::Arc;

/// Configured analysis engine. Cheap to clone and safe to share between
/// threads; every call to [`Analyzer::analyze`] is independent.
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalyzerConfig,
    registry: Arc<ProfileRegistry>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    /// Default configuration and the builtin languages.
    pub fn new() -> Self {
        Self {
            config: AnalyzerConfig::default(),
            registry: ProfileRegistry::shared(),
        }
    }

    pub fn with_config(mut self, config: AnalyzerConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the language table, e.g. with one that registers extra
    /// profiles on top of [`ProfileRegistry::builtin`].
    pub fn with_registry(mut self, registry: ProfileRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn registry(&self) -> &ProfileRegistry {
        &self.registry
    }

    pub fn analyze(&self, source: &str, language: &str) -> Result<AnalysisResult> {
        if source.trim().is_empty() {
            return Err(AnalysisError::EmptyInput);
        }
        let profile = self
            .registry
            .get(language)
            .ok_or_else(|| AnalysisError::unsupported_language(language))?;
        let _language = set_language(profile.name);
        let _span = tracing::debug_span!("analyze", language = profile.name, bytes = source.len())
            .entered();

        let stream = Stage::TOKENIZE.run(|| tokenize(source, profile));
        if stream.is_partial() {
            for damage in &stream.malformed {
                log::warn!("Continuing with a partial result: {damage}");
            }
        }
        let lines = LineIndex::new(source);
        let syntax = Stage::TOKENIZE.run(|| Syntax::new(&stream.tokens, &lines, profile));

        let data_structures = Stage::DETECT.run(|| detect_structures(&syntax));
        Stage::DETECT.verify(invariants::check_structures(&data_structures))?;

        let (flow, complexity) = Stage::ESTIMATE.run(|| {
            let flow = ControlFlow::extract(&syntax, &data_structures);
            let complexity = estimate_from_flow(&flow, &data_structures);
            (flow, complexity)
        });
        Stage::ESTIMATE.verify(invariants::check_complexity(&complexity))?;

        let assessment = Stage::SCORE.run(|| quality::assess(&syntax, &complexity, &self.config));
        Stage::SCORE.verify(invariants::check_quality(&assessment.quality))?;

        let max_suggestions = self.config.suggestions.max_suggestions;
        let suggestions = Stage::SUGGEST.run(|| {
            let facts = SuggestionFacts::derive(
                &syntax,
                &flow,
                &data_structures,
                &complexity,
                &assessment.signals,
                &self.config.thresholds,
            );
            suggest(&facts, max_suggestions)
        });
        Stage::SUGGEST.verify(invariants::check_suggestions(&suggestions, max_suggestions))?;

        log::debug!(
            "Analysed {} tokens: {} structures, time {}, space {}, score {}",
            stream.tokens.len(),
            data_structures.len(),
            complexity.time_class,
            complexity.space_class,
            assessment.quality.score
        );

        Ok(AnalysisResult {
            data_structures,
            complexity,
            suggestions,
            code_quality: assessment.quality,
            partial: stream.is_partial(),
            malformed: stream.malformed,
        })
    }
}

/// Analyses `source` with the default configuration and builtin languages.
pub fn analyze(source: &str, language: &str) -> Result<AnalysisResult> {
    Analyzer::new().analyze(source, language)
}
