//! Named pipeline stages.
//!
//! A stage ties a step of the analysis to its observability phase and to the
//! name reported when one of its contract checks fails.

use crate::core::errors::AnalysisError;
use crate::observability::{set_phase, AnalysisPhase};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    pub name: &'static str,
    pub phase: AnalysisPhase,
}

impl Stage {
    pub const TOKENIZE: Stage = Stage::new("tokenizer", AnalysisPhase::Tokenizing);
    pub const DETECT: Stage = Stage::new("structure_detector", AnalysisPhase::StructureDetection);
    pub const ESTIMATE: Stage = Stage::new("complexity_estimator", AnalysisPhase::ComplexityEstimation);
    pub const SCORE: Stage = Stage::new("quality_scorer", AnalysisPhase::QualityScoring);
    pub const SUGGEST: Stage = Stage::new("suggestion_generator", AnalysisPhase::SuggestionGeneration);

    /// Execution order; each stage sees only the outputs of earlier ones.
    pub const ORDER: [Stage; 5] = [
        Self::TOKENIZE,
        Self::DETECT,
        Self::ESTIMATE,
        Self::SCORE,
        Self::SUGGEST,
    ];

    pub const fn new(name: &'static str, phase: AnalysisPhase) -> Self {
        Self { name, phase }
    }

    /// Runs `work` with this stage's phase and span active.
    pub fn run<T>(self, work: impl FnOnce() -> T) -> T {
        let _phase = set_phase(self.phase);
        let _span = tracing::debug_span!("stage", name = self.name).entered();
        work()
    }

    /// Turns a failed contract check into an `InternalInvariant` error.
    pub fn verify(self, check: Result<(), String>) -> Result<(), AnalysisError> {
        check.map_err(|message| {
            let error = AnalysisError::invariant(self.name, message);
            log::error!("{error}");
            error
        })
    }
}
