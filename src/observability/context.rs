//! Thread-local context tracking for crash reports.
//!
//! Each thread records the pipeline phase, the input being analysed and its
//! language. Rayon workers in the CLI each carry their own context. Input
//! progress across threads lives in atomic counters.

use std::cell::RefCell;
use std::sync::atomic::{AtomicUsize, Ordering};

static INPUTS_PROCESSED: AtomicUsize = AtomicUsize::new(0);
static INPUTS_TOTAL: AtomicUsize = AtomicUsize::new(0);

thread_local! {
    static CURRENT_CONTEXT: RefCell<AnalysisContext> = const { RefCell::new(AnalysisContext::new()) };
}

/// What this thread was doing when a crash report was requested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisContext {
    pub phase: Option<AnalysisPhase>,
    /// Path (or `<stdin>`) of the input being analysed
    pub current_input: Option<String>,
    pub language: Option<&'static str>,
}

impl AnalysisContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: None,
            current_input: None,
            language: None,
        }
    }
}

/// Pipeline stages plus the CLI steps around them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisPhase {
    Tokenizing,
    StructureDetection,
    ComplexityEstimation,
    QualityScoring,
    SuggestionGeneration,
    OutputGeneration,
}

impl std::fmt::Display for AnalysisPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tokenizing => write!(f, "tokenizing"),
            Self::StructureDetection => write!(f, "structure_detection"),
            Self::ComplexityEstimation => write!(f, "complexity_estimation"),
            Self::QualityScoring => write!(f, "quality_scoring"),
            Self::SuggestionGeneration => write!(f, "suggestion_generation"),
            Self::OutputGeneration => write!(f, "output_generation"),
        }
    }
}

/// Restores the previous context on drop, so guards nest.
pub struct ContextGuard {
    previous: AnalysisContext,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CURRENT_CONTEXT.with(|ctx| {
            *ctx.borrow_mut() = self.previous.clone();
        });
    }
}

fn update(change: impl FnOnce(&mut AnalysisContext)) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        change(&mut ctx.borrow_mut());
        ContextGuard { previous }
    })
}

/// Set the current phase until the guard drops.
///
/// ```ignore
/// let _phase = set_phase(AnalysisPhase::Tokenizing);
/// ```
#[must_use]
pub fn set_phase(phase: AnalysisPhase) -> ContextGuard {
    update(|ctx| ctx.phase = Some(phase))
}

#[must_use]
pub fn set_current_input(input: impl Into<String>) -> ContextGuard {
    let input = input.into();
    update(|ctx| ctx.current_input = Some(input))
}

#[must_use]
pub fn set_language(language: &'static str) -> ContextGuard {
    update(|ctx| ctx.language = Some(language))
}

pub fn set_progress(processed: usize, total: usize) {
    INPUTS_PROCESSED.store(processed, Ordering::Relaxed);
    INPUTS_TOTAL.store(total, Ordering::Relaxed);
}

/// Safe to call from parallel iterators.
pub fn increment_processed() {
    INPUTS_PROCESSED.fetch_add(1, Ordering::Relaxed);
}

#[must_use]
pub fn get_current_context() -> AnalysisContext {
    CURRENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

/// `(processed, total)` inputs.
#[must_use]
pub fn get_progress() -> (usize, usize) {
    (
        INPUTS_PROCESSED.load(Ordering::Relaxed),
        INPUTS_TOTAL.load(Ordering::Relaxed),
    )
}

pub fn reset_context() {
    CURRENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = AnalysisContext::new();
    });
}
