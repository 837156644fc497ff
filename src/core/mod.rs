pub mod errors;
pub mod lines;
pub mod naming;
pub mod outline;
pub mod syntax;
pub mod types;

pub use errors::{AnalysisError, MalformedInput, MalformedKind, Result};
pub use lines::LineIndex;
pub use outline::{Block, BlockKind, Outline};
pub use syntax::Syntax;
pub use types::{
    AnalysisResult, CodeQuality, ComplexityClass, ComplexityEstimate, QualityMetrics, Severity,
    SpaceBasis, StructureCategory, StructureMatch, StructureSummary, Suggestion, SuggestionType,
    TimeRule, Token, TokenKind,
};
