// Export modules for library usage
pub mod cache;
pub mod cli;
pub mod commands;
pub mod complexity;
pub mod config;
pub mod core;
pub mod io;
pub mod languages;
pub mod observability;
pub mod pipeline;
pub mod quality;
pub mod request;
pub mod structures;
pub mod suggestions;
pub mod tokenizer;

// Re-export commonly used types
pub use crate::core::{
    AnalysisError, AnalysisResult, CodeQuality, ComplexityClass, ComplexityEstimate,
    MalformedInput, MalformedKind, QualityMetrics, Severity, StructureCategory, StructureSummary,
    Suggestion, SuggestionType, Token, TokenKind,
};

pub use crate::pipeline::{analyze, Analyzer};

pub use crate::request::{AnalysisRequest, AnalysisResponse};

pub use crate::cache::AnalysisCache;

pub use crate::config::{load_config, AnalyzerConfig};

pub use crate::languages::{LanguageProfile, ProfileRegistry};

pub use crate::tokenizer::{tokenize, TokenStream};

pub use crate::io::output::{create_writer, InputReport, OutputFormat, OutputWriter};
