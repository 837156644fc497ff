//! Engine error types

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Kind of recoverable lexical damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedKind {
    UnterminatedString,
    UnterminatedComment,
}

/// An unterminated literal or comment, located by the line it starts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MalformedInput {
    pub kind: MalformedKind,
    pub line: usize,
}

impl fmt::Display for MalformedInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MalformedKind::UnterminatedString => {
                write!(f, "unterminated string literal starting on line {}", self.line)
            }
            MalformedKind::UnterminatedComment => {
                write!(f, "unterminated comment starting on line {}", self.line)
            }
        }
    }
}

/// Single typed error channel of the analysis engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// Missing or whitespace-only source text
    #[error("Source code is required")]
    EmptyInput,

    /// Unknown language tag; never guessed
    #[error("Unsupported language: '{language}'")]
    UnsupportedLanguage { language: String },

    /// Unterminated literal or comment. `analyze` records this on a partial
    /// result instead of returning it.
    #[error("Malformed input: {0}")]
    MalformedInput(MalformedInput),

    /// A stage broke its documented contract
    #[error("Internal invariant violated in {stage}: {message}")]
    InternalInvariant { stage: &'static str, message: String },
}

impl AnalysisError {
    pub fn unsupported_language(language: impl Into<String>) -> Self {
        Self::UnsupportedLanguage {
            language: language.into(),
        }
    }

    pub fn invariant(stage: &'static str, message: impl Into<String>) -> Self {
        Self::InternalInvariant {
            stage,
            message: message.into(),
        }
    }

    /// Whether the caller should report this as a bad request (400-class)
    /// rather than a server failure (500-class).
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::InternalInvariant { .. })
    }
}

impl From<MalformedInput> for AnalysisError {
    fn from(value: MalformedInput) -> Self {
        Self::MalformedInput(value)
    }
}

/// Result type alias using the engine error
pub type Result<T> = std::result::Result<T, AnalysisError>;
