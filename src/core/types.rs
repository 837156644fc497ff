use super::errors::MalformedInput;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lexical class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Identifier,
    Keyword,
    Literal,
    Operator,
    Punctuation,
    Comment,
}

/// A single lexeme with the 1-based line it starts on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
        }
    }

    pub fn is_comment(&self) -> bool {
        self.kind == TokenKind::Comment
    }

    pub fn is_ident(&self) -> bool {
        self.kind == TokenKind::Identifier
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == keyword
    }

    /// Matches the token text for structural tokens (keywords, operators,
    /// punctuation, identifiers). Literals and comments never match.
    pub fn is(&self, text: &str) -> bool {
        !matches!(self.kind, TokenKind::Literal | TokenKind::Comment) && self.text == text
    }

    pub fn is_any(&self, texts: &[&str]) -> bool {
        texts.iter().any(|text| self.is(text))
    }

    pub fn is_number(&self) -> bool {
        self.kind == TokenKind::Literal
            && self
                .text
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_digit() || c == '.')
    }

    /// Last line covered by the token (multi-line comments and strings).
    pub fn end_line(&self) -> usize {
        self.line + self.text.matches('\n').count()
    }
}

/// Fixed set of data-structure labels reported by the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StructureCategory {
    Array,
    List,
    Tree,
    Graph,
    Stack,
    Queue,
    HashTable,
    Variable,
}

impl StructureCategory {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Array => "Array",
            Self::List => "List",
            Self::Tree => "Tree",
            Self::Graph => "Graph",
            Self::Stack => "Stack",
            Self::Queue => "Queue",
            Self::HashTable => "HashTable",
            Self::Variable => "Variable",
        }
    }
}

impl fmt::Display for StructureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One recognised usage of a data structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureMatch {
    pub category: StructureCategory,
    pub line: usize,
}

/// Per-category aggregate of [`StructureMatch`]es.
///
/// `lines` is strictly ascending; `occurrences` counts every match, so a line
/// that matched twice contributes two occurrences but one line entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureSummary {
    pub name: StructureCategory,
    pub occurrences: usize,
    pub lines: Vec<usize>,
}

/// Totally ordered asymptotic classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ComplexityClass {
    #[serde(rename = "O(1)")]
    Constant,
    #[serde(rename = "O(log n)")]
    Logarithmic,
    #[serde(rename = "O(n)")]
    Linear,
    #[serde(rename = "O(n log n)")]
    Linearithmic,
    #[serde(rename = "O(n^2)")]
    Quadratic,
    #[serde(rename = "O(2^n)")]
    Exponential,
}

impl ComplexityClass {
    pub fn notation(&self) -> &'static str {
        match self {
            Self::Constant => "O(1)",
            Self::Logarithmic => "O(log n)",
            Self::Linear => "O(n)",
            Self::Linearithmic => "O(n log n)",
            Self::Quadratic => "O(n^2)",
            Self::Exponential => "O(2^n)",
        }
    }
}

impl fmt::Display for ComplexityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.notation())
    }
}

/// Time-complexity rule that produced an estimate, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeRule {
    HalvingRecursion,
    HalvingLoop,
    Traversal,
    BranchingRecursion,
    NestedLoops,
    ScanInsideLoop,
    DivideAndConquer,
    LoopOverHalving,
    SortWithPass,
    Sort,
    SingleLoop,
    LinearRecursion,
    LinearBuiltin,
    Constant,
}

impl TimeRule {
    /// Rules that derive their class from a recursive function.
    pub fn is_recursive(&self) -> bool {
        matches!(
            self,
            Self::HalvingRecursion
                | Self::Traversal
                | Self::BranchingRecursion
                | Self::DivideAndConquer
                | Self::LinearRecursion
        )
    }
}

/// What the space class was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpaceBasis {
    Scalars,
    Auxiliary,
    CallStack,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityEstimate {
    #[serde(rename = "time")]
    pub time_class: ComplexityClass,
    #[serde(rename = "space")]
    pub space_class: ComplexityClass,
    pub explanation: String,
    pub time_rule: TimeRule,
    pub space_basis: SpaceBasis,
    /// Recursive function the time rule (or call-stack space) refers to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recursion: Option<String>,
    /// Deepest nesting of size-dependent loops.
    #[serde(default)]
    pub loop_depth: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub readability: u8,
    pub efficiency: u8,
    pub maintainability: u8,
}

/// Metrics plus their weighted mean, shaped like the `codeQuality` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeQuality {
    pub score: u8,
    pub metrics: QualityMetrics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionType {
    Optimization,
    Improvement,
    Correctness,
    Style,
}

/// Ordered `Info < Warning < Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionType,
    pub message: String,
    pub severity: Severity,
}

/// Immutable outcome of one `analyze` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub data_structures: Vec<StructureSummary>,
    pub complexity: ComplexityEstimate,
    pub suggestions: Vec<Suggestion>,
    pub code_quality: CodeQuality,
    /// Set when the tokenizer hit an unterminated literal or comment.
    #[serde(default)]
    pub partial: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub malformed: Vec<MalformedInput>,
}

impl AnalysisResult {
    pub fn structure(&self, category: StructureCategory) -> Option<&StructureSummary> {
        self.data_structures.iter().find(|s| s.name == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complexity_class_total_order() {
        assert!(ComplexityClass::Constant < ComplexityClass::Logarithmic);
        assert!(ComplexityClass::Logarithmic < ComplexityClass::Linear);
        assert!(ComplexityClass::Linear < ComplexityClass::Linearithmic);
        assert!(ComplexityClass::Linearithmic < ComplexityClass::Quadratic);
        assert!(ComplexityClass::Quadratic < ComplexityClass::Exponential);
    }

    #[test]
    fn test_complexity_class_serializes_as_notation() {
        let json = serde_json::to_string(&ComplexityClass::Linearithmic).unwrap();
        assert_eq!(json, "\"O(n log n)\"");
        let back: ComplexityClass = serde_json::from_str("\"O(2^n)\"").unwrap();
        assert_eq!(back, ComplexityClass::Exponential);
    }

    #[test]
    fn test_severity_order() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
    }

    #[test]
    fn test_token_is_ignores_literals() {
        let literal = Token::new(TokenKind::Literal, "for", 1);
        let keyword = Token::new(TokenKind::Keyword, "for", 1);
        assert!(!literal.is("for"));
        assert!(keyword.is("for"));
    }

    #[test]
    fn test_token_end_line() {
        let comment = Token::new(TokenKind::Comment, "/* a\n b\n */", 3);
        assert_eq!(comment.end_line(), 5);
    }
}
