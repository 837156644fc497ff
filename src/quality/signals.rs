//! Countable source signals behind the quality metrics.

use super::duplication::{detect_duplication, Duplication};
use crate::config::Thresholds;
use crate::core::naming::{is_constant_case, naming_style, NamingStyle};
use crate::core::syntax::Syntax;
use crate::core::types::{Token, TokenKind};
use crate::structures::bindings::binding_sites;
use std::collections::{BTreeMap, BTreeSet};

/// Keywords that mark a declaration as a named constant.
const CONSTANT_MARKERS: &[&str] = &["final", "constexpr", "define"];
/// Tokens scanned back from a literal for a constant marker.
const CONSTANT_LOOKBACK: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct MagicNumber {
    pub text: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LongestFunction {
    pub name: Option<String>,
    pub line: usize,
    pub lines: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QualitySignals {
    /// Lines holding at least one code token
    pub code_lines: usize,
    /// Lines covered by comments (docstrings included)
    pub comment_lines: usize,
    pub long_lines: usize,
    pub max_nesting: usize,
    pub camel_case_names: usize,
    pub snake_case_names: usize,
    /// Distinct one-letter names bound outside loop headers
    pub single_letter_names: Vec<String>,
    pub longest_function: Option<LongestFunction>,
    pub duplication: Duplication,
    pub magic_numbers: Vec<MagicNumber>,
}

impl QualitySignals {
    pub fn collect(syntax: &Syntax<'_>, thresholds: &Thresholds) -> Self {
        let (code_lines, comment_lines) = line_coverage(syntax.tokens);
        let names = bound_names(syntax);
        let styles: Vec<NamingStyle> = names
            .values()
            .filter(|name| !is_constant_case(name))
            .map(|name| naming_style(name))
            .collect();

        let signals = Self {
            code_lines,
            comment_lines,
            long_lines: syntax.lines.lines_longer_than(thresholds.max_line_length),
            max_nesting: syntax.outline.max_nesting,
            camel_case_names: styles.iter().filter(|s| **s == NamingStyle::CamelCase).count(),
            snake_case_names: styles.iter().filter(|s| **s == NamingStyle::SnakeCase).count(),
            single_letter_names: single_letter_names(syntax),
            longest_function: longest_function(syntax),
            duplication: detect_duplication(&syntax.code, thresholds.duplicate_window),
            magic_numbers: magic_numbers(syntax, thresholds),
        };
        log::debug!(
            "Quality signals: {} code lines, {} comment lines, {} long lines, {} magic numbers",
            signals.code_lines,
            signals.comment_lines,
            signals.long_lines,
            signals.magic_numbers.len()
        );
        signals
    }

    pub fn comment_ratio(&self) -> f64 {
        if self.code_lines == 0 {
            return 0.0;
        }
        self.comment_lines as f64 / self.code_lines as f64
    }

    pub fn mixed_naming(&self) -> bool {
        self.camel_case_names > 0 && self.snake_case_names > 0
    }

    pub fn excess_nesting(&self, thresholds: &Thresholds) -> usize {
        self.max_nesting.saturating_sub(thresholds.max_nesting)
    }

    pub fn excess_function_lines(&self, thresholds: &Thresholds) -> usize {
        self.longest_function
            .as_ref()
            .map_or(0, |f| f.lines.saturating_sub(thresholds.max_function_lines))
    }
}

fn line_coverage(tokens: &[Token]) -> (usize, usize) {
    let mut code = BTreeSet::new();
    let mut comments = BTreeSet::new();
    for token in tokens {
        let target = if token.is_comment() { &mut comments } else { &mut code };
        target.extend(token.line..=token.end_line());
    }
    (code.len(), comments.len())
}

/// Declared names (variables and functions) keyed by first position.
fn bound_names(syntax: &Syntax<'_>) -> BTreeMap<usize, String> {
    let mut names: BTreeMap<usize, String> = binding_sites(syntax)
        .into_iter()
        .filter_map(|k| syntax.get(k).map(|t| (k, t.text.clone())))
        .collect();
    for (_, function) in syntax.outline.functions() {
        if let Some(name) = &function.name {
            names.insert(function.start, name.clone());
        }
    }
    names
}

fn single_letter_names(syntax: &Syntax<'_>) -> Vec<String> {
    let sites = binding_sites(syntax);
    let in_loop_header = |k: usize| syntax.outline.loops().any(|(_, b)| b.header.contains(&k));
    let counters: BTreeSet<&str> = sites
        .iter()
        .filter(|&&k| in_loop_header(k))
        .filter_map(|&k| syntax.get(k))
        .map(|t| t.text.as_str())
        .collect();

    let found: BTreeSet<String> = sites
        .iter()
        .filter_map(|&k| syntax.get(k))
        .filter(|t| t.text.chars().count() == 1 && t.text != "_")
        .filter(|t| !counters.contains(t.text.as_str()))
        .map(|t| t.text.clone())
        .collect();
    found.into_iter().collect()
}

fn longest_function(syntax: &Syntax<'_>) -> Option<LongestFunction> {
    syntax
        .outline
        .functions()
        .map(|(_, block)| LongestFunction {
            name: block.name.clone(),
            line: block.line,
            lines: block.line_count(),
        })
        .rev()
        .max_by_key(|f| f.lines)
}

fn magic_numbers(syntax: &Syntax<'_>, thresholds: &Thresholds) -> Vec<MagicNumber> {
    (0..syntax.len())
        .filter_map(|k| {
            let token = syntax.get(k)?;
            if !token.is_number() || is_collection_element(syntax, k) || in_constant_declaration(syntax, k) {
                return None;
            }
            let value = numeric_value(&token.text)?;
            let value = if is_negated(syntax, k) { -value } else { value };
            (!thresholds.is_allowed_number(value)).then(|| MagicNumber {
                text: token.text.clone(),
                line: token.line,
            })
        })
        .collect()
}

/// `[1, 3, 5]`: literal data rather than an unexplained constant.
fn is_collection_element(syntax: &Syntax<'_>, k: usize) -> bool {
    syntax.prev(k).is_some_and(|p| p.is_any(&["[", "{", ","]))
        && syntax.get(k + 1).is_some_and(|n| n.is_any(&["]", "}", ","]))
}

fn in_constant_declaration(syntax: &Syntax<'_>, k: usize) -> bool {
    let statement: Vec<&Token> = (1..=CONSTANT_LOOKBACK)
        .map_while(|back| k.checked_sub(back).and_then(|i| syntax.get(i)))
        .take_while(|t| !t.is_any(&[";", "{", "}"]))
        .collect();
    let marked = statement.iter().any(|t| t.is_any(CONSTANT_MARKERS));
    let named_constant = statement.windows(2).any(|pair| {
        // Reversed order: pair[0] is `=`, pair[1] the name before it
        pair[0].is("=") && pair[1].is_ident() && is_constant_case(&pair[1].text)
    });
    marked || named_constant
}

fn is_negated(syntax: &Syntax<'_>, k: usize) -> bool {
    if !syntax.prev(k).is_some_and(|p| p.is("-")) {
        return false;
    }
    match k.checked_sub(2).and_then(|i| syntax.get(i)) {
        None => true,
        Some(before) => {
            !(matches!(before.kind, TokenKind::Identifier | TokenKind::Literal)
                || before.is_any(&[")", "]"]))
        }
    }
}

fn numeric_value(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| *c != '_' && *c != '\'')
        .collect();
    let lower = cleaned.to_ascii_lowercase();
    for (prefix, radix) in [("0x", 16), ("0b", 2), ("0o", 8)] {
        if let Some(digits) = lower.strip_prefix(prefix) {
            let digits = digits.trim_end_matches(['l', 'u', 'n']);
            return i64::from_str_radix(digits, radix).ok().map(|v| v as f64);
        }
    }
    lower.trim_end_matches(['l', 'u', 'f', 'd', 'n']).parse::<f64>().ok()
}
