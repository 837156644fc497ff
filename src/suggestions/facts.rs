//! Fact sheet the suggestion rules are evaluated against.
//!
//! Everything that needs the token stream is derived here, once. Rules only
//! see the finished [`SuggestionFacts`].

use crate::complexity::ControlFlow;
use crate::config::Thresholds;
use crate::core::outline::Block;
use crate::core::syntax::Syntax;
use crate::core::types::{
    ComplexityClass, ComplexityEstimate, StructureCategory, StructureSummary, TimeRule, Token,
    TokenKind,
};
use crate::languages::DeclarationStyle;
use crate::quality::QualitySignals;
use std::collections::BTreeSet;

const COMPARISONS: &[&str] = &["==", "===", "!=", "!==", "<", "<=", ">", ">=", "is"];
const NEGATIONS: &[&str] = &["!", "not"];
/// Tokens that may follow a negated name in an emptiness guard.
const GUARD_FOLLOWERS: &[&str] = &[")", ":", "||", "&&", "or", "and", "?"];
const ALWAYS_TRUE: &[&str] = &["true", "True", "1"];
const MUTABLE_FACTORIES: &[&str] = &["list", "dict", "set"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueRemoval {
    pub call: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionFacts {
    pub structures: BTreeSet<StructureCategory>,
    pub time_class: ComplexityClass,
    pub space_class: ComplexityClass,
    pub time_rule: TimeRule,
    pub loop_depth: usize,
    /// Function behind the winning recursive rule
    pub recursion: Option<String>,
    pub missing_base_case: Option<String>,
    pub unbounded_loop: Option<usize>,
    pub overflowing_midpoint: Option<usize>,
    pub mutable_default: Option<usize>,
    pub loose_equality: Option<usize>,
    pub bounds_checked: bool,
    pub scan_in_loop: Option<usize>,
    pub queue_removal: Option<QueueRemoval>,
    pub var_declaration: Option<usize>,
    pub magic_numbers: usize,
    pub first_magic_number: Option<usize>,
    pub single_letter_names: Vec<String>,
    pub long_lines: usize,
    pub max_line_length: usize,
    /// Name and length of the longest function when it exceeds the limit
    pub long_function: Option<(Option<String>, usize)>,
    /// Percentage and first line when duplication is above the threshold
    pub duplication: Option<(u32, usize)>,
    /// Nesting depth when it exceeds the limit
    pub deep_nesting: Option<usize>,
    pub sparse_comments: bool,
}

impl SuggestionFacts {
    pub fn derive(
        syntax: &Syntax<'_>,
        flow: &ControlFlow,
        structures: &[StructureSummary],
        complexity: &ComplexityEstimate,
        signals: &QualitySignals,
        thresholds: &Thresholds,
    ) -> Self {
        let line_of = |k: usize| syntax.get(k).map(|t| t.line);
        let duplicated = signals.duplication.fraction();

        Self {
            structures: structures.iter().map(|s| s.name).collect(),
            time_class: complexity.time_class,
            space_class: complexity.space_class,
            time_rule: complexity.time_rule,
            loop_depth: complexity.loop_depth,
            recursion: complexity.recursion.clone(),
            missing_base_case: flow
                .recursion
                .iter()
                .find(|r| !r.has_base_case)
                .map(|r| r.name.clone()),
            unbounded_loop: unbounded_loop(syntax),
            overflowing_midpoint: overflowing_midpoint(syntax),
            mutable_default: mutable_default(syntax),
            loose_equality: loose_equality(syntax),
            bounds_checked: bounds_checked(syntax),
            scan_in_loop: flow.scan_in_loop.and_then(line_of),
            queue_removal: queue_removal(syntax),
            var_declaration: var_declaration(syntax),
            magic_numbers: signals.magic_numbers.len(),
            first_magic_number: signals.magic_numbers.first().map(|m| m.line),
            single_letter_names: signals.single_letter_names.clone(),
            long_lines: signals.long_lines,
            max_line_length: thresholds.max_line_length,
            long_function: signals
                .longest_function
                .as_ref()
                .filter(|f| f.lines > thresholds.max_function_lines)
                .map(|f| (f.name.clone(), f.lines)),
            duplication: (duplicated > thresholds.duplication_threshold)
                .then(|| {
                    let first = signals.duplication.first_line.unwrap_or(1);
                    ((duplicated * 100.0).round() as u32, first)
                }),
            deep_nesting: (signals.max_nesting > thresholds.max_nesting)
                .then_some(signals.max_nesting),
            sparse_comments: signals.code_lines >= 5
                && signals.comment_ratio() < thresholds.min_comment_ratio,
        }
    }

    pub fn has(&self, category: StructureCategory) -> bool {
        self.structures.contains(&category)
    }
}

/// `while (true)`, `while True:` or `for (;;)` without a way out.
fn unbounded_loop(syntax: &Syntax<'_>) -> Option<usize> {
    let exits = syntax.profile.vocabulary.exit_keywords;
    syntax.outline.loops().find_map(|(_, block)| {
        let escapes = block.body.clone().any(|k| {
            syntax
                .get(k)
                .is_some_and(|t| t.kind == TokenKind::Keyword && t.is_any(exits))
        });
        (always_true(syntax, block) && !escapes).then_some(block.line)
    })
}

fn always_true(syntax: &Syntax<'_>, block: &Block) -> bool {
    let header: Vec<&Token> = syntax
        .slice(block.header.clone())
        .iter()
        .copied()
        .filter(|t| !t.is_any(&["(", ")", ":"]))
        .collect();
    let keyword = syntax.get(block.start);
    match header.as_slice() {
        [condition] => {
            keyword.is_some_and(|k| k.is_keyword("while"))
                && ALWAYS_TRUE.contains(&condition.text.as_str())
        }
        [first, second] => {
            keyword.is_some_and(|k| k.is_keyword("for")) && first.is(";") && second.is(";")
        }
        _ => false,
    }
}

/// `(low + high) / 2` in a language with fixed-width integers.
fn overflowing_midpoint(syntax: &Syntax<'_>) -> Option<usize> {
    if !syntax.profile.vocabulary.fixed_width_integers {
        return None;
    }
    (0..syntax.len()).find_map(|k| {
        let shape = syntax.is_at(k, "(")
            && syntax.get(k + 1).is_some_and(|t| t.is_ident())
            && syntax.is_at(k + 2, "+")
            && syntax.get(k + 3).is_some_and(|t| t.is_ident())
            && syntax.is_at(k + 4, ")")
            && (syntax.is_at(k + 5, "/") || syntax.is_at(k + 5, ">>"))
            && syntax.get(k + 6).is_some_and(|t| t.is_number());
        shape.then(|| syntax.code[k].line)
    })
}

/// `def f(items=[])` and friends.
fn mutable_default(syntax: &Syntax<'_>) -> Option<usize> {
    if syntax.profile.declaration_style != DeclarationStyle::Assignment {
        return None;
    }
    syntax.outline.functions().find_map(|(_, block)| {
        block.header.clone().find_map(|k| {
            if !syntax.is_at(k, "=") {
                return None;
            }
            let next = syntax.get(k + 1)?;
            let mutable = next.is_any(&["[", "{"])
                || (next.is_any(MUTABLE_FACTORIES) && syntax.is_at(k + 2, "("));
            mutable.then_some(next.line)
        })
    })
}

/// `==` / `!=` where `===` / `!==` exist, ignoring comparisons with null.
fn loose_equality(syntax: &Syntax<'_>) -> Option<usize> {
    let strict_available = syntax.profile.lexical.operators.contains(&"===");
    if !strict_available {
        return None;
    }
    let nulls = syntax.profile.vocabulary.null_words;
    (0..syntax.len()).find_map(|k| {
        let token = syntax.get(k)?;
        if !token.is_any(&["==", "!="]) {
            return None;
        }
        let against_null = [syntax.prev(k), syntax.get(k + 1)]
            .into_iter()
            .flatten()
            .any(|t| nulls.contains(&t.text.as_str()));
        (!against_null).then_some(token.line)
    })
}

/// A size or emptiness test somewhere in the code.
fn bounds_checked(syntax: &Syntax<'_>) -> bool {
    let vocabulary = &syntax.profile.vocabulary;
    (0..syntax.len()).any(|k| {
        let Some(token) = syntax.get(k) else {
            return false;
        };
        if token.is_ident() && vocabulary.size_accessors.contains(&token.text.as_str()) {
            return token.text.contains("mpty") || same_line(syntax, k).any(|t| t.is_any(COMPARISONS));
        }
        if token.is_any(NEGATIONS) {
            return syntax.get(k + 1).is_some_and(|t| t.is_ident())
                && syntax.get(k + 2).is_some_and(|t| t.is_any(GUARD_FOLLOWERS));
        }
        if vocabulary.null_words.contains(&token.text.as_str()) {
            return syntax.prev(k).is_some_and(|p| p.is_any(COMPARISONS));
        }
        false
    })
}

fn same_line<'s>(syntax: &'s Syntax<'_>, k: usize) -> impl Iterator<Item = &'s Token> + 's {
    let line = syntax.code[k].line;
    let start = (0..k)
        .rev()
        .take_while(|&i| syntax.code[i].line == line)
        .last()
        .unwrap_or(k);
    syntax.code[start..]
        .iter()
        .copied()
        .take_while(move |t| t.line == line)
}

/// Removing from the front of an array-backed list: `shift()`, `pop(0)`,
/// `remove(0)`, `erase(v.begin())`.
fn queue_removal(syntax: &Syntax<'_>) -> Option<QueueRemoval> {
    (1..syntax.len()).find_map(|k| {
        let token = syntax.get(k)?;
        if !syntax.is_at(k - 1, ".") || !token.is_ident() || !syntax.is_at(k + 1, "(") {
            return None;
        }
        let first_arg = syntax.get(k + 2)?;
        let call = match token.text.as_str() {
            "shift" if first_arg.is(")") => "shift()",
            "pop" if first_arg.text == "0" && syntax.is_at(k + 3, ")") => "pop(0)",
            "remove" if first_arg.text == "0" && syntax.is_at(k + 3, ")") => "remove(0)",
            "erase" if syntax.is_at(k + 3, ".") && syntax.get(k + 4).is_some_and(|t| t.is("begin")) => {
                "erase(begin())"
            }
            _ => return None,
        };
        Some(QueueRemoval {
            call: call.to_string(),
            line: token.line,
        })
    })
}

fn var_declaration(syntax: &Syntax<'_>) -> Option<usize> {
    if syntax.profile.declaration_style != DeclarationStyle::Keyword {
        return None;
    }
    (0..syntax.len())
        .filter_map(|k| syntax.get(k))
        .find(|t| t.is_keyword("var"))
        .map(|t| t.line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complexity::estimate_from_flow;
    use crate::core::lines::LineIndex;
    use crate::languages::ProfileRegistry;
    use crate::structures::detect_structures;
    use crate::tokenizer::tokenize;

    fn facts_of(source: &str, language: &str) -> SuggestionFacts {
        let registry = ProfileRegistry::builtin();
        let profile = registry.get(language).unwrap();
        let stream = tokenize(source, profile);
        let lines = LineIndex::new(source);
        let syntax = Syntax::new(&stream.tokens, &lines, profile);
        let structures = detect_structures(&syntax);
        let flow = ControlFlow::extract(&syntax, &structures);
        let complexity = estimate_from_flow(&flow, &structures);
        let thresholds = Thresholds::default();
        let signals = QualitySignals::collect(&syntax, &thresholds);
        SuggestionFacts::derive(&syntax, &flow, &structures, &complexity, &signals, &thresholds)
    }

    #[test]
    fn test_unchecked_array_access() {
        let facts = facts_of("function first(arr) {\n  return arr[0] + arr.length - 1;\n}", "javascript");
        assert!(facts.has(StructureCategory::Array));
        assert!(!facts.bounds_checked);

        let facts = facts_of(
            "function first(arr) {\n  if (arr.length === 0) return null;\n  return arr[0];\n}",
            "javascript",
        );
        assert!(facts.bounds_checked);
    }

    #[test]
    fn test_python_emptiness_guard() {
        let facts = facts_of("def head(items):\n    if not items:\n        return None\n    return items[0]\n", "python");
        assert!(facts.bounds_checked);
    }

    #[test]
    fn test_unbounded_loops() {
        let facts = facts_of("while (true) {\n  tick();\n}", "javascript");
        assert_eq!(facts.unbounded_loop, Some(1));
        let facts = facts_of("while True:\n    if done():\n        break\n", "python");
        assert_eq!(facts.unbounded_loop, None);
        let facts = facts_of("for (;;) {\n  poll();\n}", "cpp");
        assert_eq!(facts.unbounded_loop, Some(1));
    }

    #[test]
    fn test_overflowing_midpoint_only_for_fixed_width() {
        let java = "int mid = (low + high) / 2;";
        assert_eq!(facts_of(java, "java").overflowing_midpoint, Some(1));
        let js = "let mid = (low + high) / 2;";
        assert_eq!(facts_of(js, "javascript").overflowing_midpoint, None);
    }

    #[test]
    fn test_mutable_default_argument() {
        let facts = facts_of("def collect(x, seen=[]):\n    seen.append(x)\n    return seen\n", "python");
        assert_eq!(facts.mutable_default, Some(1));
        let facts = facts_of("def collect(x, seen=None):\n    return seen\n", "python");
        assert_eq!(facts.mutable_default, None);
    }

    #[test]
    fn test_loose_equality_ignores_null_checks() {
        let facts = facts_of("if (a == null) {}\nif (a != b) {}", "javascript");
        assert_eq!(facts.loose_equality, Some(2));
        assert_eq!(facts_of("if (a == b) {}", "java").loose_equality, None);
    }

    #[test]
    fn test_queue_removals() {
        let facts = facts_of("const next = queue.shift();", "javascript");
        assert_eq!(facts.queue_removal.unwrap().call, "shift()");
        let facts = facts_of("node = queue.pop(0)\n", "python");
        assert_eq!(facts.queue_removal.unwrap().call, "pop(0)");
        assert!(facts_of("node = stack.pop()\n", "python").queue_removal.is_none());
    }

    #[test]
    fn test_var_declaration() {
        assert_eq!(facts_of("let a = 1;\nvar b = 2;", "javascript").var_declaration, Some(2));
    }

    #[test]
    fn test_missing_base_case() {
        let facts = facts_of("function spin(n) {\n  return spin(n - 1);\n}", "javascript");
        assert_eq!(facts.missing_base_case.as_deref(), Some("spin"));
    }
}
