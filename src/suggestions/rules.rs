//! The ordered suggestion rule table.

use super::facts::SuggestionFacts;
use crate::core::types::{ComplexityClass, Severity, StructureCategory, SuggestionType, TimeRule};

type RuleCheck = fn(&SuggestionFacts) -> Option<String>;

/// A condition over the fact sheet and the suggestion it produces.
pub struct SuggestionRule {
    pub id: &'static str,
    pub kind: SuggestionType,
    pub severity: Severity,
    check: RuleCheck,
}

impl SuggestionRule {
    pub fn evaluate(&self, facts: &SuggestionFacts) -> Option<String> {
        (self.check)(facts)
    }
}

pub static SUGGESTION_RULES: &[SuggestionRule] = &[
    SuggestionRule {
        id: "missing-base-case",
        kind: SuggestionType::Correctness,
        severity: Severity::Error,
        check: |facts| {
            facts.missing_base_case.as_ref().map(|name| {
                format!("Recursive function `{name}` has no base case; add a condition that stops the recursion")
            })
        },
    },
    SuggestionRule {
        id: "unbounded-loop",
        kind: SuggestionType::Correctness,
        severity: Severity::Error,
        check: |facts| {
            facts.unbounded_loop.map(|line| {
                format!("The loop on line {line} never exits; add a break or return condition")
            })
        },
    },
    SuggestionRule {
        id: "midpoint-overflow",
        kind: SuggestionType::Correctness,
        severity: Severity::Warning,
        check: |facts| {
            facts.overflowing_midpoint.map(|line| {
                format!("Compute the midpoint as `low + (high - low) / 2` to avoid integer overflow (line {line})")
            })
        },
    },
    SuggestionRule {
        id: "mutable-default",
        kind: SuggestionType::Correctness,
        severity: Severity::Warning,
        check: |facts| {
            facts.mutable_default.map(|line| {
                format!("Avoid mutable default arguments; default to `None` and create the collection inside the function (line {line})")
            })
        },
    },
    SuggestionRule {
        id: "loose-equality",
        kind: SuggestionType::Correctness,
        severity: Severity::Warning,
        check: |facts| {
            facts.loose_equality.map(|line| {
                format!("Use strict equality (`===` / `!==`) instead of `==` / `!=` (line {line})")
            })
        },
    },
    SuggestionRule {
        id: "bounds-check",
        kind: SuggestionType::Improvement,
        severity: Severity::Warning,
        check: |facts| {
            (facts.has(StructureCategory::Array) && !facts.bounds_checked)
                .then(|| "Add bounds checking for empty arrays".to_string())
        },
    },
    SuggestionRule {
        id: "memoize-recursion",
        kind: SuggestionType::Optimization,
        severity: Severity::Warning,
        check: |facts| {
            (facts.time_class == ComplexityClass::Exponential).then(|| match &facts.recursion {
                Some(name) => format!(
                    "Memoize `{name}` or rewrite it iteratively to avoid exponential running time"
                ),
                None => "Cache repeated subproblems to avoid exponential running time".to_string(),
            })
        },
    },
    SuggestionRule {
        id: "nested-loops",
        kind: SuggestionType::Optimization,
        severity: Severity::Warning,
        check: |facts| {
            (facts.time_rule == TimeRule::NestedLoops).then(|| {
                format!(
                    "{} nested loops give quadratic time; consider a hash-based lookup or sorting first",
                    facts.loop_depth
                )
            })
        },
    },
    SuggestionRule {
        id: "scan-in-loop",
        kind: SuggestionType::Optimization,
        severity: Severity::Warning,
        check: |facts| {
            facts.scan_in_loop.map(|line| {
                format!("The linear search on line {line} runs inside a loop; index the values in a hash set or map instead")
            })
        },
    },
    SuggestionRule {
        id: "long-function",
        kind: SuggestionType::Improvement,
        severity: Severity::Warning,
        check: |facts| {
            facts.long_function.as_ref().map(|(name, lines)| match name {
                Some(name) => format!("Function `{name}` spans {lines} lines; split it into smaller functions"),
                None => format!("A function spans {lines} lines; split it into smaller functions"),
            })
        },
    },
    SuggestionRule {
        id: "duplication",
        kind: SuggestionType::Improvement,
        severity: Severity::Warning,
        check: |facts| {
            facts.duplication.map(|(percent, line)| {
                format!("About {percent}% of the code repeats (first at line {line}); extract the repeated logic into a function")
            })
        },
    },
    SuggestionRule {
        id: "deep-nesting",
        kind: SuggestionType::Improvement,
        severity: Severity::Warning,
        check: |facts| {
            facts.deep_nesting.map(|depth| {
                format!("Nesting reaches {depth} levels; flatten it with early returns or helper functions")
            })
        },
    },
    SuggestionRule {
        id: "sorted-input",
        kind: SuggestionType::Optimization,
        severity: Severity::Info,
        check: |facts| {
            let halving = matches!(facts.time_rule, TimeRule::HalvingLoop | TimeRule::HalvingRecursion);
            (halving && facts.has(StructureCategory::Array))
                .then(|| "Consider adding input validation to check if the array is sorted".to_string())
        },
    },
    SuggestionRule {
        id: "front-removal",
        kind: SuggestionType::Optimization,
        severity: Severity::Info,
        check: |facts| {
            facts.queue_removal.as_ref().map(|removal| {
                format!(
                    "`{}` on line {} shifts every remaining element; use a deque for queue operations",
                    removal.call, removal.line
                )
            })
        },
    },
    SuggestionRule {
        id: "var-declaration",
        kind: SuggestionType::Style,
        severity: Severity::Info,
        check: |facts| {
            facts
                .var_declaration
                .map(|line| format!("Replace `var` with `let` or `const` (line {line})"))
        },
    },
    SuggestionRule {
        id: "magic-numbers",
        kind: SuggestionType::Style,
        severity: Severity::Info,
        check: |facts| {
            facts.first_magic_number.map(|line| match facts.magic_numbers {
                1 => format!("Replace the magic number on line {line} with a named constant"),
                count => format!("Replace {count} magic numbers with named constants (first on line {line})"),
            })
        },
    },
    SuggestionRule {
        id: "single-letter-names",
        kind: SuggestionType::Style,
        severity: Severity::Info,
        check: |facts| {
            (!facts.single_letter_names.is_empty()).then(|| {
                format!(
                    "Use descriptive names instead of single-letter identifiers: {}",
                    facts.single_letter_names.join(", ")
                )
            })
        },
    },
    SuggestionRule {
        id: "long-lines",
        kind: SuggestionType::Style,
        severity: Severity::Info,
        check: |facts| {
            (facts.long_lines > 0).then(|| {
                format!(
                    "{} line(s) exceed {} characters; wrap them for readability",
                    facts.long_lines, facts.max_line_length
                )
            })
        },
    },
    SuggestionRule {
        id: "sparse-comments",
        kind: SuggestionType::Style,
        severity: Severity::Info,
        check: |facts| {
            facts
                .sparse_comments
                .then(|| "Add comments explaining the approach and any non-obvious steps".to_string())
        },
    },
];
