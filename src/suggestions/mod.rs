//! Suggestion generation.
//!
//! Rules are evaluated in table order against a [`SuggestionFacts`] sheet.
//! The output keeps the first occurrence of each message, is stably sorted
//! by severity (errors first) and is capped at the configured maximum.

pub mod facts;
pub mod rules;

pub use facts::{QueueRemoval, SuggestionFacts};
pub use rules::{SuggestionRule, SUGGESTION_RULES};

use crate::core::types::Suggestion;
use std::cmp::Reverse;
use std::collections::HashSet;

pub fn suggest(facts: &SuggestionFacts, max_suggestions: usize) -> Vec<Suggestion> {
    let _span = tracing::debug_span!("generate_suggestions").entered();
    let mut seen = HashSet::new();
    let mut suggestions: Vec<Suggestion> = SUGGESTION_RULES
        .iter()
        .filter_map(|rule| {
            let message = rule.evaluate(facts)?;
            log::debug!("Suggestion rule {} fired", rule.id);
            Some(Suggestion {
                kind: rule.kind,
                message,
                severity: rule.severity,
            })
        })
        .filter(|s| seen.insert(s.message.clone()))
        .collect();

    suggestions.sort_by_key(|s| Reverse(s.severity));
    if suggestions.len() > max_suggestions {
        log::debug!(
            "Keeping {} of {} suggestions",
            max_suggestions,
            suggestions.len()
        );
        suggestions.truncate(max_suggestions);
    }
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{
        ComplexityClass, Severity, StructureCategory, SuggestionType, TimeRule,
    };
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    fn blank_facts() -> SuggestionFacts {
        SuggestionFacts {
            structures: BTreeSet::new(),
            time_class: ComplexityClass::Constant,
            space_class: ComplexityClass::Constant,
            time_rule: TimeRule::Constant,
            loop_depth: 0,
            recursion: None,
            missing_base_case: None,
            unbounded_loop: None,
            overflowing_midpoint: None,
            mutable_default: None,
            loose_equality: None,
            bounds_checked: true,
            scan_in_loop: None,
            queue_removal: None,
            var_declaration: None,
            magic_numbers: 0,
            first_magic_number: None,
            single_letter_names: Vec::new(),
            long_lines: 0,
            max_line_length: 100,
            long_function: None,
            duplication: None,
            deep_nesting: None,
            sparse_comments: false,
        }
    }

    #[test]
    fn test_clean_facts_produce_nothing() {
        assert!(suggest(&blank_facts(), 10).is_empty());
    }

    #[test]
    fn test_binary_search_suggestions() {
        let mut facts = blank_facts();
        facts.structures = [StructureCategory::Array, StructureCategory::Variable].into();
        facts.time_class = ComplexityClass::Logarithmic;
        facts.time_rule = TimeRule::HalvingLoop;
        facts.bounds_checked = false;

        let suggestions = suggest(&facts, 10);
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].message, "Add bounds checking for empty arrays");
        assert_eq!(suggestions[0].kind, SuggestionType::Improvement);
        assert_eq!(suggestions[0].severity, Severity::Warning);
        assert_eq!(
            suggestions[1].message,
            "Consider adding input validation to check if the array is sorted"
        );
        assert_eq!(suggestions[1].kind, SuggestionType::Optimization);
        assert_eq!(suggestions[1].severity, Severity::Info);
    }

    #[test]
    fn test_severity_order_then_rule_order() {
        let mut facts = blank_facts();
        facts.sparse_comments = true;
        facts.var_declaration = Some(3);
        facts.missing_base_case = Some("walk".into());
        facts.loose_equality = Some(2);

        let severities: Vec<Severity> = suggest(&facts, 10).iter().map(|s| s.severity).collect();
        assert_eq!(
            severities,
            vec![Severity::Error, Severity::Warning, Severity::Info, Severity::Info]
        );
        let suggestions = suggest(&facts, 10);
        assert!(suggestions[2].message.starts_with("Replace `var`"));
        assert!(suggestions[3].message.starts_with("Add comments"));
    }

    #[test]
    fn test_cap_keeps_most_severe() {
        let mut facts = blank_facts();
        facts.sparse_comments = true;
        facts.long_lines = 3;
        facts.unbounded_loop = Some(4);

        let suggestions = suggest(&facts, 1);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].severity, Severity::Error);
        assert!(suggest(&facts, 0).is_empty());
    }

    #[test]
    fn test_exponential_recursion_names_function() {
        let mut facts = blank_facts();
        facts.time_class = ComplexityClass::Exponential;
        facts.time_rule = TimeRule::BranchingRecursion;
        facts.recursion = Some("fib".into());

        let suggestions = suggest(&facts, 10);
        assert_eq!(
            suggestions[0].message,
            "Memoize `fib` or rewrite it iteratively to avoid exponential running time"
        );
    }

    #[test]
    fn test_every_rule_has_unique_id() {
        let ids: HashSet<&str> = SUGGESTION_RULES.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), SUGGESTION_RULES.len());
    }
}
