//! Property-based tests for the analysis pipeline
//!
//! These hold for every input the engine accepts:
//! - Analysis is deterministic
//! - Structure lines are strictly ascending
//! - Quality metrics stay within 0..=100
//! - Call-stack space never exceeds the time of the same recursion
//! - Suggestions are ordered by severity and capped

use algoscope::core::SpaceBasis;
use algoscope::{analyze, AnalysisError, AnalysisResult};
use proptest::prelude::*;

const LANGUAGES: &[&str] = &["javascript", "python", "cpp", "java"];

fn language() -> impl Strategy<Value = &'static str> {
    prop::sample::select(LANGUAGES)
}

/// Printable ASCII with newlines, so brackets and quotes are often unbalanced.
fn noisy_source() -> impl Strategy<Value = String> {
    "[ -~\n]{1,300}"
}

/// Small loop and recursion shaped snippets.
fn shaped_source() -> impl Strategy<Value = String> {
    let statement = prop_oneof![
        Just("for (let i = 0; i < n; i++) {".to_string()),
        Just("while (lo <= hi) {".to_string()),
        Just("}".to_string()),
        Just("let mid = (lo + hi) / 2;".to_string()),
        Just("return walk(n - 1) + walk(n - 2);".to_string()),
        Just("if (n < 2) return n;".to_string()),
        Just("items.sort();".to_string()),
        Just("const seen = new Set();".to_string()),
        Just("// note".to_string()),
        "[a-z]{1,8} = [0-9]{1,4};",
    ];
    prop::collection::vec(statement, 1..25).prop_map(|lines| {
        format!("function walk(n) {{\n{}\n}}\n", lines.join("\n"))
    })
}

fn check_invariants(result: &AnalysisResult) -> Result<(), TestCaseError> {
    for summary in &result.data_structures {
        prop_assert!(summary.lines.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!(summary.occurrences >= summary.lines.len());
    }

    let quality = &result.code_quality;
    prop_assert!(quality.score <= 100);
    prop_assert!(quality.metrics.readability <= 100);
    prop_assert!(quality.metrics.efficiency <= 100);
    prop_assert!(quality.metrics.maintainability <= 100);

    let complexity = &result.complexity;
    if complexity.space_basis == SpaceBasis::CallStack
        && complexity.time_rule.is_recursive()
        && complexity.recursion.is_some()
    {
        prop_assert!(complexity.space_class <= complexity.time_class);
    }

    prop_assert!(result.suggestions.len() <= 10);
    prop_assert!(result
        .suggestions
        .windows(2)
        .all(|pair| pair[0].severity >= pair[1].severity));
    Ok(())
}

proptest! {
    #[test]
    fn prop_noisy_input_never_fails_unexpectedly(source in noisy_source(), language in language()) {
        match analyze(&source, language) {
            Ok(result) => check_invariants(&result)?,
            Err(error) => prop_assert_eq!(error, AnalysisError::EmptyInput),
        }
    }

    #[test]
    fn prop_analysis_is_deterministic(source in shaped_source(), language in language()) {
        let first = analyze(&source, language);
        let second = analyze(&source, language);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_shaped_input_holds_invariants(source in shaped_source()) {
        let result = analyze(&source, "javascript").unwrap();
        check_invariants(&result)?;
    }

    #[test]
    fn prop_unknown_languages_rejected(language in "[a-z]{3,8}") {
        prop_assume!(!["javascript", "python", "cpp", "java", "node", "cxx", "ecmascript"]
            .contains(&language.as_str()));
        prop_assert_eq!(
            analyze("x = 1", &language),
            Err(AnalysisError::unsupported_language(language.clone()))
        );
    }
}
