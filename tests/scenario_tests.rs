mod common;

use algoscope::{
    analyze, AnalysisError, ComplexityClass, MalformedKind, StructureCategory, SuggestionType,
};
use common::{analyze_ok, BINARY_SEARCH_JS, PAIR_SUM_JS};
use pretty_assertions::assert_eq;

#[test]
fn test_binary_search_is_logarithmic_with_constant_space() {
    let result = analyze_ok(BINARY_SEARCH_JS, "javascript");

    assert_eq!(result.complexity.time_class, ComplexityClass::Logarithmic);
    assert_eq!(result.complexity.space_class, ComplexityClass::Constant);

    let array = result.structure(StructureCategory::Array).unwrap();
    assert!(array.occurrences >= 1);
    let variables = result.structure(StructureCategory::Variable).unwrap();
    assert!(variables.occurrences >= 4);
    assert!(!result.partial);
}

#[test]
fn test_binary_search_suggestions_match_legacy_messages() {
    let result = analyze_ok(BINARY_SEARCH_JS, "javascript");
    let messages: Vec<&str> = result.suggestions.iter().map(|s| s.message.as_str()).collect();

    assert!(messages.contains(&"Add bounds checking for empty arrays"));
    assert!(messages.contains(&"Consider adding input validation to check if the array is sorted"));

    let bounds = result
        .suggestions
        .iter()
        .find(|s| s.message == "Add bounds checking for empty arrays")
        .unwrap();
    assert_eq!(bounds.kind, SuggestionType::Improvement);
}

#[test]
fn test_empty_source_is_an_error_without_result() {
    assert_eq!(analyze("", "javascript"), Err(AnalysisError::EmptyInput));
}

#[test]
fn test_nested_loops_over_same_array_are_quadratic() {
    let result = analyze_ok(PAIR_SUM_JS, "javascript");
    assert_eq!(result.complexity.time_class, ComplexityClass::Quadratic);
    assert_eq!(result.complexity.loop_depth, 2);
}

#[test]
fn test_unknown_language_is_rejected() {
    assert_eq!(
        analyze("IDENTIFICATION DIVISION.", "cobol"),
        Err(AnalysisError::UnsupportedLanguage {
            language: "cobol".into()
        })
    );
}

#[test]
fn test_unterminated_string_returns_partial_result() {
    let source = "x = 'never closed\ny = 2\n";
    let result = analyze_ok(source, "python");

    assert!(result.partial);
    assert_eq!(result.malformed.len(), 1);
    assert_eq!(result.malformed[0].kind, MalformedKind::UnterminatedString);
    assert!(result.structure(StructureCategory::Variable).is_some());
}

#[test]
fn test_repeated_calls_are_identical() {
    let first = analyze_ok(BINARY_SEARCH_JS, "javascript");
    let second = analyze_ok(BINARY_SEARCH_JS, "javascript");
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_result_serializes_with_legacy_field_names() {
    let value = serde_json::to_value(analyze_ok(BINARY_SEARCH_JS, "javascript")).unwrap();
    assert_eq!(value["complexity"]["time"], "O(log n)");
    assert_eq!(value["complexity"]["space"], "O(1)");
    assert!(value["dataStructures"].is_array());
    assert!(value["codeQuality"]["score"].is_u64());
    assert!(value["suggestions"][0]["type"].is_string());
    assert!(value.get("malformed").is_none());
}
