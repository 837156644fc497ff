//! Contract checks on stage outputs. A failure is a defect in the engine,
//! never a property of the input.

use crate::core::types::{
    CodeQuality, ComplexityEstimate, SpaceBasis, StructureSummary, Suggestion,
};

pub fn check_structures(structures: &[StructureSummary]) -> Result<(), String> {
    for summary in structures {
        if summary.lines.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(format!("{} lines are not strictly ascending", summary.name));
        }
        if summary.lines.is_empty() || summary.occurrences < summary.lines.len() {
            return Err(format!(
                "{} has {} occurrences for {} lines",
                summary.name,
                summary.occurrences,
                summary.lines.len()
            ));
        }
    }
    Ok(())
}

/// Call-stack space never exceeds the time of the recursion it comes from.
pub fn check_complexity(complexity: &ComplexityEstimate) -> Result<(), String> {
    let same_recursion = complexity.space_basis == SpaceBasis::CallStack
        && complexity.time_rule.is_recursive()
        && complexity.recursion.is_some();
    if same_recursion && complexity.space_class > complexity.time_class {
        return Err(format!(
            "call-stack space {} exceeds time {} for `{}`",
            complexity.space_class,
            complexity.time_class,
            complexity.recursion.as_deref().unwrap_or_default()
        ));
    }
    Ok(())
}

pub fn check_quality(quality: &CodeQuality) -> Result<(), String> {
    let metrics = &quality.metrics;
    let values = [
        ("score", quality.score),
        ("readability", metrics.readability),
        ("efficiency", metrics.efficiency),
        ("maintainability", metrics.maintainability),
    ];
    match values.iter().find(|(_, value)| *value > 100) {
        Some((name, value)) => Err(format!("{name} {value} is outside 0..=100")),
        None => Ok(()),
    }
}

pub fn check_suggestions(suggestions: &[Suggestion], max_suggestions: usize) -> Result<(), String> {
    if suggestions.len() > max_suggestions {
        return Err(format!(
            "{} suggestions exceed the cap of {max_suggestions}",
            suggestions.len()
        ));
    }
    if suggestions.windows(2).any(|pair| pair[0].severity < pair[1].severity) {
        return Err("suggestions are not ordered by severity".to_string());
    }
    Ok(())
}
