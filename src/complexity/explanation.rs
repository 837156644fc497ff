//! Fixed sentence templates keyed by the winning time rule and space basis.

use crate::core::types::{ComplexityClass, SpaceBasis, TimeRule};

/// Inputs to the templates besides the rule itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplanationContext<'a> {
    pub recursion: Option<&'a str>,
    pub loop_depth: usize,
    /// An array is present, so a halving loop reads as binary search
    pub searches_array: bool,
}

pub fn explain(
    rule: TimeRule,
    space: ComplexityClass,
    basis: SpaceBasis,
    space_recursion: Option<&str>,
    context: ExplanationContext<'_>,
) -> String {
    format!(
        "{} {}",
        time_sentence(rule, context),
        space_sentence(space, basis, space_recursion)
    )
}

fn time_sentence(rule: TimeRule, context: ExplanationContext<'_>) -> String {
    let name = context.recursion.unwrap_or("the function");
    match rule {
        TimeRule::HalvingRecursion => format!(
            "Each call to `{name}` recurses on half of the remaining range, so the running time is logarithmic."
        ),
        TimeRule::HalvingLoop if context.searches_array => {
            "Binary search has logarithmic time complexity as it halves the search space in each iteration."
                .to_string()
        }
        TimeRule::HalvingLoop => {
            "The loop scales its control variable by a constant factor on each iteration, so it runs a logarithmic number of times."
                .to_string()
        }
        TimeRule::Traversal if context.recursion.is_some() => format!(
            "`{name}` visits each node of the linked structure once, giving linear time in the number of nodes."
        ),
        TimeRule::Traversal => {
            "The worklist loop handles each vertex once and scans its adjacency list once, giving linear time in vertices plus edges."
                .to_string()
        }
        TimeRule::BranchingRecursion => format!(
            "`{name}` makes several recursive calls per invocation without shrinking the input geometrically, so the number of calls grows exponentially."
        ),
        TimeRule::NestedLoops if context.loop_depth > 2 => format!(
            "{} nested loops iterate over the input; nesting beyond two levels is reported at the quadratic ceiling.",
            context.loop_depth
        ),
        TimeRule::NestedLoops => {
            "Two nested loops each iterate over the input, giving quadratic time.".to_string()
        }
        TimeRule::ScanInsideLoop => {
            "A linear scan runs inside a loop over the input, giving quadratic time.".to_string()
        }
        TimeRule::DivideAndConquer => format!(
            "`{name}` splits the input in half and does linear work on each of the logarithmically many levels, giving n log n time."
        ),
        TimeRule::LoopOverHalving => {
            "A logarithmic halving search runs once per iteration of a linear loop, giving n log n time."
                .to_string()
        }
        TimeRule::SortWithPass => {
            "Sorting dominates the additional linear pass, giving n log n time.".to_string()
        }
        TimeRule::Sort => "Sorting the input takes n log n time.".to_string(),
        TimeRule::SingleLoop => {
            "A single loop iterates over the input once, giving linear time.".to_string()
        }
        TimeRule::LinearRecursion => format!(
            "`{name}` recurses a number of times proportional to the input, giving linear time."
        ),
        TimeRule::LinearBuiltin => {
            "Library calls that traverse or copy the input run in linear time.".to_string()
        }
        TimeRule::Constant => {
            "No loop or recursion depends on the input size, so the running time is constant."
                .to_string()
        }
    }
}

fn space_sentence(space: ComplexityClass, basis: SpaceBasis, recursion: Option<&str>) -> String {
    match basis {
        SpaceBasis::Scalars => {
            "Space complexity is constant as only a few scalar variables are used.".to_string()
        }
        SpaceBasis::Auxiliary if space >= ComplexityClass::Quadratic => {
            "A two-dimensional table sized by the input takes quadratic space.".to_string()
        }
        SpaceBasis::Auxiliary => format!("Auxiliary storage sized by the input takes {space} space."),
        SpaceBasis::CallStack => format!(
            "The call stack of `{}` grows to {space} depth.",
            recursion.unwrap_or("the recursion")
        ),
    }
}
