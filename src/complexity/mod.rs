//! Time and space complexity estimation.
//!
//! Time rules form an ordered table; the first rule whose check succeeds
//! decides the class. Space is the larger of auxiliary allocations and the
//! call-stack depth of the deepest recursion.

pub mod explanation;
pub mod facts;

pub use explanation::{explain, ExplanationContext};
pub use facts::{ControlFlow, LoopKind, RecursionFact, RecursionKind};

use crate::core::syntax::Syntax;
use crate::core::types::{
    ComplexityClass, ComplexityEstimate, SpaceBasis, StructureCategory, StructureSummary, TimeRule,
};

/// Outcome of a successful time rule: the recursive function it refers to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Finding {
    pub recursion: Option<String>,
}

impl Finding {
    fn plain() -> Option<Self> {
        Some(Self::default())
    }

    fn about(fact: &RecursionFact) -> Option<Self> {
        Some(Self {
            recursion: Some(fact.name.clone()),
        })
    }
}

type RuleCheck = fn(&ControlFlow) -> Option<Finding>;

pub struct TimeRuleEntry {
    pub rule: TimeRule,
    pub class: ComplexityClass,
    check: RuleCheck,
}

/// Evaluation order of the time rules.
pub static TIME_RULES: &[TimeRuleEntry] = &[
    TimeRuleEntry {
        rule: TimeRule::HalvingRecursion,
        class: ComplexityClass::Logarithmic,
        check: |flow| {
            if flow.has_linear_work() {
                return None;
            }
            flow.recursion_of(RecursionKind::Halving).and_then(Finding::about)
        },
    },
    TimeRuleEntry {
        rule: TimeRule::HalvingLoop,
        class: ComplexityClass::Logarithmic,
        check: |flow| {
            let halving = flow.halving_loops().next().is_some();
            (halving && !flow.has_linear_work() && flow.recursion.is_empty())
                .then(Finding::default)
        },
    },
    TimeRuleEntry {
        rule: TimeRule::Traversal,
        class: ComplexityClass::Linear,
        check: |flow| match flow.recursion_of(RecursionKind::Traversal) {
            Some(fact) if flow.max_depth < 2 => Finding::about(fact),
            _ if flow.worklist_traversal && flow.max_depth <= 2 && flow.scan_in_loop.is_none() => {
                Finding::plain()
            }
            _ => None,
        },
    },
    TimeRuleEntry {
        rule: TimeRule::BranchingRecursion,
        class: ComplexityClass::Exponential,
        check: |flow| flow.recursion_of(RecursionKind::Branching).and_then(Finding::about),
    },
    TimeRuleEntry {
        rule: TimeRule::NestedLoops,
        class: ComplexityClass::Quadratic,
        check: |flow| (flow.max_depth >= 2).then(Finding::default),
    },
    TimeRuleEntry {
        rule: TimeRule::ScanInsideLoop,
        class: ComplexityClass::Quadratic,
        check: |flow| flow.scan_in_loop.and(Finding::plain()),
    },
    TimeRuleEntry {
        rule: TimeRule::DivideAndConquer,
        class: ComplexityClass::Linearithmic,
        check: |flow| {
            flow.recursion_of(RecursionKind::DivideAndConquer)
                .and_then(Finding::about)
        },
    },
    TimeRuleEntry {
        rule: TimeRule::LoopOverHalving,
        class: ComplexityClass::Linearithmic,
        check: |flow| flow.halving_in_linear.then(Finding::default),
    },
    TimeRuleEntry {
        rule: TimeRule::SortWithPass,
        class: ComplexityClass::Linearithmic,
        check: |flow| {
            let pass = flow.linear_loops().next().is_some() || !flow.scans.is_empty();
            (!flow.sorts.is_empty() && pass).then(Finding::default)
        },
    },
    TimeRuleEntry {
        rule: TimeRule::Sort,
        class: ComplexityClass::Linearithmic,
        check: |flow| (!flow.sorts.is_empty()).then(Finding::default),
    },
    TimeRuleEntry {
        rule: TimeRule::SingleLoop,
        class: ComplexityClass::Linear,
        check: |flow| flow.linear_loops().next().map(|_| Finding::default()),
    },
    TimeRuleEntry {
        rule: TimeRule::LinearRecursion,
        class: ComplexityClass::Linear,
        check: |flow| flow.recursion_of(RecursionKind::Linear).and_then(Finding::about),
    },
    TimeRuleEntry {
        rule: TimeRule::LinearBuiltin,
        class: ComplexityClass::Linear,
        check: |flow| {
            (!flow.scans.is_empty() || !flow.allocations.is_empty()).then(Finding::default)
        },
    },
    TimeRuleEntry {
        rule: TimeRule::Constant,
        class: ComplexityClass::Constant,
        check: |_| Finding::plain(),
    },
];

/// First matching time rule. The table ends with an unconditional rule.
pub fn classify_time(flow: &ControlFlow) -> (&'static TimeRuleEntry, Finding) {
    TIME_RULES
        .iter()
        .find_map(|entry| (entry.check)(flow).map(|finding| (entry, finding)))
        .unwrap_or_else(|| {
            let last = &TIME_RULES[TIME_RULES.len() - 1];
            (last, Finding::default())
        })
}

/// Space class, its basis and the recursion it came from.
pub fn classify_space(flow: &ControlFlow) -> (ComplexityClass, SpaceBasis, Option<String>) {
    let auxiliary = flow.auxiliary_class();
    let stack = flow.deepest_recursion();

    match (auxiliary, stack) {
        (Some(aux), Some(fact)) if fact.depth_class() > aux => {
            (fact.depth_class(), SpaceBasis::CallStack, Some(fact.name.clone()))
        }
        (Some(aux), _) => (aux, SpaceBasis::Auxiliary, None),
        (None, Some(fact)) => (fact.depth_class(), SpaceBasis::CallStack, Some(fact.name.clone())),
        (None, None) => (ComplexityClass::Constant, SpaceBasis::Scalars, None),
    }
}

/// Estimates time and space complexity from the syntax view and the
/// structures already detected in it.
pub fn estimate(syntax: &Syntax<'_>, structures: &[StructureSummary]) -> ComplexityEstimate {
    let _span = tracing::debug_span!("estimate_complexity").entered();
    let flow = ControlFlow::extract(syntax, structures);
    estimate_from_flow(&flow, structures)
}

pub fn estimate_from_flow(flow: &ControlFlow, structures: &[StructureSummary]) -> ComplexityEstimate {
    let (entry, finding) = classify_time(flow);
    let (space_class, space_basis, space_recursion) = classify_space(flow);

    let context = ExplanationContext {
        recursion: finding.recursion.as_deref(),
        loop_depth: flow.max_depth,
        searches_array: structures
            .iter()
            .any(|s| s.name == StructureCategory::Array),
    };
    let explanation = explain(
        entry.rule,
        space_class,
        space_basis,
        space_recursion.as_deref(),
        context,
    );
    log::debug!(
        "Time rule {:?} -> {}, space {:?} -> {}",
        entry.rule,
        entry.class,
        space_basis,
        space_class
    );

    ComplexityEstimate {
        time_class: entry.class,
        space_class,
        explanation,
        time_rule: entry.rule,
        space_basis,
        recursion: finding.recursion.or(space_recursion),
        loop_depth: flow.max_depth,
    }
}
