//! Quality scoring.
//!
//! Each metric starts from a base value and moves by bounded adjustments
//! derived from [`QualitySignals`], then clamps to `0..=100`. The overall
//! score is the weighted mean of the three metrics.

pub mod duplication;
pub mod signals;

pub use duplication::{detect_duplication, Duplication};
pub use signals::{LongestFunction, MagicNumber, QualitySignals};

use crate::config::{AnalyzerConfig, QualityWeights, Thresholds};
use crate::core::syntax::Syntax;
use crate::core::types::{
    CodeQuality, ComplexityClass, ComplexityEstimate, QualityMetrics, TimeRule,
};

const READABILITY_BASE: i32 = 80;
const EFFICIENCY_BASE: i32 = 85;
const MAINTAINABILITY_BASE: i32 = 100;

/// Rules whose estimate is already the best known bound for the problem shape.
const OPTIMAL_RULES: &[TimeRule] = &[
    TimeRule::HalvingRecursion,
    TimeRule::HalvingLoop,
    TimeRule::DivideAndConquer,
    TimeRule::LoopOverHalving,
    TimeRule::Traversal,
];

/// Signals and the metrics computed from them.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityAssessment {
    pub signals: QualitySignals,
    pub quality: CodeQuality,
}

pub fn assess(
    syntax: &Syntax<'_>,
    complexity: &ComplexityEstimate,
    config: &AnalyzerConfig,
) -> QualityAssessment {
    let _span = tracing::debug_span!("score_quality").entered();
    let signals = QualitySignals::collect(syntax, &config.thresholds);
    let quality = score(&signals, complexity, &config.thresholds, &config.quality);
    log::debug!(
        "Quality score {} (readability {}, efficiency {}, maintainability {})",
        quality.score,
        quality.metrics.readability,
        quality.metrics.efficiency,
        quality.metrics.maintainability
    );
    QualityAssessment { signals, quality }
}

pub fn score(
    signals: &QualitySignals,
    complexity: &ComplexityEstimate,
    thresholds: &Thresholds,
    weights: &QualityWeights,
) -> CodeQuality {
    let metrics = QualityMetrics {
        readability: readability(signals, thresholds),
        efficiency: efficiency(complexity),
        maintainability: maintainability(signals, thresholds),
    };
    CodeQuality {
        score: overall(&metrics, weights),
        metrics,
    }
}

pub fn readability(signals: &QualitySignals, thresholds: &Thresholds) -> u8 {
    let mut value = READABILITY_BASE;
    let named_consistently = !signals.mixed_naming() && signals.single_letter_names.is_empty();
    if named_consistently {
        value += 10;
    }
    let ratio = signals.comment_ratio();
    if ratio >= thresholds.min_comment_ratio {
        value += 10;
    } else if signals.code_lines >= 10 {
        value -= 10;
    }
    value -= penalty(signals.long_lines, 2, 20);
    value -= penalty(signals.excess_nesting(thresholds), 8, 24);
    value -= penalty(signals.single_letter_names.len(), 4, 16);
    if signals.mixed_naming() {
        value -= 10;
    }
    clamp(value)
}

pub fn efficiency(complexity: &ComplexityEstimate) -> u8 {
    let mut value = EFFICIENCY_BASE;
    if OPTIMAL_RULES.contains(&complexity.time_rule) {
        value += 10;
    }
    value -= match complexity.time_class {
        ComplexityClass::Exponential => 60,
        ComplexityClass::Quadratic => 30,
        _ => 0,
    };
    value -= match complexity.space_class {
        ComplexityClass::Exponential => 30,
        ComplexityClass::Quadratic => 15,
        _ => 0,
    };
    if complexity.loop_depth >= 3 {
        value -= 10;
    }
    clamp(value)
}

pub fn maintainability(signals: &QualitySignals, thresholds: &Thresholds) -> u8 {
    let mut value = MAINTAINABILITY_BASE;
    value -= (signals.excess_function_lines(thresholds) as i32 / 2).min(30);
    let duplicated = signals.duplication.fraction();
    if duplicated > thresholds.duplication_threshold {
        value -= ((duplicated * 100.0).round() as i32).min(30);
    }
    value -= penalty(signals.magic_numbers.len(), 3, 20);
    clamp(value)
}

fn overall(metrics: &QualityMetrics, weights: &QualityWeights) -> u8 {
    let weights = weights.normalized();
    let mean = f64::from(metrics.readability) * weights.readability
        + f64::from(metrics.efficiency) * weights.efficiency
        + f64::from(metrics.maintainability) * weights.maintainability;
    mean.round().clamp(0.0, 100.0) as u8
}

fn penalty(count: usize, each: i32, cap: i32) -> i32 {
    (count.min(cap as usize) as i32 * each).min(cap)
}

fn clamp(value: i32) -> u8 {
    value.clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::SpaceBasis;

    fn quiet_signals() -> QualitySignals {
        QualitySignals {
            code_lines: 5,
            comment_lines: 1,
            long_lines: 0,
            max_nesting: 1,
            camel_case_names: 1,
            snake_case_names: 0,
            single_letter_names: Vec::new(),
            longest_function: None,
            duplication: Duplication::default(),
            magic_numbers: Vec::new(),
        }
    }

    fn estimate(time: ComplexityClass, space: ComplexityClass, rule: TimeRule) -> ComplexityEstimate {
        ComplexityEstimate {
            time_class: time,
            space_class: space,
            explanation: String::new(),
            time_rule: rule,
            space_basis: SpaceBasis::Scalars,
            recursion: None,
            loop_depth: 0,
        }
    }

    #[test]
    fn test_clean_code_reads_well() {
        assert_eq!(readability(&quiet_signals(), &Thresholds::default()), 100);
    }

    #[test]
    fn test_readability_penalties_are_capped() {
        let mut signals = quiet_signals();
        signals.code_lines = 40;
        signals.comment_lines = 0;
        signals.long_lines = 30;
        signals.max_nesting = 12;
        signals.snake_case_names = 2;
        // 80 - 10 (no comments) - 20 (long lines) - 24 (nesting) - 10 (mixed)
        assert_eq!(readability(&signals, &Thresholds::default()), 16);
    }

    #[test]
    fn test_efficiency_by_class() {
        let log = estimate(ComplexityClass::Logarithmic, ComplexityClass::Constant, TimeRule::HalvingLoop);
        assert_eq!(efficiency(&log), 95);
        let quad = estimate(ComplexityClass::Quadratic, ComplexityClass::Quadratic, TimeRule::NestedLoops);
        assert_eq!(efficiency(&quad), 40);
        let exp = estimate(ComplexityClass::Exponential, ComplexityClass::Linear, TimeRule::BranchingRecursion);
        assert_eq!(efficiency(&exp), 25);
        let linear = estimate(ComplexityClass::Linear, ComplexityClass::Constant, TimeRule::SingleLoop);
        assert_eq!(efficiency(&linear), 85);
    }

    #[test]
    fn test_maintainability_penalties() {
        let mut signals = quiet_signals();
        signals.longest_function = Some(LongestFunction {
            name: Some("process".into()),
            line: 1,
            lines: 90,
        });
        signals.magic_numbers = (0..3)
            .map(|line| MagicNumber { text: "42".into(), line })
            .collect();
        signals.duplication = Duplication {
            duplicated_tokens: 25,
            total_tokens: 100,
            first_line: Some(10),
        };
        // 100 - 20 (40 excess lines) - 25 (duplication) - 9 (magic numbers)
        assert_eq!(maintainability(&signals, &Thresholds::default()), 46);
    }

    #[test]
    fn test_overall_is_weighted_mean() {
        let metrics = QualityMetrics {
            readability: 80,
            efficiency: 95,
            maintainability: 80,
        };
        // 0.3 * 80 + 0.4 * 95 + 0.3 * 80 = 86
        assert_eq!(overall(&metrics, &QualityWeights::default()), 86);
        let equal = QualityWeights {
            readability: 1.0,
            efficiency: 1.0,
            maintainability: 1.0,
        };
        assert_eq!(overall(&metrics, &equal), 85);
    }
}
