use serde::{Deserialize, Serialize};

/// Heuristic thresholds used by the quality scorer and suggestion rules
/// (`[thresholds]` table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,

    /// Block nesting above this level is penalized
    #[serde(default = "default_max_nesting")]
    pub max_nesting: usize,

    /// Comment lines per code line considered adequately documented
    #[serde(default = "default_min_comment_ratio")]
    pub min_comment_ratio: f64,

    #[serde(default = "default_max_function_lines")]
    pub max_function_lines: usize,

    /// Tokens per fingerprint window in duplicate detection
    #[serde(default = "default_duplicate_window")]
    pub duplicate_window: usize,

    /// Fraction of duplicated tokens tolerated before penalizing
    #[serde(default = "default_duplication_threshold")]
    pub duplication_threshold: f64,

    /// Numeric literals that never count as magic numbers
    #[serde(default = "default_allowed_numbers")]
    pub allowed_numbers: Vec<i64>,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            max_line_length: default_max_line_length(),
            max_nesting: default_max_nesting(),
            min_comment_ratio: default_min_comment_ratio(),
            max_function_lines: default_max_function_lines(),
            duplicate_window: default_duplicate_window(),
            duplication_threshold: default_duplication_threshold(),
            allowed_numbers: default_allowed_numbers(),
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<(), String> {
        if self.duplicate_window < 2 {
            return Err("duplicate_window must be at least 2".to_string());
        }
        if !(0.0..=1.0).contains(&self.duplication_threshold) {
            return Err("duplication_threshold must be between 0.0 and 1.0".to_string());
        }
        if self.min_comment_ratio < 0.0 {
            return Err("min_comment_ratio must not be negative".to_string());
        }
        Ok(())
    }

    pub fn is_allowed_number(&self, value: f64) -> bool {
        self.allowed_numbers
            .iter()
            .any(|&allowed| (allowed as f64 - value).abs() < f64::EPSILON)
    }
}

pub fn default_max_line_length() -> usize {
    100
}

pub fn default_max_nesting() -> usize {
    4
}

pub fn default_min_comment_ratio() -> f64 {
    0.1
}

pub fn default_max_function_lines() -> usize {
    50
}

pub fn default_duplicate_window() -> usize {
    12
}

pub fn default_duplication_threshold() -> f64 {
    0.1
}

pub fn default_allowed_numbers() -> Vec<i64> {
    vec![-1, 0, 1, 2]
}
