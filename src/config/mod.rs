//! Analyzer configuration loaded from `.algoscope.toml`.

mod core;
mod loader;
mod scoring;
mod thresholds;

pub use self::core::{default_max_suggestions, AnalyzerConfig, SuggestionConfig};
pub use loader::{
    directory_ancestors, load_config, load_config_file, load_config_from,
    parse_and_validate_config, CONFIG_FILE_NAME,
};
pub use scoring::{
    default_efficiency_weight, default_maintainability_weight, default_readability_weight,
    QualityWeights,
};
pub use thresholds::{
    default_allowed_numbers, default_duplicate_window, default_duplication_threshold,
    default_max_function_lines, default_max_line_length, default_max_nesting,
    default_min_comment_ratio, Thresholds,
};
