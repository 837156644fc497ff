use algoscope::config::{load_config_file, load_config_from, CONFIG_FILE_NAME};
use algoscope::{Analyzer, AnalyzerConfig};
use std::fs;
use tempfile::TempDir;

const SETTINGS_PY: &str = "timeout = 3600\nretries = 7\n";

fn messages(analyzer: &Analyzer) -> Vec<String> {
    analyzer
        .analyze(SETTINGS_PY, "python")
        .unwrap()
        .suggestions
        .into_iter()
        .map(|s| s.message)
        .collect()
}

#[test]
fn test_default_config_flags_magic_numbers() {
    let found = messages(&Analyzer::new());
    assert!(found
        .iter()
        .any(|m| m == "Replace 2 magic numbers with named constants (first on line 1)"));
}

#[test]
fn test_config_file_changes_thresholds() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("strict.toml");
    fs::write(
        &path,
        "[thresholds]\nmax_line_length = 12\nallowed_numbers = [0, 1, 7, 3600]\n",
    )
    .unwrap();

    let analyzer = Analyzer::new().with_config(load_config_file(&path).unwrap());
    let found = messages(&analyzer);
    assert!(!found.iter().any(|m| m.contains("magic number")));
    assert!(found
        .iter()
        .any(|m| m == "1 line(s) exceed 12 characters; wrap them for readability"));
}

#[test]
fn test_discovered_config_caps_suggestions() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[suggestions]\nmax_suggestions = 1\n",
    )
    .unwrap();

    let config = load_config_from(dir.path().to_path_buf());
    assert_eq!(config.suggestions.max_suggestions, 1);
    let analyzer = Analyzer::new().with_config(config);
    assert_eq!(messages(&analyzer).len(), 1);
}

#[test]
fn test_absent_config_is_default() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("src");
    fs::create_dir_all(&nested).unwrap();
    // Ancestors above the temp dir may hold a real config; only check the type round-trips.
    let config = load_config_from(nested);
    assert!(config.suggestions.max_suggestions > 0);
    assert_eq!(AnalyzerConfig::default().suggestions.max_suggestions, 10);
}
