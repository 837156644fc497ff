use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;

use super::core::AnalyzerConfig;
use super::scoring::QualityWeights;
use super::thresholds::Thresholds;

pub const CONFIG_FILE_NAME: &str = ".algoscope.toml";
const MAX_TRAVERSAL_DEPTH: usize = 10;

pub(crate) fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parses a TOML document and repairs invalid sections with defaults.
pub fn parse_and_validate_config(contents: &str) -> Result<AnalyzerConfig, String> {
    let mut config = toml::from_str::<AnalyzerConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))?;

    if let Err(e) = config.quality.validate() {
        log::warn!("Invalid quality weights: {}. Using defaults.", e);
        config.quality = QualityWeights::default();
    } else {
        config.quality.normalize();
    }

    if let Err(e) = config.thresholds.validate() {
        log::warn!("Invalid thresholds: {}. Using defaults.", e);
        config.thresholds = Thresholds::default();
    }

    Ok(config)
}

pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<AnalyzerConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Only actual errors are logged, not "file not found".
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Searches `start` and its ancestors for the config file.
pub fn load_config_from(start: PathBuf) -> AnalyzerConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            AnalyzerConfig::default()
        })
}

pub fn load_config() -> AnalyzerConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            AnalyzerConfig::default()
        }
    }
}

/// Loads an explicitly named file. Unlike discovery, failures are errors.
pub fn load_config_file(path: &Path) -> anyhow::Result<AnalyzerConfig> {
    let contents = read_config_file(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse_and_validate_config(&contents)
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("Invalid config file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_document() {
        let config = parse_and_validate_config(indoc! {"
            [quality]
            readability = 0.2
            efficiency = 0.6
            maintainability = 0.2

            [thresholds]
            max_line_length = 80

            [suggestions]
            max_suggestions = 3
        "})
        .unwrap();
        assert_eq!(config.quality.efficiency, 0.6);
        assert_eq!(config.thresholds.max_line_length, 80);
        assert_eq!(config.suggestions.max_suggestions, 3);
    }

    #[test]
    fn test_invalid_weights_use_defaults() {
        let config = parse_and_validate_config("[quality]\nreadability = 4.0\n").unwrap();
        assert_eq!(config.quality, QualityWeights::default());
    }

    #[test]
    fn test_syntax_error_is_reported() {
        assert!(parse_and_validate_config("[quality\n").is_err());
    }

    #[test]
    fn test_discovers_config_in_ancestor() {
        let root = TempDir::new().unwrap();
        fs::write(
            root.path().join(CONFIG_FILE_NAME),
            "[suggestions]\nmax_suggestions = 4\n",
        )
        .unwrap();
        let nested = root.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let config = load_config_from(nested);
        assert_eq!(config.suggestions.max_suggestions, 4);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let root = TempDir::new().unwrap();
        assert!(load_config_file(&root.path().join("missing.toml")).is_err());
    }

    #[test]
    fn test_directory_ancestors_limit() {
        let dirs: Vec<PathBuf> = directory_ancestors(PathBuf::from("/a/b/c/d"), 2).collect();
        assert_eq!(dirs, vec![PathBuf::from("/a/b/c/d"), PathBuf::from("/a/b/c")]);
    }
}
