use crate::config::{AnalyzerConfig, CONFIG_FILE_NAME};
use crate::io;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Default configuration rendered as TOML, with a short header.
pub fn default_config_toml() -> Result<String> {
    let body = toml::to_string_pretty(&AnalyzerConfig::default())?;
    Ok(format!("# Algoscope Configuration\n\n{body}"))
}

pub fn init_config_in(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, &default_config_toml()?)?;
    Ok(config_path)
}

pub fn init_config(force: bool) -> Result<()> {
    let path = init_config_in(Path::new("."), force)?;
    println!("Created {} configuration file", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_and_validate_config;

    #[test]
    fn test_default_config_parses_back() {
        let contents = default_config_toml().unwrap();
        assert!(contents.contains("[thresholds]"));
        assert_eq!(
            parse_and_validate_config(&contents).unwrap(),
            AnalyzerConfig::default()
        );
    }

    #[test]
    fn test_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        init_config_in(dir.path(), false).unwrap();
        assert!(init_config_in(dir.path(), false).is_err());
        assert!(init_config_in(dir.path(), true).is_ok());
    }
}
