use crate::languages::ProfileRegistry;
use colored::*;

/// One line per language: tag, display name, aliases and extensions.
pub fn language_lines(registry: &ProfileRegistry) -> Vec<String> {
    registry
        .profiles()
        .map(|profile| {
            let aliases = if profile.aliases.is_empty() {
                String::new()
            } else {
                format!(" (aliases: {})", profile.aliases.join(", "))
            };
            format!(
                "{:<12} {:<12} .{}{}",
                profile.name,
                profile.display_name,
                profile.extensions.join(" ."),
                aliases
            )
        })
        .collect()
}

pub fn list_languages() {
    println!("{}", "Supported languages".bold());
    for line in language_lines(&ProfileRegistry::shared()) {
        println!("  {line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_builtin_languages() {
        let lines = language_lines(&ProfileRegistry::builtin());
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().any(|line| line.starts_with("javascript") && line.contains("js")));
        assert!(lines.iter().any(|line| line.starts_with("java ") && !line.contains("aliases")));
    }
}
