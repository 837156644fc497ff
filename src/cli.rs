use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "algoscope")]
#[command(about = "Structural analysis of algorithm source code", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze source files (use `-` for standard input)
    Analyze {
        /// Files to analyze
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Language tag; inferred from the file extension when omitted
        #[arg(short, long)]
        language: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (defaults to the nearest .algoscope.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Maximum suggestions per input
        #[arg(long = "max-suggestions")]
        max_suggestions: Option<usize>,

        /// Include internal error details in failure reports
        #[arg(long)]
        detailed: bool,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// List supported languages
    Languages,

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Json,
    Terminal,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}

impl Commands {
    /// `-v` count for commands that take one.
    pub fn verbosity(&self) -> u8 {
        match self {
            Commands::Analyze { verbosity, .. } => *verbosity,
            Commands::Languages | Commands::Init { .. } => 0,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_conversion() {
        assert_eq!(
            crate::io::output::OutputFormat::from(OutputFormat::Json),
            crate::io::output::OutputFormat::Json
        );
        assert_eq!(
            crate::io::output::OutputFormat::from(OutputFormat::Terminal),
            crate::io::output::OutputFormat::Terminal
        );
    }

    #[test]
    fn test_cli_parsing_analyze_command() {
        let args = vec![
            "algoscope",
            "analyze",
            "search.js",
            "-",
            "--language",
            "javascript",
            "--format",
            "json",
            "--max-suggestions",
            "3",
            "-vv",
        ];

        let cli = Cli::parse_from(args);
        assert_eq!(cli.command.verbosity(), 2);

        match cli.command {
            Commands::Analyze {
                paths,
                language,
                format,
                max_suggestions,
                ..
            } => {
                assert_eq!(paths, vec![PathBuf::from("search.js"), PathBuf::from("-")]);
                assert_eq!(language.as_deref(), Some("javascript"));
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(max_suggestions, Some(3));
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_analyze_requires_a_path() {
        assert!(Cli::try_parse_from(["algoscope", "analyze"]).is_err());
    }

    #[test]
    fn test_cli_parsing_init_command() {
        let cli = Cli::parse_from(["algoscope", "init", "--force"]);

        match cli.command {
            Commands::Init { force } => assert!(force),
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn test_default_format_is_terminal() {
        let cli = Cli::parse_from(["algoscope", "analyze", "a.py"]);
        match cli.command {
            Commands::Analyze { format, .. } => assert_eq!(format, OutputFormat::Terminal),
            _ => panic!("Expected Analyze command"),
        }
    }
}
