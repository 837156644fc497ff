use algoscope::cli::{Cli, Commands};
use algoscope::commands::{self, AnalyzeConfig};
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    algoscope::observability::install_panic_hook();
    let cli = Cli::parse();
    init_logging(cli.command.verbosity());

    match cli.command {
        Commands::Analyze {
            paths,
            language,
            format,
            output,
            config,
            max_suggestions,
            detailed,
            verbosity: _,
        } => {
            let all_succeeded = commands::handle_analyze(AnalyzeConfig {
                paths,
                language,
                format,
                output,
                config,
                max_suggestions,
                detailed,
            })?;
            if !all_succeeded {
                std::process::exit(1);
            }
        }
        Commands::Languages => commands::list_languages(),
        Commands::Init { force } => commands::init_config(force)?,
    }
    Ok(())
}

/// `RUST_LOG` wins; otherwise each `-v` raises the level from `warn`.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
