use crate::cache::AnalysisCache;
use crate::config::{self, AnalyzerConfig};
use crate::core::errors::AnalysisError;
use crate::io::{self, output::InputReport, STDIN_PATH};
use crate::observability::{increment_processed, set_current_input, set_phase, set_progress, AnalysisPhase};
use crate::pipeline::Analyzer;
use crate::request::AnalysisResponse;
use anyhow::Result;
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct AnalyzeConfig {
    pub paths: Vec<PathBuf>,
    pub language: Option<String>,
    pub format: crate::cli::OutputFormat,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub max_suggestions: Option<usize>,
    pub detailed: bool,
}

/// One input read into memory, with its display name and language tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInput {
    pub name: String,
    pub language: String,
    pub source: String,
}

/// Runs the analysis and writes the reports. Returns `false` when any input
/// failed to analyse.
pub fn handle_analyze(config: AnalyzeConfig) -> Result<bool> {
    let analyzer = Analyzer::new().with_config(resolve_config(&config)?);
    let inputs = config
        .paths
        .iter()
        .map(|path| read_source(path, config.language.as_deref(), &analyzer))
        .collect::<Result<Vec<_>>>()?;

    let reports = analyze_inputs(&analyzer, &inputs, config.detailed);
    let all_succeeded = reports.iter().all(|report| report.response.is_success());

    let _phase = set_phase(AnalysisPhase::OutputGeneration);
    let writer: Box<dyn Write> = match &config.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(std::io::stdout()),
    };
    let mut output = io::output::create_writer(config.format.into(), writer);
    output.write_reports(&reports)?;

    Ok(all_succeeded)
}

fn resolve_config(config: &AnalyzeConfig) -> Result<AnalyzerConfig> {
    let loaded = match &config.config {
        Some(path) => config::load_config_file(path)?,
        None => config::load_config(),
    };
    Ok(match config.max_suggestions {
        Some(max) => loaded.with_max_suggestions(max),
        None => loaded,
    })
}

/// The explicit language wins; otherwise the file extension decides. An
/// unknown extension is passed through so the report names it.
pub fn resolve_language(path: &Path, explicit: Option<&str>, analyzer: &Analyzer) -> String {
    if let Some(language) = explicit {
        return language.to_string();
    }
    match analyzer.registry().for_path(path) {
        Some(profile) => profile.name.to_string(),
        None => path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_string(),
    }
}

fn read_source(path: &Path, language: Option<&str>, analyzer: &Analyzer) -> Result<SourceInput> {
    let name = if path == Path::new(STDIN_PATH) {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    };
    Ok(SourceInput {
        name,
        language: resolve_language(path, language, analyzer),
        source: io::read_input(path)?,
    })
}

/// Analyses every input in parallel; report order follows input order.
pub fn analyze_inputs(analyzer: &Analyzer, inputs: &[SourceInput], detailed: bool) -> Vec<InputReport> {
    let cache = AnalysisCache::new();
    set_progress(0, inputs.len());

    let reports: Vec<InputReport> = inputs
        .par_iter()
        .map(|input| {
            let _input = set_current_input(input.name.clone());
            let result = cache.get_or_analyze(analyzer, &input.source, &input.language);
            if let Err(error) = &result {
                log_failure(&input.name, error);
            }
            increment_processed();
            InputReport::new(
                input.name.clone(),
                input.language.clone(),
                AnalysisResponse::from_result(result, detailed),
            )
        })
        .collect();

    let stats = cache.stats();
    log::debug!(
        "Analysed {} inputs ({} cache hits, {} distinct)",
        inputs.len(),
        stats.hits,
        stats.entries
    );
    reports
}

fn log_failure(name: &str, error: &AnalysisError) {
    if error.is_client_error() {
        log::warn!("Skipping {name}: {error}");
    } else {
        log::error!("Analysis of {name} failed: {error}");
    }
}
