use crate::analyzers;
use crate::cli::OutputFormat;
use crate::cohesion::{CohesionScorer, CohesionThresholds};
use crate::config::CohesionConfig;
use crate::core::AnalysisResults;
use crate::io;
use crate::io::output::create_writer;
use crate::io::walker::find_rust_files;
use anyhow::Result;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Options for one analyze run, config merged with CLI overrides.
#[derive(Clone, Debug)]
pub struct AnalyzeOptions {
    pub path: PathBuf,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub min_fields: Option<usize>,
    pub min_methods: Option<usize>,
    pub threshold: Option<f64>,
    pub ignore: Option<Vec<String>>,
}

pub fn analyze_project(options: AnalyzeOptions) -> Result<()> {
    let config = CohesionConfig::load(&options.path)?;
    let thresholds = merge_thresholds(&config, &options);
    thresholds
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid thresholds: {}", e))?;

    let ignore_patterns = options
        .ignore
        .clone()
        .unwrap_or_else(|| config.ignore.patterns.clone());

    let results = run_analysis(&options.path, thresholds, ignore_patterns)?;
    write_results(&results, &config, &options)
}

/// Walk the tree and score every file. Files are independent, so the
/// per-file work runs in parallel; each file's snapshots are fully built
/// before its types are scored.
pub fn run_analysis(
    root: &Path,
    thresholds: CohesionThresholds,
    ignore_patterns: Vec<String>,
) -> Result<AnalysisResults> {
    let files = find_rust_files(root, ignore_patterns)?;
    let scorer = CohesionScorer::new(thresholds);

    let reports: Vec<_> = files
        .par_iter()
        .map(|file| {
            let content = match io::read_file(file) {
                Ok(content) => content,
                Err(err) => {
                    log::warn!("{err}");
                    return analyzers::FileCohesionReport::default();
                }
            };
            analyzers::analyze_file(&content, file, &scorer)
        })
        .collect();

    let mut results = AnalysisResults::new(root.to_path_buf());
    results.files_analyzed = files.len();
    for report in reports {
        results.types_examined += report.types_examined;
        results.types_skipped += report.types_skipped;
        results.findings.extend(report.findings);
    }
    // Deterministic report order regardless of worker scheduling.
    results
        .findings
        .sort_by(|a, b| (&a.file, a.line).cmp(&(&b.file, b.line)));

    log::info!(
        "Analyzed {} files: {} types examined, {} flagged",
        results.files_analyzed,
        results.types_examined,
        results.findings.len()
    );
    Ok(results)
}

fn merge_thresholds(config: &CohesionConfig, options: &AnalyzeOptions) -> CohesionThresholds {
    CohesionThresholds {
        min_fields: options.min_fields.unwrap_or(config.thresholds.min_fields),
        min_methods: options.min_methods.unwrap_or(config.thresholds.min_methods),
        disjoint_ratio: options.threshold.unwrap_or(config.thresholds.disjoint_ratio),
    }
}

fn write_results(
    results: &AnalysisResults,
    config: &CohesionConfig,
    options: &AnalyzeOptions,
) -> Result<()> {
    let format = match options.format {
        Some(format) => format,
        None => config
            .output
            .default_format
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))?,
    };

    let mut writer = match &options.output {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            create_writer(file, format.into())
        }
        None => create_writer(std::io::stdout(), format.into()),
    };
    writer.write_results(results)
}
