//! Integration run orchestration.

use std::path::{Path, PathBuf};

use chrono::Utc;
use commscope_core::{AppConfig, CanonicalCommunity, PlatformScaling};

use crate::aggregate::{aggregate, CrossPlatformMetrics};
use crate::engagement::RateSource;
use crate::error::IntegrateError;
use crate::io::{read_canonical, write_classified, write_communities, write_metrics, write_text};
use crate::normalize::normalize;
use crate::relevance::{filter_relevant, ClassifiedCommunity};
use crate::report::render_report;
use crate::sources::load_all;

pub const COMMUNITIES_FILE: &str = "integrated_communities.csv";
pub const METRICS_FILE: &str = "cross_platform_metrics.json";
pub const REPORT_FILE: &str = "integration_report.txt";
pub const CLASSIFIED_FILE: &str = "classified_communities.csv";

/// Artifacts written by a full run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub communities: PathBuf,
    pub metrics: PathBuf,
    pub report: PathBuf,
}

impl OutputPaths {
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            communities: dir.join(COMMUNITIES_FILE),
            metrics: dir.join(METRICS_FILE),
            report: dir.join(REPORT_FILE),
        }
    }
}

/// Everything a full run produced.
#[derive(Debug)]
pub struct IntegrationOutcome {
    pub communities: Vec<CanonicalCommunity>,
    pub metrics: CrossPlatformMetrics,
    pub paths: OutputPaths,
}

/// Load, normalize, and write `integrated_communities.csv`.
///
/// # Errors
///
/// Returns [`IntegrateError`] only when the output cannot be written; input
/// problems are logged and the affected platform is treated as empty.
pub fn run_normalize(
    config: &AppConfig,
    source: &mut dyn RateSource,
) -> Result<(Vec<CanonicalCommunity>, PathBuf), IntegrateError> {
    let raw = load_all(config);
    let communities = normalize(&raw, source);
    tracing::info!(total = communities.len(), "normalized communities");

    let path = config.output_dir.join(COMMUNITIES_FILE);
    write_communities(&path, &communities)?;
    Ok((communities, path))
}

/// Full run: load, normalize, aggregate, report, writing every artifact to
/// the configured output directory.
///
/// # Errors
///
/// Returns [`IntegrateError`] when an output file cannot be written.
pub fn run_integration(
    config: &AppConfig,
    scaling: &PlatformScaling,
    source: &mut dyn RateSource,
) -> Result<IntegrationOutcome, IntegrateError> {
    tracing::info!(output_dir = %config.output_dir.display(), "starting integration run");

    let (communities, communities_path) = run_normalize(config, source)?;
    let paths = OutputPaths {
        communities: communities_path,
        ..OutputPaths::in_dir(&config.output_dir)
    };

    let metrics = aggregate(&communities, scaling, config.top_categories);
    write_metrics(&paths.metrics, &metrics)?;

    let report = render_report(&communities, &metrics, config.top_communities, Utc::now());
    write_text(&paths.report, &report)?;

    tracing::info!(
        communities = communities.len(),
        report = %paths.report.display(),
        "integration run complete"
    );

    Ok(IntegrationOutcome {
        communities,
        metrics,
        paths,
    })
}

/// Aggregate an existing integrated CSV and write the metrics JSON into the
/// configured output directory.
///
/// # Errors
///
/// Returns [`IntegrateError`] if the input cannot be read or the output
/// cannot be written.
pub fn run_metrics(
    config: &AppConfig,
    scaling: &PlatformScaling,
    input: &Path,
) -> Result<(CrossPlatformMetrics, PathBuf), IntegrateError> {
    let communities = read_canonical(input)?;
    tracing::info!(path = %input.display(), count = communities.len(), "read integrated communities");

    let metrics = aggregate(&communities, scaling, config.top_categories);
    let path = config.output_dir.join(METRICS_FILE);
    write_metrics(&path, &metrics)?;
    Ok((metrics, path))
}

/// Relevance-classify an existing integrated CSV and write the relevant rows.
///
/// # Errors
///
/// Returns [`IntegrateError`] if the input cannot be read or the output
/// cannot be written.
pub fn run_classify(
    input: &Path,
    output: &Path,
) -> Result<Vec<ClassifiedCommunity>, IntegrateError> {
    let communities = read_canonical(input)?;
    let classified = filter_relevant(&communities);
    write_classified(output, &classified)?;
    Ok(classified)
}
