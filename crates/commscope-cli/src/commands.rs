//! Command handlers for the CLI.
//!
//! Each handler resolves defaults from the loaded [`AppConfig`], calls into
//! `commscope-integrate`, and prints a short summary to stdout. Progress is
//! logged through `tracing`.

use std::path::PathBuf;

use anyhow::Context;
use commscope_core::{AppConfig, Platform, PlatformScaling};
use commscope_integrate::pipeline::{CLASSIFIED_FILE, COMMUNITIES_FILE};
use commscope_integrate::{rate_source, CommunityType, CrossPlatformMetrics, RateSource};

/// Scaling factors from `COMMSCOPE_SCALING_PATH`, or the built-in defaults.
///
/// # Errors
///
/// Returns an error if the configured file cannot be read or is invalid.
pub(crate) fn load_scaling(config: &AppConfig) -> anyhow::Result<PlatformScaling> {
    match &config.scaling_path {
        Some(path) => {
            let scaling = commscope_core::load_scaling(path)
                .with_context(|| format!("loading scaling factors from {}", path.display()))?;
            tracing::info!(path = %path.display(), "loaded platform scaling factors");
            Ok(scaling)
        }
        None => Ok(PlatformScaling::default()),
    }
}

/// The command-line seed wins over the configured one.
pub(crate) fn resolve_seed(config: &AppConfig, seed: Option<u64>) -> Option<u64> {
    seed.or(config.rng_seed)
}

fn sampler(config: &AppConfig, seed: Option<u64>) -> Box<dyn RateSource> {
    let seed = resolve_seed(config, seed);
    match seed {
        Some(seed) => tracing::info!(seed, "synthetic engagement is seeded"),
        None => tracing::debug!("synthetic engagement is not seeded"),
    }
    rate_source(seed)
}

fn print_metrics(metrics: &CrossPlatformMetrics) {
    println!("communities: {}", metrics.total_communities);
    for platform in Platform::ALL {
        let name = platform.to_string();
        let count = metrics
            .platform_distribution
            .get(&platform)
            .copied()
            .unwrap_or(0);
        match metrics.engagement(platform) {
            Some(e) => println!(
                "  {name:<10} {count:>6}  engagement {:>6.2}%  normalized {:>6.2}%",
                e.raw_mean * 100.0,
                e.normalized_mean * 100.0
            ),
            None => println!("  {name:<10} {count:>6}"),
        }
    }
}

/// Run the full pipeline.
///
/// # Errors
///
/// Returns an error if the scaling file is invalid or an output cannot be written.
pub(crate) fn run_full(config: &AppConfig, seed: Option<u64>) -> anyhow::Result<()> {
    let scaling = load_scaling(config)?;
    let mut source = sampler(config, seed);

    let outcome = commscope_integrate::run_integration(config, &scaling, source.as_mut())?;

    print_metrics(&outcome.metrics);
    println!("wrote {}", outcome.paths.communities.display());
    println!("wrote {}", outcome.paths.metrics.display());
    println!("wrote {}", outcome.paths.report.display());
    Ok(())
}

/// Load and normalize only.
///
/// # Errors
///
/// Returns an error if the integrated CSV cannot be written.
pub(crate) fn run_normalize_only(config: &AppConfig, seed: Option<u64>) -> anyhow::Result<()> {
    let mut source = sampler(config, seed);
    let (communities, path) = commscope_integrate::run_normalize(config, source.as_mut())?;
    println!(
        "normalized {} communities into {}",
        communities.len(),
        path.display()
    );
    Ok(())
}

/// Recompute metrics from an existing integrated CSV.
///
/// # Errors
///
/// Returns an error if the input cannot be read, the scaling file is invalid,
/// or the metrics file cannot be written.
pub(crate) fn run_metrics(config: &AppConfig, input: Option<PathBuf>) -> anyhow::Result<()> {
    let input = input.unwrap_or_else(|| config.output_dir.join(COMMUNITIES_FILE));
    let scaling = load_scaling(config)?;

    let (metrics, path) = commscope_integrate::run_metrics(config, &scaling, &input)
        .with_context(|| format!("computing metrics from {}", input.display()))?;

    print_metrics(&metrics);
    println!("wrote {}", path.display());
    Ok(())
}

/// Classify an integrated CSV by relevance.
///
/// # Errors
///
/// Returns an error if the input cannot be read or the output cannot be written.
pub(crate) fn run_classify(
    config: &AppConfig,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let input = input.unwrap_or_else(|| config.output_dir.join(COMMUNITIES_FILE));
    let output = output.unwrap_or_else(|| config.output_dir.join(CLASSIFIED_FILE));

    let classified = commscope_integrate::run_classify(&input, &output)
        .with_context(|| format!("classifying {}", input.display()))?;

    println!("relevant communities: {}", classified.len());
    for kind in [
        CommunityType::StudentFocused,
        CommunityType::ProfessionalFocused,
        CommunityType::Mixed,
    ] {
        let count = classified
            .iter()
            .filter(|c| c.score.community_type == kind)
            .count();
        println!("  {kind}: {count}");
    }
    println!("wrote {}", output.display());
    Ok(())
}
