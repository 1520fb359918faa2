//! Cross-platform comparison statistics over a normalized collection.

use std::collections::{BTreeMap, HashMap};

use commscope_core::{CanonicalCommunity, Platform, PlatformScaling};
use serde::Serialize;

/// Descriptive statistics for one platform's communities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformMetrics {
    pub platform: Platform,
    pub community_count: usize,
    pub member_count_mean: f64,
    pub member_count_median: f64,
    pub member_count_sum: u64,
    pub engagement_rate_mean: f64,
    pub engagement_rate_median: f64,
    pub post_frequency_mean: f64,
    pub post_frequency_median: f64,
    /// Fraction of communities that are public, in `[0, 1]`.
    pub public_fraction: f64,
}

/// Raw and scaled mean engagement for one platform.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformEngagement {
    pub platform: Platform,
    pub scaling_factor: f64,
    pub raw_mean: f64,
    pub normalized_mean: f64,
}

/// Row count of one category, in total and per platform.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDistribution {
    pub category: String,
    pub total: usize,
    /// Only platforms with at least one row in the category.
    pub by_platform: BTreeMap<Platform, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossPlatformMetrics {
    pub total_communities: usize,
    /// Every platform is present, with zero when it has no rows.
    pub platform_distribution: BTreeMap<Platform, usize>,
    pub platform_metrics: Vec<PlatformMetrics>,
    pub normalized_engagement: Vec<PlatformEngagement>,
    pub category_platform_distribution: Vec<CategoryDistribution>,
    pub avg_community_size: BTreeMap<Platform, f64>,
    pub scaling: PlatformScaling,
}

impl CrossPlatformMetrics {
    #[must_use]
    pub fn platform(&self, platform: Platform) -> Option<&PlatformMetrics> {
        self.platform_metrics.iter().find(|m| m.platform == platform)
    }

    #[must_use]
    pub fn engagement(&self, platform: Platform) -> Option<&PlatformEngagement> {
        self.normalized_engagement
            .iter()
            .find(|e| e.platform == platform)
    }
}

/// Engagement rate scaled by the platform's comparison factor.
#[must_use]
pub fn normalized_engagement(community: &CanonicalCommunity, scaling: &PlatformScaling) -> f64 {
    community.engagement_rate * scaling.factor(community.platform)
}

/// Arithmetic mean; `0.0` for an empty slice.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median; the mean of the two middle values for even lengths, `0.0` when empty.
#[must_use]
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[allow(clippy::cast_precision_loss)]
fn platform_metrics(platform: Platform, rows: &[&CanonicalCommunity]) -> PlatformMetrics {
    let members: Vec<f64> = rows.iter().map(|c| c.member_count as f64).collect();
    let engagement: Vec<f64> = rows.iter().map(|c| c.engagement_rate).collect();
    let frequency: Vec<f64> = rows.iter().map(|c| c.post_frequency).collect();
    let public = rows.iter().filter(|c| c.is_public).count();

    PlatformMetrics {
        platform,
        community_count: rows.len(),
        member_count_mean: mean(&members),
        member_count_median: median(&members),
        member_count_sum: rows
            .iter()
            .map(|c| c.member_count)
            .fold(0, u64::saturating_add),
        engagement_rate_mean: mean(&engagement),
        engagement_rate_median: median(&engagement),
        post_frequency_mean: mean(&frequency),
        post_frequency_median: median(&frequency),
        public_fraction: public as f64 / rows.len() as f64,
    }
}

/// Categories ordered by row count, ties kept in first-appearance order.
fn top_categories(communities: &[CanonicalCommunity], limit: usize) -> Vec<CategoryDistribution> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut categories: Vec<CategoryDistribution> = Vec::new();

    for community in communities {
        let slot = *index.entry(community.category.as_str()).or_insert_with(|| {
            categories.push(CategoryDistribution {
                category: community.category.clone(),
                total: 0,
                by_platform: BTreeMap::new(),
            });
            categories.len() - 1
        });
        let entry = &mut categories[slot];
        entry.total += 1;
        *entry.by_platform.entry(community.platform).or_insert(0) += 1;
    }

    categories.sort_by(|a, b| b.total.cmp(&a.total));
    categories.truncate(limit);
    categories
}

/// Aggregate a normalized collection into cross-platform statistics.
///
/// Recomputes everything from `communities` on every call. An empty collection
/// logs a warning and yields zero counts and empty statistics.
#[must_use]
pub fn aggregate(
    communities: &[CanonicalCommunity],
    scaling: &PlatformScaling,
    top_categories_limit: usize,
) -> CrossPlatformMetrics {
    if communities.is_empty() {
        tracing::warn!("no communities to aggregate");
    }

    let mut by_platform: BTreeMap<Platform, Vec<&CanonicalCommunity>> =
        Platform::ALL.iter().map(|&p| (p, Vec::new())).collect();
    for community in communities {
        by_platform
            .entry(community.platform)
            .or_default()
            .push(community);
    }

    let platform_distribution = by_platform
        .iter()
        .map(|(&platform, rows)| (platform, rows.len()))
        .collect();

    let mut platform_metrics_list = Vec::new();
    let mut engagement = Vec::new();
    let mut avg_community_size = BTreeMap::new();

    for (&platform, rows) in by_platform.iter().filter(|(_, rows)| !rows.is_empty()) {
        let metrics = platform_metrics(platform, rows);

        let scaled: Vec<f64> = rows
            .iter()
            .map(|c| normalized_engagement(c, scaling))
            .collect();
        engagement.push(PlatformEngagement {
            platform,
            scaling_factor: scaling.factor(platform),
            raw_mean: metrics.engagement_rate_mean,
            normalized_mean: mean(&scaled),
        });

        avg_community_size.insert(platform, metrics.member_count_mean);
        platform_metrics_list.push(metrics);
    }

    let metrics = CrossPlatformMetrics {
        total_communities: communities.len(),
        platform_distribution,
        platform_metrics: platform_metrics_list,
        normalized_engagement: engagement,
        category_platform_distribution: top_categories(communities, top_categories_limit),
        avg_community_size,
        scaling: *scaling,
    };

    tracing::info!(
        total = metrics.total_communities,
        platforms = metrics.platform_metrics.len(),
        categories = metrics.category_platform_distribution.len(),
        "aggregated cross-platform metrics"
    );

    metrics
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
