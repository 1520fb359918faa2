//! Plain-text summary report for an integration run.

use std::fmt;

use chrono::{DateTime, Utc};
use commscope_core::{CanonicalCommunity, Platform};

use crate::aggregate::CrossPlatformMetrics;
use crate::ranking::{
    largest, size_distribution, top_by_engagement_adjusted_size, top_by_size,
    DEFAULT_TOP_PER_PLATFORM,
};

pub const EMPTY_REPORT: &str = "No data available for summary report.";

/// Render the summary report. `top_n` bounds the engagement-adjusted list.
#[must_use]
pub fn render_report(
    communities: &[CanonicalCommunity],
    metrics: &CrossPlatformMetrics,
    top_n: usize,
    generated_at: DateTime<Utc>,
) -> String {
    if communities.is_empty() {
        return EMPTY_REPORT.to_string();
    }
    SummaryReport {
        communities,
        metrics,
        top_n,
        generated_at,
    }
    .to_string()
}

struct SummaryReport<'a> {
    communities: &'a [CanonicalCommunity],
    metrics: &'a CrossPlatformMetrics,
    top_n: usize,
    generated_at: DateTime<Utc>,
}

impl SummaryReport<'_> {
    fn platform_section(&self, f: &mut fmt::Formatter<'_>, platform: Platform) -> fmt::Result {
        let Some(stats) = self.metrics.platform(platform) else {
            return Ok(());
        };
        let title = format!("{platform} Communities");
        writeln!(f, "{title}")?;
        writeln!(f, "{}", "-".repeat(title.len()))?;
        writeln!(f, "Communities analyzed: {}", stats.community_count)?;
        writeln!(f, "Total members: {}", thousands(stats.member_count_sum))?;
        writeln!(f, "Average members: {:.1}", stats.member_count_mean)?;
        writeln!(f, "Median members: {:.1}", stats.member_count_median)?;
        if let Some(top) = largest(self.communities, platform) {
            writeln!(
                f,
                "Largest community: {} with {} members",
                top.name,
                thousands(top.member_count)
            )?;
        }
        writeln!(
            f,
            "Average engagement rate: {:.2}%",
            stats.engagement_rate_mean * 100.0
        )?;
        writeln!(f, "Public communities: {:.1}%", stats.public_fraction * 100.0)?;
        writeln!(f)?;
        writeln!(f, "Size distribution:")?;
        let rows = self.communities.iter().filter(|c| c.platform == platform);
        for (band, count) in size_distribution(rows) {
            writeln!(
                f,
                "  {band}: {count} ({:.1}%)",
                percent(count, stats.community_count)
            )?;
        }
        writeln!(f)
    }
}

impl fmt::Display for SummaryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = "Cross-Platform Community Integration Report";
        writeln!(f, "{title}")?;
        writeln!(f, "{}", "=".repeat(title.len()))?;
        writeln!(f, "Date: {}", self.generated_at.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(f, "Total communities: {}", self.metrics.total_communities)?;
        writeln!(f)?;

        for platform in Platform::ALL {
            self.platform_section(f, platform)?;
        }

        writeln!(f, "Largest Communities per Platform")?;
        writeln!(f, "--------------------------------")?;
        for c in top_by_size(self.communities, DEFAULT_TOP_PER_PLATFORM) {
            writeln!(
                f,
                "  [{}] {} ({} members)",
                c.platform,
                c.name,
                thousands(c.member_count)
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Normalized Engagement")?;
        writeln!(f, "---------------------")?;
        writeln!(
            f,
            "{:<10} {:>8} {:>10} {:>12}",
            "Platform", "Factor", "Raw", "Normalized"
        )?;
        for row in &self.metrics.normalized_engagement {
            writeln!(
                f,
                "{:<10} {:>8.2} {:>9.2}% {:>11.2}%",
                row.platform.to_string(),
                row.scaling_factor,
                row.raw_mean * 100.0,
                row.normalized_mean * 100.0
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Top {} by Engagement-Adjusted Size", self.top_n)?;
        writeln!(f, "--------------------------------")?;
        for (rank, c) in top_by_engagement_adjusted_size(self.communities, self.top_n)
            .into_iter()
            .enumerate()
        {
            writeln!(
                f,
                "{:>2}. [{}] {} ({} members, {:.2}% engagement, adjusted {:.0})",
                rank + 1,
                c.platform,
                c.name,
                thousands(c.member_count),
                c.engagement_rate * 100.0,
                c.engagement_adjusted_size()
            )?;
        }
        Ok(())
    }
}

#[allow(clippy::cast_precision_loss)]
fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// `1234567` as `1,234,567`.
fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
