use serde::{Deserialize, Serialize};

use crate::Platform;

/// A community normalized into the cross-platform schema.
///
/// One row is produced per raw collector record. Field order matches the
/// column order of `integrated_communities.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalCommunity {
    pub platform: Platform,
    /// `{platform_prefix}_{native_id}`; `{prefix}_unknown` when no id was collected.
    pub community_id: String,
    pub name: String,
    pub description: String,
    pub member_count: u64,
    /// Raw passthrough from the collector; format differs per platform.
    pub creation_date: Option<String>,
    pub category: String,
    pub is_public: bool,
    pub location: String,
    /// In `[0.0, 1.0]`.
    pub engagement_rate: f64,
    /// Posts or messages per day, `>= 0`.
    pub post_frequency: f64,
    /// Comma-joined keywords, tags or hashtags.
    pub related_topics: String,
    pub source_url: String,
}

impl CanonicalCommunity {
    /// Members weighted by engagement; favors active communities over large
    /// dormant ones.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn engagement_adjusted_size(&self) -> f64 {
        self.member_count as f64 * self.engagement_rate
    }
}
