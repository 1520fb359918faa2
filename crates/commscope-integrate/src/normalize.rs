//! Normalization from raw collector records to [`CanonicalCommunity`] rows.
//!
//! Column mapping is table-driven (see [`crate::fields`]); engagement is
//! delegated to [`crate::engagement`]. Normalization never fails: every
//! missing field resolves to its default.

use std::collections::BTreeMap;

use commscope_core::{CanonicalCommunity, Platform, RawRecord};

use crate::engagement::{estimate_engagement, RateSource};
use crate::fields::field_map;

/// Raw records grouped by platform. Iteration order is the canonical
/// platform order.
pub type RawByPlatform = BTreeMap<Platform, Vec<RawRecord>>;

/// Normalizes one raw record from `platform`.
pub fn normalize_record(
    record: &RawRecord,
    platform: Platform,
    source: &mut dyn RateSource,
) -> CanonicalCommunity {
    let map = field_map(platform);

    let native_id = map.native_id.resolve(record);
    let creation_date = map
        .creation_date
        .iter()
        .find_map(|key| record.text(key));

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let member_count = map.member_count.resolve(record).max(0.0).round() as u64;

    CanonicalCommunity {
        platform,
        community_id: format!("{}_{native_id}", platform.prefix()),
        name: map.name.resolve(record),
        description: map.description.resolve(record),
        member_count,
        creation_date,
        category: map.category.resolve(record),
        is_public: map.is_public.resolve(record),
        location: map.location.resolve(record),
        engagement_rate: estimate_engagement(record, platform, source),
        post_frequency: map.post_frequency.resolve(record).max(0.0),
        related_topics: map.related_topics.resolve(record),
        source_url: map.source_url.resolve(record),
    }
}

/// Normalizes every record, Reddit first, then Discord, Instagram and
/// Facebook, preserving input order within each platform.
///
/// No deduplication is performed; the output has exactly one row per input
/// record.
pub fn normalize(raw: &RawByPlatform, source: &mut dyn RateSource) -> Vec<CanonicalCommunity> {
    let total: usize = raw.values().map(Vec::len).sum();
    let mut communities = Vec::with_capacity(total);

    for (&platform, records) in raw {
        if records.is_empty() {
            continue;
        }
        communities.extend(
            records
                .iter()
                .map(|record| normalize_record(record, platform, source)),
        );
        tracing::info!(%platform, count = records.len(), "standardized communities");
    }

    communities
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
