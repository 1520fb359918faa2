//! Size rankings and member-count banding.

use std::fmt;

use commscope_core::{CanonicalCommunity, Platform};
use serde::Serialize;

pub const DEFAULT_TOP_PER_PLATFORM: usize = 5;

/// Member-count band used in the per-platform size distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum SizeBand {
    Tiny,
    Small,
    Medium,
    Large,
    Massive,
}

impl SizeBand {
    pub const ALL: [SizeBand; 5] = [
        SizeBand::Tiny,
        SizeBand::Small,
        SizeBand::Medium,
        SizeBand::Large,
        SizeBand::Massive,
    ];

    /// Upper bounds are inclusive.
    #[must_use]
    pub fn of(member_count: u64) -> Self {
        match member_count {
            0..=100 => SizeBand::Tiny,
            101..=1_000 => SizeBand::Small,
            1_001..=10_000 => SizeBand::Medium,
            10_001..=100_000 => SizeBand::Large,
            _ => SizeBand::Massive,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SizeBand::Tiny => "Tiny (<=100)",
            SizeBand::Small => "Small (101-1K)",
            SizeBand::Medium => "Medium (1K-10K)",
            SizeBand::Large => "Large (10K-100K)",
            SizeBand::Massive => "Massive (>100K)",
        }
    }
}

impl fmt::Display for SizeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Row count per band, every band present.
#[must_use]
pub fn size_distribution<'a, I>(communities: I) -> [(SizeBand, usize); 5]
where
    I: IntoIterator<Item = &'a CanonicalCommunity>,
{
    let mut counts = SizeBand::ALL.map(|band| (band, 0));
    for community in communities {
        let band = SizeBand::of(community.member_count);
        if let Some(slot) = counts.iter_mut().find(|(b, _)| *b == band) {
            slot.1 += 1;
        }
    }
    counts
}

/// The `per_platform` largest communities of each platform, grouped in
/// platform order and largest first within a platform.
#[must_use]
pub fn top_by_size(
    communities: &[CanonicalCommunity],
    per_platform: usize,
) -> Vec<&CanonicalCommunity> {
    Platform::ALL
        .iter()
        .flat_map(|&platform| {
            let mut rows: Vec<&CanonicalCommunity> = communities
                .iter()
                .filter(|c| c.platform == platform)
                .collect();
            rows.sort_by(|a, b| b.member_count.cmp(&a.member_count));
            rows.truncate(per_platform);
            rows
        })
        .collect()
}

/// The `n` communities with the largest engagement-adjusted size.
#[must_use]
pub fn top_by_engagement_adjusted_size(
    communities: &[CanonicalCommunity],
    n: usize,
) -> Vec<&CanonicalCommunity> {
    let mut rows: Vec<&CanonicalCommunity> = communities.iter().collect();
    rows.sort_by(|a, b| {
        b.engagement_adjusted_size()
            .total_cmp(&a.engagement_adjusted_size())
    });
    rows.truncate(n);
    rows
}

/// Largest community on `platform`, first one wins on ties.
#[must_use]
pub fn largest(
    communities: &[CanonicalCommunity],
    platform: Platform,
) -> Option<&CanonicalCommunity> {
    communities
        .iter()
        .filter(|c| c.platform == platform)
        .fold(None, |best: Option<&CanonicalCommunity>, c| match best {
            Some(b) if b.member_count >= c.member_count => Some(b),
            _ => Some(c),
        })
}
