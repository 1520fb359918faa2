//! Per-platform engagement-rate estimation.
//!
//! Collectors only sometimes capture interaction counts. When they do, the
//! rate is computed from them; otherwise a precomputed `engagement_rate`
//! column is passed through; otherwise a rate is sampled from a size-bucketed
//! range. Larger communities get lower synthetic rates, and Discord ranges sit
//! above the other platforms.
//!
//! The synthetic branch is a heuristic stand-in for missing ground truth, not
//! a validated estimator. All sampling goes through [`RateSource`] so callers
//! choose between non-reproducible, seeded or fixed randomness.

use commscope_core::{Platform, RawRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform samples for the synthetic engagement branch.
pub trait RateSource {
    /// Returns a sample in `[low, high)`. Returns `low` when the range is empty.
    fn uniform(&mut self, low: f64, high: f64) -> f64;
}

impl<R: RateSource + ?Sized> RateSource for &mut R {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        (**self).uniform(low, high)
    }
}

/// Non-reproducible sampling from the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRateSource;

impl RateSource for ThreadRateSource {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if low >= high {
            return low;
        }
        rand::rng().random_range(low..high)
    }
}

/// Reproducible sampling from a seeded generator.
#[derive(Debug, Clone)]
pub struct SeededRateSource {
    rng: StdRng,
}

impl SeededRateSource {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RateSource for SeededRateSource {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if low >= high {
            return low;
        }
        self.rng.random_range(low..high)
    }
}

/// Seeded when `seed` is set, thread-local otherwise.
#[must_use]
pub fn rate_source(seed: Option<u64>) -> Box<dyn RateSource> {
    match seed {
        Some(seed) => Box::new(SeededRateSource::new(seed)),
        None => Box::new(ThreadRateSource),
    }
}

/// A synthetic range applied when the audience is strictly above `above`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeBucket {
    pub above: f64,
    pub low: f64,
    pub high: f64,
}

const fn bucket(above: f64, low: f64, high: f64) -> SizeBucket {
    SizeBucket { above, low, high }
}

/// How engagement is estimated for one platform.
#[derive(Debug, Clone, Copy)]
pub struct EngagementProfile {
    /// Field holding the audience size (the rate denominator).
    pub audience_key: &'static str,
    /// Fields summed into the interaction count. Empty when the collector
    /// never captures interactions.
    pub interaction_keys: &'static [&'static str],
    /// Checked in order; the last bucket covers every positive audience.
    pub buckets: &'static [SizeBucket],
    /// Field whose posts-per-day value scales the sampled rate.
    pub frequency_key: Option<&'static str>,
}

pub const REDDIT_PROFILE: EngagementProfile = EngagementProfile {
    audience_key: "subscribers",
    interaction_keys: &["avg_comments", "avg_upvotes"],
    buckets: &[
        bucket(1_000_000.0, 0.001, 0.01),
        bucket(100_000.0, 0.01, 0.03),
        bucket(10_000.0, 0.03, 0.05),
        bucket(1_000.0, 0.05, 0.1),
        bucket(0.0, 0.1, 0.2),
    ],
    frequency_key: None,
};

pub const DISCORD_PROFILE: EngagementProfile = EngagementProfile {
    audience_key: "member_count",
    interaction_keys: &["active_members"],
    buckets: &[
        bucket(100_000.0, 0.05, 0.1),
        bucket(10_000.0, 0.1, 0.2),
        bucket(1_000.0, 0.2, 0.3),
        bucket(0.0, 0.3, 0.5),
    ],
    frequency_key: None,
};

pub const INSTAGRAM_PROFILE: EngagementProfile = EngagementProfile {
    audience_key: "followers",
    interaction_keys: &["avg_likes", "avg_comments"],
    buckets: &[
        bucket(1_000_000.0, 0.01, 0.02),
        bucket(100_000.0, 0.02, 0.035),
        bucket(10_000.0, 0.035, 0.06),
        bucket(1_000.0, 0.06, 0.1),
        bucket(0.0, 0.1, 0.15),
    ],
    frequency_key: None,
};

pub const FACEBOOK_PROFILE: EngagementProfile = EngagementProfile {
    audience_key: "member_count",
    interaction_keys: &[],
    buckets: &[
        bucket(100_000.0, 0.005, 0.015),
        bucket(10_000.0, 0.015, 0.03),
        bucket(1_000.0, 0.03, 0.05),
        bucket(0.0, 0.05, 0.1),
    ],
    frequency_key: Some("post_frequency"),
};

/// Posts per day at which the frequency factor is 1.0.
const BASELINE_POSTS_PER_DAY: f64 = 5.0;
const MIN_FREQUENCY_FACTOR: f64 = 0.5;
const MAX_FREQUENCY_FACTOR: f64 = 2.0;

#[must_use]
pub fn profile(platform: Platform) -> &'static EngagementProfile {
    match platform {
        Platform::Reddit => &REDDIT_PROFILE,
        Platform::Discord => &DISCORD_PROFILE,
        Platform::Instagram => &INSTAGRAM_PROFILE,
        Platform::Facebook => &FACEBOOK_PROFILE,
    }
}

impl EngagementProfile {
    /// Sum of the interaction fields, or `None` unless every one is present.
    fn interactions(&self, record: &RawRecord) -> Option<f64> {
        if self.interaction_keys.is_empty() {
            return None;
        }
        self.interaction_keys
            .iter()
            .map(|key| record.number(key))
            .sum::<Option<f64>>()
    }

    /// Bucket for a positive audience size.
    #[must_use]
    pub fn bucket_for(&self, audience: f64) -> Option<&SizeBucket> {
        self.buckets.iter().find(|b| audience > b.above)
    }
}

/// Clamp `post_frequency / 5` into `[0.5, 2.0]`.
#[must_use]
pub fn frequency_factor(post_frequency: f64) -> f64 {
    (post_frequency / BASELINE_POSTS_PER_DAY).clamp(MIN_FREQUENCY_FACTOR, MAX_FREQUENCY_FACTOR)
}

/// Estimate a community's engagement rate in `[0.0, 1.0]`.
///
/// Checked in order:
/// 1. audience size zero, negative or missing: `0.0`;
/// 2. every interaction field present: `min(1.0, interactions / audience)`;
/// 3. an `engagement_rate` field present: passed through, clamped to `[0, 1]`;
/// 4. otherwise a sample from the audience-size bucket, scaled by the
///    frequency factor where the platform uses one (no posts means `0.0`).
///
/// Only branch 4 draws from `source`.
pub fn estimate_engagement(
    record: &RawRecord,
    platform: Platform,
    source: &mut dyn RateSource,
) -> f64 {
    let profile = profile(platform);

    let audience = record.number(profile.audience_key).unwrap_or(0.0);
    if audience <= 0.0 {
        return 0.0;
    }

    if let Some(interactions) = profile.interactions(record) {
        return (interactions / audience).clamp(0.0, 1.0);
    }

    if let Some(rate) = record.number("engagement_rate") {
        let clamped = rate.clamp(0.0, 1.0);
        if (clamped - rate).abs() > f64::EPSILON {
            tracing::warn!(
                %platform,
                rate,
                "engagement_rate outside [0, 1]; clamping"
            );
        }
        return clamped;
    }

    let factor = match profile.frequency_key {
        Some(key) => {
            let posts = record.number(key).unwrap_or(0.0);
            if posts <= 0.0 {
                return 0.0;
            }
            frequency_factor(posts)
        }
        None => 1.0,
    };

    let Some(bucket) = profile.bucket_for(audience) else {
        return 0.0;
    };
    let base = source.uniform(bucket.low, bucket.high);
    (base * factor).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "engagement_test.rs"]
mod tests;
