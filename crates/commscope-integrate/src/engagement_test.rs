use commscope_core::RawValue;

use super::*;

/// Returns `low + t * (high - low)` and records every requested range.
struct FractionSource {
    t: f64,
    calls: Vec<(f64, f64)>,
}

impl FractionSource {
    fn new(t: f64) -> Self {
        Self {
            t,
            calls: Vec::new(),
        }
    }
}

impl RateSource for FractionSource {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        self.calls.push((low, high));
        low + self.t * (high - low)
    }
}

fn num(n: f64) -> RawValue {
    RawValue::Number(n)
}

fn record(fields: &[(&str, f64)]) -> RawRecord {
    fields
        .iter()
        .fold(RawRecord::new(), |r, (k, v)| r.with(k, num(*v)))
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

// ---------------------------------------------------------------------------
// interaction counts
// ---------------------------------------------------------------------------

#[test]
fn reddit_interactions_over_subscribers() {
    let r = record(&[
        ("subscribers", 100_000.0),
        ("avg_comments", 500.0),
        ("avg_upvotes", 1_500.0),
    ]);
    let mut source = FractionSource::new(0.5);
    let rate = estimate_engagement(&r, Platform::Reddit, &mut source);
    assert_eq!(rate, 0.02);
    assert!(source.calls.is_empty(), "sampler must not be used");
}

#[test]
fn interactions_are_capped_at_one() {
    let r = record(&[
        ("subscribers", 10.0),
        ("avg_comments", 50.0),
        ("avg_upvotes", 50.0),
    ]);
    let rate = estimate_engagement(&r, Platform::Reddit, &mut FractionSource::new(0.5));
    assert_eq!(rate, 1.0);
}

#[test]
fn instagram_likes_and_comments_over_followers() {
    let r = record(&[
        ("followers", 4_000.0),
        ("avg_likes", 180.0),
        ("avg_comments", 20.0),
    ]);
    let rate = estimate_engagement(&r, Platform::Instagram, &mut FractionSource::new(0.5));
    assert!(approx(rate, 0.05), "got {rate}");
}

#[test]
fn discord_active_over_members() {
    let r = record(&[("member_count", 800.0), ("active_members", 200.0)]);
    let rate = estimate_engagement(&r, Platform::Discord, &mut FractionSource::new(0.5));
    assert_eq!(rate, 0.25);
}

#[test]
fn interaction_counts_read_from_csv_text() {
    let r = RawRecord::new()
        .with("subscribers", RawValue::Text("1000".into()))
        .with("avg_comments", RawValue::Text("10".into()))
        .with("avg_upvotes", RawValue::Text("40".into()));
    let rate = estimate_engagement(&r, Platform::Reddit, &mut FractionSource::new(0.5));
    assert_eq!(rate, 0.05);
}

// ---------------------------------------------------------------------------
// zero or missing audience
// ---------------------------------------------------------------------------

#[test]
fn zero_audience_is_zero_on_every_platform() {
    for platform in Platform::ALL {
        let key = profile(platform).audience_key;
        let r = record(&[(key, 0.0), ("engagement_rate", 0.4), ("post_frequency", 3.0)]);
        let mut source = FractionSource::new(0.5);
        assert_eq!(estimate_engagement(&r, platform, &mut source), 0.0);
        assert!(source.calls.is_empty());
    }
}

#[test]
fn missing_audience_is_zero() {
    let r = record(&[("avg_comments", 5.0), ("avg_upvotes", 5.0)]);
    assert_eq!(
        estimate_engagement(&r, Platform::Reddit, &mut FractionSource::new(0.5)),
        0.0
    );
}

#[test]
fn discord_member_count_zero_is_zero() {
    let r = record(&[("member_count", 0.0)]);
    assert_eq!(
        estimate_engagement(&r, Platform::Discord, &mut ThreadRateSource),
        0.0
    );
}

// ---------------------------------------------------------------------------
// passthrough
// ---------------------------------------------------------------------------

#[test]
fn precomputed_rate_used_when_interactions_incomplete() {
    let r = record(&[
        ("subscribers", 5_000.0),
        ("avg_comments", 20.0),
        ("engagement_rate", 0.07),
    ]);
    let mut source = FractionSource::new(0.5);
    let rate = estimate_engagement(&r, Platform::Reddit, &mut source);
    assert_eq!(rate, 0.07);
    assert!(source.calls.is_empty());
}

#[test]
fn precomputed_rate_is_clamped() {
    let r = record(&[("followers", 5_000.0), ("engagement_rate", 1.7)]);
    let rate = estimate_engagement(&r, Platform::Instagram, &mut FractionSource::new(0.5));
    assert_eq!(rate, 1.0);
}

// ---------------------------------------------------------------------------
// synthetic buckets
// ---------------------------------------------------------------------------

fn sampled_range(platform: Platform, audience: f64) -> (f64, f64) {
    let key = profile(platform).audience_key;
    let r = record(&[(key, audience), ("post_frequency", 5.0)]);
    let mut source = FractionSource::new(0.0);
    estimate_engagement(&r, platform, &mut source);
    assert_eq!(source.calls.len(), 1, "expected exactly one draw");
    source.calls[0]
}

#[test]
fn reddit_bucket_thresholds_are_strict() {
    assert_eq!(sampled_range(Platform::Reddit, 1_000_001.0), (0.001, 0.01));
    assert_eq!(sampled_range(Platform::Reddit, 1_000_000.0), (0.01, 0.03));
    assert_eq!(sampled_range(Platform::Reddit, 100_000.0), (0.03, 0.05));
    assert_eq!(sampled_range(Platform::Reddit, 10_000.0), (0.05, 0.1));
    assert_eq!(sampled_range(Platform::Reddit, 1_001.0), (0.05, 0.1));
    assert_eq!(sampled_range(Platform::Reddit, 1_000.0), (0.1, 0.2));
    assert_eq!(sampled_range(Platform::Reddit, 1.0), (0.1, 0.2));
}

#[test]
fn instagram_buckets() {
    assert_eq!(sampled_range(Platform::Instagram, 2_000_000.0), (0.01, 0.02));
    assert_eq!(sampled_range(Platform::Instagram, 200_000.0), (0.02, 0.035));
    assert_eq!(sampled_range(Platform::Instagram, 20_000.0), (0.035, 0.06));
    assert_eq!(sampled_range(Platform::Instagram, 2_000.0), (0.06, 0.1));
    assert_eq!(sampled_range(Platform::Instagram, 200.0), (0.1, 0.15));
}

#[test]
fn discord_buckets_sit_above_reddit() {
    for audience in [500.0, 5_000.0, 50_000.0, 500_000.0] {
        let (discord_low, _) = sampled_range(Platform::Discord, audience);
        let (_, reddit_high) = sampled_range(Platform::Reddit, audience);
        assert!(
            discord_low >= reddit_high,
            "audience {audience}: discord low {discord_low} < reddit high {reddit_high}"
        );
    }
}

#[test]
fn synthetic_rate_shrinks_with_size() {
    for platform in Platform::ALL {
        let small = sampled_range(platform, 500.0);
        let large = sampled_range(platform, 5_000_000.0);
        assert!(large.1 <= small.0, "{platform}: {large:?} vs {small:?}");
    }
}

#[test]
fn facebook_frequency_factor_scales_base_rate() {
    let busy = record(&[("member_count", 500.0), ("post_frequency", 20.0)]);
    let quiet = record(&[("member_count", 500.0), ("post_frequency", 1.0)]);
    let usual = record(&[("member_count", 500.0), ("post_frequency", 5.0)]);

    let rate = |r: &RawRecord| estimate_engagement(r, Platform::Facebook, &mut FractionSource::new(0.0));

    assert!(approx(rate(&busy), 0.1), "2.0 x 0.05");
    assert!(approx(rate(&quiet), 0.025), "0.5 x 0.05");
    assert!(approx(rate(&usual), 0.05), "1.0 x 0.05");
}

#[test]
fn facebook_without_posts_is_zero_and_skips_sampler() {
    let r = record(&[("member_count", 50_000.0)]);
    let mut source = FractionSource::new(0.5);
    assert_eq!(estimate_engagement(&r, Platform::Facebook, &mut source), 0.0);
    assert!(source.calls.is_empty());
}

#[test]
fn frequency_factor_clamps() {
    assert_eq!(frequency_factor(0.1), 0.5);
    assert_eq!(frequency_factor(5.0), 1.0);
    assert_eq!(frequency_factor(100.0), 2.0);
}

// ---------------------------------------------------------------------------
// sources
// ---------------------------------------------------------------------------

#[test]
fn seeded_source_is_reproducible() {
    let r = record(&[("subscribers", 50_000.0)]);
    let mut a = SeededRateSource::new(7);
    let mut b = SeededRateSource::new(7);
    for _ in 0..10 {
        assert_eq!(
            estimate_engagement(&r, Platform::Reddit, &mut a),
            estimate_engagement(&r, Platform::Reddit, &mut b)
        );
    }
}

#[test]
fn sampled_values_stay_inside_bucket() {
    let mut source = SeededRateSource::new(99);
    for _ in 0..200 {
        let v = source.uniform(0.03, 0.05);
        assert!((0.03..0.05).contains(&v), "{v}");
    }
}

#[test]
fn empty_range_returns_low() {
    assert_eq!(ThreadRateSource.uniform(0.2, 0.2), 0.2);
    assert_eq!(SeededRateSource::new(1).uniform(0.3, 0.1), 0.3);
}

#[test]
fn every_branch_stays_in_unit_interval() {
    let audiences = [0.0, 1.0, 999.0, 1_001.0, 50_000.0, 2_000_000.0];
    let mut source = rate_source(Some(3));
    for platform in Platform::ALL {
        let key = profile(platform).audience_key;
        for audience in audiences {
            for extra in [
                vec![],
                vec![("engagement_rate", -0.5)],
                vec![("engagement_rate", 3.0)],
                vec![("active_members", 9e9), ("avg_comments", 9e9), ("avg_upvotes", 9e9), ("avg_likes", 9e9)],
                vec![("post_frequency", 400.0)],
            ] {
                let mut fields = vec![(key, audience)];
                fields.extend(extra);
                let rate = estimate_engagement(&record(&fields), platform, source.as_mut());
                assert!(
                    (0.0..=1.0).contains(&rate),
                    "{platform} audience {audience}: {rate}"
                );
            }
        }
    }
}
