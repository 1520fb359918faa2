//! Normalization, engagement estimation and cross-platform aggregation of
//! scraped community data.
//!
//! Raw per-platform collector exports are loaded into [`RawRecord`]s,
//! normalized into [`CanonicalCommunity`] rows, aggregated into
//! [`CrossPlatformMetrics`] and written out as CSV, JSON and a text report.
//!
//! [`RawRecord`]: commscope_core::RawRecord
//! [`CanonicalCommunity`]: commscope_core::CanonicalCommunity

pub mod aggregate;
pub mod engagement;
pub mod error;
pub mod fields;
pub mod io;
pub mod normalize;
pub mod pipeline;
pub mod ranking;
pub mod relevance;
pub mod report;
pub mod sources;

mod csv;

pub use aggregate::{aggregate, normalized_engagement, CrossPlatformMetrics, PlatformMetrics};
pub use engagement::{
    estimate_engagement, rate_source, RateSource, SeededRateSource, ThreadRateSource,
};
pub use error::IntegrateError;
pub use io::{read_canonical, read_records};
pub use normalize::{normalize, normalize_record, RawByPlatform};
pub use pipeline::{run_classify, run_integration, run_metrics, run_normalize, IntegrationOutcome};
pub use relevance::{classify, filter_relevant, ClassifiedCommunity, CommunityType};
pub use report::render_report;
