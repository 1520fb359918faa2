//! Reading collector exports and writing integration artifacts.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use commscope_core::{CanonicalCommunity, Platform, RawRecord};

use crate::aggregate::CrossPlatformMetrics;
use crate::csv::{parse_rows, write_row};
use crate::error::IntegrateError;
use crate::relevance::ClassifiedCommunity;

/// Header of `integrated_communities.csv`, in canonical field order.
pub const COLUMNS: [&str; 13] = [
    "platform",
    "community_id",
    "name",
    "description",
    "member_count",
    "creation_date",
    "category",
    "is_public",
    "location",
    "engagement_rate",
    "post_frequency",
    "related_topics",
    "source_url",
];

/// Extra columns appended by the relevance classifier.
pub const RELEVANCE_COLUMNS: [&str; 4] = [
    "student_score",
    "professional_score",
    "relevance_score",
    "community_type",
];

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Read a collector export. `.json` files must hold an array of objects;
/// anything else is read as CSV with a header row.
///
/// # Errors
///
/// Returns [`IntegrateError`] if the file cannot be read or is not valid JSON
/// of the expected shape.
pub fn read_records(path: &Path) -> Result<Vec<RawRecord>, IntegrateError> {
    let text = fs::read_to_string(path).map_err(|e| IntegrateError::io(path, e))?;
    if is_json(path) {
        parse_json_records(path, &text)
    } else {
        Ok(parse_csv_records(&text))
    }
}

fn parse_csv_records(text: &str) -> Vec<RawRecord> {
    let mut rows = parse_rows(text).into_iter();
    let Some(header) = rows.next() else {
        return Vec::new();
    };
    rows.map(|row| RawRecord::from_row(&header, &row)).collect()
}

fn parse_json_records(path: &Path, text: &str) -> Result<Vec<RawRecord>, IntegrateError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|source| IntegrateError::Json {
            path: path.display().to_string(),
            source,
        })?;

    let serde_json::Value::Array(items) = value else {
        return Err(IntegrateError::InvalidRecordFile {
            path: path.display().to_string(),
            reason: "expected a top-level array of objects".to_string(),
        });
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            serde_json::Value::Object(object) => Ok(RawRecord::from_json_object(object)),
            _ => Err(IntegrateError::InvalidRecordFile {
                path: path.display().to_string(),
                reason: format!("element {i} is not an object"),
            }),
        })
        .collect()
}

fn community_cells(c: &CanonicalCommunity) -> Vec<String> {
    vec![
        c.platform.to_string(),
        c.community_id.clone(),
        c.name.clone(),
        c.description.clone(),
        c.member_count.to_string(),
        c.creation_date.clone().unwrap_or_default(),
        c.category.clone(),
        c.is_public.to_string(),
        c.location.clone(),
        c.engagement_rate.to_string(),
        c.post_frequency.to_string(),
        c.related_topics.clone(),
        c.source_url.clone(),
    ]
}

fn create(path: &Path) -> Result<BufWriter<File>, IntegrateError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| IntegrateError::io(parent, e))?;
    }
    let file = File::create(path).map_err(|e| IntegrateError::io(path, e))?;
    Ok(BufWriter::new(file))
}

/// Write canonical rows as CSV, creating the parent directory if needed.
///
/// # Errors
///
/// Returns [`IntegrateError::Io`] on any filesystem failure.
pub fn write_communities(
    path: &Path,
    communities: &[CanonicalCommunity],
) -> Result<(), IntegrateError> {
    let mut out = create(path)?;
    let io_err = |e| IntegrateError::io(path, e);

    write_row(&mut out, &COLUMNS).map_err(io_err)?;
    for community in communities {
        write_row(&mut out, &community_cells(community)).map_err(io_err)?;
    }
    out.flush().map_err(io_err)?;

    tracing::info!(path = %path.display(), rows = communities.len(), "wrote communities");
    Ok(())
}

/// Write classified rows: the canonical columns followed by the scores.
///
/// # Errors
///
/// Returns [`IntegrateError::Io`] on any filesystem failure.
pub fn write_classified(
    path: &Path,
    classified: &[ClassifiedCommunity],
) -> Result<(), IntegrateError> {
    let mut out = create(path)?;
    let io_err = |e| IntegrateError::io(path, e);

    let header: Vec<&str> = COLUMNS.iter().chain(&RELEVANCE_COLUMNS).copied().collect();
    write_row(&mut out, &header).map_err(io_err)?;
    for row in classified {
        let mut cells = community_cells(&row.community);
        cells.extend([
            row.score.student_score.to_string(),
            row.score.professional_score.to_string(),
            row.score.relevance_score.to_string(),
            row.score.community_type.to_string(),
        ]);
        write_row(&mut out, &cells).map_err(io_err)?;
    }
    out.flush().map_err(io_err)?;

    tracing::info!(path = %path.display(), rows = classified.len(), "wrote classified communities");
    Ok(())
}

/// Read an `integrated_communities.csv` back into canonical rows.
///
/// Missing columns take the canonical defaults. Rows without a recognizable
/// platform are skipped with a warning.
///
/// # Errors
///
/// Returns [`IntegrateError::Io`] if the file cannot be read.
pub fn read_canonical(path: &Path) -> Result<Vec<CanonicalCommunity>, IntegrateError> {
    let text = fs::read_to_string(path).map_err(|e| IntegrateError::io(path, e))?;
    let records = parse_csv_records(&text);

    let mut communities = Vec::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        match canonical_from_record(record) {
            Some(community) => communities.push(community),
            None => tracing::warn!(
                path = %path.display(),
                row = i + 2,
                "skipping row without a valid platform"
            ),
        }
    }
    Ok(communities)
}

fn canonical_from_record(record: &RawRecord) -> Option<CanonicalCommunity> {
    let platform: Platform = record.text("platform")?.parse().ok()?;
    let text = |key: &str, default: &str| record.text(key).unwrap_or_else(|| default.to_string());
    let number = |key: &str| record.number(key).unwrap_or(0.0).max(0.0);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let member_count = number("member_count").round() as u64;

    Some(CanonicalCommunity {
        platform,
        community_id: text("community_id", &format!("{}_unknown", platform.prefix())),
        name: text("name", ""),
        description: text("description", ""),
        member_count,
        creation_date: record.text("creation_date"),
        category: text("category", "General"),
        is_public: record.flag("is_public").unwrap_or(false),
        location: text("location", "Global"),
        engagement_rate: number("engagement_rate").min(1.0),
        post_frequency: number("post_frequency"),
        related_topics: text("related_topics", ""),
        source_url: text("source_url", ""),
    })
}

/// Write the aggregate as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`IntegrateError`] on serialization or filesystem failure.
pub fn write_metrics(path: &Path, metrics: &CrossPlatformMetrics) -> Result<(), IntegrateError> {
    let mut out = create(path)?;
    serde_json::to_writer_pretty(&mut out, metrics).map_err(|source| IntegrateError::Json {
        path: path.display().to_string(),
        source,
    })?;
    writeln!(out).map_err(|e| IntegrateError::io(path, e))?;
    out.flush().map_err(|e| IntegrateError::io(path, e))?;

    tracing::info!(path = %path.display(), "wrote cross-platform metrics");
    Ok(())
}

/// Write a text artifact, creating the parent directory if needed.
///
/// # Errors
///
/// Returns [`IntegrateError::Io`] on any filesystem failure.
pub fn write_text(path: &Path, text: &str) -> Result<(), IntegrateError> {
    let mut out = create(path)?;
    out.write_all(text.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|e| IntegrateError::io(path, e))?;
    tracing::info!(path = %path.display(), "wrote report");
    Ok(())
}

#[cfg(test)]
#[path = "io_test.rs"]
mod tests;
