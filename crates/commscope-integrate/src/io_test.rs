use std::fs;

use commscope_core::{PlatformScaling, RawValue};
use tempfile::TempDir;

use super::*;
use crate::aggregate::aggregate;
use crate::relevance::filter_relevant;

fn community(platform: Platform, id: &str, name: &str, members: u64) -> CanonicalCommunity {
    CanonicalCommunity {
        platform,
        community_id: format!("{}_{id}", platform.prefix()),
        name: name.to_string(),
        description: "Notes, tips, and \"advice\"".to_string(),
        member_count: members,
        creation_date: Some("2020-01-01".to_string()),
        category: "Education".to_string(),
        is_public: true,
        location: "Global".to_string(),
        engagement_rate: 0.035,
        post_frequency: 2.5,
        related_topics: "study,exams".to_string(),
        source_url: "https://example.org".to_string(),
    }
}

#[test]
fn reads_csv_records_as_text() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("groups.csv");
    fs::write(&path, "group_id,name,member_count\n123456789012345678,Campus Hub,\n").unwrap();

    let records = read_records(&path).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].get("group_id"),
        Some(&RawValue::Text("123456789012345678".into()))
    );
    assert!(!records[0].contains("member_count"), "empty cell is absent");
}

#[test]
fn header_only_csv_has_no_records() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.csv");
    fs::write(&path, "id,name\n").unwrap();
    assert!(read_records(&path).unwrap().is_empty());
}

#[test]
fn reads_json_array_of_objects() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("servers.json");
    fs::write(
        &path,
        r#"[{"server_id": "42", "member_count": 1200, "tags": ["cs", "study"], "icon": null}]"#,
    )
    .unwrap();

    let records = read_records(&path).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].number("member_count"), Some(1200.0));
    assert_eq!(records[0].text("tags").as_deref(), Some("cs,study"));
    assert!(!records[0].contains("icon"));
}

#[test]
fn json_that_is_not_an_array_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{"server_id": "42"}"#).unwrap();

    let err = read_records(&path).unwrap_err();
    assert!(matches!(err, IntegrateError::InvalidRecordFile { .. }));
}

#[test]
fn malformed_json_is_a_json_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "[{").unwrap();
    assert!(matches!(
        read_records(&path).unwrap_err(),
        IntegrateError::Json { .. }
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = read_records(&dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, IntegrateError::Io { .. }));
}

#[test]
fn written_communities_read_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out/nested/integrated_communities.csv");
    let rows = vec![
        community(Platform::Reddit, "abc", "college", 1_000),
        community(Platform::Facebook, "9", "Grads, Unite", 25),
    ];

    write_communities(&path, &rows).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with(&COLUMNS.join(",")));

    assert_eq!(read_canonical(&path).unwrap(), rows);
}

#[test]
fn read_canonical_fills_missing_columns() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("partial.csv");
    fs::write(&path, "platform,name,member_count\nDiscord,Study Hall,-5\n").unwrap();

    let rows = read_canonical(&path).unwrap();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.platform, Platform::Discord);
    assert_eq!(row.community_id, "discord_unknown");
    assert_eq!(row.member_count, 0);
    assert_eq!(row.category, "General");
    assert_eq!(row.location, "Global");
    assert_eq!(row.engagement_rate, 0.0);
}

#[test]
fn read_canonical_skips_rows_without_platform() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mixed.csv");
    fs::write(
        &path,
        "platform,name\nReddit,college\nMySpace,old\n,blank\ninstagram,campuslife\n",
    )
    .unwrap();

    let rows = read_canonical(&path).unwrap();
    let names: Vec<_> = rows.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["college", "campuslife"]);
}

#[test]
fn metrics_are_pretty_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cross_platform_metrics.json");
    let rows = vec![community(Platform::Reddit, "a", "college", 10)];
    let metrics = aggregate(&rows, &PlatformScaling::default(), 10);

    write_metrics(&path, &metrics).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("\n  \"total_communities\": 1"));

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["platform_distribution"]["Reddit"], 1);
}

#[test]
fn classified_rows_carry_score_columns() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("classified_communities.csv");
    let rows = vec![community(Platform::Reddit, "a", "college", 10)];

    write_classified(&path, &filter_relevant(&rows)).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert!(lines.next().unwrap().ends_with("relevance_score,community_type"));
    assert!(lines.next().unwrap().ends_with("Student-focused"));
}

#[test]
fn write_text_creates_parent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reports/integration_report.txt");
    write_text(&path, "hello\n").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
}
