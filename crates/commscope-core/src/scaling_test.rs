use std::io::Write;

use super::*;

#[test]
fn default_factors_match_calibration() {
    let scaling = PlatformScaling::default();
    assert_eq!(scaling.factor(Platform::Reddit), 1.0);
    assert_eq!(scaling.factor(Platform::Discord), 0.5);
    assert_eq!(scaling.factor(Platform::Instagram), 1.2);
    assert_eq!(scaling.factor(Platform::Facebook), 0.8);
}

#[test]
fn parse_full_file() {
    let yaml = "scaling:\n  reddit: 1.0\n  discord: 0.25\n  instagram: 1.5\n  facebook: 0.9\n";
    let scaling = parse_scaling(yaml).unwrap();
    assert_eq!(scaling.discord, 0.25);
    assert_eq!(scaling.instagram, 1.5);
    assert_eq!(scaling.facebook, 0.9);
}

#[test]
fn parse_partial_file_keeps_defaults() {
    let yaml = "scaling:\n  discord: 0.4\n";
    let scaling = parse_scaling(yaml).unwrap();
    assert_eq!(scaling.discord, 0.4);
    assert_eq!(scaling.reddit, 1.0);
    assert_eq!(scaling.instagram, 1.2);
}

#[test]
fn parse_empty_mapping_uses_defaults() {
    let scaling = parse_scaling("{}").unwrap();
    assert_eq!(scaling, PlatformScaling::default());
}

#[test]
fn parse_rejects_negative_factor() {
    let err = parse_scaling("scaling:\n  facebook: -0.1\n").unwrap_err();
    assert!(
        matches!(err, ConfigError::Validation(ref msg) if msg.contains("Facebook")),
        "expected Validation error naming Facebook, got: {err:?}"
    );
}

#[test]
fn parse_rejects_malformed_yaml() {
    let err = parse_scaling("scaling: [1, 2").unwrap_err();
    assert!(matches!(err, ConfigError::ScalingFileParse(_)));
}

#[test]
fn load_missing_file_is_io_error() {
    let err = load_scaling(Path::new("/nonexistent/scaling.yaml")).unwrap_err();
    assert!(
        matches!(err, ConfigError::ScalingFileIo { ref path, .. } if path.contains("scaling.yaml")),
        "expected ScalingFileIo, got: {err:?}"
    );
}

#[test]
fn load_reads_file_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "scaling:\n  reddit: 2.0").unwrap();
    let scaling = load_scaling(file.path()).unwrap();
    assert_eq!(scaling.reddit, 2.0);
}
