//! Locating and loading each collector's latest export.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use commscope_core::{AppConfig, Platform, RawRecord};

use crate::io::read_records;
use crate::normalize::RawByPlatform;

/// How a collector's export file is recognized inside its directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilePattern {
    /// A fixed file name.
    Exact(&'static str),
    /// The most recently modified file named `{prefix}*{suffix}`.
    Newest {
        prefix: &'static str,
        suffix: &'static str,
    },
}

/// Patterns tried in order for `platform`; the first match wins.
#[must_use]
pub fn patterns(platform: Platform) -> &'static [FilePattern] {
    match platform {
        Platform::Reddit => &[FilePattern::Exact("filtered_student_communities.csv")],
        Platform::Discord => &[FilePattern::Newest {
            prefix: "discord_communities_",
            suffix: ".csv",
        }],
        Platform::Instagram => &[
            FilePattern::Newest {
                prefix: "instagram_communities_filtered_",
                suffix: ".csv",
            },
            FilePattern::Newest {
                prefix: "processed_instagram_data_",
                suffix: ".csv",
            },
        ],
        Platform::Facebook => &[FilePattern::Exact("groups.csv")],
    }
}

fn newest_matching(dir: &Path, prefix: &str, suffix: &str) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;
    entries
        .filter_map(Result::ok)
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(prefix) && name.ends_with(suffix))
        })
        .filter_map(|entry| {
            let meta = entry.metadata().ok()?;
            if !meta.is_file() {
                return None;
            }
            let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            Some((modified, entry.path()))
        })
        // Name breaks mtime ties so the choice is deterministic.
        .max_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)))
        .map(|(_, path)| path)
}

/// Resolve the export file for `platform` inside `dir`, if any.
#[must_use]
pub fn locate_input(dir: &Path, platform: Platform) -> Option<PathBuf> {
    patterns(platform).iter().find_map(|pattern| match *pattern {
        FilePattern::Exact(name) => {
            let path = dir.join(name);
            path.is_file().then_some(path)
        }
        FilePattern::Newest { prefix, suffix } => newest_matching(dir, prefix, suffix),
    })
}

/// Load one platform's records from `dir`.
///
/// A missing export is logged as a warning and an unreadable one as an error;
/// both yield an empty list so the run continues with the other platforms.
#[must_use]
pub fn load_platform(dir: &Path, platform: Platform) -> Vec<RawRecord> {
    let Some(path) = locate_input(dir, platform) else {
        tracing::warn!(
            %platform,
            dir = %dir.display(),
            "no input file found; treating platform as empty"
        );
        return Vec::new();
    };

    match read_records(&path) {
        Ok(records) => {
            tracing::info!(
                %platform,
                path = %path.display(),
                count = records.len(),
                "loaded raw records"
            );
            records
        }
        Err(e) => {
            tracing::error!(
                %platform,
                path = %path.display(),
                error = %e,
                "failed to read input file; treating platform as empty"
            );
            Vec::new()
        }
    }
}

/// Load every platform from its configured directory.
#[must_use]
pub fn load_all(config: &AppConfig) -> RawByPlatform {
    Platform::ALL
        .iter()
        .map(|&platform| (platform, load_platform(config.input_dir(platform), platform)))
        .collect()
}
