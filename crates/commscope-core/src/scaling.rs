use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, Platform};

/// Per-platform multipliers applied to raw engagement rates so they can be
/// compared across platforms with different interaction norms.
///
/// The defaults are a hand-picked calibration, not derived from data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformScaling {
    pub reddit: f64,
    pub discord: f64,
    pub instagram: f64,
    pub facebook: f64,
}

impl Default for PlatformScaling {
    fn default() -> Self {
        Self {
            reddit: 1.0,
            discord: 0.5,
            instagram: 1.2,
            facebook: 0.8,
        }
    }
}

impl PlatformScaling {
    #[must_use]
    pub fn factor(&self, platform: Platform) -> f64 {
        match platform {
            Platform::Reddit => self.reddit,
            Platform::Discord => self.discord,
            Platform::Instagram => self.instagram,
            Platform::Facebook => self.facebook,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ScalingFile {
    #[serde(default)]
    pub scaling: PlatformScaling,
}

/// Load and validate platform scaling factors from a YAML file.
///
/// Platforms omitted from the file keep their default factor.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_scaling(path: &Path) -> Result<PlatformScaling, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ScalingFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_scaling(&content)
}

/// Parse and validate scaling factors from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or a factor is invalid.
pub fn parse_scaling(content: &str) -> Result<PlatformScaling, ConfigError> {
    let file: ScalingFile = serde_yaml::from_str(content)?;
    validate_scaling(&file.scaling)?;
    Ok(file.scaling)
}

fn validate_scaling(scaling: &PlatformScaling) -> Result<(), ConfigError> {
    for platform in Platform::ALL {
        let factor = scaling.factor(platform);
        if !factor.is_finite() || factor < 0.0 {
            return Err(ConfigError::Validation(format!(
                "scaling factor for {platform} must be a finite non-negative number, got {factor}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "scaling_test.rs"]
mod tests;
