use std::path::PathBuf;

use crate::Platform;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl Environment {
    /// Log filter used when `COMMSCOPE_LOG_LEVEL` is unset.
    #[must_use]
    pub fn default_log_level(&self) -> &'static str {
        match self {
            Environment::Development => "debug",
            Environment::Test | Environment::Production => "info",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub reddit_dir: PathBuf,
    pub discord_dir: PathBuf,
    pub instagram_dir: PathBuf,
    pub facebook_dir: PathBuf,
    pub output_dir: PathBuf,
    /// YAML file overriding the built-in platform scaling factors.
    pub scaling_path: Option<PathBuf>,
    /// Seed for the synthetic engagement sampler; `None` means non-reproducible runs.
    pub rng_seed: Option<u64>,
    pub top_categories: usize,
    pub top_communities: usize,
}

impl AppConfig {
    /// Directory the collector for `platform` writes its exports to.
    #[must_use]
    pub fn input_dir(&self, platform: Platform) -> &PathBuf {
        match platform {
            Platform::Reddit => &self.reddit_dir,
            Platform::Discord => &self.discord_dir,
            Platform::Instagram => &self.instagram_dir,
            Platform::Facebook => &self.facebook_dir,
        }
    }
}
