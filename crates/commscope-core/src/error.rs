use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read scaling file {path}: {source}")]
    ScalingFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scaling file: {0}")]
    ScalingFileParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),
}
