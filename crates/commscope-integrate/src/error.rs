use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntegrateError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid record file {path}: {reason}")]
    InvalidRecordFile { path: String, reason: String },
}

impl IntegrateError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        IntegrateError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
