//! Error types for the registry initializer

use std::path::PathBuf;

use thiserror::Error;

/// Result type for run-level operations
pub type Result<T> = std::result::Result<T, InitError>;

/// Fatal errors. Any of these stops the run before (or instead of) processing schemas.
#[derive(Error, Debug)]
pub enum InitError {
    #[error("Schema Registry not available after {attempts} attempts")]
    RegistryUnavailable { attempts: u32 },

    #[error("{} directory not found", path.display())]
    SchemaDirMissing { path: PathBuf },

    #[error("Failed to list schema directory: {0}")]
    SchemaDir(#[from] walkdir::Error),

    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Per-schema failures. These are recorded against a single file and never abort the run.
///
/// The `Display` output is the failure detail shown to operators.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("{0}")]
    Read(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("{0}")]
    Transport(String),

    #[error("Invalid response body: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for SchemaError {
    fn from(err: reqwest::Error) -> Self {
        SchemaError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_detail_contains_status() {
        let err = SchemaError::Http {
            status: 409,
            message: "Schema being registered is incompatible".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "HTTP 409: Schema being registered is incompatible"
        );
    }

    #[test]
    fn test_invalid_json_mentions_parse_failure() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
        let err = SchemaError::from(parse_err);
        assert!(err.to_string().starts_with("Invalid JSON: "));
    }
}
