use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::document::ConfigDocument;

/// Errors returned when loading a serialized document.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read document {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to deserialize document {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

/// Deserialize a document from its JSON representation.
pub fn load(raw: &str) -> Result<ConfigDocument, LoadError> {
    serde_json::from_str(raw).map_err(|source| LoadError::Json {
        path: "inline document".to_string(),
        source,
    })
}

/// Read and deserialize a document from a JSON file.
pub fn load_file(path: &Path) -> Result<ConfigDocument, LoadError> {
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| LoadError::Json {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{load, load_file, LoadError};

    #[test]
    fn loads_partial_document_with_defaults() {
        let doc = load(r#"{"system": {"hostname": "fw01", "domain": "example.net"}}"#)
            .expect("document should parse");
        assert_eq!(doc.system.hostname, "fw01");
        assert!(doc.rules.is_empty());
        assert!(doc.interfaces.is_empty());
    }

    #[test]
    fn load_file_reports_json_error_with_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.json");
        fs::write(&path, "{not json").expect("write broken file");

        let err = load_file(&path).expect_err("should fail parse");
        match err {
            LoadError::Json { path, .. } => assert!(path.ends_with("broken.json")),
            other => panic!("unexpected error variant: {other}"),
        }
    }

    #[test]
    fn load_file_reports_io_error_for_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_file(&dir.path().join("missing.json")).expect_err("should fail read");
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
