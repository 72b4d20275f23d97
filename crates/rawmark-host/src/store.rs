//! JSON persistence of block data, the only durable artifact:
//! a single object `{ "html": "<string>" }`.

use std::path::{Path, PathBuf};

use rawmark_engine::{BlockTool, RawBlock, RawBlockData};

use crate::sanitize;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Block file not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid block data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reads persisted block data. A present-but-partial object (no `html` key)
/// deserializes to the default, never an error.
pub fn load_block(path: &Path) -> Result<RawBlockData, StoreError> {
    if !path.exists() {
        return Err(StoreError::NotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Writes block data as pretty JSON, creating parent directories as needed.
pub fn save_block(path: &Path, data: &RawBlockData) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(data)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Persists block data after running the tool's sanitize descriptor over it,
/// the way the host treats every tool's save output. For the raw block the
/// descriptor allows everything, so the markup is stored byte-identical.
pub fn save_block_sanitized(path: &Path, data: &RawBlockData) -> Result<(), StoreError> {
    let mut value = serde_json::to_value(data)?;
    sanitize::apply(&RawBlock::sanitize(), &mut value);
    let sanitized: RawBlockData = serde_json::from_value(value)?;
    save_block(path, &sanitized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("block.json");
        let data = RawBlockData {
            html: "<p>hello</p>\n<script>x()</script>".to_string(),
        };

        save_block(&path, &data).unwrap();
        assert_eq!(load_block(&path).unwrap(), data);
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let result = load_block(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn load_empty_object_defaults_html() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("block.json");
        std::fs::write(&path, "{}").unwrap();

        assert_eq!(load_block(&path).unwrap(), RawBlockData::default());
    }

    #[test]
    fn load_malformed_json_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("block.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(load_block(&path), Err(StoreError::Json(_))));
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/block.json");

        save_block(&path, &RawBlockData::default()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn sanitized_save_never_alters_raw_markup() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("block.json");
        let data = RawBlockData {
            html: "<script>alert(1)</script><b unclosed".to_string(),
        };

        save_block_sanitized(&path, &data).unwrap();
        assert_eq!(load_block(&path).unwrap(), data);
    }
}
