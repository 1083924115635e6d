use std::path::Path;
use serde::de::DeserializeOwned;

use crate::error::{GenerateError, Result};

/// Deserialize with JSON-path context in error messages.
pub fn from_slice_with_path<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, String> {
    let de = &mut serde_json::Deserializer::from_slice(bytes);
    match serde_path_to_error::deserialize::<_, T>(de) {
        Ok(v) => Ok(v),
        Err(err) => {
            let path = err.path().to_string();
            Err(format!("at JSON path {path} → {}", err.into_inner()))
        }
    }
}

/// Read a JSON file and decode it, attributing failures to `path`.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = std::fs::read(path).map_err(|source| GenerateError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_slice_with_path(&bytes).map_err(|detail| GenerateError::Metadata {
        path: path.to_path_buf(),
        detail,
    })
}
