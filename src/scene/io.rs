//! Import and export boundaries of the scene document.

use crate::foundation::error::{StickmanError, StickmanResult};
use crate::foundation::math::Fnv1a64;
use crate::scene::model::Scene;
use crate::schema::validate::parse_scene;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

impl Scene {
    /// Parse and validate raw JSON text.
    ///
    /// Malformed text is an [`StickmanError::Import`]; a well-formed document that breaks the
    /// schema is an [`StickmanError::Validation`] carrying every violation.
    pub fn from_json_str(text: &str) -> StickmanResult<Self> {
        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| StickmanError::import(format!("parse scene JSON: {e}")))?;
        Ok(parse_scene(&value)?)
    }

    /// Parse and validate JSON from a reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> StickmanResult<Self> {
        let value: serde_json::Value = serde_json::from_reader(r)
            .map_err(|e| StickmanError::import(format!("parse scene JSON: {e}")))?;
        Ok(parse_scene(&value)?)
    }

    /// Parse and validate a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> StickmanResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            StickmanError::import(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Indented JSON text of this scene, ready for download or transport.
    pub fn to_json_pretty(&self) -> StickmanResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| StickmanError::serde(e.to_string()))
    }

    /// Untyped JSON value of this scene.
    pub fn to_value(&self) -> StickmanResult<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| StickmanError::serde(e.to_string()))
    }

    /// Stable 64-bit digest of the exported document.
    ///
    /// Equal scenes have equal fingerprints across runs and platforms.
    pub fn fingerprint(&self) -> StickmanResult<u64> {
        let bytes = serde_json::to_vec(self).map_err(|e| StickmanError::serde(e.to_string()))?;
        let mut h = Fnv1a64::new_default();
        h.write_bytes(&bytes);
        Ok(h.finish())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/io.rs"]
mod tests;
