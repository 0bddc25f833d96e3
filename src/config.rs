//! Pipeline settings for [`ShadingStages`](crate::stage::ShadingStages).
//!
//! Deserialized from JSON. Every field has a default, so an empty object
//! (or no file at all) yields a working configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShadeError};

/// What fills the unused lanes of a partially filled vertex batch.
///
/// Shaders run on all lanes regardless of `lane_count`; this decides what
/// they see there. Results from those lanes are never read back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TailLanes {
    /// Unused lanes hold zero in every attribute.
    #[default]
    Zeroed,
    /// Unused lanes repeat the last valid vertex.
    ReplicateLast,
}

/// Settings applied by [`ShadingStages`](crate::stage::ShadingStages) around
/// every shader invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShadingConfig {
    /// Fill policy for spare lanes in the final vertex batch of a draw.
    pub tail_lanes: TailLanes,
    /// Zero all channels of pixel lanes outside the coverage mask.
    pub clear_inactive_pixels: bool,
}

impl Default for ShadingConfig {
    fn default() -> Self {
        ShadingConfig {
            tail_lanes: TailLanes::Zeroed,
            clear_inactive_pixels: true,
        }
    }
}

impl ShadingConfig {
    /// Parses a configuration from JSON text. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ShadeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = ShadingConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ShadingConfig::default());
    }

    #[test]
    fn parses_tail_policy() {
        let config =
            ShadingConfig::from_json_str(r#"{ "tail_lanes": "replicate_last" }"#).unwrap();
        assert_eq!(config.tail_lanes, TailLanes::ReplicateLast);
        assert!(config.clear_inactive_pixels);
    }

    #[test]
    fn rejects_unknown_policy() {
        let err = ShadingConfig::from_json_str(r#"{ "tail_lanes": "garbage" }"#).unwrap_err();
        assert!(matches!(err, ShadeError::Config(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ShadingConfig::load("/nonexistent/shading.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/shading.json"));
    }
}
