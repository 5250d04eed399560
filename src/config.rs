// ============================================================================
// ENGINE CONFIG — history caps and the named-frame registry, from TOML
// ============================================================================
//
// Example:
//
//     max_history_depth = 50
//     max_history_bytes = 104857600   # 100 MB of snapshots
//
//     [frames]
//     leafy  = "frames/leafy.png"
//     floral = "frames/floral.png"
//
// Both caps default to unlimited; an empty `[frames]` table (or none at all)
// simply leaves the registry empty.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Maximum undo entries kept; unset = unlimited.
    pub max_history_depth: Option<usize>,
    /// Snapshot byte budget across both history stacks; unset = unlimited.
    pub max_history_bytes: Option<usize>,
    /// Named frame overlays: name -> image path. Relative paths are resolved
    /// against the config file's directory at load time.
    #[serde(default)]
    pub frames: BTreeMap<String, PathBuf>,
}

impl EngineConfig {
    /// Load and parse a TOML config file, anchoring relative frame paths to
    /// the file's own directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let mut config: EngineConfig =
            toml::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;

        if let Some(dir) = path.parent() {
            for frame_path in config.frames.values_mut() {
                if frame_path.is_relative() {
                    *frame_path = dir.join(&*frame_path);
                }
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_unlimited_and_empty() {
        let config: EngineConfig = toml::from_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert!(config.max_history_depth.is_none());
        assert!(config.frames.is_empty());
    }

    #[test]
    fn parses_caps_and_frames() {
        let config: EngineConfig = toml::from_str(
            r#"
            max_history_depth = 25
            max_history_bytes = 1048576

            [frames]
            leafy = "frames/leafy.png"
            "#,
        )
        .unwrap();
        assert_eq!(config.max_history_depth, Some(25));
        assert_eq!(config.max_history_bytes, Some(1_048_576));
        assert_eq!(config.frames["leafy"], PathBuf::from("frames/leafy.png"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<EngineConfig>("zoom_factor = 2.0").is_err());
    }

    #[test]
    fn load_anchors_relative_frame_paths() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("retouch.toml");
        let mut f = std::fs::File::create(&config_path).unwrap();
        writeln!(f, "[frames]\nsky = \"sky.png\"").unwrap();

        let config = EngineConfig::load(&config_path).unwrap();
        assert_eq!(config.frames["sky"], dir.path().join("sky.png"));
    }
}
