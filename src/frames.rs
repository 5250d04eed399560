// ============================================================================
// FRAME REGISTRY — named decorative overlays for CompositeFrame
// ============================================================================
//
// A config-driven map from frame name to image path, replacing per-frame
// hardcoded file locations. The registry is the engine's only view of the
// filesystem for overlays; a frame that cannot be located or decoded is
// reported as `MissingOverlay` and the session stays untouched.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::EngineConfig;
use crate::io;
use crate::raster::RasterImage;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("missing overlay '{name}': {reason}")]
    MissingOverlay { name: String, reason: String },
}

#[derive(Debug, Default, Clone)]
pub struct FrameRegistry {
    frames: BTreeMap<String, PathBuf>,
}

impl FrameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry from the `[frames]` table of an engine config.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self { frames: config.frames.clone() }
    }

    /// Register every supported image file in `dir` under its file stem.
    /// Convenience for a directory of frame PNGs.
    pub fn add_dir(&mut self, dir: &Path) -> std::io::Result<()> {
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_image = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| matches!(e.to_lowercase().as_str(), "png" | "jpg" | "jpeg" | "bmp"));
            if !is_image {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                self.frames.insert(stem.to_string(), path.clone());
            }
        }
        Ok(())
    }

    pub fn insert(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) {
        self.frames.insert(name.into(), path.into());
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Registered frame names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.frames.keys().map(|k| k.as_str())
    }

    /// Decode the overlay registered under `name`.
    pub fn resolve(&self, name: &str) -> Result<RasterImage, ResourceError> {
        let Some(path) = self.frames.get(name) else {
            return Err(ResourceError::MissingOverlay {
                name: name.to_string(),
                reason: "no such frame in the registry".to_string(),
            });
        };
        io::decode_image(path).map_err(|e| ResourceError::MissingOverlay {
            name: name.to_string(),
            reason: e.to_string(),
        })
    }
}
