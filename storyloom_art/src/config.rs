// Data-driven illustration configuration.
//
// `ArtConfig` enumerates every color the composers paint with (the
// five-color decorative palette, the three role colors, and the fixed ink,
// paper, and accent colors) plus the keyword matching mode for motif
// detection. It loads from JSON; any field left out of the file keeps its
// default, so a config that only overrides `role_colors` is valid.
//
// Geometry (glyph sizes, tree spacing, building counts) is not configurable:
// those constants live next to the recipes in `scene.rs` and `portrait.rs`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ArtError, Result};
use crate::motif::KeywordMatching;
use crate::palette::{Color, RoleColors};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtConfig {
    /// Decorative colors for randomly scattered background ornaments.
    pub palette: Vec<Color>,
    pub role_colors: RoleColors,
    /// Outlines, facial features, and labels.
    pub ink: Color,
    /// Portrait background and eye whites.
    pub paper: Color,
    /// Second stop of the scene's diagonal background gradient.
    pub gradient_end: Color,
    /// Ground strip, forest canopies, and open water.
    pub scenery: Color,
    /// Trait markers on portraits.
    pub accent: Color,
    /// Lit windows in settlements and on the castle.
    pub window: Color,
    pub keyword_matching: KeywordMatching,
}

impl Default for ArtConfig {
    fn default() -> Self {
        Self {
            palette: vec![
                Color::from_static("#FF6B6B"),
                Color::from_static("#4ECDC4"),
                Color::from_static("#FFE66D"),
                Color::from_static("#F7F9FC"),
                Color::from_static("#2C3E50"),
            ],
            role_colors: RoleColors::default(),
            ink: Color::from_static("#2C3E50"),
            paper: Color::from_static("#F7F9FC"),
            gradient_end: Color::from_static("#E2E8F0"),
            scenery: Color::from_static("#4ECDC4"),
            accent: Color::from_static("#FFE66D"),
            window: Color::from_static("#FFE66D"),
            keyword_matching: KeywordMatching::Substring,
        }
    }
}

impl ArtConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ArtConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| ArtError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.palette.is_empty() {
            return Err(ArtError::EmptyPalette);
        }
        Ok(())
    }
}
