//! Level data and tuning for weak blocks.
//!
//! `BlockSettings` is the per-block record a level file carries, `BlockTimings`
//! stands in for the sprite action lengths, and `ObjectSettings` is what the
//! level editor shows for a selected block.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::block::BlockVariant;
use crate::constants::{DEFAULT_BURN_SECS, DEFAULT_DISINTEGRATE_SECS, STRAWBOX_SPRITE};
use crate::error::BlockError;

// =====================================================
// Timings
// =====================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockTimings {
    /// Length of the one-shot "burning" action
    pub burn_secs: f32,
    /// Length of the one-shot "disintegrating" action
    pub disintegrate_secs: f32,
}

impl Default for BlockTimings {
    fn default() -> Self {
        Self {
            burn_secs: DEFAULT_BURN_SECS,
            disintegrate_secs: DEFAULT_DISINTEGRATE_SECS,
        }
    }
}

impl BlockTimings {
    pub fn validate(&self) -> Result<(), BlockError> {
        for (field, value) in [
            ("burn_secs", self.burn_secs),
            ("disintegrate_secs", self.disintegrate_secs),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(BlockError::InvalidTiming { field, value });
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, BlockError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, BlockError> {
        let timings: Self = serde_json::from_str(json)?;
        timings.validate()?;
        Ok(timings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, BlockError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

// =====================================================
// Level records
// =====================================================

/// One weak block as placed in a level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockSettings {
    pub x: f32,
    pub y: f32,
    pub sprite: String,
    pub linked: bool,
}

impl Default for BlockSettings {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            sprite: STRAWBOX_SPRITE.to_string(),
            linked: true,
        }
    }
}

impl BlockSettings {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            ..Default::default()
        }
    }

    pub fn with_sprite(mut self, sprite: &str) -> Self {
        self.sprite = sprite.to_string();
        self
    }

    pub fn with_linked(mut self, linked: bool) -> Self {
        self.linked = linked;
        self
    }

    /// Unlinked blocks always use the meltbox, whatever sprite is set.
    pub fn variant(&self) -> BlockVariant {
        if !self.linked {
            return BlockVariant::Meltable;
        }
        BlockVariant::from_sprite(&self.sprite)
    }

    pub fn from_ron(source: &str) -> Result<Self, BlockError> {
        Ok(ron::from_str(source)?)
    }

    pub fn to_ron(&self) -> Result<String, BlockError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// Options the editor exposes: base sprite-object fields plus the linked toggle.
    pub fn object_settings(&self) -> ObjectSettings {
        ObjectSettings {
            options: vec![
                ObjectOption::new(
                    OptionKind::File,
                    "Sprite",
                    "sprite",
                    OptionValue::Text(self.sprite.clone()),
                ),
                ObjectOption::new(OptionKind::Float, "X", "x", OptionValue::Float(self.x)),
                ObjectOption::new(OptionKind::Float, "Y", "y", OptionValue::Float(self.y)),
                ObjectOption::new(
                    OptionKind::Toggle,
                    "Linked",
                    "linked",
                    OptionValue::Bool(self.linked),
                ),
            ],
        }
    }

    /// Write an edited option back into the record.
    pub fn apply_option(&mut self, key: &str, value: OptionValue) -> Result<(), BlockError> {
        let mismatch = |expected| BlockError::OptionType {
            key: key.to_string(),
            expected,
        };
        match (key, value) {
            ("sprite", OptionValue::Text(sprite)) => self.sprite = sprite,
            ("sprite", _) => return Err(mismatch("text")),
            ("x", OptionValue::Float(x)) => self.x = x,
            ("y", OptionValue::Float(y)) => self.y = y,
            ("x" | "y", _) => return Err(mismatch("float")),
            ("linked", OptionValue::Bool(linked)) => self.linked = linked,
            ("linked", _) => return Err(mismatch("bool")),
            (other, _) => return Err(BlockError::UnknownOption(other.to_string())),
        }
        Ok(())
    }
}

/// All weak blocks of one level area.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    #[serde(default)]
    pub blocks: Vec<BlockSettings>,
}

impl LevelLayout {
    pub fn from_ron(source: &str) -> Result<Self, BlockError> {
        Ok(ron::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, BlockError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_ron(&content)
    }
}

// =====================================================
// Editor properties
// =====================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionKind {
    Toggle,
    Float,
    File,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OptionValue {
    Bool(bool),
    Float(f32),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectOption {
    pub kind: OptionKind,
    pub label: String,
    pub key: String,
    pub value: OptionValue,
}

impl ObjectOption {
    pub fn new(kind: OptionKind, label: &str, key: &str, value: OptionValue) -> Self {
        Self {
            kind,
            label: label.to_string(),
            key: key.to_string(),
            value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectSettings {
    pub options: Vec<ObjectOption>,
}

impl ObjectSettings {
    pub fn get(&self, key: &str) -> Option<&ObjectOption> {
        self.options.iter().find(|o| o.key == key)
    }
}
