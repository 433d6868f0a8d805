//! Studio configuration and the block palette
//!
//! Configuration is plain JSON. Every key is optional:
//!
//! ```json
//! { "palette": ["Header", "Text", "Buttons"], "hydrateOnLoad": true, "maxBlocks": 50 }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::blocks::BlockCategory;
use crate::core::registry::BlockRegistry;
use crate::core::{BlockType, ContentBlock};

/// Editor-wide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudioConfig {
    /// Block types offered by the palette, in display order
    #[serde(default = "default_palette")]
    pub palette: Vec<BlockType>,
    /// Hydrate stored props when a page is loaded
    #[serde(default = "default_hydrate_on_load")]
    pub hydrate_on_load: bool,
    /// Upper bound on blocks per page
    #[serde(default)]
    pub max_blocks: Option<usize>,
}

fn default_palette() -> Vec<BlockType> {
    BlockType::ALL.to_vec()
}

fn default_hydrate_on_load() -> bool {
    true
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            palette: default_palette(),
            hydrate_on_load: default_hydrate_on_load(),
            max_blocks: None,
        }
    }
}

impl StudioConfig {
    /// Parse configuration from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: StudioConfig = serde_json::from_str(json)?;
        tracing::debug!(
            palette = config.palette.len(),
            hydrate_on_load = config.hydrate_on_load,
            max_blocks = ?config.max_blocks,
            "loaded studio config"
        );
        Ok(config)
    }

    /// Read configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Palette built from the configured block types
    pub fn palette(&self) -> Palette {
        Palette::new(&self.palette)
    }
}

/// One palette tile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteEntry {
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub display_name: &'static str,
    pub category: BlockCategory,
}

/// Creatable block types
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Palette over `types`; repeated types are listed once
    pub fn new(types: &[BlockType]) -> Self {
        let mut entries: Vec<PaletteEntry> = Vec::with_capacity(types.len());
        for &block_type in types {
            if entries.iter().any(|e| e.block_type == block_type) {
                continue;
            }
            entries.push(PaletteEntry {
                block_type,
                display_name: block_type.display_name(),
                category: block_type.category(),
            });
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn contains(&self, block_type: BlockType) -> bool {
        self.entries.iter().any(|e| e.block_type == block_type)
    }

    /// Entries of one category, in palette order
    pub fn by_category(&self, category: BlockCategory) -> impl Iterator<Item = &PaletteEntry> {
        self.entries.iter().filter(move |e| e.category == category)
    }

    /// Create a new block of an enabled type
    pub fn create(&self, registry: &BlockRegistry, block_type: BlockType) -> Result<ContentBlock, ConfigError> {
        if !self.contains(block_type) {
            tracing::warn!(%block_type, "block type is not enabled in the palette");
            return Err(ConfigError::BlockTypeDisabled(block_type));
        }
        Ok(registry.create_block(block_type))
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(&BlockType::ALL)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    /// Palette does not offer the requested type
    #[error("Block type {0} is not enabled in the palette")]
    BlockTypeDisabled(BlockType),
}
