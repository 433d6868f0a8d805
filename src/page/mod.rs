//! Page document
//!
//! A page is an ordered list of content blocks. It is stored as a JSON array of
//! `{ id, type, props, style }` records.

pub mod validation;

use std::collections::HashSet;

use crate::config::StudioConfig;
use crate::core::editor::BlockEdit;
use crate::core::list::MoveDirection;
use crate::core::registry::BlockRegistry;
use crate::core::{BlockId, ContentBlock};

pub use validation::{PageValidator, ValidationIssue, ValidationReport};

/// In-memory page being edited
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    blocks: Vec<ContentBlock>,
    max_blocks: Option<usize>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty page honouring the configured block limit
    pub fn with_config(config: &StudioConfig) -> Self {
        Self {
            blocks: Vec::new(),
            max_blocks: config.max_blocks,
        }
    }

    /// Parse a stored page.
    ///
    /// Unknown block types and repeated block ids are rejected. With
    /// `hydrate_on_load` every block's props are merged over its defaults.
    pub fn load(json: &str, registry: &BlockRegistry, config: &StudioConfig) -> Result<Self, PageError> {
        let mut blocks: Vec<ContentBlock> = serde_json::from_str(json)?;
        let mut seen = HashSet::new();
        if let Some(repeated) = blocks.iter().find(|block| !seen.insert(block.id())) {
            tracing::warn!(block_id = %repeated.id(), "stored page repeats a block id");
            return Err(PageError::DuplicateBlock(repeated.id().clone()));
        }
        if config.hydrate_on_load {
            blocks = blocks.iter().map(|block| registry.hydrate_block(block)).collect();
        }
        tracing::debug!(blocks = blocks.len(), hydrated = config.hydrate_on_load, "loaded page");
        Ok(Self {
            blocks,
            max_blocks: config.max_blocks,
        })
    }

    /// Serialize as a JSON array of blocks
    pub fn to_json(&self) -> Result<String, PageError> {
        Ok(serde_json::to_string(&self.blocks)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, PageError> {
        Ok(serde_json::to_string_pretty(&self.blocks)?)
    }

    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, id: &BlockId) -> Option<&ContentBlock> {
        self.blocks.iter().find(|block| block.id() == id)
    }

    pub fn position(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|block| block.id() == id)
    }

    /// Insert a block at `index` (`len()` appends)
    pub fn insert(&mut self, index: usize, block: ContentBlock) -> Result<(), PageError> {
        if index > self.blocks.len() {
            return Err(PageError::IndexOutOfRange {
                index,
                len: self.blocks.len(),
            });
        }
        if let Some(max) = self.max_blocks.filter(|max| self.blocks.len() >= *max) {
            return Err(PageError::TooManyBlocks(max));
        }
        if self.get(block.id()).is_some() {
            return Err(PageError::DuplicateBlock(block.id().clone()));
        }
        self.blocks.insert(index, block);
        Ok(())
    }

    /// Append a block
    pub fn push(&mut self, block: ContentBlock) -> Result<(), PageError> {
        self.insert(self.blocks.len(), block)
    }

    pub fn remove(&mut self, id: &BlockId) -> Result<ContentBlock, PageError> {
        let index = self.index_of(id)?;
        Ok(self.blocks.remove(index))
    }

    /// Swap a block with its neighbour. Returns `false` at the page boundaries.
    pub fn move_block(&mut self, id: &BlockId, direction: MoveDirection) -> Result<bool, PageError> {
        let index = self.index_of(id)?;
        let target = match direction {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => Some(index + 1).filter(|i| *i < self.blocks.len()),
        };
        match target {
            Some(target) => {
                self.blocks.swap(index, target);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Insert a copy right after the original and return its id
    pub fn duplicate(&mut self, registry: &BlockRegistry, id: &BlockId) -> Result<BlockId, PageError> {
        let index = self.index_of(id)?;
        let copy = registry.duplicate_block(&self.blocks[index]);
        let copy_id = copy.id().clone();
        self.insert(index + 1, copy)?;
        Ok(copy_id)
    }

    /// Apply a settings edit to one block
    pub fn edit(&mut self, registry: &BlockRegistry, id: &BlockId, edit: &BlockEdit) -> Result<&ContentBlock, PageError> {
        let index = self.index_of(id)?;
        self.blocks[index] = registry.apply_edit(&self.blocks[index], edit);
        Ok(&self.blocks[index])
    }

    pub fn validate(&self, registry: &BlockRegistry) -> ValidationReport {
        PageValidator::validate(registry, &self.blocks, self.max_blocks)
    }

    fn index_of(&self, id: &BlockId) -> Result<usize, PageError> {
        self.position(id).ok_or_else(|| PageError::BlockNotFound(id.clone()))
    }
}

/// Page errors
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// Stored page could not be parsed, or the page could not be encoded
    #[error("Page JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Block not found: {0}")]
    BlockNotFound(BlockId),

    #[error("Duplicate block ID: {0}")]
    DuplicateBlock(BlockId),

    #[error("Page is limited to {0} blocks")]
    TooManyBlocks(usize),

    #[error("Insert position {index} is past the end of the page ({len} blocks)")]
    IndexOutOfRange { index: usize, len: usize },
}
