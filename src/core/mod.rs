//! Core content model
//!
//! This module defines the block envelope, the persistent prop tree, and the
//! pure update protocol (path updates, list-item CRUD, hydration, style merge)
//! that every settings editor goes through.

pub mod block;
pub mod editor;
pub mod hydrate;
pub mod list;
pub mod path;
pub mod registry;
pub mod settings;
pub mod style;
pub mod value;

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub use block::{BlockError, BlockType, ContentBlock};
pub use value::{PropMap, PropValue};

/// Unique identifier for a block
///
/// Stored as a plain string so ids assigned by the backing store survive a
/// round trip untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub String);

impl BlockId {
    /// Generate a new random block ID
    pub fn new() -> Self {
        BlockId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        BlockId(id.to_string())
    }
}

/// Fresh id for a list item
pub fn new_item_id() -> String {
    Uuid::new_v4().simple().to_string()
}
