//! Studio Blocks - content model for the brand studio page builder
//!
//! This crate provides the block content model behind the page editor: the
//! closed set of block types with their schemas and defaults, the block
//! registry, and the pure edit protocol (path updates, list-item CRUD,
//! hydration, style merging) that keeps settings editors and previews in sync.

pub mod blocks;
pub mod config;
pub mod core;
pub mod page;
pub mod render;
mod tests;

#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

// Re-export commonly used types
pub use blocks::{BlockCategory, BlockProps};
pub use config::{Palette, StudioConfig};
pub use core::editor::BlockEdit;
pub use core::path::PropPath;
pub use core::registry::{BlockRegistry, RegistryError};
pub use core::{BlockId, BlockType, ContentBlock, PropValue};
pub use page::Page;
pub use render::{BlockRenderer, RenderInput};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
