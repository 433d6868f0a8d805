//! Renderer seam
//!
//! Visual renderers live outside this crate. The registry hands them hydrated
//! props plus the effective style and never looks at what they produce.

use serde::Serialize;

use crate::core::style::StyleMap;
use crate::core::{BlockType, PropValue};

/// Everything a renderer may read for one block
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RenderInput<'a> {
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub props: &'a PropValue,
    pub style: &'a StyleMap,
}

/// Turns a block into markup
pub trait BlockRenderer: Send + Sync {
    fn render(&self, input: &RenderInput<'_>) -> String;
}

/// Renders the input as pretty-printed JSON.
///
/// Used as the registry fallback so that an editor preview works before real
/// renderers are wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPreviewRenderer;

impl BlockRenderer for JsonPreviewRenderer {
    fn render(&self, input: &RenderInput<'_>) -> String {
        match serde_json::to_string_pretty(input) {
            Ok(json) => json,
            Err(err) => {
                tracing::error!(block_type = %input.block_type, %err, "preview encoding failed");
                String::new()
            }
        }
    }
}
