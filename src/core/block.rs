//! Content block envelope and the closed set of block types
//!
//! A `ContentBlock` is the persisted unit of page composition. Everything
//! outside the registry treats it as a uniform `{ id, type, props, style }`
//! record; only the registry looks at `type` to pick a schema.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::style::StyleMap;
use super::value::PropValue;
use super::BlockId;

/// Block type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BlockType {
    Header,
    HeadingText,
    Text,
    Image,
    ImageText,
    ImagesLink,
    Gallery,
    Video,
    Buttons,
    SocialLinks,
    Form,
    Address,
    ContactUs,
    Map,
    Products,
    Recipes,
    Ingredients,
    NutritionTable,
    Divider,
    Spacer,
}

impl BlockType {
    /// Every block type, in palette order
    pub const ALL: [BlockType; 20] = [
        BlockType::Header,
        BlockType::HeadingText,
        BlockType::Text,
        BlockType::Image,
        BlockType::ImageText,
        BlockType::ImagesLink,
        BlockType::Gallery,
        BlockType::Video,
        BlockType::Buttons,
        BlockType::SocialLinks,
        BlockType::Form,
        BlockType::Address,
        BlockType::ContactUs,
        BlockType::Map,
        BlockType::Products,
        BlockType::Recipes,
        BlockType::Ingredients,
        BlockType::NutritionTable,
        BlockType::Divider,
        BlockType::Spacer,
    ];

    /// Wire tag, as stored in the `type` field
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Header => "Header",
            BlockType::HeadingText => "HeadingText",
            BlockType::Text => "Text",
            BlockType::Image => "Image",
            BlockType::ImageText => "ImageText",
            BlockType::ImagesLink => "ImagesLink",
            BlockType::Gallery => "Gallery",
            BlockType::Video => "Video",
            BlockType::Buttons => "Buttons",
            BlockType::SocialLinks => "SocialLinks",
            BlockType::Form => "Form",
            BlockType::Address => "Address",
            BlockType::ContactUs => "ContactUs",
            BlockType::Map => "Map",
            BlockType::Products => "Products",
            BlockType::Recipes => "Recipes",
            BlockType::Ingredients => "Ingredients",
            BlockType::NutritionTable => "NutritionTable",
            BlockType::Divider => "Divider",
            BlockType::Spacer => "Spacer",
        }
    }

    /// Human-readable name for the palette
    pub fn display_name(&self) -> &'static str {
        match self {
            BlockType::HeadingText => "Heading & Text",
            BlockType::ImageText => "Image & Text",
            BlockType::ImagesLink => "Linked Images",
            BlockType::SocialLinks => "Social Links",
            BlockType::ContactUs => "Contact Us",
            BlockType::NutritionTable => "Nutrition Table",
            other => other.as_str(),
        }
    }

    /// Position in [`BlockType::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = BlockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| BlockError::UnknownBlockType(s.to_string()))
    }
}

/// The unit of page composition
///
/// `id` and `type` are fixed at construction; `props` and `style` are replaced
/// wholesale through [`ContentBlock::with_props`] / [`ContentBlock::with_style`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    id: BlockId,
    #[serde(rename = "type")]
    block_type: BlockType,
    #[serde(default)]
    props: PropValue,
    #[serde(default)]
    style: StyleMap,
}

impl ContentBlock {
    /// Assemble a block from stored parts
    pub fn from_parts(id: BlockId, block_type: BlockType, props: PropValue, style: StyleMap) -> Self {
        Self {
            id,
            block_type,
            props,
            style,
        }
    }

    pub fn id(&self) -> &BlockId {
        &self.id
    }

    pub fn block_type(&self) -> BlockType {
        self.block_type
    }

    pub fn props(&self) -> &PropValue {
        &self.props
    }

    pub fn style(&self) -> &StyleMap {
        &self.style
    }

    /// Same block with new props
    pub fn with_props(&self, props: PropValue) -> Self {
        Self {
            id: self.id.clone(),
            block_type: self.block_type,
            props,
            style: self.style.clone(),
        }
    }

    /// Same block with new style overrides
    pub fn with_style(&self, style: StyleMap) -> Self {
        Self {
            id: self.id.clone(),
            block_type: self.block_type,
            props: self.props.clone(),
            style,
        }
    }

    /// Same props and style under a different id
    pub(crate) fn with_id(&self, id: BlockId) -> Self {
        Self {
            id,
            block_type: self.block_type,
            props: self.props.clone(),
            style: self.style.clone(),
        }
    }

    /// Decode the props into the typed union for this block's type
    pub fn typed_props(&self) -> Result<crate::blocks::BlockProps, BlockError> {
        crate::blocks::BlockProps::decode(self.block_type, &self.props)
    }
}

/// Block errors
#[derive(Debug, thiserror::Error)]
pub enum BlockError {
    /// Tag not in the closed block type enumeration
    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    /// Props don't match the typed schema
    #[error("Props do not match the {block_type} schema: {source}")]
    SchemaMismatch {
        block_type: BlockType,
        #[source]
        source: serde_json::Error,
    },
}
