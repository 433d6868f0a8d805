//! Block schemas and categories
//!
//! Every block type has a typed props struct (the closed schema), a defaults
//! factory, the list fields it carries, a settings form, and the layout styling
//! intrinsic to its renderer. The typed structs serialize to the camelCase JSON
//! shape stored in `ContentBlock::props`.

pub mod actions;
pub mod branding;
pub mod commerce;
pub mod contact;
pub mod food;
pub mod layout;
pub mod media;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::settings::SettingsForm;
use crate::core::style::StyleMap;
use crate::core::{BlockError, BlockType, PropValue};

pub use actions::{ButtonsProps, FormProps, SocialLinksProps};
pub use branding::{HeaderProps, HeadingTextProps, TextProps};
pub use commerce::ProductsProps;
pub use contact::{AddressProps, ContactUsProps, MapProps};
pub use food::{IngredientsProps, NutritionTableProps, RecipesProps};
pub use layout::{DividerProps, SpacerProps};
pub use media::{GalleryProps, ImageProps, ImageTextProps, ImagesLinkProps, VideoProps};

/// Palette grouping of block types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockCategory {
    /// Brand identity and copy (header, headings, text)
    Branding,
    /// Images and video
    Media,
    /// Calls to action (buttons, social links, forms)
    Actions,
    /// Where to find the brand
    Contact,
    /// Product listings
    Commerce,
    /// Recipes, ingredients, nutrition facts
    Food,
    /// Spacing and separators
    Layout,
}

impl BlockCategory {
    /// Get a human-readable name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            BlockCategory::Branding => "Branding",
            BlockCategory::Media => "Media",
            BlockCategory::Actions => "Actions",
            BlockCategory::Contact => "Contact",
            BlockCategory::Commerce => "Commerce",
            BlockCategory::Food => "Food",
            BlockCategory::Layout => "Layout",
        }
    }
}

impl fmt::Display for BlockCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl BlockType {
    /// Palette category of the block type
    pub fn category(&self) -> BlockCategory {
        match self {
            BlockType::Header | BlockType::HeadingText | BlockType::Text => BlockCategory::Branding,
            BlockType::Image
            | BlockType::ImageText
            | BlockType::ImagesLink
            | BlockType::Gallery
            | BlockType::Video => BlockCategory::Media,
            BlockType::Buttons | BlockType::SocialLinks | BlockType::Form => BlockCategory::Actions,
            BlockType::Address | BlockType::ContactUs | BlockType::Map => BlockCategory::Contact,
            BlockType::Products => BlockCategory::Commerce,
            BlockType::Recipes | BlockType::Ingredients | BlockType::NutritionTable => BlockCategory::Food,
            BlockType::Divider | BlockType::Spacer => BlockCategory::Layout,
        }
    }
}

/// Horizontal alignment shared by several blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Align {
    Left,
    Center,
    Right,
}

pub(crate) const ALIGN_OPTIONS: &[&str] = &["left", "center", "right"];

/// Declaration of a list of identity-bearing items inside a block's props
#[derive(Debug)]
pub struct ListSpec {
    /// Schema path of the list; `*` stands for an item of an enclosing list
    pub path: &'static [&'static str],
    /// Derived 1-based position field, renumbered on structural changes
    pub ordinal: Option<&'static str>,
    /// Factory for a new item with a fresh id
    pub new_item: fn() -> Result<PropValue, serde_json::Error>,
}

impl ListSpec {
    /// Whether a concrete path (item ids in place of `*`) addresses this list
    pub fn matches<S: AsRef<str>>(&self, path: &[S]) -> bool {
        self.path.len() == path.len()
            && self
                .path
                .iter()
                .zip(path)
                .all(|(pattern, segment)| *pattern == "*" || *pattern == segment.as_ref())
    }
}

/// Everything the core knows about one block type
pub struct BlockSchema {
    pub block_type: BlockType,
    /// Fully populated default props
    pub defaults: fn() -> Result<PropValue, serde_json::Error>,
    pub lists: &'static [ListSpec],
    pub settings: fn() -> SettingsForm,
    /// Layout styling implied by the props (flex direction, grid columns, ...)
    pub layout: fn(&PropValue) -> StyleMap,
}

impl BlockSchema {
    /// List declaration addressed by a concrete or schema path
    pub fn list_spec<S: AsRef<str>>(&self, path: &[S]) -> Option<&'static ListSpec> {
        self.lists.iter().find(|spec| spec.matches(path))
    }
}

impl fmt::Debug for BlockSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockSchema")
            .field("block_type", &self.block_type)
            .field("lists", &self.lists)
            .finish_non_exhaustive()
    }
}

/// Schema of a block type
pub fn schema(block_type: BlockType) -> &'static BlockSchema {
    match block_type {
        BlockType::Header => &branding::HEADER,
        BlockType::HeadingText => &branding::HEADING_TEXT,
        BlockType::Text => &branding::TEXT,
        BlockType::Image => &media::IMAGE,
        BlockType::ImageText => &media::IMAGE_TEXT,
        BlockType::ImagesLink => &media::IMAGES_LINK,
        BlockType::Gallery => &media::GALLERY,
        BlockType::Video => &media::VIDEO,
        BlockType::Buttons => &actions::BUTTONS,
        BlockType::SocialLinks => &actions::SOCIAL_LINKS,
        BlockType::Form => &actions::FORM,
        BlockType::Address => &contact::ADDRESS,
        BlockType::ContactUs => &contact::CONTACT_US,
        BlockType::Map => &contact::MAP,
        BlockType::Products => &commerce::PRODUCTS,
        BlockType::Recipes => &food::RECIPES,
        BlockType::Ingredients => &food::INGREDIENTS,
        BlockType::NutritionTable => &food::NUTRITION_TABLE,
        BlockType::Divider => &layout::DIVIDER,
        BlockType::Spacer => &layout::SPACER,
    }
}

/// Fully populated default props for a new block of `block_type`.
///
/// Example list items get freshly generated ids on every call.
pub fn default_props(block_type: BlockType) -> Result<PropValue, serde_json::Error> {
    (schema(block_type).defaults)()
}

/// Typed props, one variant per block type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "props")]
pub enum BlockProps {
    Header(HeaderProps),
    HeadingText(HeadingTextProps),
    Text(TextProps),
    Image(ImageProps),
    ImageText(ImageTextProps),
    ImagesLink(ImagesLinkProps),
    Gallery(GalleryProps),
    Video(VideoProps),
    Buttons(ButtonsProps),
    SocialLinks(SocialLinksProps),
    Form(FormProps),
    Address(AddressProps),
    ContactUs(ContactUsProps),
    Map(MapProps),
    Products(ProductsProps),
    Recipes(RecipesProps),
    Ingredients(IngredientsProps),
    NutritionTable(NutritionTableProps),
    Divider(DividerProps),
    Spacer(SpacerProps),
}

impl BlockProps {
    /// Decode a props tree as the schema of `block_type`
    pub fn decode(block_type: BlockType, props: &PropValue) -> Result<Self, BlockError> {
        let tagged = serde_json::json!({
            "type": block_type.as_str(),
            "props": props.to_json(),
        });
        serde_json::from_value(tagged).map_err(|source| BlockError::SchemaMismatch { block_type, source })
    }

    /// Tag of the variant
    pub fn block_type(&self) -> BlockType {
        match self {
            BlockProps::Header(_) => BlockType::Header,
            BlockProps::HeadingText(_) => BlockType::HeadingText,
            BlockProps::Text(_) => BlockType::Text,
            BlockProps::Image(_) => BlockType::Image,
            BlockProps::ImageText(_) => BlockType::ImageText,
            BlockProps::ImagesLink(_) => BlockType::ImagesLink,
            BlockProps::Gallery(_) => BlockType::Gallery,
            BlockProps::Video(_) => BlockType::Video,
            BlockProps::Buttons(_) => BlockType::Buttons,
            BlockProps::SocialLinks(_) => BlockType::SocialLinks,
            BlockProps::Form(_) => BlockType::Form,
            BlockProps::Address(_) => BlockType::Address,
            BlockProps::ContactUs(_) => BlockType::ContactUs,
            BlockProps::Map(_) => BlockType::Map,
            BlockProps::Products(_) => BlockType::Products,
            BlockProps::Recipes(_) => BlockType::Recipes,
            BlockProps::Ingredients(_) => BlockType::Ingredients,
            BlockProps::NutritionTable(_) => BlockType::NutritionTable,
            BlockProps::Divider(_) => BlockType::Divider,
            BlockProps::Spacer(_) => BlockType::Spacer,
        }
    }
}

pub(crate) fn encode<T: Serialize>(value: &T) -> Result<PropValue, serde_json::Error> {
    PropValue::from_serializable(value)
}

pub(crate) fn str_prop<'a>(props: &'a PropValue, key: &str) -> Option<&'a str> {
    props.get(key).and_then(PropValue::as_str)
}

pub(crate) fn num_prop(props: &PropValue, key: &str) -> Option<f64> {
    props.get(key).and_then(PropValue::as_number)
}

/// `justifyContent` value for an alignment keyword
pub(crate) fn justify(align: Option<&str>) -> &'static str {
    match align {
        Some("center") => "center",
        Some("right") => "flex-end",
        _ => "flex-start",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_spec_wildcard_match() {
        let spec = &commerce::PRODUCTS.lists[1];
        assert_eq!(spec.path, &["products", "*", "buyOptions"]);
        assert!(spec.matches(&["products", "p-1", "buyOptions"]));
        assert!(spec.matches(&["products", "*", "buyOptions"]));
        assert!(!spec.matches(&["products", "p-1"]));
        assert!(!spec.matches(&["products", "p-1", "licenses"]));
    }

    #[test]
    fn test_schema_table_is_consistent() {
        for block_type in BlockType::ALL {
            assert_eq!(schema(block_type).block_type, block_type);
        }
    }

    #[test]
    fn test_decode_rejects_wrong_shape() {
        let props = PropValue::from(serde_json::json!({ "height": "tall" }));
        let err = BlockProps::decode(BlockType::Spacer, &props).unwrap_err();
        assert!(matches!(err, BlockError::SchemaMismatch { block_type: BlockType::Spacer, .. }));
    }

    #[test]
    fn test_justify() {
        assert_eq!(justify(Some("center")), "center");
        assert_eq!(justify(Some("right")), "flex-end");
        assert_eq!(justify(None), "flex-start");
    }
}
