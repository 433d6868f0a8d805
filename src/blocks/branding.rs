//! Header, heading and body text blocks

use serde::{Deserialize, Serialize};

use super::{encode, num_prop, str_prop, Align, BlockSchema, ALIGN_OPTIONS};
use crate::core::settings::{FieldConstraints, SettingsForm};
use crate::core::style::{px, style, StyleMap};
use crate::core::{BlockType, PropValue};

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// Brand header: logo plus a line of text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderProps {
    pub logo: Option<HeaderLogo>,
    pub text: Option<HeaderText>,
    pub layout: Option<HeaderLayout>,
    pub background_color: Option<String>,
    pub padding: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderLogo {
    pub src: Option<String>,
    pub alt: Option<String>,
    pub width: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderText {
    pub content: Option<String>,
    pub font_size: Option<f64>,
    pub color: Option<String>,
}

/// Where the logo sits relative to the text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HeaderLayout {
    LogoLeft,
    LogoRight,
    LogoTop,
}

impl HeaderProps {
    pub fn defaults() -> Self {
        Self {
            logo: Some(HeaderLogo {
                src: Some(String::new()),
                alt: Some("Brand logo".into()),
                width: Some(120.0),
            }),
            text: Some(HeaderText {
                content: Some("Welcome to our brand".into()),
                font_size: Some(24.0),
                color: Some("#111111".into()),
            }),
            layout: Some(HeaderLayout::LogoLeft),
            background_color: Some("#ffffff".into()),
            padding: Some(16.0),
        }
    }
}

fn header_defaults() -> Result<PropValue, serde_json::Error> {
    encode(&HeaderProps::defaults())
}

fn header_settings() -> SettingsForm {
    SettingsForm::new()
        .image("logo.src", "Logo")
        .input("logo.alt", "Logo alt text")
        .slider("logo.width", "Logo width", FieldConstraints::range(24.0, 480.0).with_unit("px"))
        .input("text.content", "Text")
        .number("text.fontSize", "Font size", FieldConstraints::range(8.0, 96.0).with_unit("px"))
        .color("text.color", "Text color")
        .select("layout", "Layout", &["logoLeft", "logoRight", "logoTop"])
        .color("backgroundColor", "Background")
        .slider("padding", "Padding", FieldConstraints::range(0.0, 96.0).with_step(4.0).with_unit("px"))
}

fn header_layout(props: &PropValue) -> StyleMap {
    let direction = match str_prop(props, "layout") {
        Some("logoRight") => "row-reverse",
        Some("logoTop") => "column",
        _ => "row",
    };
    let mut styles = style([
        ("display", "flex"),
        ("flexDirection", direction),
        ("alignItems", "center"),
        ("gap", "12px"),
    ]);
    if let Some(color) = str_prop(props, "backgroundColor") {
        styles.insert("backgroundColor".into(), color.into());
    }
    if let Some(padding) = num_prop(props, "padding") {
        styles.insert("padding".into(), px(padding));
    }
    styles
}

pub static HEADER: BlockSchema = BlockSchema {
    block_type: BlockType::Header,
    defaults: header_defaults,
    lists: &[],
    settings: header_settings,
    layout: header_layout,
};

// ---------------------------------------------------------------------------
// Heading & Text
// ---------------------------------------------------------------------------

/// Heading with a paragraph underneath
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingTextProps {
    pub heading: Option<String>,
    pub text: Option<String>,
    /// Heading level, 1 to 4
    pub level: Option<u8>,
    pub align: Option<Align>,
    pub color: Option<String>,
}

impl HeadingTextProps {
    pub fn defaults() -> Self {
        Self {
            heading: Some("Our story".into()),
            text: Some("Tell your customers what makes your brand special.".into()),
            level: Some(2),
            align: Some(Align::Left),
            color: Some("#111111".into()),
        }
    }
}

fn heading_text_defaults() -> Result<PropValue, serde_json::Error> {
    encode(&HeadingTextProps::defaults())
}

fn heading_text_settings() -> SettingsForm {
    SettingsForm::new()
        .input("heading", "Heading")
        .textarea("text", "Text")
        .number("level", "Heading level", FieldConstraints::range(1.0, 4.0).with_step(1.0))
        .select("align", "Alignment", ALIGN_OPTIONS)
        .color("color", "Color")
}

fn heading_text_layout(props: &PropValue) -> StyleMap {
    text_layout(props)
}

pub static HEADING_TEXT: BlockSchema = BlockSchema {
    block_type: BlockType::HeadingText,
    defaults: heading_text_defaults,
    lists: &[],
    settings: heading_text_settings,
    layout: heading_text_layout,
};

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

/// Free-form paragraph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProps {
    pub content: Option<String>,
    pub align: Option<Align>,
    pub font_size: Option<f64>,
    pub color: Option<String>,
}

impl TextProps {
    pub fn defaults() -> Self {
        Self {
            content: Some("Add your text here.".into()),
            align: Some(Align::Left),
            font_size: Some(16.0),
            color: Some("#333333".into()),
        }
    }
}

fn text_defaults() -> Result<PropValue, serde_json::Error> {
    encode(&TextProps::defaults())
}

fn text_settings() -> SettingsForm {
    SettingsForm::new()
        .textarea("content", "Text")
        .select("align", "Alignment", ALIGN_OPTIONS)
        .number("fontSize", "Font size", FieldConstraints::range(8.0, 72.0).with_unit("px"))
        .color("color", "Color")
}

fn text_layout(props: &PropValue) -> StyleMap {
    let mut styles = StyleMap::new();
    if let Some(align) = str_prop(props, "align") {
        styles.insert("textAlign".into(), align.into());
    }
    if let Some(color) = str_prop(props, "color") {
        styles.insert("color".into(), color.into());
    }
    if let Some(size) = num_prop(props, "fontSize") {
        styles.insert("fontSize".into(), px(size));
    }
    styles
}

pub static TEXT: BlockSchema = BlockSchema {
    block_type: BlockType::Text,
    defaults: text_defaults,
    lists: &[],
    settings: text_settings,
    layout: text_layout,
};
