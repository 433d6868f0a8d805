//! Divider and spacer blocks

use serde::{Deserialize, Serialize};

use super::{encode, num_prop, str_prop, BlockSchema};
use crate::core::settings::{FieldConstraints, SettingsForm};
use crate::core::style::{px, StyleMap};
use crate::core::{BlockType, PropValue};

/// Horizontal rule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividerProps {
    pub thickness: Option<f64>,
    pub color: Option<String>,
    pub line_style: Option<LineStyle>,
    /// Vertical margin above and below, in pixels
    pub spacing: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

impl DividerProps {
    pub fn defaults() -> Self {
        Self {
            thickness: Some(1.0),
            color: Some("#e5e5e5".into()),
            line_style: Some(LineStyle::Solid),
            spacing: Some(16.0),
        }
    }
}

fn divider_defaults() -> Result<PropValue, serde_json::Error> {
    encode(&DividerProps::defaults())
}

fn divider_settings() -> SettingsForm {
    SettingsForm::new()
        .slider("thickness", "Thickness", FieldConstraints::range(1.0, 12.0).with_step(1.0).with_unit("px"))
        .color("color", "Color")
        .select("lineStyle", "Line style", &["solid", "dashed", "dotted"])
        .slider("spacing", "Spacing", FieldConstraints::range(0.0, 96.0).with_step(4.0).with_unit("px"))
}

fn divider_layout(props: &PropValue) -> StyleMap {
    let thickness = num_prop(props, "thickness").unwrap_or(1.0);
    let line = str_prop(props, "lineStyle").unwrap_or("solid");
    let color = str_prop(props, "color").unwrap_or("currentColor");
    let spacing = num_prop(props, "spacing").unwrap_or(0.0);

    let mut styles = StyleMap::new();
    styles.insert("borderTop".into(), format!("{thickness}px {line} {color}").into());
    styles.insert("margin".into(), format!("{spacing}px 0").into());
    styles
}

pub static DIVIDER: BlockSchema = BlockSchema {
    block_type: BlockType::Divider,
    defaults: divider_defaults,
    lists: &[],
    settings: divider_settings,
    layout: divider_layout,
};

/// Empty vertical space
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacerProps {
    pub height: Option<f64>,
}

impl SpacerProps {
    pub fn defaults() -> Self {
        Self { height: Some(32.0) }
    }
}

fn spacer_defaults() -> Result<PropValue, serde_json::Error> {
    encode(&SpacerProps::defaults())
}

fn spacer_settings() -> SettingsForm {
    SettingsForm::new().slider(
        "height",
        "Height",
        FieldConstraints::range(4.0, 240.0).with_step(4.0).with_unit("px"),
    )
}

fn spacer_layout(props: &PropValue) -> StyleMap {
    let mut styles = StyleMap::new();
    if let Some(height) = num_prop(props, "height") {
        styles.insert("height".into(), px(height));
    }
    styles
}

pub static SPACER: BlockSchema = BlockSchema {
    block_type: BlockType::Spacer,
    defaults: spacer_defaults,
    lists: &[],
    settings: spacer_settings,
    layout: spacer_layout,
};
