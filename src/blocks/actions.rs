//! Call-to-action blocks: buttons, social links and forms

use serde::{Deserialize, Serialize};

use super::{encode, justify, num_prop, str_prop, Align, BlockSchema, ListSpec, ALIGN_OPTIONS};
use crate::core::settings::{FieldConstraints, ListEditor, SettingsForm};
use crate::core::style::{px, style, StyleMap};
use crate::core::{new_item_id, BlockType, PropValue};

// ---------------------------------------------------------------------------
// Buttons
// ---------------------------------------------------------------------------

/// Row or column of link buttons
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonsProps {
    pub buttons: Option<Vec<ButtonItem>>,
    pub layout: Option<ButtonsLayout>,
    pub align: Option<Align>,
    pub gap: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonItem {
    pub id: String,
    pub text: Option<String>,
    pub url: Option<String>,
    pub variant: Option<ButtonVariant>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ButtonVariant {
    Filled,
    Outline,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ButtonsLayout {
    Horizontal,
    Vertical,
}

impl ButtonItem {
    pub fn new() -> Self {
        Self {
            id: new_item_id(),
            text: Some("Scan Me".into()),
            url: Some(String::new()),
            variant: Some(ButtonVariant::Filled),
            background_color: Some("#111111".into()),
            text_color: Some("#ffffff".into()),
        }
    }
}

impl ButtonsProps {
    pub fn defaults() -> Self {
        Self {
            buttons: Some(vec![ButtonItem::new()]),
            layout: Some(ButtonsLayout::Horizontal),
            align: Some(Align::Center),
            gap: Some(8.0),
        }
    }
}

fn buttons_defaults() -> Result<PropValue, serde_json::Error> {
    encode(&ButtonsProps::defaults())
}

fn new_button() -> Result<PropValue, serde_json::Error> {
    encode(&ButtonItem::new())
}

fn buttons_settings() -> SettingsForm {
    SettingsForm::new()
        .select("layout", "Layout", &["horizontal", "vertical"])
        .select("align", "Alignment", ALIGN_OPTIONS)
        .slider("gap", "Spacing", FieldConstraints::range(0.0, 48.0).with_step(4.0).with_unit("px"))
        .list(
            ListEditor::new(
                "buttons",
                "Buttons",
                SettingsForm::new()
                    .input("text", "Label")
                    .url("url", "Link")
                    .select("variant", "Style", &["filled", "outline", "text"])
                    .color("backgroundColor", "Background")
                    .color("textColor", "Text color"),
            )
            .titled("text")
            .reorderable(),
        )
}

fn buttons_layout(props: &PropValue) -> StyleMap {
    let vertical = str_prop(props, "layout") == Some("vertical");
    let align = justify(str_prop(props, "align"));
    let mut styles = style([
        ("display", "flex"),
        ("flexDirection", if vertical { "column" } else { "row" }),
        // a column aligns its items across, a row distributes them along
        (if vertical { "alignItems" } else { "justifyContent" }, align),
    ]);
    if let Some(gap) = num_prop(props, "gap") {
        styles.insert("gap".into(), px(gap));
    }
    styles
}

pub static BUTTONS: BlockSchema = BlockSchema {
    block_type: BlockType::Buttons,
    defaults: buttons_defaults,
    lists: &[ListSpec {
        path: &["buttons"],
        ordinal: None,
        new_item: new_button,
    }],
    settings: buttons_settings,
    layout: buttons_layout,
};

// ---------------------------------------------------------------------------
// Social links
// ---------------------------------------------------------------------------

/// Row of social network icons
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinksProps {
    pub links: Option<Vec<SocialLink>>,
    pub icon_size: Option<f64>,
    pub icon_color: Option<String>,
    pub align: Option<Align>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    pub id: String,
    pub platform: Option<SocialPlatform>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SocialPlatform {
    Facebook,
    Instagram,
    X,
    Tiktok,
    Youtube,
    Linkedin,
    Website,
}

const PLATFORM_OPTIONS: &[&str] = &[
    "facebook",
    "instagram",
    "x",
    "tiktok",
    "youtube",
    "linkedin",
    "website",
];

impl SocialLink {
    pub fn new(platform: SocialPlatform) -> Self {
        Self {
            id: new_item_id(),
            platform: Some(platform),
            url: Some(String::new()),
        }
    }
}

impl SocialLinksProps {
    pub fn defaults() -> Self {
        Self {
            links: Some(vec![
                SocialLink::new(SocialPlatform::Instagram),
                SocialLink::new(SocialPlatform::Facebook),
            ]),
            icon_size: Some(32.0),
            icon_color: Some("#111111".into()),
            align: Some(Align::Center),
        }
    }
}

fn social_links_defaults() -> Result<PropValue, serde_json::Error> {
    encode(&SocialLinksProps::defaults())
}

fn new_social_link() -> Result<PropValue, serde_json::Error> {
    encode(&SocialLink::new(SocialPlatform::Website))
}

fn social_links_settings() -> SettingsForm {
    SettingsForm::new()
        .slider("iconSize", "Icon size", FieldConstraints::range(16.0, 64.0).with_step(4.0).with_unit("px"))
        .color("iconColor", "Icon color")
        .select("align", "Alignment", ALIGN_OPTIONS)
        .list(
            ListEditor::new(
                "links",
                "Links",
                SettingsForm::new()
                    .select("platform", "Platform", PLATFORM_OPTIONS)
                    .url("url", "Profile URL"),
            )
            .titled("platform")
            .reorderable(),
        )
}

fn social_links_layout(props: &PropValue) -> StyleMap {
    style([
        ("display", "flex"),
        ("justifyContent", justify(str_prop(props, "align"))),
        ("gap", "12px"),
    ])
}

pub static SOCIAL_LINKS: BlockSchema = BlockSchema {
    block_type: BlockType::SocialLinks,
    defaults: social_links_defaults,
    lists: &[ListSpec {
        path: &["links"],
        ordinal: None,
        new_item: new_social_link,
    }],
    settings: social_links_settings,
    layout: social_links_layout,
};

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

/// Lead-capture form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormProps {
    pub title: Option<String>,
    pub submit_label: Option<String>,
    pub success_message: Option<String>,
    pub fields: Option<Vec<FormField>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub id: String,
    pub label: Option<String>,
    pub field_type: Option<FormFieldType>,
    pub placeholder: Option<String>,
    pub required: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormFieldType {
    Text,
    Email,
    Phone,
    Textarea,
    Checkbox,
}

impl FormField {
    pub fn new(label: &str, field_type: FormFieldType, required: bool) -> Self {
        Self {
            id: new_item_id(),
            label: Some(label.into()),
            field_type: Some(field_type),
            placeholder: Some(String::new()),
            required: Some(required),
        }
    }
}

impl FormProps {
    pub fn defaults() -> Self {
        Self {
            title: Some("Stay in touch".into()),
            submit_label: Some("Submit".into()),
            success_message: Some("Thanks! We'll be in touch.".into()),
            fields: Some(vec![
                FormField::new("Name", FormFieldType::Text, true),
                FormField::new("Email", FormFieldType::Email, true),
            ]),
        }
    }
}

fn form_defaults() -> Result<PropValue, serde_json::Error> {
    encode(&FormProps::defaults())
}

fn new_form_field() -> Result<PropValue, serde_json::Error> {
    encode(&FormField::new("New field", FormFieldType::Text, false))
}

fn form_settings() -> SettingsForm {
    SettingsForm::new()
        .input("title", "Title")
        .input("submitLabel", "Submit button")
        .input("successMessage", "Success message")
        .list(
            ListEditor::new(
                "fields",
                "Fields",
                SettingsForm::new()
                    .input("label", "Label")
                    .select("fieldType", "Type", &["text", "email", "phone", "textarea", "checkbox"])
                    .input("placeholder", "Placeholder")
                    .checkbox("required", "Required"),
            )
            .titled("label")
            .reorderable(),
        )
}

fn form_layout(_props: &PropValue) -> StyleMap {
    style([("display", "flex"), ("flexDirection", "column"), ("gap", "8px")])
}

pub static FORM: BlockSchema = BlockSchema {
    block_type: BlockType::Form,
    defaults: form_defaults,
    lists: &[ListSpec {
        path: &["fields"],
        ordinal: None,
        new_item: new_form_field,
    }],
    settings: form_settings,
    layout: form_layout,
};
