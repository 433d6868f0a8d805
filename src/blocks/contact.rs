//! Address, contact details and map blocks

use serde::{Deserialize, Serialize};

use super::{encode, num_prop, BlockSchema};
use crate::core::settings::{FieldConstraints, SettingsForm};
use crate::core::style::{px, style, StyleMap};
use crate::core::{BlockType, PropValue};

/// Postal address card
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressProps {
    pub title: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    /// Render a "open in maps" link under the address
    pub show_map_link: Option<bool>,
}

impl AddressProps {
    pub fn defaults() -> Self {
        Self {
            title: Some("Visit us".into()),
            street: Some(String::new()),
            city: Some(String::new()),
            region: Some(String::new()),
            postal_code: Some(String::new()),
            country: Some(String::new()),
            show_map_link: Some(true),
        }
    }
}

fn address_defaults() -> Result<PropValue, serde_json::Error> {
    encode(&AddressProps::defaults())
}

fn address_settings() -> SettingsForm {
    SettingsForm::new()
        .input("title", "Title")
        .input("street", "Street")
        .input("city", "City")
        .input("region", "State / region")
        .input("postalCode", "Postal code")
        .input("country", "Country")
        .checkbox("showMapLink", "Show map link")
}

fn card_layout(_props: &PropValue) -> StyleMap {
    style([("display", "flex"), ("flexDirection", "column"), ("gap", "4px")])
}

pub static ADDRESS: BlockSchema = BlockSchema {
    block_type: BlockType::Address,
    defaults: address_defaults,
    lists: &[],
    settings: address_settings,
    layout: card_layout,
};

/// Contact channels
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactUsProps {
    pub title: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub show_icons: Option<bool>,
}

impl ContactUsProps {
    pub fn defaults() -> Self {
        Self {
            title: Some("Contact us".into()),
            description: Some("We'd love to hear from you.".into()),
            email: Some(String::new()),
            phone: Some(String::new()),
            website: Some(String::new()),
            show_icons: Some(true),
        }
    }
}

fn contact_us_defaults() -> Result<PropValue, serde_json::Error> {
    encode(&ContactUsProps::defaults())
}

fn contact_us_settings() -> SettingsForm {
    SettingsForm::new()
        .input("title", "Title")
        .textarea("description", "Description")
        .input("email", "Email")
        .input("phone", "Phone")
        .url("website", "Website")
        .checkbox("showIcons", "Show icons")
}

pub static CONTACT_US: BlockSchema = BlockSchema {
    block_type: BlockType::ContactUs,
    defaults: contact_us_defaults,
    lists: &[],
    settings: contact_us_settings,
    layout: card_layout,
};

/// Embedded map centered on a location
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapProps {
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub zoom: Option<u32>,
    /// Height in pixels
    pub height: Option<f64>,
}

impl MapProps {
    pub fn defaults() -> Self {
        Self {
            address: Some(String::new()),
            latitude: Some(0.0),
            longitude: Some(0.0),
            zoom: Some(14),
            height: Some(300.0),
        }
    }
}

fn map_defaults() -> Result<PropValue, serde_json::Error> {
    encode(&MapProps::defaults())
}

fn map_settings() -> SettingsForm {
    SettingsForm::new()
        .input("address", "Address")
        .number("latitude", "Latitude", FieldConstraints::range(-90.0, 90.0))
        .number("longitude", "Longitude", FieldConstraints::range(-180.0, 180.0))
        .slider("zoom", "Zoom", FieldConstraints::range(1.0, 20.0).with_step(1.0))
        .slider("height", "Height", FieldConstraints::range(120.0, 800.0).with_step(10.0).with_unit("px"))
}

fn map_layout(props: &PropValue) -> StyleMap {
    let mut styles = style([("width", "100%")]);
    if let Some(height) = num_prop(props, "height") {
        styles.insert("height".into(), px(height));
    }
    styles
}

pub static MAP: BlockSchema = BlockSchema {
    block_type: BlockType::Map,
    defaults: map_defaults,
    lists: &[],
    settings: map_settings,
    layout: map_layout,
};
