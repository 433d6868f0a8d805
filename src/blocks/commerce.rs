//! Product listing block
//!
//! Products are the one block with lists nested inside list items: every
//! product carries its own buy options, specifications and licenses. Their
//! list paths go through the product id (`products.<id>.buyOptions`).

use serde::{Deserialize, Serialize};

use super::{encode, str_prop, BlockSchema, ListSpec};
use crate::core::settings::{ListEditor, SettingsForm};
use crate::core::style::{style, StyleMap};
use crate::core::{new_item_id, BlockType, PropValue};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsProps {
    pub title: Option<String>,
    pub layout: Option<ProductsLayout>,
    pub products: Option<Vec<ProductItem>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProductsLayout {
    List,
    Grid,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductItem {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: Option<String>,
    pub currency: Option<String>,
    pub buy_options: Option<Vec<BuyOption>>,
    pub specifications: Option<Vec<Specification>>,
    pub licenses: Option<Vec<License>>,
}

/// Where the product can be bought
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyOption {
    pub id: String,
    pub label: Option<String>,
    pub url: Option<String>,
    pub price: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Specification {
    pub id: String,
    pub name: Option<String>,
    pub value: Option<String>,
}

/// Certification or license shown with the product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct License {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
}

impl ProductItem {
    /// Blank product with empty nested lists
    pub fn new() -> Self {
        Self {
            id: new_item_id(),
            name: Some("New product".into()),
            description: Some(String::new()),
            image: Some(String::new()),
            price: Some(String::new()),
            currency: Some("USD".into()),
            buy_options: Some(Vec::new()),
            specifications: Some(Vec::new()),
            licenses: Some(Vec::new()),
        }
    }
}

impl BuyOption {
    pub fn new() -> Self {
        Self {
            id: new_item_id(),
            label: Some("Buy now".into()),
            url: Some(String::new()),
            price: Some(String::new()),
        }
    }
}

impl Specification {
    pub fn new() -> Self {
        Self {
            id: new_item_id(),
            name: Some("Attribute".into()),
            value: Some(String::new()),
        }
    }
}

impl License {
    pub fn new() -> Self {
        Self {
            id: new_item_id(),
            name: Some("License".into()),
            description: Some(String::new()),
            url: Some(String::new()),
        }
    }
}

impl ProductsProps {
    pub fn defaults() -> Self {
        let product = ProductItem {
            name: Some("Signature product".into()),
            description: Some("Describe what makes this product great.".into()),
            price: Some("19.99".into()),
            buy_options: Some(vec![BuyOption {
                label: Some("Buy online".into()),
                ..BuyOption::new()
            }]),
            specifications: Some(vec![Specification {
                name: Some("Weight".into()),
                value: Some("250 g".into()),
                ..Specification::new()
            }]),
            licenses: Some(vec![License {
                name: Some("Organic".into()),
                ..License::new()
            }]),
            ..ProductItem::new()
        };
        Self {
            title: Some("Our products".into()),
            layout: Some(ProductsLayout::Grid),
            products: Some(vec![product]),
        }
    }
}

fn products_defaults() -> Result<PropValue, serde_json::Error> {
    encode(&ProductsProps::defaults())
}

fn new_product() -> Result<PropValue, serde_json::Error> {
    encode(&ProductItem::new())
}

fn new_buy_option() -> Result<PropValue, serde_json::Error> {
    encode(&BuyOption::new())
}

fn new_specification() -> Result<PropValue, serde_json::Error> {
    encode(&Specification::new())
}

fn new_license() -> Result<PropValue, serde_json::Error> {
    encode(&License::new())
}

fn products_settings() -> SettingsForm {
    let product = SettingsForm::new()
        .input("name", "Name")
        .textarea("description", "Description")
        .image("image", "Image")
        .input("price", "Price")
        .input("currency", "Currency")
        .list(
            ListEditor::new(
                "buyOptions",
                "Where to buy",
                SettingsForm::new()
                    .input("label", "Label")
                    .url("url", "Link")
                    .input("price", "Price"),
            )
            .titled("label")
            .reorderable(),
        )
        .list(
            ListEditor::new(
                "specifications",
                "Specifications",
                SettingsForm::new().input("name", "Name").input("value", "Value"),
            )
            .titled("name")
            .reorderable(),
        )
        .list(
            ListEditor::new(
                "licenses",
                "Licenses",
                SettingsForm::new()
                    .input("name", "Name")
                    .textarea("description", "Description")
                    .url("url", "Link"),
            )
            .titled("name"),
        );

    SettingsForm::new()
        .input("title", "Title")
        .select("layout", "Layout", &["list", "grid"])
        .list(ListEditor::new("products", "Products", product).titled("name").reorderable())
}

fn products_layout(props: &PropValue) -> StyleMap {
    match str_prop(props, "layout") {
        Some("list") => style([("display", "flex"), ("flexDirection", "column"), ("gap", "16px")]),
        _ => style([
            ("display", "grid"),
            ("gridTemplateColumns", "repeat(2, 1fr)"),
            ("gap", "16px"),
        ]),
    }
}

pub static PRODUCTS: BlockSchema = BlockSchema {
    block_type: BlockType::Products,
    defaults: products_defaults,
    lists: &[
        ListSpec {
            path: &["products"],
            ordinal: None,
            new_item: new_product,
        },
        ListSpec {
            path: &["products", "*", "buyOptions"],
            ordinal: None,
            new_item: new_buy_option,
        },
        ListSpec {
            path: &["products", "*", "specifications"],
            ordinal: None,
            new_item: new_specification,
        },
        ListSpec {
            path: &["products", "*", "licenses"],
            ordinal: None,
            new_item: new_license,
        },
    ],
    settings: products_settings,
    layout: products_layout,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_product_has_empty_nested_lists() {
        let product = new_product().unwrap();
        for key in ["buyOptions", "specifications", "licenses"] {
            assert_eq!(product.get(key).and_then(PropValue::as_list).map(<[_]>::len), Some(0));
        }
    }

    #[test]
    fn test_default_nested_items_have_distinct_ids() {
        let props = ProductsProps::defaults();
        let product = &props.products.unwrap()[0];
        let ids = [
            product.id.as_str(),
            product.buy_options.as_ref().unwrap()[0].id.as_str(),
            product.specifications.as_ref().unwrap()[0].id.as_str(),
            product.licenses.as_ref().unwrap()[0].id.as_str(),
        ];
        let unique: std::collections::BTreeSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), 4);
    }

    #[test]
    fn test_products_layout() {
        let list = products_layout(&PropValue::object([("layout", PropValue::from("list"))]));
        assert_eq!(list.get("flexDirection"), Some(&PropValue::from("column")));

        let grid = products_layout(&encode(&ProductsProps::defaults()).unwrap());
        assert_eq!(grid.get("gridTemplateColumns"), Some(&PropValue::from("repeat(2, 1fr)")));
    }
}
