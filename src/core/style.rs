//! Style overrides and the style merger

use std::collections::BTreeMap;

use super::value::PropValue;

/// CSS-like property map (`camelCase` property names)
pub type StyleMap = BTreeMap<String, PropValue>;

/// Rightmost-wins shallow merge of style layers
///
/// # Example
/// ```
/// use studio_blocks::core::style::{merge_styles, StyleMap};
/// use studio_blocks::core::value::PropValue;
///
/// let mut layout = StyleMap::new();
/// layout.insert("flexDirection".into(), "row".into());
/// layout.insert("gap".into(), "8px".into());
///
/// let mut overrides = StyleMap::new();
/// overrides.insert("gap".into(), "24px".into());
///
/// let merged = merge_styles([&layout, &overrides]);
/// assert_eq!(merged["flexDirection"], PropValue::from("row"));
/// assert_eq!(merged["gap"], PropValue::from("24px"));
/// ```
pub fn merge_styles<'a, I>(layers: I) -> StyleMap
where
    I: IntoIterator<Item = &'a StyleMap>,
{
    let mut merged = StyleMap::new();
    for layer in layers {
        for (key, value) in layer {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// Pixel length, e.g. `16px`
pub fn px(value: f64) -> PropValue {
    PropValue::String(format!("{value}px"))
}

/// Build a style map from `(property, value)` pairs
pub fn style<I, K, V>(entries: I) -> StyleMap
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<PropValue>,
{
    entries
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_px_formats_whole_numbers() {
        assert_eq!(px(16.0), PropValue::from("16px"));
        assert_eq!(px(1.5), PropValue::from("1.5px"));
    }

    #[test]
    fn test_merge_order() {
        let base = style([("color", "red"), ("margin", "0")]);
        let over = style([("color", "blue")]);

        let merged = merge_styles([&base, &over]);
        assert_eq!(merged.get("color"), Some(&PropValue::from("blue")));
        assert_eq!(merged.get("margin"), Some(&PropValue::from("0")));

        let reversed = merge_styles([&over, &base]);
        assert_eq!(reversed.get("color"), Some(&PropValue::from("red")));
    }
}
