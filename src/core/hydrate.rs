//! Default-props hydration
//!
//! Stored props may predate newly added fields or come from a partially formed
//! source. Hydration deep-merges them over the block type's defaults so that
//! every field a renderer reads is defined. Stored values always win; keys the
//! defaults don't know about are kept.

use std::collections::HashSet;

use super::new_item_id;
use super::value::{PropMap, PropValue, ITEM_ID_KEY};

/// Segment standing for "any item of the enclosing list" in a schema path
pub const ANY_ITEM: &str = "*";

/// Merge `stored` over `defaults`.
///
/// `item_template` is asked for the template of every list met on the way,
/// keyed by its schema path (list item positions appear as [`ANY_ITEM`]). Items
/// of a list with a template are hydrated against it and given a fresh `id` if
/// theirs is missing or duplicated.
///
/// Unchanged subtrees are returned by reference, so hydrating an already
/// hydrated value yields the very same value.
pub fn hydrate_with<T>(stored: &PropValue, defaults: &PropValue, item_template: &T) -> PropValue
where
    T: Fn(&[String]) -> Option<PropValue>,
{
    merge(stored, defaults, &mut Vec::new(), item_template)
}

fn merge<T>(stored: &PropValue, default: &PropValue, pattern: &mut Vec<String>, item_template: &T) -> PropValue
where
    T: Fn(&[String]) -> Option<PropValue>,
{
    match (stored, default) {
        (PropValue::Null, _) => default.clone(),
        (PropValue::Object(fields), PropValue::Object(defaults)) => {
            let mut out: Option<PropMap> = None;
            for (key, default_value) in defaults.iter() {
                pattern.push(key.clone());
                let current = fields.get(key);
                let merged = match current {
                    Some(value) => merge(value, default_value, pattern, item_template),
                    None => default_value.clone(),
                };
                pattern.pop();

                if !current.is_some_and(|value| value.same_ref(&merged)) {
                    out.get_or_insert_with(|| PropMap::clone(fields))
                        .insert(key.clone(), merged);
                }
            }
            out.map(PropValue::from).unwrap_or_else(|| stored.clone())
        }
        (PropValue::List(_), PropValue::Object(_)) => {
            tracing::warn!(path = %pattern.join("."), "stored list where an object is expected, using default");
            default.clone()
        }
        (PropValue::List(items), _) => match item_template(pattern) {
            Some(template) => hydrate_items(stored, items, &template, pattern, item_template),
            None => stored.clone(),
        },
        (_, PropValue::Object(_)) | (_, PropValue::List(_)) => {
            tracing::warn!(path = %pattern.join("."), "stored prop has the wrong shape, using default");
            default.clone()
        }
        _ => stored.clone(),
    }
}

fn hydrate_items<T>(
    stored: &PropValue,
    items: &[PropValue],
    template: &PropValue,
    pattern: &mut Vec<String>,
    item_template: &T,
) -> PropValue
where
    T: Fn(&[String]) -> Option<PropValue>,
{
    let template = match template.as_object() {
        Some(map) => {
            let mut map = map.clone();
            map.remove(ITEM_ID_KEY);
            PropValue::from(map)
        }
        None => template.clone(),
    };

    pattern.push(ANY_ITEM.to_string());
    let mut seen = HashSet::new();
    let mut changed = false;
    let next: Vec<PropValue> = items
        .iter()
        .map(|item| {
            let mut merged = merge(item, &template, pattern, item_template);
            let fresh = match merged.item_id() {
                Some(id) if !id.is_empty() => !seen.insert(id.to_string()),
                _ => true,
            };
            if fresh {
                let id = new_item_id();
                tracing::debug!(%id, "list item without a usable id, assigning one");
                seen.insert(id.clone());
                merged = merged.with_key(ITEM_ID_KEY, PropValue::from(id));
            }
            changed |= !merged.same_ref(item);
            merged
        })
        .collect();
    pattern.pop();

    if changed {
        PropValue::from(next)
    } else {
        stored.clone()
    }
}
