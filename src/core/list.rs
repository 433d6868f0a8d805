//! List-item CRUD helper
//!
//! Add/update/remove/move operations over lists of identity-bearing items
//! (each item is an object with a string `id`). All operations are pure: they
//! return a new root and reuse every untouched item by reference. Addressing
//! problems (stale ids, boundary moves, a path that is not a list) leave the
//! input unchanged.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

use super::new_item_id;
use super::path::{modify_path, PropPath};
use super::value::{PropValue, ITEM_ID_KEY};

/// Address of a list field plus its optional derived ordinal field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPath {
    pub path: PropPath,
    /// Field holding the 1-based position of each item (e.g. `stepNumber`)
    pub ordinal: Option<String>,
}

impl ListPath {
    pub fn new(path: PropPath) -> Self {
        Self { path, ordinal: None }
    }

    /// Renumber `field` on every item after structural changes
    pub fn with_ordinal(mut self, field: impl Into<String>) -> Self {
        self.ordinal = Some(field.into());
        self
    }
}

impl From<PropPath> for ListPath {
    fn from(path: PropPath) -> Self {
        ListPath::new(path)
    }
}

/// Direction for `move_item`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MoveDirection {
    /// Towards the start of the list
    Up,
    /// Towards the end of the list
    Down,
}

/// Append the item produced by `factory` to the end of the list.
///
/// An item without an `id`, or whose `id` is already taken, is given a fresh
/// one. A missing list is created.
pub fn add_item<F>(props: &PropValue, list: &ListPath, factory: F) -> PropValue
where
    F: FnOnce() -> PropValue,
{
    modify_path(props, &list.path, |current| {
        let mut items = match current {
            None | Some(PropValue::Null) => Vec::new(),
            Some(PropValue::List(items)) => Vec::clone(items),
            Some(_) => {
                tracing::warn!(path = %list.path, "add_item target is not a list");
                return None;
            }
        };

        let taken: HashSet<&str> = items.iter().filter_map(PropValue::item_id).collect();
        let mut item = factory();
        let needs_id = item.item_id().map_or(true, |id| id.is_empty() || taken.contains(id));
        if needs_id {
            tracing::debug!(path = %list.path, "assigning fresh id to new list item");
            item = item.with_key(ITEM_ID_KEY, PropValue::from(new_item_id()));
        }
        drop(taken);

        items.push(item);
        renumber(&mut items, list.ordinal.as_deref());
        Some(PropValue::List(Arc::new(items)))
    })
}

/// Shallow-merge `patch` over the item whose id matches.
///
/// The patch's own `id` key is ignored: identity is write-once.
pub fn update_item(props: &PropValue, list: &ListPath, id: &str, patch: &PropValue) -> PropValue {
    let Some(patch) = patch.as_object() else {
        tracing::warn!(path = %list.path, "update_item patch is not an object");
        return props.clone();
    };

    modify_path(props, &list.path, |current| {
        let items = current?.as_list()?;
        let index = items.iter().position(|item| item.item_id() == Some(id))?;

        let mut merged = items[index].as_object().cloned().unwrap_or_default();
        for (key, value) in patch.iter().filter(|(key, _)| key.as_str() != ITEM_ID_KEY) {
            merged.insert(key.clone(), value.clone());
        }

        let mut next = items.to_vec();
        next[index] = PropValue::from(merged);
        Some(PropValue::List(Arc::new(next)))
    })
}

/// Remove the item whose id matches; remaining items keep their order
pub fn remove_item(props: &PropValue, list: &ListPath, id: &str) -> PropValue {
    modify_path(props, &list.path, |current| {
        let items = current?.as_list()?;
        if !items.iter().any(|item| item.item_id() == Some(id)) {
            return None;
        }

        let mut next: Vec<PropValue> = items
            .iter()
            .filter(|item| item.item_id() != Some(id))
            .cloned()
            .collect();
        renumber(&mut next, list.ordinal.as_deref());
        Some(PropValue::List(Arc::new(next)))
    })
}

/// Swap the item with its neighbour; no-op at the list boundaries
pub fn move_item(props: &PropValue, list: &ListPath, id: &str, direction: MoveDirection) -> PropValue {
    modify_path(props, &list.path, |current| {
        let items = current?.as_list()?;
        let index = items.iter().position(|item| item.item_id() == Some(id))?;
        let target = match direction {
            MoveDirection::Up => index.checked_sub(1)?,
            MoveDirection::Down => Some(index + 1).filter(|i| *i < items.len())?,
        };

        let mut next = items.to_vec();
        next.swap(index, target);
        renumber(&mut next, list.ordinal.as_deref());
        Some(PropValue::List(Arc::new(next)))
    })
}

/// Set `field` to the 1-based index of each item.
///
/// Items that already carry the right number are left as they are.
pub fn renumber(items: &mut [PropValue], field: Option<&str>) {
    let Some(field) = field else {
        return;
    };
    for (index, item) in items.iter_mut().enumerate() {
        let expected = PropValue::Integer(index as i64 + 1);
        if item.get(field) != Some(&expected) {
            *item = item.with_key(field, expected);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn buttons() -> PropValue {
        PropValue::from(json!({
            "layout": "horizontal",
            "buttons": [
                { "id": "b1", "text": "Scan Me" },
                { "id": "b2", "text": "Shop" },
                { "id": "b3", "text": "Call" }
            ]
        }))
    }

    fn list_of(props: &PropValue, key: &str) -> Vec<PropValue> {
        props.get(key).and_then(PropValue::as_list).unwrap_or_default().to_vec()
    }

    fn ids(props: &PropValue, key: &str) -> Vec<String> {
        list_of(props, key)
            .iter()
            .filter_map(|item| item.item_id().map(str::to_string))
            .collect()
    }

    fn buttons_path() -> ListPath {
        ListPath::new(PropPath::key("buttons"))
    }

    #[test]
    fn test_add_appends_and_keeps_existing() {
        let props = buttons();
        let next = add_item(&props, &buttons_path(), || {
            PropValue::from(json!({ "id": "b4", "text": "New" }))
        });

        let before = list_of(&props, "buttons");
        let after = list_of(&next, "buttons");
        assert_eq!(after.len(), 4);
        for (old, new) in before.iter().zip(&after) {
            assert!(old.same_ref(new));
        }
        assert_eq!(after[3].item_id(), Some("b4"));
        assert!(next.get("layout").unwrap().same_ref(props.get("layout").unwrap()));
    }

    #[test]
    fn test_add_repairs_duplicate_id() {
        let next = add_item(&buttons(), &buttons_path(), || {
            PropValue::from(json!({ "id": "b1", "text": "Clash" }))
        });
        let all = ids(&next, "buttons");
        assert_eq!(all.len(), 4);
        assert_ne!(all[3], "b1");
        assert!(!all[3].is_empty());
    }

    #[test]
    fn test_add_creates_missing_list() {
        let props = PropValue::from(json!({ "title": "x" }));
        let next = add_item(&props, &buttons_path(), || PropValue::from(json!({ "text": "A" })));
        assert_eq!(list_of(&next, "buttons").len(), 1);
        assert!(list_of(&next, "buttons")[0].item_id().is_some());
    }

    #[test]
    fn test_add_to_non_list_is_noop() {
        let props = PropValue::from(json!({ "buttons": "oops" }));
        let next = add_item(&props, &buttons_path(), || PropValue::from(json!({ "id": "x" })));
        assert!(next.same_ref(&props));
    }

    #[test]
    fn test_update_merges_patch() {
        let props = buttons();
        let patch = PropValue::from(json!({ "text": "Go", "id": "hijack" }));
        let next = update_item(&props, &buttons_path(), "b2", &patch);

        let before = list_of(&props, "buttons");
        let after = list_of(&next, "buttons");
        assert!(after[0].same_ref(&before[0]));
        assert!(after[2].same_ref(&before[2]));
        assert_eq!(after[1].get("text").and_then(PropValue::as_str), Some("Go"));
        assert_eq!(after[1].item_id(), Some("b2"));
    }

    #[test]
    fn test_update_stale_id_is_noop() {
        let props = buttons();
        let next = update_item(&props, &buttons_path(), "gone", &PropValue::from(json!({ "text": "x" })));
        assert!(next.same_ref(&props));
    }

    #[test]
    fn test_remove_keeps_order() {
        let next = remove_item(&buttons(), &buttons_path(), "b2");
        assert_eq!(ids(&next, "buttons"), vec!["b1", "b3"]);
    }

    #[test]
    fn test_remove_last_leaves_empty_list() {
        let props = PropValue::from(json!({ "buttons": [{ "id": "only" }] }));
        let next = remove_item(&props, &buttons_path(), "only");
        assert_eq!(next.get("buttons"), Some(&PropValue::empty_list()));
    }

    #[test]
    fn test_move_swaps_neighbours() {
        let next = move_item(&buttons(), &buttons_path(), "b2", MoveDirection::Up);
        assert_eq!(ids(&next, "buttons"), vec!["b2", "b1", "b3"]);

        let next = move_item(&buttons(), &buttons_path(), "b2", MoveDirection::Down);
        assert_eq!(ids(&next, "buttons"), vec!["b1", "b3", "b2"]);
    }

    #[test]
    fn test_move_at_boundaries_is_noop() {
        let props = buttons();
        assert!(move_item(&props, &buttons_path(), "b1", MoveDirection::Up).same_ref(&props));
        assert!(move_item(&props, &buttons_path(), "b3", MoveDirection::Down).same_ref(&props));
    }

    #[test]
    fn test_ordinals_follow_structure() {
        let steps = ListPath::new(PropPath::key("steps")).with_ordinal("stepNumber");
        let props = PropValue::from(json!({
            "steps": [
                { "id": "s1", "stepNumber": 1, "instruction": "Boil" },
                { "id": "s2", "stepNumber": 2, "instruction": "Steep" },
                { "id": "s3", "stepNumber": 3, "instruction": "Pour" }
            ]
        }));

        let removed = remove_item(&props, &steps, "s2");
        let numbers: Vec<_> = list_of(&removed, "steps")
            .iter()
            .map(|s| s.get("stepNumber").cloned())
            .collect();
        assert_eq!(numbers, vec![Some(PropValue::Integer(1)), Some(PropValue::Integer(2))]);
        // s1 kept its number and therefore its identity
        assert!(list_of(&removed, "steps")[0].same_ref(&list_of(&props, "steps")[0]));

        let moved = move_item(&props, &steps, "s3", MoveDirection::Up);
        assert_eq!(ids(&moved, "steps"), vec!["s1", "s3", "s2"]);
        assert_eq!(list_of(&moved, "steps")[1].get("stepNumber"), Some(&PropValue::Integer(2)));
        assert_eq!(list_of(&moved, "steps")[2].get("stepNumber"), Some(&PropValue::Integer(3)));

        let added = add_item(&props, &steps, || PropValue::from(json!({ "instruction": "Serve" })));
        assert_eq!(list_of(&added, "steps")[3].get("stepNumber"), Some(&PropValue::Integer(4)));
    }
}
