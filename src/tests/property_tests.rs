//! Property-based tests using proptest.
//!
//! These tests verify invariants that must hold for *any* input, catching
//! edge cases that hand-written tests miss.

use proptest::prelude::*;

use crate::core::hydrate::hydrate_with;
use crate::core::list::{add_item, move_item, remove_item, update_item, ListPath, MoveDirection};
use crate::core::path::{get_path, set_path, PropPath};
use crate::core::registry::BlockRegistry;
use crate::core::{BlockType, ContentBlock, PropValue};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn scalar() -> impl Strategy<Value = PropValue> {
    prop_oneof![
        Just(PropValue::Null),
        any::<bool>().prop_map(PropValue::Boolean),
        any::<i64>().prop_map(PropValue::Integer),
        (-1.0e6..1.0e6f64).prop_map(PropValue::Number),
        "[a-z]{0,8}".prop_map(PropValue::String),
    ]
}

fn key() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "c", "d"]).prop_map(str::to_string)
}

/// JSON-like trees of bounded depth
fn tree() -> impl Strategy<Value = PropValue> {
    scalar().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(PropValue::list),
            prop::collection::btree_map(key(), inner, 0..4).prop_map(PropValue::object),
        ]
    })
}

/// Object with a list of `n` identity-bearing items under `items`
fn list_props(n: usize) -> PropValue {
    PropValue::object([(
        "items",
        PropValue::list((0..n).map(|i| {
            PropValue::object([
                ("id", PropValue::from(format!("item-{i}"))),
                ("label", PropValue::from(format!("Item {i}"))),
            ])
        })),
    )])
}

fn item_list(props: &PropValue) -> &[PropValue] {
    props.get("items").and_then(PropValue::as_list).unwrap_or_default()
}

fn items_path() -> ListPath {
    ListPath::new(PropPath::key("items"))
}

fn registry() -> BlockRegistry {
    BlockRegistry::with_preview().unwrap()
}

/// Every object-valued default key is still an object after hydration
fn keeps_object_shape(hydrated: &PropValue, defaults: &PropValue) -> bool {
    let Some(defaults) = defaults.as_object() else {
        return true;
    };
    defaults.iter().all(|(key, default)| match default {
        PropValue::Object(_) => hydrated
            .get(key)
            .is_some_and(|value| value.as_object().is_some() && keeps_object_shape(value, default)),
        _ => true,
    })
}

// ---------------------------------------------------------------------------
// Path update locality
// ---------------------------------------------------------------------------

proptest! {
    /// Writing one top-level key never touches its siblings.
    #[test]
    fn set_path_reuses_siblings(
        props in prop::collection::btree_map(key(), tree(), 1..4).prop_map(PropValue::object),
        target in key(),
        leaf in key(),
        value in scalar(),
    ) {
        // a list under `target` would address items by id instead
        prop_assume!(!matches!(props.get(&target), Some(PropValue::List(_))));
        let path = PropPath::new([target.clone(), leaf.clone()]).unwrap();
        let next = set_path(&props, &path, value.clone());

        prop_assert_eq!(get_path(&next, &path), Some(&value));
        for (name, before) in props.as_object().unwrap().iter().filter(|(name, _)| **name != target) {
            prop_assert!(next.get(name).unwrap().same_ref(before));
        }
    }

    /// Hydration is idempotent and never drops stored keys.
    #[test]
    fn hydrate_is_idempotent(stored in tree(), defaults in tree()) {
        let no_templates = |_: &[String]| None;
        let once = hydrate_with(&stored, &defaults, &no_templates);
        let twice = hydrate_with(&once, &defaults, &no_templates);
        prop_assert!(twice.same_ref(&once));

        if let (Some(stored), Some(once)) = (stored.as_object(), once.as_object()) {
            for key in stored.keys() {
                prop_assert!(once.contains_key(key));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// List CRUD identity
// ---------------------------------------------------------------------------

proptest! {
    /// Removing one item keeps every other item, by reference and in order.
    #[test]
    fn remove_keeps_others(n in 1..12usize, pick in any::<prop::sample::Index>()) {
        let props = list_props(n);
        let before = item_list(&props);
        let target = pick.index(n);
        let id = before[target].item_id().unwrap().to_string();

        let next = remove_item(&props, &items_path(), &id);
        let after = item_list(&next);
        let expected: Vec<&PropValue> = before.iter().enumerate().filter(|(i, _)| *i != target).map(|(_, item)| item).collect();

        prop_assert_eq!(after.len(), n - 1);
        for (kept, original) in after.iter().zip(expected) {
            prop_assert!(kept.same_ref(original));
        }
    }

    /// Updating one item leaves the others untouched.
    #[test]
    fn update_touches_one_item(n in 1..12usize, pick in any::<prop::sample::Index>(), label in "[a-z]{1,6}") {
        let props = list_props(n);
        let before = item_list(&props);
        let target = pick.index(n);
        let id = before[target].item_id().unwrap().to_string();
        let patch = PropValue::object([("label", PropValue::from(label.clone())), ("id", PropValue::from("hijack"))]);

        let next = update_item(&props, &items_path(), &id, &patch);
        let after = item_list(&next);

        for (index, (a, b)) in after.iter().zip(before).enumerate() {
            if index == target {
                prop_assert_eq!(a.item_id(), Some(id.as_str()));
                prop_assert_eq!(a.get("label"), Some(&PropValue::from(label.clone())));
            } else {
                prop_assert!(a.same_ref(b));
            }
        }
    }

    /// Adding appends one item with a unique id.
    #[test]
    fn add_appends_with_unique_id(n in 0..12usize, reuse in any::<prop::sample::Index>()) {
        let props = list_props(n);
        // colliding id when the list is non-empty
        let id = if n > 0 { format!("item-{}", reuse.index(n)) } else { String::new() };
        let next = add_item(&props, &items_path(), || PropValue::object([("id", PropValue::from(id))]));
        let after = item_list(&next);

        prop_assert_eq!(after.len(), n + 1);
        let ids: std::collections::HashSet<_> = after.iter().filter_map(PropValue::item_id).collect();
        prop_assert_eq!(ids.len(), n + 1);
        for (a, b) in after.iter().zip(item_list(&props)) {
            prop_assert!(a.same_ref(b));
        }
    }

    /// Moving past either end is a no-op; otherwise exactly two items swap.
    #[test]
    fn move_swaps_or_noops(n in 1..10usize, pick in any::<prop::sample::Index>(), up in any::<bool>()) {
        let props = list_props(n);
        let target = pick.index(n);
        let id = item_list(&props)[target].item_id().unwrap().to_string();
        let direction = if up { MoveDirection::Up } else { MoveDirection::Down };

        let next = move_item(&props, &items_path(), &id, direction);
        let at_edge = (up && target == 0) || (!up && target == n - 1);

        if at_edge {
            prop_assert!(next.same_ref(&props));
        } else {
            let other = if up { target - 1 } else { target + 1 };
            let before = item_list(&props);
            let after = item_list(&next);
            prop_assert!(after[other].same_ref(&before[target]));
            prop_assert!(after[target].same_ref(&before[other]));
        }
    }
}

// ---------------------------------------------------------------------------
// Blocks
// ---------------------------------------------------------------------------

proptest! {
    /// Any block, however edited, survives a JSON round trip.
    #[test]
    fn block_json_round_trip(type_index in 0..BlockType::ALL.len(), key in key(), value in tree()) {
        let registry = registry();
        let block = registry.create_block(BlockType::ALL[type_index]);
        let block = block.with_props(set_path(block.props(), &PropPath::key(key), value));

        let json = serde_json::to_string(&block).unwrap();
        let back: ContentBlock = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, block);
    }

    /// Hydration restores the default's shape wherever it expects an object.
    #[test]
    fn registry_hydrate_keeps_object_fields(
        type_index in 0..BlockType::ALL.len(),
        stored in prop::collection::btree_map(
            prop::sample::select(vec!["logo", "text", "layout", "image", "a"]).prop_map(str::to_string),
            tree(),
            0..4,
        )
        .prop_map(PropValue::object),
        root in tree(),
        use_root in any::<bool>(),
    ) {
        let registry = registry();
        let block_type = BlockType::ALL[type_index];
        let stored = if use_root { root } else { stored };
        let defaults = &registry.resolve(block_type).defaults;

        let hydrated = registry.hydrate(&stored, block_type);
        prop_assert!(hydrated.as_object().is_some());
        prop_assert!(keeps_object_shape(&hydrated, defaults));
    }

    /// Hydrating any stored props for any type is idempotent.
    #[test]
    fn registry_hydrate_is_idempotent(type_index in 0..BlockType::ALL.len(), stored in tree()) {
        let registry = registry();
        let block_type = BlockType::ALL[type_index];
        let once = registry.hydrate(&stored, block_type);
        let twice = registry.hydrate(&once, block_type);
        prop_assert!(twice.same_ref(&once));
    }
}
