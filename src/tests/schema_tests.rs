//! Schema consistency tests
//!
//! Every block type's defaults, list declarations, settings form and typed
//! schema must agree with each other.

#[cfg(test)]
mod schema_tests {
    use std::collections::HashSet;

    use crate::blocks::{default_props, schema, BlockProps};
    use crate::core::path::{get_path, PropPath};
    use crate::core::registry::BlockRegistry;
    use crate::core::settings::{SettingsForm, WidgetType};
    use crate::core::{BlockType, PropValue};

    fn registry() -> BlockRegistry {
        BlockRegistry::with_preview().unwrap()
    }

    /// Every field a settings form edits exists in the value it edits.
    fn assert_form_covered(form: &SettingsForm, value: &PropValue, context: &str) {
        for field in &form.fields {
            let path = PropPath::new(field.path.clone()).unwrap();
            let current = get_path(value, &path);
            assert!(
                current.is_some_and(|v| !v.is_null()),
                "{context}: default has no value at {path}"
            );

            if field.widget == WidgetType::Select {
                let selected = current.and_then(PropValue::as_str).unwrap();
                assert!(
                    field.options.iter().any(|o| o == selected),
                    "{context}: default {selected:?} at {path} is not a select option"
                );
            }
            if let (Some(limits), Some(number)) = (&field.constraints, current.and_then(PropValue::as_number)) {
                assert!(limits.allows(number), "{context}: default {number} at {path} is out of range");
            }
        }

        for list in &form.lists {
            let path = PropPath::new(list.path.clone()).unwrap();
            let items = get_path(value, &path).and_then(PropValue::as_list);
            assert!(items.is_some(), "{context}: default has no list at {path}");
            for item in items.unwrap_or_default() {
                assert_form_covered(&list.item, item, &format!("{context}.{path}"));
            }
        }
    }

    /// Defaults are fully populated: every settings field resolves.
    #[test]
    fn test_defaults_cover_settings_forms() {
        for block_type in BlockType::ALL {
            let defaults = default_props(block_type).unwrap();
            let form = (schema(block_type).settings)();
            assert_form_covered(&form, &defaults, block_type.as_str());
        }
    }

    /// Defaults decode as the typed schema of their block type.
    #[test]
    fn test_defaults_decode_as_typed_props() {
        for block_type in BlockType::ALL {
            let defaults = default_props(block_type).unwrap();
            let typed = BlockProps::decode(block_type, &defaults).unwrap();
            assert_eq!(typed.block_type(), block_type);
        }
    }

    /// Same keys every call; fresh item ids every call.
    #[test]
    fn test_defaults_have_stable_shape_and_fresh_ids() {
        fn shape(value: &PropValue) -> Vec<String> {
            value.as_object().map(|m| m.keys().cloned().collect()).unwrap_or_default()
        }

        for block_type in BlockType::ALL {
            let a = default_props(block_type).unwrap();
            let b = default_props(block_type).unwrap();
            assert_eq!(shape(&a), shape(&b), "{block_type}");

            for spec in schema(block_type).lists.iter().filter(|s| s.path.len() == 1) {
                let ids = |v: &PropValue| -> HashSet<String> {
                    v.get(spec.path[0])
                        .and_then(PropValue::as_list)
                        .unwrap_or_default()
                        .iter()
                        .filter_map(|item| item.item_id().map(str::to_string))
                        .collect()
                };
                assert!(ids(&a).is_disjoint(&ids(&b)), "{block_type}.{}", spec.path[0]);
            }
        }
    }

    /// Item templates of every declared list are objects with an id.
    #[test]
    fn test_list_item_templates() {
        for block_type in BlockType::ALL {
            for spec in schema(block_type).lists {
                let item = (spec.new_item)().unwrap();
                assert!(item.as_object().is_some(), "{block_type}: {:?}", spec.path);
                assert!(!item.item_id().unwrap_or_default().is_empty());
            }
        }
    }

    /// Lists offered by settings forms are declared in the schema and vice versa.
    #[test]
    fn test_settings_lists_match_declared_lists() {
        fn collect(form: &SettingsForm, prefix: &[String], out: &mut HashSet<Vec<String>>) {
            for list in &form.lists {
                let mut path = prefix.to_vec();
                path.extend(list.path.iter().cloned());
                out.insert(path.clone());
                path.push("*".into());
                collect(&list.item, &path, out);
            }
        }

        for block_type in BlockType::ALL {
            let mut offered = HashSet::new();
            collect(&(schema(block_type).settings)(), &[], &mut offered);
            let declared: HashSet<Vec<String>> = schema(block_type)
                .lists
                .iter()
                .map(|spec| spec.path.iter().map(|s| s.to_string()).collect())
                .collect();
            assert_eq!(offered, declared, "{block_type}");
        }
    }

    /// A freshly created block hydrates to itself.
    #[test]
    fn test_created_blocks_are_already_hydrated() {
        let registry = registry();
        for block_type in BlockType::ALL {
            let block = registry.create_block(block_type);
            let hydrated = registry.hydrate(block.props(), block_type);
            assert!(hydrated.same_ref(block.props()), "{block_type}");
        }
    }

    /// Every type renders with the preview renderer.
    #[test]
    fn test_every_type_renders() {
        let registry = registry();
        for block_type in BlockType::ALL {
            let block = registry.create_block(block_type);
            let out = registry.render(&block);
            let json: serde_json::Value = serde_json::from_str(&out).unwrap();
            assert_eq!(json["type"], block_type.as_str());
        }
    }
}
