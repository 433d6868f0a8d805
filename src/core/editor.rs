//! Settings-editor edits
//!
//! A settings editor never mutates a block. It describes the change as a
//! [`BlockEdit`] and the registry turns `(block, edit)` into a new block.
//! Edits that can't be applied (stale item id, path that isn't a list field,
//! move past the boundary) return the block unchanged.

use serde::{Deserialize, Serialize};

use super::list::{add_item, move_item, remove_item, update_item, ListPath, MoveDirection};
use super::path::{set_path, PropPath};
use super::registry::BlockRegistry;
use super::{ContentBlock, PropValue};

/// One edit of a block's props or style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum BlockEdit {
    /// Write a value at a path
    Set { path: PropPath, value: PropValue },
    /// Append an item; without `item` the list's own item template is used
    AddItem {
        list: PropPath,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        item: Option<PropValue>,
    },
    UpdateItem { list: PropPath, id: String, patch: PropValue },
    RemoveItem { list: PropPath, id: String },
    MoveItem {
        list: PropPath,
        id: String,
        direction: MoveDirection,
    },
    /// Set a style override; `None` clears it
    SetStyle {
        key: String,
        #[serde(default)]
        value: Option<PropValue>,
    },
}

impl BlockRegistry {
    /// Apply an edit, returning the edited block.
    ///
    /// Untouched parts of the props tree are shared with `block`.
    pub fn apply_edit(&self, block: &ContentBlock, edit: &BlockEdit) -> ContentBlock {
        let block_type = block.block_type();
        let props = block.props();

        let next = match edit {
            BlockEdit::Set { path, value } => set_path(props, path, value.clone()),
            BlockEdit::SetStyle { key, value } => {
                let mut style = block.style().clone();
                match value {
                    Some(value) => style.insert(key.clone(), value.clone()),
                    None => style.remove(key),
                };
                return block.with_style(style);
            }
            BlockEdit::AddItem { list, item } => {
                let Some(address) = self.list_address(block, list) else {
                    return block.clone();
                };
                let item = match item {
                    Some(item) => Some(item.clone()),
                    None => self.new_list_item(block_type, list),
                };
                match item {
                    Some(item) => add_item(props, &address, || item),
                    None => props.clone(),
                }
            }
            BlockEdit::UpdateItem { list, id, patch } => match self.list_address(block, list) {
                Some(address) => update_item(props, &address, id, patch),
                None => props.clone(),
            },
            BlockEdit::RemoveItem { list, id } => match self.list_address(block, list) {
                Some(address) => remove_item(props, &address, id),
                None => props.clone(),
            },
            BlockEdit::MoveItem { list, id, direction } => match self.list_address(block, list) {
                Some(address) => move_item(props, &address, id, *direction),
                None => props.clone(),
            },
        };

        if next.same_ref(props) {
            tracing::debug!(block_id = %block.id(), ?edit, "edit left block unchanged");
            block.clone()
        } else {
            block.with_props(next)
        }
    }

    /// Apply edits in order
    pub fn apply_edits<'a, I>(&self, block: &ContentBlock, edits: I) -> ContentBlock
    where
        I: IntoIterator<Item = &'a BlockEdit>,
    {
        edits
            .into_iter()
            .fold(block.clone(), |block, edit| self.apply_edit(&block, edit))
    }

    fn list_address(&self, block: &ContentBlock, list: &PropPath) -> Option<ListPath> {
        let address = self.list_path(block.block_type(), list);
        if address.is_none() {
            tracing::warn!(
                block_id = %block.id(),
                block_type = %block.block_type(),
                path = %list,
                "not a list field of this block type"
            );
        }
        address
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BlockType;
    use serde_json::json;

    fn registry() -> BlockRegistry {
        BlockRegistry::with_preview().unwrap()
    }

    fn step_numbers(block: &ContentBlock) -> Vec<i64> {
        block
            .props()
            .get("steps")
            .and_then(PropValue::as_list)
            .unwrap()
            .iter()
            .filter_map(|step| step.get("stepNumber").and_then(PropValue::as_integer))
            .collect()
    }

    #[test]
    fn test_edit_wire_format() {
        let edit: BlockEdit = serde_json::from_value(json!({
            "op": "moveItem",
            "list": ["steps"],
            "id": "s1",
            "direction": "down"
        }))
        .unwrap();
        assert_eq!(
            edit,
            BlockEdit::MoveItem {
                list: PropPath::key("steps"),
                id: "s1".into(),
                direction: MoveDirection::Down,
            }
        );

        let empty: Result<BlockEdit, _> = serde_json::from_value(json!({ "op": "set", "path": [], "value": 1 }));
        assert!(empty.is_err());
    }

    #[test]
    fn test_add_item_uses_template_and_renumbers() {
        let registry = registry();
        let block = registry.create_block(BlockType::Recipes);
        let edit = BlockEdit::AddItem {
            list: PropPath::key("steps"),
            item: None,
        };

        let next = registry.apply_edit(&block, &edit);
        assert_eq!(step_numbers(&next), vec![1, 2, 3]);
        assert!(next.props().get("title").unwrap().same_ref(block.props().get("title").unwrap()));
    }

    #[test]
    fn test_add_item_to_undeclared_list_is_noop() {
        let registry = registry();
        let block = registry.create_block(BlockType::Text);
        let edit = BlockEdit::AddItem {
            list: PropPath::key("content"),
            item: Some(PropValue::empty_object()),
        };
        let next = registry.apply_edit(&block, &edit);
        assert!(next.props().same_ref(block.props()));
    }

    #[test]
    fn test_set_style_and_clear() {
        let registry = registry();
        let block = registry.create_block(BlockType::Spacer);
        let set = BlockEdit::SetStyle {
            key: "backgroundColor".into(),
            value: Some("#000".into()),
        };
        let styled = registry.apply_edit(&block, &set);
        assert_eq!(styled.style().get("backgroundColor"), Some(&PropValue::from("#000")));
        assert!(styled.props().same_ref(block.props()));

        let clear = BlockEdit::SetStyle {
            key: "backgroundColor".into(),
            value: None,
        };
        assert!(registry.apply_edit(&styled, &clear).style().is_empty());
    }

    #[test]
    fn test_set_cannot_rewrite_item_id() {
        let registry = registry();
        let block = registry.create_block(BlockType::Buttons);
        let block = registry.apply_edit(
            &block,
            &BlockEdit::AddItem {
                list: PropPath::key("buttons"),
                item: None,
            },
        );
        let ids: Vec<String> = block
            .props()
            .get("buttons")
            .and_then(PropValue::as_list)
            .unwrap()
            .iter()
            .map(|item| item.item_id().unwrap().to_string())
            .collect();

        let edit = BlockEdit::Set {
            path: PropPath::new(["buttons", ids[1].as_str(), "id"]).unwrap(),
            value: PropValue::from(ids[0].as_str()),
        };
        let next = registry.apply_edit(&block, &edit);
        assert!(next.props().same_ref(block.props()));

        let after: Vec<&str> = next
            .props()
            .get("buttons")
            .and_then(PropValue::as_list)
            .unwrap()
            .iter()
            .filter_map(PropValue::item_id)
            .collect();
        assert_ne!(after[0], after[1]);
    }

    #[test]
    fn test_stale_id_returns_same_block() {
        let registry = registry();
        let block = registry.create_block(BlockType::Buttons);
        let edit = BlockEdit::RemoveItem {
            list: PropPath::key("buttons"),
            id: "gone".into(),
        };
        assert_eq!(registry.apply_edit(&block, &edit), block);
    }
}
