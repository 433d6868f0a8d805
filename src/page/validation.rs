//! Page validation
//!
//! Checks a page before it is published or saved: block identity, props shape,
//! list item identity, and the things hydration or renumbering would change.
//! Produces a `ValidationReport` that mirrors the editor's problem panel.

use std::collections::HashSet;

use serde::Serialize;

use crate::blocks::ListSpec;
use crate::core::hydrate::ANY_ITEM;
use crate::core::registry::BlockRegistry;
use crate::core::{ContentBlock, PropValue};

// ── Result types ────────────────────────────────────────────────────────────

/// A single finding with optional location and suggestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    /// Block id where the problem was found (if applicable).
    pub block_id: Option<String>,
    /// Human-readable description.
    pub message: String,
    /// Optional suggestion for how to fix it.
    pub suggestion: Option<String>,
}

/// Overall validation result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn add_error(&mut self, block_id: Option<&str>, message: impl Into<String>, suggestion: Option<&str>) {
        self.valid = false;
        self.errors.push(issue(block_id, message, suggestion));
    }

    fn add_warning(&mut self, block_id: Option<&str>, message: impl Into<String>, suggestion: Option<&str>) {
        self.warnings.push(issue(block_id, message, suggestion));
    }

    /// Merge another report into this one.
    fn merge(&mut self, other: ValidationReport) {
        if !other.valid {
            self.valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

fn issue(block_id: Option<&str>, message: impl Into<String>, suggestion: Option<&str>) -> ValidationIssue {
    ValidationIssue {
        block_id: block_id.map(str::to_string),
        message: message.into(),
        suggestion: suggestion.map(str::to_string),
    }
}

// ── Validator ───────────────────────────────────────────────────────────────

/// Validates the blocks of a page.
pub struct PageValidator;

impl PageValidator {
    /// Run every check against `blocks`.
    pub fn validate(registry: &BlockRegistry, blocks: &[ContentBlock], max_blocks: Option<usize>) -> ValidationReport {
        let mut report = ValidationReport::ok();

        report.merge(Self::check_block_count(blocks, max_blocks));
        report.merge(Self::check_duplicate_block_ids(blocks));
        for block in blocks {
            report.merge(Self::check_props_shape(block));
            report.merge(Self::check_list_items(registry, block));
            report.merge(Self::check_missing_fields(registry, block));
            report.merge(Self::check_typed_props(block));
        }

        if !report.valid {
            tracing::warn!(errors = report.errors.len(), "page validation failed");
        }
        report
    }

    // ── Individual checks ───────────────────────────────────────────────

    fn check_block_count(blocks: &[ContentBlock], max_blocks: Option<usize>) -> ValidationReport {
        let mut report = ValidationReport::ok();
        if let Some(max) = max_blocks.filter(|max| blocks.len() > *max) {
            report.add_error(
                None,
                format!("Page has {} blocks, the limit is {}", blocks.len(), max),
                Some("Remove blocks or raise maxBlocks"),
            );
        }
        report
    }

    /// Block ids must be unique within the page.
    fn check_duplicate_block_ids(blocks: &[ContentBlock]) -> ValidationReport {
        let mut report = ValidationReport::ok();
        let mut seen = HashSet::new();
        for block in blocks {
            if !seen.insert(block.id()) {
                report.add_error(
                    Some(block.id().as_str()),
                    format!("Duplicate block id '{}'", block.id()),
                    Some("Duplicate the block through the editor to get a fresh id"),
                );
            }
        }
        report
    }

    /// Props must be a record.
    fn check_props_shape(block: &ContentBlock) -> ValidationReport {
        let mut report = ValidationReport::ok();
        if !matches!(block.props(), PropValue::Object(_) | PropValue::Null) {
            report.add_error(
                Some(block.id().as_str()),
                format!("Props of {} block are not an object", block.block_type()),
                Some("Reset the block to its defaults"),
            );
        }
        report
    }

    /// Items of declared lists need unique, non-empty ids; ordinals should
    /// follow the list order.
    fn check_list_items(registry: &BlockRegistry, block: &ContentBlock) -> ValidationReport {
        let mut report = ValidationReport::ok();
        let block_id = Some(block.id().as_str());
        let schema = registry.resolve(block.block_type()).schema;

        for spec in schema.lists {
            for (path, items) in lists_matching(block.props(), spec) {
                let mut seen = HashSet::new();
                for (index, item) in items.iter().enumerate() {
                    match item.item_id() {
                        Some(id) if !id.is_empty() => {
                            if !seen.insert(id) {
                                report.add_error(
                                    block_id,
                                    format!("Duplicate item id '{}' in {}", id, path),
                                    Some("Hydrate the block to reassign ids"),
                                );
                            }
                        }
                        _ => report.add_error(
                            block_id,
                            format!("Item {} of {} has no id", index + 1, path),
                            Some("Hydrate the block to assign ids"),
                        ),
                    }

                    if let Some(field) = spec.ordinal {
                        let expected = index as i64 + 1;
                        if item.get(field).and_then(PropValue::as_integer) != Some(expected) {
                            report.add_warning(
                                block_id,
                                format!("{} of item {} in {} is out of date", field, index + 1, path),
                                Some("Hydrate the block to renumber"),
                            );
                        }
                    }
                }
            }
        }
        report
    }

    /// Top-level fields that hydration will fill in.
    fn check_missing_fields(registry: &BlockRegistry, block: &ContentBlock) -> ValidationReport {
        let mut report = ValidationReport::ok();
        let (Some(defaults), Some(props)) = (
            registry.resolve(block.block_type()).defaults.as_object(),
            block.props().as_object(),
        ) else {
            return report;
        };

        let missing: Vec<&str> = defaults
            .keys()
            .filter(|key| props.get(key.as_str()).map_or(true, PropValue::is_null))
            .map(String::as_str)
            .collect();
        if !missing.is_empty() {
            report.add_warning(
                Some(block.id().as_str()),
                format!("Missing fields will use defaults: {}", missing.join(", ")),
                None,
            );
        }
        report
    }

    /// Props should decode as the block type's schema.
    fn check_typed_props(block: &ContentBlock) -> ValidationReport {
        let mut report = ValidationReport::ok();
        if !block.props().is_null() && block.props().as_object().is_some() {
            if let Err(err) = block.typed_props() {
                report.add_warning(Some(block.id().as_str()), err.to_string(), Some("Check the field types"));
            }
        }
        report
    }
}

/// Concrete lists addressed by `spec`, with a dotted display path
fn lists_matching<'a>(props: &'a PropValue, spec: &ListSpec) -> Vec<(String, &'a [PropValue])> {
    let mut found = Vec::new();
    collect_lists(props, spec.path, String::new(), &mut found);
    found
}

fn collect_lists<'a>(
    node: &'a PropValue,
    pattern: &[&str],
    prefix: String,
    found: &mut Vec<(String, &'a [PropValue])>,
) {
    let Some((head, rest)) = pattern.split_first() else {
        if let Some(items) = node.as_list() {
            found.push((prefix, items));
        }
        return;
    };

    let join = |segment: &str| {
        if prefix.is_empty() {
            segment.to_string()
        } else {
            format!("{prefix}.{segment}")
        }
    };

    if *head == ANY_ITEM {
        for item in node.as_list().unwrap_or_default() {
            if let Some(id) = item.item_id() {
                collect_lists(item, rest, join(id), found);
            }
        }
    } else if let Some(child) = node.get(head) {
        collect_lists(child, rest, join(head), found);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BlockId, BlockType};
    use serde_json::json;

    fn registry() -> BlockRegistry {
        BlockRegistry::with_preview().unwrap()
    }

    fn block(id: &str, block_type: BlockType, props: serde_json::Value) -> ContentBlock {
        ContentBlock::from_parts(BlockId::from(id), block_type, PropValue::from(props), Default::default())
    }

    // ── Valid page ──────────────────────────────────────────────────────

    #[test]
    fn test_fresh_blocks_are_valid() {
        let registry = registry();
        let blocks: Vec<_> = BlockType::ALL.iter().map(|t| registry.create_block(*t)).collect();

        let report = PageValidator::validate(&registry, &blocks, None);
        assert!(report.valid, "Errors: {:?}", report.errors);
        assert!(report.warnings.is_empty(), "Warnings: {:?}", report.warnings);
    }

    // ── Identity ────────────────────────────────────────────────────────

    #[test]
    fn test_duplicate_block_ids() {
        let registry = registry();
        let blocks = vec![
            block("a", BlockType::Spacer, json!({ "height": 8 })),
            block("a", BlockType::Spacer, json!({ "height": 16 })),
        ];
        let report = PageValidator::validate(&registry, &blocks, None);
        assert!(!report.valid);
        assert!(report.errors.iter().any(|e| e.message.contains("Duplicate block id")));
    }

    #[test]
    fn test_nested_item_ids() {
        let registry = registry();
        let blocks = vec![block(
            "p",
            BlockType::Products,
            json!({
                "products": [{
                    "id": "p1",
                    "buyOptions": [{ "id": "b1" }, { "id": "b1" }],
                    "licenses": [{ "name": "Organic" }]
                }]
            }),
        )];

        let report = PageValidator::validate(&registry, &blocks, None);
        assert!(report.errors.iter().any(|e| e.message == "Duplicate item id 'b1' in products.p1.buyOptions"));
        assert!(report.errors.iter().any(|e| e.message == "Item 1 of products.p1.licenses has no id"));
    }

    // ── Warnings ────────────────────────────────────────────────────────

    #[test]
    fn test_stale_ordinal_and_missing_fields_warn() {
        let registry = registry();
        let blocks = vec![block(
            "r",
            BlockType::Recipes,
            json!({ "steps": [{ "id": "s1", "stepNumber": 2 }] }),
        )];

        let report = PageValidator::validate(&registry, &blocks, None);
        assert!(report.valid, "Errors: {:?}", report.errors);
        assert!(report.warnings.iter().any(|w| w.message.contains("stepNumber")));
        assert!(report.warnings.iter().any(|w| w.message.contains("title")));
    }

    #[test]
    fn test_non_object_props_and_block_limit() {
        let registry = registry();
        let blocks = vec![
            block("t", BlockType::Text, json!("hello")),
            block("s", BlockType::Spacer, json!({})),
        ];

        let report = PageValidator::validate(&registry, &blocks, Some(1));
        assert_eq!(report.errors.len(), 2);
    }
}
