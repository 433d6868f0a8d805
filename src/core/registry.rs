//! Block Registry - maps every block type to its schema, renderer and defaults
//!
//! The registry is the single place that dispatches on `BlockType`. It supports:
//! - Resolution of a type to `{ renderer, settings, defaults }`
//! - Creation of new blocks from the palette
//! - Default-props hydration of stored blocks
//! - Effective style computation (layout styling + overrides)
//!
//! A registry is assembled once through [`RegistryBuilder`] and is read-only
//! afterwards. It can be passed around by reference or installed as the
//! process-wide instance with [`install_global`].

use std::sync::{Arc, OnceLock};

use crate::blocks::{schema, BlockSchema};
use crate::core::hydrate::{hydrate_with, ANY_ITEM};
use crate::core::list::{renumber, ListPath};
use crate::core::path::{modify_path, PropPath};
use crate::core::settings::SettingsForm;
use crate::core::style::{merge_styles, StyleMap};
use crate::core::value::ITEM_ID_KEY;
use crate::core::{new_item_id, BlockId, BlockType, ContentBlock, PropValue};
use crate::render::{BlockRenderer, JsonPreviewRenderer, RenderInput};

static GLOBAL: OnceLock<BlockRegistry> = OnceLock::new();

/// Resolved registration of one block type
pub struct BlockEntry {
    pub schema: &'static BlockSchema,
    pub renderer: Arc<dyn BlockRenderer>,
    pub settings: SettingsForm,
    /// Defaults template; hydration merges stored props over it
    pub defaults: PropValue,
    /// Item templates, parallel to `schema.lists`
    item_templates: Vec<PropValue>,
}

impl BlockEntry {
    /// Template for items of the list at a schema path (`*` for item positions)
    pub fn item_template(&self, pattern: &[String]) -> Option<PropValue> {
        self.schema
            .lists
            .iter()
            .position(|spec| spec.matches(pattern))
            .and_then(|index| self.item_templates.get(index).cloned())
    }
}

/// Block registry for every block type
///
/// Entries are stored in [`BlockType::ALL`] order, so resolution is an index
/// lookup and always succeeds.
#[derive(Clone)]
pub struct BlockRegistry {
    entries: Arc<Vec<BlockEntry>>,
}

impl BlockRegistry {
    /// Start assembling a registry
    ///
    /// # Example
    /// ```
    /// use studio_blocks::core::registry::BlockRegistry;
    /// use studio_blocks::render::JsonPreviewRenderer;
    /// use std::sync::Arc;
    ///
    /// let registry = BlockRegistry::builder()
    ///     .fallback_renderer(Arc::new(JsonPreviewRenderer))
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Registry rendering every type with [`JsonPreviewRenderer`]
    pub fn with_preview() -> Result<Self, RegistryError> {
        Self::builder().fallback_renderer(Arc::new(JsonPreviewRenderer)).build()
    }

    /// Registration of a block type
    pub fn resolve(&self, block_type: BlockType) -> &BlockEntry {
        &self.entries[block_type.index()]
    }

    /// Fresh copy of the default props, with newly generated item ids
    pub fn default_props(&self, block_type: BlockType) -> PropValue {
        reseed_item_ids(&self.resolve(block_type).defaults)
    }

    /// New block as produced by the palette: fresh id, defaults, no overrides
    pub fn create_block(&self, block_type: BlockType) -> ContentBlock {
        let block = ContentBlock::from_parts(
            BlockId::new(),
            block_type,
            self.default_props(block_type),
            StyleMap::new(),
        );
        tracing::debug!(block_id = %block.id(), %block_type, "created block");
        block
    }

    /// Clipboard copy: same props and style under a fresh block id, with every
    /// list item given a fresh id
    pub fn duplicate_block(&self, block: &ContentBlock) -> ContentBlock {
        block
            .with_id(BlockId::new())
            .with_props(reseed_item_ids(block.props()))
    }

    /// Deep-merge stored props over the defaults of `block_type`.
    ///
    /// Stored values and unknown keys are kept; list items are completed from
    /// their item template; derived ordinals are brought in line with the
    /// list order. Hydrating hydrated props returns them unchanged.
    pub fn hydrate(&self, props: &PropValue, block_type: BlockType) -> PropValue {
        let entry = self.resolve(block_type);
        let hydrated = hydrate_with(props, &entry.defaults, &|pattern: &[String]| {
            entry.item_template(pattern)
        });
        renumber_ordinals(&hydrated, entry.schema)
    }

    /// Same block with hydrated props
    pub fn hydrate_block(&self, block: &ContentBlock) -> ContentBlock {
        let props = self.hydrate(block.props(), block.block_type());
        if props.same_ref(block.props()) {
            block.clone()
        } else {
            block.with_props(props)
        }
    }

    /// Layout styling implied by the props, overridden by the block's own style
    pub fn effective_style(&self, block: &ContentBlock) -> StyleMap {
        let layout = (self.resolve(block.block_type()).schema.layout)(block.props());
        merge_styles([&layout, block.style()])
    }

    /// List address for a concrete path inside a block of `block_type`.
    ///
    /// `None` when the path is not one of the type's list fields.
    pub fn list_path(&self, block_type: BlockType, path: &PropPath) -> Option<ListPath> {
        let spec = self.resolve(block_type).schema.list_spec(path.segments())?;
        let list = ListPath::new(path.clone());
        Some(match spec.ordinal {
            Some(field) => list.with_ordinal(field),
            None => list,
        })
    }

    /// New item for the list at `path`, with a fresh id
    pub fn new_list_item(&self, block_type: BlockType, path: &PropPath) -> Option<PropValue> {
        let pattern: Vec<String> = self
            .resolve(block_type)
            .schema
            .list_spec(path.segments())?
            .path
            .iter()
            .map(|s| s.to_string())
            .collect();
        let template = self.resolve(block_type).item_template(&pattern)?;
        Some(reseed_item_ids(&template).with_key(ITEM_ID_KEY, PropValue::from(new_item_id())))
    }

    /// Render a block with its type's renderer
    pub fn render(&self, block: &ContentBlock) -> String {
        let hydrated = self.hydrate_block(block);
        let style = self.effective_style(&hydrated);
        self.resolve(block.block_type()).renderer.render(&RenderInput {
            block_type: block.block_type(),
            props: hydrated.props(),
            style: &style,
        })
    }

    /// Number of registered block types
    pub fn count(&self) -> usize {
        self.entries.len()
    }
}

/// Builder for [`BlockRegistry`]
#[derive(Default)]
pub struct RegistryBuilder {
    renderers: Vec<(BlockType, Arc<dyn BlockRenderer>)>,
    fallback: Option<Arc<dyn BlockRenderer>>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer for one block type; a later registration replaces an earlier one
    pub fn renderer(mut self, block_type: BlockType, renderer: Arc<dyn BlockRenderer>) -> Self {
        self.renderers.retain(|(registered, _)| *registered != block_type);
        self.renderers.push((block_type, renderer));
        self
    }

    /// Renderer used for every type without its own
    pub fn fallback_renderer(mut self, renderer: Arc<dyn BlockRenderer>) -> Self {
        self.fallback = Some(renderer);
        self
    }

    /// Resolve every block type.
    ///
    /// Fails when a type has no renderer or its defaults don't encode.
    pub fn build(self) -> Result<BlockRegistry, RegistryError> {
        let mut entries = Vec::with_capacity(BlockType::ALL.len());

        for block_type in BlockType::ALL {
            let renderer = self
                .renderers
                .iter()
                .find(|(registered, _)| *registered == block_type)
                .map(|(_, renderer)| Arc::clone(renderer))
                .or_else(|| self.fallback.clone())
                .ok_or(RegistryError::MissingRenderer(block_type))?;

            let schema = schema(block_type);
            let defaults = (schema.defaults)()
                .map_err(|source| RegistryError::DefaultsEncoding { block_type, source })?;
            let item_templates = schema
                .lists
                .iter()
                .map(|spec| (spec.new_item)())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|source| RegistryError::DefaultsEncoding { block_type, source })?;

            entries.push(BlockEntry {
                schema,
                renderer,
                settings: (schema.settings)(),
                defaults,
                item_templates,
            });
        }

        tracing::debug!(block_types = entries.len(), "block registry built");
        Ok(BlockRegistry {
            entries: Arc::new(entries),
        })
    }
}

/// Install the process-wide registry. Only the first call succeeds.
pub fn install_global(registry: BlockRegistry) -> Result<&'static BlockRegistry, RegistryError> {
    GLOBAL.set(registry).map_err(|_| RegistryError::AlreadyInstalled)?;
    GLOBAL.get().ok_or(RegistryError::AlreadyInstalled)
}

/// The process-wide registry, if one was installed
pub fn global() -> Option<&'static BlockRegistry> {
    GLOBAL.get()
}

/// Copy of `value` where every list item carrying an id gets a fresh one
fn reseed_item_ids(value: &PropValue) -> PropValue {
    match value {
        PropValue::Object(map) => PropValue::object(map.iter().map(|(k, v)| (k.clone(), reseed_item_ids(v)))),
        PropValue::List(items) => PropValue::list(items.iter().map(|item| {
            let item = reseed_item_ids(item);
            if item.item_id().is_some() {
                item.with_key(ITEM_ID_KEY, PropValue::from(new_item_id()))
            } else {
                item
            }
        })),
        scalar => scalar.clone(),
    }
}

/// Renumber the ordinal field of top-level lists that declare one
fn renumber_ordinals(props: &PropValue, schema: &BlockSchema) -> PropValue {
    let mut props = props.clone();
    for spec in schema.lists.iter().filter(|spec| spec.ordinal.is_some()) {
        if spec.path.contains(&ANY_ITEM) {
            continue;
        }
        let Ok(path) = PropPath::new(spec.path.iter().copied()) else {
            continue;
        };
        props = modify_path(&props, &path, |current| {
            let items = current?.as_list()?;
            let mut next = items.to_vec();
            renumber(&mut next, spec.ordinal);
            if next.iter().zip(items).all(|(a, b)| a.same_ref(b)) {
                return None;
            }
            Some(PropValue::from(next))
        });
    }
    props
}

/// Registry error types
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// No renderer registered for a type and no fallback given
    #[error("No renderer registered for block type: {0}")]
    MissingRenderer(BlockType),

    /// Defaults or an item template failed to encode
    #[error("Defaults for block type {block_type} failed to encode: {source}")]
    DefaultsEncoding {
        block_type: BlockType,
        #[source]
        source: serde_json::Error,
    },

    /// `install_global` called twice
    #[error("A global block registry is already installed")]
    AlreadyInstalled,
}
