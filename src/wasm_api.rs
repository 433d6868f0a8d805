//! WASM API - `#[wasm_bindgen]` exports for the browser editor.
//!
//! This module is only compiled when targeting `wasm32`. Every function takes
//! and returns JSON strings; failures come back as `{ "error": "..." }`.
//! - `init_studio` / `destroy_studio` - lifecycle
//! - `get_block_types` / `create_block` - palette
//! - `apply_edit` / `hydrate_block` - settings editor
//! - `effective_style` / `render_block` / `get_settings_form` - preview
//! - `validate_page` - page checks

use std::cell::RefCell;

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::config::{Palette, StudioConfig};
use crate::core::editor::BlockEdit;
use crate::core::registry::BlockRegistry;
use crate::core::{BlockType, ContentBlock};
use crate::page::PageValidator;

// ── Global state ────────────────────────────────────────────────────────────

struct Studio {
    registry: BlockRegistry,
    config: StudioConfig,
    palette: Palette,
}

thread_local! {
    static STUDIO: RefCell<Option<Studio>> = RefCell::new(None);
}

fn with_studio<R>(f: impl FnOnce(&Studio) -> R) -> Result<R, String> {
    STUDIO.with(|cell| match cell.borrow().as_ref() {
        Some(studio) => Ok(f(studio)),
        None => Err("Studio not initialized. Call init_studio() first.".into()),
    })
}

// ── JSON interchange ────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Deserialize)]
struct EditRequest {
    block: ContentBlock,
    edit: BlockEdit,
}

fn json_ok<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| json_err(format!("Encoding failed: {}", e)))
}

fn json_err(msg: impl Into<String>) -> String {
    serde_json::to_string(&ErrorResponse { error: msg.into() }).unwrap_or_default()
}

fn parse<T: for<'de> Deserialize<'de>>(json: &str, what: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

fn respond<T: Serialize>(result: Result<T, String>) -> String {
    match result {
        Ok(value) => json_ok(&value),
        Err(e) => json_err(e),
    }
}

// ── Exported functions ──────────────────────────────────────────────────────

/// Set up the registry. An empty string uses the default configuration.
#[wasm_bindgen]
pub fn init_studio(config_json: &str) -> String {
    console_error_panic_hook::set_once();

    let config = if config_json.trim().is_empty() {
        StudioConfig::default()
    } else {
        match StudioConfig::from_json_str(config_json) {
            Ok(config) => config,
            Err(e) => return json_err(e.to_string()),
        }
    };
    let registry = match BlockRegistry::with_preview() {
        Ok(registry) => registry,
        Err(e) => return json_err(e.to_string()),
    };

    let palette = config.palette();
    let response = json_ok(&palette);
    STUDIO.with(|cell| {
        *cell.borrow_mut() = Some(Studio {
            registry,
            config,
            palette,
        });
    });
    response
}

#[wasm_bindgen]
pub fn destroy_studio() {
    STUDIO.with(|cell| {
        *cell.borrow_mut() = None;
    });
}

#[wasm_bindgen]
pub fn get_block_types() -> String {
    respond(with_studio(|studio| studio.palette.clone()))
}

#[wasm_bindgen]
pub fn create_block(block_type: &str) -> String {
    let block_type: BlockType = match block_type.parse() {
        Ok(t) => t,
        Err(e) => return json_err(format!("{}", e)),
    };
    respond(
        with_studio(|studio| studio.palette.create(&studio.registry, block_type))
            .and_then(|created| created.map_err(|e| e.to_string())),
    )
}

/// `{ "block": ContentBlock, "edit": BlockEdit }` in, edited block out
#[wasm_bindgen]
pub fn apply_edit(request_json: &str) -> String {
    respond(parse::<EditRequest>(request_json, "edit request").and_then(|request| {
        with_studio(|studio| studio.registry.apply_edit(&request.block, &request.edit))
    }))
}

#[wasm_bindgen]
pub fn hydrate_block(block_json: &str) -> String {
    respond(
        parse::<ContentBlock>(block_json, "block")
            .and_then(|block| with_studio(|studio| studio.registry.hydrate_block(&block))),
    )
}

#[wasm_bindgen]
pub fn effective_style(block_json: &str) -> String {
    respond(
        parse::<ContentBlock>(block_json, "block")
            .and_then(|block| with_studio(|studio| studio.registry.effective_style(&block))),
    )
}

/// Preview markup for a block, returned as a JSON string
#[wasm_bindgen]
pub fn render_block(block_json: &str) -> String {
    respond(
        parse::<ContentBlock>(block_json, "block")
            .and_then(|block| with_studio(|studio| studio.registry.render(&block))),
    )
}

#[wasm_bindgen]
pub fn get_settings_form(block_type: &str) -> String {
    let block_type: BlockType = match block_type.parse() {
        Ok(t) => t,
        Err(e) => return json_err(format!("{}", e)),
    };
    respond(with_studio(|studio| studio.registry.resolve(block_type).settings.clone()))
}

#[wasm_bindgen]
pub fn validate_page(page_json: &str) -> String {
    respond(parse::<Vec<ContentBlock>>(page_json, "page").and_then(|blocks| {
        with_studio(|studio| PageValidator::validate(&studio.registry, &blocks, studio.config.max_blocks))
    }))
}
