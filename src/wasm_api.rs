//! WASM API — `#[wasm_bindgen]` exports matching the host editor's module interface.
//!
//! This module is only compiled when targeting `wasm32`. It provides:
//! - `init_editor` / `destroy_editor` — lifecycle
//! - `get_block_types` — the registered block catalog
//! - `insert_block` / `load_block` / `remove_block` — document construction
//! - `update_attributes` / `select_image` / `remove_image` — attribute changes
//! - `set_selected` / `set_active_field` — editor state
//! - `get_edit_view` / `save_block` / `render_document` — rendering
//! - `reconstruct` — attribute recovery from saved markup
//! - `activate` / `get_setting` — settings seeding against the host shim

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::core::attribute::{AttributeUpdate, AttributeValue};
use crate::core::markup::MarkupNode;
use crate::core::registry::BlockRegistry;
use crate::editor::instance::InstanceId;
use crate::editor::media::MediaAttachment;
use crate::editor::session::EditorSession;
use crate::settings::{ActivationOutcome, Activator, InMemorySettings, SettingsRepository};

// ── Global state ────────────────────────────────────────────────────────────

struct WasmEditor {
    session: EditorSession,
    settings: InMemorySettings,
}

thread_local! {
    static EDITOR: RefCell<Option<WasmEditor>> = RefCell::new(None);
}

fn with_editor<R>(f: impl FnOnce(&mut WasmEditor) -> R) -> Result<R, String> {
    EDITOR.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(editor) => Ok(f(editor)),
            None => Err("Editor not initialized. Call init_editor() first.".into()),
        }
    })
}

// ── Response types ──────────────────────────────────────────────────────────

#[derive(Serialize)]
struct OkResponse {
    id: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
struct BlockTypeInfo {
    name: String,
    title: String,
    category: String,
    icon: String,
    keywords: Vec<String>,
}

#[derive(Serialize)]
struct SaveResponse {
    html: String,
    tree: MarkupNode,
}

#[derive(Serialize)]
struct ActivateResponse {
    outcome: String,
}

// ── Internal helpers ────────────────────────────────────────────────────────

fn json_ok(id: &str) -> String {
    serde_json::to_string(&OkResponse { id: id.into() }).unwrap_or_default()
}

fn json_err(msg: impl Into<String>) -> String {
    serde_json::to_string(&ErrorResponse { error: msg.into() }).unwrap_or_default()
}

fn parse_id(raw: &str) -> Result<InstanceId, String> {
    uuid::Uuid::parse_str(raw)
        .map(InstanceId)
        .map_err(|e| format!("Invalid instance ID '{}': {}", raw, e))
}

fn parse_markup(raw: &str) -> Result<MarkupNode, String> {
    serde_json::from_str(raw).map_err(|e| format!("Invalid markup JSON: {}", e))
}

/// Convert a JSON object into a partial attribute update. Entries that do
/// not map onto an attribute value are skipped; JSON `null` unsets.
fn convert_attributes(raw: HashMap<String, serde_json::Value>) -> AttributeUpdate {
    let mut update = AttributeUpdate::new();
    for (name, value) in raw {
        if let Ok(converted) = serde_json::from_value::<AttributeValue>(value) {
            update = update.set(name, converted);
        }
    }
    update
}

// ── Exported functions ──────────────────────────────────────────────────────

#[wasm_bindgen]
pub fn init_editor() -> String {
    console_error_panic_hook::set_once();

    let registry = match BlockRegistry::with_builtins() {
        Ok(registry) => Arc::new(registry),
        Err(e) => return json_err(e.to_string()),
    };

    EDITOR.with(|cell| {
        *cell.borrow_mut() = Some(WasmEditor {
            session: EditorSession::new(registry),
            settings: InMemorySettings::new(),
        });
    });

    json_ok("editor")
}

#[wasm_bindgen]
pub fn destroy_editor() {
    EDITOR.with(|cell| {
        *cell.borrow_mut() = None;
    });
}

#[wasm_bindgen]
pub fn get_block_types() -> String {
    match with_editor(|ed| {
        let types: Vec<BlockTypeInfo> = ed
            .session
            .registry()
            .get_all_blocks()
            .iter()
            .map(|block| {
                let meta = block.metadata();
                BlockTypeInfo {
                    name: meta.name.clone(),
                    title: meta.title.clone(),
                    category: meta.category.display_name().to_string(),
                    icon: meta.icon.clone(),
                    keywords: meta.keywords.clone(),
                }
            })
            .collect();
        serde_json::to_string(&types).unwrap_or_default()
    }) {
        Ok(json) => json,
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn insert_block(block_name: &str) -> String {
    match with_editor(|ed| ed.session.insert_block(block_name)) {
        Ok(Ok(id)) => json_ok(&id.to_string()),
        Ok(Err(e)) => json_err(e.to_string()),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn load_block(block_name: &str, markup_json: &str) -> String {
    let markup = match parse_markup(markup_json) {
        Ok(m) => m,
        Err(e) => return json_err(e),
    };

    match with_editor(|ed| ed.session.load_block(block_name, &markup)) {
        Ok(Ok(id)) => json_ok(&id.to_string()),
        Ok(Err(e)) => json_err(e.to_string()),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn remove_block(instance_id: &str) -> String {
    let id = match parse_id(instance_id) {
        Ok(id) => id,
        Err(e) => return json_err(e),
    };

    match with_editor(|ed| ed.session.remove_block(id)) {
        Ok(Ok(())) => json_ok(instance_id),
        Ok(Err(e)) => json_err(e.to_string()),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn update_attributes(instance_id: &str, attributes_json: &str) -> String {
    let id = match parse_id(instance_id) {
        Ok(id) => id,
        Err(e) => return json_err(e),
    };

    let raw: HashMap<String, serde_json::Value> = match serde_json::from_str(attributes_json) {
        Ok(raw) => raw,
        Err(e) => return json_err(format!("Invalid attributes JSON: {}", e)),
    };

    match with_editor(|ed| ed.session.update_attributes(id, convert_attributes(raw))) {
        Ok(Ok(())) => json_ok(instance_id),
        Ok(Err(e)) => json_err(e.to_string()),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn select_image(instance_id: &str, attachment_json: &str) -> String {
    let id = match parse_id(instance_id) {
        Ok(id) => id,
        Err(e) => return json_err(e),
    };

    let attachment: MediaAttachment = match serde_json::from_str(attachment_json) {
        Ok(a) => a,
        Err(e) => return json_err(format!("Invalid attachment JSON: {}", e)),
    };

    match with_editor(|ed| ed.session.select_image(id, &attachment)) {
        Ok(Ok(())) => json_ok(instance_id),
        Ok(Err(e)) => json_err(e.to_string()),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn remove_image(instance_id: &str) -> String {
    let id = match parse_id(instance_id) {
        Ok(id) => id,
        Err(e) => return json_err(e),
    };

    match with_editor(|ed| ed.session.remove_image(id)) {
        Ok(Ok(())) => json_ok(instance_id),
        Ok(Err(e)) => json_err(e.to_string()),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn set_selected(instance_id: &str, selected: bool) -> String {
    let id = match parse_id(instance_id) {
        Ok(id) => id,
        Err(e) => return json_err(e),
    };

    match with_editor(|ed| ed.session.set_selected(id, selected)) {
        Ok(Ok(())) => json_ok(instance_id),
        Ok(Err(e)) => json_err(e.to_string()),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn set_active_field(instance_id: &str, field: Option<String>) -> String {
    let id = match parse_id(instance_id) {
        Ok(id) => id,
        Err(e) => return json_err(e),
    };

    match with_editor(|ed| ed.session.set_active_field(id, field)) {
        Ok(Ok(())) => json_ok(instance_id),
        Ok(Err(e)) => json_err(e.to_string()),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn get_edit_view(instance_id: &str) -> String {
    let id = match parse_id(instance_id) {
        Ok(id) => id,
        Err(e) => return json_err(e),
    };

    match with_editor(|ed| ed.session.edit_view(id)) {
        Ok(Ok(view)) => serde_json::to_string(&view).unwrap_or_default(),
        Ok(Err(e)) => json_err(e.to_string()),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn save_block(instance_id: &str) -> String {
    let id = match parse_id(instance_id) {
        Ok(id) => id,
        Err(e) => return json_err(e),
    };

    match with_editor(|ed| ed.session.save_block(id)) {
        Ok(Ok(tree)) => serde_json::to_string(&SaveResponse {
            html: tree.to_html(),
            tree,
        })
        .unwrap_or_default(),
        Ok(Err(e)) => json_err(e.to_string()),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn render_document() -> String {
    match with_editor(|ed| ed.session.render_document()) {
        Ok(Ok(document)) => document,
        Ok(Err(e)) => json_err(e.to_string()),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn reconstruct(block_name: &str, markup_json: &str) -> String {
    let markup = match parse_markup(markup_json) {
        Ok(m) => m,
        Err(e) => return json_err(e),
    };

    match with_editor(|ed| ed.session.reconstruct(block_name, &markup)) {
        Ok(Ok(attributes)) => serde_json::to_string(&attributes).unwrap_or_default(),
        Ok(Err(e)) => json_err(e.to_string()),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn activate() -> String {
    match with_editor(|ed| {
        let activator = Activator::new(ed.session.registry());
        activator.activate(&mut ed.settings)
    }) {
        Ok(Ok(outcome)) => serde_json::to_string(&ActivateResponse {
            outcome: match outcome {
                ActivationOutcome::Seeded => "seeded".to_string(),
                ActivationOutcome::AlreadyPresent => "already_present".to_string(),
            },
        })
        .unwrap_or_default(),
        Ok(Err(e)) => json_err(e.to_string()),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn get_setting(key: &str) -> String {
    match with_editor(|ed| ed.settings.get(key)) {
        Ok(Ok(value)) => serde_json::to_string(&value).unwrap_or_default(),
        Ok(Err(e)) => json_err(e.to_string()),
        Err(e) => json_err(e),
    }
}
