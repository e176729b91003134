//! JSON-in, JSON-out entry point, exported to JavaScript on wasm targets.

use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

use crate::assembly::{assemble, DeckRequest, PreTagged, TemplateCatalog};
use crate::config::AssemblyConfig;
use crate::errors::Result;
use crate::models::presentation::Presentation;

/// Assembles a deck from JSON documents: the template presentation, its
/// catalog, the request and an optional configuration (`""` for defaults).
///
/// Block content must already be tagged. Returns the assembled presentation
/// as JSON bytes.
pub fn assemble_deck_from_json(
    template_json: &str,
    catalog_json: &str,
    request_json: &str,
    config_json: &str,
) -> Result<Vec<u8>> {
    let presentation: Presentation = serde_json::from_str(template_json)?;
    let catalog = TemplateCatalog::from_json_str(catalog_json)?;
    let request: DeckRequest = serde_json::from_str(request_json)?;
    let config = if config_json.trim().is_empty() {
        AssemblyConfig::default()
    } else {
        AssemblyConfig::from_json_str(config_json)?
    };
    let deck = assemble(
        presentation,
        &catalog,
        config,
        &request,
        &PreTagged,
        StdRng::from_entropy(),
    )?;
    Ok(deck.bytes)
}

fn init_logging() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    #[cfg(target_arch = "wasm32")]
    let _ = console_log::init_with_level(log::Level::Info);
}

#[wasm_bindgen(js_name = assembleDeck)]
pub fn assemble_deck(
    template_json: &str,
    catalog_json: &str,
    request_json: &str,
    config_json: &str,
) -> std::result::Result<String, JsValue> {
    init_logging();
    let bytes = assemble_deck_from_json(template_json, catalog_json, request_json, config_json)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| JsValue::from_str(&e.to_string()))
}
