//! Chard Runner core crate.
//!
//! The runner simulation (`runner`) is plain Rust and runs natively under
//! `cargo test`. The browser build wires it to a canvas through `web`, which
//! is what the JS glue starts via `start_game()`.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod render;
pub mod runner;
pub mod storage;
mod web;

pub use config::GameConfig;
pub use error::{GameError, Result};
pub use runner::{GameEvent, GameState, Phase};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // A second init (e.g. hot reload) keeps the existing logger.
    let _ = console_log::init_with_level(log::Level::Info);
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_game() -> std::result::Result<(), JsValue> {
    web::start(GameConfig::default()).map_err(JsValue::from)
}

/// Start with a JSON override of the default tuning, e.g.
/// `{"physics": {"max_jumps": 3}}`.
#[wasm_bindgen]
pub fn start_game_with_config(config_json: &str) -> std::result::Result<(), JsValue> {
    let config = GameConfig::from_json(config_json)?;
    web::start(config)?;
    Ok(())
}
