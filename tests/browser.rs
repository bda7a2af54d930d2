// Browser-only checks (run with `wasm-pack test --headless --firefox`).
#![cfg(target_arch = "wasm32")]

use chard_runner::storage::{HighScoreStore, LocalStore};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn local_store_round_trips_high_score() {
    let mut store = LocalStore::open("chardRunnerTestHighScore").unwrap();
    store.save(77).unwrap();
    assert_eq!(store.load().unwrap(), 77);
    store.save(0).unwrap();
    assert_eq!(store.load().unwrap(), 0);
}
