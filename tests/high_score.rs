// High-score persistence through the store abstraction (native, in-memory).

use chard_runner::runner::{Entity, GameEvent, GameState, Item, Rect};
use chard_runner::storage::{HighScoreStore, MemoryStore, decode_score, encode_score};
use chard_runner::GameConfig;

use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn store_round_trips_high_score() {
    let mut store = MemoryStore::new();
    for score in [0u32, 1, 437, u32::MAX] {
        store.save(score).unwrap();
        assert_eq!(store.load().unwrap(), score);
    }
}

#[test]
fn encoded_form_is_plain_integer() {
    assert_eq!(encode_score(1234), "1234");
    assert_eq!(decode_score(Some(&encode_score(1234))), 1234);
}

#[test]
fn loaded_high_score_seeds_new_session() {
    let mut store = MemoryStore::new();
    store.save(90).unwrap();
    let mut rng = StdRng::seed_from_u64(9);
    let state = GameState::new(GameConfig::default(), store.load().unwrap(), &mut rng);
    assert_eq!(state.high_score, 90);
    assert_eq!(state.score, 0);
}

#[test]
fn high_score_events_drive_persistence() {
    let mut store = MemoryStore::new();
    let mut rng = StdRng::seed_from_u64(9);
    let mut state = GameState::new(GameConfig::default(), 5, &mut rng);
    state.activate(&mut rng);

    let p = state.player.rect;
    let item = Item { rect: Rect::new(p.x + 10.0, p.y + 10.0, 30.0, 30.0), speed: 0.0 };
    state.entities.push(Entity::Collectible(item));
    for event in state.update(0.0, &mut rng) {
        if let GameEvent::NewHighScore(score) = event {
            store.save(score).unwrap();
        }
    }
    assert_eq!(store.load().unwrap(), 10);

    // Below the best: no new high score event, stored value untouched
    let mut rng2 = StdRng::seed_from_u64(10);
    let mut next = GameState::new(GameConfig::default(), store.load().unwrap(), &mut rng2);
    next.activate(&mut rng2);
    let events = next.update(0.0, &mut rng2);
    assert!(!events.iter().any(|e| matches!(e, GameEvent::NewHighScore(_))));
    assert_eq!(next.end(), Some(GameEvent::GameOver { score: 0 }));
    assert_eq!(next.high_score, 10);
}
