//! Timed creation of items, trampolines and platforms at the right edge of the
//! viewport. All randomness comes through the injected `rng`.

use std::f64::consts::TAU;

use rand::Rng;

use crate::config::SpawnConfig;

use super::Viewport;
use super::entity::{Entity, Item, Oscillation, Pad, Rect};

const TRAMPOLINE_WIDTH: f64 = 100.0;
const TRAMPOLINE_HEIGHT: f64 = 20.0;
const PLATFORM_WIDTH: f64 = 160.0;
const PLATFORM_HEIGHT: f64 = 18.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    Collectible,
    Obstacle,
    PowerUp,
}

/// Independent tick counters for each spawn schedule.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Spawner {
    item_timer: u64,
    trampoline_timer: u64,
    platform_timer: u64,
}

impl Spawner {
    /// Advance all timers by one tick and return whatever is due. Items are
    /// held back while `live_items` is at the cap.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        cfg: &SpawnConfig,
        view: &Viewport,
        live_items: usize,
        rng: &mut R,
    ) -> Vec<Entity> {
        let mut due = Vec::new();

        self.item_timer += 1;
        if self.item_timer % cfg.item_interval == 0 && live_items < cfg.max_live_items {
            due.push(spawn_item(cfg, view, roll_kind(cfg, rng), rng));
        }

        self.trampoline_timer += 1;
        if self.trampoline_timer % cfg.trampoline_interval == 0 {
            due.push(spawn_trampoline(view, rng));
        }

        self.platform_timer += 1;
        if self.platform_timer % cfg.platform_interval == 0 {
            due.push(spawn_platform(view, rng));
        }

        due
    }
}

/// Weighted category draw: collectibles are the common case, power-ups rare.
pub fn roll_kind<R: Rng + ?Sized>(cfg: &SpawnConfig, rng: &mut R) -> ItemKind {
    let total = cfg.collectible_weight + cfg.obstacle_weight + cfg.power_up_weight;
    let roll = rng.gen_range(0..total.max(1));
    if roll < cfg.collectible_weight {
        ItemKind::Collectible
    } else if roll < cfg.collectible_weight + cfg.obstacle_weight {
        ItemKind::Obstacle
    } else {
        ItemKind::PowerUp
    }
}

fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if hi > lo { rng.gen_range(lo..=hi) } else { lo.min(hi) }
}

pub fn spawn_item<R: Rng + ?Sized>(
    cfg: &SpawnConfig,
    view: &Viewport,
    kind: ItemKind,
    rng: &mut R,
) -> Entity {
    let size = uniform(rng, cfg.min_size, cfg.max_size);
    let top = view.height * cfg.band_top_fraction;
    let y = uniform(rng, top, view.floor_line() - size);
    let item = Item {
        rect: Rect::new(view.width, y, size, size),
        speed: uniform(rng, cfg.min_item_speed, cfg.max_item_speed),
    };
    log::debug!("spawn {kind:?} at y={y:.0} size={size:.0}");
    match kind {
        ItemKind::Collectible => Entity::Collectible(item),
        ItemKind::Obstacle => Entity::Obstacle(item),
        ItemKind::PowerUp => Entity::PowerUp(item),
    }
}

pub fn spawn_trampoline<R: Rng + ?Sized>(view: &Viewport, rng: &mut R) -> Entity {
    let motion = Oscillation {
        amplitude: uniform(rng, 0.0, 25.0),
        wave_speed: uniform(rng, 1.5, 3.5),
        offset: uniform(rng, 0.0, TAU),
    };
    // Lowest point of the bob must stay on or above the floor line.
    let lift = uniform(rng, 0.0, 60.0);
    let rect = Rect::new(
        view.width,
        view.floor_line() - TRAMPOLINE_HEIGHT - motion.amplitude - lift,
        TRAMPOLINE_WIDTH,
        TRAMPOLINE_HEIGHT,
    );
    Entity::Trampoline(Pad::new(rect, Some(motion)))
}

pub fn spawn_platform<R: Rng + ?Sized>(view: &Viewport, rng: &mut R) -> Entity {
    let y = uniform(rng, view.height * 0.4, view.floor_line() - 140.0);
    let rect = Rect::new(view.width, y, PLATFORM_WIDTH, PLATFORM_HEIGHT);
    let motion = rng.gen_bool(0.5).then(|| Oscillation {
        amplitude: uniform(rng, 10.0, 40.0),
        wave_speed: uniform(rng, 1.0, 2.5),
        offset: uniform(rng, 0.0, TAU),
    });
    Entity::Platform(Pad::new(rect, motion))
}

/// The level-up item: large, mid-air, moving with the scroll.
pub fn spawn_boss_food<R: Rng + ?Sized>(cfg: &SpawnConfig, view: &Viewport, rng: &mut R) -> Item {
    let size = cfg.boss_size;
    let top = view.height * cfg.band_top_fraction;
    let y = uniform(rng, top, view.floor_line() - size);
    log::debug!("spawn boss food at y={y:.0}");
    Item { rect: Rect::new(view.width, y, size, size), speed: 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn view() -> Viewport {
        Viewport { width: 800.0, height: 600.0, floor_margin: 50.0 }
    }

    #[test]
    fn items_arrive_on_interval() {
        let cfg = SpawnConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut spawner = Spawner::default();
        for _ in 0..49 {
            assert!(spawner.tick(&cfg, &view(), 0, &mut rng).is_empty());
        }
        let due = spawner.tick(&cfg, &view(), 0, &mut rng);
        assert_eq!(due.len(), 1);
        assert!(due[0].is_item());
        assert_eq!(due[0].rect().x, 800.0);
    }

    #[test]
    fn cap_suppresses_items_but_not_pads() {
        let cfg = SpawnConfig::default();
        let mut rng = StdRng::seed_from_u64(2);
        let mut spawner = Spawner::default();
        let mut spawned = Vec::new();
        for _ in 0..200 {
            spawned.extend(spawner.tick(&cfg, &view(), cfg.max_live_items, &mut rng));
        }
        assert_eq!(spawned.len(), 1);
        assert!(matches!(spawned[0], Entity::Trampoline(_)));
    }

    #[test]
    fn items_stay_inside_band() {
        let cfg = SpawnConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let e = spawn_item(&cfg, &view(), ItemKind::Collectible, &mut rng);
            let r = e.rect();
            assert!(r.y >= 600.0 * cfg.band_top_fraction);
            assert!(r.bottom() <= 550.0 + 1e-9);
            assert!(r.width >= cfg.min_size && r.width <= cfg.max_size);
        }
    }

    #[test]
    fn weights_favour_collectibles() {
        let cfg = SpawnConfig::default();
        let mut rng = StdRng::seed_from_u64(4);
        let mut counts = [0u32; 3];
        for _ in 0..10_000 {
            match roll_kind(&cfg, &mut rng) {
                ItemKind::Collectible => counts[0] += 1,
                ItemKind::Obstacle => counts[1] += 1,
                ItemKind::PowerUp => counts[2] += 1,
            }
        }
        assert!(counts[0] > counts[1] && counts[1] > counts[2]);
        assert!(counts[2] > 0);
    }
}
