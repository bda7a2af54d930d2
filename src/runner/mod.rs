//! Runner simulation: one `GameState` advanced a tick at a time.
//!
//! Nothing in here touches the DOM. The browser shell (`crate::web`) owns a
//! `GameState`, feeds it activations and frame timestamps, and reacts to the
//! `GameEvent`s each call returns (persisting high scores, regenerating the
//! background, logging). Randomness is always injected so a seeded RNG gives
//! reproducible runs.

use rand::Rng;

use crate::config::{GameConfig, ViewportConfig};

pub mod buffs;
pub mod entity;
pub mod player;
pub mod quotes;
pub mod spawner;

pub use buffs::{BuffKind, Buffs};
pub use entity::{Entity, Item, Oscillation, Pad, Rect, intersects};
pub use player::{Player, Pose};
pub use quotes::QuoteBook;
pub use spawner::Spawner;

/// Share of the scroll speed added to every item's own speed.
const ITEM_SCROLL_SHARE: f64 = 0.3;
const FRAME_SPEED_STEP: f64 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub floor_margin: f64,
}

impl Viewport {
    pub fn floor_line(&self) -> f64 {
        self.height - self.floor_margin
    }
}

impl From<&ViewportConfig> for Viewport {
    fn from(v: &ViewportConfig) -> Self {
        Self { width: v.width, height: v.height, floor_margin: v.floor_margin }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Running,
    GameOver,
}

/// Things that happened during a call, for the shell to react to.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    Started,
    Restarted,
    Jumped { jump_count: u32 },
    Bounced,
    Collected { points: u32, combo: u32 },
    ComboBonus { combo: u32, bonus: u32 },
    BuffGranted(BuffKind),
    BuffExpired(BuffKind),
    ObstacleHit { penalty: u32, speed: f64 },
    LevelUp { level: u32 },
    NewHighScore(u32),
    GameOver { score: u32 },
}

/// Motivational line on screen and how many ticks it has left.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Banner {
    pub text: String,
    pub ticks: u32,
}

pub struct GameState {
    pub config: GameConfig,
    pub viewport: Viewport,
    pub phase: Phase,
    pub player: Player,
    pub entities: Vec<Entity>,
    pub boss_food: Option<Item>,
    pub spawner: Spawner,
    pub buffs: Buffs,
    pub combo: u32,
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    pub scroll_speed: f64,
    pub anim_speed: f64,
    pub background_x: f64,
    /// Ticks since the run started; drives the passive score.
    pub ticks: u64,
    pub banner: Option<Banner>,
    pub quotes: QuoteBook,
    pub start_line: &'static str,
}

impl GameState {
    pub fn new<R: Rng + ?Sized>(config: GameConfig, high_score: u32, rng: &mut R) -> Self {
        let viewport = Viewport::from(&config.viewport);
        let player = Player::new(&config.physics, viewport.floor_line());
        let scroll_speed = config.physics.scroll_speed;
        let anim_speed = config.physics.anim_speed;
        Self {
            config,
            viewport,
            phase: Phase::NotStarted,
            player,
            entities: Vec::new(),
            boss_food: None,
            spawner: Spawner::default(),
            buffs: Buffs::default(),
            combo: 0,
            score: 0,
            high_score,
            level: 1,
            scroll_speed,
            anim_speed,
            background_x: 0.0,
            ticks: 0,
            banner: None,
            quotes: QuoteBook::default(),
            start_line: quotes::random_start_line(rng),
        }
    }

    pub fn floor_line(&self) -> f64 {
        self.viewport.floor_line()
    }

    /// The single input action: start, jump or restart depending on phase.
    pub fn activate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<GameEvent> {
        match self.phase {
            Phase::NotStarted => {
                self.phase = Phase::Running;
                Some(GameEvent::Started)
            }
            Phase::Running => self.jump().then_some(GameEvent::Jumped {
                jump_count: self.player.jump_count,
            }),
            Phase::GameOver => {
                self.restart(rng);
                Some(GameEvent::Restarted)
            }
        }
    }

    /// Jump if running and jumps remain.
    pub fn jump(&mut self) -> bool {
        self.phase == Phase::Running && self.player.jump(&self.config.physics)
    }

    /// Explicit end of a run. No-op unless running.
    pub fn end(&mut self) -> Option<GameEvent> {
        if self.phase != Phase::Running {
            return None;
        }
        self.phase = Phase::GameOver;
        self.high_score = self.high_score.max(self.score);
        Some(GameEvent::GameOver { score: self.score })
    }

    /// Reset every per-run field and return to the start screen. The high
    /// score and the loaded quotes survive.
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let physics = &self.config.physics;
        self.player.reset(physics, self.viewport.floor_line());
        self.scroll_speed = physics.scroll_speed;
        self.anim_speed = physics.anim_speed;
        self.entities.clear();
        self.boss_food = None;
        self.spawner = Spawner::default();
        self.buffs.clear();
        self.combo = 0;
        self.score = 0;
        self.level = 1;
        self.background_x = 0.0;
        self.ticks = 0;
        self.banner = None;
        self.start_line = quotes::random_start_line(rng);
        self.phase = Phase::NotStarted;
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport.width = width;
        self.viewport.height = height;
        let floor = self.viewport.floor_line();
        if self.phase == Phase::NotStarted || self.player.rect.bottom() > floor {
            self.player.rect.y = floor - self.player.rect.height;
            self.player.vy = 0.0;
            self.player.jump_count = 0;
        }
    }

    /// Advance one tick. `now_secs` is wall-clock time driving pad
    /// oscillation. No-op unless running.
    pub fn update<R: Rng + ?Sized>(&mut self, now_secs: f64, rng: &mut R) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.phase != Phase::Running {
            return events;
        }

        self.background_x -= self.scroll_speed;
        if self.background_x <= -self.viewport.width {
            self.background_x = 0.0;
        }

        self.player
            .apply_gravity(self.config.physics.gravity, self.viewport.floor_line());
        self.resolve_landings(&mut events);
        self.move_entities(now_secs);
        self.update_boss_food(&mut events);

        self.resolve_collisions(rng, &mut events);
        if self.phase == Phase::GameOver {
            return events;
        }
        self.entities.retain(|e| !e.rect().is_off_screen());

        let live_items = self.entities.iter().filter(|e| e.is_item()).count();
        let due = self
            .spawner
            .tick(&self.config.spawn, &self.viewport, live_items, rng);
        self.entities.extend(due);
        if self.boss_food.is_none()
            && self.score >= self.level * self.config.scoring.level_score_step
        {
            self.boss_food = Some(spawner::spawn_boss_food(&self.config.spawn, &self.viewport, rng));
        }

        events.extend(self.buffs.tick().into_iter().map(GameEvent::BuffExpired));

        self.ticks += 1;
        if self.ticks % self.config.scoring.survival_interval == 0 {
            self.score += 1;
            self.record_score(&mut events);
        }

        if let Some(banner) = &mut self.banner {
            banner.ticks = banner.ticks.saturating_sub(1);
            if banner.ticks == 0 {
                self.banner = None;
            }
        }

        events
    }

    fn resolve_landings(&mut self, events: &mut Vec<GameEvent>) {
        let boost = self.config.physics.jump_power * self.config.physics.trampoline_boost;
        for entity in &self.entities {
            match entity {
                Entity::Trampoline(pad) if self.player.is_landing_on(&pad.rect) => {
                    self.player.bounce_off(&pad.rect, boost);
                    events.push(GameEvent::Bounced);
                    return;
                }
                Entity::Platform(pad) if self.player.is_landing_on(&pad.rect) => {
                    self.player.land_on(&pad.rect);
                    return;
                }
                _ => {}
            }
        }
    }

    fn move_entities(&mut self, now_secs: f64) {
        let buffs = &self.config.buffs;
        let time_scale = if self.buffs.is_active(BuffKind::Rainbow) {
            buffs.rainbow_time_scale
        } else {
            1.0
        };
        let magnet = self.buffs.is_active(BuffKind::Magnet);
        let player = self.player.rect;
        let scroll = self.scroll_speed;

        for entity in &mut self.entities {
            match entity {
                Entity::Collectible(item) | Entity::Obstacle(item) | Entity::PowerUp(item) => {
                    item.rect.x -= (item.speed + scroll * ITEM_SCROLL_SHARE) * time_scale;
                }
                Entity::Trampoline(pad) | Entity::Platform(pad) => pad.advance(scroll, now_secs),
            }
            if let Entity::Collectible(item) = entity {
                if magnet && (item.rect.x - player.x).abs() <= buffs.magnet_radius {
                    let dy = player.center_y() - item.rect.center_y();
                    item.rect.y += dy.clamp(-buffs.magnet_pull, buffs.magnet_pull);
                }
            }
        }
    }

    fn update_boss_food(&mut self, events: &mut Vec<GameEvent>) {
        let Some(boss) = &mut self.boss_food else {
            return;
        };
        boss.rect.x -= self.scroll_speed;
        if intersects(&self.player.rect, &boss.rect) {
            self.boss_food = None;
            self.level += 1;
            let physics = &self.config.physics;
            if self.player.frame_speed > physics.min_frame_speed {
                self.player.frame_speed =
                    (self.player.frame_speed - FRAME_SPEED_STEP).max(physics.min_frame_speed);
            }
            log::info!("level up -> {}", self.level);
            events.push(GameEvent::LevelUp { level: self.level });
        } else if boss.rect.is_off_screen() {
            self.boss_food = None;
        }
    }

    /// Items touched this tick, newest first. Removals are marked and the list
    /// compacted once at the end.
    fn resolve_collisions<R: Rng + ?Sized>(&mut self, rng: &mut R, events: &mut Vec<GameEvent>) {
        let mut consumed = vec![false; self.entities.len()];
        for idx in (0..self.entities.len()).rev() {
            let entity = self.entities[idx];
            if !entity.is_item() || !intersects(&self.player.rect, entity.rect()) {
                continue;
            }
            consumed[idx] = true;
            match entity {
                Entity::Collectible(_) => self.collect(rng, events),
                Entity::Obstacle(_) => {
                    self.hit_obstacle(events);
                    if self.phase == Phase::GameOver {
                        break;
                    }
                }
                Entity::PowerUp(_) => {
                    let (kind, ticks) = if rng.gen_bool(0.5) {
                        (BuffKind::Magnet, self.config.buffs.magnet_ticks)
                    } else {
                        (BuffKind::SpeedBoost, self.config.buffs.speed_boost_ticks)
                    };
                    self.buffs.grant(kind, ticks);
                    events.push(GameEvent::BuffGranted(kind));
                }
                Entity::Trampoline(_) | Entity::Platform(_) => {}
            }
        }
        let mut flags = consumed.into_iter();
        self.entities.retain(|_| !flags.next().unwrap_or(false));
    }

    fn collect<R: Rng + ?Sized>(&mut self, rng: &mut R, events: &mut Vec<GameEvent>) {
        let scoring = &self.config.scoring;
        self.combo += 1;

        let mut points = if self.buffs.is_active(BuffKind::Rainbow) {
            scoring.rainbow_points
        } else {
            scoring.base_points
        };
        if self.buffs.is_active(BuffKind::SpeedBoost) {
            points *= scoring.speed_boost_multiplier;
        }
        self.score += points;
        events.push(GameEvent::Collected { points, combo: self.combo });

        if self.combo % scoring.combo_bonus_every == 0 {
            self.score += scoring.combo_bonus;
            events.push(GameEvent::ComboBonus { combo: self.combo, bonus: scoring.combo_bonus });
        }
        // Only the pickup that reaches the threshold; an obstacle hit re-arms it.
        if self.combo == scoring.rainbow_threshold {
            self.buffs.grant(BuffKind::Rainbow, self.config.buffs.rainbow_ticks);
            events.push(GameEvent::BuffGranted(BuffKind::Rainbow));
        }

        self.scroll_speed += scoring.speed_step;
        self.anim_speed += scoring.speed_step;
        self.banner = Some(Banner {
            text: self.quotes.pick(rng).to_string(),
            ticks: scoring.banner_ticks,
        });
        self.record_score(events);
    }

    fn hit_obstacle(&mut self, events: &mut Vec<GameEvent>) {
        let scoring = &self.config.scoring;
        self.combo = 0;
        self.buffs.clear();
        self.score = self.score.saturating_sub(scoring.obstacle_penalty);
        self.scroll_speed -= scoring.speed_penalty;
        self.anim_speed = (self.anim_speed - scoring.speed_penalty).max(0.0);
        events.push(GameEvent::ObstacleHit {
            penalty: scoring.obstacle_penalty,
            speed: self.scroll_speed,
        });
        if self.scroll_speed < self.config.physics.min_speed {
            events.extend(self.end());
        }
    }

    fn record_score(&mut self, events: &mut Vec<GameEvent>) {
        if self.score > self.high_score {
            self.high_score = self.score;
            events.push(GameEvent::NewHighScore(self.high_score));
        }
    }
}
