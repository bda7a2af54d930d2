//! Tuning knobs for a run. Everything the simulation reads lives here so a page
//! can override values with a JSON blob passed to `start_game_with_config`.

use serde::Deserialize;

use crate::error::{GameError, Result};

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub viewport: ViewportConfig,
    pub physics: PhysicsConfig,
    pub spawn: SpawnConfig,
    pub scoring: ScoringConfig,
    pub buffs: BuffConfig,
    /// Static JSON array of motivational lines fetched at startup.
    pub quotes_url: String,
    /// localStorage key holding the high score.
    pub storage_key: String,
    pub background: BackgroundStyle,
}

/// Which backdrop the renderer paints behind the run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundStyle {
    #[default]
    SaulBass,
    Plain,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f64,
    pub height: f64,
    /// Distance from the bottom edge to the ground.
    pub floor_margin: f64,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f64,
    /// Negative: up is -y on the canvas.
    pub jump_power: f64,
    pub max_jumps: u32,
    /// Extra impulse per jump already taken (`1 + jump_count * scale`).
    pub multi_jump_scale: f64,
    pub trampoline_boost: f64,
    pub player_x: f64,
    pub player_size: f64,
    pub scroll_speed: f64,
    pub min_speed: f64,
    /// Run-cycle speed; accumulated into the frame counter each rendered frame.
    pub anim_speed: f64,
    pub frame_speed: f64,
    pub min_frame_speed: f64,
    pub run_frames: usize,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub item_interval: u64,
    pub trampoline_interval: u64,
    pub platform_interval: u64,
    pub max_live_items: usize,
    pub collectible_weight: u32,
    pub obstacle_weight: u32,
    pub power_up_weight: u32,
    pub min_size: f64,
    pub max_size: f64,
    pub min_item_speed: f64,
    pub max_item_speed: f64,
    /// Top of the spawn band as a fraction of the viewport height.
    pub band_top_fraction: f64,
    pub boss_size: f64,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub base_points: u32,
    pub rainbow_points: u32,
    pub speed_boost_multiplier: u32,
    pub combo_bonus_every: u32,
    pub combo_bonus: u32,
    pub rainbow_threshold: u32,
    pub obstacle_penalty: u32,
    pub speed_step: f64,
    pub speed_penalty: f64,
    /// Passive +1 every this many ticks.
    pub survival_interval: u64,
    pub level_score_step: u32,
    pub banner_ticks: u32,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct BuffConfig {
    pub rainbow_ticks: u32,
    pub magnet_ticks: u32,
    pub speed_boost_ticks: u32,
    pub magnet_radius: f64,
    pub magnet_pull: f64,
    pub rainbow_time_scale: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport: ViewportConfig::default(),
            physics: PhysicsConfig::default(),
            spawn: SpawnConfig::default(),
            scoring: ScoringConfig::default(),
            buffs: BuffConfig::default(),
            quotes_url: "quotes.json".to_string(),
            storage_key: "chardRunnerHighScore".to_string(),
            background: BackgroundStyle::default(),
        }
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self { width: 800.0, height: 600.0, floor_margin: 50.0 }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 1.2,
            jump_power: -18.0,
            max_jumps: 2,
            multi_jump_scale: 0.2,
            trampoline_boost: 1.5,
            player_x: 80.0,
            player_size: 64.0,
            scroll_speed: 6.0,
            min_speed: 3.0,
            anim_speed: 2.5,
            frame_speed: 12.0,
            min_frame_speed: 4.0,
            run_frames: 4,
        }
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            item_interval: 50,
            trampoline_interval: 200,
            platform_interval: 320,
            max_live_items: 50,
            collectible_weight: 70,
            obstacle_weight: 22,
            power_up_weight: 8,
            min_size: 36.0,
            max_size: 60.0,
            min_item_speed: 2.0,
            max_item_speed: 4.0,
            band_top_fraction: 0.35,
            boss_size: 96.0,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_points: 10,
            rainbow_points: 25,
            speed_boost_multiplier: 2,
            combo_bonus_every: 5,
            combo_bonus: 50,
            rainbow_threshold: 10,
            obstacle_penalty: 20,
            speed_step: 0.05,
            speed_penalty: 1.0,
            survival_interval: 60,
            level_score_step: 100,
            banner_ticks: 120,
        }
    }
}

impl Default for BuffConfig {
    fn default() -> Self {
        Self {
            rainbow_ticks: 300,
            magnet_ticks: 360,
            speed_boost_ticks: 300,
            magnet_radius: 220.0,
            magnet_pull: 3.0,
            rainbow_time_scale: 0.5,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON override; missing fields keep defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: GameConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn floor_line(&self) -> f64 {
        self.viewport.height - self.viewport.floor_margin
    }

    pub fn validate(&self) -> Result<()> {
        let v = &self.viewport;
        if v.width <= 0.0 || v.height <= 0.0 {
            return Err(GameError::Config("viewport must have a positive size".into()));
        }
        if v.floor_margin < 0.0 || v.floor_margin >= v.height {
            return Err(GameError::Config("floor_margin must lie inside the viewport".into()));
        }
        let p = &self.physics;
        if p.max_jumps == 0 {
            return Err(GameError::Config("max_jumps must be at least 1".into()));
        }
        if p.jump_power >= 0.0 {
            return Err(GameError::Config("jump_power must be negative (up is -y)".into()));
        }
        if p.player_size <= 0.0 || p.run_frames == 0 {
            return Err(GameError::Config("player_size and run_frames must be positive".into()));
        }
        if p.min_speed > p.scroll_speed {
            return Err(GameError::Config(format!(
                "min_speed {} exceeds starting scroll_speed {}",
                p.min_speed, p.scroll_speed
            )));
        }
        let s = &self.spawn;
        if s.item_interval == 0 || s.trampoline_interval == 0 || s.platform_interval == 0 {
            return Err(GameError::Config("spawn intervals must be non-zero".into()));
        }
        if s.min_size <= 0.0 || s.min_size > s.max_size {
            return Err(GameError::Config(format!(
                "invalid item size range {}..{}",
                s.min_size, s.max_size
            )));
        }
        if s.min_item_speed > s.max_item_speed {
            return Err(GameError::Config(format!(
                "invalid item speed range {}..{}",
                s.min_item_speed, s.max_item_speed
            )));
        }
        match s
            .collectible_weight
            .checked_add(s.obstacle_weight)
            .and_then(|w| w.checked_add(s.power_up_weight))
        {
            Some(0) => return Err(GameError::Config("spawn weights sum to zero".into())),
            None => return Err(GameError::Config("spawn weights overflow".into())),
            Some(_) => {}
        }
        if !(0.0..1.0).contains(&s.band_top_fraction) {
            return Err(GameError::Config("band_top_fraction must be in [0, 1)".into()));
        }
        let sc = &self.scoring;
        if sc.survival_interval == 0 || sc.combo_bonus_every == 0 || sc.level_score_step == 0 {
            return Err(GameError::Config("scoring intervals must be non-zero".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        GameConfig::default().validate().unwrap();
        assert!((GameConfig::default().floor_line() - 550.0).abs() < 1e-9);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = GameConfig::from_json(r#"{"physics": {"max_jumps": 3}}"#).unwrap();
        assert_eq!(cfg.physics.max_jumps, 3);
        assert!((cfg.physics.gravity - 1.2).abs() < 1e-9);
        assert_eq!(cfg.spawn.item_interval, 50);
    }

    #[test]
    fn background_style_from_json() {
        assert_eq!(GameConfig::default().background, BackgroundStyle::SaulBass);
        let cfg = GameConfig::from_json(r#"{"background": "plain"}"#).unwrap();
        assert_eq!(cfg.background, BackgroundStyle::Plain);
        assert!(GameConfig::from_json(r#"{"background": "neon"}"#).is_err());
    }

    #[test]
    fn rejects_inverted_size_range() {
        let err = GameConfig::from_json(r#"{"spawn": {"min_size": 80, "max_size": 20}}"#)
            .unwrap_err();
        assert!(matches!(err, GameError::Config(_)));
    }

    #[test]
    fn rejects_overflowing_spawn_weights() {
        let err = GameConfig::from_json(
            r#"{"spawn": {"collectible_weight": 4294967295, "obstacle_weight": 1}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, GameError::Config(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = GameConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, GameError::ConfigParse(_)));
    }
}
