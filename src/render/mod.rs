//! Frame rendering onto a 2D canvas. Reads `GameState`; the only write is the
//! player's run-cycle bookkeeping.

use rand::RngCore;
use web_sys::CanvasRenderingContext2d;

use crate::error::Result;
use crate::runner::{BuffKind, Entity, GameState, Phase, Pose, Rect};

pub mod background;
pub mod sprites;

pub use background::{BackgroundRenderer, PlainBackground, SaulBassBackground, build_background};
pub use sprites::Sprites;

pub const VERSION_LABEL: &str = concat!("v", env!("CARGO_PKG_VERSION"));
const TICKS_PER_SECOND: u32 = 60;

/// HUD score lines, top-centre.
pub fn hud_lines(state: &GameState) -> [String; 3] {
    [
        format!("Health Score: {}", state.score),
        format!("High Score: {}", state.high_score),
        format!("Level: {}", state.level),
    ]
}

/// One banner per active buff, with whole seconds remaining (rounded up).
pub fn buff_banners(state: &GameState) -> Vec<String> {
    state
        .buffs
        .active()
        .map(|kind| {
            let secs = state.buffs.remaining(kind).div_ceil(TICKS_PER_SECOND);
            format!("{} {}s", kind.label(), secs)
        })
        .collect()
}

pub struct Renderer {
    ctx: CanvasRenderingContext2d,
    sprites: Sprites,
    background: Box<dyn BackgroundRenderer>,
}

impl Renderer {
    pub fn new(
        ctx: CanvasRenderingContext2d,
        sprites: Sprites,
        background: Box<dyn BackgroundRenderer>,
    ) -> Self {
        Self { ctx, sprites, background }
    }

    pub fn regenerate_background(&mut self, width: f64, height: f64, rng: &mut dyn RngCore) {
        self.background.regenerate(width, height, rng);
    }

    pub fn reset_background(&mut self, width: f64, height: f64, rng: &mut dyn RngCore) {
        self.background.reset(width, height, rng);
    }

    pub fn draw(&self, state: &mut GameState) -> Result<()> {
        let ctx = &self.ctx;
        let (w, h) = (state.viewport.width, state.viewport.height);
        ctx.clear_rect(0.0, 0.0, w, h);
        self.background.draw(ctx, w, h, state.background_x)?;
        self.draw_ground(state);

        ctx.set_fill_style_str("black");
        ctx.set_font("bold 16px sans-serif");
        ctx.set_text_align("left");
        ctx.fill_text(VERSION_LABEL, w - 80.0, h - 20.0)?;

        if state.phase == Phase::NotStarted {
            return self.draw_start_screen(state);
        }

        for entity in state.entities.iter().filter(|e| e.is_pad()) {
            let color = match entity {
                Entity::Trampoline(_) => "blue",
                _ => "#6b4226",
            };
            ctx.set_fill_style_str(color);
            let r = entity.rect();
            ctx.fill_rect(r.x, r.y, r.width, r.height);
        }

        self.draw_player(state)?;

        for entity in state.entities.iter().filter(|e| e.is_item()) {
            let (img, placeholder) = match entity {
                Entity::Collectible(_) => (self.sprites.collectible.as_ref(), "#2a9d8f"),
                Entity::Obstacle(_) => (self.sprites.obstacle.as_ref(), "#e63946"),
                Entity::PowerUp(_) => (self.sprites.power_up.as_ref(), "#ffd166"),
                Entity::Trampoline(_) | Entity::Platform(_) => continue,
            };
            sprites::draw_sprite(ctx, img, entity.rect(), placeholder)?;
        }
        if let Some(boss) = &state.boss_food {
            sprites::draw_sprite(ctx, self.sprites.boss.as_ref(), &boss.rect, "#6a0572")?;
        }

        self.draw_hud(state)?;

        if state.phase == Phase::GameOver {
            self.draw_game_over(state)?;
        }
        Ok(())
    }

    fn draw_ground(&self, state: &GameState) {
        let floor = state.floor_line();
        self.ctx.set_fill_style_str("rgba(0,0,0,0.18)");
        self.ctx.fill_rect(0.0, floor, state.viewport.width, state.viewport.height - floor);
    }

    fn draw_player(&self, state: &mut GameState) -> Result<()> {
        let run_frames = state.config.physics.run_frames;
        // Frozen on game over: no run-cycle advance.
        let pose = if state.phase == Phase::Running {
            state.player.advance_animation(state.anim_speed, run_frames)
        } else {
            state.player.pose()
        };
        let img = match pose {
            Pose::Rising => self.sprites.jump_mid.as_ref(),
            Pose::Falling => self.sprites.jump_fall.as_ref(),
            Pose::Running(i) => self.sprites.run_frame(i),
        };
        sprites::draw_sprite(&self.ctx, img, &state.player.rect, "#264653")
    }

    fn draw_hud(&self, state: &GameState) -> Result<()> {
        let ctx = &self.ctx;
        let w = state.viewport.width;
        ctx.set_fill_style_str("black");
        ctx.set_font("bold 24px sans-serif");
        ctx.set_text_align("center");
        for (i, line) in hud_lines(state).iter().enumerate() {
            ctx.fill_text(line, w / 2.0, 40.0 + 30.0 * i as f64)?;
        }

        ctx.set_font("bold 18px sans-serif");
        ctx.set_text_align("right");
        for (i, banner) in buff_banners(state).iter().enumerate() {
            ctx.fill_text(banner, w - 20.0, 40.0 + 24.0 * i as f64)?;
        }
        if state.combo > 1 {
            ctx.set_text_align("left");
            ctx.fill_text(&format!("Combo x{}", state.combo), 20.0, 40.0)?;
        }

        if let Some(banner) = &state.banner {
            ctx.set_font("bold 28px sans-serif");
            ctx.set_text_align("center");
            if state.buffs.is_active(BuffKind::Rainbow) {
                let grad = ctx.create_linear_gradient(w * 0.25, 0.0, w * 0.75, 0.0);
                for (stop, color) in [(0.0_f32, "red"), (0.33, "orange"), (0.66, "green"), (1.0, "purple")] {
                    grad.add_color_stop(stop, color)?;
                }
                ctx.set_fill_style_canvas_gradient(&grad);
            } else {
                ctx.set_fill_style_str("blue");
            }
            ctx.fill_text(&banner.text, w / 2.0, state.viewport.height / 2.0 - 100.0)?;
        }
        Ok(())
    }

    fn draw_start_screen(&self, state: &GameState) -> Result<()> {
        let ctx = &self.ctx;
        let (w, h) = (state.viewport.width, state.viewport.height);
        ctx.set_fill_style_str("black");
        ctx.set_font("bold 28px sans-serif");
        ctx.set_text_align("center");
        ctx.fill_text(state.start_line, w / 2.0, h / 2.0)?;

        let idle = Rect::new(w / 2.0 - 100.0, h - 300.0, 200.0, 200.0);
        sprites::draw_sprite(ctx, self.sprites.idle.as_ref(), &idle, "#264653")?;

        ctx.set_fill_style_str("darkgreen");
        ctx.set_font("bold 32px sans-serif");
        ctx.fill_text("Tap to Start", w / 2.0, h / 2.0 + 150.0)?;
        if state.high_score > 0 {
            ctx.set_font("bold 20px sans-serif");
            ctx.fill_text(&format!("Best: {}", state.high_score), w / 2.0, h / 2.0 + 190.0)?;
        }
        Ok(())
    }

    fn draw_game_over(&self, state: &GameState) -> Result<()> {
        let ctx = &self.ctx;
        let (w, h) = (state.viewport.width, state.viewport.height);
        ctx.set_fill_style_str("rgba(0,0,0,0.55)");
        ctx.fill_rect(0.0, 0.0, w, h);
        ctx.set_fill_style_str("white");
        ctx.set_text_align("center");
        ctx.set_font("bold 48px sans-serif");
        ctx.fill_text("Game Over", w / 2.0, h / 2.0 - 40.0)?;
        ctx.set_font("bold 24px sans-serif");
        ctx.fill_text(&format!("Score: {}", state.score), w / 2.0, h / 2.0 + 10.0)?;
        ctx.fill_text(&format!("High Score: {}", state.high_score), w / 2.0, h / 2.0 + 44.0)?;
        ctx.fill_text("Tap to restart", w / 2.0, h / 2.0 + 100.0)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn hud_reports_score_best_and_level() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = GameState::new(GameConfig::default(), 250, &mut rng);
        state.score = 40;
        state.level = 2;
        assert_eq!(
            hud_lines(&state),
            ["Health Score: 40".to_string(), "High Score: 250".to_string(), "Level: 2".to_string()]
        );
    }

    #[test]
    fn buff_banners_round_seconds_up() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = GameState::new(GameConfig::default(), 0, &mut rng);
        assert!(buff_banners(&state).is_empty());
        state.buffs.grant(BuffKind::Magnet, 61);
        state.buffs.grant(BuffKind::SpeedBoost, 60);
        assert_eq!(buff_banners(&state), vec!["MAGNET 2s".to_string(), "SPEED BOOST 1s".to_string()]);
    }
}
