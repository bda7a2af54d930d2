use crate::config::PhysicsConfig;

use super::entity::Rect;

/// Sprite selection for the current frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pose {
    Rising,
    Falling,
    Running(usize),
}

/// The runner. `x` never changes; `y` is driven by gravity and jumps.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
    pub vy: f64,
    pub jump_count: u32,
    // Run-cycle bookkeeping (advanced by the renderer)
    pub frame_index: usize,
    pub frame_counter: f64,
    pub frame_speed: f64,
}

impl Player {
    /// A player standing on the floor line.
    pub fn new(physics: &PhysicsConfig, floor_line: f64) -> Self {
        let size = physics.player_size;
        Self {
            rect: Rect::new(physics.player_x, floor_line - size, size, size),
            vy: 0.0,
            jump_count: 0,
            frame_index: 0,
            frame_counter: 0.0,
            frame_speed: physics.frame_speed,
        }
    }

    /// Integrate one tick of gravity. Returns true when the floor clamped the
    /// player (which also resets the jump count).
    pub fn apply_gravity(&mut self, gravity: f64, floor_line: f64) -> bool {
        self.vy += gravity;
        self.rect.y += self.vy;
        if self.rect.bottom() > floor_line {
            self.rect.y = floor_line - self.rect.height;
            self.vy = 0.0;
            self.jump_count = 0;
            return true;
        }
        false
    }

    /// Impulse jump; later jumps of a multi-jump are scaled up by
    /// `1 + jump_count * multi_jump_scale`. Returns false once out of jumps.
    pub fn jump(&mut self, physics: &PhysicsConfig) -> bool {
        if self.jump_count >= physics.max_jumps {
            return false;
        }
        self.vy = physics.jump_power * (1.0 + self.jump_count as f64 * physics.multi_jump_scale);
        self.jump_count += 1;
        true
    }

    /// Falling player whose feet crossed `surface.y` during this tick while
    /// horizontally over it.
    pub fn is_landing_on(&self, surface: &Rect) -> bool {
        if self.vy <= 0.0 || !self.rect.spans_x(surface) {
            return false;
        }
        let bottom = self.rect.bottom();
        let previous_bottom = bottom - self.vy;
        previous_bottom <= surface.y + surface.height && bottom >= surface.y
    }

    /// Stand on top of `surface`.
    pub fn land_on(&mut self, surface: &Rect) {
        self.rect.y = surface.y - self.rect.height;
        self.vy = 0.0;
        self.jump_count = 0;
    }

    /// Launch off the top of `surface` with the given (negative) velocity.
    pub fn bounce_off(&mut self, surface: &Rect, velocity: f64) {
        self.rect.y = surface.y - self.rect.height;
        self.vy = velocity;
        self.jump_count = 0;
    }

    pub fn pose(&self) -> Pose {
        if self.vy < 0.0 {
            Pose::Rising
        } else if self.vy > 0.0 && self.jump_count > 0 {
            Pose::Falling
        } else {
            Pose::Running(self.frame_index)
        }
    }

    /// Advance the run cycle by `anim_speed` and return the pose to draw.
    /// Airborne poses leave the cycle untouched.
    pub fn advance_animation(&mut self, anim_speed: f64, run_frames: usize) -> Pose {
        if let Pose::Running(_) = self.pose() {
            self.frame_counter += anim_speed;
            if self.frame_counter >= self.frame_speed {
                self.frame_index = (self.frame_index + 1) % run_frames.max(1);
                self.frame_counter = 0.0;
            }
        }
        self.pose()
    }

    pub fn reset(&mut self, physics: &PhysicsConfig, floor_line: f64) {
        *self = Player::new(physics, floor_line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn physics() -> PhysicsConfig {
        PhysicsConfig::default()
    }

    #[test]
    fn gravity_clamps_to_floor() {
        let p = physics();
        let mut player = Player::new(&p, 550.0);
        player.rect.y = 480.0;
        player.vy = 10.0;
        player.jump_count = 2;
        assert!(player.apply_gravity(p.gravity, 550.0));
        assert!((player.rect.bottom() - 550.0).abs() < 1e-9);
        assert_eq!(player.vy, 0.0);
        assert_eq!(player.jump_count, 0);
    }

    #[test]
    fn airborne_gravity_accumulates() {
        let p = physics();
        let mut player = Player::new(&p, 550.0);
        player.rect.y = 100.0;
        assert!(!player.apply_gravity(1.2, 550.0));
        assert!(!player.apply_gravity(1.2, 550.0));
        assert!((player.vy - 2.4).abs() < 1e-9);
        assert!((player.rect.y - 103.6).abs() < 1e-9);
    }

    #[test]
    fn double_jump_scales_second_impulse() {
        let p = physics();
        let mut player = Player::new(&p, 550.0);
        assert!(player.jump(&p));
        assert!((player.vy + 18.0).abs() < 1e-9);
        assert!(player.jump(&p));
        assert!((player.vy + 21.6).abs() < 1e-9);
        assert!(!player.jump(&p));
        assert_eq!(player.jump_count, 2);
    }

    #[test]
    fn landing_requires_downward_motion_over_surface() {
        let p = physics();
        let mut player = Player::new(&p, 550.0);
        let pad = Rect::new(60.0, 400.0, 100.0, 20.0);
        player.rect.y = 400.0 - player.rect.height + 4.0;
        player.vy = 6.0;
        assert!(player.is_landing_on(&pad));
        player.vy = -6.0;
        assert!(!player.is_landing_on(&pad));
        player.vy = 6.0;
        let far = Rect::new(400.0, 400.0, 100.0, 20.0);
        assert!(!player.is_landing_on(&far));
    }

    #[test]
    fn run_cycle_waits_for_frame_speed() {
        let p = physics();
        let mut player = Player::new(&p, 550.0);
        for _ in 0..4 {
            assert_eq!(player.advance_animation(2.5, 4), Pose::Running(0));
        }
        // 5 * 2.5 = 12.5 >= 12
        assert_eq!(player.advance_animation(2.5, 4), Pose::Running(1));
        assert_eq!(player.frame_counter, 0.0);
    }

    #[test]
    fn pose_follows_velocity_and_jump_state() {
        let p = physics();
        let mut player = Player::new(&p, 550.0);
        player.vy = -3.0;
        assert_eq!(player.pose(), Pose::Rising);
        player.vy = 3.0;
        player.jump_count = 1;
        assert_eq!(player.pose(), Pose::Falling);
        player.jump_count = 0;
        assert_eq!(player.pose(), Pose::Running(0));
    }
}
