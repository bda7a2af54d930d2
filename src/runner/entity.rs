// Entities that scroll through the scene: items the player touches and the
// springy surfaces it can land on.

/// Axis-aligned rectangle in canvas pixels (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
    pub fn right(&self) -> f64 {
        self.x + self.width
    }
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
    /// True once the whole rectangle has scrolled past the left viewport edge.
    pub fn is_off_screen(&self) -> bool {
        self.right() <= 0.0
    }
    pub fn spans_x(&self, other: &Rect) -> bool {
        self.x < other.right() && self.right() > other.x
    }
}

/// Standard AABB overlap test. Symmetric in its arguments; touching edges do
/// not count as overlap.
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

/// A pickup or hazard travelling left at its own speed plus a share of the
/// scroll speed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Item {
    pub rect: Rect,
    pub speed: f64,
}

/// Sinusoidal vertical bob: `base_y + sin(t * wave_speed + offset) * amplitude`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Oscillation {
    pub amplitude: f64,
    pub wave_speed: f64,
    pub offset: f64,
}

impl Oscillation {
    pub fn displacement(&self, now_secs: f64) -> f64 {
        (now_secs * self.wave_speed + self.offset).sin() * self.amplitude
    }
}

/// Landing surface that scrolls with the background.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pad {
    pub rect: Rect,
    pub base_y: f64,
    pub motion: Option<Oscillation>,
}

impl Pad {
    pub fn new(rect: Rect, motion: Option<Oscillation>) -> Self {
        Self { base_y: rect.y, rect, motion }
    }

    pub fn advance(&mut self, scroll: f64, now_secs: f64) {
        self.rect.x -= scroll;
        if let Some(m) = &self.motion {
            self.rect.y = self.base_y + m.displacement(now_secs);
        }
    }
}

/// Every live thing in the scene besides the player and the boss food.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Entity {
    Collectible(Item),
    Obstacle(Item),
    PowerUp(Item),
    Trampoline(Pad),
    Platform(Pad),
}

impl Entity {
    pub fn rect(&self) -> &Rect {
        match self {
            Entity::Collectible(i) | Entity::Obstacle(i) | Entity::PowerUp(i) => &i.rect,
            Entity::Trampoline(p) | Entity::Platform(p) => &p.rect,
        }
    }

    pub fn is_item(&self) -> bool {
        matches!(self, Entity::Collectible(_) | Entity::Obstacle(_) | Entity::PowerUp(_))
    }

    pub fn is_pad(&self) -> bool {
        !self.is_item()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_requires_all_four_conditions() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(intersects(&a, &Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!intersects(&a, &Rect::new(10.0, 0.0, 5.0, 5.0))); // touching edge
        assert!(!intersects(&a, &Rect::new(0.0, 20.0, 5.0, 5.0)));
        assert!(intersects(&a, &Rect::new(2.0, 2.0, 1.0, 1.0))); // contained
    }

    #[test]
    fn pad_oscillates_around_base() {
        let mut pad = Pad::new(
            Rect::new(100.0, 400.0, 80.0, 20.0),
            Some(Oscillation { amplitude: 10.0, wave_speed: 1.0, offset: 0.0 }),
        );
        pad.advance(6.0, std::f64::consts::FRAC_PI_2);
        assert!((pad.rect.x - 94.0).abs() < 1e-9);
        assert!((pad.rect.y - 410.0).abs() < 1e-9);
        assert!((pad.base_y - 400.0).abs() < 1e-9);
    }

    #[test]
    fn off_screen_only_after_right_edge_passes_zero() {
        assert!(!Rect::new(-10.0, 0.0, 20.0, 5.0).is_off_screen());
        assert!(Rect::new(-30.0, 0.0, 20.0, 5.0).is_off_screen());
        assert!(Rect::new(-20.0, 0.0, 20.0, 5.0).is_off_screen());
    }
}
