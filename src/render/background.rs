//! Decorative backdrops. A background only ever reads the viewport and scroll
//! offset; it never sees or changes game state.

use std::f64::consts::TAU;

use rand::{Rng, RngCore};
use web_sys::CanvasRenderingContext2d;

use crate::config::BackgroundStyle;
use crate::error::Result;

const DEFAULT_BASE: &str = "#f0f8ff";

pub trait BackgroundRenderer {
    /// New look for a new level.
    fn regenerate(&mut self, width: f64, height: f64, rng: &mut dyn RngCore);

    /// Back to the first-level look after a restart.
    fn reset(&mut self, width: f64, height: f64, rng: &mut dyn RngCore) {
        self.regenerate(width, height, rng);
    }

    fn draw(
        &self,
        ctx: &CanvasRenderingContext2d,
        width: f64,
        height: f64,
        scroll_x: f64,
    ) -> Result<()>;
}

/// Build the configured backdrop in its first-level look.
pub fn build_background(
    style: BackgroundStyle,
    width: f64,
    height: f64,
    rng: &mut dyn RngCore,
) -> Box<dyn BackgroundRenderer> {
    let mut background: Box<dyn BackgroundRenderer> = match style {
        BackgroundStyle::SaulBass => Box::new(SaulBassBackground::default()),
        BackgroundStyle::Plain => Box::new(PlainBackground::default()),
    };
    background.reset(width, height, rng);
    background
}

pub fn random_hex_color<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("#{:06x}", rng.gen_range(0..0x0100_0000u32))
}

// --- Saul Bass shapes --------------------------------------------------------

pub static SAUL_BASS_PALETTES: [[&str; 5]; 5] = [
    ["#e63946", "#f1faee", "#a8dadc", "#457b9d", "#1d3557"],
    ["#ff6f61", "#6b4226", "#ffe156", "#6a0572", "#ab83a1"],
    ["#ef476f", "#ffd166", "#06d6a0", "#118ab2", "#073b4c"],
    ["#e07a5f", "#3d405b", "#81b29a", "#f2cc8f", "#f4f1de"],
    ["#d62828", "#f77f00", "#fcbf49", "#eae2b7", "#003049"],
];

const SHAPE_COUNT: usize = 15;
// Shapes drift at a fraction of the scroll speed.
const PARALLAX: f64 = 0.15;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Triangle,
    Circle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub color: &'static str,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub rotation: f64,
}

/// Flat base colour scattered with bold triangles and circles from one palette.
#[derive(Clone, Debug)]
pub struct SaulBassBackground {
    pub base: String,
    pub palette: usize,
    pub shapes: Vec<Shape>,
}

impl Default for SaulBassBackground {
    fn default() -> Self {
        Self { base: DEFAULT_BASE.to_string(), palette: 0, shapes: Vec::new() }
    }
}

impl SaulBassBackground {
    fn scatter(&mut self, width: f64, height: f64, rng: &mut dyn RngCore) {
        self.palette = rng.gen_range(0..SAUL_BASS_PALETTES.len());
        let palette = &SAUL_BASS_PALETTES[self.palette];
        self.shapes = (0..SHAPE_COUNT)
            .map(|_| Shape {
                kind: if rng.gen_bool(0.5) { ShapeKind::Triangle } else { ShapeKind::Circle },
                color: palette[rng.gen_range(0..palette.len())],
                x: rng.gen_range(0.0..width.max(1.0)),
                y: rng.gen_range(0.0..height.max(1.0)),
                size: rng.gen_range(50.0..150.0),
                rotation: rng.gen_range(0.0..TAU),
            })
            .collect();
    }
}

impl BackgroundRenderer for SaulBassBackground {
    fn regenerate(&mut self, width: f64, height: f64, rng: &mut dyn RngCore) {
        self.base = random_hex_color(rng);
        self.scatter(width, height, rng);
    }

    fn reset(&mut self, width: f64, height: f64, rng: &mut dyn RngCore) {
        self.base = DEFAULT_BASE.to_string();
        self.scatter(width, height, rng);
    }

    fn draw(
        &self,
        ctx: &CanvasRenderingContext2d,
        width: f64,
        height: f64,
        scroll_x: f64,
    ) -> Result<()> {
        ctx.set_fill_style_str(&self.base);
        ctx.fill_rect(0.0, 0.0, width, height);

        for shape in &self.shapes {
            let x = (shape.x + scroll_x * PARALLAX).rem_euclid(width.max(1.0));
            let half = shape.size / 2.0;
            ctx.save();
            ctx.translate(x, shape.y)?;
            ctx.rotate(shape.rotation)?;
            ctx.set_fill_style_str(shape.color);
            ctx.begin_path();
            match shape.kind {
                ShapeKind::Triangle => {
                    ctx.move_to(0.0, -half);
                    ctx.line_to(-half, half);
                    ctx.line_to(half, half);
                    ctx.close_path();
                }
                ShapeKind::Circle => ctx.arc(0.0, 0.0, half, 0.0, TAU)?,
            }
            ctx.fill();
            ctx.restore();
        }
        Ok(())
    }
}

// --- Plain -------------------------------------------------------------------

const PLAIN_COLORS: &[&str] = &["#f0f8ff", "#fff4e6", "#eef9f0", "#f3efff", "#fffbe0"];

/// One soft colour per level with a scrolling horizon stripe.
#[derive(Clone, Debug, Default)]
pub struct PlainBackground {
    pub color_index: usize,
}

impl BackgroundRenderer for PlainBackground {
    fn regenerate(&mut self, _width: f64, _height: f64, rng: &mut dyn RngCore) {
        let step = rng.gen_range(1..PLAIN_COLORS.len());
        self.color_index = (self.color_index + step) % PLAIN_COLORS.len();
    }

    fn reset(&mut self, _width: f64, _height: f64, _rng: &mut dyn RngCore) {
        self.color_index = 0;
    }

    fn draw(
        &self,
        ctx: &CanvasRenderingContext2d,
        width: f64,
        height: f64,
        scroll_x: f64,
    ) -> Result<()> {
        ctx.set_fill_style_str(PLAIN_COLORS[self.color_index]);
        ctx.fill_rect(0.0, 0.0, width, height);
        ctx.set_fill_style_str("rgba(0,0,0,0.05)");
        let stripe = 120.0;
        let mut x = scroll_x.rem_euclid(stripe) - stripe;
        while x < width {
            ctx.fill_rect(x, height * 0.6, stripe / 2.0, 6.0);
            x += stripe;
        }
        Ok(())
    }
}
