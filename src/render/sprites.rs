// Sprite images. Loading is fire-and-forget: an image is drawn once the
// browser reports it complete, and a flat placeholder is drawn until then.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::error::Result;
use crate::runner::Rect;

pub const RUN_FRAME_URLS: &[&str] = &[
    "assets/player_run_1.png",
    "assets/player_run_2.png",
    "assets/player_run_3.png",
    "assets/player_run_4.png",
];
pub const JUMP_MID_URL: &str = "assets/player_jump_mid.png";
pub const JUMP_FALL_URL: &str = "assets/player_jump_fall.png";
pub const IDLE_URL: &str = "assets/player_idle.png";
pub const COLLECTIBLE_URL: &str = "assets/chard.png";
pub const OBSTACLE_URL: &str = "assets/junk_food.png";
pub const POWER_UP_URL: &str = "assets/power_up.png";
pub const BOSS_URL: &str = "assets/boss_food.png";

pub struct Sprites {
    pub run: Vec<Option<HtmlImageElement>>,
    pub jump_mid: Option<HtmlImageElement>,
    pub jump_fall: Option<HtmlImageElement>,
    pub idle: Option<HtmlImageElement>,
    pub collectible: Option<HtmlImageElement>,
    pub obstacle: Option<HtmlImageElement>,
    pub power_up: Option<HtmlImageElement>,
    pub boss: Option<HtmlImageElement>,
}

impl Sprites {
    /// Kick off every image load. Failures are logged and leave placeholders.
    pub fn load() -> Self {
        Self {
            run: RUN_FRAME_URLS.iter().map(|u| load_image(u)).collect(),
            jump_mid: load_image(JUMP_MID_URL),
            jump_fall: load_image(JUMP_FALL_URL),
            idle: load_image(IDLE_URL),
            collectible: load_image(COLLECTIBLE_URL),
            obstacle: load_image(OBSTACLE_URL),
            power_up: load_image(POWER_UP_URL),
            boss: load_image(BOSS_URL),
        }
    }

    pub fn run_frame(&self, index: usize) -> Option<&HtmlImageElement> {
        self.run.get(index).and_then(Option::as_ref)
    }
}

fn load_image(url: &str) -> Option<HtmlImageElement> {
    let img = match HtmlImageElement::new() {
        Ok(img) => img,
        Err(e) => {
            log::warn!("cannot create image element for {url}: {e:?}");
            return None;
        }
    };
    let src = url.to_string();
    let onerror = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
        log::warn!("sprite failed to load: {src}");
    }) as Box<dyn FnMut(_)>);
    img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onerror.forget();
    img.set_src(url);
    Some(img)
}

fn is_ready(img: &HtmlImageElement) -> bool {
    img.complete() && img.natural_width() > 0
}

/// Draw `img` scaled into `rect`, or a filled rectangle when it is not ready.
pub fn draw_sprite(
    ctx: &CanvasRenderingContext2d,
    img: Option<&HtmlImageElement>,
    rect: &Rect,
    placeholder: &str,
) -> Result<()> {
    match img {
        Some(img) if is_ready(img) => {
            ctx.draw_image_with_html_image_element_and_dw_and_dh(
                img,
                rect.x,
                rect.y,
                rect.width,
                rect.height,
            )?;
        }
        _ => {
            ctx.set_fill_style_str(placeholder);
            ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
        }
    }
    Ok(())
}
