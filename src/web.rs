//! Browser shell: canvas, input listeners, quote feed, and the
//! requestAnimationFrame loop driving the runner.
//!
//! All state lives in one `App` inside a thread-local cell. Every callback
//! (frame, key, pointer, resize, fetch completion) borrows it, does its work,
//! and releases it before returning, so callbacks never overlap.

use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Response, window};

use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::render::{Renderer, Sprites, build_background};
use crate::runner::{GameEvent, GameState, QuoteBook};
use crate::storage::{HighScoreStore, LocalStore, MemoryStore};

const CANVAS_ID: &str = "cr-canvas";
const ERROR_ID: &str = "cr-error";
const ACTIVATE_KEYS: &[&str] = &[" ", "ArrowUp", "Enter", "w", "W"];

struct App {
    canvas: HtmlCanvasElement,
    state: GameState,
    renderer: Renderer,
    store: Box<dyn HighScoreStore>,
    rng: StdRng,
}

impl App {
    fn activate(&mut self) {
        if let Some(event) = self.state.activate(&mut self.rng) {
            self.handle_events(vec![event]);
        }
    }

    fn frame(&mut self, ts_ms: f64) -> Result<()> {
        let events = self.state.update(ts_ms / 1000.0, &mut self.rng);
        self.handle_events(events);
        self.renderer.draw(&mut self.state)
    }

    fn resize(&mut self, width: f64, height: f64) {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        self.state.resize(width, height);
    }

    fn handle_events(&mut self, events: Vec<GameEvent>) {
        let (w, h) = (self.state.viewport.width, self.state.viewport.height);
        for event in events {
            match event {
                GameEvent::Started => log::info!("run started"),
                GameEvent::Restarted => {
                    log::info!("restart (best {})", self.state.high_score);
                    self.renderer.reset_background(w, h, &mut self.rng);
                }
                GameEvent::LevelUp { level } => {
                    log::info!("level {level}");
                    self.renderer.regenerate_background(w, h, &mut self.rng);
                }
                GameEvent::NewHighScore(score) => self.persist(score),
                GameEvent::GameOver { score } => {
                    log::info!("game over: score {score}, best {}", self.state.high_score);
                    self.persist(self.state.high_score);
                }
                other => log::debug!("{other:?}"),
            }
        }
    }

    fn persist(&mut self, score: u32) {
        if let Err(e) = self.store.save(score) {
            log::warn!("could not save high score {score}: {e}");
        }
    }
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

fn with_app<T>(f: impl FnOnce(&mut App) -> T) -> Option<T> {
    APP.with(|cell| cell.borrow_mut().as_mut().map(f))
}

fn window_size() -> (f64, f64) {
    let win = window();
    let dim = |v: Option<std::result::Result<JsValue, JsValue>>| {
        v.and_then(|r| r.ok()).and_then(|j| j.as_f64())
    };
    let w = dim(win.as_ref().map(|w| w.inner_width())).unwrap_or(800.0);
    let h = dim(win.as_ref().map(|w| w.inner_height())).unwrap_or(600.0);
    (w, h)
}

pub fn start(config: GameConfig) -> Result<()> {
    config.validate()?;
    let win = window().ok_or(GameError::Dom("no window"))?;
    let doc = win.document().ok_or(GameError::Dom("no document"))?;

    // Create / reuse the full-window canvas
    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id(CANVAS_ID) {
        el.dyn_into().map_err(|_| GameError::Dom("element is not a canvas"))?
    } else {
        let c: HtmlCanvasElement = doc
            .create_element("canvas")?
            .dyn_into()
            .map_err(|_| GameError::Dom("created element is not a canvas"))?;
        c.set_id(CANVAS_ID);
        c.set_attribute(
            "style",
            "position:fixed; left:0; top:0; width:100vw; height:100vh; touch-action:none; z-index:10;",
        )
        .ok();
        doc.body().ok_or(GameError::Dom("no body"))?.append_child(&c)?;
        c
    };
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or(GameError::Dom("2d context unavailable"))?
        .dyn_into()
        .map_err(|_| GameError::Dom("context is not 2d"))?;

    let store: Box<dyn HighScoreStore> = match LocalStore::open(&config.storage_key) {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("high score will not persist: {e}");
            Box::new(MemoryStore::new())
        }
    };
    let high_score = store.load().unwrap_or_else(|e| {
        log::warn!("could not read high score: {e}");
        0
    });

    let quotes_url = config.quotes_url.clone();
    let style = config.background;
    let mut rng = StdRng::from_entropy();
    let mut state = GameState::new(config, high_score, &mut rng);
    let (w, h) = window_size();
    canvas.set_width(w as u32);
    canvas.set_height(h as u32);
    state.resize(w, h);

    let background = build_background(style, w, h, &mut rng);
    let renderer = Renderer::new(ctx, Sprites::load(), background);

    log::info!("chard runner ready ({w}x{h}, best {high_score})");
    APP.with(|cell| {
        cell.replace(Some(App { canvas: canvas.clone(), state, renderer, store, rng }));
    });

    install_listeners(&doc, &canvas)?;
    load_quotes(quotes_url);
    start_loop();
    Ok(())
}

fn install_listeners(doc: &Document, canvas: &HtmlCanvasElement) -> Result<()> {
    // Keyboard: one activate per physical press
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            if evt.repeat() || !ACTIVATE_KEYS.contains(&evt.key().as_str()) {
                return;
            }
            evt.prevent_default();
            with_app(App::activate);
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Mouse click and touch both map to activate
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            with_app(App::activate);
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::Event| {
            // Stop the synthetic mousedown that would double-activate.
            evt.prevent_default();
            with_app(App::activate);
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Keep the canvas (and floor line) matched to the window
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            let (w, h) = window_size();
            with_app(|app| app.resize(w, h));
        }) as Box<dyn FnMut(_)>);
        window()
            .ok_or(GameError::Dom("no window"))?
            .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

async fn fetch_text(url: &str) -> Result<String> {
    let win = window().ok_or(GameError::Dom("no window"))?;
    let resp: Response = JsFuture::from(win.fetch_with_str(url)).await?.dyn_into()?;
    if !resp.ok() {
        return Err(GameError::Js(format!("HTTP {} for {url}", resp.status())));
    }
    let body = JsFuture::from(resp.text()?).await?;
    body.as_string()
        .ok_or_else(|| GameError::Js("response body is not text".into()))
}

/// Fetch the quote list in the background; the fallback line is used until
/// (or unless) it arrives.
fn load_quotes(url: String) {
    wasm_bindgen_futures::spawn_local(async move {
        let text = match fetch_text(&url).await {
            Ok(text) => text,
            Err(e) => {
                log::warn!("quote feed unavailable: {e}");
                return;
            }
        };
        match QuoteBook::from_json(&text) {
            Ok(book) => {
                log::info!("loaded {} quotes", book.len());
                with_app(|app| app.state.quotes = book);
            }
            Err(e) => log::warn!("quote feed malformed: {e}"),
        }
    });
}

fn show_error_overlay(err: &GameError) {
    let Some(doc) = window().and_then(|w| w.document()) else {
        return;
    };
    let el = match doc.get_element_by_id(ERROR_ID) {
        Some(el) => el,
        None => {
            let Ok(div) = doc.create_element("div") else {
                return;
            };
            div.set_id(ERROR_ID);
            div.set_attribute("style", "position:fixed; top:50%; left:50%; transform:translate(-50%,-50%); font-family:'Fira Code', monospace; font-size:16px; padding:12px 18px; background:rgba(120,0,0,0.85); border:1px solid #300; border-radius:6px; color:#fff; z-index:50;").ok();
            if let Some(body) = doc.body() {
                body.append_child(&div).ok();
            }
            div
        }
    };
    el.set_text_content(Some(&format!("Game stopped: {err}")));
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn request_frame(cb: &FrameCallback) {
    if let (Some(w), Some(closure)) = (window(), cb.borrow().as_ref()) {
        let _ = w.request_animation_frame(closure.as_ref().unchecked_ref());
    }
}

/// Update then render once per display refresh. A failing frame shows the
/// error overlay and stops scheduling.
fn start_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        if let Some(Err(err)) = with_app(|app| app.frame(ts)) {
            log::error!("frame failed, halting loop: {err}");
            show_error_overlay(&err);
            return;
        }
        request_frame(&f);
    }) as Box<dyn FnMut(f64)>));
    request_frame(&g);
}
