//! Full-viewport confetti canvas
//!
//! The sequencer toggles [`ConfettiControl`]. Switching it on starts a frame
//! loop that steps a fresh `ConfettiField` at ~60 fps; switching it off ends
//! the loop and clears the canvas.

use dioxus::core::Task;
use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use birthday_core::{Color, ConfettiField, ParticleEffect, Viewport, color_to_hex};

const CANVAS_ID: &str = "confetti-canvas";
const FRAME_MS: u32 = 16;

/// Signal-backed [`ParticleEffect`] handed to the sequencer.
#[derive(Clone, Copy, PartialEq)]
pub struct ConfettiControl {
    active: Signal<bool>,
    viewport: Signal<Viewport>,
}

impl ConfettiControl {
    pub fn new() -> Self {
        Self {
            active: Signal::new(false),
            viewport: Signal::new(Viewport::default()),
        }
    }
}

impl Default for ConfettiControl {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticleEffect for ConfettiControl {
    fn set_active(&mut self, active: bool) {
        let _ = self.active.try_write().map(|mut w| *w = active);
    }

    fn resize(&mut self, viewport: Viewport) {
        let _ = self.viewport.try_write().map(|mut w| *w = viewport);
    }
}

#[component]
pub fn ConfettiCanvas(control: ConfettiControl, palette: Vec<Color>) -> Element {
    let viewport = *control.viewport.read();
    let mut animation = use_signal(|| None::<Task>);

    // Wakes only when `active` flips; the frame loop runs while it stays on
    use_effect(move || {
        if !*control.active.read() || animation.peek().is_some() {
            return;
        }

        let palette = palette.clone();
        let task = spawn(async move {
            let seed = getrandom::u64().unwrap_or_default();
            let mut field = ConfettiField::new(palette, seed);
            field.set_active(true);

            while *control.active.peek() {
                let size = *control.viewport.peek();
                if field.viewport() != size {
                    field.resize(size);
                }

                field.step(FRAME_MS as f32 / 1000.0);
                if let Some(ctx) = canvas_context() {
                    draw(&ctx, &field);
                }

                TimeoutFuture::new(FRAME_MS).await;
            }

            field.set_active(false);
            if let Some(ctx) = canvas_context() {
                draw(&ctx, &field);
            }
            let _ = animation.try_write().map(|mut w| *w = None);
        });
        animation.set(Some(task));
    });

    rsx! {
        canvas {
            id: CANVAS_ID,
            class: "confetti-canvas",
            width: "{viewport.width}",
            height: "{viewport.height}",
        }
    }
}

fn canvas_context() -> Option<CanvasRenderingContext2d> {
    let canvas = web_sys::window()?
        .document()?
        .get_element_by_id(CANVAS_ID)?
        .dyn_into::<HtmlCanvasElement>()
        .ok()?;
    canvas
        .get_context("2d")
        .ok()??
        .dyn_into::<CanvasRenderingContext2d>()
        .ok()
}

fn draw(ctx: &CanvasRenderingContext2d, field: &ConfettiField) {
    let size = field.viewport();
    ctx.clear_rect(0.0, 0.0, size.width, size.height);

    for piece in field.particles() {
        ctx.save();
        let _ = ctx.translate(piece.x as f64, piece.y as f64);
        let _ = ctx.rotate(piece.angle as f64);
        ctx.set_fill_style_str(&color_to_hex(&piece.color));
        ctx.fill_rect(
            -piece.width as f64 / 2.0,
            -piece.height as f64 / 2.0,
            piece.width as f64,
            piece.height as f64,
        );
        ctx.restore();
    }
}
