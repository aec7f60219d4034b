use dioxus::core::Task;
use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

use birthday_core::{
    CardSettings, Millis, PlaybackId, Sequencer, balloon_views, candle_views, load_card_config,
};

use crate::audio::WebAudio;
use crate::components::{Balloons, Candles, ConfettiCanvas, ConfettiControl, SoundSelect};
use crate::viewport::use_viewport;

static CSS: Asset = asset!("/assets/styles.css");

const CARD_TOML: &str = include_str!("../assets/card.toml");

type CardSequencer = Sequencer<WebAudio, ConfettiControl>;

// ─────────────────────────────────────────────────────────────────────────────
// Clock
// ─────────────────────────────────────────────────────────────────────────────

/// Milliseconds since the card mounted.
#[derive(Clone, Copy)]
struct WebClock {
    origin: f64,
}

impl WebClock {
    fn new() -> Self {
        Self {
            origin: js_sys::Date::now(),
        }
    }

    fn now(&self) -> Millis {
        (js_sys::Date::now() - self.origin).max(0.0) as Millis
    }
}

fn load_settings() -> CardSettings {
    match load_card_config(CARD_TOML) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!(error = %err, "Invalid card config, using defaults");
            CardSettings::default()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Card
// ─────────────────────────────────────────────────────────────────────────────

#[component]
pub fn App() -> Element {
    let settings = use_hook(load_settings);
    let clock = use_hook(WebClock::new);
    let confetti = use_hook(ConfettiControl::new);
    let finished = use_signal(|| None::<PlaybackId>);

    let mut sequencer = use_signal(|| {
        CardSequencer::new(
            settings.timing,
            settings.default_sound,
            WebAudio::new(finished),
            confetti,
        )
    });
    let mut ticker = use_signal(|| None::<Task>);
    let viewport = use_viewport();

    use_effect(move || {
        let size = viewport();
        sequencer.write().resize(size);
    });

    use_effect(move || {
        if let Some(playback) = finished() {
            sequencer.write().on_playback_finished(playback);
        }
    });

    use_drop(move || {
        if let Ok(mut sequencer) = sequencer.try_write() {
            sequencer.dispose();
        }
    });

    let celebrate = move |_| {
        sequencer.write().start_celebration(clock.now());

        if let Some(task) = ticker.write().take() {
            task.cancel();
        }

        // Sleep until each deadline and fire whatever is due; stops once no
        // timers remain
        let task = spawn(async move {
            loop {
                let Some(deadline) = sequencer.peek().next_deadline() else {
                    break;
                };
                let wait = deadline.saturating_sub(clock.now());
                TimeoutFuture::new(wait.min(u32::MAX as Millis) as u32).await;

                let Ok(mut guard) = sequencer.try_write() else {
                    break;
                };
                guard.advance_to(clock.now());
            }
        });
        ticker.set(Some(task));
    };

    let on_select = move |key: String| {
        if let Err(err) = sequencer.write().select_sound_key(&key) {
            tracing::warn!(error = %err, "Sound selection rejected");
        }
    };

    let current = sequencer.read();
    let state = current.state().clone();
    let timing = current.timing();
    drop(current);

    let candles = candle_views(&state, &timing, &settings.palette);
    let balloons = balloon_views(&state, &timing, &settings.palette);

    rsx! {
        document::Link { rel: "stylesheet", href: CSS }

        ConfettiCanvas { control: confetti, palette: settings.palette.confetti.clone() }

        main { class: "card-page",
            div { class: "card",
                h1 { class: "card-title", "{settings.text.title}" }
                p { class: "card-subtitle", "{settings.text.subtitle}" }
                p { class: "card-date", "{settings.date_label}" }

                Candles { views: candles }
                Balloons { views: balloons }

                div { class: "card-controls",
                    SoundSelect { selected: state.selected_sound, on_select }
                    button {
                        class: if state.celebrating { "celebrate-btn celebrating" } else { "celebrate-btn" },
                        onclick: celebrate,
                        "Celebrate!"
                    }
                }
            }
        }
    }
}
