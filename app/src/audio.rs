//! Browser audio backend
//!
//! One `HtmlAudioElement` per playback. The element's `ended` event writes the
//! playback id into a signal the card forwards to the sequencer.

use dioxus::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;

use birthday_core::{AudioPlayer, PlaybackId, SoundId};

pub struct WebAudio {
    element: Option<HtmlAudioElement>,
    on_ended: Option<Closure<dyn FnMut()>>,
    finished: Signal<Option<PlaybackId>>,
}

impl WebAudio {
    pub fn new(finished: Signal<Option<PlaybackId>>) -> Self {
        Self {
            element: None,
            on_ended: None,
            finished,
        }
    }
}

impl AudioPlayer for WebAudio {
    fn play(&mut self, playback: PlaybackId, sound: SoundId) {
        self.stop();

        let element = match HtmlAudioElement::new_with_src(sound.asset_path()) {
            Ok(element) => element,
            Err(err) => {
                tracing::warn!(?err, sound = sound.key(), "Failed to create audio element");
                return;
            }
        };

        let mut finished = self.finished;
        let on_ended = Closure::<dyn FnMut()>::new(move || {
            // Signal may already be dropped if the card unmounted
            let _ = finished.try_write().map(|mut w| *w = Some(playback));
        });
        let _ = element.add_event_listener_with_callback("ended", on_ended.as_ref().unchecked_ref());

        match element.play() {
            Ok(promise) => {
                let key = sound.key();
                wasm_bindgen_futures::spawn_local(async move {
                    // Autoplay policies reject here; the reveal carries on silently
                    if let Err(err) = JsFuture::from(promise).await {
                        tracing::warn!(?err, sound = key, "Audio playback rejected");
                    }
                });
            }
            Err(err) => tracing::warn!(?err, sound = sound.key(), "Audio playback failed"),
        }

        self.element = Some(element);
        self.on_ended = Some(on_ended);
    }

    fn stop(&mut self) {
        let Some(element) = self.element.take() else {
            return;
        };

        let _ = element.pause();
        element.set_current_time(0.0);

        if let Some(on_ended) = self.on_ended.take() {
            let _ = element
                .remove_event_listener_with_callback("ended", on_ended.as_ref().unchecked_ref());
        }
    }
}
