use std::rc::Rc;

use dioxus::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use birthday_core::Viewport;

/// Window size, kept current by a `resize` listener that is removed on unmount.
pub fn use_viewport() -> Signal<Viewport> {
    let mut viewport = use_signal(window_viewport);

    let listener = use_hook(|| {
        let closure = Closure::<dyn FnMut()>::new(move || {
            let _ = viewport.try_write().map(|mut w| *w = window_viewport());
        });
        if let Some(window) = web_sys::window() {
            let _ =
                window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        }
        Rc::new(closure)
    });

    use_drop(move || {
        if let Some(window) = web_sys::window() {
            let _ = window
                .remove_event_listener_with_callback("resize", listener.as_ref().as_ref().unchecked_ref());
        }
    });

    viewport
}

fn window_viewport() -> Viewport {
    let Some(window) = web_sys::window() else {
        return Viewport::default();
    };
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Viewport::new(width, height)
}
