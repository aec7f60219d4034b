use dioxus::prelude::*;

use birthday_core::{ItemView, color_to_hex};

#[component]
pub fn Candles(views: Vec<ItemView>) -> Element {
    rsx! {
        div { class: "candles",
            for view in views {
                Candle { key: "{view.index}", view }
            }
        }
    }
}

#[component]
fn Candle(view: ItemView) -> Element {
    let body = color_to_hex(&view.color);
    let delay = format!("{:.1}s", view.delay_secs);

    rsx! {
        div {
            class: if view.revealed { "candle lit" } else { "candle" },
            style: "animation-delay: {delay}; transition-delay: {delay};",
            if view.revealed {
                div { class: "flame" }
            }
            div { class: "wick" }
            div { class: "candle-body", style: "background-color: {body};" }
        }
    }
}
