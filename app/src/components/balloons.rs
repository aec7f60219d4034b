use dioxus::prelude::*;

use birthday_core::{ItemView, color_to_hex};

#[component]
pub fn Balloons(views: Vec<ItemView>) -> Element {
    rsx! {
        div { class: "balloons",
            for view in views {
                Balloon { key: "{view.index}", view }
            }
        }
    }
}

#[component]
fn Balloon(view: ItemView) -> Element {
    let fill = color_to_hex(&view.color);
    let delay = format!("{:.1}s", view.delay_secs);

    rsx! {
        div {
            class: if view.revealed { "balloon popped" } else { "balloon" },
            style: "transition-delay: {delay};",
            svg {
                width: "60",
                height: "90",
                view_box: "0 0 60 90",
                ellipse {
                    cx: "30",
                    cy: "30",
                    rx: "24",
                    ry: "30",
                    fill: "{fill}",
                }
                polygon { points: "26,59 34,59 30,66", fill: "{fill}" }
                path {
                    d: "M30 66 Q26 76 30 90",
                    stroke: "#9CA3AF",
                    stroke_width: "1.5",
                    fill: "none",
                }
            }
        }
    }
}
