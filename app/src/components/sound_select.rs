use dioxus::prelude::*;

use birthday_core::SoundId;

/// Clip picker. Emits the raw option key; the card validates it.
#[component]
pub fn SoundSelect(selected: SoundId, on_select: EventHandler<String>) -> Element {
    rsx! {
        label { class: "sound-select",
            "Sound "
            select {
                value: "{selected.key()}",
                onchange: move |e| on_select.call(e.value()),
                for sound in SoundId::all() {
                    option {
                        key: "{sound.key()}",
                        value: "{sound.key()}",
                        selected: *sound == selected,
                        "{sound.label()}"
                    }
                }
            }
        }
    }
}
