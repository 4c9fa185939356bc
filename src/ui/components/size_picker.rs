use dioxus::prelude::*;

use crate::domain::pricing::COMMON_SIZES_ML;
use crate::ui::theme;

/// Preset size buttons plus a "custom" button that reveals a digits-only
/// field.
#[component]
pub fn SizePicker(
    selected: Option<u32>,
    custom: bool,
    custom_text: String,
    on_preset: EventHandler<u32>,
    on_custom_mode: EventHandler<()>,
    on_custom_input: EventHandler<String>,
) -> Element {
    rsx! {
        div {
            label { class: "{theme::label_class()}", "Size" }
            div {
                class: "size-grid",
                for size in COMMON_SIZES_ML {
                    button {
                        key: "{size}",
                        r#type: "button",
                        class: theme::btn_choice(!custom && selected == Some(size)),
                        onclick: move |_| on_preset.call(size),
                        "{size} ml"
                    }
                }
                button {
                    r#type: "button",
                    class: theme::btn_choice(custom),
                    onclick: move |_| on_custom_mode.call(()),
                    "Custom"
                }
            }
            if custom {
                input {
                    class: "{theme::input_class()}",
                    style: "margin-top: 0.5rem;",
                    inputmode: "numeric",
                    placeholder: "Size in ml",
                    value: custom_text,
                    oninput: move |evt| on_custom_input.call(evt.value()),
                }
            }
        }
    }
}
