use dioxus::prelude::*;

use crate::domain::pricing::filter_brands;
use crate::ui::theme;

/// Free-text brand field with a dropdown of known brands filtered by what
/// has been typed so far.
#[component]
pub fn BrandInput(value: String, on_change: EventHandler<String>) -> Element {
    let mut open = use_signal(|| false);
    let suggestions = filter_brands(&value);

    rsx! {
        div {
            class: "brand-field",
            label { class: "{theme::label_class()}", "Brand (optional)" }
            div {
                class: "row",
                input {
                    class: "{theme::input_class()}",
                    style: "flex: 1;",
                    placeholder: "Type or pick a brand",
                    value: value,
                    onclick: move |_| open.set(true),
                    oninput: move |evt| {
                        on_change.call(evt.value());
                        open.set(true);
                    },
                }
                button {
                    r#type: "button",
                    class: theme::btn_icon(),
                    onclick: move |_| open.set(!open()),
                    "▾"
                }
            }
            if open() {
                ul {
                    class: "suggestions",
                    if suggestions.is_empty() {
                        li { class: "suggestion {theme::text_muted()}", "No matching brand" }
                    }
                    for brand in suggestions {
                        li {
                            key: "{brand}",
                            class: "suggestion",
                            onclick: move |_| {
                                on_change.call(brand.to_string());
                                open.set(false);
                            },
                            "{brand}"
                        }
                    }
                }
            }
        }
    }
}
