use dioxus::prelude::*;

use crate::domain::pricing::{adjust_price, mask_price_input, CURRENCY_SYMBOL};
use crate::ui::theme;

/// Cents-masked price field with one-cent stepper buttons.
#[component]
pub fn PriceInput(value: String, on_change: EventHandler<String>) -> Element {
    let minus_from = value.clone();
    let plus_from = value.clone();

    rsx! {
        div {
            label { class: "{theme::label_class()}", "Price ({CURRENCY_SYMBOL})" }
            div {
                class: "row",
                button {
                    r#type: "button",
                    class: theme::btn_icon(),
                    onclick: move |_| on_change.call(adjust_price(&minus_from, -1)),
                    "−"
                }
                input {
                    class: "{theme::input_class()} price-input",
                    inputmode: "numeric",
                    placeholder: "0.00",
                    value: value,
                    oninput: move |evt| on_change.call(mask_price_input(&evt.value())),
                }
                button {
                    r#type: "button",
                    class: theme::btn_icon(),
                    onclick: move |_| on_change.call(adjust_price(&plus_from, 1)),
                    "+"
                }
            }
        }
    }
}
