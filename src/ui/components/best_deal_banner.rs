use dioxus::prelude::*;

use crate::domain::{pricing::format_money, Entry};

#[component]
pub fn BestDealBanner(entry: Entry, compared: usize) -> Element {
    let per_liter = format_money(entry.price_per_liter());
    let summary = format!(
        "{} ml for {} ({per_liter}/L)",
        entry.size_ml(),
        format_money(entry.price())
    );

    rsx! {
        div {
            class: "banner-best",
            h2 { "Best value of {compared}" }
            if let Some(brand) = entry.brand() {
                p { class: "kpi-value", "{brand}" }
            }
            p { "{summary}" }
        }
    }
}
