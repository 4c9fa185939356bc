use dioxus::prelude::*;

use crate::{
    app::report_storage_warning,
    domain::{
        pricing::{format_money, parse_custom_size, suggested_price},
        rank, AppState, EntryCandidate, EntryId, RankedView,
    },
    ui::{
        components::{
            best_deal_banner::BestDealBanner,
            brand_input::BrandInput,
            entry_table::EntryTable,
            kpi_card::KpiCard,
            price_input::PriceInput,
            size_picker::SizePicker,
            toast::{push_toast, ToastKind, ToastMessage},
        },
        theme,
    },
};

#[component]
pub fn CalculatorPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let mut selected_size = use_signal(|| None::<u32>);
    let mut custom_mode = use_signal(|| false);
    let mut custom_text = use_signal(String::new);
    let mut price_text = use_signal(String::new);
    let mut brand = use_signal(String::new);

    let (view, sort_mode, count) = state.with(|st| {
        let sort_mode = st.settings.sort_mode;
        let view = rank(st.store.entries(), sort_mode, st.settings.policy());
        (view, sort_mode, st.store.len())
    });
    let stats = summarize(&view);
    let can_add = EntryCandidate::from_input(selected_size(), &price_text(), &brand()).is_ok();

    let on_preset = move |size: u32| {
        selected_size.set(Some(size));
        custom_mode.set(false);
        custom_text.set(String::new());
        price_text.set(suggested_price(size));
    };

    let on_custom_mode = move |_: ()| {
        custom_mode.set(true);
        selected_size.set(None);
    };

    let on_custom_input = move |raw: String| {
        let (digits, size) = parse_custom_size(&raw);
        custom_text.set(digits);
        selected_size.set(size);
        if let Some(size) = size {
            price_text.set(suggested_price(size));
        }
    };

    let on_submit = {
        let mut state = state;
        move |evt: FormEvent| {
            evt.prevent_default();
            let Ok(candidate) =
                EntryCandidate::from_input(selected_size(), &price_text(), &brand())
            else {
                return;
            };

            let added = state.with_mut(|st| st.store.add(candidate).map(|entry| entry.size_ml()));
            if let Ok(size_ml) = added {
                selected_size.set(None);
                custom_mode.set(false);
                custom_text.set(String::new());
                price_text.set(String::new());
                brand.set(String::new());
                push_toast(toasts, ToastKind::Success, format!("Added {size_ml} ml beer."));
            }
            report_storage_warning(state, toasts);
        }
    };

    let on_remove = {
        let mut state = state;
        move |id: EntryId| {
            if state.with_mut(|st| st.store.remove(id)) {
                report_storage_warning(state, toasts);
            }
        }
    };

    let on_clear = {
        let mut state = state;
        move |_| {
            state.with_mut(|st| st.store.clear());
            push_toast(toasts, ToastKind::Info, "Cleared all beers.");
            report_storage_warning(state, toasts);
        }
    };

    let on_toggle_sort = {
        let mut state = state;
        move |_| {
            if let Err(err) = state.with_mut(|st| st.toggle_sort()) {
                log::warn!("[settings] Failed to save sort mode: {err}");
                push_toast(toasts, ToastKind::Warning, "Sort order will reset on restart.");
            }
        }
    };

    let best = view.best.clone();
    let rows = view.rows;

    rsx! {
        div { class: "stack",
            if count > 0 {
                section {
                    class: "kpi-grid",
                    KpiCard {
                        title: "Beers".to_string(),
                        value: count.to_string(),
                        description: Some("Recorded purchases".to_string()),
                    }
                    KpiCard {
                        title: "Cheapest".to_string(),
                        value: stats.cheapest,
                        description: Some("Per liter".to_string()),
                    }
                    KpiCard {
                        title: "Average".to_string(),
                        value: stats.average,
                        description: Some("Per liter".to_string()),
                    }
                }
            }

            form {
                class: "{theme::panel()} stack",
                onsubmit: on_submit,
                div { class: "row spread",
                    h2 { class: "panel-title", "Beer price per liter" }
                    if count > 0 {
                        button {
                            r#type: "button",
                            class: theme::btn_danger(),
                            onclick: on_clear,
                            "Clear all"
                        }
                    }
                }
                SizePicker {
                    selected: selected_size(),
                    custom: custom_mode(),
                    custom_text: custom_text(),
                    on_preset,
                    on_custom_mode,
                    on_custom_input,
                }
                BrandInput {
                    value: brand(),
                    on_change: move |value: String| brand.set(value),
                }
                PriceInput {
                    value: price_text(),
                    on_change: move |value: String| price_text.set(value),
                }
                button {
                    r#type: "submit",
                    class: theme::btn_primary(),
                    disabled: !can_add,
                    "Add beer"
                }
            }

            if count > 0 {
                section {
                    class: "stack",
                    div { class: "row spread",
                        h2 { class: "panel-title", "Your beers" }
                        button {
                            r#type: "button",
                            class: theme::btn_small(),
                            onclick: on_toggle_sort,
                            "{sort_mode.toggle_label()}"
                        }
                    }
                    EntryTable { rows, on_remove }
                }
            }

            if let Some(entry) = best {
                BestDealBanner { entry, compared: count }
            }
        }
    }
}

struct PriceStats {
    cheapest: String,
    average: String,
}

fn summarize(view: &RankedView) -> PriceStats {
    let per_liter: Vec<f64> = view
        .rows
        .iter()
        .map(|row| row.entry.price_per_liter())
        .collect();
    if per_liter.is_empty() {
        return PriceStats {
            cheapest: "n/a".to_string(),
            average: "n/a".to_string(),
        };
    }

    let cheapest = per_liter.iter().copied().fold(f64::INFINITY, f64::min);
    let average = per_liter.iter().sum::<f64>() / per_liter.len() as f64;
    PriceStats {
        cheapest: format_money(cheapest),
        average: format_money(average),
    }
}
