use dioxus::prelude::*;

use crate::{
    app::report_storage_warning,
    domain::{AppState, StorageStatus, UserSettings},
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        theme,
    },
    util::version::{version_label, APP_NAME},
};

const MAX_MIN_ENTRIES: usize = 10;

#[component]
pub fn SettingsPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let initial = state.with(|st| st.settings.best_deal_min_entries);
    let mut min_entries_input = use_signal(|| initial.to_string());

    let (location, status, count) = state.with(|st| {
        (
            st.store.storage().describe(),
            st.store.status().clone(),
            st.store.len(),
        )
    });
    let status_label = match &status {
        StorageStatus::Persisted => "Saved to disk".to_string(),
        StorageStatus::MemoryOnly { reason } => format!("Memory only ({reason})"),
    };

    let on_apply = {
        let mut state = state;
        move |_| match parse_min_entries(&min_entries_input()) {
            Ok(value) => {
                let saved = state.with_mut(|st| {
                    st.settings.best_deal_min_entries = value;
                    st.save_settings()
                });
                match saved {
                    Ok(()) => push_toast(
                        toasts,
                        ToastKind::Success,
                        format!("Best deal now needs {value} beers to compare."),
                    ),
                    Err(err) => {
                        log::warn!("[settings] Failed to save settings: {err}");
                        push_toast(
                            toasts,
                            ToastKind::Warning,
                            "Setting applied but could not be saved.",
                        );
                    }
                }
            }
            Err(message) => push_toast(toasts, ToastKind::Error, message),
        }
    };

    let on_reset = {
        let mut state = state;
        move |_| {
            let defaults = UserSettings::default();
            min_entries_input.set(defaults.best_deal_min_entries.to_string());
            let saved = state.with_mut(|st| {
                st.settings = defaults;
                st.save_settings()
            });
            if let Err(err) = saved {
                log::warn!("[settings] Failed to save settings: {err}");
            }
            push_toast(toasts, ToastKind::Info, "Restored default settings.");
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

    rsx! {
        div { class: "stack",
            section {
                class: "{theme::panel()} stack",
                h2 { class: "panel-title", "Best deal" }
                p {
                    class: "{theme::text_muted()}",
                    "A beer is only highlighted as the best deal once this many beers are on the list."
                }
                div {
                    label { class: "{theme::label_class()}", "Beers to compare" }
                    input {
                        class: "{theme::input_class()}",
                        inputmode: "numeric",
                        value: min_entries_input(),
                        oninput: move |evt| min_entries_input.set(evt.value()),
                    }
                }
                div { class: "row",
                    button { r#type: "button", class: theme::btn_small(), onclick: on_apply, "Apply" }
                    button { r#type: "button", class: theme::btn_small(), onclick: on_reset, "Reset" }
                }
            }

            section {
                class: "{theme::panel()} stack",
                h2 { class: "panel-title", "Storage" }
                p { "Location: " span { class: "{theme::text_muted()}", "{location}" } }
                p { "Status: " span { class: "{theme::text_muted()}", "{status_label}" } }
                p { "Beers saved: {count}" }
                if count > 0 {
                    button { r#type: "button", class: theme::btn_danger(), onclick: on_clear, "Clear all beers" }
                }
            }

            p { class: "{theme::text_muted()}", "{APP_NAME} {version_label()}" }
        }
    }
}

fn parse_min_entries(input: &str) -> Result<usize, String> {
    match input.trim().parse::<usize>() {
        Ok(value) if (1..=MAX_MIN_ENTRIES).contains(&value) => Ok(value),
        _ => Err(format!("Enter a whole number between 1 and {MAX_MIN_ENTRIES}.")),
    }
}
