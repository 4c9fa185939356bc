use dioxus::prelude::*;

use crate::{
    domain::AppState,
    ui::{
        components::toast::{push_toast, Toast, ToastKind, ToastMessage},
        pages::{CalculatorPage, SettingsPage},
        shell::Shell,
    },
    util::assets,
};

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Calculator {},
    #[route("/settings")]
    Settings {},
}

#[component]
pub fn App() -> Element {
    let state = use_signal(AppState::from_disk);
    use_context_provider(|| state);

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts);

    // Surface a failed initial load once the toast stack exists.
    use_hook(move || report_storage_warning(state, toasts));

    rsx! {
        document::Link { rel: "icon", href: assets::favicon_data_uri() }
        document::Style { "{assets::main_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

/// Turns a pending storage failure into a warning toast. The entries stay
/// usable in memory either way.
pub fn report_storage_warning(mut state: Signal<AppState>, toasts: Signal<Vec<ToastMessage>>) {
    if let Some(reason) = state.with_mut(|st| st.store.take_warning()) {
        push_toast(
            toasts,
            ToastKind::Warning,
            format!("{reason}. Your beers are kept in memory only."),
        );
    }
}

#[component]
pub fn Calculator() -> Element {
    rsx! { Shell { CalculatorPage {} } }
}

#[component]
pub fn Settings() -> Element {
    rsx! { Shell { SettingsPage {} } }
}
