use dioxus::prelude::*;

use crate::domain::{pricing::format_money, EntryId, RankedRow};
use crate::ui::theme;
use crate::util::format_time_of_day;

#[component]
pub fn EntryTable(rows: Vec<RankedRow>, on_remove: EventHandler<EntryId>) -> Element {
    let is_empty = rows.is_empty();
    rsx! {
        div {
            class: "{theme::table_container()}",
            table {
                class: "entries",
                thead {
                    tr {
                        th { "Beer" }
                        th { "Size" }
                        th { "Price" }
                        th { "Per liter" }
                        th { "Added" }
                        th {}
                    }
                }
                tbody {
                    for (key, row) in rows.into_iter().map(|row| (row.entry.id(), row)) {
                        EntryRowView { key: "{key}", row, on_remove }
                    }
                    if is_empty {
                        tr {
                            td {
                                class: "empty",
                                colspan: "6",
                                "Add a beer to start comparing prices."
                            }
                        }
                    }
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct EntryRowViewProps {
    row: RankedRow,
    on_remove: EventHandler<EntryId>,
}

#[component]
fn EntryRowView(props: EntryRowViewProps) -> Element {
    let entry = &props.row.entry;
    let id = entry.id();
    let brand = entry.brand().unwrap_or("—").to_string();
    let price = format_money(entry.price());
    let per_liter = format_money(entry.price_per_liter());
    let added = format_time_of_day(entry.added_at());
    let premium = premium_label(&props.row);
    let size = entry.size_ml();
    let is_best = props.row.is_best;
    let on_remove = props.on_remove;

    rsx! {
        tr {
            class: theme::entry_row(is_best),
            td {
                "{brand}"
                if is_best {
                    span { class: "{theme::accent_text()}", " ★ best" }
                }
            }
            td { "{size} ml" }
            td { "{price}" }
            td {
                "{per_liter}"
                if let Some(premium) = premium {
                    span { class: "{theme::text_muted()}", " {premium}" }
                }
            }
            td { class: "{theme::text_muted()}", "{added}" }
            td {
                button {
                    class: theme::btn_danger(),
                    title: "Remove",
                    onclick: move |evt| {
                        evt.stop_propagation();
                        on_remove.call(id);
                    },
                    "Remove"
                }
            }
        }
    }
}

fn premium_label(row: &RankedRow) -> Option<String> {
    if row.is_best {
        return None;
    }
    row.premium_pct
        .filter(|pct| pct.is_finite())
        .map(|pct| format!("(+{pct:.0}%)"))
}
