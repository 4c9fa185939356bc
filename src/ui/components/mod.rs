pub mod best_deal_banner;
pub mod brand_input;
pub mod entry_table;
pub mod kpi_card;
pub mod price_input;
pub mod size_picker;
pub mod toast;
