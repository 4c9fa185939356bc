//! Input helpers for the entry form: preset sizes, price suggestion, the
//! cents-based price mask and brand autocomplete.

/// Common can and bottle sizes in milliliters.
pub const COMMON_SIZES_ML: [u32; 5] = [250, 350, 473, 600, 1000];

/// Reference rate used to pre-fill the price field (8.50 per liter).
pub const SUGGESTED_PRICE_PER_ML: f64 = 0.0085;

pub const CURRENCY_SYMBOL: &str = "R$";

pub const POPULAR_BRANDS: [&str; 15] = [
    "Heineken",
    "Stella Artois",
    "Eisenbahn",
    "Budweiser",
    "Corona",
    "Brahma",
    "Skol",
    "Antarctica",
    "Amstel",
    "Beck's",
    "Bohemia",
    "Colorado",
    "Hoegaarden",
    "Original",
    "Patagonia",
];

pub fn suggested_price(size_ml: u32) -> String {
    format!("{:.2}", size_ml as f64 * SUGGESTED_PRICE_PER_ML)
}

/// Keeps only the digits of `raw` and reads them as cents, so typing
/// "1", "12", "125" yields "0.01", "0.12", "1.25".
pub fn mask_price_input(raw: &str) -> String {
    let cents = raw
        .chars()
        .filter(char::is_ascii_digit)
        .fold(0_u64, |acc, digit| {
            let value = digit.to_digit(10).map(u64::from).unwrap_or(0);
            acc.saturating_mul(10).saturating_add(value)
        });
    format_cents(cents)
}

/// Steps the price field by `delta_cents`, clamping at zero. An empty or
/// unreadable field counts as zero.
pub fn adjust_price(current: &str, delta_cents: i64) -> String {
    let current_cents = parse_price(current)
        .map(|price| (price * 100.0).round() as i64)
        .unwrap_or(0);
    let next = current_cents.saturating_add(delta_cents).max(0);
    format_cents(next as u64)
}

pub fn parse_price(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite() && *price >= 0.0)
}

/// Digits-only custom size field. Returns the cleaned text and the size, if
/// the digits form a positive number.
pub fn parse_custom_size(raw: &str) -> (String, Option<u32>) {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let size = digits.parse::<u32>().ok().filter(|size| *size > 0);
    (digits, size)
}

/// Case-insensitive substring match against the brand list.
pub fn filter_brands(query: &str) -> Vec<&'static str> {
    let needle = query.trim().to_lowercase();
    POPULAR_BRANDS
        .iter()
        .copied()
        .filter(|brand| brand.to_lowercase().contains(&needle))
        .collect()
}

pub fn format_money(value: f64) -> String {
    format!("{CURRENCY_SYMBOL} {value:.2}")
}

fn format_cents(cents: u64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}
