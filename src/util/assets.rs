use std::{borrow::Cow, sync::OnceLock};

use rust_embed::RustEmbed;

/// Embed the entire `assets/` directory into the binary.
#[derive(RustEmbed)]
#[folder = "assets"]
struct EmbeddedAssets;

static MAIN_CSS: OnceLock<String> = OnceLock::new();
static FAVICON_DATA_URI: OnceLock<String> = OnceLock::new();

/// Returns the contents of `assets/main.css`, or an empty stylesheet if the
/// asset is missing from the build.
pub fn main_css() -> &'static str {
    MAIN_CSS
        .get_or_init(|| load_text("main.css").unwrap_or_default())
        .as_str()
}

/// Returns the SVG favicon as a `data:` URI.
pub fn favicon_data_uri() -> &'static str {
    FAVICON_DATA_URI
        .get_or_init(|| {
            let svg = load_text("favicon.svg").unwrap_or_default();
            format!("data:image/svg+xml,{}", percent_encode_svg(&svg))
        })
        .as_str()
}

fn load_text(name: &str) -> Option<String> {
    let Some(data) = load_asset(name) else {
        log::warn!("[assets] Missing embedded asset {name}");
        return None;
    };
    match String::from_utf8(data.into_owned()) {
        Ok(text) => Some(text),
        Err(err) => {
            log::warn!("[assets] Embedded asset {name} is not UTF-8: {err}");
            None
        }
    }
}

fn load_asset(name: &str) -> Option<Cow<'static, [u8]>> {
    EmbeddedAssets::get(name.trim_start_matches('/')).map(|file| file.data)
}

/// Escapes the handful of characters that break an unencoded SVG data URI.
fn percent_encode_svg(svg: &str) -> String {
    let mut encoded = String::with_capacity(svg.len());
    for ch in svg.trim().chars() {
        match ch {
            '%' => encoded.push_str("%25"),
            '#' => encoded.push_str("%23"),
            '<' => encoded.push_str("%3C"),
            '>' => encoded.push_str("%3E"),
            '"' => encoded.push('\''),
            '\n' | '\r' | '\t' => encoded.push(' '),
            other => encoded.push(other),
        }
    }
    encoded
}
