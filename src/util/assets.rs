use std::{borrow::Cow, sync::OnceLock};

use rust_embed::RustEmbed;
use tracing::error;

/// Stylesheets and icon, embedded so the desktop build ships as one binary.
#[derive(RustEmbed)]
#[folder = "assets"]
struct EmbeddedAssets;

static MAIN_CSS: OnceLock<String> = OnceLock::new();
static TAILWIND_CSS: OnceLock<String> = OnceLock::new();
static FAVICON_DATA_URI: OnceLock<String> = OnceLock::new();
static SCANNER_JS: OnceLock<String> = OnceLock::new();

pub fn main_css() -> &'static str {
    MAIN_CSS.get_or_init(|| load_text("main.css")).as_str()
}

pub fn tailwind_css() -> &'static str {
    TAILWIND_CSS.get_or_init(|| load_text("tailwind.css")).as_str()
}

pub fn favicon_data_uri() -> &'static str {
    FAVICON_DATA_URI
        .get_or_init(|| svg_data_uri("favicon.svg"))
        .as_str()
}

/// Webview helpers for camera capture and barcode detection. Evaluating it
/// more than once is harmless.
pub fn scanner_js() -> &'static str {
    SCANNER_JS.get_or_init(|| load_text("scanner.js")).as_str()
}

/// Missing or non-UTF-8 assets render as empty text rather than aborting the UI.
fn load_text(name: &str) -> String {
    match load_asset(name) {
        Some(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        None => String::new(),
    }
}

/// SVG is text, so it is percent-encoded instead of base64.
fn svg_data_uri(name: &str) -> String {
    let svg = load_text(name);
    let mut encoded = String::with_capacity(svg.len());
    for ch in svg.chars() {
        match ch {
            '"' => encoded.push('\''),
            '%' => encoded.push_str("%25"),
            '#' => encoded.push_str("%23"),
            '<' => encoded.push_str("%3C"),
            '>' => encoded.push_str("%3E"),
            '\n' | '\r' => encoded.push(' '),
            other => encoded.push(other),
        }
    }
    format!("data:image/svg+xml,{encoded}")
}

fn load_asset(name: &str) -> Option<Cow<'static, [u8]>> {
    let asset = EmbeddedAssets::get(name.trim_start_matches('/')).map(|file| file.data);
    if asset.is_none() {
        error!(asset = name, "embedded asset missing");
    }
    asset
}
