//! Runtime font discovery for chart text.
//!
//! Plotters is built with `ab_glyph`, which has no fonts of its own. We look
//! for a TrueType file in the usual system locations once per process and
//! register it as `sans-serif`. Without one, charts are still drawn, only
//! without titles and labels.

use std::fs;
use std::path::PathBuf;

use once_cell::sync::OnceCell;
use plotters::style::{FontStyle, register_font};
use tracing::{debug, info, warn};

/// Family name every chart text style uses.
pub const CHART_FONT: &str = "sans-serif";

/// Well-known regular sans fonts, most preferred first.
const PREFERRED: [&str; 6] = [
    "DejaVuSans.ttf",
    "LiberationSans-Regular.ttf",
    "Arial.ttf",
    "arial.ttf",
    "FreeSans.ttf",
    "NotoSans-Regular.ttf",
];

const SEARCH_PATTERNS: [&str; 5] = [
    "/usr/share/fonts/**/*.ttf",
    "/usr/local/share/fonts/**/*.ttf",
    "/Library/Fonts/*.ttf",
    "/System/Library/Fonts/Supplemental/*.ttf",
    "C:/Windows/Fonts/*.ttf",
];

static TEXT_AVAILABLE: OnceCell<bool> = OnceCell::new();

/// Whether chart text can be rendered. Registers a font on first call.
pub fn text_available() -> bool {
    *TEXT_AVAILABLE.get_or_init(register_system_font)
}

fn register_system_font() -> bool {
    for path in candidate_fonts() {
        let bytes = match fs::read(&path) {
            Ok(b) => b,
            Err(e) => {
                debug!(font = %path.display(), error = %e, "unreadable font");
                continue;
            }
        };
        // ab_glyph keeps a reference for the lifetime of the process.
        let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
        if register_font(CHART_FONT, FontStyle::Normal, bytes).is_ok() {
            info!(font = %path.display(), "registered chart font");
            return true;
        }
        debug!(font = %path.display(), "not a usable TrueType font");
    }

    warn!("no TrueType font found; charts will be drawn without text");
    false
}

fn candidate_fonts() -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = SEARCH_PATTERNS
        .iter()
        .filter_map(|pattern| glob::glob(pattern).ok())
        .flat_map(|paths| paths.flatten())
        .collect();

    found.sort_by_key(|path| {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        let rank = PREFERRED.iter().position(|p| *p == name).unwrap_or(PREFERRED.len());
        (rank, path.clone())
    });
    found.dedup();
    found
}
