//! Harvesting existing annotations from a previously generated document.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::ruby::store::RubyStore;
use crate::ruby::RUBY_PLACEHOLDER;

/// Tolerant scan: matches any annotation construct, including ones whose body
/// carries nested inline markup, so a single hand-edited construct cannot
/// derail the scan of the rest of the document.
pub(crate) static RUBY_SCAN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<ruby>.*?</ruby>").unwrap());

/// Strict parse of one matched construct: plain base text and plain reading
/// in the canonical wire form.
pub(crate) static RUBY_PARSE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A<ruby>([^<]+)<rt>([^<]+)</rt></ruby>\z").unwrap());

/// Scan a rendered document for annotation constructs and rebuild a reading
/// store from them.
///
/// Constructs that do not parse in the canonical form are skipped (best
/// effort, not an error), as are placeholder readings. Readings for the same
/// base text accumulate in encounter order.
pub fn extract_readings(document: &str) -> RubyStore {
    let mut store = RubyStore::new();
    let mut skipped = 0usize;

    for m in RUBY_SCAN_REGEX.find_iter(document) {
        let Some(caps) = RUBY_PARSE_REGEX.captures(m.as_str()) else {
            skipped += 1;
            continue;
        };
        let base = &caps[1];
        let reading = &caps[2];
        if reading == RUBY_PLACEHOLDER {
            continue;
        }
        store.push(base, reading);
    }

    if skipped > 0 {
        debug!("Skipped {} annotation constructs that did not parse", skipped);
    }
    debug!(
        "Harvested {} readings over {} base texts",
        store.remaining(),
        store.len()
    );

    store
}
