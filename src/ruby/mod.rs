/*!
 * Furigana (ruby) annotation handling:
 * - `script`: ideograph classification for run detection
 * - `store`: per-document reading queues with FIFO consumption
 * - `extract`: harvesting readings from a previously generated document
 * - `reapply`: reapplying readings onto freshly converted text
 */

pub mod extract;
pub mod reapply;
pub mod script;
pub mod store;

pub use extract::extract_readings;
pub use reapply::{reapply_readings, try_reapply_readings_strict};
pub use store::RubyStore;

/// Reserved reading value marking "annotation required, not yet supplied".
/// Never stored as data; emitted literally so a human can search for it.
pub const RUBY_PLACEHOLDER: &str = "{{required_ruby}}";

/// Render the canonical annotation construct. The wire format is fixed:
/// `<ruby>{base}<rt>{reading}</rt></ruby>`.
pub fn ruby_tag(base: &str, reading: &str) -> String {
    format!("<ruby>{}<rt>{}</rt></ruby>", base, reading)
}
