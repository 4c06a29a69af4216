/*!
 * Markup line extraction.
 *
 * Walks the source document's main content region and emits an ordered
 * sequence of [`Line`] values: text runs, forced line breaks, and
 * self-contained inline fragments. Indented/styled block containers are
 * flattened into the line stream with a single break marker in front, so the
 * paragraph segmenter can treat visual indentation as a boundary hint rather
 * than nested structure.
 */

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use log::debug;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::errors::ConversionError;

/// One structural line of the source document, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// A trimmed, non-empty text run
    Text(String),
    /// One forced line break (consecutive breaks collapse to one)
    Break,
    /// A self-contained inline fragment, serialized as a string
    Markup(String),
}

/// Parse the source HTML and extract the ordered line sequence from its main
/// content region.
///
/// Fails with [`ConversionError::MissingMainContent`] when the main content
/// element is absent. Everything below that element degrades gracefully:
/// malformed inline elements pass through in their literal serialized form.
pub fn extract_lines(html: &str) -> Result<Vec<Line>, ConversionError> {
    let dom = parse_html(html);
    let main_text =
        find_main_text(&dom.document).ok_or(ConversionError::MissingMainContent)?;

    let mut lines = Vec::new();
    for child in main_text.children.borrow().iter() {
        walk(child, &mut lines);
    }

    // Strip leading and trailing breaks from the full sequence
    while lines.first() == Some(&Line::Break) {
        lines.remove(0);
    }
    while lines.last() == Some(&Line::Break) {
        lines.pop();
    }

    debug!("Extracted {} lines from main text", lines.len());
    Ok(lines)
}

pub(crate) fn parse_html(html: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default()).one(html)
}

fn walk(node: &Handle, lines: &mut Vec<Line>) {
    match &node.data {
        NodeData::Text { contents } => {
            let text = contents.borrow().to_string();
            let trimmed = trim_line_whitespace(&text);
            if !trimmed.is_empty() {
                lines.push(Line::Text(trimmed.to_string()));
            }
        }
        NodeData::Element { .. } => {
            let Some(tag) = tag_lower(node) else { return };
            match tag.as_str() {
                "br" => push_break(lines),
                "ruby" => {
                    let markup = normalize_ruby(node);
                    if !markup.is_empty() {
                        lines.push(Line::Markup(markup));
                    }
                }
                "img" => {
                    let markup = image_reference(node);
                    if !markup.is_empty() {
                        lines.push(Line::Markup(markup));
                    }
                }
                "div" if is_indent_block(node) => {
                    // Flatten the block in place, with one break marking its
                    // upper boundary
                    push_break(lines);
                    for child in node.children.borrow().iter() {
                        walk(child, lines);
                    }
                }
                _ => {
                    let mut markup = String::new();
                    serialize_node(node, &mut markup);
                    if !markup.trim().is_empty() {
                        lines.push(Line::Markup(markup));
                    }
                }
            }
        }
        _ => {}
    }
}

/// Append a break unless the previous emitted line is already one
fn push_break(lines: &mut Vec<Line>) {
    if lines.last() != Some(&Line::Break) {
        lines.push(Line::Break);
    }
}

/// Trim ASCII whitespace and NBSP from both ends. The full-width space U+3000
/// must survive: paragraph segmentation keys off leading full-width spaces.
fn trim_line_whitespace(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_ascii_whitespace() || c == '\u{A0}')
}

/// Find the element whose class attribute contains the `main_text` token
fn find_main_text(node: &Handle) -> Option<Handle> {
    if let NodeData::Element { .. } = &node.data {
        if let Some(class) = attr_value(node, "class") {
            if class.split_whitespace().any(|token| token == "main_text") {
                return Some(node.clone());
            }
        }
    }
    for child in node.children.borrow().iter() {
        if let Some(found) = find_main_text(child) {
            return Some(found);
        }
    }
    None
}

/// Structural predicate for indented or explicitly styled block containers
fn is_indent_block(node: &Handle) -> bool {
    if let Some(class) = attr_value(node, "class") {
        if class.contains("jisage") || class.contains("burasage") || class.contains("chitsuki") {
            return true;
        }
    }
    if let Some(style) = attr_value(node, "style") {
        if style.contains("margin-left") || style.contains("text-indent") {
            return true;
        }
    }
    false
}

pub(crate) fn tag_lower(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.to_string().to_ascii_lowercase()),
        _ => None,
    }
}

pub(crate) fn attr_value(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| a.name.local.to_string().eq_ignore_ascii_case(attr_name))
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

/// Concatenated text content of a node's subtree
pub(crate) fn text_content(node: &Handle) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out
}

fn collect_text(node: &Handle, out: &mut String) {
    match &node.data {
        NodeData::Text { contents } => out.push_str(&contents.borrow()),
        NodeData::Element { .. } => {
            for child in node.children.borrow().iter() {
                collect_text(child, out);
            }
        }
        _ => {}
    }
}

/// Normalize a ruby construct into the canonical wire form.
///
/// The source dialect uses several sub-formats: reading-only
/// (`<ruby>漢<rt>かん</rt></ruby>`), base/reading pairs with `<rb>`, and
/// base/reading/guide-mark triples with `<rp>` fallback parentheses. When the
/// base text or the reading cannot be located, the element passes through in
/// its literal serialized form.
fn normalize_ruby(node: &Handle) -> String {
    let base = ruby_base_text(node);
    let reading = ruby_reading_text(node);

    match (base, reading) {
        (Some(base), Some(reading)) => crate::ruby::ruby_tag(&base, &reading),
        _ => {
            debug!("Could not normalize ruby element, passing through literally");
            let mut literal = String::new();
            serialize_node(node, &mut literal);
            literal
        }
    }
}

fn ruby_base_text(node: &Handle) -> Option<String> {
    // Prefer explicit <rb> children
    let mut base = String::new();
    for child in node.children.borrow().iter() {
        if tag_lower(child).as_deref() == Some("rb") {
            base.push_str(&text_content(child));
        }
    }

    // Reading-only form: base is the direct content outside rt/rp
    if base.trim().is_empty() {
        base.clear();
        for child in node.children.borrow().iter() {
            match &child.data {
                NodeData::Text { contents } => base.push_str(&contents.borrow()),
                NodeData::Element { .. } => {
                    let tag = tag_lower(child);
                    if tag.as_deref() != Some("rt") && tag.as_deref() != Some("rp") {
                        base.push_str(&text_content(child));
                    }
                }
                _ => {}
            }
        }
    }

    let base = base.trim();
    (!base.is_empty()).then(|| base.to_string())
}

fn ruby_reading_text(node: &Handle) -> Option<String> {
    for child in node.children.borrow().iter() {
        if tag_lower(child).as_deref() == Some("rt") {
            let reading = text_content(child);
            let reading = reading.trim();
            if !reading.is_empty() {
                return Some(reading.to_string());
            }
        }
    }
    None
}

/// Serialize an `<img>` element as a media reference in the `![alt](src)`
/// wire form. An image without a source serializes to nothing.
fn image_reference(node: &Handle) -> String {
    let Some(src) = attr_value(node, "src") else {
        return String::new();
    };
    let alt = attr_value(node, "alt").unwrap_or_default();
    format!("![{}]({})", alt, src)
}

const VOID_TAGS: &[&str] = &["br", "img", "hr", "wbr"];

/// Serialize a node subtree as-is, rewriting the `class` attribute to the
/// output format's `className`.
pub(crate) fn serialize_node(node: &Handle, out: &mut String) {
    match &node.data {
        NodeData::Text { contents } => out.push_str(&escape_text(&contents.borrow())),
        NodeData::Element { name, attrs, .. } => {
            let tag = name.local.to_string();
            out.push('<');
            out.push_str(&tag);
            for attr in attrs.borrow().iter() {
                let key = attr.name.local.to_string();
                let key = if key == "class" { "className".to_string() } else { key };
                out.push(' ');
                out.push_str(&key);
                out.push_str("=\"");
                out.push_str(&escape_attr(&attr.value));
                out.push('"');
            }
            if VOID_TAGS.contains(&tag.to_ascii_lowercase().as_str()) {
                out.push_str(" />");
                return;
            }
            out.push('>');
            for child in node.children.borrow().iter() {
                serialize_node(child, out);
            }
            out.push_str("</");
            out.push_str(&tag);
            out.push('>');
        }
        _ => {}
    }
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
