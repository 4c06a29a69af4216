//! Bibliographic field scrape: title, author, translator.
//!
//! Best effort only; a page without the expected header elements yields
//! `None` fields and the conversion proceeds without frontmatter.

use markup5ever_rcdom::Handle;

use crate::html_extractor::{attr_value, parse_html, tag_lower, text_content};

/// Bibliographic metadata scraped from the source page header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookMetadata {
    /// Work title
    pub title: Option<String>,
    /// Author name
    pub author: Option<String>,
    /// Translator name, when the work is a translation
    pub translator: Option<String>,
}

impl BookMetadata {
    /// True when no field could be scraped
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.translator.is_none()
    }
}

/// Scrape bibliographic fields from the source page.
///
/// Looks for elements whose class contains `title`, `author`, or
/// `translator`; the document `<title>` element is the fallback for the work
/// title.
pub fn scrape_metadata(html: &str) -> BookMetadata {
    let dom = parse_html(html);
    let mut metadata = BookMetadata::default();
    scrape_node(&dom.document, &mut metadata);

    if metadata.title.is_none() {
        metadata.title = find_document_title(&dom.document);
    }

    metadata
}

fn scrape_node(node: &Handle, metadata: &mut BookMetadata) {
    if let Some(class) = attr_value(node, "class") {
        let text = text_content(node);
        let text = text.trim();
        if !text.is_empty() {
            let has_token = |token: &str| class.split_whitespace().any(|t| t == token);
            if metadata.title.is_none() && has_token("title") {
                metadata.title = Some(text.to_string());
            } else if metadata.author.is_none() && has_token("author") {
                metadata.author = Some(text.to_string());
            } else if metadata.translator.is_none() && has_token("translator") {
                metadata.translator = Some(text.to_string());
            }
        }
    }

    for child in node.children.borrow().iter() {
        scrape_node(child, metadata);
    }
}

fn find_document_title(node: &Handle) -> Option<String> {
    if tag_lower(node).as_deref() == Some("title") {
        let text = text_content(node);
        let text = text.trim();
        if !text.is_empty() {
            return Some(text.to_string());
        }
    }
    for child in node.children.borrow().iter() {
        if let Some(title) = find_document_title(child) {
            return Some(title);
        }
    }
    None
}
