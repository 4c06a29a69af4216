/*!
 * Paragraph segmentation.
 *
 * Groups the extracted line sequence into rendering-level paragraphs with a
 * forward single-pass state machine. Japanese dialogue and verse frequently
 * carry line-initial indicators (full-width spaces, brackets) inside one
 * spoken line or stanza, so quote-continuation and verse-continuation rules
 * run ahead of the new-paragraph trigger.
 */

use log::debug;

use crate::html_extractor::Line;

/// Inline break marker used when a forced break lands inside a paragraph
pub const INLINE_BREAK: &str = "<br />";

const OPENING_QUOTES: &[char] = &['「', '『'];
const CLOSING_QUOTES: &[char] = &['」', '』'];

/// Characters that open a new paragraph when a line starts with one
const PARAGRAPH_OPENERS: &[char] = &['\u{3000}', '「', '『', '【', '〈', '《', '（'];

/// Group lines into paragraphs, each rendered to a single string.
///
/// `strip_leading_indent` removes a single run of leading full-width spaces
/// from each text line before it is appended; indentation is expressed by the
/// output format's styling, not literal characters.
pub fn segment_lines(lines: &[Line], strip_leading_indent: bool) -> Vec<String> {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut accumulator: Vec<Line> = Vec::new();

    for line in lines {
        // Rule 1: an open quotation never breaks on indentation or a forced
        // break; the speech continues into the next physical line.
        if has_open_quote(&accumulator)
            && (*line == Line::Break || starts_with_full_width_space(line))
        {
            append_line(&mut accumulator, line, strip_leading_indent);
            continue;
        }

        // Rule 2: verse heuristic. Short song lines separated by breaks
        // belong to one visual paragraph.
        if line_has_break(line) && accumulator.iter().any(line_has_break) {
            append_line(&mut accumulator, line, strip_leading_indent);
            continue;
        }

        // Rule 3: indentation, an opening bracket, or the break standing in
        // for a flattened indented block starts a new paragraph.
        if starts_new_paragraph(line) && !accumulator.is_empty() {
            flush(&mut paragraphs, &mut accumulator);
        }

        append_line(&mut accumulator, line, strip_leading_indent);
    }

    flush(&mut paragraphs, &mut accumulator);

    debug!("Segmented {} lines into {} paragraphs", lines.len(), paragraphs.len());
    paragraphs
}

fn append_line(accumulator: &mut Vec<Line>, line: &Line, strip_leading_indent: bool) {
    match line {
        Line::Text(text) if strip_leading_indent => {
            let stripped = text.trim_start_matches('\u{3000}');
            if !stripped.is_empty() {
                accumulator.push(Line::Text(stripped.to_string()));
            }
        }
        _ => accumulator.push(line.clone()),
    }
}

/// Flush the accumulator as one paragraph, trimming leading and trailing
/// breaks. Empty paragraphs are dropped.
fn flush(paragraphs: &mut Vec<String>, accumulator: &mut Vec<Line>) {
    while accumulator.first() == Some(&Line::Break) {
        accumulator.remove(0);
    }
    while accumulator.last() == Some(&Line::Break) {
        accumulator.pop();
    }

    if accumulator.is_empty() {
        return;
    }

    let mut rendered = String::new();
    for line in accumulator.iter() {
        match line {
            Line::Text(text) => rendered.push_str(text),
            Line::Break => rendered.push_str(INLINE_BREAK),
            Line::Markup(markup) => rendered.push_str(markup),
        }
    }
    if !rendered.trim().is_empty() {
        paragraphs.push(rendered);
    }
    accumulator.clear();
}

/// Whether the accumulated text contains an opening quotation mark with no
/// matching closing mark yet
fn has_open_quote(accumulator: &[Line]) -> bool {
    let mut opens = 0usize;
    let mut closes = 0usize;
    for line in accumulator {
        let text = match line {
            Line::Text(text) => text.as_str(),
            Line::Markup(markup) => markup.as_str(),
            Line::Break => continue,
        };
        opens += text.chars().filter(|c| OPENING_QUOTES.contains(c)).count();
        closes += text.chars().filter(|c| CLOSING_QUOTES.contains(c)).count();
    }
    opens > closes
}

/// Whether the line carries an inline break marker
fn line_has_break(line: &Line) -> bool {
    match line {
        Line::Break => true,
        Line::Text(text) => text.contains("<br"),
        Line::Markup(markup) => markup.contains("<br"),
    }
}

fn starts_with_full_width_space(line: &Line) -> bool {
    match line {
        Line::Text(text) => text.starts_with('\u{3000}'),
        _ => false,
    }
}

fn starts_new_paragraph(line: &Line) -> bool {
    match line {
        // The break inserted in front of a flattened indented block
        Line::Break => true,
        Line::Text(text) => text
            .chars()
            .next()
            .is_some_and(|c| PARAGRAPH_OPENERS.contains(&c)),
        Line::Markup(_) => false,
    }
}
