//! Reapplication of stored readings onto freshly converted text.
//!
//! This is the idempotent heart of the converter: running it over text that
//! already carries annotations changes nothing, because every existing
//! construct (and every media reference) is classified as a protected span
//! before the ideograph scan runs.

use std::collections::HashMap;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::AnnotationError;
use crate::ruby::extract::{RUBY_PARSE_REGEX, RUBY_SCAN_REGEX};
use crate::ruby::script::is_ideograph;
use crate::ruby::store::RubyStore;
use crate::ruby::{ruby_tag, RUBY_PLACEHOLDER};

/// Media reference in the `![alt](path)` wire form. Preserved verbatim and
/// never scanned for ideographs.
static MEDIA_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[[^\]]*\]\([^)]*\)").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReapplyMode {
    /// Uncovered runs degrade to a placeholder annotation. Never fails.
    BestEffort,
    /// Uncovered runs are a contract violation and fail loudly.
    Strict,
}

/// Annotate every unprotected ideograph run in `text`, consuming readings
/// from `store` (drained in place). Uncovered runs receive a placeholder
/// annotation; this pass never fails.
pub fn reapply_readings(text: &str, store: &mut RubyStore) -> String {
    match reapply_inner(text, store, ReapplyMode::BestEffort) {
        Ok(annotated) => annotated,
        // BestEffort never produces an error
        Err(_) => unreachable!("best-effort reapplication cannot fail"),
    }
}

/// Strict variant for callers asserting the store fully covers the text:
/// any run that would fall back to a placeholder is `StoreExhausted`.
pub fn try_reapply_readings_strict(
    text: &str,
    store: &mut RubyStore,
) -> Result<String, AnnotationError> {
    reapply_inner(text, store, ReapplyMode::Strict)
}

fn reapply_inner(
    text: &str,
    store: &mut RubyStore,
    mode: ReapplyMode,
) -> Result<String, AnnotationError> {
    let spans = protected_spans(text);
    let mut out = String::with_capacity(text.len() + 64);
    let mut pos = 0usize;

    for &(start, end) in &spans {
        annotate_segment(&text[pos..start], store, mode, &mut out)?;

        let protected = &text[start..end];
        if let Some(caps) = RUBY_PARSE_REGEX.captures(protected) {
            debug!("Preserving existing annotation {} -> {}", &caps[1], &caps[2]);
        }
        out.push_str(protected);
        pos = end;
    }
    annotate_segment(&text[pos..], store, mode, &mut out)?;

    Ok(out)
}

/// Byte ranges that the ideograph scanner must never touch: media references
/// first, then existing annotation constructs that do not overlap them.
/// Returned sorted and non-overlapping.
fn protected_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans: Vec<(usize, usize)> = MEDIA_REGEX
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect();

    for m in RUBY_SCAN_REGEX.find_iter(text) {
        let overlaps = spans
            .iter()
            .any(|&(start, end)| m.start() < end && start < m.end());
        if !overlaps {
            spans.push((m.start(), m.end()));
        }
    }

    spans.sort_unstable();
    spans
}

/// Copy a scannable segment into `out`, annotating each maximal ideograph run.
fn annotate_segment(
    segment: &str,
    store: &mut RubyStore,
    mode: ReapplyMode,
    out: &mut String,
) -> Result<(), AnnotationError> {
    let mut run = String::new();

    for c in segment.chars() {
        if is_ideograph(c) {
            run.push(c);
            continue;
        }
        if !run.is_empty() {
            annotate_run(&run, store, mode, out)?;
            run.clear();
        }
        out.push(c);
    }
    if !run.is_empty() {
        annotate_run(&run, store, mode, out)?;
    }

    Ok(())
}

/// Annotate one ideograph run.
///
/// A single character consumes its queued reading when one exists. A longer
/// run is annotated character-by-character if and only if every character is
/// fully covered (queue length >= occurrences of that character within the
/// run); otherwise the whole run gets one placeholder annotation, never a
/// partial one.
fn annotate_run(
    run: &str,
    store: &mut RubyStore,
    mode: ReapplyMode,
    out: &mut String,
) -> Result<(), AnnotationError> {
    let chars: Vec<char> = run.chars().collect();

    if chars.len() == 1 {
        match store.pop(run) {
            Some(reading) => out.push_str(&ruby_tag(run, &reading)),
            None => emit_placeholder(run, mode, out)?,
        }
        return Ok(());
    }

    let mut occurrences: HashMap<char, usize> = HashMap::new();
    for &c in &chars {
        *occurrences.entry(c).or_insert(0) += 1;
    }
    let covered = occurrences
        .iter()
        .all(|(c, count)| store.queued(&c.to_string()) >= *count);

    if !covered {
        return emit_placeholder(run, mode, out);
    }

    for &c in &chars {
        let base = c.to_string();
        // Guarded by the coverage check above
        let Some(reading) = store.pop(&base) else {
            emit_placeholder(&base, mode, out)?;
            continue;
        };
        out.push_str(&ruby_tag(&base, &reading));
    }

    Ok(())
}

fn emit_placeholder(
    run: &str,
    mode: ReapplyMode,
    out: &mut String,
) -> Result<(), AnnotationError> {
    match mode {
        ReapplyMode::BestEffort => {
            out.push_str(&ruby_tag(run, RUBY_PLACEHOLDER));
            Ok(())
        }
        ReapplyMode::Strict => Err(AnnotationError::StoreExhausted {
            base: run.to_string(),
        }),
    }
}
