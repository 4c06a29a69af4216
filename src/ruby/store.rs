//! Per-document store of manually curated readings.

use std::collections::{HashMap, VecDeque};

use log::debug;

use crate::errors::AnnotationError;
use crate::ruby::RUBY_PLACEHOLDER;

/// Mapping from base text (an ideograph sequence) to an ordered queue of
/// readings, in first-seen document order.
///
/// The store is owned, mutable state threaded explicitly through one
/// reapplication run: consuming a reading removes it from the front of its
/// queue, so a base text occurring N times in the harvested document yields
/// up to N readings, handed out in the same order on reapplication. A
/// partially drained store must not be reused for an unrelated document.
#[derive(Debug, Default, Clone)]
pub struct RubyStore {
    readings: HashMap<String, VecDeque<String>>,
}

impl RubyStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a reading to the queue for `base`.
    ///
    /// The placeholder sentinel is never data; pushing it is silently refused.
    pub fn push(&mut self, base: &str, reading: &str) {
        if reading == RUBY_PLACEHOLDER {
            debug!("Refusing to store placeholder reading for '{}'", base);
            return;
        }
        self.readings
            .entry(base.to_string())
            .or_default()
            .push_back(reading.to_string());
    }

    /// Consume the front reading for `base` (FIFO). Returns None when no
    /// reading is queued.
    pub fn pop(&mut self, base: &str) -> Option<String> {
        let queue = self.readings.get_mut(base)?;
        let reading = queue.pop_front();
        if queue.is_empty() {
            self.readings.remove(base);
        }
        reading
    }

    /// Strict-mode consume: an empty queue for `base` is a contract violation.
    pub fn pop_strict(&mut self, base: &str) -> Result<String, AnnotationError> {
        self.pop(base).ok_or_else(|| AnnotationError::StoreExhausted {
            base: base.to_string(),
        })
    }

    /// Number of readings currently queued for `base`
    pub fn queued(&self, base: &str) -> usize {
        self.readings.get(base).map_or(0, |q| q.len())
    }

    /// Whether at least one reading is queued for `base`
    pub fn has_reading(&self, base: &str) -> bool {
        self.queued(base) > 0
    }

    /// Number of distinct base texts with queued readings
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// True when no readings are queued at all
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Total number of queued readings across all base texts. After a
    /// reapplication run this is the count of harvested readings that found
    /// no matching occurrence in the fresh text.
    pub fn remaining(&self) -> usize {
        self.readings.values().map(|q| q.len()).sum()
    }
}
