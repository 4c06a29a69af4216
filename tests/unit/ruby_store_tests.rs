/*!
 * Tests for the per-document reading store
 */

use aozora2mdx::errors::AnnotationError;
use aozora2mdx::ruby::RubyStore;

/// Test that readings for the same base are consumed in push order
#[test]
fn test_pop_withMultipleReadings_shouldReturnFifoOrder() {
    let mut store = RubyStore::new();
    store.push("漢", "かん");
    store.push("漢", "から");

    assert_eq!(store.pop("漢"), Some("かん".to_string()));
    assert_eq!(store.pop("漢"), Some("から".to_string()));
    assert_eq!(store.pop("漢"), None);
}

/// Test that the placeholder sentinel is never stored as a reading
#[test]
fn test_push_withPlaceholderSentinel_shouldRefuse() {
    let mut store = RubyStore::new();
    store.push("字", "{{required_ruby}}");

    assert!(store.is_empty());
    assert!(!store.has_reading("字"));
}

/// Test the queued and remaining counters
#[test]
fn test_remaining_withMixedBases_shouldCountAllReadings() {
    let mut store = RubyStore::new();
    store.push("漢", "かん");
    store.push("漢", "から");
    store.push("字", "じ");

    assert_eq!(store.queued("漢"), 2);
    assert_eq!(store.queued("字"), 1);
    assert_eq!(store.queued("猫"), 0);
    assert_eq!(store.len(), 2);
    assert_eq!(store.remaining(), 3);
}

/// Test that draining a base removes its key entirely
#[test]
fn test_pop_withLastReading_shouldRemoveKey() {
    let mut store = RubyStore::new();
    store.push("猫", "ねこ");

    assert_eq!(store.pop("猫"), Some("ねこ".to_string()));
    assert_eq!(store.len(), 0);
    assert!(store.is_empty());
}

/// Test that strict consumption fails loudly on an empty queue
#[test]
fn test_pop_strict_withEmptyQueue_shouldFail() {
    let mut store = RubyStore::new();
    let result = store.pop_strict("猫");

    assert!(matches!(
        result,
        Err(AnnotationError::StoreExhausted { base }) if base == "猫"
    ));
}
