/*!
 * Tests for ideograph classification
 */

use aozora2mdx::ruby::script::{is_ideograph, is_ideograph_run};

/// Test that common ideographs and the iteration mark are accepted
#[test]
fn test_is_ideograph_withIdeographs_shouldAccept() {
    assert!(is_ideograph('漢'));
    assert!(is_ideograph('猫'));
    assert!(is_ideograph('々'));
}

/// Test that kana, punctuation, and Latin characters are rejected
#[test]
fn test_is_ideograph_withNonIdeographs_shouldReject() {
    assert!(!is_ideograph('ね'));
    assert!(!is_ideograph('ネ'));
    assert!(!is_ideograph('。'));
    assert!(!is_ideograph('a'));
    assert!(!is_ideograph('\u{3000}'));
}

/// Test that symbols adjacent to the ideograph blocks do not join runs
#[test]
fn test_is_ideograph_withAdjacentSymbols_shouldReject() {
    // 〆 and 〇 sit near the CJK blocks but are not annotatable ideographs
    assert!(!is_ideograph('\u{3006}'));
    assert!(!is_ideograph('\u{3007}'));
}

/// Test run classification over whole strings
#[test]
fn test_is_ideograph_run_withMixedStrings_shouldClassify() {
    assert!(is_ideograph_run("漢字"));
    assert!(is_ideograph_run("人々"));
    assert!(!is_ideograph_run("お茶"));
    assert!(!is_ideograph_run(""));
}
