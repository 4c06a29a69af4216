//! Script classification for annotation run detection.

/// Returns true if the character belongs to an ideograph run eligible for
/// furigana annotation.
///
/// The accepted set is pinned to the CJK Unified Ideographs block, Extension
/// A, Extension B, the CJK Compatibility Ideographs block, and the ideographic
/// iteration mark 々. Kana, punctuation, and the symbol blocks adjacent to the
/// ideograph ranges are excluded so they never join a run.
pub fn is_ideograph(c: char) -> bool {
    matches!(c,
        '\u{3005}'                    // 々 iteration mark
        | '\u{3400}'..='\u{4DBF}'     // CJK Extension A
        | '\u{4E00}'..='\u{9FFF}'     // CJK Unified Ideographs
        | '\u{F900}'..='\u{FAFF}'     // CJK Compatibility Ideographs
        | '\u{20000}'..='\u{2A6DF}'   // CJK Extension B
    )
}

/// Returns true if the string is a non-empty run of annotatable ideographs.
pub fn is_ideograph_run(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_ideograph)
}
