//! Code-point classification for Chinese, Japanese and Korean text.
//!
//! CJK scripts wrap without inter-word spaces, so a newline in the middle of a
//! Chinese sentence must not turn into a visible space when the paragraph is
//! reflowed. These predicates operate on decoded `char`s, never on byte
//! offsets, so characters outside the basic multilingual plane classify the
//! same way as everything else.

use std::ops::RangeInclusive;

/// Code-point ranges treated as CJK.
const CJK_RANGES: &[RangeInclusive<u32>] = &[
    // CJK symbols and punctuation (ideographic space, 。、「」)
    0x3000..=0x303F,
    // hiragana and katakana
    0x3040..=0x30FF,
    // unified ideographs extension A through the main unified block
    0x3400..=0x9FFF,
    // compatibility ideographs
    0xF900..=0xFAFF,
    // half-width and full-width forms (，！？ and full-width latin)
    0xFF00..=0xFFEF,
    // supplementary ideographic planes, extension B onwards
    0x20000..=0x2FA1F,
];

/// Whether a character falls inside one of the CJK ranges.
pub fn is_cjk(c: char) -> bool {
    let cp = c as u32;
    CJK_RANGES.iter().any(|range| range.contains(&cp))
}

/// Whether the last character of `text` is CJK. Empty text is not.
pub fn ends_with_cjk(text: &str) -> bool {
    text.chars().next_back().is_some_and(is_cjk)
}

/// Whether the first character of `text` is CJK. Empty text is not.
pub fn starts_with_cjk(text: &str) -> bool {
    text.chars().next().is_some_and(is_cjk)
}
