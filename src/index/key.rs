//! Search key normalization.
//!
//! Every record in a bucket is keyed by a *stem* derived from its label plus
//! an ordinal: `ParamControl.cpp` at position 6 becomes
//! `paramcontrol_2ecpp_6`. The search widget normalizes the user's input the
//! same way, so prefix matching happens on stems.

use std::fmt::Write;

/// Lowercase `name` and hex-escape every ASCII character that is not
/// alphanumeric. Non-ASCII characters pass through untouched.
pub fn search_stem(name: &str) -> String {
    let mut stem = String::with_capacity(name.len());
    for ch in name.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_alphanumeric() || !ch.is_ascii() {
            stem.push(ch);
        } else {
            // ASCII, so the byte value is the char value
            let _ = write!(stem, "_{:02x}", ch as u32);
        }
    }
    stem
}

/// Full record id: `stem_ordinal`.
pub fn record_key(stem: &str, ordinal: usize) -> String {
    format!("{stem}_{ordinal}")
}

/// Split `paramcontrol_2ecpp_6` into (`paramcontrol_2ecpp`, 6).
pub fn split_key(key: &str) -> Option<(&str, usize)> {
    let (stem, ordinal) = key.rsplit_once('_')?;
    if stem.is_empty() || ordinal.is_empty() || !ordinal.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    ordinal.parse().ok().map(|n| (stem, n))
}

/// The character that decides which bucket a label lands in.
pub fn bucket_char(name: &str) -> Option<char> {
    name.chars().flat_map(char::to_lowercase).next()
}

/// Stem prefix every record of the bucket for `letter` starts with.
pub fn letter_stem(letter: char) -> String {
    search_stem(&letter.to_string())
}
