//! Text analyzer
//!
//! Computes the fixed set of derived properties for a text value. Every
//! metric counts Unicode scalar values (`char`), so `length`, the palindrome
//! comparison, `unique_characters` and `character_frequency` all agree and
//! the frequency counts always sum to `length`.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashSet};

/// Properties derived from a single text value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyBundle {
    pub length: usize,
    pub is_palindrome: bool,
    pub unique_characters: usize,
    pub word_count: usize,
    /// SHA-256 of the exact UTF-8 bytes, lowercase hex. Used as the record id.
    #[serde(rename = "sha256_hash")]
    pub fingerprint: String,
    #[serde(rename = "character_frequency_map")]
    pub character_frequency: BTreeMap<char, usize>,
}

/// Analyze a text value. Total for every input, including the empty string.
pub fn analyze(value: &str) -> PropertyBundle {
    let character_frequency = character_frequency(value);

    PropertyBundle {
        length: value.chars().count(),
        is_palindrome: is_palindrome(value),
        unique_characters: unique_characters(value),
        word_count: word_count(value),
        fingerprint: fingerprint(value),
        character_frequency,
    }
}

/// Case-insensitive palindrome check with no other normalization.
///
/// Lowercasing is applied per `char` so that the result is the same for a
/// value and its reverse.
pub fn is_palindrome(value: &str) -> bool {
    let folded: Vec<char> = value.chars().flat_map(char::to_lowercase).collect();
    folded.iter().eq(folded.iter().rev())
}

/// Distinct characters, case-sensitive, whitespace included
pub fn unique_characters(value: &str) -> usize {
    value.chars().collect::<HashSet<_>>().len()
}

/// Maximal runs of non-whitespace
pub fn word_count(value: &str) -> usize {
    value.split_whitespace().count()
}

/// Lowercase hex SHA-256 of the value's bytes
pub fn fingerprint(value: &str) -> String {
    format!("{:x}", Sha256::digest(value.as_bytes()))
}

/// Occurrences per character, case-sensitive, whitespace included
pub fn character_frequency(value: &str) -> BTreeMap<char, usize> {
    let mut frequency = BTreeMap::new();
    for c in value.chars() {
        *frequency.entry(c).or_insert(0) += 1;
    }
    frequency
}
