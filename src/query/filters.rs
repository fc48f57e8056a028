//! Filter sets and their evaluation against analyzed records

use crate::analyzer::PropertyBundle;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A partial set of predicates over a record. Absent fields impose no
/// constraint; present ones are AND-combined.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_palindrome: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains_character: Option<char>,
}

impl FilterSet {
    /// True when no predicate is set
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Evaluate this filter set against an analyzed value
    pub fn matches(&self, bundle: &PropertyBundle, value: &str) -> bool {
        matches(bundle, value, self)
    }
}

/// AND-combination of every predicate present in `filters`.
///
/// Length bounds are inclusive, `word_count` is exact, and
/// `contains_character` is a case-sensitive search of `value` itself.
pub fn matches(bundle: &PropertyBundle, value: &str, filters: &FilterSet) -> bool {
    if let Some(expected) = filters.is_palindrome {
        if bundle.is_palindrome != expected {
            return false;
        }
    }
    if let Some(min) = filters.min_length {
        if bundle.length < min {
            return false;
        }
    }
    if let Some(max) = filters.max_length {
        if bundle.length > max {
            return false;
        }
    }
    if let Some(count) = filters.word_count {
        if bundle.word_count != count {
            return false;
        }
    }
    if let Some(c) = filters.contains_character {
        if !value.contains(c) {
            return false;
        }
    }
    true
}

/// Filter parameters as they arrive on a query string, before coercion
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFilters {
    pub is_palindrome: Option<String>,
    pub min_length: Option<String>,
    pub max_length: Option<String>,
    pub word_count: Option<String>,
    pub contains_character: Option<String>,
}

impl TryFrom<RawFilters> for FilterSet {
    type Error = Error;

    fn try_from(raw: RawFilters) -> Result<Self> {
        let is_palindrome = match raw.is_palindrome.as_deref() {
            None => None,
            Some(token) => match token.to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => {
                    return Err(Error::invalid_filter(
                        "is_palindrome",
                        "must be true or false",
                    ))
                }
            },
        };

        let contains_character = match raw.contains_character.as_deref() {
            None => None,
            Some(token) => {
                let mut chars = token.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => {
                        return Err(Error::invalid_filter(
                            "contains_character",
                            "must be a single character",
                        ))
                    }
                }
            }
        };

        Ok(Self {
            is_palindrome,
            min_length: non_negative("min_length", raw.min_length.as_deref())?,
            max_length: non_negative("max_length", raw.max_length.as_deref())?,
            word_count: non_negative("word_count", raw.word_count.as_deref())?,
            contains_character,
        })
    }
}

/// Whole-token ASCII digits only: no sign, no surrounding whitespace
fn non_negative(field: &str, token: Option<&str>) -> Result<Option<usize>> {
    token
        .map(|t| {
            if t.is_empty() || !t.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::invalid_filter(field, "must be a non-negative integer"));
            }
            t.parse::<usize>()
                .map_err(|_| Error::invalid_filter(field, "is too large"))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;

    fn check(value: &str, filters: &FilterSet) -> bool {
        matches(&analyze(value), value, filters)
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filters = FilterSet::default();
        assert!(filters.is_empty());
        assert!(check("", &filters));
        assert!(check("anything at all", &filters));
    }

    #[test]
    fn test_length_bounds_are_inclusive() {
        let filters = FilterSet {
            min_length: Some(5),
            max_length: Some(7),
            ..Default::default()
        };
        assert!(!check("abcd", &filters));
        assert!(check("abcde", &filters));
        assert!(check("abcdefg", &filters));
        assert!(!check("abcdefgh", &filters));
    }

    #[test]
    fn test_word_count_exact() {
        let filters = FilterSet {
            word_count: Some(2),
            ..Default::default()
        };
        assert!(check("hello world", &filters));
        assert!(!check("hello", &filters));
        assert!(!check("a b c", &filters));
    }

    #[test]
    fn test_palindrome_equality() {
        let yes = FilterSet {
            is_palindrome: Some(true),
            ..Default::default()
        };
        let no = FilterSet {
            is_palindrome: Some(false),
            ..Default::default()
        };
        assert!(check("Racecar", &yes));
        assert!(!check("Racecar", &no));
        assert!(check("hello", &no));
    }

    #[test]
    fn test_contains_character_is_case_sensitive() {
        let filters = FilterSet {
            contains_character: Some('r'),
            ..Default::default()
        };
        assert!(check("racecar", &filters));
        assert!(!check("RACECAR", &filters));
    }

    #[test]
    fn test_all_predicates_combine() {
        let filters = FilterSet {
            is_palindrome: Some(true),
            min_length: Some(3),
            word_count: Some(1),
            contains_character: Some('c'),
            ..Default::default()
        };
        assert!(check("racecar", &filters));
        assert!(!check("noon", &filters));
        assert!(!check("race car", &filters));
    }

    #[test]
    fn test_widening_bounds_keeps_matches() {
        let values = ["a", "abc", "hello world", "racecar", "x y z w"];
        let narrow = FilterSet {
            min_length: Some(3),
            max_length: Some(7),
            ..Default::default()
        };
        let wide = FilterSet {
            min_length: Some(1),
            max_length: Some(20),
            ..Default::default()
        };
        for value in values {
            if check(value, &narrow) {
                assert!(check(value, &wide), "{value}");
            }
        }
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let filters = FilterSet {
            is_palindrome: Some(true),
            min_length: Some(6),
            ..Default::default()
        };
        let json = serde_json::to_value(&filters).unwrap();
        assert_eq!(json, serde_json::json!({"is_palindrome": true, "min_length": 6}));
    }

    #[test]
    fn test_raw_filters_coercion() {
        let raw = RawFilters {
            is_palindrome: Some("TRUE".to_string()),
            min_length: Some("2".to_string()),
            max_length: Some("10".to_string()),
            word_count: Some("1".to_string()),
            contains_character: Some("é".to_string()),
        };
        let filters = FilterSet::try_from(raw).unwrap();
        assert_eq!(filters.is_palindrome, Some(true));
        assert_eq!(filters.min_length, Some(2));
        assert_eq!(filters.max_length, Some(10));
        assert_eq!(filters.word_count, Some(1));
        assert_eq!(filters.contains_character, Some('é'));
    }

    #[test]
    fn test_raw_filters_rejects_bad_values() {
        let cases = [
            RawFilters {
                is_palindrome: Some("yes".to_string()),
                ..Default::default()
            },
            RawFilters {
                min_length: Some("-1".to_string()),
                ..Default::default()
            },
            RawFilters {
                max_length: Some("ten".to_string()),
                ..Default::default()
            },
            RawFilters {
                word_count: Some("".to_string()),
                ..Default::default()
            },
            RawFilters {
                min_length: Some(" 5".to_string()),
                ..Default::default()
            },
            RawFilters {
                max_length: Some("+5".to_string()),
                ..Default::default()
            },
            RawFilters {
                word_count: Some("99999999999999999999999999".to_string()),
                ..Default::default()
            },
            RawFilters {
                contains_character: Some("ab".to_string()),
                ..Default::default()
            },
            RawFilters {
                contains_character: Some(String::new()),
                ..Default::default()
            },
        ];
        for raw in cases {
            let err = FilterSet::try_from(raw).unwrap_err();
            assert!(matches!(err, Error::InvalidFilterValue { .. }));
        }
    }
}
