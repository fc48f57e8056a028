//! Natural-language filter parser
//!
//! Translates a free-text query such as "palindromes longer than 5
//! characters" into a [`FilterSet`]. Parsing is a fold over a fixed, ordered
//! list of pattern rules applied to the lowercased query. Every rule whose
//! pattern matches assigns one field; when two rules target the same field
//! the later one wins. The order below is therefore part of the observable
//! behavior:
//!
//! | # | Pattern                                   | Assigns                      |
//! |---|-------------------------------------------|------------------------------|
//! | 1 | `single word`                             | `word_count = 1`             |
//! | 2 | `two words` / `2 words`                   | `word_count = 2`             |
//! | 3 | `<N> word(s)`                             | `word_count = N`             |
//! | 4 | `palindrome` / `palindromic`              | `is_palindrome = true`       |
//! | 5 | `longer than N` / `greater than N`        | `min_length = N + 1`         |
//! | 6 | `shorter than N` / `less than N`          | `max_length = N - 1`         |
//! | 7 | `at least N`                              | `min_length = N`             |
//! | 8 | `at most N`                               | `max_length = N`             |
//! | 9 | `contain(s/ing) (the) letter X` / `with letter X` | `contains_character = X` |
//! | 10| `containing X`                            | `contains_character = X`     |
//! | 11| `first vowel`                             | `contains_character = 'a'`   |
//! | 12| `last vowel`                              | `contains_character = 'u'`   |

use crate::error::{Error, Result};
use crate::query::filters::FilterSet;
use regex::{Captures, Regex};

/// Working state of the rule fold
#[derive(Default)]
struct ParseState {
    filters: FilterSet,
    /// Set by "shorter than 0"; cleared by any later upper-bound write
    max_below_zero: bool,
}

/// How a matched rule writes into the parse state
type Projector = fn(&Captures<'_>, &mut ParseState);

struct CompiledRule {
    name: &'static str,
    pattern: Regex,
    apply: Projector,
}

/// Rule table in evaluation order
const RULES: &[(&str, &str, Projector)] = &[
    ("single_word", r"single word", one_word),
    ("two_words", r"two words|2 words", two_words),
    ("n_words", r"([0-9]+)\s+words?", n_words),
    ("palindrome", r"palindrome|palindromic", palindrome),
    (
        "longer_than",
        r"longer than ([0-9]+)|greater than ([0-9]+)",
        longer_than,
    ),
    (
        "shorter_than",
        r"shorter than ([0-9]+)|less than ([0-9]+)",
        shorter_than,
    ),
    ("at_least", r"at least ([0-9]+)", at_least),
    ("at_most", r"at most ([0-9]+)", at_most),
    (
        "letter",
        r"contain(?:ing|s)? (?:the )?letter ([a-z])|with letter ([a-z])",
        contains_letter,
    ),
    ("containing", r"containing ([a-z])\b", contains_letter),
    ("first_vowel", r"first vowel", first_vowel),
    ("last_vowel", r"last vowel", last_vowel),
];

fn one_word(_: &Captures<'_>, state: &mut ParseState) {
    state.filters.word_count = Some(1);
}

fn two_words(_: &Captures<'_>, state: &mut ParseState) {
    state.filters.word_count = Some(2);
}

fn n_words(caps: &Captures<'_>, state: &mut ParseState) {
    state.filters.word_count = Some(number(caps));
}

fn palindrome(_: &Captures<'_>, state: &mut ParseState) {
    state.filters.is_palindrome = Some(true);
}

/// Strict lower bound, stored inclusive
fn longer_than(caps: &Captures<'_>, state: &mut ParseState) {
    state.filters.min_length = Some(number(caps).saturating_add(1));
}

/// Strict upper bound, stored inclusive
fn shorter_than(caps: &Captures<'_>, state: &mut ParseState) {
    match number(caps).checked_sub(1) {
        Some(bound) => {
            state.filters.max_length = Some(bound);
            state.max_below_zero = false;
        }
        None => {
            state.filters.max_length = None;
            state.max_below_zero = true;
        }
    }
}

fn at_least(caps: &Captures<'_>, state: &mut ParseState) {
    state.filters.min_length = Some(number(caps));
}

fn at_most(caps: &Captures<'_>, state: &mut ParseState) {
    state.filters.max_length = Some(number(caps));
    state.max_below_zero = false;
}

fn contains_letter(caps: &Captures<'_>, state: &mut ParseState) {
    state.filters.contains_character = capture(caps).and_then(|s| s.chars().next());
}

// Fixed aliases, not derived from the query or the stored values
fn first_vowel(_: &Captures<'_>, state: &mut ParseState) {
    state.filters.contains_character = Some('a');
}

fn last_vowel(_: &Captures<'_>, state: &mut ParseState) {
    state.filters.contains_character = Some('u');
}

/// First participating capture group
fn capture<'h>(caps: &Captures<'h>) -> Option<&'h str> {
    caps.iter().skip(1).flatten().next().map(|m| m.as_str())
}

/// Digit runs too large for `usize` saturate
fn number(caps: &Captures<'_>) -> usize {
    capture(caps)
        .map(|digits| digits.parse().unwrap_or(usize::MAX))
        .unwrap_or_default()
}

/// Compiled natural-language query parser
pub struct QueryParser {
    rules: Vec<CompiledRule>,
}

impl QueryParser {
    /// Compile the rule table
    pub fn new() -> Result<Self> {
        let rules = RULES
            .iter()
            .map(|&(name, pattern, apply)| {
                let pattern = Regex::new(pattern).map_err(|e| {
                    Error::Internal(format!("Invalid pattern for rule '{}': {}", name, e))
                })?;
                Ok(CompiledRule {
                    name,
                    pattern,
                    apply,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    /// Parse a query into a filter set.
    ///
    /// A query that matches no rule yields an empty set; the caller decides
    /// whether that is an error. Fails with [`Error::ConflictingFilters`]
    /// when the derived bounds leave no admissible length.
    pub fn parse(&self, query: &str) -> Result<FilterSet> {
        let lowered = query.to_lowercase();

        let state = self
            .rules
            .iter()
            .fold(ParseState::default(), |mut state, rule| {
                if let Some(caps) = rule.pattern.captures(&lowered) {
                    tracing::trace!(rule = rule.name, matched = &caps[0], "Query rule matched");
                    (rule.apply)(&caps, &mut state);
                }
                state
            });

        if state.max_below_zero {
            return Err(Error::ConflictingFilters(
                "no length is shorter than 0".to_string(),
            ));
        }

        let filters = state.filters;
        if let (Some(min), Some(max)) = (filters.min_length, filters.max_length) {
            if min > max {
                return Err(Error::ConflictingFilters(format!(
                    "min_length ({}) cannot be greater than max_length ({})",
                    min, max
                )));
            }
        }

        Ok(filters)
    }

    /// Parse and reject queries in which nothing was recognized
    pub fn parse_required(&self, query: &str) -> Result<FilterSet> {
        let filters = self.parse(query)?;
        if filters.is_empty() {
            return Err(Error::UnparseableQuery(query.to_string()));
        }
        Ok(filters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(query: &str) -> Result<FilterSet> {
        QueryParser::new().unwrap().parse(query)
    }

    #[test]
    fn test_palindromes_longer_than() {
        let filters = parse("palindromes longer than 5 characters").unwrap();
        assert_eq!(
            filters,
            FilterSet {
                is_palindrome: Some(true),
                min_length: Some(6),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_single_word_palindromic() {
        let filters = parse("all single word palindromic strings").unwrap();
        assert_eq!(filters.word_count, Some(1));
        assert_eq!(filters.is_palindrome, Some(true));
    }

    #[test]
    fn test_generic_word_count_overrides_two_words() {
        let filters = parse("two words and 3 words").unwrap();
        assert_eq!(filters.word_count, Some(3));
    }

    #[test]
    fn test_two_words_spelled_out() {
        assert_eq!(parse("strings with two words").unwrap().word_count, Some(2));
        assert_eq!(parse("exactly 1 word").unwrap().word_count, Some(1));
    }

    #[test]
    fn test_conflicting_bounds() {
        let err = parse("longer than 10 characters and shorter than 5 characters").unwrap_err();
        assert!(matches!(err, Error::ConflictingFilters(_)));
        assert!(err.is_conflict());
    }

    #[test]
    fn test_shorter_than_zero_conflicts() {
        let err = parse("strings shorter than 0 characters").unwrap_err();
        assert!(matches!(err, Error::ConflictingFilters(_)));
    }

    #[test]
    fn test_later_upper_bound_replaces_shorter_than_zero() {
        let filters = parse("shorter than 0 or rather at most 5").unwrap();
        assert_eq!(filters.max_length, Some(5));
    }

    #[test]
    fn test_at_most_overrides_shorter_than() {
        let filters = parse("shorter than 10 and at most 3").unwrap();
        assert_eq!(filters.max_length, Some(3));
    }

    #[test]
    fn test_containing_overrides_letter_form() {
        let filters = parse("with letter a containing b").unwrap();
        assert_eq!(filters.contains_character, Some('b'));
    }

    #[test]
    fn test_length_phrases() {
        let filters = parse("greater than 2 and less than 9").unwrap();
        assert_eq!(filters.min_length, Some(3));
        assert_eq!(filters.max_length, Some(8));

        let filters = parse("at least 4 and at most 4 characters").unwrap();
        assert_eq!(filters.min_length, Some(4));
        assert_eq!(filters.max_length, Some(4));
    }

    #[test]
    fn test_at_least_overrides_longer_than() {
        let filters = parse("longer than 10, well at least 3").unwrap();
        assert_eq!(filters.min_length, Some(3));
    }

    #[test]
    fn test_letter_phrases() {
        assert_eq!(
            parse("strings containing the letter z").unwrap().contains_character,
            Some('z')
        );
        assert_eq!(
            parse("contains letter q").unwrap().contains_character,
            Some('q')
        );
        assert_eq!(
            parse("words with letter B").unwrap().contains_character,
            Some('b')
        );
    }

    #[test]
    fn test_containing_single_letter() {
        assert_eq!(
            parse("strings containing x").unwrap().contains_character,
            Some('x')
        );
        // "containing xy" is not a single letter
        assert!(parse("strings containing xy").unwrap().is_empty());
    }

    #[test]
    fn test_vowel_aliases() {
        let filters = parse("single word palindromic strings that contain the first vowel").unwrap();
        assert_eq!(filters.contains_character, Some('a'));
        assert_eq!(filters.word_count, Some(1));

        assert_eq!(
            parse("containing the letter e and the last vowel")
                .unwrap()
                .contains_character,
            Some('u')
        );
    }

    #[test]
    fn test_case_insensitive_query() {
        let filters = parse("PALINDROMES Longer Than 3").unwrap();
        assert_eq!(filters.is_palindrome, Some(true));
        assert_eq!(filters.min_length, Some(4));
    }

    #[test]
    fn test_unrecognized_query_is_empty() {
        assert!(parse("show me something nice").unwrap().is_empty());
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_required_rejects_empty() {
        let parser = QueryParser::new().unwrap();
        let err = parser.parse_required("gibberish").unwrap_err();
        assert!(matches!(err, Error::UnparseableQuery(_)));
        assert!(parser.parse_required("palindrome").is_ok());
    }

    #[test]
    fn test_huge_numbers_saturate() {
        let filters = parse("at most 99999999999999999999999999 characters").unwrap();
        assert_eq!(filters.max_length, Some(usize::MAX));
    }
}
