//! Expiry specification parsing.
//!
//! A cookie lifetime is configured either as a raw number of seconds or as
//! a compound `[plus] {<count> <unit>}...` expression summed across units,
//! e.g. `"plus 2 weeks 3 days"`. Unit words match on their first letters,
//! case-insensitively: `mo*` months, `mi*` minutes, and single letters for
//! the rest.

use crate::base::error::ConfigError;

const SECONDS_PER_DAY: i64 = 60 * 60 * 24;

/// Parse an expiry specification into seconds.
///
/// `0` means a session cookie: no expiration attribute is rendered at all.
pub fn parse_expiry(text: &str) -> Result<i64, ConfigError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ConfigError::EmptySetting("expires"));
    }

    // The simple case first: a raw number of seconds.
    if text.bytes().all(|b| b.is_ascii_digit()) {
        return text
            .parse::<i64>()
            .map_err(|_| ConfigError::ExpiresNumberExpected(text.to_string()));
    }

    let mut words = text.split_ascii_whitespace().peekable();

    // Optional leading "plus", matched on its first letter.
    if words
        .peek()
        .and_then(|w| w.as_bytes().first())
        .is_some_and(|b| b.eq_ignore_ascii_case(&b'p'))
    {
        words.next();
    }

    let mut total: i64 = 0;
    let mut saw_term = false;

    while let Some(count_word) = words.next() {
        let count: i64 = count_word
            .parse()
            .ok()
            .filter(|count| *count >= 0)
            .ok_or_else(|| ConfigError::ExpiresNumberExpected(count_word.to_string()))?;

        let unit_word = words
            .next()
            .ok_or_else(|| ConfigError::ExpiresMissingUnit(count_word.to_string()))?;

        let factor = unit_factor(unit_word)
            .ok_or_else(|| ConfigError::ExpiresUnknownUnit(unit_word.to_string()))?;

        total += factor * count;
        saw_term = true;
    }

    if !saw_term {
        return Err(ConfigError::ExpiresNumberExpected(text.to_string()));
    }

    Ok(total)
}

/// Seconds per unit, keyed by first-letters prefix.
fn unit_factor(word: &str) -> Option<i64> {
    let prefix = |n: usize, full: &str| {
        word.len() >= n && word.as_bytes()[..n].eq_ignore_ascii_case(&full.as_bytes()[..n])
    };

    if prefix(1, "years") {
        Some(SECONDS_PER_DAY * 365)
    } else if prefix(2, "months") {
        Some(SECONDS_PER_DAY * 30)
    } else if prefix(1, "weeks") {
        Some(SECONDS_PER_DAY * 7)
    } else if prefix(1, "days") {
        Some(SECONDS_PER_DAY)
    } else if prefix(1, "hours") {
        Some(60 * 60)
    } else if prefix(2, "minutes") {
        Some(60)
    } else if prefix(1, "seconds") {
        Some(1)
    } else {
        None
    }
}
