//! Order-token helpers: weaker-guarantee companions to the Snowflake
//! generator.
//!
//! These produce human-readable string tokens rather than packed integers.
//! [`uuid_token`] is practically (probabilistically) unique but not monotonic;
//! [`counter_token`] has a strictly increasing suffix within a timestamp
//! bucket but resets on process restart; [`random_token`] is just a random
//! alphanumeric string. None of them are secrets.

use std::hash::{BuildHasher, RandomState};
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use rand::{Rng, rng};
use uuid::Uuid;

/// Compact wall-clock prefix embedded in every token: `yyyyMMddHHmmss`.
const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// First value handed out by a default [`TokenCounter`] is `start + 1`.
const DEFAULT_COUNTER_START: i64 = 1000;

fn formatted_now() -> impl std::fmt::Display {
    Utc::now().format(TIMESTAMP_FORMAT)
}

/// Returns `prefix + yyyyMMddHHmmss + non-negative hash of a fresh UUID`.
///
/// The hash of a random v4 UUID makes consecutive tokens non-contiguous,
/// which is the point: order numbers built from these don't leak issue rates.
/// Uniqueness is probabilistic only; use [`SnowflakeGenerator`] where
/// collisions must be impossible by construction.
///
/// # Example
/// ```
/// let token = snowmint::uuid_token("ORD");
/// assert!(token.starts_with("ORD"));
/// ```
///
/// [`SnowflakeGenerator`]: crate::SnowflakeGenerator
pub fn uuid_token(prefix: &str) -> String {
    let hash = RandomState::new().hash_one(Uuid::new_v4()) as i64;
    // serialize as non-negative regardless of the hash's sign bit
    format!("{prefix}{}{}", formatted_now(), hash.unsigned_abs())
}

/// A process-wide monotonically increasing order counter.
///
/// One shared [`AtomicI64`]; tokens issued within the same timestamp bucket
/// carry strictly increasing suffixes. The counter is unbounded and resets
/// only on process restart, so cross-restart uniqueness relies on the
/// timestamp component.
pub struct TokenCounter {
    counter: AtomicI64,
}

impl TokenCounter {
    /// Creates a counter starting at the conventional default (1000).
    pub const fn new() -> Self {
        Self::with_start(DEFAULT_COUNTER_START)
    }

    /// Creates a counter with an explicit starting value.
    ///
    /// The first token issued carries `start + 1`.
    pub const fn with_start(start: i64) -> Self {
        Self {
            counter: AtomicI64::new(start),
        }
    }

    /// Atomically increments the counter and returns
    /// `prefix + yyyyMMddHHmmss + value`.
    pub fn token(&self, prefix: &str) -> String {
        let value = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{prefix}{}{value}", formatted_now())
    }

    /// Current counter value (the suffix of the last issued token).
    pub fn value(&self) -> i64 {
        self.counter.load(Ordering::Relaxed)
    }
}

impl Default for TokenCounter {
    fn default() -> Self {
        Self::new()
    }
}

static PROCESS_COUNTER: TokenCounter = TokenCounter::new();

/// [`TokenCounter::token`] on a process-wide shared counter.
///
/// Tokens issued within the same second are contiguous, which makes them easy
/// to eyeball in logs but also predictable; prefer [`uuid_token`] when order
/// numbers must not be guessable.
pub fn counter_token(prefix: &str) -> String {
    PROCESS_COUNTER.token(prefix)
}

/// Produces `length` characters, each independently a letter (50%, uniform
/// case) or a digit (50%).
///
/// `length == 0` yields the empty string. Uses the thread-local RNG; the
/// output is human-readable filler, not a secret.
///
/// # Example
/// ```
/// let token = snowmint::random_token(10);
/// assert_eq!(token.len(), 10);
/// assert!(token.bytes().all(|b| b.is_ascii_alphanumeric()));
/// ```
pub fn random_token(length: usize) -> String {
    let mut rng = rng();
    let mut token = String::with_capacity(length);
    for _ in 0..length {
        let ch = if rng.random_bool(0.5) {
            let case = if rng.random_bool(0.5) { b'A' } else { b'a' };
            char::from(case + rng.random_range(0..26u8))
        } else {
            char::from(b'0' + rng.random_range(0..10u8))
        };
        token.push(ch);
    }
    token
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_timestamp(token: &str, prefix: &str) -> (String, String) {
        let rest = token.strip_prefix(prefix).expect("prefix present");
        let (ts, suffix) = rest.split_at(14);
        (ts.to_string(), suffix.to_string())
    }

    #[test]
    fn uuid_token_shape() {
        let token = uuid_token("NO");
        let (ts, hash) = split_timestamp(&token, "NO");
        assert!(ts.bytes().all(|b| b.is_ascii_digit()));
        assert!(!hash.is_empty());
        assert!(hash.bytes().all(|b| b.is_ascii_digit()));
    }

    #[test]
    fn uuid_tokens_differ() {
        assert_ne!(uuid_token("NO"), uuid_token("NO"));
    }

    #[test]
    fn counter_token_suffix_increases() {
        let counter = TokenCounter::with_start(500);
        let (_, a) = split_timestamp(&counter.token("NO"), "NO");
        let (_, b) = split_timestamp(&counter.token("NO"), "NO");
        assert_eq!(a.parse::<i64>().unwrap(), 501);
        assert_eq!(b.parse::<i64>().unwrap(), 502);
        assert_eq!(counter.value(), 502);
    }

    #[test]
    fn process_counter_token_is_well_formed() {
        let token = counter_token("ORD");
        let (ts, suffix) = split_timestamp(&token, "ORD");
        assert_eq!(ts.len(), 14);
        assert!(suffix.parse::<i64>().unwrap() > DEFAULT_COUNTER_START);
    }

    #[test]
    fn random_token_length_and_charset() {
        for _ in 0..100 {
            let token = random_token(10);
            assert_eq!(token.len(), 10);
            assert!(token.bytes().all(|b| b.is_ascii_alphanumeric()));
        }
        assert!(random_token(0).is_empty());
    }

    #[test]
    fn random_token_covers_all_character_classes() {
        let sample = random_token(2_000);
        assert!(sample.bytes().any(|b| b.is_ascii_uppercase()));
        assert!(sample.bytes().any(|b| b.is_ascii_lowercase()));
        assert!(sample.bytes().any(|b| b.is_ascii_digit()));
    }
}
