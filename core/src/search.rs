use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    adaptive::AdaptiveHasher,
    error::{HashbreakError, HashbreakResult},
    hash::HashFunction,
    keyspace::Charset,
    FAST_DIGEST_CHARSET, FAST_DIGEST_MAX_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH_ALLOWED,
    TIMEOUT_CHECK_INTERVAL,
};

/// Decides when the search loop reads the wall clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeoutPolicy {
    /// Check the clock before every comparison.
    /// Suited to slow hashes, where a comparison dwarfs a clock read and an
    /// exact timeout boundary matters.
    EveryAttempt,
    /// Check the clock every `n` attempts.
    /// Suited to fast digests, where a clock read per attempt would dominate
    /// the inner loop. The search can overshoot the timeout by up to the time
    /// needed to hash `n` candidates.
    Interval(u64),
}

impl TimeoutPolicy {
    fn should_check(&self, attempts: u64) -> bool {
        match self {
            Self::EveryAttempt => true,
            Self::Interval(interval) => attempts % interval == 0,
        }
    }
}

/// Decides whether a candidate password matches the target hash.
///
/// The search engine never looks at the target hash itself, so the same loop
/// drives both digest-equality and adaptive-verify searches.
pub trait Matcher {
    fn matches(&self, candidate: &[u8]) -> HashbreakResult<bool>;
}

/// Matches by recomputing a fast digest over the candidate and comparing the
/// lowercase hexadecimal strings for exact equality.
pub struct DigestMatcher {
    hash_function: HashFunction,
    target: String,
}

impl DigestMatcher {
    pub fn new(hash_function: HashFunction, target: &str) -> Self {
        Self {
            hash_function,
            target: target.to_owned(),
        }
    }
}

impl Matcher for DigestMatcher {
    fn matches(&self, candidate: &[u8]) -> HashbreakResult<bool> {
        Ok(self.hash_function.digest_hex(candidate) == self.target)
    }
}

/// Matches by delegating to the adaptive hasher's verify operation, which
/// re-derives using the salt and cost embedded in the target hash.
pub struct AdaptiveMatcher {
    hasher: AdaptiveHasher,
    target: String,
}

impl AdaptiveMatcher {
    pub fn new(hasher: AdaptiveHasher, target: &str) -> Self {
        Self {
            hasher,
            target: target.to_owned(),
        }
    }
}

impl Matcher for AdaptiveMatcher {
    fn matches(&self, candidate: &[u8]) -> HashbreakResult<bool> {
        self.hasher.verify(candidate, &self.target)
    }
}

/// The outcome of one brute-force search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Whether the target hash was cracked.
    pub cracked: bool,
    /// How many candidates were hashed or verified, the winning one included.
    pub attempts: u64,
    /// The recovered password, present if and only if `cracked`.
    pub cracked_value: Option<String>,
}

impl SearchOutcome {
    fn cracked(attempts: u64, value: String) -> Self {
        Self {
            cracked: true,
            attempts,
            cracked_value: Some(value),
        }
    }

    fn not_cracked(attempts: u64) -> Self {
        Self {
            cracked: false,
            attempts,
            cracked_value: None,
        }
    }
}

/// A builder for a search context.
#[derive(Clone)]
pub struct SearchCtxBuilder {
    charset: Vec<u8>,
    max_password_length: u8,
    timeout: Option<Duration>,
    timeout_policy: TimeoutPolicy,
}

impl Default for SearchCtxBuilder {
    fn default() -> Self {
        Self {
            charset: FAST_DIGEST_CHARSET.to_owned(),
            max_password_length: FAST_DIGEST_MAX_PASSWORD_LENGTH,
            timeout: None,
            timeout_policy: TimeoutPolicy::Interval(TIMEOUT_CHECK_INTERVAL),
        }
    }
}

impl SearchCtxBuilder {
    /// Creates a new SearchCtxBuilder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the charset of the context.
    pub fn charset(mut self, charset: &[u8]) -> Self {
        self.charset = charset.to_owned();

        self
    }

    /// Sets the maximum password length of the context.
    pub fn max_password_length(mut self, max_password_length: u8) -> Self {
        self.max_password_length = max_password_length;

        self
    }

    /// Sets the wall-clock budget of the context.
    /// Without one the search only ends on a match or an exhausted keyspace.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);

        self
    }

    /// Sets the timeout check policy of the context.
    pub fn timeout_policy(mut self, timeout_policy: TimeoutPolicy) -> Self {
        self.timeout_policy = timeout_policy;

        self
    }

    /// Builds a SearchCtx with the specified parameters.
    pub fn build(self) -> HashbreakResult<SearchCtx> {
        let charset = Charset::new(&self.charset)?;

        if self.max_password_length == 0 {
            return Err(HashbreakError::ZeroMaxPasswordLength);
        }

        if self.max_password_length > MAX_PASSWORD_LENGTH_ALLOWED as u8 {
            return Err(HashbreakError::MaxPasswordLengthExceeded(
                MAX_PASSWORD_LENGTH_ALLOWED as u8,
            ));
        }

        if let TimeoutPolicy::Interval(0) = self.timeout_policy {
            return Err(HashbreakError::ZeroCheckInterval);
        }

        // make sure the keyspace is <= 2^64
        let n = charset.total_space(self.max_password_length as u32);
        if n > u64::MAX as u128 {
            return Err(HashbreakError::Space((n as f64).log2().ceil() as u8));
        }

        Ok(SearchCtx {
            charset,
            max_password_length: self.max_password_length,
            timeout: self.timeout,
            timeout_policy: self.timeout_policy,
            n: n as u64,
        })
    }
}

/// All the parameters of one brute-force search, immutable for its duration.
#[derive(Clone, Debug)]
pub struct SearchCtx {
    /// The charset candidates are drawn from.
    pub charset: Charset,
    /// The maximum candidate length, inclusive.
    pub max_password_length: u8,
    /// The wall-clock budget, if any.
    pub timeout: Option<Duration>,
    /// When the loop reads the wall clock.
    pub timeout_policy: TimeoutPolicy,
    /// The size of the total keyspace.
    pub n: u64,
}

impl SearchCtx {
    /// Tries every candidate of lengths 1 through the maximum, in odometer
    /// order, against the matcher.
    ///
    /// Stops at the first match. A timeout or an exhausted keyspace is a
    /// normal negative outcome, not an error; the two are distinguishable
    /// only by the attempt count reaching the full keyspace size.
    pub fn search(&self, matcher: &impl Matcher) -> HashbreakResult<SearchOutcome> {
        let start = Instant::now();
        let mut attempts: u64 = 0;

        debug!(
            max_password_length = self.max_password_length,
            keyspace = self.n,
            "starting search"
        );

        for length in 1..=self.max_password_length {
            for candidate in self.charset.candidates(length as usize) {
                if let Some(timeout) = self.timeout {
                    if self.timeout_policy.should_check(attempts) && start.elapsed() >= timeout {
                        info!(attempts, "search timed out");
                        return Ok(SearchOutcome::not_cracked(attempts));
                    }
                }

                attempts += 1;
                if matcher.matches(&candidate)? {
                    info!(attempts, "target hash cracked");
                    let value = String::from_utf8_lossy(&candidate).into_owned();
                    return Ok(SearchOutcome::cracked(attempts, value));
                }
            }
        }

        info!(attempts, "keyspace exhausted without a match");
        Ok(SearchOutcome::not_cracked(attempts))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::{
        adaptive::AdaptiveHasher,
        error::HashbreakError,
        hash::HashFunction,
        search::{AdaptiveMatcher, DigestMatcher, SearchCtxBuilder, TimeoutPolicy},
    };

    // the minimum bcrypt cost, to keep the tests fast
    const TEST_COST: u32 = 4;

    #[test]
    fn test_digest_search_attempts_follow_enumeration_order() {
        // all 36 length-1 candidates first, then "ab" is the 372nd candidate
        // of length 2: 'a' is digit 10 and 'b' digit 11, so 10 * 36 + 11 + 1
        let target = HashFunction::Md5.digest_hex(b"ab");
        let matcher = DigestMatcher::new(HashFunction::Md5, &target);
        let ctx = SearchCtxBuilder::new().build().unwrap();

        let outcome = ctx.search(&matcher).unwrap();

        assert!(outcome.cracked);
        assert_eq!(Some("ab"), outcome.cracked_value.as_deref());
        assert_eq!(36 + 10 * 36 + 11 + 1, outcome.attempts);
    }

    #[test]
    fn test_digest_search_is_deterministic() {
        let target = HashFunction::Sha1.digest_hex(b"7c");
        let matcher = DigestMatcher::new(HashFunction::Sha1, &target);
        let ctx = SearchCtxBuilder::new().build().unwrap();

        let first = ctx.search(&matcher).unwrap();
        let second = ctx.search(&matcher).unwrap();

        assert!(first.cracked);
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_timeout_fires_before_any_comparison() {
        let target = HashFunction::Md5.digest_hex(b"zz");
        let matcher = DigestMatcher::new(HashFunction::Md5, &target);
        let ctx = SearchCtxBuilder::new()
            .timeout(Duration::ZERO)
            .timeout_policy(TimeoutPolicy::EveryAttempt)
            .build()
            .unwrap();

        let outcome = ctx.search(&matcher).unwrap();

        assert!(!outcome.cracked);
        assert_eq!(0, outcome.attempts);
        assert_eq!(None, outcome.cracked_value);
    }

    #[test]
    fn test_interval_policy_checkpoints() {
        let policy = TimeoutPolicy::Interval(3);

        assert!(policy.should_check(0));
        assert!(!policy.should_check(1));
        assert!(!policy.should_check(2));
        assert!(policy.should_check(3));
        assert!(policy.should_check(6));

        assert!(TimeoutPolicy::EveryAttempt.should_check(7));
    }

    #[test]
    fn test_adaptive_search_recovers_short_password() {
        let hasher = AdaptiveHasher::new(TEST_COST);
        let hash = hasher.hash("ba").unwrap();
        let matcher = AdaptiveMatcher::new(hasher, &hash);
        let ctx = SearchCtxBuilder::new()
            .charset(b"ab")
            .max_password_length(2)
            .build()
            .unwrap();

        let outcome = ctx.search(&matcher).unwrap();

        assert!(outcome.cracked);
        assert_eq!(Some("ba"), outcome.cracked_value.as_deref());
        // "a", "b", "aa", "ab", then "ba"
        assert_eq!(5, outcome.attempts);
    }

    #[test]
    fn test_adaptive_search_exhausts_the_keyspace() {
        // the password is longer than the maximum length, so the search must
        // try the whole keyspace and give up
        let hasher = AdaptiveHasher::new(TEST_COST);
        let hash = hasher.hash("abc").unwrap();
        let matcher = AdaptiveMatcher::new(hasher, &hash);
        let ctx = SearchCtxBuilder::new()
            .charset(b"ab")
            .max_password_length(2)
            .build()
            .unwrap();

        let outcome = ctx.search(&matcher).unwrap();

        assert!(!outcome.cracked);
        assert_eq!(2 + 4, outcome.attempts);
        assert_eq!(None, outcome.cracked_value);
    }

    #[test]
    fn test_adaptive_search_is_deterministic_for_a_fixed_hash() {
        let hasher = AdaptiveHasher::new(TEST_COST);
        let hash = hasher.hash("ab").unwrap();
        let matcher = AdaptiveMatcher::new(hasher, &hash);
        let ctx = SearchCtxBuilder::new()
            .charset(b"ab")
            .max_password_length(2)
            .build()
            .unwrap();

        let first = ctx.search(&matcher).unwrap();
        let second = ctx.search(&matcher).unwrap();

        assert!(first.cracked);
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_contexts_are_rejected() {
        assert!(matches!(
            SearchCtxBuilder::new().max_password_length(0).build(),
            Err(HashbreakError::ZeroMaxPasswordLength)
        ));
        assert!(matches!(
            SearchCtxBuilder::new().max_password_length(11).build(),
            Err(HashbreakError::MaxPasswordLengthExceeded(10))
        ));
        assert!(matches!(
            SearchCtxBuilder::new().charset(b"").build(),
            Err(HashbreakError::EmptyCharset)
        ));
        assert!(matches!(
            SearchCtxBuilder::new()
                .timeout_policy(TimeoutPolicy::Interval(0))
                .build(),
            Err(HashbreakError::ZeroCheckInterval)
        ));
    }

    #[test]
    fn test_oversized_keyspace_is_rejected() {
        // 126 characters over 10 positions is past 2^64
        let charset: Vec<u8> = (1..=126).collect();

        let result = SearchCtxBuilder::new()
            .charset(&charset)
            .max_password_length(10)
            .build();

        assert!(matches!(result, Err(HashbreakError::Space(_))));
    }

    #[test]
    fn test_keyspace_size_is_precomputed() {
        let ctx = SearchCtxBuilder::new()
            .charset(b"abc")
            .max_password_length(3)
            .build()
            .unwrap();

        assert_eq!(3 + 9 + 27, ctx.n);
    }
}
