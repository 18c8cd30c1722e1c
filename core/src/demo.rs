use std::{fmt::Display, time::Instant};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    adaptive::AdaptiveHasher,
    error::HashbreakResult,
    hash::HashFunction,
    search::{AdaptiveMatcher, DigestMatcher, SearchCtx, SearchCtxBuilder, TimeoutPolicy},
    ADAPTIVE_CHARSET, ADAPTIVE_MAX_PASSWORD_LENGTH, ADAPTIVE_TIMEOUT, FAST_DIGEST_CHARSET,
    FAST_DIGEST_MAX_PASSWORD_LENGTH, FAST_DIGEST_TIMEOUT, TIMEOUT_CHECK_INTERVAL,
};

/// The hashing schemes demonstrated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scheme {
    /// A fast, unsalted digest. Weak against brute force by construction.
    FastDigest(HashFunction),
    /// A slow, salted adaptive hash. Resists brute force by design.
    Adaptive,
}

/// The three schemes of the demo, in presentation order.
pub const DEMO_SCHEMES: [Scheme; 3] = [
    Scheme::FastDigest(HashFunction::Md5),
    Scheme::FastDigest(HashFunction::Sha1),
    Scheme::Adaptive,
];

impl Scheme {
    /// The search parameters the demo attacks this scheme with.
    ///
    /// Fast digests get a bigger timeout budget and interval-based clock
    /// checks so the inner loop stays fast; the adaptive scheme gets a clock
    /// check before every verify, since each verify is already expensive.
    pub fn search_ctx(&self) -> HashbreakResult<SearchCtx> {
        match self {
            Self::FastDigest(_) => SearchCtxBuilder::new()
                .charset(FAST_DIGEST_CHARSET)
                .max_password_length(FAST_DIGEST_MAX_PASSWORD_LENGTH)
                .timeout(FAST_DIGEST_TIMEOUT)
                .timeout_policy(TimeoutPolicy::Interval(TIMEOUT_CHECK_INTERVAL))
                .build(),
            Self::Adaptive => SearchCtxBuilder::new()
                .charset(ADAPTIVE_CHARSET)
                .max_password_length(ADAPTIVE_MAX_PASSWORD_LENGTH)
                .timeout(ADAPTIVE_TIMEOUT)
                .timeout_policy(TimeoutPolicy::EveryAttempt)
                .build(),
        }
    }
}

impl Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FastDigest(hash_function) => hash_function.fmt(f),
            Self::Adaptive => write!(f, "Bcrypt"),
        }
    }
}

/// The outcome of hashing a password with one scheme and attacking the hash.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CrackResult {
    pub algorithm: String,
    pub hash: String,
    pub cracked: bool,
    pub time_taken_ms: u64,
    pub attempts: u64,
    pub cracked_password: Option<String>,
}

/// The aggregated outcome of one demo run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DemoReport {
    pub original_password: String,
    pub results: Vec<CrackResult>,
}

/// Runs one scheme end to end: hash the password, then try to crack the hash
/// back out of the keyspace.
pub fn run_scheme(
    scheme: Scheme,
    password: &str,
    hasher: &AdaptiveHasher,
) -> HashbreakResult<CrackResult> {
    let hash = match scheme {
        Scheme::FastDigest(hash_function) => hash_function.digest_hex(password.as_bytes()),
        Scheme::Adaptive => hasher.hash(password)?,
    };

    let ctx = scheme.search_ctx()?;
    let start = Instant::now();
    let outcome = match scheme {
        Scheme::FastDigest(hash_function) => {
            ctx.search(&DigestMatcher::new(hash_function, &hash))?
        }
        Scheme::Adaptive => ctx.search(&AdaptiveMatcher::new(*hasher, &hash))?,
    };
    let time_taken = start.elapsed();

    info!(
        scheme = %scheme,
        cracked = outcome.cracked,
        attempts = outcome.attempts,
        "scheme finished"
    );

    Ok(CrackResult {
        algorithm: scheme.to_string(),
        hash,
        cracked: outcome.cracked,
        time_taken_ms: time_taken.as_millis() as u64,
        attempts: outcome.attempts,
        cracked_password: outcome.cracked_value,
    })
}

/// Runs the full demo: MD5 and SHA-1, then the adaptive scheme.
///
/// The caller is expected to have validated the password beforehand; a long
/// password makes even the fast digest searches run into their timeouts.
pub fn run_demo(password: &str, hasher: &AdaptiveHasher) -> HashbreakResult<DemoReport> {
    let results = DEMO_SCHEMES
        .iter()
        .map(|&scheme| run_scheme(scheme, password, hasher))
        .collect::<HashbreakResult<Vec<_>>>()?;

    Ok(DemoReport {
        original_password: password.to_owned(),
        results,
    })
}
