//! Hashes a password with fast unsalted digests and a slow salted adaptive
//! hash, then brute-forces each hash over a bounded keyspace to show why the
//! former are weak and the latter is not.

pub mod adaptive;
pub mod demo;
pub mod error;
pub mod hash;
pub mod keyspace;
pub mod search;

use std::time::Duration;

pub use adaptive::{AdaptiveHasher, DEFAULT_ADAPTIVE_COST};
pub use demo::{run_demo, run_scheme, CrackResult, DemoReport, Scheme, DEMO_SCHEMES};
pub use error::{HashbreakError, HashbreakResult};
pub use hash::HashFunction;
pub use keyspace::{Candidates, Charset, Password};
pub use search::{
    AdaptiveMatcher, DigestMatcher, Matcher, SearchCtx, SearchCtxBuilder, SearchOutcome,
    TimeoutPolicy,
};

/// The charset brute-forced against the fast digest schemes.
pub const FAST_DIGEST_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// The charset brute-forced against the adaptive scheme.
pub const ADAPTIVE_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// The maximum candidate length tried against the fast digest schemes.
pub const FAST_DIGEST_MAX_PASSWORD_LENGTH: u8 = 8;

/// The maximum candidate length tried against the adaptive scheme.
/// A bit longer, to show that the timeout fires well before the keyspace ends.
pub const ADAPTIVE_MAX_PASSWORD_LENGTH: u8 = 10;

/// The wall-clock budget of a fast digest search.
pub const FAST_DIGEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The wall-clock budget of an adaptive search.
pub const ADAPTIVE_TIMEOUT: Duration = Duration::from_secs(5);

/// How many attempts a fast digest search makes between wall-clock checks.
pub const TIMEOUT_CHECK_INTERVAL: u64 = 10_000;

/// The maximum password size allowed.
pub const MAX_PASSWORD_LENGTH_ALLOWED: usize = 10;

/// The maximum charset length allowed.
pub const MAX_CHARSET_LENGTH_ALLOWED: usize = 126;
