use std::fmt::Display;

use md5::{Digest as _, Md5};
use serde::{Deserialize, Serialize};
use sha1::Sha1;

/// All the supported fast digest functions.
///
/// These are unsalted and deterministic: the same input always produces the
/// same digest, which is exactly what makes them weak against brute force.
#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum HashFunction {
    Md5,
    Sha1,
}

impl HashFunction {
    /// Hashes the input and returns the digest as a lowercase hexadecimal string.
    pub fn digest_hex(&self, input: &[u8]) -> String {
        match self {
            Self::Md5 => hex::encode(Md5::digest(input)),
            Self::Sha1 => hex::encode(Sha1::digest(input)),
        }
    }

    /// Gets the digest size in bytes.
    pub fn digest_size(&self) -> usize {
        match self {
            Self::Md5 => Md5::output_size(),
            Self::Sha1 => Sha1::output_size(),
        }
    }
}

impl Display for HashFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Md5 => write!(f, "MD5"),
            Self::Sha1 => write!(f, "SHA-1"),
        }
    }
}
