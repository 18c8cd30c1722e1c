use crate::error::HashbreakResult;

/// The default bcrypt cost factor.
pub const DEFAULT_ADAPTIVE_COST: u32 = bcrypt::DEFAULT_COST;

/// A salted, adaptive password hasher backed by bcrypt.
///
/// Every `hash` call draws a fresh random salt, so hashing the same password
/// twice yields two different strings. The salt and cost are embedded in the
/// produced hash string, and `verify` re-derives from them. Callers treat the
/// hash as opaque.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdaptiveHasher {
    cost: u32,
}

impl Default for AdaptiveHasher {
    fn default() -> Self {
        Self {
            cost: DEFAULT_ADAPTIVE_COST,
        }
    }
}

impl AdaptiveHasher {
    /// Creates a hasher with the given cost factor.
    /// Each unit doubles the work needed to derive (and thus to verify) a hash.
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hashes the password with a fresh random salt.
    pub fn hash(&self, password: &str) -> HashbreakResult<String> {
        Ok(bcrypt::hash(password, self.cost)?)
    }

    /// Checks whether the candidate matches a previously produced hash.
    pub fn verify(&self, candidate: &[u8], hash: &str) -> HashbreakResult<bool> {
        Ok(bcrypt::verify(candidate, hash)?)
    }
}
