//! Parameter sets for oblivious lookup
//!
//! The plaintext modulus and slot width are deployment parameters of the
//! underlying encryption scheme; the lookup pipeline reads both from the
//! backend at run time and never hard-codes them.

use serde::{Deserialize, Serialize};

/// Scheme-level parameters consumed by the lookup pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupParams {
    /// Plaintext modulus p
    /// Must be prime: the equality indicator relies on Fermat's little
    /// theorem, x^(p-1) ≡ 1 mod p for nonzero x.
    pub plain_modulus: u64,

    /// Number of parallel slots per ciphertext
    /// One encoded key or value occupies exactly this many slots.
    pub slot_count: usize,
}

impl LookupParams {
    /// Demo parameters: p = 127 with 32 slots
    ///
    /// Wide enough for ASCII coordinate strings. These match a
    /// fast-but-insecure BGV configuration (m = 128, p = 127) and are for
    /// demonstration only.
    pub fn demo_p127() -> Self {
        Self {
            plain_modulus: 127,
            slot_count: 32,
        }
    }

    /// Exponent used by the equality indicator: p - 1
    pub fn fermat_exponent(&self) -> u64 {
        self.plain_modulus - 1
    }

    /// Check if parameters are valid
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.slot_count == 0 {
            return Err("slot_count must be positive");
        }

        if self.plain_modulus < 2 {
            return Err("plain_modulus must be at least 2");
        }

        if !is_prime(self.plain_modulus) {
            return Err("plain_modulus must be prime");
        }

        Ok(())
    }
}

impl Default for LookupParams {
    fn default() -> Self {
        Self::demo_p127()
    }
}

/// Trial-division primality check
///
/// Plaintext moduli are small deployment constants, so O(√p) is plenty.
fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3u64;
    while d.saturating_mul(d) <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}
