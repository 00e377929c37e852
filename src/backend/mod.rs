//! Encryption backend capability interface
//!
//! The lookup pipeline never touches an encryption scheme directly. It
//! consumes the narrow [`SlotBackend`] trait: encode/encrypt, decrypt/decode,
//! and the handful of homomorphic primitives the oblivious-select arithmetic
//! needs. A real SIMD homomorphic scheme (BGV/BFV-style slot packing) and the
//! [`ClearBackend`] modular-arithmetic stand-in implement the same trait, so
//! all pipeline code and tests run unchanged against either.
//!
//! # Handle semantics
//!
//! Ciphertext handles are owned values. Every arithmetic primitive consumes
//! its primary operand and returns the resulting handle; an operation that
//! must leave an input untouched takes an explicit `clone` first. This keeps
//! aliasing visible at every call site instead of hiding in-place mutation
//! behind shared handles.

mod clear;

pub use clear::{ClearBackend, ClearCiphertext};

use eyre::Result;

/// Homomorphic slot-arithmetic capability consumed by the lookup pipeline
///
/// All arithmetic is per-slot over the field Z_p, p = [`modulus`].
/// Implementations must keep `modulus` prime; the equality indicator
/// exponentiates to p - 1 and relies on Fermat's little theorem.
///
/// [`modulus`]: SlotBackend::modulus
pub trait SlotBackend {
    /// Opaque ciphertext handle
    type Ciphertext: Clone;

    /// Number of parallel slots per ciphertext
    fn slot_count(&self) -> usize;

    /// Plaintext modulus p (prime)
    fn modulus(&self) -> u64;

    /// Encode a slot vector and encrypt it
    ///
    /// Inputs shorter than [`slot_count`] are right-padded with the zero
    /// sentinel; longer inputs are an error (callers are expected to have
    /// rejected them at ingestion).
    ///
    /// [`slot_count`]: SlotBackend::slot_count
    fn encode_encrypt(&self, slots: &[u64]) -> Result<Self::Ciphertext>;

    /// Decrypt a ciphertext and decode it back to a slot vector
    fn decrypt_decode(&self, ct: &Self::Ciphertext) -> Result<Vec<u64>>;

    /// Per-slot addition
    fn add(&self, ct: Self::Ciphertext, rhs: &Self::Ciphertext) -> Self::Ciphertext;

    /// Per-slot subtraction
    fn sub(&self, ct: Self::Ciphertext, rhs: &Self::Ciphertext) -> Self::Ciphertext;

    /// Per-slot negation
    fn negate(&self, ct: Self::Ciphertext) -> Self::Ciphertext;

    /// Add the same scalar to every slot
    fn add_scalar(&self, ct: Self::Ciphertext, scalar: u64) -> Self::Ciphertext;

    /// Per-slot multiplication
    fn multiply(&self, ct: Self::Ciphertext, rhs: &Self::Ciphertext) -> Self::Ciphertext;

    /// Cyclic rotation: slot i of the result holds slot (i + amount) mod n
    /// of the input
    fn rotate(&self, ct: Self::Ciphertext, amount: usize) -> Self::Ciphertext;

    /// Per-slot exponentiation to a fixed public exponent
    ///
    /// Provided via square-and-multiply over [`multiply`], so real backends
    /// get it for free from their multiplication. The exponent must be at
    /// least 1: exponent 0 would need an encrypted all-ones identity, which
    /// this interface cannot mint, and no caller in the pipeline wants it
    /// (the Fermat exponent p - 1 is ≥ 1 for every prime p).
    ///
    /// [`multiply`]: SlotBackend::multiply
    fn power(&self, ct: Self::Ciphertext, exponent: u64) -> Self::Ciphertext {
        assert!(exponent >= 1, "power exponent must be at least 1");

        let mut e = exponent;
        let mut base = ct;

        // Square past the trailing zero bits of the exponent.
        while e & 1 == 0 {
            base = self.multiply(base.clone(), &base);
            e >>= 1;
        }

        let mut acc = base.clone();
        e >>= 1;
        while e > 0 {
            base = self.multiply(base.clone(), &base);
            if e & 1 == 1 {
                acc = self.multiply(acc, &base);
            }
            e >>= 1;
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::LookupParams;

    fn backend() -> ClearBackend {
        ClearBackend::new(&LookupParams {
            plain_modulus: 127,
            slot_count: 4,
        })
        .unwrap()
    }

    #[test]
    fn test_power_matches_repeated_multiply() {
        let be = backend();
        let ct = be.encode_encrypt(&[2, 3, 5, 126]).unwrap();

        for exp in 1u64..=12 {
            let powered = be.power(ct.clone(), exp);
            let mut expected = ct.clone();
            for _ in 1..exp {
                expected = be.multiply(expected, &ct);
            }
            assert_eq!(
                be.decrypt_decode(&powered).unwrap(),
                be.decrypt_decode(&expected).unwrap(),
                "exponent {exp}"
            );
        }
    }

    #[test]
    fn test_power_exponent_one_is_identity() {
        let be = backend();
        let ct = be.encode_encrypt(&[0, 1, 63, 126]).unwrap();
        let powered = be.power(ct.clone(), 1);
        assert_eq!(
            be.decrypt_decode(&powered).unwrap(),
            be.decrypt_decode(&ct).unwrap()
        );
    }

    #[test]
    fn test_fermat_exponent_maps_to_zero_one() {
        let be = backend();
        let p = be.modulus();
        let ct = be.encode_encrypt(&[0, 1, 50, p - 1]).unwrap();
        let powered = be.power(ct, p - 1);
        assert_eq!(be.decrypt_decode(&powered).unwrap(), vec![0, 1, 1, 1]);
    }

    #[test]
    #[should_panic(expected = "exponent must be at least 1")]
    fn test_power_zero_exponent_panics() {
        let be = backend();
        let ct = be.encode_encrypt(&[1, 2, 3, 4]).unwrap();
        let _ = be.power(ct, 0);
    }
}
