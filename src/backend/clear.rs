//! Clear modular-arithmetic backend
//!
//! Implements [`SlotBackend`] over plain `Vec<u64>` slot vectors with no
//! encryption at all. Every primitive is the exact field arithmetic a SIMD
//! homomorphic scheme evaluates inside its slots, so pipeline correctness
//! can be tested at full speed, and a real backend can be swapped in without
//! touching any caller.

use eyre::{ensure, Result};
use serde::{Deserialize, Serialize};

use crate::params::LookupParams;

use super::SlotBackend;

/// Plaintext stand-in backend over Z_p slot vectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearBackend {
    slot_count: usize,
    modulus: u64,
}

/// "Ciphertext" of the clear backend: the slot vector itself
///
/// Serializable so encrypted-database files built against this backend can
/// round-trip through bincode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearCiphertext {
    slots: Vec<u64>,
}

impl ClearBackend {
    /// Build a backend from validated parameters
    pub fn new(params: &LookupParams) -> Result<Self> {
        params.validate().map_err(|e| eyre::eyre!(e))?;
        Ok(Self {
            slot_count: params.slot_count,
            modulus: params.plain_modulus,
        })
    }

    #[inline]
    fn add_elem(&self, a: u64, b: u64) -> u64 {
        let sum = (a as u128) + (b as u128);
        (sum % (self.modulus as u128)) as u64
    }

    #[inline]
    fn sub_elem(&self, a: u64, b: u64) -> u64 {
        if a >= b {
            a - b
        } else {
            self.modulus - (b - a)
        }
    }

    #[inline]
    fn mul_elem(&self, a: u64, b: u64) -> u64 {
        let prod = (a as u128) * (b as u128);
        (prod % (self.modulus as u128)) as u64
    }

    #[inline]
    fn negate_elem(&self, a: u64) -> u64 {
        if a == 0 {
            0
        } else {
            self.modulus - a
        }
    }
}

impl SlotBackend for ClearBackend {
    type Ciphertext = ClearCiphertext;

    fn slot_count(&self) -> usize {
        self.slot_count
    }

    fn modulus(&self) -> u64 {
        self.modulus
    }

    fn encode_encrypt(&self, slots: &[u64]) -> Result<ClearCiphertext> {
        ensure!(
            slots.len() <= self.slot_count,
            "input of {} slots exceeds slot count {}",
            slots.len(),
            self.slot_count
        );

        let mut padded: Vec<u64> = slots.iter().map(|&s| s % self.modulus).collect();
        padded.resize(self.slot_count, 0);
        Ok(ClearCiphertext { slots: padded })
    }

    fn decrypt_decode(&self, ct: &ClearCiphertext) -> Result<Vec<u64>> {
        ensure!(
            ct.slots.len() == self.slot_count,
            "ciphertext width {} does not match slot count {}",
            ct.slots.len(),
            self.slot_count
        );
        Ok(ct.slots.clone())
    }

    fn add(&self, mut ct: ClearCiphertext, rhs: &ClearCiphertext) -> ClearCiphertext {
        for (a, &b) in ct.slots.iter_mut().zip(&rhs.slots) {
            *a = self.add_elem(*a, b);
        }
        ct
    }

    fn sub(&self, mut ct: ClearCiphertext, rhs: &ClearCiphertext) -> ClearCiphertext {
        for (a, &b) in ct.slots.iter_mut().zip(&rhs.slots) {
            *a = self.sub_elem(*a, b);
        }
        ct
    }

    fn negate(&self, mut ct: ClearCiphertext) -> ClearCiphertext {
        for a in ct.slots.iter_mut() {
            *a = self.negate_elem(*a);
        }
        ct
    }

    fn add_scalar(&self, mut ct: ClearCiphertext, scalar: u64) -> ClearCiphertext {
        let scalar = scalar % self.modulus;
        for a in ct.slots.iter_mut() {
            *a = self.add_elem(*a, scalar);
        }
        ct
    }

    fn multiply(&self, mut ct: ClearCiphertext, rhs: &ClearCiphertext) -> ClearCiphertext {
        for (a, &b) in ct.slots.iter_mut().zip(&rhs.slots) {
            *a = self.mul_elem(*a, b);
        }
        ct
    }

    fn rotate(&self, mut ct: ClearCiphertext, amount: usize) -> ClearCiphertext {
        let n = ct.slots.len();
        if n > 0 {
            ct.slots.rotate_left(amount % n);
        }
        ct
    }
}
