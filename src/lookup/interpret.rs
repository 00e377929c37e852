//! Aggregate decryption and classification
//!
//! The only place in the pipeline where a ciphertext is decrypted.

use eyre::Result;
use serde::{Deserialize, Serialize};

use crate::backend::SlotBackend;
use crate::encode::decode_slots;

/// Outcome of an oblivious lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LookupOutcome {
    /// A record's key matched the query; its decoded value
    Found(String),
    /// No record matched
    NotFound,
}

/// Decrypt and classify the aggregate produced by `select`
///
/// The aggregate decodes to the matching record's value, or to the all-zero
/// vector when nothing matched.
///
/// # Limitation
///
/// A genuine value that encodes to all zeros (the empty string) is
/// indistinguishable from "no match": the zero sentinel is both the padding
/// element and the no-match signal. Callers whose value space may contain
/// such values should either reserve a nonzero marker in the value encoding
/// or confirm with [`verify_match`], which compares against the query key
/// rather than inspecting the value.
///
/// [`verify_match`]: super::verify_match
pub fn interpret<B: SlotBackend>(backend: &B, aggregate: &B::Ciphertext) -> Result<LookupOutcome> {
    let slots = backend.decrypt_decode(aggregate)?;
    if slots.iter().all(|&s| s == 0) {
        return Ok(LookupOutcome::NotFound);
    }
    Ok(LookupOutcome::Found(decode_slots(&slots)))
}
