//! Homomorphic match verification
//!
//! Checks whether the aggregate equals the query key without decrypting
//! either, then decrypts only the per-slot indicator. Useful when the
//! aggregate is a location echo — a database whose values repeat their keys
//! — and the caller only needs an authorized/flagged decision, not the
//! value itself.

use eyre::Result;

use crate::backend::SlotBackend;

use super::equality::equality_indicator;

/// Compare the aggregate against the query ciphertext slot by slot
///
/// Returns `true` iff every slot of the aggregate equals the corresponding
/// slot of the query. Runs the equality-indicator arithmetic and decrypts
/// the indicator vector — not the aggregate, not the query.
///
/// Decrypting the indicator does reveal *which* slots differ, which is more
/// than the single aggregate decryption of `interpret` exposes; callers
/// trading that leak for skipping value decryption should do so knowingly.
pub fn verify_match<B: SlotBackend>(
    backend: &B,
    aggregate: &B::Ciphertext,
    query: &B::Ciphertext,
) -> Result<bool> {
    let indicator = equality_indicator(backend, aggregate.clone(), query);
    let slots = backend.decrypt_decode(&indicator)?;
    Ok(slots.iter().all(|&s| s == 1))
}
