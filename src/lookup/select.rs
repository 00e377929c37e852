//! Oblivious select: mask and aggregate across the database
//!
//! For each record the reduced match mask (slot-replicated 0 or 1) is
//! multiplied into the record's value, then all masked values are summed
//! into one aggregate ciphertext. With pairwise-distinct keys at most one
//! mask is 1, so the aggregate is the matching value, or all-zero when no
//! key matched. No per-record intermediate is ever decrypted.

use eyre::{ensure, Result};
use rayon::prelude::*;

use crate::backend::SlotBackend;
use crate::db::EncryptedRecord;

use super::equality::equality_indicator;
use super::reduce::reduce_all_slots;

/// Oblivious lookup over the whole database (parallel)
///
/// Per-record work has no cross-record data dependency, so records are
/// evaluated in parallel and folded with a pairwise reduction. Encrypted
/// addition is commutative and associative, so the result is identical to
/// [`select_sequential`] for any record order.
///
/// An empty database yields the all-zero aggregate, the same value a
/// no-match scan produces.
pub fn select<B>(
    backend: &B,
    database: &[EncryptedRecord<B::Ciphertext>],
    query: &B::Ciphertext,
) -> Result<B::Ciphertext>
where
    B: SlotBackend + Sync,
    B::Ciphertext: Send + Sync,
{
    ensure!(backend.slot_count() > 0, "backend reports zero slot count");

    let aggregate = database
        .par_iter()
        .map(|record| masked_value(backend, record, query))
        .reduce_with(|a, b| backend.add(a, &b));

    match aggregate {
        Some(ct) => Ok(ct),
        None => zero_aggregate(backend),
    }
}

/// Oblivious lookup over the whole database (sequential reference)
///
/// The deterministic single-threaded fold; [`select`] must agree with it
/// exactly. Kept public for benchmarking and for callers that want to avoid
/// the thread pool.
pub fn select_sequential<B: SlotBackend>(
    backend: &B,
    database: &[EncryptedRecord<B::Ciphertext>],
    query: &B::Ciphertext,
) -> Result<B::Ciphertext> {
    ensure!(backend.slot_count() > 0, "backend reports zero slot count");

    let mut aggregate: Option<B::Ciphertext> = None;
    for record in database {
        let masked = masked_value(backend, record, query);
        aggregate = Some(match aggregate {
            Some(acc) => backend.add(acc, &masked),
            None => masked,
        });
    }

    match aggregate {
        Some(ct) => Ok(ct),
        None => zero_aggregate(backend),
    }
}

/// One record's contribution: reduced match mask times its value
fn masked_value<B: SlotBackend>(
    backend: &B,
    record: &EncryptedRecord<B::Ciphertext>,
    query: &B::Ciphertext,
) -> B::Ciphertext {
    let indicator = equality_indicator(backend, record.key.clone(), query);
    let mask = reduce_all_slots(backend, indicator);
    backend.multiply(mask, &record.value)
}

fn zero_aggregate<B: SlotBackend>(backend: &B) -> Result<B::Ciphertext> {
    backend.encode_encrypt(&vec![0u64; backend.slot_count()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ClearBackend;
    use crate::db::{encrypt_query, encrypt_records, PlainRecord};
    use crate::encode::decode_slots;
    use crate::params::LookupParams;

    fn backend() -> ClearBackend {
        ClearBackend::new(&LookupParams::demo_p127()).unwrap()
    }

    fn zone_records() -> Vec<PlainRecord> {
        vec![
            PlainRecord::new("12.0,34.0", "12.0,34.0"),
            PlainRecord::new("5.0,6.0", "9.0,9.0"),
            PlainRecord::new("77.1,139.9", "8.8,8.8"),
        ]
    }

    #[test]
    fn test_select_finds_matching_value() {
        let be = backend();
        let db = encrypt_records(&be, &zone_records()).unwrap();
        let query = encrypt_query(&be, "5.0,6.0").unwrap();

        let aggregate = select(&be, &db, &query).unwrap();
        let slots = be.decrypt_decode(&aggregate).unwrap();
        assert_eq!(decode_slots(&slots), "9.0,9.0");
    }

    #[test]
    fn test_select_no_match_is_all_zero() {
        let be = backend();
        let db = encrypt_records(&be, &zone_records()).unwrap();
        let query = encrypt_query(&be, "1.0,1.0").unwrap();

        let aggregate = select(&be, &db, &query).unwrap();
        let slots = be.decrypt_decode(&aggregate).unwrap();
        assert!(slots.iter().all(|&s| s == 0));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let be = backend();
        let db = encrypt_records(&be, &zone_records()).unwrap();

        for key in ["12.0,34.0", "5.0,6.0", "77.1,139.9", "nope"] {
            let query = encrypt_query(&be, key).unwrap();
            let par = select(&be, &db, &query).unwrap();
            let seq = select_sequential(&be, &db, &query).unwrap();
            assert_eq!(
                be.decrypt_decode(&par).unwrap(),
                be.decrypt_decode(&seq).unwrap(),
                "key {key}"
            );
        }
    }

    #[test]
    fn test_record_order_does_not_matter() {
        let be = backend();
        let mut records = zone_records();
        let query = encrypt_query(&be, "5.0,6.0").unwrap();

        let db = encrypt_records(&be, &records).unwrap();
        let baseline = be
            .decrypt_decode(&select_sequential(&be, &db, &query).unwrap())
            .unwrap();

        records.reverse();
        let db = encrypt_records(&be, &records).unwrap();
        let reversed = be
            .decrypt_decode(&select_sequential(&be, &db, &query).unwrap())
            .unwrap();

        records.swap(0, 1);
        let db = encrypt_records(&be, &records).unwrap();
        let swapped = be
            .decrypt_decode(&select_sequential(&be, &db, &query).unwrap())
            .unwrap();

        assert_eq!(baseline, reversed);
        assert_eq!(baseline, swapped);
    }

    #[test]
    fn test_empty_database_yields_zero() {
        let be = backend();
        let query = encrypt_query(&be, "5.0,6.0").unwrap();
        let aggregate = select(&be, &[], &query).unwrap();
        let slots = be.decrypt_decode(&aggregate).unwrap();
        assert!(slots.iter().all(|&s| s == 0));
    }

    #[test]
    fn test_duplicate_keys_sum_values() {
        // Documented caller-invariant violation: colliding keys sum their
        // values slot-wise. Not meaningful output, but it must match the
        // arithmetic, not crash.
        let be = backend();
        let records = vec![
            PlainRecord::new("dup", "AA"),
            PlainRecord::new("dup", "BB"),
        ];
        let db = encrypt_records(&be, &records).unwrap();
        let query = encrypt_query(&be, "dup").unwrap();

        let aggregate = select(&be, &db, &query).unwrap();
        let slots = be.decrypt_decode(&aggregate).unwrap();
        let p = 127u64;
        assert_eq!(slots[0], (65 + 66) % p);
        assert_eq!(slots[1], (65 + 66) % p);
    }
}
