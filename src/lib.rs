//! oblisel: oblivious equality lookup over encrypted records
//!
//! Given an encrypted query key and a database of encrypted (key, value)
//! records, returns the value of the matching record without the evaluator
//! learning any key, any value, or which record matched. All computation is
//! straight-line arithmetic over a narrow homomorphic backend capability;
//! only the final aggregate is ever decrypted.
//!
//! Key components:
//! - `backend`: the [`SlotBackend`] capability trait plus a clear
//!   modular-arithmetic stand-in for fast, encryption-free testing
//! - `lookup`: the pipeline — equality indicator (Fermat), slot
//!   AND-reduction (rotate-and-multiply), oblivious select, interpretation
//! - `db`: plaintext ingestion with typed width rejection, database
//!   encryption, binary persistence
//!
//! [`SlotBackend`]: backend::SlotBackend

pub mod backend;
pub mod db;
pub mod encode;
pub mod instrument;
pub mod lookup;
pub mod params;

pub use backend::{ClearBackend, ClearCiphertext, SlotBackend};
pub use db::{
    encrypt_query, encrypt_records, load_database, read_records_csv, save_database,
    EncryptedRecord, IngestError, PlainRecord,
};
pub use lookup::{interpret, select, select_sequential, verify_match, LookupOutcome};
pub use params::LookupParams;
