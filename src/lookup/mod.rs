//! Oblivious equality lookup pipeline
//!
//! Scans an encrypted database of (key, value) records with an encrypted
//! query key and returns the matching record's value — without the evaluator
//! learning any key, any value, or which record matched. Every step is
//! straight-line slot arithmetic over the backend capability; nothing ever
//! branches on ciphertext content and only the final aggregate is decrypted.
//!
//! # Pipeline
//!
//! 1. **Equality**: per record, `1 - (key - query)^(p-1)` gives a per-slot
//!    0/1 match indicator (Fermat's little theorem).
//! 2. **Reduce**: rotate-and-multiply ANDs the indicator across all slots
//!    into a slot-replicated 0 or 1 mask.
//! 3. **Select**: mask × value per record, summed over the whole database
//!    into one aggregate ciphertext.
//! 4. **Interpret**: decrypt the aggregate only; all-zero means no match,
//!    anything else decodes to the matched value.
//!
//! # Example
//!
//! ```
//! use oblisel::backend::ClearBackend;
//! use oblisel::db::{encrypt_query, encrypt_records, PlainRecord};
//! use oblisel::lookup::{interpret, select, LookupOutcome};
//! use oblisel::params::LookupParams;
//!
//! # fn main() -> eyre::Result<()> {
//! let backend = ClearBackend::new(&LookupParams::demo_p127())?;
//! let records = vec![
//!     PlainRecord::new("12.0,34.0", "12.0,34.0"),
//!     PlainRecord::new("5.0,6.0", "9.0,9.0"),
//! ];
//! let database = encrypt_records(&backend, &records)?;
//! let query = encrypt_query(&backend, "5.0,6.0")?;
//!
//! let aggregate = select(&backend, &database, &query)?;
//! assert_eq!(
//!     interpret(&backend, &aggregate)?,
//!     LookupOutcome::Found("9.0,9.0".to_string()),
//! );
//! # Ok(())
//! # }
//! ```

mod equality;
mod interpret;
mod reduce;
mod select;
mod verify;

pub use equality::equality_indicator;
pub use interpret::{interpret, LookupOutcome};
pub use reduce::reduce_all_slots;
pub use select::{select, select_sequential};
pub use verify::verify_match;
