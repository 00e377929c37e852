//! Plaintext ingestion and encrypted-database construction
//!
//! The lookup core only ever sees [`EncryptedRecord`]s; this module is the
//! collaborator that produces them. Records whose key or value cannot fit
//! the backend's slot width are rejected with a typed error before anything
//! is encrypted — never truncated.
//!
//! # Key uniqueness
//!
//! The pipeline requires keys to be pairwise distinct under the encoding.
//! Duplicate keys make the aggregate the sum of the colliding values, which
//! is meaningless to the caller. Ingestion does not scan for duplicates;
//! callers that cannot guarantee uniqueness must deduplicate first.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use eyre::{bail, ensure, Result, WrapErr};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::backend::SlotBackend;
use crate::encode::encode_str;

/// One plaintext (key, value) record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlainRecord {
    pub key: String,
    pub value: String,
}

impl PlainRecord {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One encrypted (key, value) record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptedRecord<Ct> {
    pub key: Ct,
    pub value: Ct,
}

/// Ingestion rejection: a record does not fit the backend's slot width
///
/// Stable typed error so callers can tell which side of the record was too
/// wide and for which key, independent of the backend in use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    KeyTooLong { key: String, limit: usize },
    ValueTooLong { key: String, limit: usize },
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestError::KeyTooLong { key, limit } => {
                write!(f, "key {key:?} exceeds slot count {limit}")
            }
            IngestError::ValueTooLong { key, limit } => {
                write!(f, "value for key {key:?} exceeds slot count {limit}")
            }
        }
    }
}

impl std::error::Error for IngestError {}

/// Encode plaintext records into slot vectors, rejecting over-width entries
pub fn encode_records(
    records: &[PlainRecord],
    slot_count: usize,
) -> std::result::Result<Vec<(Vec<u64>, Vec<u64>)>, IngestError> {
    let mut encoded = Vec::with_capacity(records.len());
    for record in records {
        let key = encode_str(&record.key, slot_count).ok_or_else(|| IngestError::KeyTooLong {
            key: record.key.clone(),
            limit: slot_count,
        })?;
        let value =
            encode_str(&record.value, slot_count).ok_or_else(|| IngestError::ValueTooLong {
                key: record.key.clone(),
                limit: slot_count,
            })?;
        encoded.push((key, value));
    }
    Ok(encoded)
}

/// Encode and encrypt a whole plaintext database
pub fn encrypt_records<B: SlotBackend>(
    backend: &B,
    records: &[PlainRecord],
) -> Result<Vec<EncryptedRecord<B::Ciphertext>>> {
    let encoded = encode_records(records, backend.slot_count())?;

    let mut database = Vec::with_capacity(encoded.len());
    for (key_slots, value_slots) in &encoded {
        database.push(EncryptedRecord {
            key: backend.encode_encrypt(key_slots)?,
            value: backend.encode_encrypt(value_slots)?,
        });
    }
    Ok(database)
}

/// Encode and encrypt a single query key
pub fn encrypt_query<B: SlotBackend>(backend: &B, key: &str) -> Result<B::Ciphertext> {
    let slots = encode_str(key, backend.slot_count()).ok_or(IngestError::KeyTooLong {
        key: key.to_string(),
        limit: backend.slot_count(),
    })?;
    backend.encode_encrypt(&slots)
}

/// Parse one CSV line into a (key, value) record
///
/// Fields are comma-separated with optional double quoting; `""` inside a
/// quoted field is an escaped quote. Keys in the coordinate format carry an
/// embedded comma ("12.0,34.0"), so quoting is load-bearing, not cosmetic.
pub fn parse_csv_line(line: &str) -> Result<PlainRecord> {
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut chars = line.chars().peekable();
    let mut in_quotes = false;

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
            }
            _ => field.push(c),
        }
    }
    if in_quotes {
        bail!("unterminated quote in line {line:?}");
    }
    fields.push(field);

    ensure!(
        fields.len() == 2,
        "expected 2 fields per line, got {} in {line:?}",
        fields.len()
    );

    let mut iter = fields.into_iter();
    let key = iter.next().unwrap_or_default();
    let value = iter.next().unwrap_or_default();
    Ok(PlainRecord { key, value })
}

/// Read a plaintext database from a CSV file
///
/// One record per non-empty line: `key,value`, quoted as needed.
pub fn read_records_csv(path: &Path) -> Result<Vec<PlainRecord>> {
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read database file {}", path.display()))?;

    let mut records = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record =
            parse_csv_line(line).wrap_err_with(|| format!("line {} of {}", idx + 1, path.display()))?;
        records.push(record);
    }
    Ok(records)
}

/// Save an encrypted database to a binary file
pub fn save_database<Ct: Serialize>(records: &[EncryptedRecord<Ct>], path: &Path) -> Result<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create {}", path.display()))?;
    let writer = BufWriter::new(file);
    bincode::serialize_into(writer, records)
        .wrap_err_with(|| format!("failed to serialize database to {}", path.display()))?;
    Ok(())
}

/// Load an encrypted database from a binary file
pub fn load_database<Ct: DeserializeOwned>(path: &Path) -> Result<Vec<EncryptedRecord<Ct>>> {
    let file = File::open(path)
        .wrap_err_with(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);
    let records = bincode::deserialize_from(reader)
        .wrap_err_with(|| format!("failed to deserialize database from {}", path.display()))?;
    Ok(records)
}
