//! oblisel-lookup: end-to-end oblivious lookup demo
//!
//! Loads a plaintext CSV database, encrypts it under the clear backend,
//! runs one encrypted query, and reports the outcome with per-phase timing.

use std::path::PathBuf;

use clap::Parser;
use eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use oblisel::backend::{ClearBackend, SlotBackend};
use oblisel::db::{encrypt_query, read_records_csv, EncryptedRecord};
use oblisel::instrument::{timed, Phase, TracingInstrument};
use oblisel::lookup::{interpret, select, select_sequential, verify_match, LookupOutcome};
use oblisel::params::LookupParams;

#[derive(Parser)]
#[command(name = "oblisel-lookup")]
#[command(about = "Oblivious equality lookup over an encrypted database")]
#[command(version)]
struct Args {
    /// Path to the plaintext database CSV (key,value per line)
    #[arg(long)]
    database: PathBuf,

    /// Query key to look up
    #[arg(long)]
    query: String,

    /// Plaintext modulus (prime)
    #[arg(long, default_value = "127")]
    plain_modulus: u64,

    /// Slots per ciphertext
    #[arg(long, default_value = "32")]
    slot_count: usize,

    /// Evaluate records sequentially instead of in parallel
    #[arg(long)]
    sequential: bool,
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    let instrument = TracingInstrument;

    let params = LookupParams {
        plain_modulus: args.plain_modulus,
        slot_count: args.slot_count,
    };
    let backend = ClearBackend::new(&params)?;

    info!("Database: {}", args.database.display());
    info!(
        "Parameters: p = {}, {} slots",
        params.plain_modulus, params.slot_count
    );

    let records = read_records_csv(&args.database)?;
    info!("{} records read", records.len());

    let database = timed(&instrument, Phase::EncryptDatabase, || {
        encrypt_db_with_progress(&backend, &records)
    })?;

    let query = timed(&instrument, Phase::EncryptQuery, || {
        encrypt_query(&backend, &args.query)
    })?;

    let aggregate = timed(&instrument, Phase::Select, || {
        if args.sequential {
            select_sequential(&backend, &database, &query)
        } else {
            select(&backend, &database, &query)
        }
    })?;

    let matched = verify_match(&backend, &aggregate, &query)?;
    if matched {
        info!("Aggregate echoes the query key: authorized, nothing to decrypt");
        return Ok(());
    }

    let outcome = timed(&instrument, Phase::Interpret, || {
        interpret(&backend, &aggregate)
    })?;

    match outcome {
        LookupOutcome::Found(value) => {
            info!("Query key:  {}", args.query);
            info!("Result:     {value}");
        }
        LookupOutcome::NotFound => {
            warn!("Key {:?} not present in the database", args.query);
        }
    }

    Ok(())
}

fn encrypt_db_with_progress(
    backend: &ClearBackend,
    records: &[oblisel::db::PlainRecord],
) -> Result<Vec<EncryptedRecord<<ClearBackend as SlotBackend>::Ciphertext>>> {
    let bar = ProgressBar::new(records.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} records encrypted")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut database = Vec::with_capacity(records.len());
    for record in records {
        let mut encrypted = oblisel::db::encrypt_records(backend, std::slice::from_ref(record))?;
        database.append(&mut encrypted);
        bar.inc(1);
    }
    bar.finish();
    Ok(database)
}
