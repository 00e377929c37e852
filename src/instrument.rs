//! Explicit instrumentation hooks
//!
//! Phase timing is passed into call sites instead of living in process-wide
//! mutable state. Library code takes an [`Instrument`] (or callers wrap the
//! entry points with [`timed`]); the core itself never logs.

use std::time::{Duration, Instant};

/// Pipeline phases worth timing separately
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    EncryptDatabase,
    EncryptQuery,
    Select,
    Interpret,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::EncryptDatabase => "encrypt-database",
            Phase::EncryptQuery => "encrypt-query",
            Phase::Select => "select",
            Phase::Interpret => "interpret",
        }
    }
}

/// Receives per-phase durations
pub trait Instrument {
    fn on_phase(&self, phase: Phase, elapsed: Duration);
}

/// Discards all measurements
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInstrument;

impl Instrument for NoopInstrument {
    fn on_phase(&self, _phase: Phase, _elapsed: Duration) {}
}

/// Reports phase durations through `tracing` at info level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingInstrument;

impl Instrument for TracingInstrument {
    fn on_phase(&self, phase: Phase, elapsed: Duration) {
        tracing::info!(
            phase = phase.name(),
            elapsed_ms = elapsed.as_millis() as u64,
            "phase complete"
        );
    }
}

/// Run `f`, reporting its duration to `instrument` under `phase`
pub fn timed<T>(instrument: &dyn Instrument, phase: Phase, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let result = f();
    instrument.on_phase(phase, start.elapsed());
    result
}
