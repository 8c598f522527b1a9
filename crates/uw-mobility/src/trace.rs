//! Replay a recorded trajectory.
//!
//! # CSV format
//!
//! One row per generated sample, in order.  Row `k` (0-based) becomes the
//! sample for `start + (k + 1) * update_interval`; the sample at `start`
//! itself is the node's position when the pattern starts.
//!
//! ```csv
//! x,y,z,dx,dy,dz
//! 100.0,100.0,50.0,0.5,0.0,0.0
//! 100.0005,100.0,50.0,0.5,0.0,0.0
//! ```
//!
//! `dx,dy,dz` is velocity in m/s.  Once the rows run out the node holds its
//! last position with zero velocity.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use uw_core::{EntityId, SimTime, Vec3};

use crate::{GenerationContext, LocationSample, MobilityError, MobilityResult, MovementStrategy};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct TraceRecord {
    x:  f64,
    y:  f64,
    z:  f64,
    dx: f64,
    dy: f64,
    dz: f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`TraceReplay`] from a CSV file.
pub fn load_trace_csv(path: &Path) -> MobilityResult<TraceReplay> {
    let file = std::fs::File::open(path).map_err(MobilityError::Io)?;
    load_trace_reader(file)
}

/// Like [`load_trace_csv`] but accepts any `Read` source.
pub fn load_trace_reader<R: Read>(reader: R) -> MobilityResult<TraceReplay> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut samples = Vec::new();

    for (row, result) in csv_reader.deserialize::<TraceRecord>().enumerate() {
        let r = result.map_err(|e| MobilityError::Trace(e.to_string()))?;
        let sample = LocationSample::new(Vec3::new(r.x, r.y, r.z), Vec3::new(r.dx, r.dy, r.dz));
        if !(sample.position.is_finite() && sample.velocity.is_finite()) {
            return Err(MobilityError::Trace(format!("row {row}: non-finite value")));
        }
        samples.push(sample);
    }

    Ok(TraceReplay::new(samples))
}

// ── Strategy ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct TraceReplay {
    samples: Vec<LocationSample>,
    cursor:  usize,
}

impl TraceReplay {
    pub fn new(samples: Vec<LocationSample>) -> Self {
        Self { samples, cursor: 0 }
    }

    /// Rows not yet replayed.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.samples.len() - self.cursor
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl MovementStrategy for TraceReplay {
    fn init(&mut self, _entity: EntityId, _seed: &LocationSample, _at: SimTime) {
        self.cursor = 0;
    }

    fn next_sample(&mut self, ctx: &GenerationContext<'_>) -> MobilityResult<LocationSample> {
        match self.samples.get(self.cursor) {
            Some(sample) => {
                self.cursor += 1;
                Ok(*sample)
            }
            None => Ok(LocationSample::stationary(ctx.previous.position)),
        }
    }

    fn name(&self) -> &'static str {
        "trace"
    }
}
