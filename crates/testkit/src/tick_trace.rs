//! Tick-trace harness for deterministic snapshot tests.
//!
//! A trace steps a small piece of state tick by tick, captures a snapshot
//! after every step and compares the whole report against a golden JSON file.
//! The trace stops after `max_ticks` steps or as soon as the state reports
//! itself finished, whichever comes first.

use crate::snapshot::assert_json_snapshot;
use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;
use toolcraft_core::SimTick;

/// Configuration for a tick trace.
#[derive(Debug, Clone)]
pub struct TickTraceConfig {
    /// Name written into the report.
    pub name: String,
    /// Upper bound on the number of steps.
    pub max_ticks: u64,
    /// Path to the golden JSON file.
    pub snapshot_path: PathBuf,
}

/// Snapshot captured at a given tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickTraceFrame<S> {
    /// Tick number.
    pub tick: u64,
    /// Snapshot payload.
    pub snapshot: S,
}

/// Full trace as written to disk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickTraceReport<S> {
    /// Trace name.
    pub name: String,
    /// Frames, starting with the initial state at tick 0.
    pub frames: Vec<TickTraceFrame<S>>,
}

/// Step `state` and collect frames without touching the filesystem.
///
/// `step` advances the state by one tick and returns `true` once the trace
/// is finished.
pub fn record_tick_trace<State, Snapshot, StepFn, SnapFn>(
    name: impl Into<String>,
    max_ticks: u64,
    mut state: State,
    mut step: StepFn,
    mut snapshot: SnapFn,
) -> TickTraceReport<Snapshot>
where
    StepFn: FnMut(SimTick, &mut State) -> bool,
    SnapFn: FnMut(SimTick, &State) -> Snapshot,
{
    let mut frames = Vec::new();
    let mut tick = SimTick::ZERO;
    frames.push(TickTraceFrame {
        tick: tick.0,
        snapshot: snapshot(tick, &state),
    });

    for _ in 0..max_ticks {
        let finished = step(tick, &mut state);
        tick = tick.advance(1);
        frames.push(TickTraceFrame {
            tick: tick.0,
            snapshot: snapshot(tick, &state),
        });
        if finished {
            break;
        }
    }

    TickTraceReport {
        name: name.into(),
        frames,
    }
}

/// Run a tick trace and assert (or update) the golden file.
pub fn run_tick_trace<State, Snapshot, StepFn, SnapFn>(
    config: TickTraceConfig,
    state: State,
    step: StepFn,
    snapshot: SnapFn,
) -> Result<()>
where
    Snapshot: Serialize,
    StepFn: FnMut(SimTick, &mut State) -> bool,
    SnapFn: FnMut(SimTick, &State) -> Snapshot,
{
    let report = record_tick_trace(config.name, config.max_ticks, state, step, snapshot);
    assert_json_snapshot(config.snapshot_path, &report)
}
