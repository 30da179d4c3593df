//! Decision-Point Tracing
//!
//! The maneuver solver takes an injected trace sink and reports which
//! geometric branch it took and why candidates were kept or rejected.
//! Tracing never alters control flow; the default sink discards events.

use crate::types::{Axis, SolutionQuality};

/// One solver decision
#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    /// Maneuver point fixed by wall-clock time
    PointByTime { clock: f64, fraction: f64 },
    /// Maneuver point fixed by distance from own ship
    PointByDistance { distance: f64, travel_minutes: f64 },
    /// Which solver branch handles the request
    BranchEntered { axis: Axis, by_cpa: bool },
    /// A candidate course or speed produced by the intersection geometry
    Candidate {
        axis: Axis,
        value: f64,
        deviation: f64,
        valid: bool,
    },
    /// The candidate finally selected
    Selected {
        axis: Axis,
        value: f64,
        quality: SolutionQuality,
    },
    /// No candidates at all; a constructed fallback was applied
    Fallback { axis: Axis, value: f64 },
}

/// Sink for solver decision events
pub trait TraceSink {
    fn record(&mut self, event: TraceEvent);
}

/// Discards all events (the default)
#[derive(Debug, Default, Clone, Copy)]
pub struct NopTrace;

impl TraceSink for NopTrace {
    fn record(&mut self, _event: TraceEvent) {}
}

/// Forwards events to the `log` facade at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTrace;

impl TraceSink for LogTrace {
    fn record(&mut self, event: TraceEvent) {
        log::debug!("maneuver: {:?}", event);
    }
}

/// Collects events in memory, mainly for tests and debug views
#[derive(Debug, Default, Clone)]
pub struct CollectTrace {
    pub events: Vec<TraceEvent>,
}

impl TraceSink for CollectTrace {
    fn record(&mut self, event: TraceEvent) {
        self.events.push(event);
    }
}
