//! Error types for the plotting engine

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by the plot and maneuver solvers
///
/// All failures are returned as values; nothing in the engine panics on
/// bad input. Callers are expected to surface the message to the user and
/// keep the previous valid plot on screen.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "camelCase")]
pub enum PlotError {
    /// Missing or zero distance, non-positive observation interval,
    /// or an unspecified maneuver point
    #[error("incomplete input: {0}")]
    InputIncomplete(String),

    /// Parallel construction lines or vanishing relative speed
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// The requested maneuver cannot be achieved from the given geometry
    #[error("infeasible goal: {0}")]
    InfeasibleGoal(String),

    /// The explicit course or speed equals the current value
    #[error("no change requested")]
    NoChangeRequested,
}
