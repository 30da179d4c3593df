//! # Radarplot Core
//!
//! Platform-independent calculation engine for a maritime radar plotting
//! aid, reproducing the geometric constructions of manual plotting paper.
//!
//! This crate contains pure navigation math with **zero I/O
//! dependencies**, making it suitable for any platform including
//! WebAssembly (WASM). Given two bearing/distance observations of a
//! target and own ship's course and speed, it derives relative and true
//! motion, closest-point-of-approach (CPA) and bow-crossing data, and
//! solves for the course or speed change that achieves a desired CPA.
//!
//! ## Architecture
//!
//! Data flows one direction through the solvers:
//!
//! ```text
//! observations ──> geometry ──> motion ──> { cpa, crossing }
//!                                   │
//!                                   └──> maneuver ──> plot records
//! ```
//!
//! - [`geometry`] - 2D vector math, polar/Cartesian conversion in the
//!   nautical bearing convention, line and circle intersections
//! - [`motion`] - relative and true motion from timed observations
//! - [`cpa`] - closest point of approach on the relative track
//! - [`crossing`] - bow crossing of own ship's heading line
//! - [`maneuver`] - maneuver point, desired-CPA tangent construction and
//!   smallest-deviation course/speed solution
//! - [`plot`] - per-target pipeline and multi-target evaluation
//! - [`trace`] - injected decision-point tracing for the solver
//! - [`types`] - the value records exchanged with form/render layers
//!
//! Every operation is a pure function over immutable inputs: no shared
//! state, no blocking, safe to call from any threading model. Units are
//! nautical miles, knots, degrees and minutes of day throughout.
//!
//! ## Example: plotting a target
//!
//! ```rust
//! use radarplot_core::{plot_target, BearingKind, Observation, OwnShip};
//!
//! let own = OwnShip { course: 0.0, speed: 10.0 };
//! let first = Observation {
//!     time: 0.0,
//!     bearing: 45.0,
//!     bearing_kind: BearingKind::True,
//!     course_at_observation: 0.0,
//!     distance: 10.0,
//! };
//! let second = Observation { time: 6.0, distance: 8.0, ..first };
//!
//! let plot = plot_target(&first, &second, &own).unwrap();
//! let cpa = plot.cpa.unwrap();
//! assert!(cpa.distance < 1e-9); // constant bearing: collision course
//! ```
//!
//! ## Example: solving a maneuver
//!
//! ```rust
//! use radarplot_core::{
//!     evaluate, Axis, BearingKind, ManeuverGoal, ManeuverOutcome,
//!     ManeuverRequest, Observation, OwnShip, PointSpec, TargetTrack,
//! };
//!
//! let own = OwnShip { course: 0.0, speed: 10.0 };
//! let first = Observation {
//!     time: 0.0,
//!     bearing: 0.0,
//!     bearing_kind: BearingKind::True,
//!     course_at_observation: 0.0,
//!     distance: 10.0,
//! };
//! let second = Observation { time: 6.0, distance: 8.0, ..first };
//! let tracks = [TargetTrack { observations: [first, second] }];
//!
//! // Pass the oncoming target 2 NM off by altering course at 5 NM range
//! let request = ManeuverRequest {
//!     target: 0,
//!     point: PointSpec::ByDistance(5.0),
//!     goal: ManeuverGoal::DesiredCpa(2.0),
//!     axis: Axis::Course,
//! };
//! let evaluation = evaluate(&own, &tracks, Some(&request));
//! if let ManeuverOutcome::Solved { solution } = evaluation.maneuver {
//!     assert!((solution.cpa.distance - 2.0).abs() < 1e-6);
//! }
//! ```

pub mod cpa;
pub mod crossing;
pub mod error;
pub mod geometry;
pub mod maneuver;
pub mod motion;
pub mod plot;
pub mod trace;
pub mod types;

// Re-export commonly used types
pub use cpa::cpa;
pub use crossing::bow_crossing;
pub use error::PlotError;
pub use geometry::Point;
pub use maneuver::{solve, solve_maneuver};
pub use motion::{relative_motion, true_motion};
pub use plot::{cpa_under_maneuver, evaluate, evaluate_traced, plot_target, propagate_maneuver};
pub use trace::{CollectTrace, LogTrace, NopTrace, TraceEvent, TraceSink};
pub use types::{
    format_clock, Axis, BearingKind, BowCrossing, CpaData, Evaluation, ManeuverGoal,
    ManeuverOutcome, ManeuverRequest, ManeuverSolution, Observation, OwnShip, PointSpec,
    RelativeMotion, SolutionQuality, TargetPlot, TargetRecord, TargetTrack, TrueMotion,
};
