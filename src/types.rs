//! Plotting Data Model
//!
//! Value records exchanged with the form/state/render layers. Every type
//! here is a plain owned record: the engine never retains references
//! across calls, and all derived blocks (CPA, bow crossing, maneuver) are
//! either fully populated or fully absent.
//!
//! Units throughout: nautical miles, knots, degrees, minutes of day.

use serde::{Deserialize, Serialize};

use crate::error::PlotError;
use crate::geometry::{normalize_deg, polar_to_cartesian, Point};

/// How a target bearing was taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BearingKind {
    /// Compass (true) bearing
    True,
    /// Bearing relative to own ship's heading at the observation
    Relative,
}

impl Default for BearingKind {
    fn default() -> Self {
        BearingKind::True
    }
}

/// A single timed bearing/distance observation of a target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    /// Time of the observation in minutes of day
    pub time: f64,
    /// Observed bearing in degrees [0, 360)
    pub bearing: f64,
    /// Whether `bearing` is true or relative
    pub bearing_kind: BearingKind,
    /// Own course in effect at this observation, in degrees
    ///
    /// Captured per observation because own course may have changed
    /// between the two observations of a pair.
    pub course_at_observation: f64,
    /// Observed distance in nautical miles
    pub distance: f64,
}

impl Observation {
    /// Compass bearing of the observation
    ///
    /// Supplied true bearings are used directly; relative bearings are
    /// reconciled by adding the course in effect at the observation.
    pub fn true_bearing(&self) -> f64 {
        match self.bearing_kind {
            BearingKind::True => normalize_deg(self.bearing),
            BearingKind::Relative => normalize_deg(self.bearing + self.course_at_observation),
        }
    }

    /// Bearing relative to own heading at the observation
    pub fn relative_bearing(&self) -> f64 {
        match self.bearing_kind {
            BearingKind::True => normalize_deg(self.bearing - self.course_at_observation),
            BearingKind::Relative => normalize_deg(self.bearing),
        }
    }

    /// Cartesian position of the observation, own ship at the origin
    pub fn position(&self) -> Point {
        polar_to_cartesian(self.true_bearing(), self.distance)
    }

    /// An observation with no distance cannot place the target
    pub fn is_complete(&self) -> bool {
        self.distance > 0.0
    }
}

/// Own ship course and speed
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnShip {
    /// Course in degrees [0, 360)
    pub course: f64,
    /// Speed in knots
    pub speed: f64,
}

impl OwnShip {
    /// Velocity vector in NM per hour
    pub fn velocity(&self) -> Point {
        polar_to_cartesian(self.course, self.speed)
    }

    /// Distance run in NM over a duration in minutes
    pub fn travel(&self, minutes: f64) -> f64 {
        self.speed * minutes / 60.0
    }
}

/// Direction and speed of relative motion (DRM/SRM, a.k.a. KBr/vBr)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelativeMotion {
    /// Direction of relative motion in degrees [0, 360)
    pub course: f64,
    /// Speed of relative motion in knots
    pub speed: f64,
}

impl RelativeMotion {
    /// Velocity vector in NM per hour
    pub fn velocity(&self) -> Point {
        polar_to_cartesian(self.course, self.speed)
    }
}

/// True motion of a target over ground (KB/vB) plus aspect angle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrueMotion {
    /// True course in degrees [0, 360)
    pub course: f64,
    /// Speed over ground in knots
    pub speed: f64,
    /// Aspect angle in degrees [0, 360): the angle at which own ship is
    /// seen from the target, relative to the target's heading
    pub aspect: f64,
}

impl TrueMotion {
    /// Velocity vector in NM per hour
    pub fn velocity(&self) -> Point {
        polar_to_cartesian(self.course, self.speed)
    }
}

/// Closest point of approach block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpaData {
    /// CPA distance in NM
    pub distance: f64,
    /// Minutes until CPA (negative when the closest point lies astern
    /// of the track position, which only occurs in maneuver results)
    pub time_to: f64,
    /// Wall-clock time of CPA in minutes of day
    pub clock: f64,
    /// True bearing of the CPA point in degrees (PCPA)
    pub bearing: f64,
    /// Relative bearing of the CPA point in degrees (SPCPA)
    pub relative_bearing: f64,
    /// The CPA point itself
    pub point: Point,
}

/// Bow crossing block: where the target's relative track crosses own
/// ship's heading line ahead
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BowCrossing {
    /// Bow crossing range in NM (BCR)
    pub range: f64,
    /// Minutes until the crossing (BCT)
    pub time_to: f64,
    /// Wall-clock time of the crossing in minutes of day
    pub clock: f64,
    /// The crossing point
    pub point: Point,
}

/// Which of own course or own speed a maneuver varies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Course,
    Speed,
}

/// How the maneuver point on the relative track is selected
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PointSpec {
    /// Maneuver at a wall-clock time in minutes of day
    ByTime(f64),
    /// Maneuver when the target is at this distance in NM
    ByDistance(f64),
}

/// What the maneuver is meant to achieve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ManeuverGoal {
    /// Solve for the course/speed that yields this CPA in NM
    DesiredCpa(f64),
    /// Apply this explicit course or speed and report the resulting CPA
    Explicit(f64),
}

/// A maneuver request against one target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManeuverRequest {
    /// Index of the target the maneuver is solved against
    pub target: usize,
    /// Maneuver point selection
    pub point: PointSpec,
    /// Goal of the maneuver
    pub goal: ManeuverGoal,
    /// Varied axis
    pub axis: Axis,
}

/// Quality of a solved maneuver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SolutionQuality {
    /// A solution satisfying all domain constraints
    Valid,
    /// No candidate satisfied the constraints; the least-deviation
    /// out-of-range candidate was used instead
    OutOfRange,
    /// No candidate existed at all; a constructed fallback (stop, or
    /// steer at the maneuver point) was used
    Fallback,
}

/// A fully solved maneuver with all post-maneuver derived values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManeuverSolution {
    /// Which axis was varied
    pub axis: Axis,
    /// Own course after the maneuver, degrees
    pub new_course: f64,
    /// Own speed after the maneuver, knots
    pub new_speed: f64,
    /// Signed change of the varied axis (degrees or knots)
    pub delta: f64,
    /// Relative motion after the maneuver (new KBr/vBr)
    pub relative: RelativeMotion,
    /// CPA after the maneuver, computed from the maneuver point
    pub cpa: CpaData,
    /// Bow crossing after the maneuver, if the new track crosses ahead
    pub crossing: Option<BowCrossing>,
    /// The maneuver point on the current relative track
    pub maneuver_point: Point,
    /// Wall-clock time at the maneuver point in minutes of day
    pub maneuver_clock: f64,
    /// Minutes from the second observation to the maneuver point
    pub time_to_maneuver: f64,
    /// Tangent point on the desired-CPA circle (CPA-goal requests only)
    pub tangent_point: Option<Point>,
    /// Apex of the velocity triangle (first observation shifted by the
    /// reversed own-ship run)
    pub own_apex: Point,
    /// Relative bearing of the maneuver point under the new course
    pub point_relative_bearing: f64,
    /// Signed change of the relative-motion direction, degrees
    pub track_delta: f64,
    /// Whether the solution honors all domain constraints
    pub quality: SolutionQuality,
}

/// Lifecycle of a maneuver computation, as held by the state container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ManeuverOutcome {
    /// No maneuver requested, or the owning target is incomplete
    Unset,
    /// The request could not be solved
    Failed { error: PlotError },
    /// A solution, possibly degraded (see [`SolutionQuality`])
    Solved { solution: Box<ManeuverSolution> },
}

/// The two observations defining a target's track
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetTrack {
    pub observations: [Observation; 2],
}

/// All derived per-target values for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetPlot {
    /// Cartesian positions of the two observations
    pub sight: [Point; 2],
    /// Time of the second observation in minutes of day
    pub time: f64,
    /// Observation interval in minutes
    pub interval: f64,
    /// Relative bearings of the two observations
    pub relative_bearings: [f64; 2],
    /// Relative motion (KBr/vBr)
    pub relative: RelativeMotion,
    /// True motion and aspect (KB/vB)
    pub true_motion: TrueMotion,
    /// CPA block, absent when relative speed vanishes or the closest
    /// point already lies astern
    pub cpa: Option<CpaData>,
    /// Bow crossing block, absent when the track never crosses ahead
    pub crossing: Option<BowCrossing>,
}

/// One target's full record in an evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetRecord {
    /// Derived plot, absent when the observation pair is incomplete
    pub plot: Option<TargetPlot>,
    /// CPA under the solved maneuver's new own course/speed
    pub new_cpa: Option<CpaData>,
}

/// Result of evaluating own ship, all targets and the maneuver request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub targets: Vec<TargetRecord>,
    pub maneuver: ManeuverOutcome,
}

/// Format minutes of day as `HH:MM`, wrapping past midnight
pub fn format_clock(minutes: f64) -> String {
    let total = minutes.rem_euclid(24.0 * 60.0);
    let hours = (total / 60.0).floor() as u32;
    let mins = (total - hours as f64 * 60.0).floor() as u32;
    format!("{:02}:{:02}", hours, mins)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearing_reconciliation() {
        let obs = Observation {
            time: 0.0,
            bearing: 30.0,
            bearing_kind: BearingKind::Relative,
            course_at_observation: 90.0,
            distance: 5.0,
        };
        assert_eq!(obs.true_bearing(), 120.0);
        assert_eq!(obs.relative_bearing(), 30.0);

        let obs = Observation {
            bearing: 10.0,
            bearing_kind: BearingKind::True,
            course_at_observation: 90.0,
            ..obs
        };
        assert_eq!(obs.true_bearing(), 10.0);
        assert_eq!(obs.relative_bearing(), 280.0);
    }

    #[test]
    fn test_observation_position() {
        let obs = Observation {
            time: 0.0,
            bearing: 90.0,
            bearing_kind: BearingKind::True,
            course_at_observation: 0.0,
            distance: 4.0,
        };
        let p = obs.position();
        assert!((p.x - 4.0).abs() < 1e-12);
        assert!(p.y.abs() < 1e-12);
    }

    #[test]
    fn test_incomplete_observation() {
        let obs = Observation {
            time: 0.0,
            bearing: 0.0,
            bearing_kind: BearingKind::True,
            course_at_observation: 0.0,
            distance: 0.0,
        };
        assert!(!obs.is_complete());
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0.0), "00:00");
        assert_eq!(format_clock(750.5), "12:30");
        assert_eq!(format_clock(1500.0), "01:00"); // wraps past midnight
    }

    #[test]
    fn test_own_ship_travel() {
        let own = OwnShip {
            course: 0.0,
            speed: 12.0,
        };
        assert!((own.travel(30.0) - 6.0).abs() < 1e-12);
    }
}
