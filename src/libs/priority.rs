//! Priority classification from importance and urgency scores.
//!
//! Importance and urgency are integers on a 1-5 scale. Two summaries are
//! derived from them:
//!
//! - **Priority band**: a coarse High/Medium/Low label. Two different
//!   threshold rules are in use across the dashboard, so both are kept as
//!   separately named functions (`priority_band_v1`, `priority_band_v2`)
//!   and selected explicitly through [`PriorityRule`].
//! - **Quadrant**: the Eisenhower-matrix cell (Do First, Schedule, Delegate,
//!   Eliminate).
//!
//! All functions are pure. Inputs outside 1-5 are clamped into range before
//! comparison, so every integer pair has exactly one classification.
//!
//! ```rust
//! use taskdash::libs::priority::{quadrant, priority_band_v1, priority_band_v2, PriorityBand, Quadrant};
//!
//! assert_eq!(quadrant(2, 4), Quadrant::Delegate);
//! assert_eq!(priority_band_v1(2, 4), PriorityBand::Medium);
//! assert_eq!(priority_band_v2(2, 4), PriorityBand::High);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest importance/urgency score.
pub const MIN_SCORE: i64 = 1;
/// Highest importance/urgency score.
pub const MAX_SCORE: i64 = 5;
/// Score used when the form leaves a field untouched.
pub const DEFAULT_SCORE: i64 = 3;

/// Score at or above which importance/urgency counts as "important"/"urgent".
pub const MATRIX_THRESHOLD: i64 = 3;

/// Score at or above which a single dimension makes a task high priority
/// under the dashboard rule.
pub const DASHBOARD_THRESHOLD: i64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriorityBand {
    High,
    Medium,
    Low,
}

impl PriorityBand {
    pub const ALL: [PriorityBand; 3] = [PriorityBand::High, PriorityBand::Medium, PriorityBand::Low];

    /// Colored marker shown in front of task subjects in list views.
    pub fn marker(&self) -> &'static str {
        match self {
            PriorityBand::High => "🔴",
            PriorityBand::Medium => "🟡",
            PriorityBand::Low => "🟢",
        }
    }
}

impl fmt::Display for PriorityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PriorityBand::High => "High",
            PriorityBand::Medium => "Medium",
            PriorityBand::Low => "Low",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quadrant {
    DoFirst,
    Schedule,
    Delegate,
    Eliminate,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [Quadrant::DoFirst, Quadrant::Schedule, Quadrant::Delegate, Quadrant::Eliminate];

    /// Short action label shown in the matrix cell.
    pub fn label(&self) -> &'static str {
        match self {
            Quadrant::DoFirst => "Do First",
            Quadrant::Schedule => "Schedule",
            Quadrant::Delegate => "Delegate",
            Quadrant::Eliminate => "Eliminate",
        }
    }

    /// Importance/urgency combination the quadrant stands for.
    pub fn description(&self) -> &'static str {
        match self {
            Quadrant::DoFirst => "Important & Urgent",
            Quadrant::Schedule => "Important, Not Urgent",
            Quadrant::Delegate => "Urgent, Not Important",
            Quadrant::Eliminate => "Not Important or Urgent",
        }
    }

    /// Top row of the matrix.
    pub fn is_important(&self) -> bool {
        matches!(self, Quadrant::DoFirst | Quadrant::Schedule)
    }

    /// Right column of the matrix.
    pub fn is_urgent(&self) -> bool {
        matches!(self, Quadrant::DoFirst | Quadrant::Delegate)
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.description())
    }
}

/// Which priority-band rule to apply.
///
/// The matrix view and the dashboard disagree on what "high priority" means;
/// neither is canonical, so callers pick one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PriorityRule {
    /// High when importance >= 3 AND urgency >= 3.
    #[default]
    BothAtLeastThree,
    /// High when importance >= 4 OR urgency >= 4.
    EitherAtLeastFour,
}

impl PriorityRule {
    /// Classifies a score pair under this rule.
    pub fn band(&self, importance: i64, urgency: i64) -> PriorityBand {
        match self {
            PriorityRule::BothAtLeastThree => priority_band_v1(importance, urgency),
            PriorityRule::EitherAtLeastFour => priority_band_v2(importance, urgency),
        }
    }
}

/// Pulls a score into `MIN_SCORE..=MAX_SCORE`.
pub fn clamp_score(score: i64) -> i64 {
    score.clamp(MIN_SCORE, MAX_SCORE)
}

/// Band under the matrix rule: High when both scores are at least 3,
/// Medium when exactly one is, Low otherwise.
pub fn priority_band_v1(importance: i64, urgency: i64) -> PriorityBand {
    let (i, u) = (clamp_score(importance), clamp_score(urgency));
    if i >= MATRIX_THRESHOLD && u >= MATRIX_THRESHOLD {
        PriorityBand::High
    } else if i >= MATRIX_THRESHOLD || u >= MATRIX_THRESHOLD {
        PriorityBand::Medium
    } else {
        PriorityBand::Low
    }
}

/// Band under the dashboard rule: High when either score is at least 4,
/// Medium when either is at least 3, Low otherwise.
pub fn priority_band_v2(importance: i64, urgency: i64) -> PriorityBand {
    let (i, u) = (clamp_score(importance), clamp_score(urgency));
    if i >= DASHBOARD_THRESHOLD || u >= DASHBOARD_THRESHOLD {
        PriorityBand::High
    } else if i >= MATRIX_THRESHOLD || u >= MATRIX_THRESHOLD {
        PriorityBand::Medium
    } else {
        PriorityBand::Low
    }
}

/// Eisenhower quadrant of a score pair.
///
/// A score counts as important/urgent at [`MATRIX_THRESHOLD`] or above.
/// Total over all integers: inputs are clamped first.
pub fn quadrant(importance: i64, urgency: i64) -> Quadrant {
    let important = clamp_score(importance) >= MATRIX_THRESHOLD;
    let urgent = clamp_score(urgency) >= MATRIX_THRESHOLD;
    match (important, urgent) {
        (true, true) => Quadrant::DoFirst,
        (true, false) => Quadrant::Schedule,
        (false, true) => Quadrant::Delegate,
        (false, false) => Quadrant::Eliminate,
    }
}
