use std::fmt;

use serde::Serialize;

/// Letter band over the scaled-score range `[30, 100]`.
///
/// Each band maps linearly onto its slice of the population percentile
/// curve. Bands are contiguous: a band's upper bound is the next band's
/// lower bound, and only `A` includes its upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum GradeZone {
    E,
    D,
    C,
    B,
    A,
}

impl GradeZone {
    /// Ascending by score.
    pub const ALL: [GradeZone; 5] = [
        GradeZone::E,
        GradeZone::D,
        GradeZone::C,
        GradeZone::B,
        GradeZone::A,
    ];

    pub fn letter(self) -> char {
        match self {
            GradeZone::E => 'E',
            GradeZone::D => 'D',
            GradeZone::C => 'C',
            GradeZone::B => 'B',
            GradeZone::A => 'A',
        }
    }

    /// Scaled-score bounds `(min, max)`.
    pub fn scaled_range(self) -> (f64, f64) {
        match self {
            GradeZone::E => (30.0, 40.5),
            GradeZone::D => (40.5, 58.5),
            GradeZone::C => (58.5, 70.5),
            GradeZone::B => (70.5, 82.5),
            GradeZone::A => (82.5, 100.0),
        }
    }

    /// Cumulative percentile bounds `(min, max)`.
    pub fn percentile_range(self) -> (f64, f64) {
        match self {
            GradeZone::E => (0.0, 2.0),
            GradeZone::D => (2.0, 15.0),
            GradeZone::C => (15.0, 50.0),
            GradeZone::B => (50.0, 85.0),
            GradeZone::A => (85.0, 100.0),
        }
    }

    /// Share of the population in the band.
    pub fn description(self) -> &'static str {
        match self {
            GradeZone::E => "bottom 2%",
            GradeZone::D => "next 13%",
            GradeZone::C => "middle 35%",
            GradeZone::B => "upper 35%",
            GradeZone::A => "top 15%",
        }
    }

    /// Band containing `score`, checked from `A` downwards. Anything below
    /// 40.5 lands in `E`.
    pub fn for_score(score: f64) -> GradeZone {
        Self::ALL
            .into_iter()
            .rev()
            .find(|zone| score >= zone.scaled_range().0)
            .unwrap_or(GradeZone::E)
    }

    fn percentile_within(self, score: f64) -> f64 {
        let (lo, hi) = self.scaled_range();
        let (p_lo, p_hi) = self.percentile_range();
        p_lo + (score - lo) / (hi - lo) * (p_hi - p_lo)
    }
}

impl fmt::Display for GradeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Cumulative population percentile for a scaled score.
///
/// Piecewise linear through (30, 0), (40.5, 2), (58.5, 15), (70.5, 50),
/// (82.5, 85) and (100, 100). Inputs outside `[30, 100]` are extrapolated
/// from the end segments, not clamped.
pub fn to_percentile(scaled: f64) -> f64 {
    GradeZone::for_score(scaled).percentile_within(scaled)
}
