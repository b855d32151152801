pub mod builtin;
pub mod interpolate;
pub mod percentile;
pub mod series;
pub mod table;

use serde::Serialize;

pub use builtin::{is_sample, DEFAULT_DATASET_KEY};
pub use interpolate::{
    checked_interpolate, interpolate, interpolate_detailed, interpolate_text, scaled_for,
    Resolution, FALLBACK_SCALED,
};
pub use percentile::{to_percentile, GradeZone};
pub use series::{generate_series, SeriesPoint, SubjectPoint, SERIES_LEN};
pub use table::{DatasetRegistry, ScalingDataset, ScoreTable, Subject};

use crate::input::RawScore;

/// Everything a result card shows for one subject.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaledResult {
    pub subject: Subject,
    pub raw: RawScore,
    pub scaled: f64,
    pub percentile: f64,
    pub zone: GradeZone,
    pub resolution: Resolution,
}

pub fn evaluate(subject: Subject, raw: RawScore, dataset: &ScalingDataset) -> ScaledResult {
    let resolution = interpolate_detailed(subject, i32::from(raw), dataset);
    let scaled = resolution.scaled();
    ScaledResult {
        subject,
        raw,
        scaled,
        percentile: to_percentile(scaled),
        zone: GradeZone::for_score(scaled),
        resolution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_builtin() {
        let registry = DatasetRegistry::builtin();
        let dataset = registry.default_dataset();
        let raw = RawScore::new(80).unwrap();
        let result = evaluate(Subject::Chemistry, raw, dataset);

        assert_eq!(result.scaled, 86.0);
        assert_eq!(result.zone, GradeZone::A);
        assert_eq!(result.resolution, Resolution::Exact { scaled: 86.0 });
        assert_eq!(result.percentile, to_percentile(86.0));
    }

    #[test]
    fn test_evaluate_zero_clamps_to_floor() {
        let registry = DatasetRegistry::builtin();
        let result = evaluate(Subject::Biology, RawScore::MIN, registry.default_dataset());
        assert_eq!(result.scaled, 30.0);
        assert_eq!(result.percentile, 0.0);
        assert_eq!(result.zone, GradeZone::E);
        assert!(matches!(result.resolution, Resolution::ClampedLow { raw: 12, .. }));
    }
}
