use std::collections::BTreeMap;

use serde::Serialize;

use super::interpolate::interpolate;
use super::percentile::to_percentile;
use super::table::{ScalingDataset, Subject};
use crate::input::RawScore;

/// Number of points in a series: one per raw score 0..=100.
pub const SERIES_LEN: usize = 101;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubjectPoint {
    pub scaled: f64,
    pub percentile: f64,
}

/// One raw score and, per requested subject, where it lands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub raw: u8,
    pub subjects: BTreeMap<Subject, SubjectPoint>,
}

impl SeriesPoint {
    pub fn get(&self, subject: Subject) -> Option<&SubjectPoint> {
        self.subjects.get(&subject)
    }
}

/// Sweep the whole raw-score domain for the given subjects.
///
/// Always returns [`SERIES_LEN`] points, even for an empty subject list.
/// Duplicate subjects collapse and each point lists subjects in canonical
/// order.
pub fn generate_series(subjects: &[Subject], dataset: &ScalingDataset) -> Vec<SeriesPoint> {
    RawScore::all()
        .map(|raw| {
            let value = raw.value();
            let subjects = subjects
                .iter()
                .map(|&subject| {
                    let scaled = interpolate(subject, i32::from(value), dataset);
                    let point = SubjectPoint {
                        scaled,
                        percentile: to_percentile(scaled),
                    };
                    (subject, point)
                })
                .collect();
            SeriesPoint { raw: value, subjects }
        })
        .collect()
}
