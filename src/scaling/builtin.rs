//! Scaling datasets compiled into the binary.
//!
//! The only built-in dataset is an illustrative sample with the shape of a
//! real conversion table. It is not official exam data; real tables belong
//! in the config file.
//!
//! Tables are authored from the highest raw score down. Raw scores below the
//! lowest entry clamp to that entry, which sits at the 30-point floor.

use super::table::{ScalingDataset, ScoreTable, Subject};

pub const DEFAULT_DATASET_KEY: &str = "sample";

/// Whether `key` names the illustrative sample rather than real data.
pub fn is_sample(key: &str) -> bool {
    key == DEFAULT_DATASET_KEY
}

const CHEMISTRY_SAMPLE: &[(u8, f64)] = &[
    (100, 100.0),
    (96, 98.0),
    (92, 95.0),
    (88, 92.0),
    (84, 89.0),
    (80, 86.0),
    (76, 83.0),
    (72, 80.0),
    (68, 76.0),
    (64, 72.0),
    (60, 68.0),
    (56, 64.0),
    (52, 60.0),
    (48, 56.0),
    (44, 52.0),
    (40, 48.0),
    (35, 44.0),
    (30, 40.0),
    (25, 36.0),
    (20, 33.0),
    (15, 30.0),
];

const BIOLOGY_SAMPLE: &[(u8, f64)] = &[
    (100, 100.0),
    (95, 97.0),
    (90, 94.0),
    (86, 91.0),
    (82, 88.0),
    (78, 85.0),
    (74, 82.0),
    (70, 78.0),
    (66, 74.0),
    (62, 70.0),
    (58, 66.0),
    (54, 62.0),
    (50, 58.0),
    (45, 54.0),
    (40, 50.0),
    (35, 46.0),
    (30, 42.0),
    (25, 38.0),
    (20, 34.0),
    (12, 30.0),
];

const POLITICS_SAMPLE: &[(u8, f64)] = &[
    (100, 100.0),
    (94, 97.0),
    (90, 95.0),
    (87, 92.0),
    (84, 89.0),
    (81, 86.0),
    (78, 83.0),
    (75, 80.0),
    (71, 76.0),
    (67, 72.0),
    (63, 68.0),
    (59, 64.0),
    (55, 60.0),
    (51, 56.0),
    (47, 52.0),
    (43, 48.0),
    (38, 44.0),
    (33, 40.0),
    (27, 36.0),
    (20, 32.0),
    (16, 30.0),
];

const GEOGRAPHY_SAMPLE: &[(u8, f64)] = &[
    (100, 100.0),
    (93, 97.0),
    (89, 94.0),
    (85, 91.0),
    (81, 88.0),
    (77, 85.0),
    (73, 82.0),
    (69, 78.0),
    (65, 74.0),
    (61, 70.0),
    (57, 66.0),
    (53, 62.0),
    (49, 58.0),
    (45, 54.0),
    (41, 50.0),
    (36, 46.0),
    (31, 42.0),
    (26, 38.0),
    (21, 34.0),
    (14, 30.0),
];

pub fn datasets() -> Vec<ScalingDataset> {
    vec![ScalingDataset::new(DEFAULT_DATASET_KEY)
        .with_label("Illustrative sample (not official data)")
        .with_table(Subject::Chemistry, ScoreTable::from_pairs(CHEMISTRY_SAMPLE))
        .with_table(Subject::Biology, ScoreTable::from_pairs(BIOLOGY_SAMPLE))
        .with_table(Subject::Politics, ScoreTable::from_pairs(POLITICS_SAMPLE))
        .with_table(Subject::Geography, ScoreTable::from_pairs(GEOGRAPHY_SAMPLE))]
}
