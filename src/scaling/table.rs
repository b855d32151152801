use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::input::InputError;

/// Elective subjects that are reported as assigned-grade (scaled) scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    #[serde(alias = "化学")]
    Chemistry,
    #[serde(alias = "生物")]
    Biology,
    #[serde(alias = "政治")]
    Politics,
    #[serde(alias = "地理")]
    Geography,
}

impl Subject {
    pub const ALL: [Subject; 4] = [
        Subject::Chemistry,
        Subject::Biology,
        Subject::Politics,
        Subject::Geography,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Subject::Chemistry => "chemistry",
            Subject::Biology => "biology",
            Subject::Politics => "politics",
            Subject::Geography => "geography",
        }
    }

    /// Subject name as printed on the exam paper.
    pub fn local_name(self) -> &'static str {
        match self {
            Subject::Chemistry => "化学",
            Subject::Biology => "生物",
            Subject::Politics => "政治",
            Subject::Geography => "地理",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Subject {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Subject::ALL
            .into_iter()
            .find(|subject| s.eq_ignore_ascii_case(subject.name()) || s == subject.local_name())
            .ok_or_else(|| InputError::UnknownSubject(s.to_string()))
    }
}

/// Sparse raw -> scaled lookup for one subject.
///
/// Pairs keep the order they were authored in. Lookups depend on that order
/// when breaking ties, so the table is never sorted or deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ScoreTable {
    pairs: Vec<(u8, f64)>,
}

impl ScoreTable {
    pub fn new(pairs: Vec<(u8, f64)>) -> Self {
        Self { pairs }
    }

    pub fn from_pairs(pairs: &[(u8, f64)]) -> Self {
        Self::new(pairs.to_vec())
    }

    pub fn pairs(&self) -> &[(u8, f64)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Raw scores that appear more than once, in first-seen order.
    pub fn duplicate_raw_scores(&self) -> Vec<u8> {
        let mut seen = [false; 256];
        let mut duplicates = Vec::new();
        for &(raw, _) in &self.pairs {
            let slot = &mut seen[raw as usize];
            if *slot && !duplicates.contains(&raw) {
                duplicates.push(raw);
            }
            *slot = true;
        }
        duplicates
    }
}

/// A named set of score tables, one per subject.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScalingDataset {
    pub key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default)]
    pub tables: BTreeMap<Subject, ScoreTable>,
}

impl ScalingDataset {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: None,
            tables: BTreeMap::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_table(mut self, subject: Subject, table: ScoreTable) -> Self {
        self.tables.insert(subject, table);
        self
    }

    pub fn table(&self, subject: Subject) -> Option<&ScoreTable> {
        self.tables.get(&subject)
    }

    /// Label for display, falling back to the key.
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.key)
    }
}

/// Immutable key -> dataset mapping. Registration order is kept and the
/// default selection is the first dataset unless overridden.
#[derive(Debug, Clone)]
pub struct DatasetRegistry {
    datasets: Vec<ScalingDataset>,
    default_index: usize,
}

impl DatasetRegistry {
    pub fn new(datasets: Vec<ScalingDataset>) -> Result<Self> {
        if datasets.is_empty() {
            bail!("At least one scaling dataset is required");
        }
        for (i, dataset) in datasets.iter().enumerate() {
            if datasets[..i].iter().any(|d| d.key == dataset.key) {
                bail!("Duplicate dataset key '{}'", dataset.key);
            }
        }
        Ok(Self {
            datasets,
            default_index: 0,
        })
    }

    /// Registry holding only the datasets compiled into the crate.
    pub fn builtin() -> Self {
        Self {
            datasets: super::builtin::datasets(),
            default_index: 0,
        }
    }

    /// Select which dataset `default_dataset` returns.
    pub fn with_default(mut self, key: &str) -> Result<Self, InputError> {
        self.default_index = self
            .datasets
            .iter()
            .position(|d| d.key == key)
            .ok_or_else(|| InputError::UnknownDataset(key.to_string()))?;
        Ok(self)
    }

    pub fn lookup(&self, key: &str) -> Option<&ScalingDataset> {
        self.datasets.iter().find(|d| d.key == key)
    }

    /// Look up `key`, or the default dataset when no key is given.
    pub fn select(&self, key: Option<&str>) -> Result<&ScalingDataset, InputError> {
        match key {
            Some(key) => self
                .lookup(key)
                .ok_or_else(|| InputError::UnknownDataset(key.to_string())),
            None => Ok(self.default_dataset()),
        }
    }

    pub fn default_dataset(&self) -> &ScalingDataset {
        &self.datasets[self.default_index]
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.datasets.iter().map(|d| d.key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScalingDataset> {
        self.datasets.iter()
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}
