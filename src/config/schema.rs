use serde::{Deserialize, Serialize};

use crate::composite::CompositeConfig;
use crate::scaling::ScalingDataset;

/// Top-level configuration file.
///
/// Example YAML:
/// ```yaml
/// default_dataset: "sample"
/// composite:
///   reading: 2
///   seven: 2
///   cloze: 1.5
///   grammar: 1
/// datasets:
///   - key: "mock-2025"
///     label: "Spring mock exam"
///     tables:
///       chemistry: [[100, 100], [80, 85], [40, 50]]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Dataset selected when none is given (default: first registered)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_dataset: Option<String>,

    #[serde(default)]
    pub composite: CompositeConfig,

    /// Extra datasets, registered after the built-in ones
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub datasets: Vec<ScalingDataset>,
}
