use serde::{Deserialize, Serialize};

/// Conversion applied to the written paper: 120 raw points become 130.
pub const CONVERSION_MULTIPLIER: f64 = 13.0 / 12.0;

/// Maximum raw written score.
pub const RAW_WRITTEN_MAX: f64 = 120.0;

/// Maximum written score after conversion.
pub const CONVERTED_WRITTEN_MAX: f64 = 130.0;

/// Upper bounds on the points a paper can award per subjective section.
pub const SHORT_WRITING_MAX: f64 = 15.0;
pub const LONG_WRITING_MAX: f64 = 25.0;
pub const LISTENING_MAX: f64 = 30.0;

/// Objective question types, scored by number of correct answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Reading,
    /// Seven-choose-five gap filling.
    Seven,
    Cloze,
    Grammar,
}

impl QuestionType {
    pub const ALL: [QuestionType; 4] = [
        QuestionType::Reading,
        QuestionType::Seven,
        QuestionType::Cloze,
        QuestionType::Grammar,
    ];

    pub fn name(self) -> &'static str {
        match self {
            QuestionType::Reading => "reading",
            QuestionType::Seven => "seven",
            QuestionType::Cloze => "cloze",
            QuestionType::Grammar => "grammar",
        }
    }

    /// Most questions of this type a paper can contain.
    pub fn max_count(self) -> u32 {
        match self {
            QuestionType::Reading => 20,
            QuestionType::Seven => 5,
            QuestionType::Cloze => 20,
            QuestionType::Grammar => 10,
        }
    }
}

/// Points awarded per correct answer for each objective question type.
///
/// Example YAML:
/// ```yaml
/// composite:
///   reading: 2
///   seven: 2
///   cloze: 1.5
///   grammar: 1
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CompositeConfig {
    pub reading: f64,
    pub seven: f64,
    pub cloze: f64,
    pub grammar: f64,
}

impl Default for CompositeConfig {
    fn default() -> Self {
        Self {
            reading: 2.0,
            seven: 2.0,
            cloze: 1.5,
            grammar: 1.0,
        }
    }
}

impl CompositeConfig {
    pub fn points_per_question(&self, question: QuestionType) -> f64 {
        match question {
            QuestionType::Reading => self.reading,
            QuestionType::Seven => self.seven,
            QuestionType::Cloze => self.cloze,
            QuestionType::Grammar => self.grammar,
        }
    }
}

/// Validate point values. Returns all errors at once.
pub fn validate_composite(config: &CompositeConfig) -> Result<(), Vec<String>> {
    let errors: Vec<String> = QuestionType::ALL
        .into_iter()
        .filter_map(|question| {
            let points = config.points_per_question(question);
            if !points.is_finite() || points < 0.0 {
                Some(format!(
                    "composite.{}: must be a non-negative number, got {}",
                    question.name(),
                    points
                ))
            } else {
                None
            }
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
