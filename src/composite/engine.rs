use serde::{Deserialize, Serialize};

use super::config::{
    CompositeConfig, QuestionType, CONVERSION_MULTIPLIER, LISTENING_MAX, LONG_WRITING_MAX,
    SHORT_WRITING_MAX,
};

/// Per-section input for the English composite.
///
/// Objective sections are counts of correct answers; writing and listening
/// are already in points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompositeInputs {
    pub reading: u32,
    pub seven: u32,
    pub cloze: u32,
    pub grammar: u32,
    pub short_writing: f64,
    pub long_writing: f64,
    pub listening: f64,
}

impl CompositeInputs {
    pub fn correct_answers(&self, question: QuestionType) -> u32 {
        match question {
            QuestionType::Reading => self.reading,
            QuestionType::Seven => self.seven,
            QuestionType::Cloze => self.cloze,
            QuestionType::Grammar => self.grammar,
        }
    }
}

/// A section of the paper as it appears in the score breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    Reading,
    Seven,
    Cloze,
    Grammar,
    ShortWriting,
    LongWriting,
    Listening,
}

impl Component {
    pub fn label(self) -> &'static str {
        match self {
            Component::Reading => "Reading",
            Component::Seven => "Seven-choose-five",
            Component::Cloze => "Cloze",
            Component::Grammar => "Grammar fill",
            Component::ShortWriting => "Short writing",
            Component::LongWriting => "Long writing",
            Component::Listening => "Listening & speaking",
        }
    }

    /// Whether the written-paper conversion applies to this section.
    pub fn is_converted(self) -> bool {
        !matches!(self, Component::Listening)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Contribution {
    pub component: Component,
    /// Points before conversion.
    pub points: f64,
    /// Points counted toward the final score.
    pub contributes: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompositeScore {
    pub objective: f64,
    pub subjective: f64,
    pub raw_written: f64,
    pub converted_written: f64,
    pub listening: f64,
    pub final_score: f64,
    #[serde(skip)]
    sections: [f64; 6],
}

impl CompositeScore {
    /// Each section's share of the final score. Written sections are
    /// multiplied by the conversion factor; listening is added as entered.
    pub fn breakdown(&self) -> Vec<Contribution> {
        const WRITTEN: [Component; 6] = [
            Component::Reading,
            Component::Seven,
            Component::Cloze,
            Component::Grammar,
            Component::ShortWriting,
            Component::LongWriting,
        ];

        let mut parts: Vec<Contribution> = WRITTEN
            .into_iter()
            .zip(self.sections)
            .map(|(component, points)| Contribution {
                component,
                points,
                contributes: points * CONVERSION_MULTIPLIER,
            })
            .collect();
        parts.push(Contribution {
            component: Component::Listening,
            points: self.listening,
            contributes: self.listening,
        });
        parts
    }

    pub fn badge(&self) -> Badge {
        badge(self.final_score)
    }

    pub fn tier(&self) -> ScoreTier {
        ScoreTier::for_score(self.final_score)
    }
}

/// Check every input against what a paper can award.
/// Returns all validation errors at once (not just the first).
pub fn validate_inputs(inputs: &CompositeInputs) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for question in QuestionType::ALL {
        let count = inputs.correct_answers(question);
        if count > question.max_count() {
            errors.push(format!(
                "{}: {} correct answers exceeds the maximum of {}",
                question.name(),
                count,
                question.max_count()
            ));
        }
    }

    for (name, points, max) in [
        ("short_writing", inputs.short_writing, SHORT_WRITING_MAX),
        ("long_writing", inputs.long_writing, LONG_WRITING_MAX),
        ("listening", inputs.listening, LISTENING_MAX),
    ] {
        if !points.is_finite() || !(0.0..=max).contains(&points) {
            errors.push(format!("{}: must be between 0 and {}, got {}", name, max, points));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Composite English score.
///
/// `raw_written = objective + subjective`, converted by 13/12, then the
/// listening score is added unconverted.
pub fn compute_composite(inputs: &CompositeInputs, config: &CompositeConfig) -> CompositeScore {
    let [reading, seven, cloze, grammar] = QuestionType::ALL
        .map(|q| inputs.correct_answers(q) as f64 * config.points_per_question(q));

    let objective = reading + seven + cloze + grammar;
    let subjective = inputs.short_writing + inputs.long_writing;

    let raw_written = objective + subjective;
    let converted_written = raw_written * CONVERSION_MULTIPLIER;
    let final_score = converted_written + inputs.listening;

    CompositeScore {
        objective,
        subjective,
        raw_written,
        converted_written,
        listening: inputs.listening,
        final_score,
        sections: [
            reading,
            seven,
            cloze,
            grammar,
            inputs.short_writing,
            inputs.long_writing,
        ],
    }
}

/// Headline classification of a final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    Legendary,
    TopTier,
    Excellent,
    Average,
    NeedsPractice,
    Struggling,
}

impl Badge {
    /// Highest first; each bound is inclusive.
    const BANDS: [(f64, Badge); 5] = [
        (138.0, Badge::Legendary),
        (130.0, Badge::TopTier),
        (120.0, Badge::Excellent),
        (100.0, Badge::Average),
        (90.0, Badge::NeedsPractice),
    ];

    pub fn label(self) -> &'static str {
        match self {
            Badge::Legendary => "Off the charts",
            Badge::TopTier => "Top tier",
            Badge::Excellent => "Excellent",
            Badge::Average => "On par",
            Badge::NeedsPractice => "Needs practice",
            Badge::Struggling => "Keep at it",
        }
    }

    /// Lowest final score that earns this badge.
    pub fn min_score(self) -> Option<f64> {
        Self::BANDS
            .iter()
            .find(|(_, badge)| *badge == self)
            .map(|(min, _)| *min)
    }
}

pub fn badge(final_score: f64) -> Badge {
    Badge::BANDS
        .iter()
        .find(|(min, _)| final_score >= *min)
        .map(|(_, badge)| *badge)
        .unwrap_or(Badge::Struggling)
}

/// Coarser band used to colour the headline score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTier {
    Top,
    High,
    Mid,
    Low,
    Failing,
}

impl ScoreTier {
    pub fn for_score(final_score: f64) -> ScoreTier {
        if final_score >= 130.0 {
            ScoreTier::Top
        } else if final_score >= 120.0 {
            ScoreTier::High
        } else if final_score >= 100.0 {
            ScoreTier::Mid
        } else if final_score >= 90.0 {
            ScoreTier::Low
        } else {
            ScoreTier::Failing
        }
    }
}
