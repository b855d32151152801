pub mod config;
pub mod engine;

pub use config::{
    validate_composite, CompositeConfig, QuestionType, CONVERSION_MULTIPLIER,
    CONVERTED_WRITTEN_MAX, LISTENING_MAX, LONG_WRITING_MAX, RAW_WRITTEN_MAX, SHORT_WRITING_MAX,
};
pub use engine::{
    badge, compute_composite, validate_inputs, Badge, Component, CompositeInputs, CompositeScore, Contribution,
    ScoreTier,
};
