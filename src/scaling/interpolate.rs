use serde::Serialize;

use super::table::{ScalingDataset, ScoreTable, Subject};
use crate::input::{InputError, RawScore};

/// Scaled score returned when a subject has no table: the floor of the range.
pub const FALLBACK_SCALED: f64 = 30.0;

/// Scaled score returned by [`interpolate_text`] for text that is not a number.
pub const UNPARSEABLE_SENTINEL: f64 = 0.0;

/// How a raw score was resolved against a table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Resolution {
    /// The raw score is listed in the table.
    Exact { scaled: f64 },
    /// Above the highest listed raw score.
    ClampedHigh { raw: u8, scaled: f64 },
    /// Below the lowest listed raw score.
    ClampedLow { raw: u8, scaled: f64 },
    /// Inside the listed range but missing; `raw` is the neighbour used.
    Nearest { raw: u8, scaled: f64 },
    /// No table, or an empty one.
    Fallback,
}

impl Resolution {
    pub fn scaled(&self) -> f64 {
        match *self {
            Resolution::Exact { scaled }
            | Resolution::ClampedHigh { scaled, .. }
            | Resolution::ClampedLow { scaled, .. }
            | Resolution::Nearest { scaled, .. } => scaled,
            Resolution::Fallback => FALLBACK_SCALED,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Resolution::Fallback)
    }

    pub fn rule(&self) -> &'static str {
        match self {
            Resolution::Exact { .. } => "exact",
            Resolution::ClampedHigh { .. } => "clamped high",
            Resolution::ClampedLow { .. } => "clamped low",
            Resolution::Nearest { .. } => "nearest",
            Resolution::Fallback => "fallback",
        }
    }
}

/// Resolve `raw` against a table.
///
/// Order of rules: exact hit (first match in table order), clamp above the
/// highest / below the lowest listed raw score, then nearest neighbour. The
/// nearest-neighbour scan only replaces its candidate on a strictly smaller
/// distance, so equidistant neighbours resolve to the one listed first.
pub fn resolve(table: Option<&ScoreTable>, raw: i32) -> Resolution {
    let pairs = match table {
        Some(table) if !table.is_empty() => table.pairs(),
        _ => return Resolution::Fallback,
    };

    if let Some(&(_, scaled)) = pairs.iter().find(|&&(r, _)| i32::from(r) == raw) {
        return Resolution::Exact { scaled };
    }

    let (mut max_raw, mut max_scaled) = pairs[0];
    let (mut min_raw, mut min_scaled) = pairs[0];
    for &(r, s) in &pairs[1..] {
        if r > max_raw {
            max_raw = r;
            max_scaled = s;
        }
        if r < min_raw {
            min_raw = r;
            min_scaled = s;
        }
    }

    if raw > i32::from(max_raw) {
        return Resolution::ClampedHigh {
            raw: max_raw,
            scaled: max_scaled,
        };
    }
    if raw < i32::from(min_raw) {
        return Resolution::ClampedLow {
            raw: min_raw,
            scaled: min_scaled,
        };
    }

    let mut closest = pairs[0];
    let mut min_diff = (raw - i32::from(closest.0)).abs();
    for &pair in pairs {
        let diff = (raw - i32::from(pair.0)).abs();
        if diff < min_diff {
            min_diff = diff;
            closest = pair;
        }
    }

    Resolution::Nearest {
        raw: closest.0,
        scaled: closest.1,
    }
}

/// Scaled score for `raw` in `subject` under `dataset`.
pub fn interpolate(subject: Subject, raw: i32, dataset: &ScalingDataset) -> f64 {
    interpolate_detailed(subject, raw, dataset).scaled()
}

pub fn interpolate_detailed(subject: Subject, raw: i32, dataset: &ScalingDataset) -> Resolution {
    resolve(dataset.table(subject), raw)
}

/// Like [`interpolate`], but rejects raw scores outside `0..=100` instead of
/// letting the table clamp them.
pub fn checked_interpolate(
    subject: Subject,
    raw: i32,
    dataset: &ScalingDataset,
) -> Result<f64, InputError> {
    let raw = RawScore::try_from(raw)?;
    Ok(interpolate(subject, i32::from(raw), dataset))
}

/// Scaled score for optional input: `None` stays `None`.
pub fn scaled_for(subject: Subject, raw: Option<RawScore>, dataset: &ScalingDataset) -> Option<f64> {
    raw.map(|raw| interpolate(subject, i32::from(raw), dataset))
}

/// Text entry point that keeps the calculator's historical behaviour.
///
/// The raw score is read from the leading integer of the text (optional
/// sign, then digits; anything after is ignored), so `"70abc"` and `"70.9"`
/// both read as 70. Text without a leading integer yields `0.0`, which
/// callers cannot tell apart from a real result without checking the input
/// first. Prefer [`crate::input::parse_raw_input`] with [`scaled_for`].
pub fn interpolate_text(subject: Subject, text: &str, dataset: &ScalingDataset) -> f64 {
    match leading_integer(text) {
        Some(raw) => interpolate(subject, raw, dataset),
        None => UNPARSEABLE_SENTINEL,
    }
}

/// Leading `[+-]?[0-9]+` of `text` after leading whitespace, saturating at
/// the `i32` bounds.
fn leading_integer(text: &str) -> Option<i32> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let mut value: i32 = 0;
    let mut seen_digit = false;
    for c in digits.chars().take_while(char::is_ascii_digit) {
        seen_digit = true;
        let digit = (c as u8 - b'0') as i32;
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }
    seen_digit.then_some(value)
}
