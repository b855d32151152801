use std::io::IsTerminal;

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::composite::{CompositeScore, ScoreTier, CONVERTED_WRITTEN_MAX, RAW_WRITTEN_MAX};
use crate::scaling::{DatasetRegistry, GradeZone, ScaledResult, SeriesPoint, Subject};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a scaled score or percentile with one decimal, dropping a
/// trailing ".0" (86.0 -> "86", 72.5 -> "72.5")
pub fn format_score(value: f64) -> String {
    let formatted = format!("{:.1}", value);
    formatted
        .strip_suffix(".0")
        .map(str::to_string)
        .unwrap_or(formatted)
}

fn paint_zone(text: &str, zone: GradeZone) -> String {
    match zone {
        GradeZone::A => text.green().bold().to_string(),
        GradeZone::B => text.cyan().bold().to_string(),
        GradeZone::C => text.yellow().bold().to_string(),
        GradeZone::D => text.red().bold().to_string(),
        GradeZone::E => text.dimmed().to_string(),
    }
}

fn paint_tier(text: &str, tier: ScoreTier) -> String {
    match tier {
        ScoreTier::Top => text.green().bold().to_string(),
        ScoreTier::High => text.cyan().bold().to_string(),
        ScoreTier::Mid => text.blue().bold().to_string(),
        ScoreTier::Low => text.bold().to_string(),
        ScoreTier::Failing => text.red().bold().to_string(),
    }
}

/// A subject row for the scaler view. `result` is `None` when the user has
/// not entered a raw score for the subject.
pub struct SubjectRow {
    pub subject: Subject,
    pub result: Option<ScaledResult>,
}

/// Format subject rows as an aligned table:
/// subject, raw, scaled, zone, percentile
pub fn format_scaled_table(rows: &[SubjectRow], use_colors: bool) -> String {
    if rows.is_empty() {
        return "No subjects selected.".to_string();
    }

    rows.iter()
        .map(|row| {
            let name = format!("{:<10}", row.subject.name());
            let name = if use_colors {
                name.bold().to_string()
            } else {
                name
            };

            match row.result {
                None => format!("{} {:>4}", name, "-"),
                Some(ref result) => {
                    let scaled = format!("{:>5}", format_score(result.scaled));
                    let zone = result.zone.letter().to_string();
                    let (scaled, zone) = if use_colors {
                        (paint_zone(&scaled, result.zone), paint_zone(&zone, result.zone))
                    } else {
                        (scaled, zone)
                    };
                    format!(
                        "{} {:>4} -> {}  {}  {:>5}%  ({})",
                        name,
                        result.raw,
                        scaled,
                        zone,
                        format_score(result.percentile),
                        result.zone.description()
                    )
                }
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Detail line explaining which lookup rule produced a scaled score (verbose mode)
pub fn format_resolution(result: &ScaledResult) -> String {
    use crate::scaling::Resolution;

    match result.resolution {
        Resolution::Exact { .. } => format!("  {}: listed in table", result.subject),
        Resolution::ClampedHigh { raw, .. } => {
            format!("  {}: above highest listed raw score {}", result.subject, raw)
        }
        Resolution::ClampedLow { raw, .. } => {
            format!("  {}: below lowest listed raw score {}", result.subject, raw)
        }
        Resolution::Nearest { raw, .. } => {
            format!("  {}: not listed, nearest raw score {}", result.subject, raw)
        }
        Resolution::Fallback => format!("  {}: no table in dataset, using floor", result.subject),
    }
}

/// Format the composite English score card
pub fn format_composite(score: &CompositeScore, use_colors: bool) -> String {
    let headline = format!("{:.2}", score.final_score);
    let badge = score.badge().label();
    let headline = if use_colors {
        paint_tier(&headline, score.tier())
    } else {
        headline
    };

    format!(
        "Estimated score: {}  [{}]\n  Written (raw):       {:.1}/{}\n  Written (converted): {:.2}/{}\n  Listening:           {}",
        headline,
        badge,
        score.raw_written,
        RAW_WRITTEN_MAX,
        score.converted_written,
        CONVERTED_WRITTEN_MAX,
        format_score(score.listening)
    )
}

/// Format the per-section breakdown of a composite score (verbose mode)
pub fn format_breakdown(score: &CompositeScore) -> String {
    score
        .breakdown()
        .iter()
        .map(|part| {
            let note = if part.component.is_converted() { "x13/12" } else { "as is" };
            format!(
                "  {:<22} {:>6} -> {:>6.2} ({})",
                part.component.label(),
                format_score(part.points),
                part.contributes,
                note
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a series as tab-separated values with a header row.
/// Columns: raw, then scaled and percentile per subject.
pub fn format_series_tsv(series: &[SeriesPoint], subjects: &[Subject]) -> String {
    let mut subjects = subjects.to_vec();
    subjects.sort();
    subjects.dedup();

    let mut header = vec!["raw".to_string()];
    for subject in &subjects {
        header.push(format!("{}_scaled", subject));
        header.push(format!("{}_percentile", subject));
    }

    let mut lines = vec![header.join("\t")];
    for point in series {
        let mut cells = vec![point.raw.to_string()];
        for &subject in &subjects {
            match point.get(subject) {
                Some(p) => {
                    cells.push(format_score(p.scaled));
                    cells.push(format!("{:.2}", p.percentile));
                }
                None => {
                    cells.push(String::new());
                    cells.push(String::new());
                }
            }
        }
        lines.push(cells.join("\t"));
    }
    lines.join("\n")
}

pub fn format_series_json(series: &[SeriesPoint]) -> Result<String> {
    Ok(serde_json::to_string_pretty(series)?)
}

/// List registered datasets, marking the default
pub fn format_dataset_list(registry: &DatasetRegistry, use_colors: bool) -> String {
    let default_key = &registry.default_dataset().key;
    registry
        .iter()
        .map(|dataset| {
            let marker = if &dataset.key == default_key { "*" } else { " " };
            let subjects = dataset
                .tables
                .iter()
                .filter(|(_, table)| !table.is_empty())
                .map(|(subject, _)| subject.name())
                .collect::<Vec<_>>()
                .join(", ");
            let key = if use_colors {
                dataset.key.bold().to_string()
            } else {
                dataset.key.clone()
            };
            match dataset.label {
                Some(ref label) => format!("{} {}  {}  [{}]", marker, key, label, subjects),
                None => format!("{} {}  [{}]", marker, key, subjects),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composite::{compute_composite, CompositeConfig, CompositeInputs};
    use crate::input::RawScore;
    use crate::scaling::{evaluate, generate_series, ScalingDataset, ScoreTable};

    fn dataset() -> ScalingDataset {
        ScalingDataset::new("test")
            .with_label("Test set")
            .with_table(
                Subject::Chemistry,
                ScoreTable::from_pairs(&[(100, 100.0), (80, 86.0), (60, 72.5)]),
            )
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(86.0), "86");
        assert_eq!(format_score(72.5), "72.5");
        assert_eq!(format_score(56.3333), "56.3");
        assert_eq!(format_score(0.0), "0");
    }

    #[test]
    fn test_scaled_table_plain() {
        let ds = dataset();
        let rows = vec![
            SubjectRow {
                subject: Subject::Chemistry,
                result: Some(evaluate(Subject::Chemistry, RawScore::new(80).unwrap(), &ds)),
            },
            SubjectRow {
                subject: Subject::Biology,
                result: None,
            },
        ];
        let output = format_scaled_table(&rows, false);
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("chemistry"));
        assert!(lines[0].contains("80 ->    86  A"));
        assert!(lines[0].contains("top 15%"));
        assert!(lines[1].starts_with("biology"));
        assert!(lines[1].ends_with('-'));
    }

    #[test]
    fn test_scaled_table_empty() {
        assert_eq!(format_scaled_table(&[], false), "No subjects selected.");
    }

    #[test]
    fn test_resolution_detail() {
        let ds = dataset();
        let result = evaluate(Subject::Chemistry, RawScore::new(75).unwrap(), &ds);
        assert!(format_resolution(&result).contains("nearest raw score 80"));
        let result = evaluate(Subject::Politics, RawScore::new(75).unwrap(), &ds);
        assert!(format_resolution(&result).contains("no table"));
    }

    #[test]
    fn test_composite_plain() {
        let inputs = CompositeInputs {
            reading: 5,
            seven: 5,
            cloze: 4,
            grammar: 6,
            short_writing: 8.0,
            long_writing: 12.0,
            listening: 20.0,
        };
        let score = compute_composite(&inputs, &CompositeConfig::default());
        let output = format_composite(&score, false);
        assert!(output.starts_with("Estimated score: 76.33  [Keep at it]"));
        assert!(output.contains("52.0/120"));
        assert!(output.contains("56.33/130"));

        let breakdown = format_breakdown(&score);
        assert_eq!(breakdown.lines().count(), 7);
        assert!(breakdown.lines().last().unwrap().contains("as is"));
    }

    #[test]
    fn test_series_tsv() {
        let ds = dataset();
        let series = generate_series(&[Subject::Chemistry], &ds);
        let output = format_series_tsv(&series, &[Subject::Chemistry]);
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 102);
        assert_eq!(lines[0], "raw\tchemistry_scaled\tchemistry_percentile");
        assert_eq!(lines[81], "80\t86\t88.00");
        assert_eq!(lines[101], "100\t100\t100.00");
    }

    #[test]
    fn test_series_tsv_without_subjects() {
        let series = generate_series(&[], &dataset());
        let output = format_series_tsv(&series, &[]);
        assert_eq!(output.lines().count(), 102);
        assert_eq!(output.lines().next(), Some("raw"));
    }

    #[test]
    fn test_series_json() {
        let series = generate_series(&[Subject::Chemistry], &dataset());
        let json = format_series_json(&series).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 101);
        assert_eq!(parsed[100]["subjects"]["chemistry"]["scaled"], 100.0);
    }

    #[test]
    fn test_dataset_list() {
        let registry = DatasetRegistry::new(vec![dataset(), ScalingDataset::new("other")]).unwrap();
        let output = format_dataset_list(&registry, false);
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[0], "* test  Test set  [chemistry]");
        assert_eq!(lines[1], "  other  []");
    }
}
