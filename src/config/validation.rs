use super::schema::Config;
use crate::composite::validate_composite;
use crate::scaling::{builtin, Subject};

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Err(composite_errors) = validate_composite(&config.composite) {
        errors.extend(composite_errors);
    }

    let builtin_keys: Vec<String> = builtin::datasets().into_iter().map(|d| d.key).collect();
    let mut seen_keys: Vec<&str> = Vec::new();

    for (i, dataset) in config.datasets.iter().enumerate() {
        let key = dataset.key.as_str();
        if key.trim().is_empty() {
            errors.push(format!("datasets[{}].key: must not be empty", i));
        } else if key != key.trim() {
            errors.push(format!(
                "datasets[{}].key: '{}' must not have leading or trailing whitespace",
                i, key
            ));
        } else if builtin_keys.iter().any(|k| k == key) {
            errors.push(format!(
                "datasets[{}].key: '{}' is already used by a built-in dataset",
                i, key
            ));
        } else if seen_keys.contains(&key) {
            errors.push(format!("datasets[{}].key: duplicate key '{}'", i, key));
        }
        seen_keys.push(key);

        for subject in Subject::ALL {
            let Some(table) = dataset.table(subject) else {
                continue;
            };
            for (j, &(raw, scaled)) in table.pairs().iter().enumerate() {
                if raw > 100 {
                    errors.push(format!(
                        "datasets[{}].tables.{}[{}]: raw score {} outside 0-100",
                        i, subject, j, raw
                    ));
                }
                if !(30.0..=100.0).contains(&scaled) {
                    errors.push(format!(
                        "datasets[{}].tables.{}[{}]: scaled score {} outside 30-100",
                        i, subject, j, scaled
                    ));
                }
            }
        }
    }

    if let Some(ref default_key) = config.default_dataset {
        let known = builtin_keys.iter().any(|k| k == default_key)
            || config.datasets.iter().any(|d| &d.key == default_key);
        if !known {
            errors.push(format!(
                "default_dataset: unknown dataset '{}'",
                default_key
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
