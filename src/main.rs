use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use gd_calc::composite::{compute_composite, validate_inputs, CompositeInputs};
use gd_calc::config::{self, Config};
use gd_calc::input::{parse_raw_input, InputError};
use gd_calc::output::{self, SubjectRow};
use gd_calc::scaling::{self, DatasetRegistry, ScalingDataset, Subject};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SeriesFormat {
    Tsv,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Estimate the composite English score
    English {
        /// Correct reading comprehension answers
        #[arg(long, default_value_t = 0)]
        reading: u32,
        /// Correct seven-choose-five answers
        #[arg(long, default_value_t = 0)]
        seven: u32,
        /// Correct cloze answers
        #[arg(long, default_value_t = 0)]
        cloze: u32,
        /// Correct grammar fill answers
        #[arg(long, default_value_t = 0)]
        grammar: u32,
        /// Short writing points
        #[arg(long, default_value_t = 0.0)]
        short_writing: f64,
        /// Long writing points
        #[arg(long, default_value_t = 0.0)]
        long_writing: f64,
        /// Listening and speaking points (0-30, added after conversion)
        #[arg(long, default_value_t = 0.0)]
        listening: f64,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Convert raw subject scores to scaled scores and percentiles
    Scale {
        /// Dataset key (defaults to the configured default)
        #[arg(short, long)]
        dataset: Option<String>,
        /// Chemistry raw score (0-100; empty = not entered)
        #[arg(long)]
        chemistry: Option<String>,
        /// Biology raw score (0-100; empty = not entered)
        #[arg(long)]
        biology: Option<String>,
        /// Politics raw score (0-100; empty = not entered)
        #[arg(long)]
        politics: Option<String>,
        /// Geography raw score (0-100; empty = not entered)
        #[arg(long)]
        geography: Option<String>,
        /// Print the results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the full raw-score sweep for charting
    Chart {
        /// Dataset key (defaults to the configured default)
        #[arg(short, long)]
        dataset: Option<String>,
        /// Subject to include (repeatable)
        #[arg(short, long = "subject")]
        subjects: Vec<Subject>,
        #[arg(short, long, value_enum, default_value_t = SeriesFormat::Tsv)]
        format: SeriesFormat,
    },
    /// List available scaling datasets
    Datasets,
    /// Print the effective configuration
    Config,
}

#[derive(Parser, Debug)]
#[command(name = "gd-calc")]
#[command(about = "Exam score calculators: scaled scores, percentiles and English composite", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/gd-calc/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn select_dataset<'a>(registry: &'a DatasetRegistry, key: Option<&str>) -> &'a ScalingDataset {
    match registry.select(key) {
        Ok(dataset) => {
            if scaling::is_sample(&dataset.key) {
                log::warn!(
                    "Dataset '{}' is illustrative sample data, not official conversion tables",
                    dataset.key
                );
            }
            dataset
        }
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Available datasets: {}", registry.keys().collect::<Vec<_>>().join(", "));
            std::process::exit(EXIT_INPUT);
        }
    }
}

fn fail_input(e: InputError) -> ! {
    eprintln!("Invalid input: {}", e);
    std::process::exit(EXIT_INPUT);
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize output: {}", e);
            std::process::exit(EXIT_INPUT);
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate config at startup
    if let Err(errors) = config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let registry = match config::build_registry(&config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    log::debug!(
        "{} datasets registered, default '{}'",
        registry.len(),
        registry.default_dataset().key
    );

    let use_colors = output::should_use_colors();

    match cli.command {
        Commands::English {
            reading,
            seven,
            cloze,
            grammar,
            short_writing,
            long_writing,
            listening,
            json,
        } => {
            let inputs = CompositeInputs {
                reading,
                seven,
                cloze,
                grammar,
                short_writing,
                long_writing,
                listening,
            };
            if let Err(errors) = validate_inputs(&inputs) {
                eprintln!("Invalid input:");
                for error in errors {
                    eprintln!("  - {}", error);
                }
                std::process::exit(EXIT_INPUT);
            }
            let score = compute_composite(&inputs, &config.composite);

            if json {
                print_json(&serde_json::json!({
                    "score": score,
                    "badge": score.badge(),
                    "badge_label": score.badge().label(),
                    "breakdown": score.breakdown(),
                }));
            } else {
                println!("{}", output::format_composite(&score, use_colors));
                if cli.verbose {
                    println!();
                    println!("{}", output::format_breakdown(&score));
                }
            }
        }
        Commands::Scale {
            dataset,
            chemistry,
            biology,
            politics,
            geography,
            json,
        } => {
            let dataset = select_dataset(&registry, dataset.as_deref());
            log::debug!("Using dataset '{}'", dataset.key);

            let entered = [
                (Subject::Chemistry, chemistry),
                (Subject::Biology, biology),
                (Subject::Politics, politics),
                (Subject::Geography, geography),
            ];

            let mut rows = Vec::new();
            for (subject, text) in entered {
                // Subjects without a flag are not selected
                let Some(text) = text else { continue };
                let raw = parse_raw_input(&text).unwrap_or_else(|e| fail_input(e));
                rows.push(SubjectRow {
                    subject,
                    result: raw.map(|raw| scaling::evaluate(subject, raw, dataset)),
                });
            }

            if json {
                let results: Vec<_> = rows.iter().filter_map(|row| row.result).collect();
                print_json(&results);
            } else {
                println!("{}", output::format_scaled_table(&rows, use_colors));
                if cli.verbose {
                    for result in rows.iter().filter_map(|row| row.result.as_ref()) {
                        eprintln!("{}", output::format_resolution(result));
                    }
                }
            }
        }
        Commands::Chart {
            dataset,
            subjects,
            format,
        } => {
            let dataset = select_dataset(&registry, dataset.as_deref());
            let series = scaling::generate_series(&subjects, dataset);
            log::debug!(
                "Generated {} points for {} subjects from '{}'",
                series.len(),
                subjects.len(),
                dataset.key
            );

            match format {
                SeriesFormat::Tsv => println!("{}", output::format_series_tsv(&series, &subjects)),
                SeriesFormat::Json => match output::format_series_json(&series) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Failed to serialize series: {}", e);
                        std::process::exit(EXIT_INPUT);
                    }
                },
            }
        }
        Commands::Datasets => {
            println!("{}", output::format_dataset_list(&registry, use_colors));
        }
        Commands::Config => {
            let effective = Config {
                default_dataset: Some(registry.default_dataset().key.clone()),
                ..config
            };
            match serde_saphyr::to_string(&effective) {
                Ok(yaml) => print!("{}", yaml),
                Err(e) => {
                    eprintln!("Failed to serialize config: {}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
