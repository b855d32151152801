pub mod formatter;

pub use formatter::{
    format_breakdown, format_composite, format_dataset_list, format_resolution,
    format_scaled_table, format_score, format_series_json, format_series_tsv, should_use_colors,
    SubjectRow,
};
