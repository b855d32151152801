//! Score calculators for the Guangdong new-gaokao regime.
//!
//! - [`scaling`]: raw -> scaled lookups, percentiles and chart series for
//!   assigned-grade subjects.
//! - [`composite`]: the English composite score and its badge.
//! - [`input`]: parsing of user-entered raw scores.
//!
//! Every engine function is pure: datasets and point values are passed in
//! explicitly and nothing is cached between calls.

pub mod composite;
pub mod config;
pub mod input;
pub mod output;
pub mod scaling;
