//! Weight trend statistics: normalization, trailing-window averages,
//! histogram bins, goal forecasts, BMI and CSV import/export.
//!
//! Every calculator is a pure function over a slice of samples and may be
//! called from any thread without coordination.

pub mod bmi;
pub mod cli;
pub mod csv_io;
pub mod distribution;
pub mod error;
pub mod forecast;
pub mod metrics;
pub mod models;
pub mod normalize;
pub mod period;
pub mod repository;
pub mod storage;
pub mod summary;
pub mod types;

#[cfg(feature = "python")]
mod py;

pub use bmi::{bmi, category};
pub use csv_io::{from_csv, from_csv_with, to_csv, CsvImport};
pub use distribution::{distribution, distribution_with, DistributionOptions, MAX_DENSE_BINS};
pub use error::StatsError;
pub use forecast::{forecast, forecast_from_trend, DEFAULT_TREND_WINDOW_DAYS};
pub use models::{Profile, RawDate, RawSample, RawWeight, Sample, SampleSeries, SlashDateOrder};
pub use normalize::{normalize, normalize_with, parse_date, parse_weight, Normalized};
pub use period::period_average;
pub use repository::{InMemorySampleRepository, SampleRepository};
pub use storage::{export_csv_file, import_csv_file, load_profile, save_profile};
pub use summary::{summarize, summarize_json, SummaryReport};
pub use types::{
    BmiCategory, BmiClass, Distribution, ForecastReason, ForecastResult, PeriodAverage,
    PeriodSummary, Severity, Summary,
};
