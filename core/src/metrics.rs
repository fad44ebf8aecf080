use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounter, Registry, TextEncoder};

use crate::error::StatsError;

/// Prosess-globale tellere. Kun observabilitet – leses aldri av beregningene.
pub struct Metrics {
    pub registry: Registry,
    rows_accepted: IntCounter,
    rows_skipped: IntCounter,
    ambiguous_dates: IntCounter,
    csv_imports: IntCounter,
    csv_exports: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, StatsError> {
        let registry = Registry::new();

        let rows_accepted = IntCounter::new(
            "weightlog_rows_accepted_total",
            "Input rows that normalized into a sample",
        )?;
        let rows_skipped = IntCounter::new(
            "weightlog_rows_skipped_total",
            "Input rows dropped for a bad date or weight",
        )?;
        let ambiguous_dates = IntCounter::new(
            "weightlog_ambiguous_dates_total",
            "Slash dates readable as both M/D/Y and D/M/Y",
        )?;
        let csv_imports = IntCounter::new("weightlog_csv_imports_total", "CSV texts parsed")?;
        let csv_exports = IntCounter::new("weightlog_csv_exports_total", "CSV texts written")?;

        for c in [&rows_accepted, &rows_skipped, &ambiguous_dates, &csv_imports, &csv_exports] {
            registry.register(Box::new(c.clone()))?;
        }

        Ok(Self {
            registry,
            rows_accepted,
            rows_skipped,
            ambiguous_dates,
            csv_imports,
            csv_exports,
        })
    }

    /// Prometheus text exposition of every registered counter.
    pub fn gather_text(&self) -> Result<String, StatsError> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buf)?;
        String::from_utf8(buf).map_err(|e| StatsError::InvalidArgument(e.to_string()))
    }
}

static METRICS: Lazy<Metrics> =
    Lazy::new(|| Metrics::new().expect("static metric descriptors are valid"));

pub fn metrics() -> &'static Metrics {
    &METRICS
}

pub fn rows_accepted_total(m: &Metrics) -> &IntCounter {
    &m.rows_accepted
}

pub fn rows_skipped_total(m: &Metrics) -> &IntCounter {
    &m.rows_skipped
}

pub fn ambiguous_dates_total(m: &Metrics) -> &IntCounter {
    &m.ambiguous_dates
}

pub fn csv_imports_total(m: &Metrics) -> &IntCounter {
    &m.csv_imports
}

pub fn csv_exports_total(m: &Metrics) -> &IntCounter {
    &m.csv_exports
}
