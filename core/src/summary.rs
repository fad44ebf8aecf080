use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use serde_path_to_error as spte;

use crate::bmi::{bmi, category};
use crate::distribution::{distribution_with, DistributionOptions};
use crate::error::StatsError;
use crate::forecast::forecast_from_trend;
use crate::models::{Profile, RawSample, Sample, SampleSeries};
use crate::normalize::normalize_with;
use crate::period::period_average;
use crate::types::{PeriodSummary, Summary};

/// Bygger dashboard-data for én serie.
pub fn summarize(samples: &[Sample], profile: &Profile) -> Result<Summary, StatsError> {
    let series = SampleSeries::from_unsorted(samples);
    let days = series.daily_means();
    let (Some(newest), Some(oldest)) = (days.newest(), days.oldest()) else {
        return Ok(Summary::default());
    };

    let current = newest.weight;
    let start = profile.start_weight.unwrap_or(oldest.weight);
    let weights = || series.iter().map(|s| OrderedFloat(s.weight));
    // én verdi per dag – dobbel veiing teller ikke to ganger
    let average = days.iter().map(|s| s.weight).sum::<f64>() / days.len() as f64;

    let periods = profile
        .period_windows
        .iter()
        .map(|&window_days| PeriodSummary {
            window_days,
            average: period_average(&series, window_days),
        })
        .collect();

    let forecast = match profile.goal_weight {
        Some(goal) => {
            let trend = period_average(&series, profile.trend_window_days);
            Some(forecast_from_trend(&series, goal, &trend)?)
        }
        None => None,
    };

    let bmi_value = bmi(Some(current), profile.height_cm);

    Ok(Summary {
        entry_count: series.len(),
        first_date: Some(oldest.date),
        latest_date: Some(newest.date),
        current_weight: Some(current),
        start_weight: Some(start),
        total_change: Some(current - start),
        min_weight: weights().min().map(OrderedFloat::into_inner),
        max_weight: weights().max().map(OrderedFloat::into_inner),
        average_weight: Some(average),
        goal_weight: profile.goal_weight,
        remaining_to_goal: profile.goal_weight.map(|g| g - current),
        goal_progress_pct: profile
            .goal_weight
            .and_then(|g| goal_progress_pct(start, current, g)),
        periods,
        forecast,
        distribution: distribution_with(
            &series,
            DistributionOptions {
                include_empty: profile.include_empty_bins,
            },
        ),
        bmi: bmi_value,
        bmi_category: category(bmi_value),
    })
}

/// Andel av strekningen start→mål som er tilbakelagt, klemt til 0–100 %.
pub fn goal_progress_pct(start: f64, current: f64, goal: f64) -> Option<f64> {
    let span = start - goal;
    if span == 0.0 || !span.is_finite() {
        return None;
    }
    Some(((start - current) / span * 100.0).clamp(0.0, 100.0))
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    #[serde(flatten)]
    pub summary: Summary,
    pub skipped_count: usize,
    pub ambiguous_count: usize,
}

/// JSON entry point: raw sample array (+ optional profile) in, report out.
pub fn summarize_json(samples_json: &str, profile_json: Option<&str>) -> Result<String, StatsError> {
    let mut de = serde_json::Deserializer::from_str(samples_json);
    let raw: Vec<RawSample> = spte::deserialize(&mut de)
        .map_err(|e| StatsError::InvalidArgument(format!("samples at {}: {}", e.path(), e)))?;

    let profile: Profile = match profile_json {
        Some(p) if !p.trim().is_empty() => {
            let mut de = serde_json::Deserializer::from_str(p);
            spte::deserialize(&mut de)
                .map_err(|e| StatsError::InvalidArgument(format!("profile at {}: {}", e.path(), e)))?
        }
        _ => Profile::default(),
    };

    let normalized = normalize_with(raw, profile.date_order);
    let report = SummaryReport {
        summary: summarize(&normalized.series, &profile)?,
        skipped_count: normalized.skipped_count,
        ambiguous_count: normalized.ambiguous_count,
    };
    Ok(serde_json::to_string(&report)?)
}
