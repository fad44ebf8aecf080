use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Trailing-window change between the oldest and newest sample in the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PeriodAverage {
    pub has_data: bool,
    pub start_weight: Option<f64>,
    pub end_weight: Option<f64>,
    pub total_change: Option<f64>, // end - start, negative = loss
    pub daily_rate: Option<f64>,   // kg/day
    pub window_start: Option<NaiveDate>,
    pub window_end: Option<NaiveDate>,
    pub sample_count: usize,
}

impl PeriodAverage {
    pub fn no_data() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForecastReason {
    #[serde(rename = "insufficient data")]
    InsufficientData,
    #[serde(rename = "gaining while goal is loss")]
    GainingWhileGoalIsLoss,
    #[serde(rename = "losing while goal is gain")]
    LosingWhileGoalIsGain,
    #[serde(rename = "no trend")]
    NoTrend,
}

impl fmt::Display for ForecastReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ForecastReason::InsufficientData => "insufficient data",
            ForecastReason::GainingWhileGoalIsLoss => "gaining while goal is loss",
            ForecastReason::LosingWhileGoalIsGain => "losing while goal is gain",
            ForecastReason::NoTrend => "no trend",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    pub has_data: bool,
    pub is_possible: bool,
    pub reason: Option<ForecastReason>,
    pub current_weight: Option<f64>,
    pub goal_weight: f64,
    pub daily_rate: Option<f64>,
    pub weekly_rate: Option<f64>, // |daily| * 7
    pub days_to_goal: Option<i64>,
    pub target_date: Option<NaiveDate>,
}

/// Histogram over fixed 0.5 kg bins; `ranges` and `counts` are parallel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Distribution {
    pub ranges: Vec<String>,
    pub counts: Vec<usize>,
}

impl Distribution {
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiClass {
    Underweight,
    Healthy,
    Overweight,
    Obese,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BmiCategory {
    pub class: BmiClass,
    pub label: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub window_days: u32,
    pub average: PeriodAverage,
}

/// Everything a dashboard renders for one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub entry_count: usize,
    pub first_date: Option<NaiveDate>,
    pub latest_date: Option<NaiveDate>,
    pub current_weight: Option<f64>,
    pub start_weight: Option<f64>,
    pub total_change: Option<f64>,
    pub min_weight: Option<f64>,
    pub max_weight: Option<f64>,
    pub average_weight: Option<f64>,
    pub goal_weight: Option<f64>,
    pub remaining_to_goal: Option<f64>,
    pub goal_progress_pct: Option<f64>,
    pub periods: Vec<PeriodSummary>,
    pub forecast: Option<ForecastResult>,
    pub distribution: Distribution,
    pub bmi: Option<f64>,
    pub bmi_category: Option<BmiCategory>,
}
