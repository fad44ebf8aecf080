use chrono::Duration;

use crate::error::StatsError;
use crate::models::{Sample, SampleSeries};
use crate::period::period_average;
use crate::types::{ForecastReason, ForecastResult, PeriodAverage};

/// Vinduet som gir raten for prognosen.
pub const DEFAULT_TREND_WINDOW_DAYS: u32 = 7;

/// Projects the 7-day trend forward to `goal_weight`.
pub fn forecast(samples: &[Sample], goal_weight: f64) -> Result<ForecastResult, StatsError> {
    let trend = period_average(samples, DEFAULT_TREND_WINDOW_DAYS);
    forecast_from_trend(samples, goal_weight, &trend)
}

/// Lineær fremskriving av `trend.daily_rate`.
///
/// Ingen glatting eller fjerning av uteliggere: én støyete veiing i
/// trendvinduet flytter raten og måldatoen direkte.
pub fn forecast_from_trend(
    samples: &[Sample],
    goal_weight: f64,
    trend: &PeriodAverage,
) -> Result<ForecastResult, StatsError> {
    if !goal_weight.is_finite() || goal_weight <= 0.0 {
        return Err(StatsError::InvalidArgument(format!(
            "goal weight must be a positive number, got {goal_weight}"
        )));
    }

    let series = SampleSeries::from_unsorted(samples).daily_means();
    let mut out = ForecastResult {
        goal_weight,
        current_weight: series.newest().map(|s| s.weight),
        ..Default::default()
    };

    let (Some(current), Some(daily_rate), true) =
        (series.newest(), trend.daily_rate, trend.has_data)
    else {
        out.reason = Some(ForecastReason::InsufficientData);
        return Ok(out);
    };

    out.has_data = true;
    out.daily_rate = Some(daily_rate);
    out.weekly_rate = Some(daily_rate.abs() * 7.0);

    let difference = goal_weight - current.weight;
    if difference == 0.0 {
        out.is_possible = true;
        out.days_to_goal = Some(0);
        out.target_date = Some(current.date);
        return Ok(out);
    }
    if daily_rate == 0.0 {
        out.reason = Some(ForecastReason::NoTrend);
        return Ok(out);
    }
    if difference.signum() != daily_rate.signum() {
        out.reason = Some(if daily_rate > 0.0 {
            ForecastReason::GainingWhileGoalIsLoss
        } else {
            ForecastReason::LosingWhileGoalIsGain
        });
        return Ok(out);
    }

    let days = (difference.abs() / daily_rate.abs()).round() as i64;
    out.is_possible = true;
    out.days_to_goal = Some(days);
    out.target_date = Duration::try_days(days).and_then(|d| current.date.checked_add_signed(d));
    Ok(out)
}
