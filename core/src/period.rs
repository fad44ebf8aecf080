use chrono::{Duration, NaiveDate};

use crate::models::{Sample, SampleSeries};
use crate::types::PeriodAverage;

/// Endring over de `window_days` dagene før nyeste måling.
///
/// Vinduet forankres i nyeste måling, ikke i dag, så et opphold i loggingen
/// krymper det ikke. Færre enn to målinger i vinduet gir `has_data = false`.
/// Flere målinger samme dag teller som dagens snitt.
pub fn period_average(samples: &[Sample], window_days: u32) -> PeriodAverage {
    let series = SampleSeries::from_unsorted(samples);
    let Some(newest) = series.newest() else {
        return PeriodAverage::no_data();
    };
    let window_start = Duration::try_days(i64::from(window_days))
        .and_then(|d| newest.date.checked_sub_signed(d))
        .unwrap_or(NaiveDate::MIN);

    // nyeste først → målingene i vinduet er et prefiks
    let in_window = series.iter().take_while(|s| s.date >= window_start).count();
    if in_window < 2 {
        return PeriodAverage::no_data();
    }

    // endepunktene er dagssnitt, så duplikate datoer ikke avgjør retningen
    let days = series.daily_means();
    let in_window_days = days.iter().take_while(|s| s.date >= window_start).count();
    let (end, start) = (&days[0], &days[in_window_days - 1]);

    let total_change = end.weight - start.weight;
    let span = (end.date - start.date).num_days().max(1);

    PeriodAverage {
        has_data: true,
        start_weight: Some(start.weight),
        end_weight: Some(end.weight),
        total_change: Some(total_change),
        daily_rate: Some(total_change / span as f64),
        window_start: Some(start.date),
        window_end: Some(end.date),
        sample_count: in_window,
    }
}
