use std::fmt::{self, Write};

use crate::types::{ForecastResult, PeriodAverage, Summary};

fn kg(v: Option<f64>) -> String {
    v.map(|x| format!("{x:.1} kg")).unwrap_or_else(|| "-".to_string())
}

fn signed_kg(v: f64) -> String {
    format!("{v:+.2} kg")
}

/// Plain-text report, one section per dashboard card.
pub fn render_report(summary: &Summary) -> String {
    let mut out = String::new();
    // skriving til String kan ikke feile
    let _ = write_report(&mut out, summary);
    out
}

pub fn print_report(summary: &Summary) {
    print!("{}", render_report(summary));
}

fn write_report(out: &mut String, s: &Summary) -> fmt::Result {
    writeln!(out, "--- Weight Report ---")?;
    if s.entry_count == 0 {
        writeln!(out, "No entries yet.")?;
        return Ok(());
    }
    if let (Some(first), Some(latest)) = (s.first_date, s.latest_date) {
        writeln!(out, "Entries: {} ({} .. {})", s.entry_count, first, latest)?;
    }
    writeln!(out, "Current: {}", kg(s.current_weight))?;
    writeln!(out, "Start: {}", kg(s.start_weight))?;
    if let Some(change) = s.total_change {
        writeln!(out, "Total change: {}", signed_kg(change))?;
    }
    writeln!(
        out,
        "Range: {} .. {} (avg {})",
        kg(s.min_weight),
        kg(s.max_weight),
        kg(s.average_weight)
    )?;

    if let Some(goal) = s.goal_weight {
        write!(out, "Goal: {goal:.1} kg")?;
        if let Some(pct) = s.goal_progress_pct {
            write!(out, " ({pct:.0}% there)")?;
        }
        writeln!(out)?;
    }

    for p in &s.periods {
        write_period(out, p.window_days, &p.average)?;
    }

    if let Some(f) = &s.forecast {
        write_forecast(out, f)?;
    }

    if let (Some(b), Some(cat)) = (s.bmi, &s.bmi_category) {
        writeln!(out, "BMI: {b:.1} ({})", cat.label)?;
    }

    if !s.distribution.is_empty() {
        writeln!(out, "Distribution:")?;
        for (range, count) in s.distribution.ranges.iter().zip(&s.distribution.counts) {
            writeln!(out, "  {range:>11} | {}", "#".repeat(*count))?;
        }
    }
    Ok(())
}

fn write_period(out: &mut String, window_days: u32, p: &PeriodAverage) -> fmt::Result {
    match (p.has_data, p.total_change, p.daily_rate) {
        (true, Some(change), Some(rate)) => writeln!(
            out,
            "{window_days:>3}-day: {} ({:+.3} kg/day)",
            signed_kg(change),
            rate
        ),
        _ => writeln!(out, "{window_days:>3}-day: need more data"),
    }
}

fn write_forecast(out: &mut String, f: &ForecastResult) -> fmt::Result {
    match (f.is_possible, f.days_to_goal, f.target_date) {
        (true, Some(days), Some(date)) => {
            writeln!(out, "Forecast: goal in {days} days, around {date}")?;
            if let Some(w) = f.weekly_rate {
                writeln!(out, "  at {w:.2} kg/week")?;
            }
            Ok(())
        }
        _ => {
            let reason = f.reason.map(|r| r.to_string()).unwrap_or_default();
            writeln!(out, "Forecast: not possible ({reason})")
        }
    }
}
