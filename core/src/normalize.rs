use chrono::NaiveDate;
use log::{debug, warn};

use crate::metrics::{ambiguous_dates_total, metrics, rows_accepted_total, rows_skipped_total};
use crate::models::{RawDate, RawSample, RawWeight, Sample, SampleSeries, SlashDateOrder};

/// Resultat av én normaliseringsrunde.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Normalized {
    pub series: SampleSeries,
    pub skipped_count: usize,
    /// Godtatte rader der skråstrek-datoen også var gyldig motsatt vei.
    pub ambiguous_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDate {
    pub date: NaiveDate,
    pub ambiguous: bool,
}

impl ParsedDate {
    fn exact(date: NaiveDate) -> Self {
        Self { date, ambiguous: false }
    }
}

pub fn normalize<I>(raw: I) -> Normalized
where
    I: IntoIterator<Item = RawSample>,
{
    normalize_with(raw, SlashDateOrder::default())
}

/// Validerer rader til en serie (nyeste først). Ugyldige rader hoppes over og telles.
pub fn normalize_with<I>(raw: I, order: SlashDateOrder) -> Normalized
where
    I: IntoIterator<Item = RawSample>,
{
    let mut samples = Vec::new();
    let mut skipped_count = 0usize;
    let mut ambiguous_count = 0usize;

    for (row, r) in raw.into_iter().enumerate() {
        let parsed = match &r.date {
            RawDate::Date(d) => Some(ParsedDate::exact(*d)),
            RawDate::Text(t) => parse_date(t, order),
        };
        let Some(parsed) = parsed else {
            debug!("row {row}: unparseable date {:?}, skipped", r.date);
            skipped_count += 1;
            continue;
        };
        let Some(weight) = parse_weight(&r.weight) else {
            debug!("row {row}: invalid weight {:?}, skipped", r.weight);
            skipped_count += 1;
            continue;
        };
        if parsed.ambiguous {
            warn!(
                "row {row}: slash date {:?} is valid as both M/D/Y and D/M/Y, read as {}",
                r.date, parsed.date
            );
            ambiguous_count += 1;
        }
        samples.push(Sample {
            date: parsed.date,
            weight,
            note: r.note.filter(|n| !n.trim().is_empty()),
        });
    }

    let m = metrics();
    rows_accepted_total(m).inc_by(samples.len() as u64);
    rows_skipped_total(m).inc_by(skipped_count as u64);
    ambiguous_dates_total(m).inc_by(ambiguous_count as u64);

    Normalized {
        series: SampleSeries::new(samples),
        skipped_count,
        ambiguous_count,
    }
}

/// Endelig, strengt positiv vekt i kg. Tekst kan ha `kg` til slutt.
pub fn parse_weight(raw: &RawWeight) -> Option<f64> {
    let w = match raw {
        RawWeight::Number(n) => *n,
        RawWeight::Text(t) => {
            let t = t.trim();
            let t = strip_suffix_ci(t, "kg").unwrap_or(t).trim_end();
            t.parse::<f64>().ok()?
        }
    };
    (w.is_finite() && w > 0.0).then_some(w)
}

pub(crate) fn strip_suffix_ci<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
    let split = s.len().checked_sub(suffix.len())?;
    let tail = s.get(split..)?;
    tail.eq_ignore_ascii_case(suffix).then(|| &s[..split])
}

/// Prøver ISO-dato først, så tidsstempel, så skråstrek- og punktum-former.
pub fn parse_date(text: &str, order: SlashDateOrder) -> Option<ParsedDate> {
    let t = text.trim();
    if t.is_empty() {
        return None;
    }

    if year_first(t, '-') {
        if let Ok(d) = NaiveDate::parse_from_str(t, "%Y-%m-%d") {
            return Some(ParsedDate::exact(d));
        }
        // 2024-01-05T07:30:00Z / 2024-01-05 07:30 → klokkeslett kastes
        if let (Some(head), Some(sep)) = (t.get(..10), t.get(10..11)) {
            if sep == "T" || sep == " " {
                if let Ok(d) = NaiveDate::parse_from_str(head, "%Y-%m-%d") {
                    return Some(ParsedDate::exact(d));
                }
            }
        }
        return None;
    }

    if year_first(t, '/') {
        return NaiveDate::parse_from_str(t, "%Y/%m/%d").ok().map(ParsedDate::exact);
    }

    if let Some((a, b, y)) = split_three(t, '/') {
        return resolve_slash(a, b, y, order);
    }

    if let Some((d, m, y)) = split_three(t, '.') {
        return NaiveDate::from_ymd_opt(y, m, d).map(ParsedDate::exact);
    }

    None
}

/// `YYYY<sep>...`
fn year_first(t: &str, sep: char) -> bool {
    let b = t.as_bytes();
    b.len() > 5 && b[..4].iter().all(u8::is_ascii_digit) && b[4] == sep as u8
}

/// `a<sep>b<sep>YYYY` med tall og firesifret år.
fn split_three(t: &str, sep: char) -> Option<(u32, u32, i32)> {
    let mut parts = t.split(sep);
    let (a, b, y) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() || y.len() != 4 {
        return None;
    }
    let digits = |s: &str| !s.is_empty() && s.len() <= 2 && s.bytes().all(|c| c.is_ascii_digit());
    if !digits(a) || !digits(b) || !y.bytes().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some((a.parse().ok()?, b.parse().ok()?, y.parse().ok()?))
}

fn resolve_slash(a: u32, b: u32, year: i32, order: SlashDateOrder) -> Option<ParsedDate> {
    let mdy = NaiveDate::from_ymd_opt(year, a, b);
    let dmy = NaiveDate::from_ymd_opt(year, b, a);
    match order {
        SlashDateOrder::MonthFirst => mdy.map(ParsedDate::exact),
        SlashDateOrder::DayFirst => dmy.map(ParsedDate::exact),
        SlashDateOrder::Auto => match (mdy, dmy) {
            (Some(m), Some(d)) => Some(ParsedDate { date: m, ambiguous: m != d }),
            (Some(m), None) => Some(ParsedDate::exact(m)),
            (None, Some(d)) => Some(ParsedDate::exact(d)),
            (None, None) => None,
        },
    }
}
