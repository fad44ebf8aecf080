use std::ops::Deref;

use chrono::NaiveDate;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Én veiing, normalisert til kalenderdag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub date: NaiveDate,
    pub weight: f64, // kg
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Sample {
    pub fn new(date: NaiveDate, weight: f64) -> Self {
        Self { date, weight, note: None }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Målinger for én bruker, alltid sortert nyeste først.
///
/// Like datoer beholder input-rekkefølgen. Serien dedupliserer aldri; én
/// rad per (bruker, dato) er lagringslagets ansvar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Sample>", into = "Vec<Sample>")]
pub struct SampleSeries(Vec<Sample>);

impl SampleSeries {
    pub fn new(mut samples: Vec<Sample>) -> Self {
        // sort_by er stabil → samme-dag-rader beholder rekkefølgen
        samples.sort_by(|a, b| b.date.cmp(&a.date));
        Self(samples)
    }

    /// Sortert kopi av en vilkårlig slice.
    pub fn from_unsorted(samples: &[Sample]) -> Self {
        Self::new(samples.to_vec())
    }

    pub fn newest(&self) -> Option<&Sample> {
        self.0.first()
    }

    pub fn oldest(&self) -> Option<&Sample> {
        self.0.last()
    }

    /// Eldste først (rekkefølgen for CSV-eksport og grafer).
    pub fn ascending(&self) -> impl Iterator<Item = &Sample> {
        self.0.iter().rev()
    }

    /// Én måling per dag (nyeste først) med snittet av dagens veiinger.
    ///
    /// Vektene summeres i sortert rekkefølge, så resultatet er uavhengig av
    /// input-rekkefølgen for like datoer.
    pub fn daily_means(&self) -> SampleSeries {
        let mut out = Vec::with_capacity(self.0.len());
        let mut rest = self.0.as_slice();
        while let Some(first) = rest.first() {
            let run = rest.iter().take_while(|s| s.date == first.date).count();
            let (day, tail) = rest.split_at(run);
            if run == 1 {
                out.push(first.clone());
            } else {
                let mut ws: Vec<OrderedFloat<f64>> =
                    day.iter().map(|s| OrderedFloat(s.weight)).collect();
                ws.sort();
                let mean = ws.iter().map(|w| w.into_inner()).sum::<f64>() / run as f64;
                out.push(Sample::new(first.date, mean));
            }
            rest = tail;
        }
        SampleSeries(out)
    }

    pub fn into_inner(self) -> Vec<Sample> {
        self.0
    }
}

impl Deref for SampleSeries {
    type Target = [Sample];

    fn deref(&self) -> &[Sample] {
        &self.0
    }
}

impl From<Vec<Sample>> for SampleSeries {
    fn from(samples: Vec<Sample>) -> Self {
        Self::new(samples)
    }
}

impl From<SampleSeries> for Vec<Sample> {
    fn from(series: SampleSeries) -> Self {
        series.0
    }
}

/// Date as supplied by a caller: either already a date or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDate {
    Date(NaiveDate),
    Text(String),
}

/// Weight as supplied by a caller: a number or numeric text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawWeight {
    Number(f64),
    Text(String),
}

/// Uvalidert input-rad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    #[serde(alias = "day")]
    pub date: RawDate,
    #[serde(alias = "weightKg", alias = "weight_kg", alias = "kg")]
    pub weight: RawWeight,
    #[serde(default, alias = "notes")]
    pub note: Option<String>,
}

impl RawSample {
    pub fn text(date: impl Into<String>, weight: impl Into<String>) -> Self {
        Self {
            date: RawDate::Text(date.into()),
            weight: RawWeight::Text(weight.into()),
            note: None,
        }
    }
}

impl From<Sample> for RawSample {
    fn from(s: Sample) -> Self {
        Self {
            date: RawDate::Date(s.date),
            weight: RawWeight::Number(s.weight),
            note: s.note,
        }
    }
}

impl From<&Sample> for RawSample {
    fn from(s: &Sample) -> Self {
        s.clone().into()
    }
}

/// Hvordan `a/b/YYYY`-datoer tolkes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlashDateOrder {
    /// Always M/D/Y.
    MonthFirst,
    /// Always D/M/Y.
    DayFirst,
    /// M/D/Y, falling back to D/M/Y when M/D/Y is not a real date.
    /// Rows valid both ways are reported as ambiguous.
    #[default]
    Auto,
}

/// Per-user settings consumed by the summary and the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    #[serde(alias = "heightCm")]
    pub height_cm: Option<f64>,
    #[serde(alias = "goalWeight")]
    pub goal_weight: Option<f64>,
    #[serde(alias = "startWeight")]
    pub start_weight: Option<f64>,
    #[serde(alias = "dateOrder")]
    pub date_order: SlashDateOrder,
    #[serde(alias = "includeEmptyBins")]
    pub include_empty_bins: bool,
    #[serde(alias = "trendWindowDays")]
    pub trend_window_days: u32,
    #[serde(alias = "periodWindows")]
    pub period_windows: Vec<u32>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            height_cm: None,
            goal_weight: None,
            start_weight: None,
            date_order: SlashDateOrder::Auto,
            include_empty_bins: true,
            trend_window_days: crate::forecast::DEFAULT_TREND_WINDOW_DAYS,
            period_windows: vec![7, 14, 30],
        }
    }
}
