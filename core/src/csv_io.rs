use csv::{ReaderBuilder, StringRecord, Trim, Writer};
use log::debug;

use crate::error::StatsError;
use crate::metrics::{csv_exports_total, csv_imports_total, metrics};
use crate::models::{RawDate, RawSample, RawWeight, Sample, SampleSeries, SlashDateOrder};
use crate::normalize::{normalize_with, parse_date, parse_weight, strip_suffix_ci};

pub const CSV_HEADER: [&str; 2] = ["Date", "Weight (kg)"];

const KG_PER_LB: f64 = 0.45359237;

/// Resultat av en tolerant CSV-import.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CsvImport {
    pub samples: SampleSeries,
    pub skipped_count: usize,
    pub ambiguous_count: usize,
}

/// Writes `Date,Weight (kg)` rows oldest-first with ISO dates.
pub fn to_csv(samples: &[Sample]) -> Result<String, StatsError> {
    let series = SampleSeries::from_unsorted(samples);
    let mut wtr = Writer::from_writer(Vec::new());
    wtr.write_record(CSV_HEADER)?;
    for s in series.ascending() {
        wtr.write_record([s.date.format("%Y-%m-%d").to_string(), s.weight.to_string()])?;
    }
    let bytes = wtr.into_inner().map_err(|e| StatsError::Io(e.into_error()))?;
    csv_exports_total(metrics()).inc();
    String::from_utf8(bytes).map_err(|e| StatsError::InvalidArgument(e.to_string()))
}

pub fn from_csv(text: &str) -> CsvImport {
    from_csv_with(text, SlashDateOrder::default())
}

/// Leser CSV-tekst. Rader som ikke gir en måling hoppes over og telles.
/// Feiler aldri som helhet.
pub fn from_csv_with(text: &str, order: SlashDateOrder) -> CsvImport {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut layout = Columns::default();
    let mut rows = Vec::new();
    let mut unreadable = 0usize;

    for (i, record) in reader.records().enumerate() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                debug!("csv record {i}: {e}, skipped");
                unreadable += 1;
                continue;
            }
        };
        // første rad er header kun hvis ingen celle kan leses som dato eller vekt
        if i == 0 && !looks_like_data(&record, order) {
            match Columns::detect(&record) {
                Some(detected) => layout = detected,
                None => debug!("csv first row {:?} treated as unlabeled header", record),
            }
            continue;
        }
        rows.push(layout.raw_sample(&record));
    }

    let normalized = normalize_with(rows, order);
    csv_imports_total(metrics()).inc();

    CsvImport {
        samples: normalized.series,
        skipped_count: normalized.skipped_count + unreadable,
        ambiguous_count: normalized.ambiguous_count,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WeightUnit {
    Kg,
    Lbs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    date: usize,
    weight: usize,
    note: Option<usize>,
    unit: WeightUnit,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            date: 0,
            weight: 1,
            note: None,
            unit: WeightUnit::Kg,
        }
    }
}

impl Columns {
    /// Header-skann uten hensyn til store/små bokstaver. `None` hvis ingen celle navngir en kolonne.
    fn detect(header: &StringRecord) -> Option<Self> {
        let mut date = None;
        let mut weight = None;
        let mut note = None;
        let mut unit = WeightUnit::Kg;

        for (i, cell) in header.iter().enumerate() {
            let c = cell.to_ascii_lowercase();
            if date.is_none() && (c.contains("date") || c.contains("day")) {
                date = Some(i);
            } else if weight.is_none()
                && (c.contains("weight") || c.contains("kg") || c.contains("lbs"))
            {
                weight = Some(i);
                if c.contains("lbs") && !c.contains("kg") {
                    unit = WeightUnit::Lbs;
                }
            } else if note.is_none() && c.contains("note") {
                note = Some(i);
            }
        }

        if date.is_none() && weight.is_none() {
            return None;
        }
        let date = date.unwrap_or(if weight == Some(0) { 1 } else { 0 });
        let weight = weight.unwrap_or(if date == 1 { 0 } else { 1 });
        Some(Self { date, weight, note, unit })
    }

    fn raw_sample(&self, record: &StringRecord) -> RawSample {
        let cell = |i: usize| record.get(i).unwrap_or("").to_string();
        let weight_text = cell(self.weight);
        let weight = match self.unit {
            WeightUnit::Kg => RawWeight::Text(weight_text),
            WeightUnit::Lbs => match parse_pounds(&weight_text) {
                Some(lbs) => RawWeight::Number(lbs * KG_PER_LB),
                None => RawWeight::Text(weight_text),
            },
        };
        RawSample {
            date: RawDate::Text(cell(self.date)),
            weight,
            note: self.note.and_then(|i| record.get(i)).map(str::to_string),
        }
    }
}

fn looks_like_data(record: &StringRecord, order: SlashDateOrder) -> bool {
    record.iter().any(|cell| {
        parse_date(cell, order).is_some()
            || parse_weight(&RawWeight::Text(cell.to_string())).is_some()
            || parse_pounds(cell).is_some()
    })
}

/// Tall med valgfri `lb`/`lbs` til slutt.
fn parse_pounds(text: &str) -> Option<f64> {
    let t = text.trim();
    let t = strip_suffix_ci(t, "lbs")
        .or_else(|| strip_suffix_ci(t, "lb"))
        .unwrap_or(t)
        .trim_end();
    t.parse::<f64>().ok()
}
