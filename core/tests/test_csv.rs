use chrono::NaiveDate;
use weightlog_core::{from_csv, from_csv_with, normalize, to_csv, RawSample, Sample, SlashDateOrder};

fn s(y: i32, m: u32, d: u32, w: f64) -> Sample {
    Sample::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), w)
}

#[test]
fn bad_row_is_skipped_and_counted() {
    let out = from_csv("Date,Weight\n2024-01-01,80\nBADROW\n2024-01-02,79.5\n");
    assert_eq!(out.samples.len(), 2);
    assert_eq!(out.skipped_count, 1);
    assert_eq!(out.samples[0], s(2024, 1, 2, 79.5));
    assert_eq!(out.samples[1], s(2024, 1, 1, 80.0));
}

#[test]
fn large_file_with_a_few_bad_rows() {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let mut text = String::from("date,weight\n");
    for i in 0..1000 {
        let line = match i {
            10 => "not-a-date,80".to_string(),
            500 => "2021-05-15,abc".to_string(),
            999 => "2022-09-26,-5".to_string(),
            _ => format!(
                "{},{:.1}",
                start + chrono::Duration::days(i),
                80.0 + (i % 10) as f64 * 0.1
            ),
        };
        text.push_str(&line);
        text.push('\n');
    }
    let out = from_csv(&text);
    assert_eq!(out.samples.len(), 997);
    assert_eq!(out.skipped_count, 3);
}

#[test]
fn export_is_ascending_with_fixed_header() {
    let csv = to_csv(&[s(2024, 1, 2, 79.5), s(2024, 1, 1, 80.0)]).unwrap();
    assert_eq!(csv, "Date,Weight (kg)\n2024-01-01,80\n2024-01-02,79.5\n");
}

#[test]
fn round_trip_keeps_dates_and_weights() {
    let rows = vec![
        RawSample::text("2024-03-10", "81.3"),
        RawSample::text("2024-01-01", "82"),
        RawSample::text("2024-02-14T08:00:00Z", "81.75"),
        RawSample::text("2024-04-01", "80.05"),
    ];
    let series = normalize(rows).series;
    let back = from_csv(&to_csv(&series).unwrap());
    assert_eq!(back.skipped_count, 0);
    assert_eq!(back.samples.len(), series.len());
    for (a, b) in back.samples.iter().zip(series.iter()) {
        assert_eq!(a.date, b.date);
        assert_eq!(a.weight, b.weight);
    }
}

#[test]
fn headerless_file_uses_first_two_columns() {
    let out = from_csv("2024-01-01,80\n2024-01-02,79\n");
    assert_eq!(out.samples.len(), 2);
    assert_eq!(out.skipped_count, 0);

    // unlabeled header row is neither data nor a skip
    let out = from_csv("when,how much\n2024-01-01,80\n");
    assert_eq!(out.samples.len(), 1);
    assert_eq!(out.skipped_count, 0);
}

#[test]
fn header_scan_finds_columns_anywhere() {
    let text = "Note,Body KG,Day\nmorning,80.2,2024-05-01\n,79.9,2024-05-02\n";
    let out = from_csv(text);
    assert_eq!(out.samples.len(), 2);
    assert_eq!(out.samples[1].note.as_deref(), Some("morning"));
    assert_eq!(out.samples[0].note, None);
    assert_eq!(out.samples[0].weight, 79.9);
}

#[test]
fn pound_columns_are_converted() {
    let out = from_csv("Date,Weight (lbs)\n2024-01-01,176.37\n");
    assert_eq!(out.samples.len(), 1);
    assert!((out.samples[0].weight - 80.0).abs() < 0.01);
}

#[test]
fn slash_dates_follow_configured_order() {
    let text = "Date,Weight\n04/03/2024,80\n";
    let auto = from_csv(text);
    assert_eq!(auto.ambiguous_count, 1);
    assert_eq!(auto.samples[0].date, NaiveDate::from_ymd_opt(2024, 4, 3).unwrap());

    let dmy = from_csv_with(text, SlashDateOrder::DayFirst);
    assert_eq!(dmy.ambiguous_count, 0);
    assert_eq!(dmy.samples[0].date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
}

#[test]
fn empty_text_is_not_an_error() {
    let out = from_csv("");
    assert!(out.samples.is_empty());
    assert_eq!(out.skipped_count, 0);
    assert_eq!(to_csv(&[]).unwrap(), "Date,Weight (kg)\n");
}

#[test]
fn headerless_file_with_kg_suffix_keeps_first_row() {
    let out = from_csv("2024-01-01,80 kg\n2024-01-02,79.5 kg\n");
    assert_eq!(out.samples.len(), 2);
    assert_eq!(out.skipped_count, 0);
    assert_eq!(out.samples[1], s(2024, 1, 1, 80.0));

    // a broken first data row is counted, not mistaken for a header
    let out = from_csv("yesterday,80 kg\n2024-01-02,79.5 kg\n");
    assert_eq!(out.samples.len(), 1);
    assert_eq!(out.skipped_count, 1);
}

#[test]
fn pound_cells_with_unit_suffix_are_converted() {
    let out = from_csv("Date,Weight (lbs)\n2024-01-01,180 lbs\n2024-01-02,179.5lb\n");
    assert_eq!(out.samples.len(), 2);
    assert_eq!(out.skipped_count, 0);
    assert!((out.samples[1].weight - 81.647).abs() < 0.01);
}
