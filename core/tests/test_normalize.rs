use chrono::NaiveDate;
use weightlog_core::{normalize, normalize_with, RawSample, RawWeight, SlashDateOrder};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn raw_rows() -> Vec<RawSample> {
    vec![
        RawSample::text("2024-01-03", "79.4"),
        RawSample::text("not a date", "80"),
        RawSample::text("2024-01-01", "80.1"),
        RawSample::text("2024-01-02", "-1"),
        RawSample::text("2024-01-05T06:45:00Z", "79.0 kg"),
        RawSample::text("2024-01-04", ""),
    ]
}

#[test]
fn drops_bad_rows_and_sorts_newest_first() {
    let out = normalize(raw_rows());
    assert_eq!(out.skipped_count, 3);
    assert_eq!(out.ambiguous_count, 0);

    let dates: Vec<_> = out.series.iter().map(|s| s.date).collect();
    assert_eq!(dates, vec![ymd(2024, 1, 5), ymd(2024, 1, 3), ymd(2024, 1, 1)]);
    assert_eq!(out.series[0].weight, 79.0);
}

#[test]
fn normalizing_twice_is_a_no_op() {
    let once = normalize(raw_rows());
    let twice = normalize(once.series.iter().map(RawSample::from));
    assert_eq!(twice.series, once.series);
    assert_eq!(twice.skipped_count, 0);
}

#[test]
fn same_day_entries_keep_input_order() {
    let rows = vec![
        RawSample::text("2024-02-01", "70"),
        RawSample::text("2024-02-02", "71"),
        RawSample::text("2024-02-01", "72"),
    ];
    let out = normalize(rows);
    // no dedup: both 02-01 rows survive, in input order
    let weights: Vec<_> = out.series.iter().map(|s| s.weight).collect();
    assert_eq!(weights, vec![71.0, 70.0, 72.0]);
}

#[test]
fn ambiguous_slash_dates_are_counted_not_hidden() {
    let rows = vec![
        RawSample::text("03/04/2024", "80"), // Mar 4 or Apr 3
        RawSample::text("13/04/2024", "79"), // only Apr 13
    ];
    let auto = normalize(rows.clone());
    assert_eq!(auto.ambiguous_count, 1);
    assert_eq!(auto.skipped_count, 0);
    assert!(auto.series.iter().any(|s| s.date == ymd(2024, 3, 4)));
    assert!(auto.series.iter().any(|s| s.date == ymd(2024, 4, 13)));

    let day_first = normalize_with(rows.clone(), SlashDateOrder::DayFirst);
    assert_eq!(day_first.ambiguous_count, 0);
    assert!(day_first.series.iter().any(|s| s.date == ymd(2024, 4, 3)));

    let month_first = normalize_with(rows, SlashDateOrder::MonthFirst);
    assert_eq!(month_first.skipped_count, 1);
}

#[test]
fn numeric_weights_and_notes() {
    let mut row = RawSample::text("2024-03-01", "");
    row.weight = RawWeight::Number(81.25);
    row.note = Some("after holiday".into());
    let mut blank_note = RawSample::text("2024-03-02", "81");
    blank_note.note = Some("   ".into());

    let out = normalize(vec![row, blank_note]);
    assert_eq!(out.series.len(), 2);
    assert_eq!(out.series[1].weight, 81.25);
    assert_eq!(out.series[1].note.as_deref(), Some("after holiday"));
    assert_eq!(out.series[0].note, None);
}

#[test]
fn raw_samples_deserialize_from_mixed_json() {
    let json = r#"[
        {"date": "2024-01-01", "weight": 80},
        {"day": "01/15/2024", "weightKg": "79.5", "notes": "gym"}
    ]"#;
    let rows: Vec<RawSample> = serde_json::from_str(json).unwrap();
    let out = normalize(rows);
    assert_eq!(out.skipped_count, 0);
    assert_eq!(out.series[0].date, ymd(2024, 1, 15));
    assert_eq!(out.series[0].weight, 79.5);
    assert_eq!(out.series[0].note.as_deref(), Some("gym"));
}
