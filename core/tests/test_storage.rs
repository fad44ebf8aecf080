use chrono::NaiveDate;
use std::fs;
use weightlog_core::{
    export_csv_file, import_csv_file, load_profile, save_profile, Profile, Sample, SlashDateOrder,
};

#[test]
fn test_save_and_load_profile() {
    let path = "tests/tmp_profile_roundtrip.json";

    let profile = Profile {
        height_cm: Some(172.0),
        goal_weight: Some(70.0),
        start_weight: Some(82.5),
        date_order: SlashDateOrder::DayFirst,
        include_empty_bins: false,
        trend_window_days: 14,
        period_windows: vec![7, 30, 90],
    };

    save_profile(&profile, path).expect("save_profile failed");
    let loaded = load_profile(path).expect("load_profile failed");
    assert_eq!(loaded, profile);

    let _ = fs::remove_file(path);
}

#[test]
fn missing_profile_gives_defaults() {
    let loaded = load_profile("tests/does_not_exist_profile.json").unwrap();
    assert_eq!(loaded, Profile::default());
    assert_eq!(loaded.trend_window_days, 7);
    assert_eq!(loaded.period_windows, vec![7, 14, 30]);
    assert!(loaded.include_empty_bins);
}

#[test]
fn partial_profile_fills_defaults() {
    let path = "tests/tmp_profile_partial.json";
    fs::write(path, r#"{"heightCm": 180, "date_order": "month_first"}"#).unwrap();

    let loaded = load_profile(path).unwrap();
    assert_eq!(loaded.height_cm, Some(180.0));
    assert_eq!(loaded.date_order, SlashDateOrder::MonthFirst);
    assert_eq!(loaded.goal_weight, None);
    assert_eq!(loaded.trend_window_days, 7);

    let _ = fs::remove_file(path);
}

#[test]
fn csv_file_round_trip() {
    let path = "tests/tmp_export.csv";
    let day = |d| NaiveDate::from_ymd_opt(2024, 6, d).unwrap();
    let samples = vec![Sample::new(day(2), 71.4), Sample::new(day(1), 71.9)];

    export_csv_file(path, &samples).unwrap();
    let text = fs::read_to_string(path).unwrap();
    assert!(text.starts_with("Date,Weight (kg)\n2024-06-01,71.9\n"));

    let import = import_csv_file(path, SlashDateOrder::Auto).unwrap();
    assert_eq!(import.samples.len(), 2);
    assert_eq!(import.skipped_count, 0);
    assert_eq!(import.samples[0], samples[0]);

    let _ = fs::remove_file(path);
}

#[test]
fn missing_csv_file_is_an_io_error() {
    let err = import_csv_file("tests/no_such_file.csv", SlashDateOrder::Auto).unwrap_err();
    assert!(matches!(err, weightlog_core::StatsError::Io(_)));
}
