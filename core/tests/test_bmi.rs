use weightlog_core::{bmi, category, BmiClass, Severity};

#[test]
fn healthy_adult() {
    let b = bmi(Some(70.0), Some(175.0));
    assert_eq!(b, Some(22.9));
    let c = category(b).unwrap();
    assert_eq!(c.label, "Healthy");
    assert_eq!(c.class, BmiClass::Healthy);
    assert_eq!(c.severity, Severity::Success);
}

#[test]
fn band_edges() {
    assert_eq!(category(Some(18.4)).unwrap().class, BmiClass::Underweight);
    assert_eq!(category(Some(18.5)).unwrap().class, BmiClass::Healthy);
    assert_eq!(category(Some(24.9)).unwrap().class, BmiClass::Healthy);
    assert_eq!(category(Some(25.0)).unwrap().class, BmiClass::Overweight);
    assert_eq!(category(Some(29.9)).unwrap().class, BmiClass::Overweight);
    let obese = category(Some(30.0)).unwrap();
    assert_eq!(obese.label, "Obese");
    assert_eq!(obese.severity, Severity::Danger);
}

#[test]
fn missing_or_invalid_inputs_give_none() {
    assert_eq!(bmi(None, Some(175.0)), None);
    assert_eq!(bmi(Some(70.0), None), None);
    assert_eq!(bmi(Some(70.0), Some(0.0)), None);
    assert_eq!(bmi(Some(-70.0), Some(175.0)), None);
    assert_eq!(bmi(Some(f64::NAN), Some(175.0)), None);
    assert!(category(None).is_none());
    assert!(category(Some(0.0)).is_none());
}
