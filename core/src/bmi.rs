use crate::types::{BmiCategory, BmiClass, Severity};

/// BMI = kg / m², rounded to one decimal. `None` when either input is
/// missing, non-finite or not positive.
pub fn bmi(weight_kg: Option<f64>, height_cm: Option<f64>) -> Option<f64> {
    match (weight_kg, height_cm) {
        (Some(w), Some(h)) if w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0 => {
            let m = h / 100.0;
            let v = (w / (m * m) * 10.0).round() / 10.0;
            v.is_finite().then_some(v)
        }
        _ => None,
    }
}

/// WHO adult bands: <18.5, [18.5, 25), [25, 30), >=30.
pub fn category(bmi: Option<f64>) -> Option<BmiCategory> {
    let b = bmi.filter(|b| b.is_finite() && *b > 0.0)?;
    let (class, label, severity) = if b < 18.5 {
        (BmiClass::Underweight, "Underweight", Severity::Warning)
    } else if b < 25.0 {
        (BmiClass::Healthy, "Healthy", Severity::Success)
    } else if b < 30.0 {
        (BmiClass::Overweight, "Overweight", Severity::Warning)
    } else {
        (BmiClass::Obese, "Obese", Severity::Danger)
    };
    Some(BmiCategory {
        class,
        label: label.to_string(),
        severity,
    })
}
