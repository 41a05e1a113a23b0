/// Converts a recent-form ratio (points taken / points available, 0.0–1.0)
/// into a letter grade.
///
/// | Range       | Grade |
/// |-------------|-------|
/// | >= 0.95     | A+    |
/// | >= 0.80     | A     |
/// | >= 0.60     | B     |
/// | >= 0.40     | C     |
/// | >= 0.20     | D     |
/// | < 0.20      | F     |
pub fn form_grade(p: f64) -> String {
    match p {
        p if p >= 0.95 => "A+".into(),
        p if p >= 0.80 => "A".into(),
        p if p >= 0.60 => "B".into(),
        p if p >= 0.40 => "C".into(),
        p if p >= 0.20 => "D".into(),
        _ => "F".into(),
    }
}
