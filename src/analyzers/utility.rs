/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Mean of `f` over `items`. Returns 0.0 when there are none.
pub fn mean_by<T>(items: &[T], f: impl Fn(&T) -> f64) -> f64 {
    let values: Vec<f64> = items.iter().map(f).collect();
    mean(&values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_mean_by_projects_field() {
        let pairs = [(1, 2.0), (2, 4.0)];
        assert_eq!(mean_by(&pairs, |p| p.1), 3.0);
        assert_eq!(mean_by(&pairs[..0], |p| p.1), 0.0);
    }
}
