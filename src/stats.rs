/// Rounds to the nearest integer with halves going up (`-2.5` becomes `-2`),
/// matching the dashboard's rounding of negative trends and ROI.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[allow(clippy::cast_possible_truncation)]
pub fn round_to_int(value: f64) -> i64 {
    round_half_up(value) as i64
}

/// Rounds the exact binary value to one decimal with halves going away from
/// zero, like JavaScript's `toFixed(1)`. `39.0 / 20.0` is stored just below
/// 1.95 and becomes 1.9.
pub fn round_to_tenth(value: f64) -> f64 {
    // Odd multiples of 0.25 are the only exact ties; formatting would send
    // them to the even digit.
    if (value * 4.0).fract() == 0.0 && (value * 2.0).fract() != 0.0 {
        return (value.abs() * 10.0 + 0.5).floor().copysign(value) / 10.0;
    }
    format!("{value:.1}").parse().unwrap_or(value)
}

/// Division that yields 0 for an empty or zero denominator.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

#[allow(clippy::cast_precision_loss)]
pub fn percentage(part: usize, total: usize) -> f64 {
    ratio(part as f64, total as f64) * 100.0
}

#[allow(clippy::cast_precision_loss)]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
#[allow(clippy::cast_precision_loss)]
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up_on_negative_halves() {
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.6), -3.0);
    }

    #[test]
    fn test_round_to_tenth() {
        assert_eq!(round_to_tenth(8.0 / 3.0), 2.7);
        assert_eq!(round_to_tenth(0.0), 0.0);
        assert_eq!(round_to_tenth(1.5), 1.5);
    }

    #[test]
    fn test_round_to_tenth_uses_exact_binary_value() {
        assert_eq!(round_to_tenth(39.0 / 20.0), 1.9);
        assert_eq!(round_to_tenth(7.0 / 20.0), 0.3);
        assert_eq!(round_to_tenth(41.0 / 20.0), 2.0);
    }

    #[test]
    fn test_round_to_tenth_exact_ties_go_up() {
        assert_eq!(round_to_tenth(1.0 / 4.0), 0.3);
        assert_eq!(round_to_tenth(0.75), 0.8);
        assert_eq!(round_to_tenth(2.25), 2.3);
        assert_eq!(round_to_tenth(-0.25), -0.3);
    }

    #[test]
    fn test_ratio_guards_zero_denominator() {
        assert_eq!(ratio(5.0, 0.0), 0.0);
        assert_eq!(percentage(3, 0), 0.0);
        assert_eq!(percentage(1, 4), 25.0);
    }

    #[test]
    fn test_std_dev_is_population() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&values), 5.0);
        assert_eq!(std_dev(&values), 2.0);
        assert_eq!(std_dev(&[]), 0.0);
    }
}
