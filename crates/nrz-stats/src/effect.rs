/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divides by `n`); `0.0` below two values.
pub fn population_sd(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let centre = values.iter().sum::<f64>() / values.len() as f64;
    let variance = values
        .iter()
        .map(|value| (value - centre) * (value - centre))
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}

/// Cohen's d of `a` against `b` with pooled population SD
/// `sqrt((sd_a^2 + sd_b^2) / 2)`.
///
/// Zero when either side has fewer than two values or the pooled SD is zero.
pub fn cohens_d(a: &[f64], b: &[f64]) -> f64 {
    if a.len() < 2 || b.len() < 2 {
        return 0.0;
    }
    let (Some(mean_a), Some(mean_b)) = (mean(a), mean(b)) else {
        return 0.0;
    };
    let sd_a = population_sd(a);
    let sd_b = population_sd(b);
    let pooled = ((sd_a * sd_a + sd_b * sd_b) / 2.0).sqrt();
    if pooled == 0.0 {
        return 0.0;
    }
    (mean_a - mean_b) / pooled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn population_sd_divides_by_n() {
        let sd = population_sd(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((sd - 2.0).abs() < 1e-12);
    }

    #[test]
    fn cohens_d_is_antisymmetric() {
        let a = [10.0, 12.0, 14.0];
        let b = [11.0, 13.0, 16.0];
        assert!((cohens_d(&a, &b) + cohens_d(&b, &a)).abs() < 1e-12);
        assert!(cohens_d(&a, &b) < 0.0);
    }

    #[test]
    fn degenerate_inputs_give_zero() {
        assert_eq!(cohens_d(&[1.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cohens_d(&[3.0, 3.0], &[5.0, 5.0]), 0.0);
        assert_eq!(mean(&[]), None);
        assert_eq!(population_sd(&[4.0]), 0.0);
    }
}
