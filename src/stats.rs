//! Summary statistics over a column of `f64` values.
use anyhow::{anyhow, Result};

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut v = values.to_vec();
    v.sort_by(|a, b| a.total_cmp(b));
    v
}

fn non_empty(values: &[f64], what: &str) -> Result<()> {
    if values.is_empty() {
        Err(anyhow!("{} of an empty column", what))
    } else {
        Ok(())
    }
}

pub fn mean(values: &[f64]) -> Result<f64> {
    non_empty(values, "mean")?;
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Middle value; the average of the two middle values when `n` is even.
pub fn median(values: &[f64]) -> Result<f64> {
    non_empty(values, "median")?;
    let v = sorted(values);
    let mid = v.len() / 2;
    if v.len() % 2 == 0 {
        Ok((v[mid - 1] + v[mid]) / 2.0)
    } else {
        Ok(v[mid])
    }
}

/// Most frequent value and how often it occurs.
///
/// Ties resolve to the smallest value. An empty column yields `(NaN, 0)`.
pub fn mode(values: &[f64]) -> (f64, usize) {
    let v = sorted(values);
    let mut best = (f64::NAN, 0usize);
    let mut i = 0;
    while i < v.len() {
        let run = v[i..].iter().take_while(|&&x| x == v[i]).count().max(1);
        if run > best.1 {
            best = (v[i], run);
        }
        i += run;
    }
    best
}

/// Empirical quantile: the first sorted value whose cumulative count reaches `p * n`.
pub fn quantile(p: f64, values: &[f64]) -> Result<f64> {
    non_empty(values, "quantile")?;
    if !(0.0..=1.0).contains(&p) {
        return Err(anyhow!("quantile {} out of range [0, 1]", p));
    }
    let v = sorted(values);
    let target = p * v.len() as f64;
    let idx = v
        .iter()
        .enumerate()
        .position(|(i, _)| (i + 1) as f64 >= target)
        .unwrap_or(v.len() - 1);
    Ok(v[idx])
}

/// Sample standard deviation (divides by `n - 1`). NaN for fewer than two values.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let n = values.len() as f64;
    let m = values.iter().sum::<f64>() / n;
    let ss: f64 = values.iter().map(|&x| (x - m).powi(2)).sum();
    (ss / (n - 1.0)).sqrt()
}

pub fn min(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::collection::vec;
    use proptest::prelude::*;

    #[test]
    fn basic_statistics() {
        let v = [3.0, 1.0, 2.0, 2.0, 5.0, 7.0];
        assert_eq!(mean(&v).unwrap(), 20.0 / 6.0);
        assert_eq!(median(&v).unwrap(), 2.5);
        assert_eq!(mode(&v), (2.0, 2));
        assert_eq!(min(&v), 1.0);
        assert_eq!(max(&v), 7.0);
    }

    #[test]
    fn mode_ties_pick_smallest() {
        assert_eq!(mode(&[4.0, 4.0, 1.0, 1.0, 9.0]), (1.0, 2));
        let (v, c) = mode(&[]);
        assert!(v.is_nan());
        assert_eq!(c, 0);
    }

    #[test]
    fn empirical_quantiles() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(0.25, &v).unwrap(), 1.0);
        assert_eq!(quantile(0.5, &v).unwrap(), 2.0);
        assert_eq!(quantile(0.75, &v).unwrap(), 3.0);
        assert_eq!(quantile(1.0, &v).unwrap(), 4.0);
        assert_eq!(quantile(0.0, &v).unwrap(), 1.0);
        let odd = [5.0, 1.0, 3.0, 2.0, 4.0];
        assert_eq!(quantile(0.5, &odd).unwrap(), 3.0);
    }

    #[test]
    fn errors_on_bad_input() {
        assert!(mean(&[]).is_err());
        assert!(median(&[]).is_err());
        assert!(quantile(0.5, &[]).is_err());
        assert!(quantile(1.5, &[1.0]).is_err());
    }

    #[test]
    fn std_dev_is_sample() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((std_dev(&v) - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
        assert!(std_dev(&[1.0]).is_nan());
    }

    proptest! {
        #[test]
        fn median_matches_quantile_for_odd_lengths(v in vec(-1e6f64..1e6, 1..50usize)) {
            let v = if v.len() % 2 == 0 { v[1..].to_vec() } else { v };
            prop_assert_eq!(median(&v).unwrap(), quantile(0.5, &v).unwrap());
        }

        #[test]
        fn quantile_is_a_member_between_min_and_max(
            v in vec(-1e6f64..1e6, 1..50usize),
            p in 0.0f64..=1.0,
        ) {
            let q = quantile(p, &v).unwrap();
            prop_assert!(v.contains(&q));
            prop_assert!(q >= min(&v) && q <= max(&v));
        }

        #[test]
        fn mode_count_matches_recount(v in vec(0u8..5, 1..40usize)) {
            let v: Vec<f64> = v.into_iter().map(f64::from).collect();
            let (value, count) = mode(&v);
            prop_assert_eq!(v.iter().filter(|&&x| x == value).count(), count);
            for &x in &v {
                prop_assert!(v.iter().filter(|&&y| y == x).count() <= count);
            }
        }
    }
}
