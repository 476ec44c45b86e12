//! Reduction of exact fractional coefficients to the smallest integer coefficients with the
//! same ratios: multiply by the LCM of the denominators, divide by the GCD of the results.
//!
//! The sign of the input is kept: `reduce(-v) == -reduce(v)`.
use log::warn;
use num_integer::Integer;
use num_rational::Rational64;
use num_traits::Zero;

/// Smallest integer vector proportional to `coefficients` with gcd of the nonzero entries = 1.
/// Total: an all-zero (or empty) input gives zeros of the same length, and so does an input
/// whose scaled values overflow 64-bit integers.
pub fn reduce(coefficients: &[Rational64]) -> Vec<i64> {
    try_reduce(coefficients).unwrap_or_else(|| {
        warn!(
            "coefficients {:?} overflow 64-bit integers after reduction",
            coefficients
        );
        vec![0; coefficients.len()]
    })
}

/// same as `reduce` but reports overflow with `None`
pub fn try_reduce(coefficients: &[Rational64]) -> Option<Vec<i64>> {
    if coefficients.iter().all(Zero::is_zero) {
        return Some(vec![0; coefficients.len()]);
    }
    let lcm = coefficients.iter().try_fold(1_i128, |acc, c| {
        let denom = *c.denom() as i128;
        (acc / acc.gcd(&denom)).checked_mul(denom)
    })?;
    let scaled: Vec<i128> = coefficients
        .iter()
        .map(|c| (*c.numer() as i128).checked_mul(lcm / *c.denom() as i128))
        .collect::<Option<_>>()?;
    let gcd = scaled
        .iter()
        .filter(|n| !n.is_zero())
        .fold(0_i128, |acc, n| acc.gcd(n));
    scaled
        .iter()
        .map(|n| i64::try_from(n / gcd).ok())
        .collect()
}

/// integers as exact fractions, e.g. to feed a reduced vector back into `reduce`
pub fn from_integers(integers: &[i64]) -> Vec<Rational64> {
    integers.iter().map(|n| Rational64::from_integer(*n)).collect()
}

/// gcd of the absolute values of the nonzero entries, 0 for an all-zero vector
pub fn gcd_of(integers: &[i64]) -> i64 {
    integers.iter().fold(0_i64, |acc, n| acc.gcd(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: i64, d: i64) -> Rational64 {
        Rational64::new(n, d)
    }

    #[test]
    fn test_reduce_fractions() {
        assert_eq!(reduce(&[r(1, 1), r(1, 2), r(1, 1)]), vec![2, 1, 2]);
        assert_eq!(reduce(&[r(1, 2), r(1, 1), r(1, 2), r(1, 1)]), vec![1, 2, 1, 2]);
        assert_eq!(reduce(&[r(2, 1), r(3, 2), r(1, 1)]), vec![4, 3, 2]);
        let permanganate = [r(2, 5), r(16, 5), r(2, 5), r(2, 5), r(8, 5), r(1, 1)];
        assert_eq!(reduce(&permanganate), vec![2, 16, 2, 2, 8, 5]);
        assert_eq!(reduce(&[r(1, 3), r(1, 6), r(1, 4)]), vec![4, 2, 3]);
    }

    #[test]
    fn test_reduce_integers() {
        assert_eq!(reduce(&from_integers(&[4, 2, 4])), vec![2, 1, 2]);
        assert_eq!(reduce(&from_integers(&[3, 5])), vec![3, 5]);
        assert_eq!(reduce(&from_integers(&[0, 6, 9])), vec![0, 2, 3]);
    }

    #[test]
    fn test_all_zero() {
        assert_eq!(reduce(&[r(0, 1), r(0, 1), r(0, 1)]), vec![0, 0, 0]);
        assert_eq!(reduce(&[]), Vec::<i64>::new());
    }

    #[test]
    fn test_idempotence_and_gcd() {
        let vectors = vec![
            vec![r(1, 2), r(1, 1), r(1, 2), r(1, 1)],
            vec![r(7, 3), r(14, 9), r(0, 1)],
            vec![r(-5, 4), r(5, 6)],
            vec![r(12, 1), r(18, 1), r(30, 1)],
        ];
        for v in vectors {
            let once = reduce(&v);
            assert_eq!(reduce(&from_integers(&once)), once);
            assert_eq!(gcd_of(&once), 1);
        }
    }

    #[test]
    fn test_scale_invariance_and_sign_policy() {
        let v = vec![r(1, 2), r(1, 1), r(1, 2), r(1, 1)];
        let expected = reduce(&v);
        for k in [r(3, 1), r(2, 7), r(1, 1000)] {
            let scaled: Vec<Rational64> = v.iter().map(|c| c * k).collect();
            assert_eq!(reduce(&scaled), expected);
        }
        // a negative factor flips every sign, the reducer does not pick a representative
        let negated: Vec<Rational64> = v.iter().map(|c| c * r(-3, 2)).collect();
        let flipped: Vec<i64> = expected.iter().map(|n| -n).collect();
        assert_eq!(reduce(&negated), flipped);
        // mixed signs are kept as they are
        assert_eq!(reduce(&[r(-1, 2), r(1, 3)]), vec![-3, 2]);
    }

    #[test]
    fn test_overflow() {
        let huge = vec![r(1, i64::MAX), r(1, i64::MAX - 1), r(1, 3)];
        assert_eq!(try_reduce(&huge), None);
        assert_eq!(reduce(&huge), vec![0, 0, 0]);
    }
}
