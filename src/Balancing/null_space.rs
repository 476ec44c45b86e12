//! Solution of the homogeneous system `A c = 0` built from a chemical equation.
//!
//! The coefficient of the last compound is fixed to 1 and the remaining unknowns are found by
//! minimum-norm least squares (SVD), which tolerates rank-deficient systems. The floating point
//! result is rounded to a configurable number of decimal digits and converted to exact fractions.
//!
//! `classify` computes the exact dimension of the null space by Gauss-Jordan elimination over
//! rationals, so that "no solution" and "more than one independent solution" can be told apart.
use crate::Balancing::equation_matrix::CoefficientMatrix;
use crate::settings::BalancerConfig;
use log::{debug, info, warn};
use nalgebra::{DMatrix, DVector};
use num_rational::{Ratio, Rational64};
use num_traits::{One, Signed, Zero};

/// exact stoichiometric multipliers, aligned with the matrix columns
pub type CoefficientVector = Vec<Rational64>;

/// largest supported number of decimal digits of the rounding step
pub const MAX_DECIMAL_PRECISION: u32 = 12;
// values beyond this bound cannot be rounded exactly with i128 fractions
const MAX_ABS_COEFFICIENT: f64 = 1e12;

/// dimension of the solution space of `A c = 0`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullSpace {
    /// only c = 0 satisfies the system
    Trivial,
    /// one solution up to a factor
    Unique,
    /// several independent solutions
    Ambiguous(usize),
}

/// Solves the system for one nontrivial solution with the last coefficient equal to 1.
/// Returns `None` when the system is not under-determined (columns <= rows), is empty,
/// or the solver output cannot be turned into fractions.
pub fn solve(matrix: &CoefficientMatrix, config: &BalancerConfig) -> Option<CoefficientVector> {
    let (rows, cols) = matrix.shape();
    if rows == 0 || cols == 0 {
        debug!("empty matrix, nothing to solve");
        return None;
    }
    if cols <= rows {
        info!(
            "{} compounds for {} elements: system is not under-determined, no attempt to solve",
            cols, rows
        );
        return None;
    }
    let a: DMatrix<f64> = matrix.columns(0, cols - 1).map(|v| v as f64);
    let b: DVector<f64> = matrix.column(cols - 1).map(|v| -(v as f64));
    let svd = a.svd(true, true);
    let max_singular = svd.singular_values.iter().cloned().fold(0.0_f64, f64::max);
    let cutoff = config.singular_value_tolerance * max_singular.max(1.0);
    let partial = match svd.solve(&b, cutoff) {
        Ok(x) => x,
        Err(e) => {
            warn!("least squares solution failed: {}", e);
            return None;
        }
    };
    debug!("least squares solution {:?}", partial.as_slice());
    let coefficients: Option<CoefficientVector> = partial
        .iter()
        .chain(std::iter::once(&1.0))
        .map(|value| round_to_rational(*value, config.decimal_precision))
        .collect();
    if coefficients.is_none() {
        warn!("solution {:?} cannot be converted to fractions", partial.as_slice());
    }
    coefficients
}

/// Rounds `value` to `decimal_precision` digits and returns the simplest fraction within half a
/// unit of the last kept digit: 0.5 -> 1/2, 0.66666667 -> 2/3, 2.0 -> 2.
pub fn round_to_rational(value: f64, decimal_precision: u32) -> Option<Rational64> {
    if !value.is_finite() || value.abs() > MAX_ABS_COEFFICIENT {
        return None;
    }
    let precision = decimal_precision.min(MAX_DECIMAL_PRECISION);
    let denom = 10_i128.pow(precision);
    let numer = (value * denom as f64).round() as i128;
    let rounded = Ratio::new(numer, denom);
    let half_unit = Ratio::new(1, 2 * denom);
    let simplest = simplest_between(rounded - half_unit, rounded + half_unit);
    Some(Rational64::new(
        i64::try_from(*simplest.numer()).ok()?,
        i64::try_from(*simplest.denom()).ok()?,
    ))
}

// Fraction with the smallest denominator in the closed interval [lo, hi], lo <= hi.
fn simplest_between(lo: Ratio<i128>, hi: Ratio<i128>) -> Ratio<i128> {
    if !lo.is_positive() && !hi.is_negative() {
        return Ratio::zero();
    }
    if hi.is_negative() {
        return -simplest_between(-hi, -lo);
    }
    let floor = lo.floor();
    if floor == lo {
        return lo;
    }
    let next = floor + Ratio::one();
    if next <= hi {
        return next;
    }
    // lo and hi share the integer part: continue with the reciprocals of the fractional parts
    floor + simplest_between((hi - floor).recip(), (lo - floor).recip()).recip()
}

/// rank of the matrix, computed exactly
pub fn matrix_rank(matrix: &CoefficientMatrix) -> usize {
    let (rows, cols) = matrix.shape();
    let mut m: Vec<Vec<Ratio<i128>>> = (0..rows)
        .map(|r| {
            (0..cols)
                .map(|c| Ratio::from_integer(matrix[(r, c)] as i128))
                .collect()
        })
        .collect();
    let mut rank = 0;
    for col in 0..cols {
        if rank == rows {
            break;
        }
        let Some(pivot) = (rank..rows).find(|&r| !m[r][col].is_zero()) else {
            continue;
        };
        m.swap(rank, pivot);
        let pivot_value = m[rank][col];
        for r in 0..rows {
            if r == rank || m[r][col].is_zero() {
                continue;
            }
            let factor = m[r][col] / pivot_value;
            for c in col..cols {
                let delta = factor * m[rank][c];
                m[r][c] = m[r][c] - delta;
            }
        }
        rank += 1;
    }
    rank
}

/// number of independent solutions of `A c = 0`
pub fn null_space_dimension(matrix: &CoefficientMatrix) -> usize {
    matrix.ncols() - matrix_rank(matrix)
}

pub fn classify(matrix: &CoefficientMatrix) -> NullSpace {
    match null_space_dimension(matrix) {
        0 => NullSpace::Trivial,
        1 => NullSpace::Unique,
        k => NullSpace::Ambiguous(k),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Balancing::equation_matrix::build_matrix;
    use crate::Balancing::formula_parser::{CompoundFormula, parse_formula};
    use approx::assert_relative_eq;

    fn matrix_of(reactants: &[&str], products: &[&str]) -> CoefficientMatrix {
        let parse = |list: &[&str]| -> Vec<CompoundFormula> {
            list.iter().map(|f| parse_formula(f).unwrap()).collect()
        };
        build_matrix(&parse(reactants), &parse(products)).0
    }

    fn r(n: i64, d: i64) -> Rational64 {
        Rational64::new(n, d)
    }

    #[test]
    fn test_round_to_rational() {
        assert_eq!(round_to_rational(0.5, 8), Some(r(1, 2)));
        assert_eq!(round_to_rational(2.0, 8), Some(r(2, 1)));
        assert_eq!(round_to_rational(0.0, 8), Some(r(0, 1)));
        assert_eq!(round_to_rational(2.0 / 3.0, 8), Some(r(2, 3)));
        assert_eq!(round_to_rational(0.66666667, 8), Some(r(2, 3)));
        assert_eq!(round_to_rational(-1.25, 8), Some(r(-5, 4)));
        assert_eq!(round_to_rational(1.0 / 7.0 + 1e-12, 8), Some(r(1, 7)));
        // noise below the precision is suppressed
        assert_eq!(round_to_rational(1.0000000001, 8), Some(r(1, 1)));
        // coarse precision collapses nearby fractions
        assert_eq!(round_to_rational(0.3333, 2), Some(r(1, 3)));
        assert_eq!(round_to_rational(f64::NAN, 8), None);
        assert_eq!(round_to_rational(f64::INFINITY, 8), None);
        assert_eq!(round_to_rational(1e15, 8), None);
    }

    #[test]
    fn test_solve_water() {
        let matrix = matrix_of(&["H2", "O2"], &["H2O"]);
        let solution = solve(&matrix, &BalancerConfig::default()).unwrap();
        assert_eq!(solution, vec![r(1, 1), r(1, 2), r(1, 1)]);
    }

    #[test]
    fn test_solve_methane() {
        let matrix = matrix_of(&["CH4", "O2"], &["CO2", "H2O"]);
        let solution = solve(&matrix, &BalancerConfig::default()).unwrap();
        assert_eq!(solution, vec![r(1, 2), r(1, 1), r(1, 2), r(1, 1)]);
    }

    #[test]
    fn test_solve_thirds() {
        // 4Fe + 3O2 -> 2Fe2O3 with the last coefficient fixed to 1
        let matrix = matrix_of(&["Fe", "O2"], &["Fe2O3"]);
        let solution = solve(&matrix, &BalancerConfig::default()).unwrap();
        assert_eq!(solution, vec![r(2, 1), r(3, 2), r(1, 1)]);
        let as_f64: Vec<f64> = solution
            .iter()
            .map(|c| *c.numer() as f64 / *c.denom() as f64)
            .collect();
        assert_relative_eq!(as_f64[1], 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_under_determined_guard() {
        // 4 elements (Cl, H, Na, O) and 4 compounds
        let matrix = matrix_of(&["NaOH", "HCl"], &["NaCl", "H2O"]);
        assert_eq!(matrix.shape(), (4, 4));
        assert_eq!(solve(&matrix, &BalancerConfig::default()), None);
        // more rows than columns
        let matrix = DMatrix::from_row_slice(3, 2, &[1, -1, 2, -2, 0, 0]);
        assert_eq!(solve(&matrix, &BalancerConfig::default()), None);
        // empty system
        assert_eq!(solve(&DMatrix::zeros(0, 0), &BalancerConfig::default()), None);
    }

    #[test]
    fn test_rank_and_classification() {
        assert_eq!(matrix_rank(&matrix_of(&["H2", "O2"], &["H2O"])), 2);
        assert_eq!(classify(&matrix_of(&["H2", "O2"], &["H2O"])), NullSpace::Unique);
        // dependent rows: still a single solution
        let matrix = matrix_of(&["NaOH", "HCl"], &["NaCl", "H2O"]);
        assert_eq!(matrix_rank(&matrix), 3);
        assert_eq!(classify(&matrix), NullSpace::Unique);
        // H2 + O2 -> H2O + H2O2 has two independent reactions
        let matrix = matrix_of(&["H2", "O2"], &["H2O", "H2O2"]);
        assert_eq!(classify(&matrix), NullSpace::Ambiguous(2));
        // nothing can turn Na into K
        let matrix = matrix_of(&["Na"], &["K"]);
        assert_eq!(classify(&matrix), NullSpace::Trivial);
    }

    #[test]
    fn test_null_vector_satisfies_system() {
        let matrix = matrix_of(&["KMnO4", "HCl"], &["KCl", "MnCl2", "H2O", "Cl2"]);
        assert_eq!(null_space_dimension(&matrix), 1);
        let solution = solve(&matrix, &BalancerConfig::default()).unwrap();
        for row in matrix.row_iter() {
            let sum: Rational64 = row
                .iter()
                .zip(&solution)
                .map(|(a, c)| Rational64::from_integer(*a) * c)
                .sum();
            assert!(sum.is_zero());
        }
    }
}
