//! Construction of the element composition matrix of a chemical equation.
//!
//! Rows are the elements of the equation in lexicographic order, columns are the compounds:
//! reactants first, then products, each group in the order of the equation. Reactant counts
//! are positive, product counts negative, so a balanced vector of coefficients `c` satisfies
//! `matrix * c = 0`.
use crate::Balancing::formula_parser::CompoundFormula;
use log::debug;
use nalgebra::DMatrix;
use std::collections::BTreeSet;

/// signed atom counts: rows are elements, columns are compounds
pub type CoefficientMatrix = DMatrix<i64>;

/// sorted union of the elements of all compounds
pub fn ordered_elements<'a, I>(compounds: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a CompoundFormula>,
{
    let mut set_of_elems: BTreeSet<&str> = BTreeSet::new();
    for compound in compounds {
        set_of_elems.extend(compound.elements());
    }
    set_of_elems.into_iter().map(str::to_string).collect()
}

/// Builds the signed coefficient matrix and the ordered element list.
/// With no compounds or no elements the matrix is 0x0: there is nothing to balance.
pub fn build_matrix(
    reactants: &[CompoundFormula],
    products: &[CompoundFormula],
) -> (CoefficientMatrix, Vec<String>) {
    let elements = ordered_elements(reactants.iter().chain(products));
    let num_cols = reactants.len() + products.len();
    if elements.is_empty() || num_cols == 0 {
        debug!("empty equation, nothing to balance");
        return (DMatrix::zeros(0, 0), Vec::new());
    }
    // the parser keeps every count below MAX_ATOM_COUNT, so it fits i64 and can be negated
    let signed = |compound: &CompoundFormula, element: &str| {
        i64::try_from(compound.count(element)).unwrap_or(i64::MAX)
    };
    let matrix = DMatrix::from_fn(elements.len(), num_cols, |row, col| {
        let element = elements[row].as_str();
        if col < reactants.len() {
            signed(&reactants[col], element)
        } else {
            -signed(&products[col - reactants.len()], element)
        }
    });
    debug!("elements {:?}, composition matrix {}", elements, matrix);
    (matrix, elements)
}

/// `matrix * coefficients`, one imbalance per element; `None` on a length mismatch or overflow
pub fn element_imbalance(matrix: &CoefficientMatrix, coefficients: &[i64]) -> Option<Vec<i128>> {
    if coefficients.len() != matrix.ncols() {
        return None;
    }
    matrix
        .row_iter()
        .map(|row| {
            row.iter().zip(coefficients).try_fold(0_i128, |sum, (a, c)| {
                sum.checked_add(i128::from(*a) * i128::from(*c))
            })
        })
        .collect()
}

/// true when every element is conserved by the coefficients
pub fn is_balanced(matrix: &CoefficientMatrix, coefficients: &[i64]) -> bool {
    element_imbalance(matrix, coefficients)
        .is_some_and(|imbalance| imbalance.iter().all(|sum| *sum == 0))
}
