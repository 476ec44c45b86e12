//! Text output of the balancing steps: the equation with unknown coefficients, one
//! conservation equation per element, the fractional and integer solutions and the balanced
//! equation. Also the composition matrix as a table.
//!
//! # Examples
//! ```
//! use ChemBalance::Balancing::balancer::EquationBalancer;
//! use ChemBalance::Balancing::display::{balanced_equation, equation_with_variables};
//! let balancer = EquationBalancer::from_equation("H2 + O2 -> H2O").unwrap();
//! assert_eq!(equation_with_variables(&balancer), "aH2 + bO2 → cH2O");
//! let coefficients = balancer.balance().unwrap();
//! assert_eq!(balanced_equation(&balancer, &coefficients).unwrap(), "2H2 + O2 → 2H2O");
//! ```
use crate::Balancing::balancer::EquationBalancer;
use crate::Balancing::errors::BalanceError;
pub use crate::Balancing::equation_text::to_subscripts;
use num_rational::Rational64;
use prettytable::{Cell, Row, Table};
use std::fmt::Write;

const ARROW: &str = "→";

/// name of the unknown coefficient of the compound in column `index`: a, b, ... z, a1, b1, ...
pub fn variable_name(index: usize) -> String {
    let letter = char::from(b'a' + (index % 26) as u8);
    match index / 26 {
        0 => letter.to_string(),
        round => format!("{}{}", letter, round),
    }
}

fn join_sides(balancer: &EquationBalancer, terms: Vec<String>) -> String {
    let (reactants, products) = terms.split_at(balancer.reactants.len());
    format!("{} {} {}", reactants.join(" + "), ARROW, products.join(" + "))
}

/// "aH2 + bO2 → cH2O"
pub fn equation_with_variables(balancer: &EquationBalancer) -> String {
    let terms = balancer
        .compounds()
        .enumerate()
        .map(|(i, compound)| format!("{}{}", variable_name(i), compound))
        .collect();
    join_sides(balancer, terms)
}

/// One matrix row as a conservation equation: [2, 0, -2] -> "2a - 2c = 0".
/// Zero entries are skipped and unit coefficients are not written.
pub fn element_equation(row: &[i64]) -> String {
    let mut equation = String::new();
    for (i, count) in row.iter().enumerate().filter(|(_, c)| **c != 0) {
        let sign = match (equation.is_empty(), *count < 0) {
            (true, true) => "-",
            (true, false) => "",
            (false, true) => " - ",
            (false, false) => " + ",
        };
        let magnitude = count.unsigned_abs();
        let factor = if magnitude > 1 {
            magnitude.to_string()
        } else {
            String::new()
        };
        let _ = write!(equation, "{}{}{}", sign, factor, variable_name(i));
    }
    if equation.is_empty() {
        equation.push('0');
    }
    equation.push_str(" = 0");
    equation
}

/// "2H2 + O2 → 2H2O"; coefficients equal to 1 are not written
pub fn balanced_equation(
    balancer: &EquationBalancer,
    coefficients: &[i64],
) -> Result<String, BalanceError> {
    let expected = balancer.number_of_compounds();
    if coefficients.len() != expected {
        return Err(BalanceError::DimensionMismatch {
            expected,
            found: coefficients.len(),
        });
    }
    let terms = balancer
        .compounds()
        .zip(coefficients.iter().copied())
        .map(|(compound, coefficient)| match coefficient {
            1 => compound.to_string(),
            c => format!("{}{}", c, compound),
        })
        .collect();
    Ok(join_sides(balancer, terms))
}

/// "2H2 + O2 → 2H2O" -> "2H₂ + O₂ → 2H₂O"
pub fn subscript_equation(equation: &str) -> String {
    equation
        .split(' ')
        .map(to_subscripts)
        .collect::<Vec<_>>()
        .join(" ")
}

fn fraction(value: &Rational64) -> String {
    if value.is_integer() {
        value.numer().to_string()
    } else {
        format!("{}/{}", value.numer(), value.denom())
    }
}

fn assignments<T, F>(values: &[T], show: F) -> String
where
    F: Fn(&T) -> String,
{
    values
        .iter()
        .enumerate()
        .map(|(i, v)| format!("{} = {}", variable_name(i), show(v)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Steps 1 and 2 of the explanation: unknown coefficients and element conservation equations.
pub fn describe_system(balancer: &EquationBalancer) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "Step 1. Unknown coefficients:");
    let _ = writeln!(text, "  {}", equation_with_variables(balancer));
    let _ = writeln!(text, "Step 2. Conservation of every element:");
    let (matrix, elements) = balancer.matrix();
    for (element, row) in elements.iter().zip(matrix.row_iter()) {
        let row: Vec<i64> = row.iter().copied().collect();
        let _ = writeln!(text, "  {}: {}", element, element_equation(&row));
    }
    text
}

/// Four step explanation of the balancing, or the reason it failed.
pub fn explain(balancer: &EquationBalancer) -> Result<String, BalanceError> {
    let (fractions, coefficients) = balancer.balance_with_fractions()?;
    let last = variable_name(balancer.number_of_compounds() - 1);
    let mut text = describe_system(balancer);
    let _ = writeln!(text, "Step 3. Solution with {} = 1:", last);
    let _ = writeln!(text, "  {}", assignments(&fractions, fraction));
    let _ = writeln!(text, "Step 4. Smallest integer coefficients:");
    let _ = writeln!(text, "  {}", assignments(&coefficients, i64::to_string));
    let balanced = balanced_equation(balancer, &coefficients)?;
    let _ = writeln!(text, "Balanced equation:");
    let _ = write!(text, "  {}", subscript_equation(&balanced));
    Ok(text)
}

/// composition matrix with element rows and compound columns
pub fn matrix_table(balancer: &EquationBalancer) -> Table {
    let mut table = Table::new();
    let mut header = vec![Cell::new("Element")];
    header.extend(balancer.compounds().enumerate().map(|(i, compound)| {
        Cell::new(&format!("{} ({})", compound, variable_name(i)))
    }));
    table.add_row(Row::new(header));
    let (matrix, elements) = balancer.matrix();
    for (element, row) in elements.iter().zip(matrix.row_iter()) {
        let mut cells = vec![Cell::new(element)];
        cells.extend(row.iter().map(|v| Cell::new(&v.to_string())));
        table.add_row(Row::new(cells));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_names() {
        assert_eq!(variable_name(0), "a");
        assert_eq!(variable_name(2), "c");
        assert_eq!(variable_name(25), "z");
        assert_eq!(variable_name(26), "a1");
        assert_eq!(variable_name(53), "b2");
    }

    #[test]
    fn test_element_equation() {
        assert_eq!(element_equation(&[2, 0, -2]), "2a - 2c = 0");
        assert_eq!(element_equation(&[0, 2, -1]), "2b - c = 0");
        assert_eq!(element_equation(&[1, 0, -1, 0]), "a - c = 0");
        assert_eq!(element_equation(&[-1, 3, 0]), "-a + 3b = 0");
        assert_eq!(element_equation(&[0, 0]), "0 = 0");
    }

    #[test]
    fn test_equation_with_variables() {
        let balancer = EquationBalancer::from_equation("CH4 + O2 -> CO2 + H2O").unwrap();
        assert_eq!(equation_with_variables(&balancer), "aCH4 + bO2 → cCO2 + dH2O");
    }

    #[test]
    fn test_balanced_equation() {
        let balancer = EquationBalancer::from_equation("Fe + O2 -> Fe2O3").unwrap();
        assert_eq!(
            balanced_equation(&balancer, &[4, 3, 2]).unwrap(),
            "4Fe + 3O2 → 2Fe2O3"
        );
        assert_eq!(
            balanced_equation(&balancer, &[4, 3]),
            Err(BalanceError::DimensionMismatch {
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            subscript_equation("4Fe + 3O2 → 2Fe2O3"),
            "4Fe + 3O₂ → 2Fe₂O₃"
        );
    }

    #[test]
    fn test_explain() {
        let balancer = EquationBalancer::from_equation("H2 + O2 -> H2O").unwrap();
        let text = explain(&balancer).unwrap();
        assert!(text.contains("aH2 + bO2 → cH2O"));
        assert!(text.contains("H: 2a - 2c = 0"));
        assert!(text.contains("O: 2b - c = 0"));
        assert!(text.contains("a = 1, b = 1/2, c = 1"));
        assert!(text.contains("a = 2, b = 1, c = 2"));
        assert!(text.ends_with("2H₂ + O₂ → 2H₂O"));

        let balancer = EquationBalancer::from_equation("H2 + O2 -> H2O + H2O2").unwrap();
        assert_eq!(
            explain(&balancer),
            Err(BalanceError::AmbiguousSolution { dimension: 2 })
        );
        assert!(describe_system(&balancer).contains("O: 2b - c - 2d = 0"));
    }

    #[test]
    fn test_matrix_table() {
        let balancer = EquationBalancer::from_equation("H2 + O2 -> H2O").unwrap();
        let table = matrix_table(&balancer);
        // header and one row per element
        assert_eq!(table.len(), 3);
        let rendered = table.to_string();
        assert!(rendered.contains("H2O (c)"));
        assert!(rendered.contains("-2"));
    }
}
