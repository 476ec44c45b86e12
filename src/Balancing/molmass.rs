//! Molar mass of a parsed formula from a table of atomic masses.
//!
//! The table is passed in explicitly; `ElementTable::standard()` holds the conventional atomic
//! masses (g/mol) of all 118 elements and can be extended or replaced, e.g. with isotope masses.
use crate::Balancing::errors::BalanceError;
use crate::Balancing::formula_parser::{CompoundFormula, ELEMENT_SYMBOLS, FormulaParser};
use log::debug;
use std::collections::HashMap;

// atomic masses in the order of ELEMENT_SYMBOLS
const STANDARD_ATOMIC_MASSES: [f64; 118] = [
    1.008, 4.0026, 6.94, 9.0122, 10.81, 12.011, 14.007, 15.999, 18.998, 20.18,
    22.99, 24.305, 26.982, 28.085, 30.974, 32.06, 35.45, 39.948, 39.098, 40.078,
    44.955, 47.867, 50.942, 51.996, 54.938, 55.845, 58.933, 58.693, 63.546, 65.38,
    69.723, 72.63, 74.922, 78.971, 79.904, 83.798, 85.468, 87.62, 88.906, 91.224,
    92.906, 95.95, 98.0, 101.07, 102.91, 106.42, 107.87, 112.41, 114.82, 118.71,
    121.76, 127.60, 126.90, 131.29, 132.91, 137.33, 138.91, 140.12, 140.91, 144.24,
    145.0, 150.36, 151.96, 157.25, 158.93, 162.50, 164.93, 167.26, 168.93, 173.05,
    174.97, 178.49, 180.95, 183.84, 186.21, 190.23, 192.22, 195.08, 196.97, 200.59,
    204.38, 207.2, 208.98, 209.0, 210.0, 222.0, 223.0, 226.0, 227.0, 232.04,
    231.04, 238.03, 237.0, 244.0, 243.0, 247.0, 247.0, 251.0, 252.0, 257.0,
    258.0, 259.0, 262.0, 267.0, 270.0, 271.0, 270.0, 277.0, 278.0, 281.0,
    282.0, 285.0, 286.0, 289.0, 290.0, 293.0, 294.0, 294.0,
];

/// atomic masses (g/mol) by element symbol
#[derive(Debug, Clone, Default)]
pub struct ElementTable {
    masses: HashMap<String, f64>,
}

impl ElementTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn standard() -> Self {
        let masses = ELEMENT_SYMBOLS
            .iter()
            .zip(STANDARD_ATOMIC_MASSES)
            .map(|(symbol, mass)| (symbol.to_string(), mass))
            .collect();
        Self { masses }
    }

    /// adds or replaces the mass of an element
    pub fn insert(&mut self, symbol: &str, mass: f64) -> Option<f64> {
        self.masses.insert(symbol.to_string(), mass)
    }

    pub fn with_mass(mut self, symbol: &str, mass: f64) -> Self {
        self.insert(symbol, mass);
        self
    }

    pub fn mass(&self, symbol: &str) -> Option<f64> {
        self.masses.get(symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.masses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }
}

// Function to calculate the molar mass of a substance given its parsed formula
pub fn molar_mass(formula: &CompoundFormula, table: &ElementTable) -> Result<f64, BalanceError> {
    formula.iter().try_fold(0.0, |total, (element, count)| {
        let mass = table
            .mass(element)
            .ok_or_else(|| BalanceError::UnknownElement(element.to_string()))?;
        debug!("element {}, number of atoms {}", element, count);
        Ok(total + mass * count as f64)
    })
}

/// parses the formula in lenient mode and returns its molar mass
pub fn molar_mass_of(formula: &str, table: &ElementTable) -> Result<f64, BalanceError> {
    let parsed = FormulaParser::lenient().parse(formula)?;
    molar_mass(&parsed, table)
}

// Function to calculate the molar mass of a vector of parsed formulas
pub fn molar_masses_of_vector(
    formulas: &[CompoundFormula],
    table: &ElementTable,
) -> Result<Vec<f64>, BalanceError> {
    formulas.iter().map(|f| molar_mass(f, table)).collect()
}

/// mass fraction of every element, in order of appearance in the formula
pub fn mass_fractions(
    formula: &CompoundFormula,
    table: &ElementTable,
) -> Result<Vec<(String, f64)>, BalanceError> {
    let total = molar_mass(formula, table)?;
    if total <= 0.0 {
        return Err(BalanceError::UnknownElement(formula.to_string()));
    }
    formula
        .iter()
        .map(|(element, count)| {
            let mass = table
                .mass(element)
                .ok_or_else(|| BalanceError::UnknownElement(element.to_string()))?;
            Ok((element.to_string(), mass * count as f64 / total))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Balancing::formula_parser::parse_formula;
    use approx::assert_relative_eq;

    #[test]
    fn test_standard_table() {
        let table = ElementTable::standard();
        assert_eq!(table.len(), 118);
        assert_relative_eq!(table.mass("H").unwrap(), 1.008);
        assert_relative_eq!(table.mass("Og").unwrap(), 294.0);
        assert_eq!(table.mass("Xx"), None);
    }

    #[test]
    fn test_calculate_molar_mass() {
        let table = ElementTable::standard();
        let cases = [
            ("H2O", 18.01528),
            ("NaCl", 58.44),
            ("C6H8O6", 176.12),
            ("Ca(NO3)2", 164.093),
            ("Al2(SO4)3", 342.13),
        ];
        for (formula, expected) in cases {
            let mass = molar_mass(&parse_formula(formula).unwrap(), &table).unwrap();
            assert_relative_eq!(mass, expected, epsilon = 1e-2);
        }
    }

    #[test]
    fn test_calculate_molar_mass_of_vector_of_substances() {
        let table = ElementTable::standard();
        let formulas: Vec<CompoundFormula> = ["H2O", "NaCl", "C6H8O6", "Ca(NO3)2"]
            .iter()
            .map(|f| parse_formula(f).unwrap())
            .collect();
        let expected = [18.01528, 58.44316, 176.12, 164.093];
        let masses = molar_masses_of_vector(&formulas, &table).unwrap();
        for (mass, expected) in masses.iter().zip(expected) {
            assert_relative_eq!(*mass, expected, epsilon = 1e-2);
        }
    }

    #[test]
    fn test_custom_table() {
        let table = ElementTable::new().with_mass("H", 1.0).with_mass("D", 2.014);
        assert_eq!(
            molar_mass(&parse_formula("H2O").unwrap(), &table),
            Err(BalanceError::UnknownElement("O".to_string()))
        );
        let heavy_water = molar_mass_of("D2", &table).unwrap();
        assert_relative_eq!(heavy_water, 4.028);
        assert!(molar_mass_of("D2O", &ElementTable::standard()).is_err());
    }

    #[test]
    fn test_mass_fractions() {
        let table = ElementTable::standard();
        let fractions = mass_fractions(&parse_formula("H2O").unwrap(), &table).unwrap();
        assert_eq!(fractions[0].0, "H");
        assert_relative_eq!(fractions[0].1, 2.016 / 18.015, epsilon = 1e-9);
        let sum: f64 = fractions.iter().map(|(_, w)| w).sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-12);
    }
}
