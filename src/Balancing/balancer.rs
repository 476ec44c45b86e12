use crate::Balancing::equation_matrix::{CoefficientMatrix, build_matrix, is_balanced};
use crate::Balancing::equation_text::parse_equation;
use crate::Balancing::errors::BalanceError;
use crate::Balancing::formula_parser::{CompoundFormula, FormulaParser, parse_vector_of_formulae};
use crate::Balancing::null_space::{CoefficientVector, NullSpace, classify, solve};
use crate::Balancing::rational_reducer::{reduce, try_reduce};
use crate::settings::BalancerConfig;
use log::{debug, info, warn};
use num_rational::Rational64;

/// THE STRUCT EquationBalancer HOLDS A PARSED CHEMICAL EQUATION AND BALANCES IT.
///
/// 1) the element composition matrix is built once, at construction
/// 2) `solve` finds the fractional coefficients with the last compound fixed to 1
/// 3) `reduce_to_integers` turns them into the smallest integer coefficients
/// 4) `balance` runs the whole pipeline and explains failures: an equation that is not
///    under-determined, has only the trivial solution, or several independent solutions
///
/// # Examples
/// ```
/// use ChemBalance::Balancing::balancer::EquationBalancer;
/// let balancer = EquationBalancer::from_equation("CH4 + O2 -> CO2 + H2O").unwrap();
/// assert_eq!(balancer.balance().unwrap(), vec![1, 2, 1, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct EquationBalancer {
    pub reactants: Vec<CompoundFormula>,
    pub products: Vec<CompoundFormula>,
    matrix: CoefficientMatrix,
    elements: Vec<String>,
    config: BalancerConfig,
}

impl EquationBalancer {
    pub fn new(reactants: Vec<CompoundFormula>, products: Vec<CompoundFormula>) -> Self {
        Self::with_config(reactants, products, BalancerConfig::default())
    }

    pub fn with_config(
        reactants: Vec<CompoundFormula>,
        products: Vec<CompoundFormula>,
        config: BalancerConfig,
    ) -> Self {
        let (matrix, elements) = build_matrix(&reactants, &products);
        Self {
            reactants,
            products,
            matrix,
            elements,
            config,
        }
    }

    /// parses reactant and product formulae, e.g. `(&["H2", "O2"], &["H2O"])`
    pub fn from_formulas(reactants: &[&str], products: &[&str]) -> Result<Self, BalanceError> {
        Self::from_formulas_with_config(reactants, products, BalancerConfig::default())
    }

    pub fn from_formulas_with_config(
        reactants: &[&str],
        products: &[&str],
        config: BalancerConfig,
    ) -> Result<Self, BalanceError> {
        let parser = FormulaParser::from_config(&config);
        let reactants = parse_vector_of_formulae(&parser, reactants)?;
        let products = parse_vector_of_formulae(&parser, products)?;
        Ok(Self::with_config(reactants, products, config))
    }

    /// parses a whole equation, e.g. "Fe + O2 -> Fe2O3"
    pub fn from_equation(equation: &str) -> Result<Self, BalanceError> {
        Self::from_equation_with_config(equation, BalancerConfig::default())
    }

    pub fn from_equation_with_config(
        equation: &str,
        config: BalancerConfig,
    ) -> Result<Self, BalanceError> {
        let text = parse_equation(equation)?;
        let reactants: Vec<&str> = text.reactants.iter().map(String::as_str).collect();
        let products: Vec<&str> = text.products.iter().map(String::as_str).collect();
        Self::from_formulas_with_config(&reactants, &products, config)
    }

    pub fn config(&self) -> &BalancerConfig {
        &self.config
    }

    /// all compounds in column order: reactants, then products
    pub fn compounds(&self) -> impl Iterator<Item = &CompoundFormula> {
        self.reactants.iter().chain(&self.products)
    }

    pub fn number_of_compounds(&self) -> usize {
        self.reactants.len() + self.products.len()
    }

    /// signed composition matrix and the elements of its rows
    pub fn matrix(&self) -> (&CoefficientMatrix, &[String]) {
        (&self.matrix, &self.elements)
    }

    /// fractional coefficients, `None` when the system is not solvable by this method
    pub fn solve(&self) -> Option<CoefficientVector> {
        solve(&self.matrix, &self.config)
    }

    pub fn reduce_to_integers(&self, coefficients: &[Rational64]) -> Vec<i64> {
        reduce(coefficients)
    }

    /// like `reduce_to_integers`, but an overflow of the common multiple is a `SolverFailure`
    /// instead of a vector of zeros
    pub fn integer_coefficients(
        &self,
        coefficients: &[Rational64],
    ) -> Result<Vec<i64>, BalanceError> {
        try_reduce(coefficients).ok_or_else(|| {
            warn!("integer coefficients of {:?} overflow i64", coefficients);
            BalanceError::SolverFailure
        })
    }

    /// exact dimension of the solution space
    pub fn null_space(&self) -> NullSpace {
        classify(&self.matrix)
    }

    /// true when the integer coefficients conserve every element
    pub fn verify(&self, coefficients: &[i64]) -> bool {
        is_balanced(&self.matrix, coefficients)
    }

    /// Full pipeline: smallest positive integer coefficients in column order.
    pub fn balance(&self) -> Result<Vec<i64>, BalanceError> {
        self.balance_with_fractions().map(|(_, coefficients)| coefficients)
    }

    /// Full pipeline, also returning the fractional solution the integers were scaled from.
    pub fn balance_with_fractions(&self) -> Result<(CoefficientVector, Vec<i64>), BalanceError> {
        let (rows, columns) = self.matrix.shape();
        if rows == 0 || columns == 0 {
            return Err(BalanceError::NothingToBalance);
        }
        if columns <= rows {
            return Err(BalanceError::NotUnderdetermined { rows, columns });
        }
        match self.null_space() {
            NullSpace::Trivial => return Err(BalanceError::NoNontrivialSolution),
            NullSpace::Ambiguous(dimension) => {
                return Err(BalanceError::AmbiguousSolution { dimension });
            }
            NullSpace::Unique => {}
        }
        let fractions = self.solve().ok_or(BalanceError::SolverFailure)?;
        debug!("fractional coefficients {:?}", fractions);
        let coefficients = self.integer_coefficients(&fractions)?;
        if !self.verify(&coefficients) {
            warn!(
                "coefficients {:?} do not conserve the elements {:?}",
                coefficients, self.elements
            );
            return Err(BalanceError::SolverFailure);
        }
        if coefficients.iter().any(|c| *c <= 0) {
            return Err(BalanceError::NonPositiveSolution(coefficients));
        }
        info!("balanced coefficients {:?}", coefficients);
        Ok((fractions, coefficients))
    }
}

/// balance an equation string with the default settings
pub fn balance_equation(equation: &str) -> Result<Vec<i64>, BalanceError> {
    EquationBalancer::from_equation(equation)?.balance()
}
