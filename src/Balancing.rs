/// Error types of the formula parser and of the balancing pipeline.
pub mod errors;
/// The module takes as input a chemical formula as a String and produces its atomic composition:
/// element symbols with the number of atoms, in the order of first appearance.
/// Groups in round or square brackets may be nested and carry a multiplier: "K4[Fe(CN)6]".
/// Element symbols are checked against the periodic table unless a lenient parser is used.
/// # Examples
/// ```
/// use ChemBalance::Balancing::formula_parser::parse_formula;
/// let composition = parse_formula("Al2(SO4)3").unwrap();
/// assert_eq!(composition.count("Al"), 2);
/// assert_eq!(composition.count("S"), 3);
/// assert_eq!(composition.count("O"), 12);
/// ```
pub mod formula_parser;
/// Builds the composition matrix of an equation: one row per element (sorted by symbol),
/// one column per compound, positive entries for reactants and negative for products.
pub mod equation_matrix;
/// Least squares solution of the homogeneous system with the last coefficient fixed to 1,
/// conversion of the result to fractions, and the exact dimension of the null space.
pub mod null_space;
/// LCM/GCD reduction of fractional coefficients to the smallest integers.
pub mod rational_reducer;
/// The equation balancer: parsed compounds, their composition matrix and the full pipeline
/// from formulas to integer coefficients.
/// # Examples
/// ```
/// use ChemBalance::Balancing::balancer::EquationBalancer;
/// let balancer = EquationBalancer::from_formulas(&["KMnO4", "HCl"], &["KCl", "MnCl2", "H2O", "Cl2"]).unwrap();
/// assert_eq!(balancer.balance().unwrap(), vec![2, 16, 2, 2, 8, 5]);
/// ```
pub mod balancer;
/// Splitting of an equation string into reactants and products.
pub mod equation_text;
/// Step by step text output and tables.
pub mod display;
/// Molar masses of parsed formulas.
pub mod molmass;
