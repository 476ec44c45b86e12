//! Splitting of a chemical equation written as text into reactant and product formulae.
//!
//! "H₂ + O₂ → H₂O" -> reactants ["H2", "O2"], products ["H2O"]
//!
//! Accepted arrows: "→", "⟶", "⇌", "->", "=>", "<=>", "<->", "=". Exactly one arrow is allowed.
//! Compounds are separated by "+". Unicode subscript digits are turned into ASCII digits and
//! phase marks "(s)", "(l)", "(g)", "(aq)" are removed. Compounds must be written without
//! stoichiometric coefficients: those are what the balancer finds.
use crate::Balancing::errors::BalanceError;
use log::debug;
use regex::Regex;
use std::sync::OnceLock;

/// reactant and product formulae of an equation, in the order they were written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquationText {
    pub reactants: Vec<String>,
    pub products: Vec<String>,
}

const SUBSCRIPT_DIGITS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];

fn arrow_regex() -> &'static Regex {
    static ARROW: OnceLock<Regex> = OnceLock::new();
    ARROW.get_or_init(|| Regex::new(r"<=>|<->|⇌|⟶|→|->|=>|=").unwrap())
}

fn phase_regex() -> &'static Regex {
    static PHASE: OnceLock<Regex> = OnceLock::new();
    PHASE.get_or_init(|| Regex::new(r"\((?:s|l|g|aq)\)").unwrap())
}

fn coefficient_regex() -> &'static Regex {
    static COEFFICIENT: OnceLock<Regex> = OnceLock::new();
    COEFFICIENT.get_or_init(|| Regex::new(r"^\d+").unwrap())
}

/// "H₂SO₄" -> "H2SO4"
pub fn normalize_subscripts(text: &str) -> String {
    text.chars()
        .map(|c| match SUBSCRIPT_DIGITS.iter().position(|d| *d == c) {
            Some(digit) => char::from(b'0' + digit as u8),
            None => c,
        })
        .collect()
}

/// "2H2O" -> "2H₂O": digits after the leading coefficient become subscripts
pub fn to_subscripts(formula: &str) -> String {
    let coefficient_end = formula
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(formula.len());
    let (coefficient, rest) = formula.split_at(coefficient_end);
    let rest: String = rest
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(digit) => SUBSCRIPT_DIGITS[digit as usize],
            None => c,
        })
        .collect();
    format!("{}{}", coefficient, rest)
}

/// removes phase marks like "(g)" or "(aq)"
pub fn strip_phase_marks(formula: &str) -> String {
    phase_regex().replace_all(formula, "").into_owned()
}

fn split_side(side: &str, which: &str) -> Result<Vec<String>, BalanceError> {
    if side.trim().is_empty() {
        return Err(BalanceError::InvalidEquation(format!("no {} given", which)));
    }
    side.split('+')
        .map(|compound| {
            let compound = strip_phase_marks(compound.trim());
            if compound.is_empty() {
                return Err(BalanceError::InvalidEquation(format!(
                    "empty compound among the {}",
                    which
                )));
            }
            if coefficient_regex().is_match(&compound) {
                return Err(BalanceError::InvalidEquation(format!(
                    "'{}' starts with a coefficient, write the formula without it",
                    compound
                )));
            }
            Ok(compound)
        })
        .collect()
}

/// split an equation into reactant and product formulae
pub fn parse_equation(equation: &str) -> Result<EquationText, BalanceError> {
    let equation = normalize_subscripts(equation.trim());
    let arrows: Vec<_> = arrow_regex().find_iter(&equation).collect();
    let arrow = match arrows.as_slice() {
        [arrow] => arrow,
        [] => {
            return Err(BalanceError::InvalidEquation(
                "the equation needs an arrow between reactants and products".to_string(),
            ));
        }
        _ => {
            return Err(BalanceError::InvalidEquation(format!(
                "the equation must contain exactly one arrow, found {}",
                arrows.len()
            )));
        }
    };
    let reactants = split_side(&equation[..arrow.start()], "reactants")?;
    let products = split_side(&equation[arrow.end()..], "products")?;
    debug!("reactants {:?}, products {:?}", reactants, products);
    Ok(EquationText {
        reactants,
        products,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_arrows() {
        for equation in [
            "H2 + O2 -> H2O",
            "H2 + O2 → H2O",
            "H2 + O2 = H2O",
            "H2 + O2 => H2O",
            "H2 + O2 <=> H2O",
            "H2+O2⇌H2O",
        ] {
            let text = parse_equation(equation).unwrap();
            assert_eq!(text.reactants, strings(&["H2", "O2"]), "{}", equation);
            assert_eq!(text.products, strings(&["H2O"]), "{}", equation);
        }
    }

    #[test]
    fn test_subscripts_and_phases() {
        let text = parse_equation("CH₄(g) + 2O₂(g) → CO₂(g) + H₂O(l)");
        // the coefficient of O2 is rejected
        assert!(matches!(text, Err(BalanceError::InvalidEquation(_))));
        let text = parse_equation("CH₄(g) + O₂(g) → CO₂(g) + H₂O(l)").unwrap();
        assert_eq!(text.reactants, strings(&["CH4", "O2"]));
        assert_eq!(text.products, strings(&["CO2", "H2O"]));
        let text = parse_equation("NaCl(aq) + AgNO3(aq) -> AgCl(s) + NaNO3(aq)").unwrap();
        assert_eq!(text.products, strings(&["AgCl", "NaNO3"]));
        // groups are not phase marks
        assert_eq!(strip_phase_marks("Ca(OH)2(s)"), "Ca(OH)2");
    }

    #[test]
    fn test_invalid_equations() {
        assert!(parse_equation("H2 + O2").is_err());
        assert!(parse_equation("H2 -> O2 -> H2O").is_err());
        assert!(parse_equation(" -> H2O").is_err());
        assert!(parse_equation("H2 + O2 -> ").is_err());
        assert!(parse_equation("H2 + + O2 -> H2O").is_err());
    }

    #[test]
    fn test_subscript_conversion() {
        assert_eq!(normalize_subscripts("Al₂(SO₄)₃"), "Al2(SO4)3");
        assert_eq!(to_subscripts("Al2(SO4)3"), "Al₂(SO₄)₃");
        assert_eq!(to_subscripts("12H2O"), "12H₂O");
        assert_eq!(to_subscripts("+"), "+");
        assert_eq!(normalize_subscripts(&to_subscripts("C6H12O6")), "C6H12O6");
    }
}
