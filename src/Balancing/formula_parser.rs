//! Module to parse a chemical formula into its atomic composition
//!
//! Formulae may contain groups in round or square brackets with a multiplier after the
//! closing bracket: "Ca(OH)2", "K4[Fe(CN)6]". Groups may be nested to any depth.
//! Elements without subscript count once, repeated elements are summed: "C5H6OOH" -> {C:5, H:7, O:2}
use crate::Balancing::errors::FormatError;
use crate::settings::BalancerConfig;
use log::{debug, warn};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// largest number of atoms of one element in a formula, counts must fit signed matrix entries
pub const MAX_ATOM_COUNT: usize = i64::MAX as usize;

/// symbols of all 118 elements in order of atomic number
pub const ELEMENT_SYMBOLS: [&str; 118] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S", "Cl",
    "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As",
    "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In",
    "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb",
    "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl",
    "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk",
    "Cf", "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn", "Nh",
    "Fl", "Mc", "Lv", "Ts", "Og",
];

/// Atomic composition of one chemical species.
///
/// Elements are kept in order of their first appearance in the formula, so that the
/// composition of "NaCl" is printed back as "NaCl". Equality compares the mappings and
/// ignores that order.
#[derive(Debug, Clone, Default)]
pub struct CompoundFormula {
    counts: Vec<(String, usize)>,
}

impl CompoundFormula {
    pub fn new() -> Self {
        Self { counts: Vec::new() }
    }

    /// builds a composition from (element, count) pairs, counts of repeated elements are summed
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        let mut formula = Self::new();
        for (element, count) in pairs {
            let element: String = element.into();
            if formula.add(&element, count).is_none() {
                warn!("atom count overflow for element {}", element);
            }
        }
        formula
    }

    /// number of atoms of the element, 0 if it is absent
    pub fn count(&self, element: &str) -> usize {
        self.counts
            .iter()
            .find(|(el, _)| el == element)
            .map_or(0, |(_, count)| *count)
    }

    pub fn contains(&self, element: &str) -> bool {
        self.counts.iter().any(|(el, _)| el == element)
    }

    pub fn elements(&self) -> impl Iterator<Item = &str> {
        self.counts.iter().map(|(el, _)| el.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(el, count)| (el.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn to_map(&self) -> HashMap<String, usize> {
        self.counts.iter().cloned().collect()
    }

    /// total number of atoms
    pub fn atoms(&self) -> usize {
        self.counts
            .iter()
            .fold(0, |sum, (_, count)| sum.saturating_add(*count))
    }

    fn add(&mut self, element: &str, count: usize) -> Option<()> {
        match self.counts.iter_mut().find(|(el, _)| el == element) {
            Some((_, existing)) => {
                *existing = existing
                    .checked_add(count)
                    .filter(|total| *total <= MAX_ATOM_COUNT)?
            }
            None if count <= MAX_ATOM_COUNT => self.counts.push((element.to_string(), count)),
            None => return None,
        }
        Some(())
    }

    fn merge_scaled(&mut self, other: &CompoundFormula, multiplier: usize) -> Option<()> {
        for (element, count) in other.iter() {
            self.add(element, count.checked_mul(multiplier)?)?;
        }
        Some(())
    }
}

impl PartialEq for CompoundFormula {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(el, count)| other.count(el) == count)
    }
}

impl Eq for CompoundFormula {}

impl fmt::Display for CompoundFormula {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (element, count) in self.iter() {
            if count > 1 {
                write!(f, "{}{}", element, count)?;
            } else {
                write!(f, "{}", element)?;
            }
        }
        Ok(())
    }
}

/// Recursive descent parser of chemical formulae.
///
/// In strict mode (the default) element symbols must belong to the set of known symbols,
/// so "XyZ123" is rejected. The lenient parser accepts every syntactically valid symbol:
/// one uppercase letter optionally followed by one lowercase letter.
#[derive(Debug, Clone)]
pub struct FormulaParser {
    symbols: Option<HashSet<String>>,
}

impl Default for FormulaParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FormulaParser {
    /// strict parser checking symbols against the periodic table
    pub fn new() -> Self {
        Self::with_symbols(ELEMENT_SYMBOLS)
    }

    /// parser accepting any syntactically valid element symbol
    pub fn lenient() -> Self {
        Self { symbols: None }
    }

    /// strict parser with a caller-supplied set of symbols (e.g. including
    /// special names like "D" for deuterium)
    pub fn with_symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symbols: Some(symbols.into_iter().map(Into::into).collect()),
        }
    }

    pub fn from_config(config: &BalancerConfig) -> Self {
        if config.strict_symbols {
            Self::new()
        } else {
            Self::lenient()
        }
    }

    pub fn is_strict(&self) -> bool {
        self.symbols.is_some()
    }

    /// parse a formula into its atomic composition
    pub fn parse(&self, formula: &str) -> Result<CompoundFormula, FormatError> {
        let formula = formula.trim();
        if formula.is_empty() {
            return Err(FormatError::Empty);
        }
        debug!("parsing formula: {}", formula);
        let mut cursor = Cursor::new(formula);
        let counts = self.parse_sequence(&mut cursor, None)?;
        debug!("formula {} parsed into {:?}", formula, counts.to_map());
        Ok(counts)
    }

    // Parses elements and groups until the end of the formula or until the closing bracket
    // of the group opened at `open_at`. The closing bracket is consumed here, its multiplier
    // is read by the caller.
    fn parse_sequence(
        &self,
        cursor: &mut Cursor,
        open_at: Option<usize>,
    ) -> Result<CompoundFormula, FormatError> {
        let mut counts = CompoundFormula::new();
        while let Some(c) = cursor.peek() {
            match c {
                b'(' | b'[' => {
                    let open = cursor.pos;
                    cursor.bump();
                    let inner = self.parse_sequence(cursor, Some(open))?;
                    if inner.is_empty() {
                        return Err(FormatError::EmptyGroup {
                            formula: cursor.formula.to_string(),
                            position: open,
                        });
                    }
                    let multiplier = cursor.read_count()?.unwrap_or(1);
                    counts
                        .merge_scaled(&inner, multiplier)
                        .ok_or_else(|| cursor.overflow(open))?;
                }
                b')' | b']' => {
                    if open_at.is_none() {
                        return Err(FormatError::UnmatchedClose {
                            formula: cursor.formula.to_string(),
                            position: cursor.pos,
                        });
                    }
                    cursor.bump();
                    return Ok(counts);
                }
                b'A'..=b'Z' => {
                    let start = cursor.pos;
                    cursor.bump();
                    if let Some(b'a'..=b'z') = cursor.peek() {
                        cursor.bump();
                    }
                    let formula = cursor.formula;
                    let symbol = &formula[start..cursor.pos];
                    self.check_symbol(symbol, formula, start)?;
                    let count = cursor.read_count()?.unwrap_or(1);
                    counts
                        .add(symbol, count)
                        .ok_or_else(|| cursor.overflow(start))?;
                }
                _ => return Err(cursor.unexpected()),
            }
        }
        match open_at {
            Some(position) => Err(FormatError::UnclosedGroup {
                formula: cursor.formula.to_string(),
                position,
            }),
            None => Ok(counts),
        }
    }

    fn check_symbol(&self, symbol: &str, formula: &str, position: usize) -> Result<(), FormatError> {
        match &self.symbols {
            Some(known) if !known.contains(symbol) => Err(FormatError::UnknownElement {
                formula: formula.to_string(),
                position,
                symbol: symbol.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

struct Cursor<'a> {
    formula: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(formula: &'a str) -> Self {
        Self {
            formula,
            bytes: formula.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    /// reads a subscript or a group multiplier; `None` if there are no digits
    fn read_count(&mut self) -> Result<Option<usize>, FormatError> {
        let start = self.pos;
        while let Some(b'0'..=b'9') = self.peek() {
            self.bump();
        }
        if start == self.pos {
            return Ok(None);
        }
        let count: usize = self.formula[start..self.pos]
            .parse()
            .map_err(|_| self.overflow(start))?;
        if count > MAX_ATOM_COUNT {
            return Err(self.overflow(start));
        }
        if count == 0 {
            return Err(FormatError::ZeroCount {
                formula: self.formula.to_string(),
                position: start,
            });
        }
        Ok(Some(count))
    }

    fn overflow(&self, position: usize) -> FormatError {
        FormatError::CountOverflow {
            formula: self.formula.to_string(),
            position,
        }
    }

    fn unexpected(&self) -> FormatError {
        // pos always sits on a char boundary: only ASCII bytes are consumed
        let found = self.formula[self.pos..].chars().next().unwrap_or('\u{FFFD}');
        FormatError::UnexpectedChar {
            formula: self.formula.to_string(),
            position: self.pos,
            found,
        }
    }
}

/// parse a formula with the default (strict) parser
pub fn parse_formula(formula: &str) -> Result<CompoundFormula, FormatError> {
    FormulaParser::new().parse(formula)
}

/// parse a vector of formulae, stops at the first malformed one
pub fn parse_vector_of_formulae(
    parser: &FormulaParser,
    formulae: &[&str],
) -> Result<Vec<CompoundFormula>, FormatError> {
    formulae.iter().map(|formula| parser.parse(formula)).collect()
}
