//! Error types of the balancing pipeline.
//!
//! `FormatError` is raised by the formula parser and is always surfaced to the caller.
//! `BalanceError` covers the whole pipeline: equation text, matrix construction,
//! null space analysis and formatting of the result.
use thiserror::Error;

/// malformed chemical formula
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("empty formula")]
    Empty,
    #[error("unclosed group opened at position {position} in formula '{formula}'")]
    UnclosedGroup { formula: String, position: usize },
    #[error("closing bracket without opening one at position {position} in formula '{formula}'")]
    UnmatchedClose { formula: String, position: usize },
    #[error("unexpected character '{found}' at position {position} in formula '{formula}'")]
    UnexpectedChar {
        formula: String,
        position: usize,
        found: char,
    },
    #[error("empty group at position {position} in formula '{formula}'")]
    EmptyGroup { formula: String, position: usize },
    #[error("zero subscript at position {position} in formula '{formula}'")]
    ZeroCount { formula: String, position: usize },
    #[error("atom count is too large at position {position} in formula '{formula}'")]
    CountOverflow { formula: String, position: usize },
    #[error("unknown element symbol '{symbol}' at position {position} in formula '{formula}'")]
    UnknownElement {
        formula: String,
        position: usize,
        symbol: String,
    },
}

impl FormatError {
    /// byte offset of the problem inside the formula, if there is one
    pub fn position(&self) -> Option<usize> {
        match self {
            FormatError::Empty => None,
            FormatError::UnclosedGroup { position, .. }
            | FormatError::UnmatchedClose { position, .. }
            | FormatError::UnexpectedChar { position, .. }
            | FormatError::EmptyGroup { position, .. }
            | FormatError::ZeroCount { position, .. }
            | FormatError::CountOverflow { position, .. }
            | FormatError::UnknownElement { position, .. } => Some(*position),
        }
    }
}

/// errors of the balancing pipeline
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BalanceError {
    #[error("formula error: {0}")]
    Format(#[from] FormatError),
    #[error("invalid equation: {0}")]
    InvalidEquation(String),
    #[error("nothing to balance: the equation has no compounds or no elements")]
    NothingToBalance,
    #[error(
        "the system is not under-determined: {columns} compounds for {rows} elements, at least one free coefficient is required"
    )]
    NotUnderdetermined { rows: usize, columns: usize },
    #[error("the equation admits only the trivial solution (all coefficients zero)")]
    NoNontrivialSolution,
    #[error(
        "the equation has {dimension} independent solutions, the coefficients are not defined uniquely"
    )]
    AmbiguousSolution { dimension: usize },
    #[error("the linear solver failed to produce a consistent solution")]
    SolverFailure,
    #[error("the solution contains zero or negative coefficients: {0:?}")]
    NonPositiveSolution(Vec<i64>),
    #[error("expected {expected} coefficients, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("no data for element '{0}'")]
    UnknownElement(String),
    #[error("configuration error: {0}")]
    Config(String),
}
