//! # ChemBalance
//!
//! Balancing of chemical equations.
//!
//! A formula like "K4[Fe(CN)6]" is parsed into its atomic composition, the compounds of an
//! equation are turned into a signed element composition matrix, and the homogeneous system
//! `A c = 0` is solved with the coefficient of the last compound fixed to 1. The fractional
//! solution is reduced exactly to the smallest positive integer coefficients.
//!
//! ```
//! use ChemBalance::Balancing::balancer::balance_equation;
//! assert_eq!(balance_equation("Fe + O2 -> Fe2O3").unwrap(), vec![4, 3, 2]);
//! ```
#[allow(non_snake_case)]
pub mod Balancing;
#[allow(non_snake_case)]
pub mod Examples;
pub mod cli;
pub mod settings;
