use super::cli_examples::examples_menu;
use crate::Balancing::balancer::EquationBalancer;
use crate::Balancing::display::{describe_system, explain, matrix_table};
use crate::Balancing::errors::BalanceError;
use crate::Balancing::formula_parser::FormulaParser;
use crate::Balancing::molmass::{ElementTable, mass_fractions, molar_mass};
use crate::settings::BalancerConfig;
use log::{error, info};
use prettytable::{Table, row};
use std::io::{self, Write};

pub fn run_interactive_menu(config: &mut BalancerConfig) {
    loop {
        show_main_menu();
        let Some(choice) = get_user_input() else {
            break;
        };

        match choice.trim() {
            "1" => balance_menu(config),
            "2" => formula_menu(config),
            "3" => molar_mass_menu(config),
            "4" => examples_menu(),
            "5" => settings_menu(config),
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}
/* colors
Blue (\x1b[34m) - Welcome header text

Yellow (\x1b[33m) - Menu options

Cyan (\x1b[36m) - prompts

Reset (\x1b[0m) - Returns to normal color after each colored section
*/
fn show_main_menu() {
    println!("\x1b[34m\n Chemical equation balancer \n \x1b[0m");
    println!("\x1b[33m1. Balance an equation\x1b[0m");
    println!("\x1b[33m2. Atomic composition of a formula\x1b[0m");
    println!("\x1b[33m3. Molar mass\x1b[0m");
    println!("\x1b[33m4. Examples\x1b[0m");
    println!("\x1b[33m5. Settings\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    prompt("Enter your choice: ");
}

fn prompt(text: &str) {
    print!("\x1b[36m{}\x1b[0m", text);
    let _ = io::stdout().flush();
}

/// one line from stdin, `None` at the end of input
pub fn get_user_input() -> Option<String> {
    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) => None,
        Ok(_) => Some(input),
        Err(e) => {
            error!("failed to read input: {}", e);
            None
        }
    }
}

/// Balances the equation and prints the composition matrix and the explanation.
/// When balancing fails the element equations are printed before the error is returned.
pub fn balance_and_print(equation: &str, config: &BalancerConfig) -> Result<(), BalanceError> {
    let balancer = EquationBalancer::from_equation_with_config(equation, config.clone())?;
    matrix_table(&balancer).printstd();
    match explain(&balancer) {
        Ok(text) => {
            println!("{}", text);
            Ok(())
        }
        Err(e) => {
            print!("{}", describe_system(&balancer));
            Err(e)
        }
    }
}

fn balance_menu(config: &BalancerConfig) {
    println!("Write the equation without coefficients, e.g. Fe + O2 -> Fe2O3");
    prompt("Equation: ");
    let Some(equation) = get_user_input() else {
        return;
    };
    if let Err(e) = balance_and_print(equation.trim(), config) {
        println!("\x1b[31m{}\x1b[0m", e);
    }
}

fn formula_menu(config: &BalancerConfig) {
    prompt("Formula: ");
    let Some(formula) = get_user_input() else {
        return;
    };
    match FormulaParser::from_config(config).parse(&formula) {
        Ok(composition) => {
            let mut table = Table::new();
            table.add_row(row!["Element", "Atoms"]);
            for (element, count) in composition.iter() {
                table.add_row(row![element, count]);
            }
            println!("{}: {} atoms", composition, composition.atoms());
            table.printstd();
        }
        Err(e) => println!("\x1b[31m{}\x1b[0m", e),
    }
}

fn molar_mass_menu(config: &BalancerConfig) {
    prompt("Formula: ");
    let Some(formula) = get_user_input() else {
        return;
    };
    let table = ElementTable::standard();
    let result = FormulaParser::from_config(config)
        .parse(&formula)
        .map_err(BalanceError::from)
        .and_then(|composition| {
            let mass = molar_mass(&composition, &table)?;
            let fractions = mass_fractions(&composition, &table)?;
            Ok((mass, fractions))
        });
    match result {
        Ok((mass, fractions)) => {
            println!("Molar mass: {:.4} g/mol", mass);
            let mut table = Table::new();
            table.add_row(row!["Element", "Mass fraction"]);
            for (element, fraction) in fractions {
                table.add_row(row![element, format!("{:.4}", fraction)]);
            }
            table.printstd();
        }
        Err(e) => println!("\x1b[31m{}\x1b[0m", e),
    }
}

fn settings_menu(config: &mut BalancerConfig) {
    loop {
        println!("\n=== Settings ===");
        match serde_json::to_string_pretty(config) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("cannot show settings: {}", e),
        }
        println!("1. Set decimal precision");
        println!("2. Toggle strict element symbols");
        println!("3. Save to {}", BalancerConfig::DEFAULT_FILE);
        println!("0. Back to main menu");
        prompt("Enter your choice: ");
        let Some(choice) = get_user_input() else {
            break;
        };
        match choice.trim() {
            "1" => {
                prompt("Decimal precision: ");
                let Some(value) = get_user_input() else {
                    break;
                };
                let mut updated = config.clone();
                match value.trim().parse::<u32>() {
                    Ok(precision) => updated.decimal_precision = precision,
                    Err(e) => {
                        println!("Not a number: {}", e);
                        continue;
                    }
                }
                match updated.validate() {
                    Ok(()) => *config = updated,
                    Err(e) => println!("\x1b[31m{}\x1b[0m", e),
                }
            }
            "2" => config.strict_symbols = !config.strict_symbols,
            "3" => match config.save(BalancerConfig::DEFAULT_FILE) {
                Ok(()) => info!("settings saved to {}", BalancerConfig::DEFAULT_FILE),
                Err(e) => println!("\x1b[31m{}\x1b[0m", e),
            },
            "0" => break,
            _ => println!("Invalid choice. Please try again."),
        }
    }
}
