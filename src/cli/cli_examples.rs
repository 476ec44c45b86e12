use super::cli_main::get_user_input;
use crate::Examples::balancing_examples::balancing_examples;
use std::io::{self, Write};

pub fn examples_menu() {
    loop {
        println!("\n=== Examples ===");
        println!("1. Atomic composition of formulae");
        println!("2. Balancing with step by step explanation");
        println!("3. Molar masses");
        println!("4. Equations without a unique solution");
        println!("5. Settings");
        println!("0. Back to main menu");
        print!("Enter your choice: ");
        let _ = io::stdout().flush();

        let Some(choice) = get_user_input() else {
            break;
        };
        match choice.trim() {
            "1" => balancing_examples(0),
            "2" => balancing_examples(1),
            "3" => balancing_examples(2),
            "4" => balancing_examples(3),
            "5" => balancing_examples(4),
            "0" => break,
            _ => println!("Invalid choice. Please try again."),
        }
    }
}
