use crate::Balancing::balancer::EquationBalancer;
use crate::Balancing::display::{describe_system, explain, matrix_table};

pub fn balancing_examples(task: usize) {
    //
    match task {
        0 => {
            // ATOMIC COMPOSITION OF FORMULAE WITH GROUPS
            use crate::Balancing::formula_parser::{FormulaParser, parse_formula};
            for formula in ["H2O", "Fe(OH)3", "Al2(SO4)3", "K4[Fe(CN)6]", "C5H6OOH"] {
                match parse_formula(formula) {
                    Ok(composition) => println!(
                        "{}: {:?}, {} atoms",
                        formula,
                        composition.to_map(),
                        composition.atoms()
                    ),
                    Err(e) => println!("{}: {}", formula, e),
                }
            }
            // unknown symbols are rejected unless the parser is lenient
            println!("{:?}", parse_formula("XyZ123"));
            println!("{:?}", FormulaParser::lenient().parse("XyZ123"));
        }
        1 => {
            // BALANCING WITH STEP BY STEP EXPLANATION
            let equations = [
                "H2 + O2 -> H2O",
                "Fe + O2 → Fe2O3",
                "KMnO4 + HCl = KCl + MnCl2 + H2O + Cl2",
                "C₆H₁₂O₆(s) + O₂(g) → CO₂(g) + H₂O(l)",
            ];
            for equation in equations {
                println!("\n{}", equation);
                let balancer = match EquationBalancer::from_equation(equation) {
                    Ok(balancer) => balancer,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };
                match explain(&balancer) {
                    Ok(text) => println!("{}", text),
                    Err(e) => println!("{}", e),
                }
            }
        }
        2 => {
            // MOLAR MASSES
            use crate::Balancing::formula_parser::{FormulaParser, parse_vector_of_formulae};
            use crate::Balancing::molmass::{ElementTable, molar_masses_of_vector};
            let table = ElementTable::standard();
            let vec_of_formulae = vec!["H2O", "NaCl", "C6H8O6", "Ca(NO3)2"];
            let Ok(formulas) = parse_vector_of_formulae(&FormulaParser::new(), &vec_of_formulae)
            else {
                return;
            };
            match molar_masses_of_vector(&formulas, &table) {
                Ok(masses) => {
                    for (formula, mass) in vec_of_formulae.iter().zip(masses) {
                        println!("molar mass of {}: {:.3} g/mol", formula, mass);
                    }
                }
                Err(e) => println!("{}", e),
            }
        }
        3 => {
            // EQUATIONS THAT CANNOT BE BALANCED UNIQUELY
            for equation in ["H2 + O2 -> H2O + H2O2", "NaOH + HCl -> NaCl + H2O", "H2O + H2 -> O2"] {
                let Ok(balancer) = EquationBalancer::from_equation(equation) else {
                    continue;
                };
                println!("\n{}", equation);
                matrix_table(&balancer).printstd();
                print!("{}", describe_system(&balancer));
                println!("null space: {:?}", balancer.null_space());
                println!("result: {:?}", balancer.balance());
            }
        }
        4 => {
            // SETTINGS: LENIENT SYMBOLS AND PRECISION
            use crate::settings::BalancerConfig;
            let config = BalancerConfig {
                strict_symbols: false,
                decimal_precision: 10,
                ..BalancerConfig::default()
            };
            let result = EquationBalancer::from_equation_with_config("Xy2 + O2 -> Xy2O", config)
                .and_then(|balancer| balancer.balance());
            println!("coefficients with user-defined symbols: {:?}", result);
            println!(
                "strict parser: {:?}",
                EquationBalancer::from_equation("Xy2 + O2 -> Xy2O").map(|b| b.balance())
            );
        }
        _ => println!("no such example"),
    }
}
