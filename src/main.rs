use ChemBalance::cli::cli_main::{balance_and_print, run_interactive_menu};
use ChemBalance::settings::BalancerConfig;
use log::warn;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::process::ExitCode;

pub fn main() -> ExitCode {
    // settings are read before the logger exists, errors are reported once it does
    let loaded = BalancerConfig::load(BalancerConfig::DEFAULT_FILE);
    let mut config = loaded.clone().unwrap_or_default();
    if let Err(e) = TermLogger::init(
        config.log_level_filter(),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("cannot initialise the terminal logger: {}", e);
    }
    if let Err(e) = loaded {
        warn!("{}, using default settings", e);
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        run_interactive_menu(&mut config);
        return ExitCode::SUCCESS;
    }
    let equation = args.join(" ");
    match balance_and_print(&equation, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
