use std::process::ExitCode;

use colored::Colorize;

fn main() -> ExitCode {
    match countrydeck::app::run_cli() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", "[ERR]".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
