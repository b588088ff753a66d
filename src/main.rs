//! packlist - A terminal packing list for your next trip

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = packlist::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
