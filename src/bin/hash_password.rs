//! Prints an argon2 hash for a password, for use in `credentials.yaml`.
//!
//! Usage: `hash-password <password>`

use std::process::ExitCode;

fn main() -> ExitCode {
    let Some(password) = std::env::args().nth(1) else {
        eprintln!("usage: hash-password <password>");
        return ExitCode::FAILURE;
    };

    match wijk_payroll::auth::hash_password(&password) {
        Ok(hash) => {
            println!("{}", hash);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
