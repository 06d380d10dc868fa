mod cli;
mod views;

use mqdash_core::error::UnauthorizedError;

fn main() {
    if let Err(e) = cli::run() {
        if e.downcast_ref::<UnauthorizedError>().is_some() {
            eprintln!("Session expired or unauthorized. Run `mqdash login` to sign in again.");
            std::process::exit(2);
        }
        eprintln!("{e:#}"); // pretty anyhow chain
        std::process::exit(1);
    }
}
