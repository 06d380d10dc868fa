//! Status command handler.

use anyhow::Result;
use mqdash_core::config::Config;
use mqdash_core::session::mask_token;

use crate::cli::App;

pub fn run(app: &App, config: &Config) -> Result<()> {
    println!("Backend:  {}", app.client.base_url());
    println!(
        "Auth:     {}",
        if config.enable_token_auth {
            "token"
        } else {
            "disabled"
        }
    );

    match app.session.get() {
        Some(token) => println!("Session:  logged in ({})", mask_token(&token)),
        None => println!("Session:  not logged in"),
    }
    Ok(())
}
