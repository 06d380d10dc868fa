//! Login/logout command handlers.

use std::io::Write;

use anyhow::{Context, Result};

use crate::cli::App;

pub async fn login(app: &App, username: &str) -> Result<()> {
    let password = read_password().context("read password")?;

    app.client.login(username, &password).await?;
    println!("Logged in as {username}");
    Ok(())
}

pub async fn logout(app: &App) -> Result<()> {
    if !app.session.is_authenticated() {
        println!("Not logged in");
        return Ok(());
    }

    app.client.logout().await?;
    println!("Logged out");
    Ok(())
}

/// Reads the password from stdin (piped or typed).
fn read_password() -> Result<String> {
    eprint!("Password: ");
    std::io::stderr().flush().ok();

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("read from stdin")?;

    let password = line.trim();
    if password.is_empty() {
        anyhow::bail!("Password must not be empty");
    }
    Ok(password.to_string())
}
