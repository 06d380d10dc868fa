//! The navigation surface: resolve a path through the guard, then render.

use anyhow::Result;
use mqdash_core::nav::NavOutcome;

use crate::cli::App;
use crate::views;

pub async fn run(app: &App, path: &str) -> Result<()> {
    match app.nav.navigate(path) {
        NavOutcome::Allowed(location) => {
            tracing::debug!("mounting {} for {path}", location.view);
            views::render(app, &location).await
        }
        NavOutcome::RedirectedToLogin { from } => {
            println!("{from} requires an authorized session.");
            views::render(app, &app.nav.current()).await
        }
        NavOutcome::NotFound { path } => anyhow::bail!("No view registered for {path}"),
    }
}
