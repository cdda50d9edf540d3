//! Account registration.

use anyhow::{Context, Result, bail};
use jobboard_core::config::Config;
use jobboard_core::services::auth;
use jobboard_types::RegisterRequest;

pub async fn run(config: &Config, name: String, email: String, password: String) -> Result<()> {
    if password.chars().count() < 6 {
        bail!("Password must be at least 6 characters long");
    }

    let clients = super::clients(config)?;
    let request = RegisterRequest {
        name,
        email,
        password,
    };
    let ack = auth::register(&clients.public, &request)
        .await
        .context("register")?;

    println!(
        "{}",
        ack.message.as_deref().unwrap_or("Registration successful")
    );
    Ok(())
}
