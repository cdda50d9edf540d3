//! CLI command handlers.

pub mod config;
pub mod jobs;
pub mod register;
pub mod shell;

use std::sync::Arc;

use anyhow::Result;
use jobboard_core::ApiClients;
use jobboard_core::SessionStore;
use jobboard_core::config::Config;

/// Builds the API adapters for a one-shot command.
fn clients(config: &Config) -> Result<ApiClients> {
    let (clients, _events) = ApiClients::new(&config.api, Arc::new(SessionStore::new()))?;
    Ok(clients)
}
