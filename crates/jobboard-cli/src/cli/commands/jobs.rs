//! Public job listing commands.

use anyhow::{Context, Result};
use jobboard_core::config::Config;
use jobboard_core::services::jobs;
use jobboard_types::JobFilters;
use serde_json::json;

pub async fn list(config: &Config, filters: &JobFilters) -> Result<()> {
    let clients = super::clients(config)?;
    let page = jobs::list_jobs(&clients.public, filters)
        .await
        .context("list jobs")?;

    let output = json!({
        "jobs": page.jobs,
        "totalPages": page.total_pages,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub async fn show(config: &Config, id: &str) -> Result<()> {
    let clients = super::clients(config)?;
    let job = jobs::get_job(&clients.public, id)
        .await
        .with_context(|| format!("fetch job '{id}'"))?;
    println!("{}", serde_json::to_string_pretty(&job)?);
    Ok(())
}
