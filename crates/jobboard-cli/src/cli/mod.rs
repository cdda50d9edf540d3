//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use jobboard_core::{config, logging};
use jobboard_types::JobFilters;

mod commands;

#[derive(Parser)]
#[command(name = "jobboard")]
#[command(version)]
#[command(about = "Job board client: browse listings and manage role dashboards")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API base URL, e.g. http://localhost:3001/api/v1 (overrides config)
    #[arg(long, global = true, env = config::BASE_URL_ENV, value_name = "URL")]
    api_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Browse public job listings
    Jobs {
        #[command(subcommand)]
        command: JobCommands,
    },
    /// Create a job seeker account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// At least 6 characters
        #[arg(long)]
        password: String,
    },
    /// Interactive session: navigate pages, log in, apply for jobs
    Shell,
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

#[derive(clap::Subcommand)]
enum JobCommands {
    /// List jobs matching the given filters
    List {
        /// Free text search
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        location: Option<String>,
        /// Full-time, Part-time, Contract, Freelance or Internship
        #[arg(long)]
        job_type: Option<String>,
        /// Entry, Junior, Mid, Senior or Lead
        #[arg(long)]
        experience_level: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Page size (defaults to jobs.page_size from config)
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show one job
    Show {
        #[arg(value_name = "JOB_ID")]
        id: String,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Config commands must work even when the config file is broken.
    if let Commands::Config { command } = &cli.command {
        return match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        };
    }

    let mut config = config::Config::load().context("load config")?;
    config.api.base_url_override.clone_from(&cli.api_url);

    let _log_guard = logging::init(&config.log.level).context("init logging")?;

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli.command, config).await })
}

async fn dispatch(command: Commands, config: config::Config) -> Result<()> {
    match command {
        Commands::Config { .. } => Ok(()),
        Commands::Jobs { command } => match command {
            JobCommands::List {
                search,
                location,
                job_type,
                experience_level,
                page,
                limit,
            } => {
                let filters = JobFilters {
                    search,
                    location,
                    job_type,
                    experience_level,
                    page: Some(page),
                    limit: Some(limit.unwrap_or(config.jobs.page_size)),
                };
                commands::jobs::list(&config, &filters).await
            }
            JobCommands::Show { id } => commands::jobs::show(&config, &id).await,
        },
        Commands::Register {
            name,
            email,
            password,
        } => commands::register::run(&config, name, email, password).await,
        Commands::Shell => commands::shell::run(config).await,
    }
}
