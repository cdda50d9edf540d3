//! Line-driven front-end over the headless app runtime.
//!
//! Reads commands from stdin, drives an [`App`] and prints the location,
//! toasts and a summary of the mounted view after every command.

use anyhow::{Context, Result};
use jobboard_app::format::format_salary;
use jobboard_app::views::HomeFilters;
use jobboard_app::{Action, App, View};
use jobboard_core::config::Config;
use jobboard_types::{ApplicationStatus, LoginRequest, Record, RegisterRequest};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

const HELP: &str = "\
commands:
  open <path>                    navigate, e.g. open /jobs/42
  back                           go back one page
  login <email> <password>
  register <name> <email> <password>
  logout
  whoami                         show the signed-in identity
  search [text]                  filter jobs on the home page
  next | prev                    change home page
  apply                          open the application form
  submit <cover letter>          send the application
  applications <job_id>          recruiter: list applications for a job
  status <application_id> <status>
  help
  quit";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Open(String),
    Back,
    Login { email: String, password: String },
    Register { name: String, email: String, password: String },
    Logout,
    WhoAmI,
    Search(String),
    Next,
    Prev,
    Apply,
    Submit(String),
    Applications(String),
    Status { application_id: String, status: ApplicationStatus },
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `Ok(None)`.
fn parse_line(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let args: Vec<&str> = rest.split_whitespace().collect();

    let command = match (head, args.as_slice()) {
        ("open", [path]) => Command::Open((*path).to_string()),
        ("back", []) => Command::Back,
        ("login", [email, password]) => Command::Login {
            email: (*email).to_string(),
            password: (*password).to_string(),
        },
        ("register", [name, email, password]) => Command::Register {
            name: (*name).to_string(),
            email: (*email).to_string(),
            password: (*password).to_string(),
        },
        ("logout", []) => Command::Logout,
        ("whoami", []) => Command::WhoAmI,
        ("search", _) => Command::Search(rest.to_string()),
        ("next", []) => Command::Next,
        ("prev", []) => Command::Prev,
        ("apply", []) => Command::Apply,
        ("submit", [_, ..]) => Command::Submit(rest.to_string()),
        ("applications", [job_id]) => Command::Applications((*job_id).to_string()),
        ("status", [application_id, status]) => Command::Status {
            application_id: (*application_id).to_string(),
            status: status.parse()?,
        },
        ("help", []) => Command::Help,
        ("quit" | "exit", []) => Command::Quit,
        _ => return Err(format!("unrecognized command: {line} (try 'help')")),
    };
    Ok(Some(command))
}

pub async fn run(config: Config) -> Result<()> {
    let mut app = App::new(config).context("start app")?;
    info!("Shell started");

    app.navigate("/").await;
    render(&mut app);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("read stdin")? {
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => {
                println!("{HELP}");
                continue;
            }
            Command::WhoAmI => {
                match app.store().identity() {
                    Some(identity) => {
                        println!("{} <{}> ({})", identity.name, identity.email, identity.role);
                    }
                    None => println!("not signed in"),
                }
                continue;
            }
            Command::Open(path) => app.navigate(&path).await,
            Command::Back => {
                if !app.back().await {
                    println!("no earlier page");
                }
            }
            Command::Login { email, password } => {
                app.dispatch(Action::Login(LoginRequest { email, password }))
                    .await;
            }
            Command::Register {
                name,
                email,
                password,
            } => {
                app.dispatch(Action::Register(RegisterRequest {
                    name,
                    email,
                    password,
                }))
                .await;
            }
            Command::Logout => app.logout().await,
            Command::Search(search) => {
                app.dispatch(Action::Search(HomeFilters {
                    search,
                    ..HomeFilters::default()
                }))
                .await;
            }
            Command::Next => app.dispatch(Action::NextPage).await,
            Command::Prev => app.dispatch(Action::PrevPage).await,
            Command::Apply => app.dispatch(Action::StartApplication).await,
            Command::Submit(cover_letter) => {
                app.dispatch(Action::SubmitApplication { cover_letter })
                    .await;
            }
            Command::Applications(job_id) => {
                app.dispatch(Action::ShowApplications { job_id }).await;
            }
            Command::Status {
                application_id,
                status,
            } => {
                app.dispatch(Action::UpdateApplicationStatus {
                    application_id,
                    status,
                })
                .await;
            }
        }
        render(&mut app);
    }

    Ok(())
}

fn render(app: &mut App) {
    if let Some(route) = app.location() {
        println!("@ {route}");
    }
    for toast in app.drain_toasts() {
        println!("[{}] {}", toast.kind, toast.message);
    }
    for line in summarize(app.view()) {
        println!("  {line}");
    }
}

fn summarize(view: &View) -> Vec<String> {
    match view {
        View::Blank | View::Register(_) | View::Login(_) => Vec::new(),
        View::Home(home) => {
            let mut lines: Vec<String> = home.jobs.iter().map(job_line).collect();
            lines.push(format!("page {} of {}", home.page, home.total_pages));
            lines
        }
        View::JobDetails(details) => match &details.job {
            Some(job) => {
                let mut lines = vec![job_line(job)];
                if let Some(description) = job.str_field("description") {
                    lines.push(description.to_string());
                }
                if details.show_application_form {
                    lines.push("application form open: submit <cover letter>".to_string());
                }
                lines
            }
            None => Vec::new(),
        },
        View::UserDashboard(dashboard) => dashboard
            .applications
            .iter()
            .map(|application| {
                let title = application
                    .as_value()
                    .pointer("/job/title")
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or("(job removed)");
                let status = application.str_field("status").unwrap_or("pending");
                format!("{title}: {status}")
            })
            .collect(),
        View::RecruiterDashboard(dashboard) => {
            let mut lines = vec![format!(
                "company: {}",
                dashboard.company_name().unwrap_or("(none assigned)")
            )];
            lines.extend(dashboard.jobs.iter().map(job_line));
            lines.extend(dashboard.applications.iter().map(|application| {
                format!(
                    "application {}: {}",
                    application.id().unwrap_or("?"),
                    application.str_field("status").unwrap_or("pending")
                )
            }));
            lines
        }
        View::AdminDashboard(dashboard) => {
            let mut lines: Vec<String> = dashboard
                .companies
                .iter()
                .map(|company| format!("company {}", named(company)))
                .collect();
            lines.extend(
                dashboard
                    .recruiters
                    .iter()
                    .map(|recruiter| format!("recruiter {}", named(recruiter))),
            );
            lines
        }
        View::NotFound(path) => vec![format!("page not found: {path}")],
    }
}

fn job_line(job: &Record) -> String {
    format!(
        "{} [{}] {} | {}",
        job.id().unwrap_or("?"),
        job.str_field("title").unwrap_or("(untitled)"),
        job.str_field("location").unwrap_or("-"),
        format_salary(job.as_value().get("salary"), "Not specified")
    )
}

fn named(record: &Record) -> String {
    format!(
        "{} {}",
        record.id().unwrap_or("?"),
        record.str_field("name").unwrap_or("(unnamed)")
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_blank_line_is_skipped() {
        assert_eq!(parse_line("   "), Ok(None));
    }

    #[test]
    fn test_parse_login_takes_two_arguments() {
        assert_eq!(
            parse_line("login ada@example.com hunter22"),
            Ok(Some(Command::Login {
                email: "ada@example.com".to_string(),
                password: "hunter22".to_string(),
            }))
        );
        assert!(parse_line("login ada@example.com").is_err());
    }

    #[test]
    fn test_parse_search_keeps_whole_text() {
        assert_eq!(
            parse_line("search  rust  engineer "),
            Ok(Some(Command::Search("rust  engineer".to_string())))
        );
        assert_eq!(parse_line("search"), Ok(Some(Command::Search(String::new()))));
    }

    #[test]
    fn test_parse_submit_requires_text() {
        assert_eq!(
            parse_line("submit I would love to join."),
            Ok(Some(Command::Submit("I would love to join.".to_string())))
        );
        assert!(parse_line("submit").is_err());
    }

    #[test]
    fn test_parse_status_validates_value() {
        assert_eq!(
            parse_line("status a1 Shortlisted"),
            Ok(Some(Command::Status {
                application_id: "a1".to_string(),
                status: ApplicationStatus::Shortlisted,
            }))
        );
        let err = parse_line("status a1 accepted").unwrap_err();
        assert!(err.contains("accepted"));
    }

    #[test]
    fn test_parse_unknown_command_mentions_help() {
        let err = parse_line("dance").unwrap_err();
        assert!(err.contains("help"));
        assert_eq!(parse_line("exit"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn test_job_line_formats_salary_range() {
        let job = Record(json!({
            "_id": "j1",
            "title": "Rust Engineer",
            "location": "Remote",
            "salary": {"min": 90000, "max": 120000, "currency": "EUR"}
        }));
        assert_eq!(
            job_line(&job),
            "j1 [Rust Engineer] Remote | EUR 90,000 - 120,000"
        );
    }
}
