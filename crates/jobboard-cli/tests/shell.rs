use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_home(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jobs": [{
                "_id": "j1",
                "title": "Rust Engineer",
                "location": "Remote",
                "salary": {"min": 90000, "max": 120000, "currency": "USD"}
            }],
            "totalPages": 1
        })))
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_shell_lists_home_jobs_on_start() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    mount_home(&server).await;

    cargo_bin_cmd!("jobboard")
        .env("JOBBOARD_HOME", dir.path())
        .args(["--api-url", &server.uri(), "shell"])
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("@ /"))
        .stdout(predicate::str::contains("j1 [Rust Engineer] Remote | USD 90,000 - 120,000"))
        .stdout(predicate::str::contains("page 1 of 1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_shell_guarded_page_redirects_to_login() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    mount_home(&server).await;

    Mock::given(method("GET"))
        .and(path("/auth/getMe"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Not authorized"})))
        .mount(&server)
        .await;

    cargo_bin_cmd!("jobboard")
        .env("JOBBOARD_HOME", dir.path())
        .args(["--api-url", &server.uri(), "shell"])
        .write_stdin("open /admin/dashboard\nwhoami\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("@ /login"))
        .stdout(predicate::str::contains("not signed in"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_shell_login_lands_on_user_dashboard() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    mount_home(&server).await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "token=abc; Path=/; HttpOnly")
                .set_body_json(json!({"message": "Logged in"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/getMe"))
        .and(header("cookie", "token=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"_id": "u1", "name": "Ada", "email": "ada@example.com", "role": "user"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/applications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "applications": [{"_id": "a1", "status": "reviewing", "job": {"_id": "j1", "title": "Rust Engineer"}}]
        })))
        .mount(&server)
        .await;

    cargo_bin_cmd!("jobboard")
        .env("JOBBOARD_HOME", dir.path())
        .args(["--api-url", &server.uri(), "shell"])
        .write_stdin("open /login\nlogin ada@example.com hunter22\nwhoami\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[success] Login successful!"))
        .stdout(predicate::str::contains("@ /dashboard"))
        .stdout(predicate::str::contains("Rust Engineer: reviewing"))
        .stdout(predicate::str::contains("Ada <ada@example.com> (user)"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_shell_reports_unknown_command() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    mount_home(&server).await;

    cargo_bin_cmd!("jobboard")
        .env("JOBBOARD_HOME", dir.path())
        .args(["--api-url", &server.uri(), "shell"])
        .write_stdin("dance\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("unrecognized command: dance"));
}
