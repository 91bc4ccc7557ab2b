//! CLI smoke tests for the cadastro-server binary
//!
//! Every invocation gets its own home dir and a clean set of deployment
//! variables so the host environment can't leak in.

use std::net::TcpListener;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::{sleep, timeout};

fn base_command(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cadastro-server"));
    cmd.env("APP__SERVER__HOME_DIR", home)
        .env_remove("DATABASE_URL")
        .env_remove("SECRET_KEY")
        .env_remove("PORT")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    cmd
}

/// Helper to run the cadastro-server binary with given arguments
fn run_cadastro_server(home: &Path, args: &[&str]) -> std::process::Output {
    base_command(home)
        .args(args)
        .output()
        .expect("Failed to execute cadastro-server")
}

fn free_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

async fn http_get(port: u16, path: &str) -> std::io::Result<String> {
    let mut stream = TcpStream::connect(("127.0.0.1", port)).await?;
    let req = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
    stream.write_all(req.as_bytes()).await?;
    let mut buf = String::new();
    stream.read_to_string(&mut buf).await?;
    Ok(buf)
}

#[test]
fn test_cli_help_command() {
    let home = TempDir::new().unwrap();
    let output = run_cadastro_server(home.path(), &["--help"]);

    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("cadastro-server"), "Should contain binary name");
    assert!(stdout.contains("Usage:"), "Should contain usage information");
    assert!(stdout.contains("run"), "Should contain 'run' subcommand");
    assert!(stdout.contains("check"), "Should contain 'check' subcommand");
    assert!(stdout.contains("--config"), "Should mention config option");
    assert!(stdout.contains("--mock"), "Should mention mock option");
}

#[test]
fn test_cli_version_command() {
    let home = TempDir::new().unwrap();
    let output = run_cadastro_server(home.path(), &["--version"]);

    assert!(output.status.success(), "Version command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("cadastro-server 0.1.0"));
}

#[test]
fn test_cli_invalid_command() {
    let home = TempDir::new().unwrap();
    let output = run_cadastro_server(home.path(), &["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error"), "stderr: {stderr}");
}

#[test]
fn test_cli_config_validation_missing_file() {
    let home = TempDir::new().unwrap();
    let output = run_cadastro_server(
        home.path(),
        &["--config", "/nonexistent/config.yaml", "check"],
    );

    assert!(!output.status.success(), "Should fail with missing config");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found"), "stderr: {stderr}");
}

#[test]
fn test_cli_config_validation_invalid_yaml() {
    let home = TempDir::new().unwrap();
    let config_path = home.path().join("invalid.yaml");
    std::fs::write(&config_path, "invalid: yaml: content: [unclosed").unwrap();

    let output = run_cadastro_server(
        home.path(),
        &["--config", config_path.to_str().unwrap(), "check"],
    );

    assert!(!output.status.success(), "Should fail with invalid YAML");
}

#[test]
fn test_cli_check_valid_config() {
    let home = TempDir::new().unwrap();
    let config_path = home.path().join("config.yaml");
    std::fs::write(
        &config_path,
        r#"
server:
  host: "127.0.0.1"
  port: 8099
  secret_key: "top-secret-value"
database:
  url: "sqlite://data/clientes.db"
logging:
  default:
    console_level: "off"
    file: ""
"#,
    )
    .unwrap();

    let output = run_cadastro_server(
        home.path(),
        &["--config", config_path.to_str().unwrap(), "check"],
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "stderr: {stderr}");
    assert!(stdout.contains("Configuration check passed"));
    assert!(stdout.contains("port: 8099"));
    assert!(!stdout.contains("top-secret-value"), "secret must be redacted");
    assert!(home.path().join("data").is_dir(), "sqlite dir is created");
}

#[test]
fn test_cli_check_rejects_unsupported_database() {
    let home = TempDir::new().unwrap();
    let output = base_command(home.path())
        .env("DATABASE_URL", "mysql://u:p@localhost/app")
        .arg("check")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown DSN"), "stderr: {stderr}");
    assert!(!stderr.contains("u:p@"), "credentials must be redacted");
}

#[test]
fn test_cli_print_config_uses_deployment_env() {
    let home = TempDir::new().unwrap();
    let output = base_command(home.path())
        .env("DATABASE_URL", "postgresql+psycopg://app:hunter2@db:5432/app")
        .env("PORT", "7001")
        .args(["--print-config", "--port", "7002"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    // CLI beats PORT
    assert!(stdout.contains("port: 7002"), "stdout: {stdout}");
    assert!(stdout.contains("0.0.0.0"), "PORT implies all interfaces: {stdout}");
    assert!(stdout.contains("postgresql+psycopg://app:***@db:5432/app"));
    assert!(!stdout.contains("hunter2"));
}

#[tokio::test]
async fn test_cli_run_with_mock_database_serves_health() {
    let home = TempDir::new().unwrap();
    let port = free_port();

    let mut cmd = tokio::process::Command::from(base_command(home.path()));
    let mut child = cmd
        .args(["--mock", "--port", &port.to_string(), "run"])
        .kill_on_drop(true)
        .spawn()
        .expect("Failed to spawn cadastro-server");

    let mut response = None;
    for _ in 0..100 {
        if let Ok(body) = http_get(port, "/health").await {
            response = Some(body);
            break;
        }
        sleep(Duration::from_millis(100)).await;
    }
    let response = response.expect("server did not come up");
    assert!(response.starts_with("HTTP/1.1 200"), "response: {response}");
    assert!(response.ends_with("ok"));
    assert!(response.to_ascii_lowercase().contains("x-request-id:"));

    let page = http_get(port, "/clientes").await.unwrap();
    assert!(page.starts_with("HTTP/1.1 200"));
    assert!(page.contains("No clientes yet."));

    #[cfg(unix)]
    {
        let pid = child.id().expect("child pid").to_string();
        let sent = Command::new("kill").args(["-TERM", &pid]).status().unwrap();
        assert!(sent.success());
        let status = timeout(Duration::from_secs(10), child.wait())
            .await
            .expect("server did not stop on SIGTERM")
            .unwrap();
        assert!(status.success(), "graceful shutdown exits 0");
    }

    #[cfg(not(unix))]
    child.kill().await.unwrap();
}
