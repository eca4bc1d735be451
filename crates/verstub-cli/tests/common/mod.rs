#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::path::Path;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(30);

/// Create a `verstub` command isolated from the caller's environment.
#[allow(dead_code)]
pub fn verstub_cmd(root: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("verstub"));
    cmd.timeout(CMD_TIMEOUT);
    for var in ["URL", "VERSION", "VERSTUB_ROOT", "VERSTUB_TIMEOUT"] {
        cmd.env_remove(var);
    }
    cmd.env("NO_COLOR", "1");
    cmd.env("VERSTUB_ROOT", root);
    cmd
}

/// Start a mock site serving `body` as its `versions.json`.
#[allow(dead_code)]
pub async fn serve_manifest(status: u16, body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/versions.json"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body.to_string()))
        .mount(&server)
        .await;
    server
}

/// Write a placeholder page at `root/rel`.
#[allow(dead_code)]
pub fn write_page(root: &Path, rel: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, "<html></html>").unwrap();
}

/// A base URL nothing is listening on.
#[allow(dead_code)]
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
