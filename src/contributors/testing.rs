//! Test helpers shared by the contributor tests.

use crate::config::FetchConfig;
use std::sync::mpsc;
use std::thread;
use tiny_http::{Header, Response, Server};

/// One recorded request: URL path and Authorization header.
pub type Seen = (String, Option<String>);

/// Start a local stand-in for the GitHub API.
///
/// Each route is `(path, status, body)`. Serves `expected` requests, then
/// stops. Recorded requests are sent on the returned channel.
pub fn mock_github(
    routes: Vec<(&'static str, u16, &'static str)>,
    expected: usize,
) -> (String, mpsc::Receiver<Seen>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        for _ in 0..expected {
            let request = match server.recv() {
                Ok(r) => r,
                Err(_) => return,
            };
            let auth = request
                .headers()
                .iter()
                .find(|h| h.field.equiv("Authorization"))
                .map(|h| h.value.as_str().to_string());
            let path = request.url().to_string();
            let _ = tx.send((path.clone(), auth));

            let (status, body) = routes
                .iter()
                .find(|(p, _, _)| *p == path)
                .map(|(_, s, b)| (*s, *b))
                .unwrap_or((404, r#"{"message":"Not Found"}"#));
            let header = Header::from_bytes("Content-Type", "application/json").unwrap();
            let _ = request.respond(
                Response::from_string(body)
                    .with_status_code(status)
                    .with_header(header),
            );
        }
    });

    (format!("http://{}", addr), rx)
}

pub fn test_config(base: &str, paths: &[&str], token: Option<&str>) -> FetchConfig {
    FetchConfig {
        urls: paths.iter().map(|p| format!("{}{}", base, p)).collect(),
        token: token.map(String::from),
        show_progress: false,
        ..FetchConfig::default()
    }
}
