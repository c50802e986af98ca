//! Minimal HTTP/1.1 stub server for integration tests.
//!
//! Serves fixed bodies by path and can be scripted to fail a path with 503
//! a number of times before succeeding, or to return a fixed error status.
//! Tracks per-path hit counts so tests can assert attempt budgets.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

/// Scripted behavior for one path.
#[derive(Debug, Clone)]
pub struct Route {
    /// Body served on success.
    pub body: Vec<u8>,
    /// Status served once the flaky budget is spent (200 for success routes).
    pub status: u32,
    /// Number of initial requests answered with 503 before `status` applies.
    pub flaky_failures: u32,
}

impl Route {
    pub fn ok(body: Vec<u8>) -> Self {
        Self {
            body,
            status: 200,
            flaky_failures: 0,
        }
    }

    pub fn error(status: u32) -> Self {
        Self {
            body: Vec::new(),
            status,
            flaky_failures: 0,
        }
    }

    /// 503 for the first `failures` requests, then 200 with `body`.
    pub fn flaky(body: Vec<u8>, failures: u32) -> Self {
        Self {
            body,
            status: 200,
            flaky_failures: failures,
        }
    }
}

struct RouteState {
    route: Route,
    remaining_failures: u32,
    hits: u32,
}

/// Running server handle. The listener thread lives until the process exits.
pub struct ServerHandle {
    base_url: String,
    routes: Arc<Mutex<HashMap<String, RouteState>>>,
}

impl ServerHandle {
    /// Absolute URL for a path registered with [`start`].
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Number of requests seen for `path` so far.
    pub fn hits(&self, path: &str) -> u32 {
        self.routes
            .lock()
            .unwrap()
            .get(path)
            .map(|s| s.hits)
            .unwrap_or(0)
    }
}

/// Starts a server in a background thread serving `routes` (path → behavior).
pub fn start(routes: HashMap<String, Route>) -> ServerHandle {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let states: HashMap<String, RouteState> = routes
        .into_iter()
        .map(|(path, route)| {
            let remaining_failures = route.flaky_failures;
            (
                path,
                RouteState {
                    route,
                    remaining_failures,
                    hits: 0,
                },
            )
        })
        .collect();
    let routes = Arc::new(Mutex::new(states));

    let accept_routes = Arc::clone(&routes);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&accept_routes);
            thread::spawn(move || handle(stream, &routes));
        }
    });

    ServerHandle {
        base_url: format!("http://127.0.0.1:{}/", port),
        routes,
    }
}

fn handle(mut stream: TcpStream, routes: &Arc<Mutex<HashMap<String, RouteState>>>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let path = match request_path(request) {
        Some(p) => p,
        None => return,
    };

    let (status, body) = {
        let mut map = routes.lock().unwrap();
        match map.get_mut(&path) {
            Some(state) => {
                state.hits += 1;
                if state.remaining_failures > 0 {
                    state.remaining_failures -= 1;
                    (503, Vec::new())
                } else if state.route.status == 200 {
                    (200, state.route.body.clone())
                } else {
                    (state.route.status, Vec::new())
                }
            }
            None => (404, Vec::new()),
        }
    };

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        status_text(status),
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(&body);
}

/// Path from the request line ("GET /a/b.png HTTP/1.1").
fn request_path(request: &str) -> Option<String> {
    let line = request.lines().next()?;
    let mut parts = line.split_whitespace();
    let method = parts.next()?;
    if !method.eq_ignore_ascii_case("GET") {
        return None;
    }
    Some(parts.next()?.to_string())
}

fn status_text(status: u32) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => "Status",
    }
}
