//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves fixed responses keyed by request path (query string ignored);
//! unknown paths get 404. Routes can announce a longer `Content-Length`
//! than they send, drip the body slowly, or stall after it. Also provides a
//! server that never answers and a URL whose port refuses connections.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    pub reason: &'static str,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    /// Announced `Content-Length`; defaults to the body length.
    pub content_length: Option<usize>,
    /// Send the body in pieces of this size with this pause before each.
    pub drip: Option<(usize, Duration)>,
    /// Keep the connection open this long after the body instead of closing.
    pub stall: Option<Duration>,
}

impl Route {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            reason: "OK",
            headers: Vec::new(),
            body: body.into(),
            content_length: None,
            drip: None,
            stall: None,
        }
    }

    /// Announces `announced` bytes but sends only `body`, then closes.
    pub fn truncated(body: impl Into<Vec<u8>>, announced: usize) -> Self {
        Self {
            content_length: Some(announced),
            ..Self::ok(body)
        }
    }

    /// Sends `body` in `piece`-sized writes, pausing `pause` before each.
    pub fn dripping(body: impl Into<Vec<u8>>, piece: usize, pause: Duration) -> Self {
        Self {
            drip: Some((piece, pause)),
            ..Self::ok(body)
        }
    }

    /// Announces `announced` bytes, sends `body`, then goes silent for `stall`.
    pub fn stalling(body: impl Into<Vec<u8>>, announced: usize, stall: Duration) -> Self {
        Self {
            stall: Some(stall),
            ..Self::truncated(body, announced)
        }
    }

    pub fn status(status: u16, reason: &'static str) -> Self {
        Self {
            status,
            reason,
            body: reason.as_bytes().to_vec(),
            ..Self::ok(Vec::<u8>::new())
        }
    }

    pub fn redirect(location: &str) -> Self {
        Self {
            status: 302,
            reason: "Found",
            headers: vec![("Location".to_string(), location.to_string())],
            ..Self::ok(Vec::<u8>::new())
        }
    }
}

/// Starts a server in a background thread. Returns the base URL without a
/// trailing slash (e.g. "http://127.0.0.1:12345"). Runs until the process exits.
pub fn start(routes: Vec<(&str, Route)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes: Arc<HashMap<String, Route>> = Arc::new(
        routes
            .into_iter()
            .map(|(path, route)| (path.to_string(), route))
            .collect(),
    );
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            thread::spawn(move || handle(stream, &routes));
        }
    });
    format!("http://127.0.0.1:{}", port)
}

/// Starts a server that accepts connections and reads requests but never responds.
pub fn start_silent() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        let mut held = Vec::new();
        for mut stream in listener.incoming().flatten() {
            let _ = read_request(&mut stream);
            held.push(stream);
        }
    });
    format!("http://127.0.0.1:{}", port)
}

/// Base URL of a port nothing listens on.
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

fn handle(mut stream: TcpStream, routes: &HashMap<String, Route>) {
    let _ = stream.set_write_timeout(Some(Duration::from_secs(5)));
    let request = match read_request(&mut stream) {
        Some(r) => r,
        None => return,
    };
    let path = request_path(&request);
    let not_found = Route::status(404, "Not Found");
    let route = routes.get(path).unwrap_or(&not_found);

    let mut head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n",
        route.status,
        route.reason,
        route.content_length.unwrap_or(route.body.len())
    );
    for (name, value) in &route.headers {
        head.push_str(&format!("{}: {}\r\n", name, value));
    }
    head.push_str("\r\n");
    if stream.write_all(head.as_bytes()).is_err() {
        return;
    }
    match route.drip {
        Some((piece, pause)) => {
            for chunk in route.body.chunks(piece.max(1)) {
                thread::sleep(pause);
                if stream.write_all(chunk).and_then(|_| stream.flush()).is_err() {
                    return;
                }
            }
        }
        None => {
            let _ = stream.write_all(&route.body);
        }
    }
    if let Some(stall) = route.stall {
        let _ = stream.flush();
        thread::sleep(stall);
    }
}

/// Reads until the end of the request head. Returns None on EOF or error.
fn read_request(stream: &mut TcpStream) -> Option<String> {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let mut data = Vec::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buf[..n]);
        if data.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }
    String::from_utf8(data).ok()
}

/// Path of the request line with any query string removed.
fn request_path(request: &str) -> &str {
    let target = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/");
    target.split(['?', '#']).next().unwrap_or("/")
}
