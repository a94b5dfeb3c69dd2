//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves static bodies by request path, optionally with a Content-Disposition
//! header, and answers 404 for anything else. Every requested path is recorded.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub struct Route {
    pub body: Vec<u8>,
    pub content_disposition: Option<String>,
}

impl Route {
    pub fn body(body: &[u8]) -> Self {
        Self {
            body: body.to_vec(),
            content_disposition: None,
        }
    }

    pub fn attachment(body: &[u8], filename: &str) -> Self {
        Self {
            body: body.to_vec(),
            content_disposition: Some(format!("attachment; filename=\"{}\"", filename)),
        }
    }
}

pub struct FileServer {
    base: String,
    hits: Arc<Mutex<Vec<String>>>,
}

impl FileServer {
    /// Starts serving `routes` (path → route) on a background thread until the process exits.
    pub fn start(routes: Vec<(&str, Route)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let routes: Arc<HashMap<String, Route>> = Arc::new(
            routes
                .into_iter()
                .map(|(p, r)| (p.to_string(), r))
                .collect(),
        );
        let hits = Arc::new(Mutex::new(Vec::new()));
        let server_hits = Arc::clone(&hits);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = Arc::clone(&routes);
                let hits = Arc::clone(&server_hits);
                thread::spawn(move || handle(stream, &routes, &hits));
            }
        });
        Self {
            base: format!("http://127.0.0.1:{}", port),
            hits,
        }
    }

    /// Absolute URL for `path` (which must start with `/`).
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Paths requested so far, in arrival order.
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }
}

fn handle(mut stream: TcpStream, routes: &HashMap<String, Route>, hits: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let Ok(request) = std::str::from_utf8(&buf[..n]) else {
        return;
    };
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("/").to_string();
    hits.lock().unwrap().push(path.clone());

    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        return;
    }

    match routes.get(&path) {
        Some(route) => {
            let disposition = route
                .content_disposition
                .as_deref()
                .map(|v| format!("Content-Disposition: {}\r\n", v))
                .unwrap_or_default();
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
                route.body.len(),
                disposition
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(&route.body);
        }
        None => {
            let body = b"not found";
            let head = format!(
                "HTTP/1.1 404 Not Found\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(body);
        }
    }
}
