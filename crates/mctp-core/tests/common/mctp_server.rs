//! Minimal MCTP server for integration tests.
//!
//! Accepts connections on a loopback port, reads the request block up to the
//! blank line, records it, and answers with a fixed header block and body.

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ServerOptions {
    /// Raw header lines, written before the blank delimiter line.
    pub headers: Vec<String>,
    /// Use `\r\n` line endings for the header block.
    pub crlf: bool,
    /// Sleep this long before answering (used to trip read timeouts).
    pub delay: Option<Duration>,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            headers: vec!["MCTP/1.0 200 OK".to_string(), "Content-Type: text/markdown".to_string()],
            crlf: false,
            delay: None,
        }
    }
}

/// Handle to a running test server.
pub struct TestServer {
    pub port: u16,
    requests: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    /// Requests received so far, each as the raw text up to and including the blank line.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread answering every request with `body`.
/// The server runs until the process exits.
pub fn start(body: &str) -> TestServer {
    start_with_options(body, ServerOptions::default())
}

pub fn start_with_options(body: &str, opts: ServerOptions) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let body = Arc::new(body.as_bytes().to_vec());
    let log = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            let log = Arc::clone(&log);
            let opts = opts.clone();
            thread::spawn(move || handle(stream, &body, &opts, &log));
        }
    });
    TestServer { port, requests }
}

fn handle(stream: TcpStream, body: &[u8], opts: &ServerOptions, log: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let mut reader = BufReader::new(&stream);
    let mut request = String::new();
    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        request.push_str(&line);
        if line == "\n" || line == "\r\n" {
            break;
        }
    }
    log.lock().unwrap().push(request);

    if let Some(d) = opts.delay {
        thread::sleep(d);
    }
    let eol = if opts.crlf { "\r\n" } else { "\n" };
    let mut out = Vec::new();
    for h in &opts.headers {
        out.extend_from_slice(h.as_bytes());
        out.extend_from_slice(eol.as_bytes());
    }
    out.extend_from_slice(eol.as_bytes());
    out.extend_from_slice(body);
    let mut writer = &stream;
    let _ = writer.write_all(&out);
    let _ = writer.flush();
}

/// A loopback port with nothing listening on it.
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    listener.local_addr().unwrap().port()
}
