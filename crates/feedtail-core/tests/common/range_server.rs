//! Minimal HTTP/1.1 server for tail-fetch integration tests.
//!
//! Serves a single static body. Honors suffix ranges (`Range: bytes=-K`) with
//! 206 Partial Content unless told to ignore them, can be forced to answer
//! every request with a fixed status, and can send the body slowly or stall.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct RangeServerOptions {
    /// If false, GET ignores Range and always returns 200 with the full body.
    pub support_ranges: bool,
    /// If set, every request gets this status and an empty body.
    pub forced_status: Option<u16>,
    /// Send the body in pieces of this size with this pause between them.
    pub drip: Option<(usize, Duration)>,
    /// After this many body bytes, go silent for this long before continuing.
    pub stall: Option<(usize, Duration)>,
}

impl Default for RangeServerOptions {
    fn default() -> Self {
        Self {
            support_ranges: true,
            forced_status: None,
            drip: None,
            stall: None,
        }
    }
}

/// Handle returned to tests: base URL plus what the server saw.
#[derive(Clone)]
pub struct RangeServer {
    pub url: String,
    requests: Arc<AtomicUsize>,
    range_headers: Arc<Mutex<Vec<Option<String>>>>,
    encoding_headers: Arc<Mutex<Vec<Option<String>>>>,
}

impl RangeServer {
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// `Range` header value of each request, in arrival order.
    pub fn range_headers(&self) -> Vec<Option<String>> {
        self.range_headers.lock().unwrap().clone()
    }

    /// `Accept-Encoding` header value of each request, in arrival order.
    pub fn encoding_headers(&self) -> Vec<Option<String>> {
        self.encoding_headers.lock().unwrap().clone()
    }
}

pub fn start(body: Vec<u8>) -> RangeServer {
    start_with_options(body, RangeServerOptions::default())
}

/// Starts a server in a background thread serving `body`. Runs until the process exits.
pub fn start_with_options(body: Vec<u8>, opts: RangeServerOptions) -> RangeServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let server = RangeServer {
        url: format!("http://127.0.0.1:{}/BillsThisWeek-RSS.xml", port),
        requests: Arc::new(AtomicUsize::new(0)),
        range_headers: Arc::new(Mutex::new(Vec::new())),
        encoding_headers: Arc::new(Mutex::new(Vec::new())),
    };
    let body = Arc::new(body);
    let seen = server.clone();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            let seen = seen.clone();
            thread::spawn(move || handle(stream, &body, opts, &seen));
        }
    });
    server
}

fn handle(mut stream: TcpStream, body: &[u8], opts: RangeServerOptions, seen: &RangeServer) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(10)));
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
    let req = parse_request(request);
    seen.requests.fetch_add(1, Ordering::SeqCst);
    seen.range_headers.lock().unwrap().push(req.range.clone());
    seen.encoding_headers.lock().unwrap().push(req.accept_encoding.clone());

    if let Some(code) = opts.forced_status {
        let response = format!(
            "HTTP/1.1 {} Forced\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            code
        );
        let _ = stream.write_all(response.as_bytes());
        return;
    }
    if !req.method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\n\r\n");
        return;
    }

    let total = body.len();
    let suffix = req.range.as_deref().and_then(parse_suffix_range);
    let (status, extra, slice) = match suffix {
        Some(k) if opts.support_ranges => {
            let start = total.saturating_sub(k);
            (
                "206 Partial Content",
                format!(
                    "Content-Range: bytes {}-{}/{}\r\nAccept-Ranges: bytes\r\n",
                    start,
                    total.saturating_sub(1),
                    total
                ),
                &body[start..],
            )
        }
        _ => ("200 OK", String::new(), body),
    };
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nContent-Type: application/rss+xml\r\n{}Connection: close\r\n\r\n",
        status,
        slice.len(),
        extra
    );
    let _ = stream.write_all(response.as_bytes());
    write_body(&mut stream, slice, opts);
}

fn write_body(stream: &mut TcpStream, body: &[u8], opts: RangeServerOptions) {
    let (piece, gap) = opts.drip.unwrap_or((body.len().max(1), Duration::ZERO));
    let mut sent = 0usize;
    let mut stalled = false;
    for chunk in body.chunks(piece) {
        if let Some((after, pause)) = opts.stall {
            if !stalled && sent >= after {
                stalled = true;
                thread::sleep(pause);
            }
        }
        if stream.write_all(chunk).is_err() || stream.flush().is_err() {
            return;
        }
        sent += chunk.len();
        if !gap.is_zero() {
            thread::sleep(gap);
        }
    }
}

struct Request {
    method: String,
    range: Option<String>,
    accept_encoding: Option<String>,
}

fn parse_request(request: &str) -> Request {
    let mut method = String::new();
    let mut range = None;
    let mut accept_encoding = None;
    for line in request.lines() {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if method.is_empty() {
            method = line.split_whitespace().next().unwrap_or("").to_string();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            if name.eq_ignore_ascii_case("range") {
                range = Some(value.trim().to_string());
            } else if name.eq_ignore_ascii_case("accept-encoding") {
                accept_encoding = Some(value.trim().to_string());
            }
        }
    }
    Request {
        method,
        range,
        accept_encoding,
    }
}

/// `bytes=-K` -> K.
fn parse_suffix_range(value: &str) -> Option<usize> {
    let spec = value.strip_prefix("bytes=")?.trim();
    spec.strip_prefix('-')?.trim().parse().ok()
}
