//! MCTP client: one request, one response, one connection.
//!
//! The request is a short block of `\n`-terminated lines. The response is a
//! block of header lines ended by an empty line, then the body up to
//! end-of-stream. Headers are read and logged but not interpreted.

mod error;
mod parse;

pub use error::{classify_io_error, ErrorKind, TransportError};
pub use parse::Header;

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};

use crate::address::Target;
use crate::config::FetchLimits;
use parse::{parse_header_line, strip_line_ending};

/// Version line opening every request.
pub const PROTOCOL_VERSION: &str = "MCTP/1.0";

/// What came back from one exchange.
#[derive(Debug, Clone)]
pub struct Response {
    /// Header lines in arrival order.
    pub headers: Vec<Header>,
    /// Everything after the blank line, decoded as UTF-8 (lossy).
    pub body: String,
}

/// The exact request sent for `target`.
pub fn format_request(target: &Target) -> String {
    format!(
        "{}\nHost: {}\nRequest: GET {}\n\n",
        PROTOCOL_VERSION, target.host, target.path
    )
}

/// Body returned in place of content when the exchange fails.
pub fn diagnostic_body(target: &Target) -> String {
    format!(
        "# Error\nCould not fetch content from MCTP server at {}:{}",
        target.host, target.port
    )
}

/// Fetches `target` and returns the body.
///
/// Never fails: a transport error is logged and replaced by
/// [`diagnostic_body`], which renders like any other document.
pub fn fetch(target: &Target, limits: &FetchLimits) -> String {
    match exchange(target, limits) {
        Ok(response) => response.body,
        Err(e) => {
            tracing::warn!(
                host = %target.host,
                port = target.port,
                kind = ?e.kind(),
                "fetch failed: {}",
                e
            );
            diagnostic_body(target)
        }
    }
}

/// Performs one request/response exchange against `target`.
///
/// The connection is owned by this call and closed before it returns, on
/// success and on every error path.
pub fn exchange(target: &Target, limits: &FetchLimits) -> Result<Response, TransportError> {
    tracing::debug!(
        host = %target.host,
        port = target.port,
        path = %target.path,
        "opening connection"
    );
    let mut stream = connect(target, limits)?;
    stream
        .set_read_timeout(limits.read_timeout)
        .map_err(TransportError::Io)?;
    stream
        .set_write_timeout(limits.read_timeout)
        .map_err(TransportError::Io)?;

    stream
        .write_all(format_request(target).as_bytes())
        .map_err(TransportError::from_io)?;
    stream.flush().map_err(TransportError::from_io)?;

    let mut reader = BufReader::new(&stream);
    let headers = read_headers(&mut reader, limits.max_header_bytes)?;
    let body = read_body(&mut reader, limits.max_body_bytes)?;
    tracing::debug!(
        host = %target.host,
        headers = headers.len(),
        body_bytes = body.len(),
        "response read"
    );
    for h in &headers {
        tracing::trace!(name = %h.name, value = %h.value, "response header");
    }

    Ok(Response { headers, body })
}

fn connect(target: &Target, limits: &FetchLimits) -> Result<TcpStream, TransportError> {
    let connect_err = |source: std::io::Error| TransportError::Connect {
        host: target.host.clone(),
        port: target.port,
        source,
    };

    let Some(timeout) = limits.connect_timeout else {
        return TcpStream::connect((target.host.as_str(), target.port)).map_err(connect_err);
    };

    let addrs = (target.host.as_str(), target.port)
        .to_socket_addrs()
        .map_err(connect_err)?;
    let mut last_err = None;
    for addr in addrs {
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                tracing::debug!(%addr, "connect attempt failed: {}", e);
                last_err = Some(e);
            }
        }
    }
    Err(connect_err(last_err.unwrap_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::AddrNotAvailable,
            "host resolved to no addresses",
        )
    })))
}

/// Reads header lines up to and including the blank delimiter line.
///
/// End-of-stream before the delimiter ends the header block; the body is then empty.
fn read_headers<R: BufRead>(reader: &mut R, limit: usize) -> Result<Vec<Header>, TransportError> {
    let mut headers = Vec::new();
    let mut used = 0usize;
    let mut line = Vec::new();
    loop {
        line.clear();
        let budget = (limit - used) as u64 + 1;
        let n = reader
            .by_ref()
            .take(budget)
            .read_until(b'\n', &mut line)
            .map_err(TransportError::from_io)?;
        if n == 0 {
            break;
        }
        used += n;
        if used > limit {
            return Err(TransportError::HeadersTooLarge { limit });
        }
        let text = String::from_utf8_lossy(&line);
        let text = strip_line_ending(&text);
        if text.is_empty() {
            break;
        }
        headers.push(parse_header_line(text));
    }
    Ok(headers)
}

fn read_body<R: Read>(reader: &mut R, limit: usize) -> Result<String, TransportError> {
    let mut buf = Vec::new();
    reader
        .by_ref()
        .take(limit as u64 + 1)
        .read_to_end(&mut buf)
        .map_err(TransportError::from_io)?;
    if buf.len() > limit {
        return Err(TransportError::BodyTooLarge { limit });
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
