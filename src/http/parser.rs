use std::path::PathBuf;

use crate::error::ParseError;
use crate::http::request::{Method, Request, Version};

/// Parses one request from the front of `buf`.
///
/// Returns the request and the number of bytes it occupied, or
/// `ParseError::Incomplete` when more data is needed. Lines may end in CRLF
/// or a bare LF.
///
/// A POST body is read line by line up to the next blank line and joined
/// without delimiters. `Content-Length` is not consulted, so bodies that
/// contain blank lines or binary data are cut short; this framing only
/// suits simple form-style payloads.
pub fn parse_http_request(buf: &[u8]) -> Result<(Request, usize), ParseError> {
    let mut reader = LineReader::new(buf);

    // Stray CRLFs between requests are skipped
    let request_line = loop {
        let line = reader.next_line()?;
        if !line.is_empty() {
            break line;
        }
    };

    let mut parts = request_line.split_whitespace();
    let (method, uri, version) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(method), Some(uri), Some(version), None) => (method, uri, version),
        _ => return Err(ParseError::InvalidRequestLine(request_line.to_string())),
    };
    let method = Method::from_token(method);

    let mut headers = Vec::new();
    loop {
        let line = reader.next_line()?;
        if line.is_empty() {
            break;
        }
        headers.push(line.to_string());
    }

    let body = if method == Method::POST {
        let mut body = String::new();
        loop {
            let line = reader.next_line()?;
            if line.is_empty() {
                break;
            }
            body.push_str(line);
        }
        Some(body)
    } else {
        None
    };

    let request = Request {
        method,
        uri: uri.to_string(),
        version: Version::from_token(version),
        headers,
        body,
        root_path: PathBuf::new(),
        raw_line: request_line.to_string(),
    };

    Ok((request, reader.consumed()))
}

struct LineReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> LineReader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn next_line(&mut self) -> Result<&'a str, ParseError> {
        let buf: &'a [u8] = self.buf;
        let rest = &buf[self.pos..];
        let newline = rest
            .iter()
            .position(|&b| b == b'\n')
            .ok_or(ParseError::Incomplete)?;

        let mut line = &rest[..newline];
        if let Some(stripped) = line.strip_suffix(b"\r") {
            line = stripped;
        }
        self.pos += newline + 1;

        std::str::from_utf8(line).map_err(|_| ParseError::InvalidEncoding)
    }

    fn consumed(&self) -> usize {
        self.pos
    }
}
