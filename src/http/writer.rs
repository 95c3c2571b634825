use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::ParseError;
use crate::http::request::Version;
use crate::http::response::{Response, StatusCode};

/// Serializes a response: status line and headers each ending in CRLF, a
/// blank line, the body, then one trailing CRLF that older clients of this
/// server expect after the body.
pub fn serialize_response(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::new();

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        resp.version,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    for (k, v) in &resp.headers {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    if let Some(body) = &resp.body {
        buf.extend_from_slice(body);
    }

    buf.extend_from_slice(b"\r\n");

    buf
}

/// Reads back a response produced by [`serialize_response`].
///
/// The body is delimited by `Content-Length`; the trailing CRLF is consumed
/// if present. Returns the response and the number of bytes used.
pub fn parse_response(buf: &[u8]) -> Result<(Response, usize), ParseError> {
    let head_end = buf
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .ok_or(ParseError::Incomplete)?;

    let head = std::str::from_utf8(&buf[..head_end]).map_err(|_| ParseError::InvalidEncoding)?;
    let mut lines = head.split("\r\n");

    let status_line = lines.next().unwrap_or_default();
    let invalid = || ParseError::InvalidRequestLine(status_line.to_string());
    let mut parts = status_line.splitn(3, ' ');
    let version = Version::from_token(parts.next().ok_or_else(invalid)?);
    let status = parts
        .next()
        .and_then(|code| code.parse().ok())
        .and_then(StatusCode::from_u16)
        .ok_or_else(invalid)?;

    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(": "))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("Content-Length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    let body_start = head_end + 4;
    let body_end = body_start + content_length;
    if buf.len() < body_end {
        return Err(ParseError::Incomplete);
    }

    let mut consumed = body_end;
    if buf[body_end..].starts_with(b"\r\n") {
        consumed += 2;
    }

    let body = (content_length > 0).then(|| buf[body_start..body_end].to_vec());

    Ok((
        Response {
            version,
            status,
            headers,
            body,
        },
        consumed,
    ))
}

pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response),
            written: 0,
        }
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}
