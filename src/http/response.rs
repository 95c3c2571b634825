use std::time::SystemTime;

use crate::files::validators::http_date;
use crate::http::request::Version;

/// Value sent in the `Server` header of every response.
pub const SERVER_NAME: &str = "SimpleWebServer";

/// HTTP status codes the server can produce.
///
/// - `Ok` (200): Request successful
/// - `NotModified` (304): Cached representation is still current
/// - `BadRequest` (400): Malformed request, unknown method or I/O failure
/// - `NotFound` (404): Resource not found
/// - `PreconditionFailed` (412): `If-Match` did not hold
/// - `NotImplemented` (501): Method known but not supported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 304 Not Modified
    NotModified,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 412 Precondition Failed
    PreconditionFailed,
    /// 501 Not Implemented
    NotImplemented,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use conditional_http::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::PreconditionFailed.as_u16(), 412);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::NotModified => 304,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::PreconditionFailed => 412,
            StatusCode::NotImplemented => 501,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NotModified => "Not Modified",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::PreconditionFailed => "Precondition Failed",
            StatusCode::NotImplemented => "Not Implemented",
        }
    }

    pub fn from_u16(code: u16) -> Option<Self> {
        match code {
            200 => Some(StatusCode::Ok),
            304 => Some(StatusCode::NotModified),
            400 => Some(StatusCode::BadRequest),
            404 => Some(StatusCode::NotFound),
            412 => Some(StatusCode::PreconditionFailed),
            501 => Some(StatusCode::NotImplemented),
            _ => None,
        }
    }

    /// Canned body text, e.g. `404 Not Found`.
    pub fn canned_body(&self) -> String {
        format!("{} {}", self.as_u16(), self.reason_phrase())
    }
}

/// Represents a complete HTTP response ready to be sent to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Protocol version written on the status line
    pub version: Version,
    pub status: StatusCode,
    /// Headers in the order they are written
    pub headers: Vec<(String, String)>,
    /// `None` for HEAD and for bodiless statuses
    pub body: Option<Vec<u8>>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "text/html")
///     .body(b"<html></html>".to_vec())
///     .build();
/// ```
pub struct ResponseBuilder {
    version: Version,
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    content_length: bool,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            version: Version::Http11,
            status,
            headers: Vec::new(),
            body: None,
            content_length: true,
        }
    }

    /// Creates a builder preloaded with the headers every response carries:
    /// `Date` (RFC 1123, local time) followed by `Server`.
    pub fn standard(version: &Version, status: StatusCode) -> Self {
        Self::new(status)
            .version(version.clone())
            .header("Date", http_date(SystemTime::now()))
            .header("Server", SERVER_NAME)
    }

    /// Sets the version for the status line. Versions other than HTTP/1.0
    /// and HTTP/1.1 are answered as HTTP/1.0.
    pub fn version(mut self, version: Version) -> Self {
        self.version = match version {
            Version::Other(_) => Version::Http10,
            known => known,
        };
        self
    }

    /// Adds a header, replacing the value in place if the name is already set.
    /// Names compare case-insensitively.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&key))
        {
            Some(existing) => existing.1 = value,
            None => self.headers.push((key, value)),
        }
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Skips the automatic `Content-Length`. Used for HEAD, where a length
    /// of 0 would misstate the size of the entity.
    pub fn without_content_length(mut self) -> Self {
        self.content_length = false;
        self
    }

    /// Builds the final Response.
    ///
    /// Appends `Content-Length` (0 when there is no body) unless already
    /// present or disabled with [`without_content_length`](Self::without_content_length).
    pub fn build(self) -> Response {
        let has_length = self
            .headers
            .iter()
            .any(|(k, _)| k.eq_ignore_ascii_case("Content-Length"));

        let mut headers = self.headers;
        if self.content_length && !has_length {
            let len = self.body.as_ref().map_or(0, Vec::len);
            headers.push(("Content-Length".to_string(), len.to_string()));
        }

        Response {
            version: self.version,
            status: self.status,
            headers,
            body: self.body,
        }
    }
}

impl Response {
    /// Looks up a header by exact name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Standard headers plus the status's canned text as body.
    pub fn canned(version: &Version, status: StatusCode) -> Self {
        ResponseBuilder::standard(version, status)
            .body(status.canned_body())
            .build()
    }

    pub fn bad_request(version: &Version) -> Self {
        Self::canned(version, StatusCode::BadRequest)
    }

    pub fn not_found(version: &Version) -> Self {
        Self::canned(version, StatusCode::NotFound)
    }

    pub fn not_implemented(version: &Version) -> Self {
        Self::canned(version, StatusCode::NotImplemented)
    }
}
