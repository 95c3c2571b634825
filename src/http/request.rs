use std::fmt;
use std::path::PathBuf;

/// HTTP request methods.
///
/// Every method token the server knows about gets its own variant so the
/// response builder can match exhaustively. Tokens outside that set are
/// `UNRECOGNIZED`, which is answered with 400 rather than rejected by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// POST - Submit data (body read up to the next blank line)
    POST,
    PUT,
    DELETE,
    OPTIONS,
    TRACE,
    CONNECT,
    PATCH,
    /// Any token not listed above
    UNRECOGNIZED,
}

impl Method {
    /// Maps a request-line token to a method. Matching is case-sensitive.
    ///
    /// # Example
    ///
    /// ```
    /// # use conditional_http::http::request::Method;
    /// assert_eq!(Method::from_token("GET"), Method::GET);
    /// assert_eq!(Method::from_token("get"), Method::UNRECOGNIZED);
    /// ```
    pub fn from_token(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "HEAD" => Method::HEAD,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            "OPTIONS" => Method::OPTIONS,
            "TRACE" => Method::TRACE,
            "CONNECT" => Method::CONNECT,
            "PATCH" => Method::PATCH,
            _ => Method::UNRECOGNIZED,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::OPTIONS => "OPTIONS",
            Method::TRACE => "TRACE",
            Method::CONNECT => "CONNECT",
            Method::PATCH => "PATCH",
            Method::UNRECOGNIZED => "UNRECOGNIZED",
        }
    }
}

/// Protocol version from the request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Version {
    Http10,
    Http11,
    Other(String),
}

impl Version {
    pub fn from_token(s: &str) -> Self {
        match s {
            "HTTP/1.0" => Version::Http10,
            "HTTP/1.1" => Version::Http11,
            other => Version::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Version::Http10 => "HTTP/1.0",
            Version::Http11 => "HTTP/1.1",
            Version::Other(token) => token,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a parsed HTTP request from a client.
///
/// Headers are kept as the raw `Name: value` lines in arrival order. Lookup
/// is a case-sensitive prefix match where the first matching line wins; no
/// case-folding map is built.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// The request target exactly as sent (e.g. "/index.html")
    pub uri: String,
    pub version: Version,
    /// Raw header lines, insertion order preserved
    pub headers: Vec<String>,
    /// Only populated for POST: lines up to the next blank line, joined without delimiters
    pub body: Option<String>,
    /// Directory the URI is resolved against. Not part of the wire data.
    pub root_path: PathBuf,
    /// First line as received, so unrecognized method tokens survive for logs
    pub raw_line: String,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Option<Method>,
    uri: Option<String>,
    version: Option<Version>,
    headers: Vec<String>,
    body: Option<String>,
    root_path: PathBuf,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            uri: None,
            version: None,
            headers: Vec::new(),
            body: None,
            root_path: PathBuf::new(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    pub fn version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    /// Appends a `name: value` header line.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push(format!("{}: {}", name, value));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn root_path(mut self, root: impl Into<PathBuf>) -> Self {
        self.root_path = root.into();
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        let method = self.method.ok_or("method missing")?;
        let uri = self.uri.ok_or("uri missing")?;
        let version = self.version.unwrap_or(Version::Http11);
        let raw_line = format!("{} {} {}", method.as_str(), uri, version);

        Ok(Request {
            method,
            uri,
            version,
            headers: self.headers,
            body: self.body,
            root_path: self.root_path,
            raw_line,
        })
    }
}

impl Request {
    /// Attaches the directory this request is resolved against.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root_path = root.into();
        self
    }

    /// Retrieves a header value.
    ///
    /// The first raw line starting with `name` (case-sensitive) is used and its
    /// value is everything after the first colon, trimmed. A matching line
    /// without a colon yields `Some("")`.
    ///
    /// # Returns
    ///
    /// `None` if no line starts with `name`.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|line| line.starts_with(name))
            .map(|line| line.split_once(':').map_or("", |(_, value)| value.trim()))
    }

    /// Splits a comma-separated entity-tag header into trimmed tags.
    pub fn tag_list(&self, name: &str) -> Option<Vec<&str>> {
        self.header(name)
            .map(|value| value.split(',').map(str::trim).collect())
    }

    /// Determines whether the connection should remain open after the response.
    ///
    /// HTTP/1.1 stays open unless `Connection: close`; HTTP/1.0 stays open only
    /// with `Connection: keep-alive`. Values compare case-insensitively. Any
    /// other version closes.
    pub fn keep_alive(&self) -> bool {
        let connection = self.header("Connection");
        match self.version {
            Version::Http11 => !connection.is_some_and(|v| v.eq_ignore_ascii_case("close")),
            Version::Http10 => connection.is_some_and(|v| v.eq_ignore_ascii_case("keep-alive")),
            Version::Other(_) => false,
        }
    }

    /// The request line as the client sent it, for logging.
    pub fn request_line(&self) -> &str {
        &self.raw_line
    }
}
