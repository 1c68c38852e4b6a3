use std::collections::HashMap;

/// HTTP request methods.
///
/// Represents the HTTP method/verb of a request. The server serves GET,
/// accepts HEAD and POST, and folds everything else into `BAD`, which the
/// handler answers with 501 Not Implemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// POST - Submit data (accepted, body is not processed)
    POST,
    /// Anything unrecognized, including an absent method
    BAD,
}

impl Method {
    /// Maps a request-line token to a method.
    ///
    /// The token is ASCII-uppercased before matching, so `get` and `GET` are
    /// equivalent. Unrecognized tokens map to `BAD` rather than an error.
    ///
    /// # Example
    ///
    /// ```
    /// # use hearth::http::request::Method;
    /// assert_eq!(Method::from_token("GET"), Method::GET);
    /// assert_eq!(Method::from_token("get"), Method::GET);
    /// assert_eq!(Method::from_token("PUT"), Method::BAD);
    /// ```
    pub fn from_token(token: &str) -> Self {
        match token.to_ascii_uppercase().as_str() {
            "GET" => Method::GET,
            "HEAD" => Method::HEAD,
            "POST" => Method::POST,
            _ => Method::BAD,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
            Method::BAD => "BAD",
        }
    }
}

/// Represents a parsed HTTP request from a client.
///
/// Contains the request-line fields and headers extracted from one received
/// buffer, plus the raw buffer itself. Immutable once parsing has produced it.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET, HEAD, POST or BAD)
    pub method: Method,
    /// The request path as received, untrusted (e.g. "/index.html")
    pub path: String,
    /// HTTP version token (typically "HTTP/1.1")
    pub version: String,
    /// Request headers as key-value pairs; duplicate names last-write-wins
    pub headers: HashMap<String, String>,
    /// The received bytes the request was parsed from, truncated at the
    /// first NUL
    pub raw: Vec<u8>,
}

impl Request {
    /// Retrieves a header value by name.
    ///
    /// Names are matched exactly as they appeared on the wire.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(|v| v.as_str())
    }

    /// True when parsing produced no usable request line (method unset and
    /// path empty).
    ///
    /// The connection layer uses this to observe and log empty requests; the
    /// parser itself keeps no counters.
    pub fn is_empty(&self) -> bool {
        self.method == Method::BAD && self.path.is_empty()
    }
}
