use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Version token emitted on every status line.
const HTTP_VERSION: &str = "HTTP/1.1";

/// Identifier sent in the `Server` header.
const SERVER_ID: &str = "hearth/0.1";

/// A composed response must serialize to fewer bytes than this. The composer
/// has no chunking or streaming, so exceeding the cap is a caller defect
/// surfaced as [`ComposeError::TooLarge`], not a per-request condition.
pub const MAX_RESPONSE_SIZE: usize = 2048;

/// RFC-1123 date layout for the `Date` header: `Sun, 06 Nov 1994 08:49:37 GMT`.
const HTTP_DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

/// HTTP status codes recognized by the composer.
///
/// This is the complete table; a code outside it cannot be represented, so
/// the composer never has to invent a reason phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 201 Created
    Created,
    /// 204 No Content
    NoContent,
    /// 304 Not Modified
    NotModified,
    /// 400 Bad Request
    BadRequest,
    /// 401 Unauthorized
    Unauthorized,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not Found
    NotFound,
    /// 408 Request Timeout
    RequestTimeout,
    /// 429 Too Many Requests
    TooManyRequests,
    /// 500 Internal Server Error
    InternalServerError,
    /// 501 Not Implemented
    NotImplemented,
    /// 505 HTTP Version Not Supported
    HttpVersionNotSupported,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use hearth::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Created => 201,
            StatusCode::NoContent => 204,
            StatusCode::NotModified => 304,
            StatusCode::BadRequest => 400,
            StatusCode::Unauthorized => 401,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::RequestTimeout => 408,
            StatusCode::TooManyRequests => 429,
            StatusCode::InternalServerError => 500,
            StatusCode::NotImplemented => 501,
            StatusCode::HttpVersionNotSupported => 505,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Created => "Created",
            StatusCode::NoContent => "No Content",
            StatusCode::NotModified => "Not Modified",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Unauthorized => "Unauthorized",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::RequestTimeout => "Request Timeout",
            StatusCode::TooManyRequests => "Too Many Requests",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::NotImplemented => "Not Implemented",
            StatusCode::HttpVersionNotSupported => "HTTP Version Not Supported",
        }
    }

    /// Looks up a code from its numeric form, for callers sitting at the
    /// boundary of the fixed table.
    pub fn from_u16(code: u16) -> Option<Self> {
        match code {
            200 => Some(StatusCode::Ok),
            201 => Some(StatusCode::Created),
            204 => Some(StatusCode::NoContent),
            304 => Some(StatusCode::NotModified),
            400 => Some(StatusCode::BadRequest),
            401 => Some(StatusCode::Unauthorized),
            403 => Some(StatusCode::Forbidden),
            404 => Some(StatusCode::NotFound),
            408 => Some(StatusCode::RequestTimeout),
            429 => Some(StatusCode::TooManyRequests),
            500 => Some(StatusCode::InternalServerError),
            501 => Some(StatusCode::NotImplemented),
            505 => Some(StatusCode::HttpVersionNotSupported),
            _ => None,
        }
    }
}

/// Composition failures. Both indicate a defect in the caller, not a
/// malformed client request; the connection aborts loudly instead of
/// sending a degraded response.
#[derive(Debug, PartialEq, Eq)]
pub enum ComposeError {
    /// `compose` was called before `set_params`.
    NoStatus,
    /// The serialized response reached [`MAX_RESPONSE_SIZE`] bytes.
    TooLarge { size: usize },
}

/// An HTTP response under construction, finalized by [`Response::compose`].
///
/// Headers keep insertion order and unique names. Once composed the
/// serialized buffer never changes: later setter or `compose` calls leave
/// it untouched.
#[derive(Debug)]
pub struct Response {
    status: Option<StatusCode>,
    details: String,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
    composed: Option<Vec<u8>>,
}

impl Response {
    /// Creates a response carrying the default headers:
    /// `Connection: Close`, `Date` (RFC-1123 GMT) and `Server`.
    pub fn new() -> Self {
        Self {
            status: None,
            details: String::new(),
            headers: default_headers(),
            body: Vec::new(),
            composed: None,
        }
    }

    /// Records the status code and a detail string.
    ///
    /// The detail is for operators (logging); it is never serialized into
    /// the response buffer.
    pub fn set_params(&mut self, status: StatusCode, details: impl Into<String>) {
        self.status = Some(status);
        self.details = details.into();
    }

    /// Sets or replaces a header in place, keeping names unique and
    /// preserving the position of an existing name.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(slot) = self.headers.iter_mut().find(|(n, _)| n.as_str() == name) {
            slot.1 = value;
        } else {
            self.headers.push((name.to_string(), value));
        }
    }

    pub fn set_body(&mut self, body: Vec<u8>) {
        self.body = body;
    }

    /// Finalizes the response buffer.
    ///
    /// Builds the status line, one `Name: Value` line per header, a blank
    /// line, then the body followed by a final line feed. Every line is
    /// terminated by a single LF, not CRLF. The first successful call
    /// freezes the buffer; re-invocation is a no-op.
    pub fn compose(&mut self) -> Result<(), ComposeError> {
        if self.composed.is_some() {
            return Ok(());
        }

        let Some(status) = self.status else {
            return Err(ComposeError::NoStatus);
        };

        let mut buf = Vec::new();

        buf.extend_from_slice(
            format!(
                "{} {} {}\n",
                HTTP_VERSION,
                status.as_u16(),
                status.reason_phrase()
            )
            .as_bytes(),
        );

        for (name, value) in &self.headers {
            buf.extend_from_slice(name.as_bytes());
            buf.extend_from_slice(b": ");
            buf.extend_from_slice(value.as_bytes());
            buf.push(b'\n');
        }

        buf.push(b'\n');
        buf.extend_from_slice(&self.body);
        buf.push(b'\n');

        if buf.len() >= MAX_RESPONSE_SIZE {
            return Err(ComposeError::TooLarge { size: buf.len() });
        }

        self.composed = Some(buf);
        Ok(())
    }

    /// The finalized buffer; empty until `compose` has succeeded.
    pub fn as_bytes(&self) -> &[u8] {
        self.composed.as_deref().unwrap_or_default()
    }

    pub fn is_composed(&self) -> bool {
        self.composed.is_some()
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Operator-facing detail recorded with the status.
    pub fn details(&self) -> &str {
        &self.details
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

fn default_headers() -> Vec<(String, String)> {
    vec![
        ("Connection".to_string(), "Close".to_string()),
        ("Date".to_string(), http_date()),
        ("Server".to_string(), SERVER_ID.to_string()),
    ]
}

fn http_date() -> String {
    OffsetDateTime::now_utc()
        .format(&HTTP_DATE_FORMAT)
        .unwrap_or_default()
}
