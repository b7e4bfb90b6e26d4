//! Responses produced by the preview server.
//!
//! A [`Reply`] is built without touching the connection so request handling
//! can be tested on its own; it is converted to a `tiny_http` response at the
//! last moment.

use std::fs::File;
use std::io::{Cursor, Read};
use tiny_http::{Header, Response, ResponseBox, StatusCode};
use tracing::warn;

/// Content type of generated HTML pages and of the not-found page.
pub const HTML_UTF8: &str = "text/html; charset=utf-8";

/// Content type of the default error page.
const ERROR_CONTENT_TYPE: &str = "text/html;charset=utf-8";

/// Response body.
#[derive(Debug)]
pub enum Body {
    Empty,
    Bytes(Vec<u8>),
    File { file: File, len: u64 },
}

/// A response ready to be sent.
#[derive(Debug)]
pub struct Reply {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

impl Reply {
    /// An empty reply with the given status.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Body::Empty,
        }
    }

    /// Add a header.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    /// Replace the body with in-memory bytes.
    pub fn with_bytes(mut self, bytes: Vec<u8>) -> Self {
        self.body = Body::Bytes(bytes);
        self
    }

    /// Replace the body with an open file of known length.
    pub fn with_file(mut self, file: File, len: u64) -> Self {
        self.body = Body::File { file, len };
        self
    }

    /// The standard HTML error page for `status`.
    ///
    /// `message` defaults to the reason phrase of the status.
    pub fn error_page(status: u16, message: Option<&str>) -> Self {
        let reason = reason_phrase(status);
        let message = message.unwrap_or(reason);

        let page = format!(
            "<!DOCTYPE HTML>\n\
             <html lang=\"en\">\n\
             \x20   <head>\n\
             \x20       <meta charset=\"utf-8\">\n\
             \x20       <title>Error response</title>\n\
             \x20   </head>\n\
             \x20   <body>\n\
             \x20       <h1>Error response</h1>\n\
             \x20       <p>Error code: {status}</p>\n\
             \x20       <p>Message: {message}.</p>\n\
             \x20       <p>Error code explanation: {status} - {reason}.</p>\n\
             \x20   </body>\n\
             </html>\n",
            status = status,
            message = escape_html(message),
            reason = escape_html(reason),
        );

        Reply::new(status)
            .with_header("Content-Type", ERROR_CONTENT_TYPE)
            .with_bytes(page.into_bytes())
    }

    /// First value of header `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Read the whole body into memory.
    pub fn body_bytes(self) -> std::io::Result<Vec<u8>> {
        match self.body {
            Body::Empty => Ok(Vec::new()),
            Body::Bytes(bytes) => Ok(bytes),
            Body::File { mut file, .. } => {
                let mut buf = Vec::new();
                file.read_to_end(&mut buf)?;
                Ok(buf)
            }
        }
    }

    /// Convert to a `tiny_http` response.
    ///
    /// Headers `tiny_http` refuses are logged and dropped. Bodies are left in
    /// place for `HEAD`; `tiny_http` omits them itself.
    pub fn into_response(self) -> ResponseBox {
        let headers: Vec<Header> = self
            .headers
            .iter()
            .filter_map(|(name, value)| match Header::from_bytes(name.as_bytes(), value.as_bytes()) {
                Ok(header) => Some(header),
                Err(()) => {
                    warn!("Dropping invalid header {}: {}", name, value);
                    None
                }
            })
            .collect();

        let (data, len): (Box<dyn Read + Send>, usize) = match self.body {
            Body::Empty => (Box::new(std::io::empty()), 0),
            Body::Bytes(bytes) => {
                let len = bytes.len();
                (Box::new(Cursor::new(bytes)), len)
            }
            Body::File { file, len } => (Box::new(file), len as usize),
        };

        Response::new(StatusCode(self.status), headers, data, Some(len), None)
    }
}

/// Standard reason phrase for a status code.
pub fn reason_phrase(status: u16) -> &'static str {
    StatusCode(status).default_reason_phrase()
}

/// Escape text for inclusion in HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_page_contents() {
        let reply = Reply::error_page(404, Some("File not found"));
        assert_eq!(reply.status, 404);
        assert_eq!(reply.header("content-type"), Some("text/html;charset=utf-8"));

        let body = String::from_utf8(reply.body_bytes().unwrap()).unwrap();
        assert!(body.contains("Error code: 404"));
        assert!(body.contains("Message: File not found."));
        assert!(body.contains("404 - Not Found"));
    }

    #[test]
    fn test_error_page_default_message() {
        let reply = Reply::error_page(405, None);
        let body = String::from_utf8(reply.body_bytes().unwrap()).unwrap();
        assert!(body.contains("Message: Method Not Allowed."));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<a href=\"x\">&'</a>"),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_into_response_status() {
        let response = Reply::new(301)
            .with_header("Location", "/docs/")
            .into_response();
        assert_eq!(response.status_code(), StatusCode(301));
    }
}
