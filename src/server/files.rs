//! Static file resolution.
//!
//! Maps request URLs onto files below the site root: directory redirects,
//! index pages, generated directory listings, conditional `GET` and the
//! not-found page substitution.

use crate::server::reply::{escape_html, Reply, HTML_UTF8};
use chrono::{DateTime, NaiveDateTime, Utc};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tiny_http::{Header, Method};
use tracing::{debug, warn};

/// Index pages tried, in order, for a directory request.
const INDEX_PAGES: [&str; 2] = ["index.html", "index.htm"];

/// HTTP-date format (RFC 7231, always GMT).
const HTTP_DATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Serves files below a root directory.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
    fallback: PathBuf,
}

impl StaticFiles {
    /// Create a resolver for `root`, substituting the file at `fallback` on 404.
    pub fn new(root: PathBuf, fallback: PathBuf) -> Self {
        Self { root, fallback }
    }

    /// Build the reply for one request.
    pub fn resolve(&self, method: &Method, url: &str, headers: &[Header]) -> Reply {
        if !matches!(method, Method::Get | Method::Head) {
            return self
                .error_reply(405, None)
                .with_header("Allow", "GET, HEAD");
        }

        let (raw_path, query) = split_url(url);
        let request_path = decode_path(raw_path);
        let fs_path = self.translate_path(&request_path);
        let trailing_slash = request_path.ends_with('/');

        if fs_path.is_dir() {
            if !trailing_slash {
                let mut location = format!("{}/", raw_path);
                if let Some(query) = query {
                    location.push('?');
                    location.push_str(query);
                }
                return Reply::new(301).with_header("Location", encode_location(&location));
            }

            for index in INDEX_PAGES {
                let index_path = fs_path.join(index);
                if index_path.is_file() {
                    return self.serve_file(&index_path, headers);
                }
            }

            return self.list_directory(&fs_path, &request_path);
        }

        if trailing_slash {
            return self.error_reply(404, Some("File not found"));
        }

        self.serve_file(&fs_path, headers)
    }

    /// Error reply for `status`.
    ///
    /// A 404 is answered with the fallback page when it exists. Every other case, including a 404 without a fallback page, gets
    /// the default error page.
    pub fn error_reply(&self, status: u16, message: Option<&str>) -> Reply {
        if status == 404 {
            if let Some(reply) = self.fallback_reply() {
                return reply;
            }
        }

        Reply::error_page(status, message)
    }

    fn fallback_reply(&self) -> Option<Reply> {
        let path = &self.fallback;
        if !path.is_file() {
            return None;
        }

        match fs::read(path) {
            Ok(bytes) => Some(
                Reply::new(404)
                    .with_header("Content-Type", HTML_UTF8)
                    .with_bytes(bytes),
            ),
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Map a decoded URL path to a path below the root.
    ///
    /// `.` and empty segments are dropped and `..` removes the previous
    /// segment, so the result never leaves the root.
    pub fn translate_path(&self, request_path: &str) -> PathBuf {
        let mut segments: Vec<&str> = Vec::new();

        for segment in request_path.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                s if s.contains('\\') || s.contains('\0') => {}
                s => segments.push(s),
            }
        }

        segments
            .iter()
            .fold(self.root.clone(), |path, segment| path.join(segment))
    }

    fn serve_file(&self, path: &Path, headers: &[Header]) -> Reply {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                debug!("Cannot open {}: {}", path.display(), e);
                return self.error_reply(404, Some("File not found"));
            }
        };

        let metadata = match file.metadata() {
            Ok(metadata) => metadata,
            Err(e) => {
                debug!("Cannot stat {}: {}", path.display(), e);
                return self.error_reply(404, Some("File not found"));
            }
        };

        let last_modified = metadata.modified().ok().map(DateTime::<Utc>::from);

        if let Some(modified) = last_modified {
            if not_modified_since(headers, modified) {
                return Reply::new(304);
            }
        }

        let mut reply = Reply::new(200).with_header("Content-Type", content_type(path));
        if let Some(modified) = last_modified {
            reply = reply.with_header("Last-Modified", modified.format(HTTP_DATE).to_string());
        }

        reply.with_file(file, metadata.len())
    }

    fn list_directory(&self, dir: &Path, request_path: &str) -> Reply {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("Cannot list {}: {}", dir.display(), e);
                return self.error_reply(404, Some("No permission to list directory"));
            }
        };

        let mut names: Vec<(String, bool)> = entries
            .flatten()
            .map(|entry| {
                let name = entry.file_name().to_string_lossy().to_string();
                let is_dir = entry.path().is_dir();
                (name, is_dir)
            })
            .collect();
        names.sort_by_key(|(name, _)| name.to_lowercase());

        let title = format!("Directory listing for {}", escape_html(request_path));
        let mut page = String::new();
        page.push_str("<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n");
        page.push_str("<meta charset=\"utf-8\">\n");
        page.push_str(&format!("<title>{}</title>\n</head>\n<body>\n", title));
        page.push_str(&format!("<h1>{}</h1>\n<hr>\n<ul>\n", title));

        for (name, is_dir) in &names {
            let suffix = if *is_dir { "/" } else { "" };
            page.push_str(&format!(
                "<li><a href=\"{}{}\">{}{}</a></li>\n",
                urlencoding::encode(name),
                suffix,
                escape_html(name),
                suffix
            ));
        }

        page.push_str("</ul>\n<hr>\n</body>\n</html>\n");

        Reply::new(200)
            .with_header("Content-Type", HTML_UTF8)
            .with_bytes(page.into_bytes())
    }
}

/// Split a request target into path and query; the fragment is dropped.
fn split_url(url: &str) -> (&str, Option<&str>) {
    let url = url.split('#').next().unwrap_or(url);
    match url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (url, None),
    }
}

/// Percent-decode a URL path, replacing invalid UTF-8.
fn decode_path(raw: &str) -> String {
    match urlencoding::decode(raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => String::from_utf8_lossy(&urlencoding::decode_binary(raw.as_bytes())).into_owned(),
    }
}

/// Percent-encode everything outside printable ASCII so the value is a
/// valid header. Existing escapes and reserved characters pass through.
fn encode_location(location: &str) -> String {
    let mut encoded = String::with_capacity(location.len());
    let mut buf = [0u8; 4];
    for ch in location.chars() {
        if ch.is_ascii_graphic() {
            encoded.push(ch);
        } else {
            encoded.push_str(&urlencoding::encode(ch.encode_utf8(&mut buf)));
        }
    }
    encoded
}

/// Content type guessed from the file extension.
fn content_type(path: &Path) -> String {
    mime_guess::from_path(path).first_or_octet_stream().to_string()
}

/// Whether `If-Modified-Since` shows the client copy is current.
///
/// Ignored when `If-None-Match` is present or the date does not parse.
fn not_modified_since(headers: &[Header], modified: DateTime<Utc>) -> bool {
    if find_header(headers, "If-None-Match").is_some() {
        return false;
    }

    let since = match find_header(headers, "If-Modified-Since")
        .and_then(|value| NaiveDateTime::parse_from_str(value.trim(), HTTP_DATE).ok())
    {
        Some(since) => since.and_utc(),
        None => return false,
    };

    modified.timestamp() <= since.timestamp()
}

fn find_header<'a>(headers: &'a [Header], name: &'static str) -> Option<&'a str> {
    headers
        .iter()
        .find(|h| h.field.equiv(name))
        .map(|h| h.value.as_str())
}
