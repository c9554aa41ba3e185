// ABOUTME: Input decoding for raw HTML bytes.
// ABOUTME: Resolves the charset from a hint, a <meta> declaration or chardetng, and re-encodes output to match.

use std::borrow::Cow;
use std::fs;
use std::io::Read;
use std::path::Path;

use encoding_rs::Encoding;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::DistillError;

/// How far into the document to look for a `<meta>` charset declaration.
pub const META_SNIFF_BYTES: usize = 1024;

static META_CHARSET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?\s*([A-Za-z0-9_:.\-]+)"#).unwrap()
});

/// A decoded HTML document together with the encoding it arrived in.
#[derive(Debug, Clone)]
pub struct Resource {
    text: String,
    encoding: &'static Encoding,
}

impl Resource {
    /// Decode raw bytes. `charset_hint` may be a bare label (`iso-8859-1`) or
    /// a Content-Type value (`text/html; charset=iso-8859-1`).
    pub fn from_bytes(body: &[u8], charset_hint: Option<&str>) -> Self {
        let encoding = resolve_encoding(body, charset_hint);
        let (decoded, used, _) = encoding.decode(body);
        debug!(encoding = used.name(), bytes = body.len(), "decoded input");
        Self {
            text: decoded.into_owned(),
            encoding: used,
        }
    }

    pub fn from_reader(mut reader: impl Read, charset_hint: Option<&str>) -> Result<Self, DistillError> {
        let mut body = Vec::new();
        reader
            .read_to_end(&mut body)
            .map_err(|e| DistillError::io("read input", Some(e.into())))?;
        Ok(Self::from_bytes(&body, charset_hint))
    }

    pub fn from_path(path: impl AsRef<Path>, charset_hint: Option<&str>) -> Result<Self, DistillError> {
        let path = path.as_ref();
        let body = fs::read(path)
            .map_err(|e| DistillError::io(format!("read {}", path.display()), Some(e.into())))?;
        Ok(Self::from_bytes(&body, charset_hint))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Encode output into the input's encoding. Characters the encoding
    /// cannot represent become numeric character references.
    pub fn encode<'a>(&self, output: &'a str) -> Cow<'a, [u8]> {
        let (bytes, _, _) = self.encoding.encode(output);
        bytes
    }
}

fn resolve_encoding(body: &[u8], charset_hint: Option<&str>) -> &'static Encoding {
    let hinted = charset_hint
        .map(|hint| extract_charset(hint).unwrap_or_else(|| hint.trim().to_lowercase()))
        .and_then(|label| Encoding::for_label(label.as_bytes()));
    if let Some(encoding) = hinted {
        return encoding;
    }

    if let Some(encoding) = sniff_meta_charset(body).and_then(|l| Encoding::for_label(l.as_bytes())) {
        return encoding;
    }

    // Use chardetng for detection
    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(body, true);
    detector.guess(None, true)
}

/// Extract charset value from a Content-Type header.
fn extract_charset(content_type: &str) -> Option<String> {
    let lower = content_type.to_lowercase();
    for part in lower.split(';') {
        let trimmed = part.trim();
        if let Some(charset) = trimmed.strip_prefix("charset=") {
            let charset = charset.trim_matches('"').trim_matches('\'');
            return Some(charset.to_string());
        }
    }
    None
}

/// Find a `<meta charset>` or `<meta http-equiv>` declaration near the top of the document.
fn sniff_meta_charset(body: &[u8]) -> Option<String> {
    let head = &body[..body.len().min(META_SNIFF_BYTES)];
    let head = String::from_utf8_lossy(head);
    META_CHARSET_RE
        .captures(&head)
        .map(|caps| caps[1].to_lowercase())
}
