//! Request body and query string encoders
//!
//! - Query strings: RFC 3986 percent-encoding (unreserved characters kept)
//! - Form bodies: `application/x-www-form-urlencoded` (space as `+`)
//! - Multipart bodies: random boundary declared in the content type

use crate::types::{OrderedParams, ParamValue};
use bytes::{BufMut, Bytes, BytesMut};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Everything except the RFC 3986 unreserved set
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const BOUNDARY_LEN: usize = 32;

/// Percent-encode a single query component
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, QUERY_COMPONENT).to_string()
}

/// Build a query string (without the leading `?`)
///
/// Null and empty values are dropped entirely.
pub fn build_query(params: &OrderedParams<ParamValue>) -> String {
    params
        .iter()
        .filter_map(|(key, value)| {
            value
                .render()
                .map(|v| format!("{}={}", encode_component(key), encode_component(&v)))
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Build an `application/x-www-form-urlencoded` body
pub fn build_form(params: &OrderedParams<ParamValue>) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in params.iter() {
        if let Some(v) = value.render() {
            serializer.append_pair(key, &v);
        }
    }
    serializer.finish()
}

/// Generate a random multipart boundary
pub fn random_boundary() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(BOUNDARY_LEN)
        .map(char::from)
        .collect()
}

/// Incrementally built `multipart/form-data` body
#[derive(Debug)]
pub struct MultipartBody {
    boundary: String,
    buf: BytesMut,
}

impl MultipartBody {
    /// Start a body with a fresh random boundary
    pub fn new() -> Self {
        Self::with_boundary(random_boundary())
    }

    /// Start a body with a fixed boundary
    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            buf: BytesMut::new(),
        }
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Value for the `Content-Type` header
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Append a plain text field
    pub fn add_field(&mut self, name: &str, value: &str) {
        self.open_part();
        self.buf.put_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", escape_quotes(name))
                .as_bytes(),
        );
        self.buf.put_slice(value.as_bytes());
        self.buf.put_slice(b"\r\n");
    }

    /// Append a file part
    pub fn add_file(&mut self, name: &str, filename: &str, contents: &[u8]) {
        self.open_part();
        self.buf.put_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                escape_quotes(name),
                escape_quotes(filename)
            )
            .as_bytes(),
        );
        self.buf
            .put_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        self.buf.put_slice(contents);
        self.buf.put_slice(b"\r\n");
    }

    /// Close the body and return its bytes
    pub fn finish(mut self) -> Bytes {
        self.buf
            .put_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        self.buf.freeze()
    }

    fn open_part(&mut self) {
        self.buf
            .put_slice(format!("--{}\r\n", self.boundary).as_bytes());
    }
}

impl Default for MultipartBody {
    fn default() -> Self {
        Self::new()
    }
}

fn escape_quotes(value: &str) -> String {
    value.replace('"', "%22")
}
