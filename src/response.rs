//! Outgoing response sink.
//!
//! [`ResponseWriter`] is the mutable half of a `serve` call. Every layer of
//! the chain writes into the same sink, so state accumulates as the request
//! travels inward: an outer middleware can set a header, an inner handler
//! the body, and both end up on the wire. The sink is a plain buffer — the
//! host decides when (and whether) to flush it, via [`write_to`] or by
//! pulling the parts apart with [`into_parts`].
//!
//! [`write_to`]: ResponseWriter::write_to
//! [`into_parts`]: ResponseWriter::into_parts

use http::StatusCode;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// An in-progress HTTP response.
///
/// Starts as `200 OK` with no headers and an empty body.
///
/// ```rust
/// use strata::{ResponseWriter, StatusCode};
///
/// let mut res = ResponseWriter::new();
/// res.set_status(StatusCode::CREATED);
/// res.set_header("location", "/users/42");
/// res.write(br#"{"id":42}"#);
/// ```
pub struct ResponseWriter {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl ResponseWriter {
    pub fn new() -> Self {
        Self { status: StatusCode::OK, headers: Vec::new(), body: Vec::new() }
    }

    pub fn status(&self) -> StatusCode { self.status }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    /// Sets a header, replacing an existing one of the same name
    /// (ASCII case-insensitive).
    pub fn set_header(&mut self, name: &str, value: &str) {
        match self.headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
            Some(slot) => slot.1 = value.to_owned(),
            None => self.headers.push((name.to_owned(), value.to_owned())),
        }
    }

    /// Appends bytes to the body.
    pub fn write(&mut self, bytes: &[u8]) {
        self.body.extend_from_slice(bytes);
    }

    /// Finalizes the response as a plain-text error.
    ///
    /// Overwrites the status and any partial body with the status code's
    /// canonical reason phrase, and pins the content type. Headers already
    /// set are kept — an outer layer's request id or CORS headers still
    /// belong on an error response.
    pub fn error(&mut self, status: StatusCode) {
        self.status = status;
        self.set_header("content-type", "text/plain; charset=utf-8");
        self.body.clear();
        self.body.extend_from_slice(status.canonical_reason().unwrap_or("").as_bytes());
    }

    /// Consumes the sink, yielding `(status, headers, body)` for hosts that
    /// map responses onto their own types.
    pub fn into_parts(self) -> (StatusCode, Vec<(String, String)>, Vec<u8>) {
        (self.status, self.headers, self.body)
    }

    /// Serializes the response as HTTP/1.1 onto `writer`.
    pub async fn write_to<W: AsyncWrite + Unpin>(self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(
            format!(
                "HTTP/1.1 {} {}\r\n",
                self.status.as_u16(),
                self.status.canonical_reason().unwrap_or(""),
            ).as_bytes(),
        ).await?;
        writer.write_all(
            format!("content-length: {}\r\n", self.body.len()).as_bytes(),
        ).await?;
        for (name, value) in &self.headers {
            writer.write_all(format!("{name}: {value}\r\n").as_bytes()).await?;
        }
        writer.write_all(b"\r\n").await?;
        writer.write_all(&self.body).await?;
        writer.flush().await
    }
}

impl Default for ResponseWriter {
    fn default() -> Self { Self::new() }
}
