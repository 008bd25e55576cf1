//! Response sinks: where rendered output goes.
//!
//! The render path needs two capabilities from whatever owns the response: a
//! way to set the content-type header, and a byte stream for the body. The
//! [`ResponseSink`] trait captures exactly those two, so this crate stays
//! independent of any particular HTTP framework. [`MemorySink`] is a concrete
//! in-memory implementation for tests and for embedders that buffer responses.

use std::io;

/// Content-type header value written before every HTML body.
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// An output target that accepts a content-type header and body bytes.
///
/// Implementations must treat the first `set_content_type` call as
/// authoritative: once set (and certainly once body bytes have been written),
/// later calls are ignored. The render path sets the header exactly once,
/// before any body write.
pub trait ResponseSink: io::Write {
    /// Sets the response content-type. First call wins.
    fn set_content_type(&mut self, value: &str);
}

/// An in-memory response sink capturing the content-type and body.
///
/// # Example
///
/// ```rust
/// use htmlview::{MemorySink, ResponseSink, HTML_CONTENT_TYPE};
/// use std::io::Write;
///
/// let mut sink = MemorySink::new();
/// sink.set_content_type(HTML_CONTENT_TYPE);
/// sink.write_all(b"<p>hi</p>").unwrap();
///
/// assert_eq!(sink.content_type(), Some(HTML_CONTENT_TYPE));
/// assert_eq!(sink.body(), b"<p>hi</p>");
/// ```
#[derive(Debug, Default)]
pub struct MemorySink {
    content_type: Option<String>,
    body: Vec<u8>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the captured content-type, if one was set.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns the captured body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Returns the body as UTF-8, replacing invalid sequences.
    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

impl io::Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.body.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl ResponseSink for MemorySink {
    fn set_content_type(&mut self, value: &str) {
        if self.content_type.is_none() {
            self.content_type = Some(value.to_string());
        }
    }
}
