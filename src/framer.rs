//! Byte-to-line framing for the NDJSON stream.
//!
//! Network chunks arrive at arbitrary boundaries: a chunk may end in the
//! middle of a record, or even in the middle of a multi-byte UTF-8
//! character. [`LineFramer`] buffers the incomplete tail across calls and
//! emits only terminator-completed lines, in arrival order. The output is
//! therefore independent of how the bytes were chunked in transit.

/// Stateful decoder turning arbitrary byte chunks into complete text lines.
#[derive(Debug, Default)]
pub struct LineFramer {
    buf: Vec<u8>,
}

impl LineFramer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one network chunk; returns all lines completed by it.
    ///
    /// Splitting happens on raw bytes: `0x0A` never occurs inside a
    /// multi-byte UTF-8 sequence, so a character split across chunks stays
    /// intact in the buffer until its line terminator arrives. Lines that
    /// are empty or whitespace-only are discarded.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(chunk);

        let mut lines = Vec::new();
        let mut start = 0;
        while let Some(rel) = self.buf[start..].iter().position(|&b| b == b'\n') {
            let end = start + rel;
            if let Some(line) = to_line(&self.buf[start..end]) {
                lines.push(line);
            }
            start = end + 1;
        }
        self.buf.drain(..start);

        lines
    }

    /// Drain the unterminated trailing fragment, if any.
    ///
    /// Used only for end-of-stream diagnostics. The fragment may be a
    /// truncated record and must never be parsed as one.
    pub fn flush(&mut self) -> Option<String> {
        if self.buf.is_empty() {
            return None;
        }
        let rest = std::mem::take(&mut self.buf);
        Some(String::from_utf8_lossy(&rest).into_owned())
    }
}

/// Decode one terminator-completed line, stripping an optional `\r` and
/// dropping whitespace-only lines.
fn to_line(bytes: &[u8]) -> Option<String> {
    let bytes = match bytes.last() {
        Some(b'\r') => &bytes[..bytes.len() - 1],
        _ => bytes,
    };
    let line = String::from_utf8_lossy(bytes);
    if line.trim().is_empty() {
        return None;
    }
    Some(line.into_owned())
}
