//! MIME type detection.
//! Magic-number sniffing via `infer`, with a text/binary fallback for content
//! that has no signature.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// How much of the file is inspected.
const SNIFF_LEN: u64 = 8192;

pub const EMPTY_MIME: &str = "application/x-empty";
pub const TEXT_MIME: &str = "text/plain";
pub const BINARY_MIME: &str = "application/octet-stream";

/// Primary MIME type of the file at `path` (no parameters).
pub fn detect_mime_type(path: &Path) -> io::Result<String> {
    let mut sample = Vec::with_capacity(SNIFF_LEN as usize);
    File::open(path)?.take(SNIFF_LEN).read_to_end(&mut sample)?;
    Ok(mime_from_bytes(&sample))
}

pub(crate) fn mime_from_bytes(sample: &[u8]) -> String {
    if sample.is_empty() {
        return EMPTY_MIME.to_string();
    }
    if let Some(kind) = infer::get(sample) {
        return primary_type(kind.mime_type()).to_string();
    }
    if looks_like_text(sample) {
        TEXT_MIME.to_string()
    } else {
        BINARY_MIME.to_string()
    }
}

/// "text/plain; charset=us-ascii" -> "text/plain"
fn primary_type(mime: &str) -> &str {
    mime.split(';').next().unwrap_or(mime).trim()
}

fn looks_like_text(sample: &[u8]) -> bool {
    if sample.contains(&0) {
        return false;
    }
    match std::str::from_utf8(sample) {
        Ok(_) => true,
        // a multi-byte sequence cut off by the sample boundary is still text
        Err(e) => e.error_len().is_none(),
    }
}
