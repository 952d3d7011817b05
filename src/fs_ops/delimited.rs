//! Delimited (CSV-style) record reading from an open handle.
//!
//! One call reads one record starting at the current position and leaves the
//! handle positioned right after the record terminator, so record reads can be
//! mixed with `read`/`seek`/`tell`. Data is pulled in chunks and the unconsumed
//! tail is given back with a relative seek.

use std::io::{self, Read, Seek, SeekFrom};

const CHUNK: usize = 4096;

/// Separator / enclosure / escape bytes describing a record format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    pub separator: u8,
    pub enclosure: u8,
    /// `None` disables escaping; doubled enclosures still work.
    pub escape: Option<u8>,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            separator: b',',
            enclosure: b'"',
            escape: Some(b'\\'),
        }
    }
}

impl Dialect {
    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_enclosure(mut self, enclosure: u8) -> Self {
        self.enclosure = enclosure;
        self
    }

    pub fn with_escape(mut self, escape: Option<u8>) -> Self {
        self.escape = escape;
        self
    }

    /// Escape byte, unless it is the enclosure itself (then doubling is the only escape).
    fn active_escape(&self) -> Option<u8> {
        self.escape.filter(|e| *e != self.enclosure)
    }
}

/// Tracks whether a newline would end the record.
///
/// An enclosure byte only opens a quoted section at the start of a field, or
/// right after a closing enclosure (a doubled enclosure). Anywhere else it is
/// literal text, the same rule `split_fields` applies.
struct Scanner {
    in_enclosure: bool,
    escaped: bool,
    at_field_start: bool,
    just_closed: bool,
}

impl Default for Scanner {
    fn default() -> Self {
        Self {
            in_enclosure: false,
            escaped: false,
            at_field_start: true,
            just_closed: false,
        }
    }
}

impl Scanner {
    /// Feed one byte; true when it terminates the record.
    fn feed(&mut self, b: u8, dialect: &Dialect) -> bool {
        if self.escaped {
            self.escaped = false;
            return false;
        }
        if self.in_enclosure {
            if Some(b) == dialect.active_escape() {
                self.escaped = true;
            } else if b == dialect.enclosure {
                self.in_enclosure = false;
                self.just_closed = true;
            }
            return false;
        }
        if b == dialect.enclosure && (self.at_field_start || self.just_closed) {
            self.in_enclosure = true;
            self.at_field_start = false;
            self.just_closed = false;
            return false;
        }
        self.just_closed = false;
        self.at_field_start = b == dialect.separator;
        b == b'\n'
    }
}

/// One parsed record; `hit_end` is set when the stream ran out before a terminator.
#[derive(Debug)]
pub(crate) struct Record {
    pub fields: Vec<String>,
    pub hit_end: bool,
}

/// Read one record. Ok(None) when the reader is already at end of stream.
pub(crate) fn read_record<R: Read + Seek>(
    reader: &mut R,
    dialect: &Dialect,
) -> io::Result<Option<Record>> {
    let mut raw = Vec::new();
    let mut scanner = Scanner::default();
    let mut chunk = [0u8; CHUNK];

    loop {
        let n = reader.read(&mut chunk)?;
        if n == 0 {
            if raw.is_empty() {
                return Ok(None);
            }
            return Ok(Some(Record {
                fields: split_fields(&raw, dialect),
                hit_end: true,
            }));
        }

        if let Some(end) = chunk[..n].iter().position(|b| scanner.feed(*b, dialect)) {
            raw.extend_from_slice(&chunk[..end]);
            let unread = (n - end - 1) as i64;
            if unread > 0 {
                reader.seek(SeekFrom::Current(-unread))?;
            }
            return Ok(Some(Record {
                fields: split_fields(&raw, dialect),
                hit_end: false,
            }));
        }
        raw.extend_from_slice(&chunk[..n]);
    }
}

/// Split a record (terminator already removed) into fields.
fn split_fields(raw: &[u8], dialect: &Dialect) -> Vec<String> {
    let line = raw.strip_suffix(b"\r").unwrap_or(raw);
    let escape = dialect.active_escape();
    let mut fields = Vec::new();
    let mut field = Vec::new();
    let mut i = 0;
    let mut at_field_start = true;

    while i < line.len() {
        let b = line[i];
        if at_field_start && b == dialect.enclosure {
            at_field_start = false;
            i += 1;
            while i < line.len() {
                let c = line[i];
                if Some(c) == escape && i + 1 < line.len() {
                    field.push(c);
                    field.push(line[i + 1]);
                    i += 2;
                } else if c == dialect.enclosure {
                    if line.get(i + 1) == Some(&dialect.enclosure) {
                        field.push(c);
                        i += 2;
                    } else {
                        i += 1;
                        break;
                    }
                } else {
                    field.push(c);
                    i += 1;
                }
            }
            continue;
        }
        at_field_start = false;
        if b == dialect.separator {
            fields.push(String::from_utf8_lossy(&field).into_owned());
            field.clear();
            at_field_start = true;
        } else {
            field.push(b);
        }
        i += 1;
    }
    fields.push(String::from_utf8_lossy(&field).into_owned());
    fields
}
