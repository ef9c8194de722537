//! Line-oriented record format for the book data file
//!
//! Each book is a run of lines in fixed order:
//!
//! ```text
//! id
//! title
//! author
//! category
//! availability flag ("1" available, "0" borrowed, never ciphered)
//! borrower name        (borrowed only)
//! borrower contact     (borrowed only)
//! borrowed-at seconds  (borrowed only)
//! ```
//!
//! Every field except the flag goes through the cipher. After ciphering,
//! backslash, LF and CR are escaped so that no field can break a record.

use std::collections::HashSet;

use chrono::DateTime;

use super::cipher::Cipher;
use crate::error::{LibraryError, LibraryResult};
use crate::models::{Book, BookId, Borrower, Loan};

const FLAG_AVAILABLE: &[u8] = b"1";
const FLAG_BORROWED: &[u8] = b"0";

/// Serialize the whole collection
pub fn encode_books(books: &[Book], cipher: Cipher) -> Vec<u8> {
    let mut out = Vec::new();

    for book in books {
        push_field(&mut out, cipher, book.id.to_string().as_bytes());
        push_field(&mut out, cipher, book.title.as_bytes());
        push_field(&mut out, cipher, book.author.as_bytes());
        push_field(&mut out, cipher, book.category.as_bytes());

        match &book.loan {
            None => push_raw(&mut out, FLAG_AVAILABLE),
            Some(loan) => {
                push_raw(&mut out, FLAG_BORROWED);
                push_field(&mut out, cipher, loan.borrower.name.as_bytes());
                push_field(&mut out, cipher, loan.borrower.contact.as_bytes());
                push_field(
                    &mut out,
                    cipher,
                    loan.borrowed_at.timestamp().to_string().as_bytes(),
                );
            }
        }
    }

    out
}

/// Parse the whole collection
///
/// Reading stops at the first empty id line or at end of input.
pub fn decode_books(bytes: &[u8], cipher: Cipher) -> LibraryResult<Vec<Book>> {
    let mut reader = LineReader::new(bytes);
    let mut books = Vec::new();
    let mut seen = HashSet::new();

    loop {
        let id_line = reader.position() + 1;
        let raw_id = match reader.next_raw() {
            Some(raw) if !raw.is_empty() => raw,
            _ => break,
        };

        let id_text = decode_field(raw_id, cipher, id_line)?;
        let id: BookId = id_text
            .parse()
            .map_err(|_| LibraryError::codec(id_line, format!("invalid book id '{}'", id_text)))?;
        if !seen.insert(id) {
            return Err(LibraryError::codec(id_line, format!("duplicate book id {}", id)));
        }

        let title = reader.field(cipher, "title")?;
        let author = reader.field(cipher, "author")?;
        let category = reader.field(cipher, "category")?;

        let flag_line = reader.position() + 1;
        let loan = match reader.require_raw("availability flag")? {
            FLAG_AVAILABLE => None,
            FLAG_BORROWED => {
                let name = reader.field(cipher, "borrower name")?;
                let contact = reader.field(cipher, "borrower contact")?;
                let ts_line = reader.position() + 1;
                let ts_text = reader.field(cipher, "borrow timestamp")?;
                let borrowed_at = ts_text
                    .parse::<i64>()
                    .ok()
                    .and_then(|secs| DateTime::from_timestamp(secs, 0))
                    .ok_or_else(|| {
                        LibraryError::codec(ts_line, format!("invalid timestamp '{}'", ts_text))
                    })?;
                Some(Loan {
                    borrower: Borrower { name, contact },
                    borrowed_at,
                })
            }
            other => {
                return Err(LibraryError::codec(
                    flag_line,
                    format!(
                        "invalid availability flag '{}'",
                        String::from_utf8_lossy(other)
                    ),
                ))
            }
        };

        books.push(Book {
            id,
            title,
            author,
            category,
            loan,
        });
    }

    Ok(books)
}

fn push_field(out: &mut Vec<u8>, cipher: Cipher, value: &[u8]) {
    for byte in cipher.apply(value) {
        match byte {
            b'\\' => out.extend_from_slice(b"\\\\"),
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\r' => out.extend_from_slice(b"\\r"),
            other => out.push(other),
        }
    }
    out.push(b'\n');
}

fn push_raw(out: &mut Vec<u8>, value: &[u8]) {
    out.extend_from_slice(value);
    out.push(b'\n');
}

fn decode_field(raw: &[u8], cipher: Cipher, line: usize) -> LibraryResult<String> {
    let mut unescaped = Vec::with_capacity(raw.len());
    let mut bytes = raw.iter();

    while let Some(&byte) = bytes.next() {
        if byte != b'\\' {
            unescaped.push(byte);
            continue;
        }
        match bytes.next() {
            Some(b'\\') => unescaped.push(b'\\'),
            Some(b'n') => unescaped.push(b'\n'),
            Some(b'r') => unescaped.push(b'\r'),
            Some(other) => {
                return Err(LibraryError::codec(
                    line,
                    format!("unknown escape sequence '\\{}'", char::from(*other)),
                ))
            }
            None => return Err(LibraryError::codec(line, "dangling escape at end of line")),
        }
    }

    String::from_utf8(cipher.apply(&unescaped))
        .map_err(|_| LibraryError::codec(line, "field is not valid UTF-8 after decoding"))
}

struct LineReader<'a> {
    lines: Vec<&'a [u8]>,
    pos: usize,
}

impl<'a> LineReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        let mut lines: Vec<&[u8]> = bytes.split(|&b| b == b'\n').collect();
        // A trailing newline leaves one empty segment that is not a line
        if lines.last().is_some_and(|last| last.is_empty()) {
            lines.pop();
        }
        Self { lines, pos: 0 }
    }

    /// Number of lines consumed so far
    fn position(&self) -> usize {
        self.pos
    }

    fn next_raw(&mut self) -> Option<&'a [u8]> {
        let line = self.lines.get(self.pos).copied()?;
        self.pos += 1;
        Some(line)
    }

    fn require_raw(&mut self, what: &str) -> LibraryResult<&'a [u8]> {
        let line = self.pos + 1;
        self.next_raw().ok_or_else(|| {
            LibraryError::codec(line, format!("unexpected end of file, expected {}", what))
        })
    }

    fn field(&mut self, cipher: Cipher, what: &str) -> LibraryResult<String> {
        let line = self.pos + 1;
        let raw = self.require_raw(what)?;
        decode_field(raw, cipher, line)
    }
}
