//! In-memory text storage for the teks editor.
//!
//! Content is addressed by byte [`Offset`]s and half-open [`Range`]s, kept
//! LF-normalized at rest, and indexed by line so line lookups never rescan the
//! document. The buffer is byte-oriented and binary safe: it has no notion of
//! UTF-8, graphemes or syntax.
//!
//! ```rust
//! use teks_buffer::{Buffer, ByteCount, Offset, TextBuffer, read_all, read_line};
//!
//! let (mut buffer, styles) = TextBuffer::from_raw_text(b"one\r\ntwo");
//! assert!(styles.has(teks_buffer::NewlineStyle::Crlf));
//! assert_eq!(buffer.size(), ByteCount::new(7));
//!
//! assert!(buffer.insert(Offset::new(3), b"\rand a half"));
//! assert_eq!(read_all(&buffer), b"one\nand a half\ntwo");
//! assert_eq!(read_line(&buffer, 1), Some(b"and a half".to_vec()));
//! ```

pub mod buffer;
pub mod line_index;
pub mod newline;
pub mod types;

pub use buffer::{Buffer, TextBuffer, full_range, insert_end, insert_start, read_all, read_line};
pub use line_index::LineIndex;
pub use newline::{NewlineStyle, NewlineStyleSet, Normalized, normalize};
pub use types::{ByteCount, Offset, Range, RangeError, RawBytes};
