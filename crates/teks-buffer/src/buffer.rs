use crate::line_index::LineIndex;
use crate::newline::{NewlineStyleSet, normalize};
use crate::types::{ByteCount, Offset, Range};

/// Byte-addressed text storage with a line index.
///
/// Stored content is always LF-normalized: every mutating method normalizes
/// what it is given and keeps the line index consistent before returning.
/// Out-of-bounds requests fail with `false`/`None` and leave the buffer
/// untouched.
pub trait Buffer {
    fn size(&self) -> ByteCount;

    fn is_empty(&self) -> bool {
        self.size() == ByteCount::ZERO
    }

    /// Inserts `content` at `at`. Succeeds iff `at <= size()`.
    fn insert(&mut self, at: Offset, content: &[u8]) -> bool;

    /// Removes `range`. Succeeds iff `range.end() <= size()`.
    fn erase(&mut self, range: Range) -> bool;

    /// Replaces `range` with `content`. Succeeds iff `range.end() <= size()`.
    fn replace(&mut self, range: Range, content: &[u8]) -> bool;

    /// The stored bytes in `range`, or `None` if `range.end() > size()`.
    fn read_string(&self, range: Range) -> Option<Vec<u8>>;

    /// Number of lines; never zero.
    fn line_count(&self) -> usize;

    /// Range of `line` excluding its trailing newline, or `None` past the last line.
    fn line_range(&self, line: usize) -> Option<Range>;
}

/// Contiguous-storage [`Buffer`]: a byte vector plus a line-start index.
///
/// Clones are deep; nothing is shared between buffers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    content: Vec<u8>,
    lines: LineIndex,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingests raw file bytes, reporting which newline styles they used.
    pub fn from_raw_text(raw: impl AsRef<[u8]>) -> (Self, NewlineStyleSet) {
        let normalized = normalize(raw.as_ref());
        let buffer = Self {
            content: normalized.bytes,
            lines: LineIndex::from_line_starts(normalized.line_starts),
        };
        (buffer, normalized.styles)
    }

    /// Stored (normalized) content.
    pub fn as_bytes(&self) -> &[u8] {
        &self.content
    }

    pub fn lines(&self) -> &LineIndex {
        &self.lines
    }

    fn contains(&self, range: Range) -> bool {
        range.end() <= self.size()
    }
}

impl From<&[u8]> for TextBuffer {
    fn from(raw: &[u8]) -> Self {
        Self::from_raw_text(raw).0
    }
}

impl From<Vec<u8>> for TextBuffer {
    fn from(raw: Vec<u8>) -> Self {
        Self::from(raw.as_slice())
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        Self::from(text.as_bytes())
    }
}

impl From<String> for TextBuffer {
    fn from(text: String) -> Self {
        Self::from(text.as_bytes())
    }
}

impl Buffer for TextBuffer {
    fn size(&self) -> ByteCount {
        ByteCount::of_len(self.content.len())
    }

    fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    fn insert(&mut self, at: Offset, content: &[u8]) -> bool {
        if at > self.size() {
            log::debug!("insert at {at} rejected, buffer size is {}", self.size());
            return false;
        }

        let normalized = normalize(content);
        let len = ByteCount::of_len(normalized.bytes.len());

        let index = at.as_usize();
        self.content.splice(index..index, normalized.bytes);
        self.lines.insert(at, len, &normalized.line_starts);

        log::trace!("inserted {len} at {at}, {} lines", self.lines.line_count());
        true
    }

    fn erase(&mut self, range: Range) -> bool {
        if !self.contains(range) {
            log::debug!("erase {range} rejected, buffer size is {}", self.size());
            return false;
        }

        self.content.drain(range.as_std());
        self.lines.erase(range);

        log::trace!("erased {range}, {} lines", self.lines.line_count());
        true
    }

    fn replace(&mut self, range: Range, content: &[u8]) -> bool {
        if !self.contains(range) {
            log::debug!("replace {range} rejected, buffer size is {}", self.size());
            return false;
        }

        // Equivalent to erase followed by insert; both are in bounds after the check above.
        self.erase(range) && self.insert(range.start(), content)
    }

    fn read_string(&self, range: Range) -> Option<Vec<u8>> {
        if !self.contains(range) {
            return None;
        }
        Some(self.content[range.as_std()].to_vec())
    }

    fn line_count(&self) -> usize {
        self.lines.line_count()
    }

    fn line_range(&self, line: usize) -> Option<Range> {
        self.lines.line_range(line, self.size())
    }
}

/// All content of `buffer`.
pub fn read_all<B: Buffer + ?Sized>(buffer: &B) -> Vec<u8> {
    buffer
        .read_string(full_range(buffer))
        .unwrap_or_default()
}

/// `[0, size())`.
pub fn full_range<B: Buffer + ?Sized>(buffer: &B) -> Range {
    Range::from_size(buffer.size())
}

pub fn insert_start<B: Buffer + ?Sized>(buffer: &mut B, content: &[u8]) -> bool {
    buffer.insert(Offset::ZERO, content)
}

pub fn insert_end<B: Buffer + ?Sized>(buffer: &mut B, content: &[u8]) -> bool {
    let end = Offset::from(buffer.size());
    buffer.insert(end, content)
}

/// Content of `line` without its newline.
pub fn read_line<B: Buffer + ?Sized>(buffer: &B, line: usize) -> Option<Vec<u8>> {
    buffer
        .line_range(line)
        .and_then(|range| buffer.read_string(range))
}
