//! Newline classification and LF normalization.
//!
//! Every newline encoding (`\r`, `\n`, `\r\n`) collapses to a single `\n` on
//! the way into a buffer. The set of encodings seen is reported so the
//! document layer can write the file back the way it came in.

use crate::types::Offset;

/// One of the recognized newline encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NewlineStyle {
    Cr = 1 << 0,
    Lf = 1 << 1,
    Crlf = 1 << 2,
}

impl NewlineStyle {
    pub const ALL: [NewlineStyle; 3] = [NewlineStyle::Cr, NewlineStyle::Lf, NewlineStyle::Crlf];

    const fn bit(self) -> u8 {
        self as u8
    }

    /// The encoded bytes of this newline.
    pub const fn as_bytes(self) -> &'static [u8] {
        match self {
            NewlineStyle::Cr => b"\r",
            NewlineStyle::Lf => b"\n",
            NewlineStyle::Crlf => b"\r\n",
        }
    }
}

/// Set of newline styles observed anywhere in a text.
///
/// Styles are flags rather than a per-line classification: a file with both
/// `\r\n` and `\n` endings reports `{Lf, Crlf}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NewlineStyleSet {
    bits: u8,
}

impl NewlineStyleSet {
    pub fn of(styles: &[NewlineStyle]) -> Self {
        styles.iter().copied().collect()
    }

    pub fn has(self, style: NewlineStyle) -> bool {
        self.bits & style.bit() != 0
    }

    /// True when the set holds exactly `styles` and nothing else.
    pub fn has_exactly(self, styles: &[NewlineStyle]) -> bool {
        self == Self::of(styles)
    }

    pub fn add(&mut self, style: NewlineStyle) {
        self.bits |= style.bit();
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Contained styles in `Cr`, `Lf`, `Crlf` order.
    pub fn iter(self) -> impl Iterator<Item = NewlineStyle> {
        NewlineStyle::ALL
            .into_iter()
            .filter(move |style| self.has(*style))
    }

    /// The only style in the set, if there is exactly one.
    pub fn single(self) -> Option<NewlineStyle> {
        let mut styles = self.iter();
        match (styles.next(), styles.next()) {
            (Some(style), None) => Some(style),
            _ => None,
        }
    }
}

impl FromIterator<NewlineStyle> for NewlineStyleSet {
    fn from_iter<I: IntoIterator<Item = NewlineStyle>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl Extend<NewlineStyle> for NewlineStyleSet {
    fn extend<I: IntoIterator<Item = NewlineStyle>>(&mut self, iter: I) {
        for style in iter {
            self.add(style);
        }
    }
}

/// Result of [`normalize`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalized {
    /// Input with every newline rewritten to `\n`.
    pub bytes: Vec<u8>,
    /// Offsets in `bytes` just past each newline, i.e. the start of every line
    /// after the first. Line 0 starting at 0 is implicit.
    pub line_starts: Vec<Offset>,
    pub styles: NewlineStyleSet,
}

/// Rewrites every newline in `input` to `\n` in a single pass.
///
/// `\r\n` is one newline (Crlf), a `\r` not followed by `\n` is Cr, and any
/// other `\n` is Lf. All other bytes, NUL included, are copied unchanged.
pub fn normalize(input: &[u8]) -> Normalized {
    let mut out = Normalized {
        bytes: Vec::with_capacity(input.len()),
        ..Normalized::default()
    };

    let mut rest = input;
    while let Some(pos) = rest.iter().position(|b| matches!(b, b'\r' | b'\n')) {
        out.bytes.extend_from_slice(&rest[..pos]);

        let consumed = match (rest[pos], rest.get(pos + 1)) {
            (b'\r', Some(b'\n')) => {
                out.styles.add(NewlineStyle::Crlf);
                2
            }
            (b'\r', _) => {
                out.styles.add(NewlineStyle::Cr);
                1
            }
            _ => {
                out.styles.add(NewlineStyle::Lf);
                1
            }
        };

        out.bytes.push(b'\n');
        out.line_starts.push(Offset::of_index(out.bytes.len()));
        rest = &rest[pos + consumed..];
    }
    out.bytes.extend_from_slice(rest);

    out
}
