use crate::types::{ByteCount, Offset, Range};

/// Ordered line-start offsets into LF-normalized content.
///
/// Entry `i` is the first byte of line `i`; the `\n` ending line `i` sits at
/// `starts[i + 1] - 1`. The first entry is always 0 and entries strictly
/// increase, so there is always at least one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    starts: Vec<Offset>,
}

impl Default for LineIndex {
    fn default() -> Self {
        Self {
            starts: vec![Offset::ZERO],
        }
    }
}

impl LineIndex {
    /// Index for content whose lines after the first begin at `line_starts`.
    pub fn from_line_starts(line_starts: Vec<Offset>) -> Self {
        let mut starts = Vec::with_capacity(line_starts.len() + 1);
        starts.push(Offset::ZERO);
        starts.extend(line_starts);
        Self { starts }
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    pub fn line_start(&self, line: usize) -> Option<Offset> {
        self.starts.get(line).copied()
    }

    /// Range of `line` without its trailing newline. `size` is the content length.
    pub fn line_range(&self, line: usize, size: ByteCount) -> Option<Range> {
        let start = self.line_start(line)?;
        let end = match self.starts.get(line + 1) {
            Some(next) => *next - ByteCount::new(1),
            None => Offset::from(size),
        };
        Some(Range::make_unchecked(start, end))
    }

    /// Line containing byte `at`. Offsets past the content map to the last line.
    pub fn line_of(&self, at: Offset) -> usize {
        self.starts.partition_point(|start| *start <= at) - 1
    }

    /// Updates the index for `len` bytes spliced in at `at`.
    ///
    /// `inserted` holds the line starts within the spliced bytes, relative to
    /// their own beginning.
    pub fn insert(&mut self, at: Offset, len: ByteCount, inserted: &[Offset]) {
        let split = self.starts.partition_point(|start| *start <= at);
        for start in &mut self.starts[split..] {
            *start += len;
        }
        self.starts.splice(
            split..split,
            inserted.iter().map(|start| at + ByteCount::from(*start)),
        );
    }

    /// Updates the index for the bytes in `range` being removed.
    ///
    /// Starts in `(range.start, range.end]` lost their newline and are dropped;
    /// starts after the range move left by its size.
    pub fn erase(&mut self, range: Range) {
        let lo = self.starts.partition_point(|start| *start <= range.start());
        let hi = self.starts.partition_point(|start| *start <= range.end());
        self.starts.drain(lo..hi);
        let size = range.size();
        for start in &mut self.starts[lo..] {
            *start -= size;
        }
    }

    /// Checks the index against `content`.
    ///
    /// # Panics
    /// Panics with a descriptive message if any invariant is violated.
    pub fn check(&self, content: &[u8]) {
        assert_eq!(
            self.starts.first(),
            Some(&Offset::ZERO),
            "first line must start at 0"
        );
        for pair in self.starts.windows(2) {
            assert!(
                pair[0] < pair[1],
                "line starts not increasing: {} then {}",
                pair[0],
                pair[1]
            );
        }
        let newlines = content.iter().filter(|b| **b == b'\n').count();
        assert_eq!(
            self.starts.len(),
            newlines + 1,
            "line count does not match newline count"
        );
        for start in &self.starts[1..] {
            let newline = start.as_usize() - 1;
            assert_eq!(
                content.get(newline),
                Some(&b'\n'),
                "line start {start} is not preceded by a newline"
            );
        }
    }
}
