//! Byte-position vocabulary shared by every buffer operation.
//!
//! `ByteCount` is a length, `Offset` is an absolute position, `Range` is a
//! half-open `[start, end)` pair of offsets. Arithmetic that would leave the
//! `u64` domain is a caller bug and panics instead of wrapping.

use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Backing integer for [`ByteCount`] and [`Offset`].
pub type RawBytes = u64;

/// Non-negative count of bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ByteCount(RawBytes);

impl ByteCount {
    pub const ZERO: Self = Self(0);
    /// Largest representable count. Additions past it panic.
    pub const MAX: Self = Self(RawBytes::MAX);

    pub const fn new(value: RawBytes) -> Self {
        Self(value)
    }

    /// Length of an in-memory slice as a byte count.
    pub fn of_len(len: usize) -> Self {
        match RawBytes::try_from(len) {
            Ok(value) => Self(value),
            Err(_) => panic!("length {len} does not fit in ByteCount"),
        }
    }

    pub const fn raw(self) -> RawBytes {
        self.0
    }

    /// The count as an in-memory index. Panics when it is not addressable.
    pub fn as_usize(self) -> usize {
        match usize::try_from(self.0) {
            Ok(value) => value,
            Err(_) => panic!("byte count {} exceeds addressable memory", self.0),
        }
    }

    pub const fn checked_add(self, rhs: Self) -> Option<Self> {
        match self.0.checked_add(rhs.0) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    pub const fn checked_sub(self, rhs: Self) -> Option<Self> {
        match self.0.checked_sub(rhs.0) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }
}

/// True when `lhs + rhs` would exceed [`ByteCount::MAX`].
pub const fn add_will_overflow(lhs: ByteCount, rhs: ByteCount) -> bool {
    lhs.0 > RawBytes::MAX - rhs.0
}

impl From<Offset> for ByteCount {
    fn from(offset: Offset) -> Self {
        Self(offset.0)
    }
}

impl fmt::Display for ByteCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}B", self.0)
    }
}

impl Add for ByteCount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        assert!(
            !add_will_overflow(self, rhs),
            "ByteCount overflow: {} + {}",
            self.0,
            rhs.0
        );
        Self(self.0 + rhs.0)
    }
}

impl Sub for ByteCount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        assert!(self >= rhs, "ByteCount underflow: {} - {}", self.0, rhs.0);
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for ByteCount {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for ByteCount {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

/// Absolute byte position within a buffer's content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Offset(RawBytes);

impl Offset {
    pub const ZERO: Self = Self(0);

    pub const fn new(value: RawBytes) -> Self {
        Self(value)
    }

    /// Position `index` of an in-memory slice as an offset.
    pub fn of_index(index: usize) -> Self {
        Self(ByteCount::of_len(index).raw())
    }

    pub const fn raw(self) -> RawBytes {
        self.0
    }

    /// The offset as an in-memory index. Panics when it is not addressable.
    pub fn as_usize(self) -> usize {
        ByteCount::from(self).as_usize()
    }
}

impl From<ByteCount> for Offset {
    fn from(count: ByteCount) -> Self {
        Self(count.0)
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

impl Add<ByteCount> for Offset {
    type Output = Self;

    fn add(self, rhs: ByteCount) -> Self {
        assert!(
            !add_will_overflow(ByteCount::from(self), rhs),
            "Offset overflow: {} + {}",
            self.0,
            rhs.0
        );
        Self(self.0 + rhs.0)
    }
}

impl Sub<ByteCount> for Offset {
    type Output = Self;

    fn sub(self, rhs: ByteCount) -> Self {
        assert!(self.0 >= rhs.0, "Offset underflow: {} - {}", self.0, rhs.0);
        Self(self.0 - rhs.0)
    }
}

/// Distance between two offsets.
impl Sub for Offset {
    type Output = ByteCount;

    fn sub(self, rhs: Self) -> ByteCount {
        assert!(
            self >= rhs,
            "Negative offset distance: {} - {}",
            self.0,
            rhs.0
        );
        ByteCount(self.0 - rhs.0)
    }
}

impl AddAssign<ByteCount> for Offset {
    fn add_assign(&mut self, rhs: ByteCount) {
        *self = *self + rhs;
    }
}

impl SubAssign<ByteCount> for Offset {
    fn sub_assign(&mut self, rhs: ByteCount) {
        *self = *self - rhs;
    }
}

impl PartialEq<ByteCount> for Offset {
    fn eq(&self, other: &ByteCount) -> bool {
        self.0 == other.0
    }
}

impl PartialOrd<ByteCount> for Offset {
    fn partial_cmp(&self, other: &ByteCount) -> Option<std::cmp::Ordering> {
        Some(self.0.cmp(&other.0))
    }
}

/// Why a checked [`Range`] constructor refused its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("range start {start} is after end {end}")]
    StartAfterEnd { start: Offset, end: Offset },
    #[error("range starting at {start} with size {size} overflows")]
    Overflow { start: Offset, size: ByteCount },
}

/// Half-open byte interval `[start, end)` with `start <= end`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Range {
    start: Offset,
    end: Offset,
}

impl Range {
    pub fn try_make(start: Offset, end: Offset) -> Result<Self, RangeError> {
        if start <= end {
            Ok(Self { start, end })
        } else {
            Err(RangeError::StartAfterEnd { start, end })
        }
    }

    pub fn try_from_size(start: Offset, size: ByteCount) -> Result<Self, RangeError> {
        if add_will_overflow(ByteCount::from(start), size) {
            return Err(RangeError::Overflow { start, size });
        }
        Ok(Self {
            start,
            end: start + size,
        })
    }

    /// Builds `[start, end)` for callers that already validated `start <= end`.
    ///
    /// # Panics
    /// Panics when `start > end`.
    pub fn make_unchecked(start: Offset, end: Offset) -> Self {
        assert!(start <= end, "Range start must be <= end: {start} > {end}");
        Self { start, end }
    }

    /// Builds `[start, start + size)` for callers that know it cannot overflow.
    ///
    /// # Panics
    /// Panics when `start + size` overflows.
    pub fn make_unchecked_from_size(start: Offset, size: ByteCount) -> Self {
        Self {
            start,
            end: start + size,
        }
    }

    /// `[0, size)`.
    pub fn from_size(size: ByteCount) -> Self {
        Self {
            start: Offset::ZERO,
            end: Offset::from(size),
        }
    }

    /// `[0, end)`.
    pub fn up_to(end: Offset) -> Self {
        Self {
            start: Offset::ZERO,
            end,
        }
    }

    pub fn start(self) -> Offset {
        self.start
    }

    pub fn end(self) -> Offset {
        self.end
    }

    pub fn size(self) -> ByteCount {
        self.end - self.start
    }

    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// The range as a slice index.
    pub fn as_std(self) -> std::ops::Range<usize> {
        self.start.as_usize()..self.end.as_usize()
    }
}

impl From<ByteCount> for Range {
    fn from(size: ByteCount) -> Self {
        Self::from_size(size)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start.0, self.end.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn byte_count_add_and_sub() {
        assert_eq!(ByteCount::new(3) + ByteCount::new(4), ByteCount::new(7));
        assert_eq!(ByteCount::new(7) - ByteCount::new(7), ByteCount::ZERO);

        let mut count = ByteCount::new(10);
        count += ByteCount::new(5);
        count -= ByteCount::new(3);
        assert_eq!(count, ByteCount::new(12));
    }

    #[test]
    fn byte_count_add_up_to_max_is_allowed() {
        let almost = ByteCount::new(RawBytes::MAX - 1);
        assert_eq!(almost + ByteCount::new(1), ByteCount::MAX);
    }

    #[test]
    #[should_panic(expected = "ByteCount overflow")]
    fn byte_count_add_past_max_panics() {
        let _ = ByteCount::MAX + ByteCount::new(1);
    }

    #[test]
    #[should_panic(expected = "ByteCount underflow")]
    fn byte_count_sub_below_zero_panics() {
        let _ = ByteCount::new(1) - ByteCount::new(2);
    }

    #[test]
    fn byte_count_checked_ops() {
        assert_eq!(ByteCount::MAX.checked_add(ByteCount::new(1)), None);
        assert_eq!(ByteCount::ZERO.checked_sub(ByteCount::new(1)), None);
        assert_eq!(
            ByteCount::new(2).checked_sub(ByteCount::new(1)),
            Some(ByteCount::new(1))
        );
    }

    #[test]
    fn byte_count_ordering() {
        assert!(ByteCount::new(1) < ByteCount::new(2));
        assert!(ByteCount::MAX > ByteCount::ZERO);
    }

    #[test]
    fn offset_arithmetic() {
        let at = Offset::new(10);
        assert_eq!(at + ByteCount::new(5), Offset::new(15));
        assert_eq!(at - ByteCount::new(4), Offset::new(6));
        assert_eq!(Offset::new(15) - at, ByteCount::new(5));
        assert_eq!(at - at, ByteCount::ZERO);
    }

    #[test]
    fn offset_compares_against_byte_count() {
        let at = Offset::new(5);
        assert!(at == ByteCount::new(5));
        assert!(at < ByteCount::new(6));
        assert!(at <= ByteCount::new(5));
        assert!(at > ByteCount::new(4));
        assert!(at >= ByteCount::new(5));
    }

    #[test]
    #[should_panic(expected = "Offset overflow")]
    fn offset_add_past_max_panics() {
        let _ = Offset::new(RawBytes::MAX) + ByteCount::new(1);
    }

    #[test]
    #[should_panic(expected = "Offset underflow")]
    fn offset_sub_below_zero_panics() {
        let _ = Offset::new(3) - ByteCount::new(4);
    }

    #[test]
    #[should_panic(expected = "Negative offset distance")]
    fn offset_distance_negative_panics() {
        let _ = Offset::new(3) - Offset::new(4);
    }

    #[test]
    fn offset_and_byte_count_convert() {
        assert_eq!(ByteCount::from(Offset::new(9)), ByteCount::new(9));
        assert_eq!(Offset::from(ByteCount::new(9)), Offset::new(9));
        assert_eq!(Offset::of_index(4).as_usize(), 4);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(0, 5)]
    #[case(5, 5)]
    #[case(3, RawBytes::MAX)]
    fn range_try_make_accepts_ordered(#[case] start: RawBytes, #[case] end: RawBytes) {
        let range = Range::try_make(Offset::new(start), Offset::new(end)).unwrap();
        assert_eq!(range.start(), Offset::new(start));
        assert_eq!(range.end(), Offset::new(end));
        assert_eq!(range.size(), ByteCount::new(end - start));
    }

    #[test]
    fn range_try_make_rejects_start_after_end() {
        assert_eq!(
            Range::try_make(Offset::new(6), Offset::new(5)),
            Err(RangeError::StartAfterEnd {
                start: Offset::new(6),
                end: Offset::new(5),
            })
        );
    }

    #[rstest]
    #[case(0, 0)]
    #[case(2, 3)]
    #[case(0, RawBytes::MAX)]
    #[case(RawBytes::MAX, 0)]
    fn range_try_from_size_accepts_in_range(#[case] start: RawBytes, #[case] size: RawBytes) {
        let range = Range::try_from_size(Offset::new(start), ByteCount::new(size)).unwrap();
        assert_eq!(range.start(), Offset::new(start));
        assert_eq!(range.size(), ByteCount::new(size));
    }

    #[test]
    fn range_try_from_size_rejects_overflow() {
        let result = Range::try_from_size(Offset::new(1), ByteCount::MAX);
        assert!(matches!(result, Err(RangeError::Overflow { .. })));
    }

    #[test]
    #[should_panic(expected = "Range start must be <= end")]
    fn range_make_unchecked_panics_on_inverted() {
        let _ = Range::make_unchecked(Offset::new(2), Offset::new(1));
    }

    #[test]
    #[should_panic(expected = "Offset overflow")]
    fn range_make_unchecked_from_size_panics_on_overflow() {
        let _ = Range::make_unchecked_from_size(Offset::new(2), ByteCount::MAX);
    }

    #[test]
    fn range_from_size_and_up_to_start_at_zero() {
        assert_eq!(
            Range::from_size(ByteCount::new(4)),
            Range::make_unchecked(Offset::ZERO, Offset::new(4))
        );
        assert_eq!(Range::up_to(Offset::new(4)), Range::from(ByteCount::new(4)));
        assert!(Range::default().is_empty());
    }

    #[test]
    fn range_equality_is_structural() {
        let a = Range::make_unchecked_from_size(Offset::new(3), ByteCount::new(2));
        let b = Range::make_unchecked(Offset::new(3), Offset::new(5));
        let c = Range::make_unchecked(Offset::new(2), Offset::new(4));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.size(), c.size());
    }

    #[test]
    fn range_display() {
        let range = Range::make_unchecked(Offset::new(3), Offset::new(5));
        assert_eq!(range.to_string(), "[3, 5)");
        assert_eq!(range.as_std(), 3..5);
    }
}
