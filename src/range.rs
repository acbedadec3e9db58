//! Half-open byte ranges and the bound checks used to build them.

use crate::error::{CopyError, CopyResult, Field};

/// `[start, end)` within a buffer. Always `start <= end <= len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The source range `[start, end)` of a buffer of `len` bytes.
    ///
    /// `start` is checked against `[0, len]` first, then `end` against
    /// `[start, len]`.
    pub fn within(start: usize, end: usize, len: usize) -> CopyResult<Self> {
        let start = offset(Field::SourceStart, start, len)?;
        if end < start || end > len {
            return Err(CopyError::OutOfBounds {
                field: Field::SourceEnd,
                value: end,
                min: start,
                max: len,
            });
        }
        Ok(Self { start, end })
    }

    /// Place `len` bytes at `start` in a buffer of `capacity` bytes.
    pub fn placed(start: usize, len: usize, capacity: usize) -> CopyResult<Self> {
        let overrun = CopyError::CapacityOverrun {
            start,
            len,
            capacity,
        };
        let end = start.checked_add(len).ok_or(overrun.clone())?;
        if end > capacity {
            return Err(overrun);
        }
        Ok(Self { start, end })
    }
}

/// Check `value` against `[0, len]`.
pub fn offset(field: Field, value: usize, len: usize) -> CopyResult<usize> {
    if value > len {
        return Err(CopyError::OutOfBounds {
            field,
            value,
            min: 0,
            max: len,
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0, 0)]
    #[case(0, 8, 8)]
    #[case(3, 5, 8)]
    #[case(8, 8, 8)]
    fn test_within_accepts(#[case] start: usize, #[case] end: usize, #[case] len: usize) {
        let r = ByteRange::within(start, end, len).unwrap();
        assert_eq!(r.len(), end - start);
    }

    #[rstest]
    #[case(9, 9, 8, Field::SourceStart)]
    #[case(5, 2, 8, Field::SourceEnd)]
    #[case(0, 9, 8, Field::SourceEnd)]
    fn test_within_rejects(
        #[case] start: usize,
        #[case] end: usize,
        #[case] len: usize,
        #[case] which: Field,
    ) {
        match ByteRange::within(start, end, len) {
            Err(CopyError::OutOfBounds { field, .. }) => assert_eq!(field, which),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_placed() {
        assert_eq!(
            ByteRange::placed(2, 6, 8).unwrap(),
            ByteRange { start: 2, end: 8 }
        );
        assert!(ByteRange::placed(8, 0, 8).unwrap().is_empty());
        assert!(matches!(
            ByteRange::placed(8, 1, 8),
            Err(CopyError::CapacityOverrun { .. })
        ));
        assert!(matches!(
            ByteRange::placed(usize::MAX, 2, 8),
            Err(CopyError::CapacityOverrun { .. })
        ));
    }
}
