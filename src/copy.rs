//! Bounds-checked, overlap-safe copy between two byte buffers.
#![allow(unsafe_code)]

use crate::buffer::BufferView;
use crate::error::{CopyResult, Field};
use crate::memmove::move_bytes;
use crate::range::{self, ByteRange};

/// Optional range parameters of a copy.
///
/// Unset fields default to `target_start = 0`, `source_start = 0` and
/// `source_end = source.len()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyOptions {
    pub target_start: Option<u32>,
    pub source_start: Option<u32>,
    pub source_end: Option<u32>,
}

impl CopyOptions {
    /// Options with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write starting at `start` in the target.
    pub fn target_start(mut self, start: u32) -> Self {
        self.target_start = Some(start);
        self
    }

    /// Read starting at `start` in the source.
    pub fn source_start(mut self, start: u32) -> Self {
        self.source_start = Some(start);
        self
    }

    /// Stop reading the source at `end` (exclusive).
    pub fn source_end(mut self, end: u32) -> Self {
        self.source_end = Some(end);
        self
    }

    /// Shorthand for `source_start(start).source_end(end)`.
    pub fn source_range(self, start: u32, end: u32) -> Self {
        self.source_start(start).source_end(end)
    }

    /// Fill in defaults for a source of `source_len` bytes.
    ///
    /// Returns `(target_start, source_start, source_end)`. Nothing is
    /// bounds-checked here.
    pub fn resolve(&self, source_len: usize) -> (usize, usize, usize) {
        (
            self.target_start.map_or(0, |v| v as usize),
            self.source_start.map_or(0, |v| v as usize),
            self.source_end.map_or(source_len, |v| v as usize),
        )
    }
}

/// Resolved ranges of a copy that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyPlan {
    pub target: ByteRange,
    pub source: ByteRange,
}

impl CopyPlan {
    /// Validate resolved offsets against buffers of `target_len` and
    /// `source_len` bytes.
    ///
    /// Checks run in a fixed order and the first failure wins: targetStart,
    /// sourceStart, sourceEnd, then target capacity. An empty source range
    /// skips the capacity check.
    pub fn new(
        target_len: usize,
        target_start: usize,
        source_len: usize,
        source_start: usize,
        source_end: usize,
    ) -> CopyResult<Self> {
        let target_start = range::offset(Field::TargetStart, target_start, target_len)?;
        let source = ByteRange::within(source_start, source_end, source_len)?;
        let target = if source.is_empty() {
            ByteRange {
                start: target_start,
                end: target_start,
            }
        } else {
            ByteRange::placed(target_start, source.len(), target_len)?
        };
        Ok(Self { target, source })
    }

    /// Bytes to copy.
    #[inline]
    pub fn len(&self) -> usize {
        self.source.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }
}

/// Copy `source[source_start..source_end]` into `target` at `target_start`.
///
/// `target` and `source` may be views of the same memory, in which case
/// overlapping ranges are moved as if the source were read in full first.
/// Nothing is written unless every check passes, and `source` is only read.
/// Returns the number of bytes copied.
///
/// ```
/// use bufcopy::{BufferView, copy};
///
/// let mut buf = *b"abcdef";
/// let view = BufferView::new(&mut buf);
/// assert_eq!(copy(view, 2, view, 0, 4).unwrap(), 4);
/// assert_eq!(&buf, b"ababcd");
/// ```
pub fn copy(
    target: BufferView<'_>,
    target_start: usize,
    source: BufferView<'_>,
    source_start: usize,
    source_end: usize,
) -> CopyResult<usize> {
    let plan = CopyPlan::new(
        target.len(),
        target_start,
        source.len(),
        source_start,
        source_end,
    )
    .inspect_err(|e| {
        log::debug!("rejected copy [{source_start}..{source_end}) -> {target_start}: {e}")
    })?;

    if plan.is_empty() {
        return Ok(0);
    }

    // SAFETY: the plan keeps both ranges inside their views, and views are
    // valid for reads and writes of their full length. `move_bytes` handles
    // the overlap when both views share memory.
    unsafe {
        move_bytes(
            target.as_mut_ptr().add(plan.target.start),
            source.as_ptr().add(plan.source.start),
            plan.len(),
        );
    }

    log::trace!(
        "copied {} bytes: source[{}..{}) -> target[{}..{}){}",
        plan.len(),
        plan.source.start,
        plan.source.end,
        plan.target.start,
        plan.target.end,
        if target.same_memory(&source) { " (in place)" } else { "" }
    );
    Ok(plan.len())
}

/// [`copy`] with defaults taken from `opts`.
pub fn copy_with(
    target: BufferView<'_>,
    source: BufferView<'_>,
    opts: CopyOptions,
) -> CopyResult<usize> {
    let (target_start, source_start, source_end) = opts.resolve(source.len());
    copy(target, target_start, source, source_start, source_end)
}

/// [`copy`] between two distinct slices.
///
/// ```
/// use bufcopy::{CopyOptions, copy_slice};
///
/// let mut dst = [0u8; 4];
/// let opts = CopyOptions::new().target_start(1).source_range(2, 5);
/// assert_eq!(copy_slice(&mut dst, b"hello", opts).unwrap(), 3);
/// assert_eq!(&dst, b"\0llo");
/// ```
pub fn copy_slice(target: &mut [u8], source: &[u8], opts: CopyOptions) -> CopyResult<usize> {
    copy_with(BufferView::new(target), BufferView::from_shared(source), opts)
}

/// [`copy`] from a buffer into itself. Ranges may overlap.
///
/// ```
/// use bufcopy::{CopyOptions, copy_within};
///
/// let mut buf = *b"abcdef";
/// assert_eq!(copy_within(&mut buf, CopyOptions::new().source_start(2)).unwrap(), 4);
/// assert_eq!(&buf, b"cdefef");
/// ```
pub fn copy_within(buf: &mut [u8], opts: CopyOptions) -> CopyResult<usize> {
    let view = BufferView::new(buf);
    copy_with(view, view, opts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CopyError, ErrorKind};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn pattern(n: usize) -> Vec<u8> {
        (0..n).map(|i| (i % 251) as u8 + 1).collect()
    }

    #[test]
    fn test_copy_whole_source_by_default() {
        let source = pattern(6);
        let mut target = vec![0u8; 10];
        let n = copy_slice(&mut target, &source, CopyOptions::new()).unwrap();
        assert_eq!(n, 6);
        assert_eq!(&target[..6], &source[..]);
        assert_eq!(&target[6..], &[0u8; 4]);
    }

    #[test]
    fn test_copy_source_longer_than_target() {
        let source = pattern(11);
        let mut target = vec![0u8; 10];
        let err = copy_slice(&mut target, &source, CopyOptions::new()).unwrap_err();
        assert!(matches!(err, CopyError::CapacityOverrun { .. }));
        assert_eq!(err.kind(), ErrorKind::Range);
        assert_eq!(target, vec![0u8; 10]);
    }

    #[rstest]
    #[case(0, 0, 16)]
    #[case(3, 2, 9)]
    #[case(10, 15, 16)]
    #[case(16, 0, 0)]
    fn test_copy_partial_ranges(
        #[case] target_start: u32,
        #[case] source_start: u32,
        #[case] source_end: u32,
    ) {
        let source = pattern(16);
        let mut target = vec![0u8; 16];
        let mut expected = target.clone();
        let len = (source_end - source_start) as usize;
        let ts = target_start as usize;
        let range = source_start as usize..source_end as usize;
        expected[ts..ts + len].copy_from_slice(&source[range]);

        let opts = CopyOptions::new()
            .target_start(target_start)
            .source_range(source_start, source_end);
        assert_eq!(copy_slice(&mut target, &source, opts).unwrap(), len);
        assert_eq!(target, expected);
    }

    #[test]
    fn test_copy_within_shift_right() {
        let mut buf = pattern(32);
        let n = buf.len();
        let mut expected = buf.clone();
        let snapshot = expected[..n - 2].to_vec();
        expected[2..].copy_from_slice(&snapshot);

        let opts = CopyOptions::new()
            .target_start(2)
            .source_range(0, (n - 2) as u32);
        assert_eq!(copy_within(&mut buf, opts).unwrap(), n - 2);
        assert_eq!(buf, expected);
    }

    #[test]
    fn test_copy_within_shift_left() {
        let mut buf = *b"abcdef";
        let opts = CopyOptions::new().source_start(2);
        assert_eq!(copy_within(&mut buf, opts).unwrap(), 4);
        assert_eq!(&buf, b"cdefef");
    }

    #[rstest]
    #[case(0)]
    #[case(4)]
    #[case(8)]
    fn test_zero_length_leaves_target(#[case] k: u32) {
        let source = pattern(8);
        let mut target = vec![7u8; 8];
        let opts = CopyOptions::new().source_range(k, k);
        assert_eq!(copy_slice(&mut target, &source, opts).unwrap(), 0);
        assert_eq!(target, vec![7u8; 8]);
    }

    #[test]
    fn test_zero_length_at_target_end() {
        let source = pattern(4);
        let mut target = vec![0u8; 4];
        let opts = CopyOptions::new().target_start(4).source_range(1, 1);
        assert_eq!(copy_slice(&mut target, &source, opts).unwrap(), 0);
    }

    #[test]
    fn test_target_start_at_end_overruns() {
        let source = pattern(4);
        let mut target = vec![0u8; 4];
        let opts = CopyOptions::new().target_start(4).source_range(0, 1);
        let err = copy_slice(&mut target, &source, opts).unwrap_err();
        assert_eq!(
            err,
            CopyError::CapacityOverrun {
                start: 4,
                len: 1,
                capacity: 4
            }
        );
    }

    #[test]
    fn test_start_after_end() {
        let source = pattern(8);
        let mut target = vec![0u8; 8];
        let opts = CopyOptions::new().source_range(5, 2);
        let err = copy_slice(&mut target, &source, opts).unwrap_err();
        assert_eq!(
            err,
            CopyError::OutOfBounds {
                field: Field::SourceEnd,
                value: 2,
                min: 5,
                max: 8
            }
        );
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn test_target_start_checked_first() {
        let source = pattern(4);
        let mut target = vec![0u8; 4];
        let opts = CopyOptions::new().target_start(5).source_start(9);
        let err = copy_slice(&mut target, &source, opts).unwrap_err();
        assert!(matches!(
            err,
            CopyError::OutOfBounds {
                field: Field::TargetStart,
                ..
            }
        ));
    }

    #[test]
    fn test_repeat_copy_same_result() {
        let source = pattern(5);
        let mut target = vec![0u8; 5];
        copy_slice(&mut target, &source, CopyOptions::new()).unwrap();
        let first = target.clone();
        copy_slice(&mut target, &source, CopyOptions::new()).unwrap();
        assert_eq!(target, first);
    }

    #[test]
    fn test_options_resolve_defaults() {
        assert_eq!(CopyOptions::new().resolve(9), (0, 0, 9));
        let opts = CopyOptions::new().target_start(3).source_start(1);
        assert_eq!(opts.resolve(9), (3, 1, 9));
        assert_eq!(opts.source_end(4).resolve(9), (3, 1, 4));
    }

    #[test]
    fn test_plan_from_resolved_offsets() {
        let plan = CopyPlan::new(10, 4, 8, 2, 6).unwrap();
        assert_eq!(plan.target, ByteRange { start: 4, end: 8 });
        assert_eq!(plan.source, ByteRange { start: 2, end: 6 });
        assert_eq!(plan.len(), 4);
        assert!(CopyPlan::new(10, 10, 8, 3, 3).unwrap().is_empty());
    }

    #[test]
    fn test_copy_resolved_leaves_source() {
        let mut src = *b"012345";
        let mut dst = [b'.'; 6];
        let source = BufferView::new(&mut src);
        let n = copy(BufferView::new(&mut dst), 1, source, 2, 5).unwrap();
        assert_eq!(n, 3);
        assert_eq!(&dst, b".234..");
        assert_eq!(&src, b"012345");
    }
}
