//! Borrowed views over caller-owned byte buffers.
#![allow(unsafe_code)]

use core::marker::PhantomData;
use core::ptr::NonNull;

/// Host-side flavor of a byte buffer. Both are accepted the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferKind {
    /// A node-style `Buffer` (typed byte array view).
    Buffer,
    ArrayBuffer,
}

/// A bounded view over bytes owned by someone else.
///
/// Views are `Copy` and may alias: passing the same view as both target and
/// source is how an in-place move is expressed. The lifetime keeps the
/// underlying memory borrowed for as long as any view exists, and the view
/// never owns or frees it.
#[derive(Debug, Clone, Copy)]
pub struct BufferView<'a> {
    ptr: NonNull<u8>,
    len: usize,
    kind: BufferKind,
    _marker: PhantomData<&'a mut [u8]>,
}

impl<'a> BufferView<'a> {
    /// View over `bytes` as a [`BufferKind::Buffer`].
    pub fn new(bytes: &'a mut [u8]) -> Self {
        Self::with_kind(bytes, BufferKind::Buffer)
    }

    /// View over `bytes` tagged with `kind`.
    pub fn with_kind(bytes: &'a mut [u8], kind: BufferKind) -> Self {
        Self {
            // SAFETY: slice pointers are never null.
            ptr: unsafe { NonNull::new_unchecked(bytes.as_mut_ptr()) },
            len: bytes.len(),
            kind,
            _marker: PhantomData,
        }
    }

    /// Wrap memory handed over by a host runtime.
    ///
    /// Hosts report detached or empty array buffers with a null `ptr`. A null
    /// `ptr` always yields an empty view, whatever `len` says.
    ///
    /// # Safety
    ///
    /// - A non-null `ptr` must be valid for reads and writes of `len` bytes
    ///   for `'a`
    /// - Nothing else may access the memory while views of it are in use
    pub unsafe fn from_raw_parts(ptr: *mut u8, len: usize, kind: BufferKind) -> Self {
        let (ptr, len) = match NonNull::new(ptr) {
            Some(p) => (p, len),
            None => (NonNull::dangling(), 0),
        };
        Self {
            ptr,
            len,
            kind,
            _marker: PhantomData,
        }
    }

    /// Read-only view; only ever used as a copy source.
    pub(crate) fn from_shared(bytes: &'a [u8]) -> Self {
        Self {
            // SAFETY: slice pointers are never null. The pointer is only read
            // through.
            ptr: unsafe { NonNull::new_unchecked(bytes.as_ptr() as *mut u8) },
            len: bytes.len(),
            kind: BufferKind::Buffer,
            _marker: PhantomData,
        }
    }

    /// Length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn kind(&self) -> BufferKind {
        self.kind
    }

    #[inline]
    pub fn as_ptr(&self) -> *const u8 {
        self.ptr.as_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    /// Whether both views start at the same address.
    pub fn same_memory(&self, other: &BufferView<'_>) -> bool {
        core::ptr::eq(self.as_ptr(), other.as_ptr())
    }
}
