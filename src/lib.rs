//! bufcopy: bounds-checked, overlap-safe byte copies between caller-owned
//! buffers.
//!
//! [`copy::copy`] is the core operation. [`args`] decodes a host runtime's
//! positional argument list into a call of it.

pub mod args;
pub mod buffer;
pub mod copy;
pub mod error;
pub mod memmove;
pub mod range;

pub use args::{HostValue, invoke};
pub use buffer::{BufferKind, BufferView};
pub use copy::{CopyOptions, copy, copy_slice, copy_with, copy_within};
pub use error::{CopyError, ErrorKind};
