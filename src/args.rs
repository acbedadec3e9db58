//! Host-facing argument decoding.
//!
//! Runtime bindings hand over the call's arguments as a list of
//! [`HostValue`]s:
//!
//! ```text
//! copy(target[, targetStart], source[, sourceStart[, sourceEnd]])
//! ```
//!
//! `targetStart` is recognised by type: if the second argument is not an
//! unsigned 32-bit integer it is taken to be `source`. Checks run in
//! argument order and the first failure is reported.

use crate::buffer::BufferView;
use crate::copy::{self, CopyOptions};
use crate::error::{CopyError, CopyResult, Field, Operand};
use crate::range;

/// A value decoded from the host runtime.
///
/// Only the value's type matters to argument decoding, so booleans and
/// strings carry no payload.
#[derive(Debug, Clone, Copy)]
pub enum HostValue<'a> {
    Undefined,
    Null,
    Bool,
    Number(f64),
    Uint32(u32),
    String,
    /// Any object that is not a byte buffer.
    Object,
    Buffer(BufferView<'a>),
}

impl HostValue<'_> {
    /// The value as a `u32`, if the host would call it one.
    ///
    /// Numbers qualify when they are integral, in `[0, u32::MAX]` and not
    /// negative zero.
    pub fn as_uint32(&self) -> Option<u32> {
        match *self {
            HostValue::Uint32(v) => Some(v),
            HostValue::Number(n) => {
                let is_neg_zero = n == 0.0 && n.is_sign_negative();
                if n.fract() == 0.0 && n >= 0.0 && n <= u32::MAX as f64 && !is_neg_zero {
                    Some(n as u32)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Whether the host treats the value as an object. Buffers count.
    pub fn is_object(&self) -> bool {
        matches!(self, HostValue::Object | HostValue::Buffer(_))
    }
}

/// A fully decoded call.
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    pub target: BufferView<'a>,
    pub source: BufferView<'a>,
    pub options: CopyOptions,
}

impl Invocation<'_> {
    /// Run the decoded copy. Returns the number of bytes copied.
    pub fn run(self) -> CopyResult<usize> {
        copy::copy_with(self.target, self.source, self.options)
    }
}

fn buffer_arg<'a>(value: &HostValue<'a>, operand: Operand) -> CopyResult<BufferView<'a>> {
    match value {
        HostValue::Buffer(view) => Ok(*view),
        v if v.is_object() => Err(CopyError::NotABuffer(operand)),
        _ => Err(CopyError::NotAnObject(operand)),
    }
}

fn uint32_arg(value: &HostValue<'_>, field: Field) -> CopyResult<u32> {
    value.as_uint32().ok_or(CopyError::NotAnInteger(field))
}

/// Decode and validate an argument list.
pub fn resolve<'a>(args: &[HostValue<'a>]) -> CopyResult<Invocation<'a>> {
    let count = CopyError::ArgumentCount { given: args.len() };
    if args.len() < 2 {
        return Err(count);
    }

    let mut options = CopyOptions::new();
    let target = buffer_arg(&args[0], Operand::Target)?;
    let mut i = 1;

    if let Some(start) = args[i].as_uint32() {
        range::offset(Field::TargetStart, start as usize, target.len())?;
        options.target_start = Some(start);
        i += 1;
    }

    let source = match args.get(i) {
        Some(v) => buffer_arg(v, Operand::Source)?,
        None => return Err(count),
    };
    i += 1;

    if let Some(v) = args.get(i) {
        let start = uint32_arg(v, Field::SourceStart)?;
        range::offset(Field::SourceStart, start as usize, source.len())?;
        options.source_start = Some(start);
        i += 1;
    }

    if let Some(v) = args.get(i) {
        let end = uint32_arg(v, Field::SourceEnd)?;
        let start = options.source_start.map_or(0, |s| s as usize);
        range::ByteRange::within(start, end as usize, source.len())?;
        options.source_end = Some(end);
        i += 1;
    }

    if i < args.len() {
        return Err(count);
    }

    Ok(Invocation {
        target,
        source,
        options,
    })
}

/// Decode `args` and run the copy. Returns the number of bytes copied.
///
/// ```
/// use bufcopy::{BufferView, HostValue, invoke};
///
/// let mut src = *b"0123456789";
/// let mut dst = [0u8; 4];
/// let n = invoke(&[
///     HostValue::Buffer(BufferView::new(&mut dst)),
///     HostValue::Buffer(BufferView::new(&mut src)),
///     HostValue::Uint32(6),
/// ])
/// .unwrap();
/// assert_eq!(n, 4);
/// assert_eq!(&dst, b"6789");
/// ```
pub fn invoke(args: &[HostValue<'_>]) -> CopyResult<usize> {
    let invocation = resolve(args).inspect_err(|e| log::debug!("bad copy arguments: {e}"))?;
    invocation.run()
}
