//! Errors reported by the bounded copy.

use core::fmt;

/// Which argument an error is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Target,
    Source,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operand::Target => "target",
            Operand::Source => "source",
        })
    }
}

/// Which integer parameter an error is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    TargetStart,
    SourceStart,
    SourceEnd,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::TargetStart => "targetStart",
            Field::SourceStart => "sourceStart",
            Field::SourceEnd => "sourceEnd",
        })
    }
}

/// Coarse failure class handed to host bindings, which map it onto their
/// own exception types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Wrong argument count, or a target/source that is not a buffer.
    InvalidArgument,
    /// An offset or end outside its bound.
    Range,
}

/// Why a copy was rejected. Every variant is raised before any byte is
/// written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CopyError {
    #[error("illegal number of arguments: {given}")]
    ArgumentCount { given: usize },
    #[error("illegal {0}: not an object")]
    NotAnObject(Operand),
    #[error("illegal {0}: not a buffer or ArrayBuffer")]
    NotABuffer(Operand),
    #[error("illegal {0}: not an uint32")]
    NotAnInteger(Field),
    #[error("illegal {field}: out of bounds ({value} not in [{min}, {max}])")]
    OutOfBounds {
        field: Field,
        value: usize,
        min: usize,
        max: usize,
    },
    #[error("illegal source range: target capacity overrun ({start} + {len} > {capacity})")]
    CapacityOverrun {
        start: usize,
        len: usize,
        capacity: usize,
    },
}

impl CopyError {
    /// The class a host binding should report this error as.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CopyError::ArgumentCount { .. }
            | CopyError::NotAnObject(_)
            | CopyError::NotABuffer(_) => ErrorKind::InvalidArgument,
            CopyError::NotAnInteger(_)
            | CopyError::OutOfBounds { .. }
            | CopyError::CapacityOverrun { .. } => ErrorKind::Range,
        }
    }
}

/// Result of a copy operation.
pub type CopyResult<T> = Result<T, CopyError>;
