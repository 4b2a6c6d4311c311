//! Error taxonomy for the conversion pipeline.

use thiserror::Error;

/// Which index collection a face corner failed to resolve against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexKind {
    Vertex,
    TexCoord,
    Normal,
}

impl std::fmt::Display for IndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexKind::Vertex => write!(f, "vertex"),
            IndexKind::TexCoord => write!(f, "texture coordinate"),
            IndexKind::Normal => write!(f, "normal"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConvertError {
    /// A recognized record had the wrong field count or a non-numeric field.
    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// A face referenced an index past the end of its collection.
    #[error("{kind} index {index} out of range (collection holds {len}) on line {line}")]
    IndexOutOfRange {
        kind: IndexKind,
        index: usize,
        len: usize,
        line: usize,
    },

    /// Strict mode only: a face corner omitted its texcoord or normal slot.
    #[error("face corner on line {line} is missing its {kind} index")]
    MissingAttribute { kind: IndexKind, line: usize },

    /// Automatic scaling over a zero bounding extent.
    #[error("geometry has zero bounding extent, cannot derive a scale factor")]
    DegenerateGeometry,
}

pub type ConvertResult<T> = Result<T, ConvertError>;

impl ConvertError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        ConvertError::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }
}
