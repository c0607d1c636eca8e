//! Error types for context creation and draw-call validation

use super::types::Attribute;

/// Reasons a context cannot be created
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// Width or height is zero
    ZeroSize,
    /// Dimensions do not fit the signed 32-bit coordinate space or overflow `usize`
    TooLarge { width: u32, height: u32 },
    /// The pixel buffer or scratch arena could not be allocated
    OutOfMemory { bytes: usize },
}

impl std::fmt::Display for ContextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContextError::ZeroSize => write!(f, "framebuffer dimensions must be non-zero"),
            ContextError::TooLarge { width, height } => {
                write!(f, "framebuffer {}x{} is too large", width, height)
            }
            ContextError::OutOfMemory { bytes } => {
                write!(f, "failed to allocate {} bytes", bytes)
            }
        }
    }
}

impl std::error::Error for ContextError {}

/// Why a draw call was dropped.
///
/// Draw calls never report these to the caller; they are logged at debug
/// level and the call becomes a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    UnsupportedPrimitive,
    MissingAttribute(Attribute),
    MissingIndexBuffer,
    /// The position binding does not use `VertexFormat::Float2`
    InvalidPositionFormat,
    /// A bound buffer's data is shorter than its declared count and stride
    BufferTooSmall(Attribute),
    InvertedIndexRange { start: u32, end: u32 },
    VertexRangeOutOfBounds { required: usize, available: usize },
    IndexRangeOutOfBounds { required: usize, available: usize },
}

impl std::fmt::Display for DrawError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawError::UnsupportedPrimitive => write!(f, "unsupported primitive type"),
            DrawError::MissingAttribute(attr) => write!(f, "no {:?} buffer bound", attr),
            DrawError::MissingIndexBuffer => write!(f, "no index buffer bound"),
            DrawError::InvalidPositionFormat => write!(f, "position buffer must be Float2"),
            DrawError::BufferTooSmall(attr) => {
                write!(f, "{:?} buffer data is shorter than count * stride", attr)
            }
            DrawError::InvertedIndexRange { start, end } => {
                write!(f, "index range {}..={} is inverted", start, end)
            }
            DrawError::VertexRangeOutOfBounds { required, available } => write!(
                f,
                "draw needs {} positions but only {} are bound",
                required, available
            ),
            DrawError::IndexRangeOutOfBounds { required, available } => write!(
                f,
                "draw reads {} indices but only {} are bound",
                required, available
            ),
        }
    }
}

impl std::error::Error for DrawError {}
