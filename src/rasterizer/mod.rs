//! Software triangle rasterizer
//!
//! Features:
//! - Edge-function coverage with 64-bit integer evaluation
//! - Gouraud shading from per-vertex colors
//! - Indexed triangle lists through borrowed vertex/index buffers
//! - Interchangeable fill strategies (reference, span, tiled), all pixel-identical
//! - Bresenham lines, bitmap text, clears

mod buffer;
mod context;
mod cpu;
mod error;
mod font;
mod math;
mod render;
mod scratch;
mod tiled;
mod triangle;
mod types;

pub use buffer::*;
pub use context::*;
pub use cpu::*;
pub use error::*;
pub use font::*;
pub use math::*;
pub use render::*;
pub use scratch::*;
pub use tiled::*;
pub use triangle::{FillStrategy, ReferenceFill, SpanFill, Triangle, TriangleFill, MAX_COORD};
pub use types::*;
