//! swrast: a small CPU triangle rasterizer
//!
//! Draws Gouraud-shaded indexed triangle lists, lines, pixels and bitmap text
//! into a 32-bit framebuffer owned by a [`Context`].

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod logging;
pub mod rasterizer;

pub use rasterizer::*;
