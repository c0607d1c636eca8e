//! Core types for the rasterizer

use serde::{Deserialize, Serialize};

/// Byte layout of a packed 32-bit pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorFormat {
    Rgba,
    Bgra,
}

/// Layout used by every framebuffer in this build (cargo feature `bgra`)
pub const FRAMEBUFFER_FORMAT: ColorFormat = if cfg!(feature = "bgra") {
    ColorFormat::Bgra
} else {
    ColorFormat::Rgba
};

impl ColorFormat {
    /// Bit positions of the (red, green, blue, alpha) channels
    pub const fn shifts(self) -> [u32; 4] {
        match self {
            ColorFormat::Rgba => [0, 8, 16, 24],
            ColorFormat::Bgra => [16, 8, 0, 24],
        }
    }
}

const SHIFTS: [u32; 4] = FRAMEBUFFER_FORMAT.shifts();

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0, a: 255 };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0, a: 255 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255, a: 255 };
    pub const YELLOW: Color = Color { r: 255, g: 255, b: 0, a: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Pack into the framebuffer's 32-bit layout
    pub const fn pack(self) -> u32 {
        pack_channels(self.r as u32, self.g as u32, self.b as u32, self.a as u32)
    }

    /// Unpack a framebuffer pixel
    pub const fn unpack(packed: u32) -> Self {
        Self {
            r: (packed >> SHIFTS[0]) as u8,
            g: (packed >> SHIFTS[1]) as u8,
            b: (packed >> SHIFTS[2]) as u8,
            a: (packed >> SHIFTS[3]) as u8,
        }
    }

    /// Channels in (r, g, b, a) order, as used by color vertex buffers
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::with_alpha(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Pack four channel values; only the low 8 bits of each are kept.
#[inline(always)]
pub(crate) const fn pack_channels(r: u32, g: u32, b: u32, a: u32) -> u32 {
    ((r & 0xFF) << SHIFTS[0])
        | ((g & 0xFF) << SHIFTS[1])
        | ((b & 0xFF) << SHIFTS[2])
        | ((a & 0xFF) << SHIFTS[3])
}

/// Split a packed pixel into (r, g, b, a) channel values
#[inline(always)]
pub(crate) const fn unpack_channels(packed: u32) -> [u32; 4] {
    [
        (packed >> SHIFTS[0]) & 0xFF,
        (packed >> SHIFTS[1]) & 0xFF,
        (packed >> SHIFTS[2]) & 0xFF,
        (packed >> SHIFTS[3]) & 0xFF,
    ]
}

/// Vertex attribute slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Position = 0,
    Color = 1,
}

impl Attribute {
    pub const COUNT: usize = 2;

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Element format of a vertex buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexFormat {
    /// Two native-endian `f32` (positions)
    Float2,
    /// Four `u8` in r, g, b, a order (colors)
    UByte4,
    /// One native-endian `u32` already packed in the framebuffer layout (colors)
    UInt,
}

impl VertexFormat {
    /// Size of one element in bytes
    pub const fn size(self) -> usize {
        match self {
            VertexFormat::Float2 => 8,
            VertexFormat::UByte4 => 4,
            VertexFormat::UInt => 4,
        }
    }

    pub const fn is_color(self) -> bool {
        matches!(self, VertexFormat::UByte4 | VertexFormat::UInt)
    }
}

/// Primitive topology for `draw_primitives`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PrimitiveType {
    TriangleList,
}

impl PrimitiveType {
    /// Decode a raw topology id. Unknown ids decode to `None`.
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(PrimitiveType::TriangleList),
            _ => None,
        }
    }
}

/// Inclusive range of index values referenced by a draw call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRange {
    pub start: u32,
    pub end: u32,
}

impl IndexRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Number of distinct vertices the range covers, `None` when inverted
    pub fn vertex_count(&self) -> Option<usize> {
        if self.end < self.start {
            None
        } else {
            Some((self.end - self.start) as usize + 1)
        }
    }

    pub fn contains(&self, index: u32) -> bool {
        index >= self.start && index <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_roundtrips_named_colors() {
        for c in [Color::BLACK, Color::WHITE, Color::RED, Color::GREEN, Color::BLUE, Color::YELLOW] {
            assert_eq!(Color::unpack(c.pack()), c);
        }
    }

    #[test]
    fn pack_follows_build_format() {
        let packed = Color::with_alpha(0x11, 0x22, 0x33, 0x44).pack();
        match FRAMEBUFFER_FORMAT {
            ColorFormat::Rgba => assert_eq!(packed, 0x4433_2211),
            ColorFormat::Bgra => assert_eq!(packed, 0x4411_2233),
        }
        assert_eq!(unpack_channels(packed), [0x11, 0x22, 0x33, 0x44]);
    }

    #[test]
    fn index_range_counts() {
        assert_eq!(IndexRange::new(2, 5).vertex_count(), Some(4));
        assert_eq!(IndexRange::new(3, 3).vertex_count(), Some(1));
        assert_eq!(IndexRange::new(4, 3).vertex_count(), None);
        assert!(IndexRange::new(2, 5).contains(5));
        assert!(!IndexRange::new(2, 5).contains(1));
    }

    #[test]
    fn unknown_primitive_ids_do_not_decode() {
        assert_eq!(PrimitiveType::from_raw(0), Some(PrimitiveType::TriangleList));
        assert_eq!(PrimitiveType::from_raw(7), None);
    }
}
