//! Borrowed vertex and index buffer views

use super::types::{Color, VertexFormat};

/// Typed, strided view over caller vertex data. Never copied or freed.
#[derive(Debug, Clone, Copy)]
pub struct VertexBuffer<'a> {
    bytes: &'a [u8],
    format: VertexFormat,
    /// Bytes between consecutive elements; 0 means tightly packed
    stride: usize,
    count: usize,
}

impl<'a> VertexBuffer<'a> {
    pub fn new(bytes: &'a [u8], format: VertexFormat, stride: usize, count: usize) -> Self {
        Self { bytes, format, stride, count }
    }

    /// Tightly packed `Float2` positions
    pub fn from_positions(positions: &'a [[f32; 2]]) -> Self {
        Self::new(bytemuck::cast_slice(positions), VertexFormat::Float2, 0, positions.len())
    }

    /// Tightly packed `UInt` colors, already in the framebuffer layout
    pub fn from_packed_colors(colors: &'a [u32]) -> Self {
        Self::new(bytemuck::cast_slice(colors), VertexFormat::UInt, 0, colors.len())
    }

    /// Tightly packed `UByte4` colors in (r, g, b, a) order
    pub fn from_rgba8(colors: &'a [[u8; 4]]) -> Self {
        Self::new(bytemuck::cast_slice(colors), VertexFormat::UByte4, 0, colors.len())
    }

    pub fn format(&self) -> VertexFormat {
        self.format
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn stride(&self) -> usize {
        if self.stride == 0 {
            self.format.size()
        } else {
            self.stride
        }
    }

    /// True when `count` elements at `stride` fit inside the data
    pub fn is_complete(&self) -> bool {
        if self.count == 0 {
            return true;
        }
        (self.count - 1)
            .checked_mul(self.stride())
            .and_then(|last| last.checked_add(self.format.size()))
            .is_some_and(|needed| needed <= self.bytes.len())
    }

    fn element(&self, index: usize) -> Option<&'a [u8]> {
        if index >= self.count {
            return None;
        }
        let start = index.checked_mul(self.stride())?;
        self.bytes.get(start..start.checked_add(self.format.size())?)
    }

    /// Position `index`; `None` past the end or for a non-`Float2` buffer
    pub fn position(&self, index: usize) -> Option<[f32; 2]> {
        if self.format != VertexFormat::Float2 {
            return None;
        }
        let bytes = self.element(index)?;
        let x = f32::from_ne_bytes(bytes[0..4].try_into().ok()?);
        let y = f32::from_ne_bytes(bytes[4..8].try_into().ok()?);
        Some([x, y])
    }

    /// Packed color `index`; `None` past the end or for a non-color buffer
    pub fn color(&self, index: usize) -> Option<u32> {
        let bytes = self.element(index)?;
        match self.format {
            VertexFormat::UByte4 => Some(Color::from_bytes(bytes.try_into().ok()?).pack()),
            VertexFormat::UInt => Some(u32::from_ne_bytes(bytes.try_into().ok()?)),
            VertexFormat::Float2 => None,
        }
    }
}

/// View over caller `u16` index data
#[derive(Debug, Clone, Copy)]
pub struct IndexBuffer<'a> {
    indices: &'a [u16],
}

impl<'a> IndexBuffer<'a> {
    pub fn new(indices: &'a [u16]) -> Self {
        Self { indices }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn as_slice(&self) -> &'a [u16] {
        self.indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_positions_read_back() {
        let data = [[1.0, 2.0], [3.5, -4.0]];
        let vb = VertexBuffer::from_positions(&data);
        assert_eq!(vb.stride(), 8);
        assert!(vb.is_complete());
        assert_eq!(vb.position(1), Some([3.5, -4.0]));
        assert_eq!(vb.position(2), None);
        assert_eq!(vb.color(0), None);
    }

    #[test]
    fn strided_positions_skip_interleaved_data() {
        // x, y, pad per vertex
        let floats: [f32; 6] = [1.0, 2.0, 99.0, 5.0, 6.0, 99.0];
        let vb = VertexBuffer::new(bytemuck::cast_slice(&floats), VertexFormat::Float2, 12, 2);
        assert!(vb.is_complete());
        assert_eq!(vb.position(0), Some([1.0, 2.0]));
        assert_eq!(vb.position(1), Some([5.0, 6.0]));
    }

    #[test]
    fn short_data_is_incomplete() {
        let floats: [f32; 3] = [1.0, 2.0, 3.0];
        let vb = VertexBuffer::new(bytemuck::cast_slice(&floats), VertexFormat::Float2, 0, 2);
        assert!(!vb.is_complete());
        assert_eq!(vb.position(0), Some([1.0, 2.0]));
        assert_eq!(vb.position(1), None);
    }

    #[test]
    fn color_formats_decode_to_packed_pixels() {
        let rgba = [[255, 0, 0, 255], [0, 0, 255, 128]];
        let vb = VertexBuffer::from_rgba8(&rgba);
        assert_eq!(vb.color(0), Some(Color::RED.pack()));
        assert_eq!(vb.color(1), Some(Color::with_alpha(0, 0, 255, 128).pack()));

        let packed = [Color::GREEN.pack()];
        let vb = VertexBuffer::from_packed_colors(&packed);
        assert_eq!(vb.format(), VertexFormat::UInt);
        assert_eq!(vb.color(0), Some(Color::GREEN.pack()));
    }

    #[test]
    fn index_buffer_is_a_view() {
        let data = [0u16, 1, 2];
        let ib = IndexBuffer::new(&data);
        assert_eq!(ib.len(), 3);
        assert!(!ib.is_empty());
        assert_eq!(ib.as_slice(), &data);
    }
}
