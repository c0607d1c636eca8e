//! Framebuffer storage and the non-interpolated draws (pixel, line, text)

use super::error::ContextError;
use super::font::Font;

/// Four pixels with 16-byte alignment; the framebuffer is stored as these
#[derive(Debug, Clone, Copy, Default, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C, align(16))]
struct PixelBlock([u32; 4]);

/// Framebuffer for software rendering: row-major packed pixels
pub struct Framebuffer {
    blocks: Vec<PixelBlock>,
    len: usize,
    width: usize,
    height: usize,
}

impl Framebuffer {
    /// Allocate a zeroed framebuffer.
    ///
    /// Dimensions must be non-zero and fit the `i32` coordinate space.
    pub fn new(width: u32, height: u32) -> Result<Self, ContextError> {
        if width == 0 || height == 0 {
            return Err(ContextError::ZeroSize);
        }
        let too_large = ContextError::TooLarge { width, height };
        if width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(too_large);
        }
        let len = (width as usize).checked_mul(height as usize).ok_or(too_large.clone())?;
        let block_count = len.div_ceil(4);
        let bytes = block_count.checked_mul(std::mem::size_of::<PixelBlock>()).ok_or(too_large)?;

        let mut blocks = Vec::new();
        blocks
            .try_reserve_exact(block_count)
            .map_err(|_| ContextError::OutOfMemory { bytes })?;
        blocks.resize(block_count, PixelBlock::default());

        Ok(Self {
            blocks,
            len,
            width: width as usize,
            height: height as usize,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// All pixels, row-major; the slice starts on a 16-byte boundary
    pub fn pixels(&self) -> &[u32] {
        &bytemuck::cast_slice::<PixelBlock, u32>(&self.blocks)[..self.len]
    }

    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut bytemuck::cast_slice_mut::<PixelBlock, u32>(&mut self.blocks)[..self.len]
    }

    /// Pixels as raw bytes (4 per pixel, in `FRAMEBUFFER_FORMAT` order on little-endian hosts)
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.pixels())
    }

    pub fn get(&self, x: i32, y: i32) -> Option<u32> {
        self.index_of(x, y).map(|i| self.pixels()[i])
    }

    #[inline(always)]
    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            None
        } else {
            Some(x as usize + y as usize * self.width)
        }
    }

    pub fn clear(&mut self, color: u32) {
        self.pixels_mut().fill(color);
    }

    /// Bounds-checked single pixel write
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(i) = self.index_of(x, y) {
            self.pixels_mut()[i] = color;
        }
    }

    /// Pixel write for coordinates that may lie outside the `i32` range
    #[inline]
    fn plot(&mut self, x: i64, y: i64, color: u32) {
        if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
            self.set_pixel(x, y, color);
        }
    }

    /// Draw a line from (x0, y0) to (x1, y1) using Bresenham's algorithm.
    /// Steep lines are walked along y; both endpoints are drawn.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
        let (mut x0, mut y0, mut x1, mut y1) = (x0 as i64, y0 as i64, x1 as i64, y1 as i64);
        let steep = (x0 - x1).abs() < (y0 - y1).abs();
        if steep {
            std::mem::swap(&mut x0, &mut y0);
            std::mem::swap(&mut x1, &mut y1);
        }
        if x0 > x1 {
            std::mem::swap(&mut x0, &mut x1);
            std::mem::swap(&mut y0, &mut y1);
        }

        let dx = x1 - x0;
        let derror2 = (y1 - y0).abs() * 2;
        let yinc = if y1 > y0 { 1 } else { -1 };

        // Only walk the part of the major axis that lands on the framebuffer
        let major_len = if steep { self.height } else { self.width } as i64;
        let first = x0.max(0);
        let last = x1.min(major_len - 1);
        if first > last {
            return;
        }

        // Error term after stepping from x0 to `first`; it stays in (-dx, dx]
        let walked = (first - x0) as i128 * derror2 as i128;
        let (dx_wide, twice_dx) = (dx as i128, 2 * dx as i128);
        let ysteps = if walked > dx_wide {
            (walked - dx_wide + twice_dx - 1) / twice_dx
        } else {
            0
        };
        let mut error2 = (walked - ysteps * twice_dx) as i64;
        let mut y = y0 + ysteps as i64 * yinc;

        for x in first..=last {
            if steep {
                self.plot(y, x, color);
            } else {
                self.plot(x, y, color);
            }

            error2 += derror2;
            if error2 > dx {
                y += yinc;
                error2 -= dx * 2;
            }
        }
    }

    /// Blit `text` one byte per glyph, starting with the glyph's top-left at (x, y)
    pub fn draw_text(&mut self, font: &Font<'_>, x: i32, y: i32, text: &str, color: u32) {
        let advance = font.glyph_width as i64;
        let mut pen_x = x as i64;
        for ch in text.bytes() {
            if pen_x >= self.width as i64 {
                break;
            }
            if let Some(rows) = font.glyph_rows(font.glyph_index(ch)) {
                for (gy, bits) in rows.iter().enumerate() {
                    for gx in 0..font.glyph_width {
                        if bits & (1 << gx) != 0 {
                            self.plot(pen_x + gx as i64, y as i64 + gy as i64, color);
                        }
                    }
                }
            }
            pen_x += advance;
        }
    }
}
