//! Block-based triangle fill.
//!
//! The clipped bounding box is walked in `W`x`H` blocks aligned to the
//! framebuffer origin. For each block, every edge function is evaluated at
//! its trivial reject corner (the corner most positive along `(dx, dy)`); a
//! negative value there means the block is entirely outside that edge. If the
//! trivial accept corner (the most negative one) is non-negative for all three
//! edges, the block is fully covered and no per-pixel test runs. Surviving
//! blocks are recorded as [`TileDescriptor`]s in the scratch arena and shaded
//! in a second pass.

use super::render::Framebuffer;
use super::scratch::Scratch;
use super::triangle::{Triangle, TriangleFill, TriangleSetup};

/// Coverage record for one block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileDescriptor {
    /// Bit `row * W + col` is set for each covered pixel
    pub coverage: u64,
    /// Framebuffer index of the block's top-left pixel
    pub offset: usize,
    /// Edge 0 and edge 1 values at the block's top-left pixel
    pub w: [i64; 2],
}

/// Tiled fill with `W`x`H` blocks (`W * H <= 64`)
#[derive(Debug, Clone, Copy, Default)]
pub struct TiledFill<const W: usize, const H: usize>;

impl<const W: usize, const H: usize> TiledFill<W, H> {
    const VALID: () = assert!(W > 0 && H > 0 && W <= 8 && W * H <= 64);

    /// Mask of the pixels in rows `r_lo..=r_hi`, columns `c_lo..=c_hi`
    #[inline(always)]
    fn rect_mask(r_lo: usize, r_hi: usize, c_lo: usize, c_hi: usize) -> u64 {
        let row_bits = ((1u64 << (c_hi - c_lo + 1)) - 1) << c_lo;
        (r_lo..=r_hi).fold(0, |mask, r| mask | (row_bits << (r * W)))
    }

    /// Record every block the triangle touches
    fn bin(setup: &TriangleSetup, width: usize, tiles: &mut Vec<TileDescriptor>) {
        let (w, h) = (W as i64, H as i64);
        let edges = setup.edges;

        let mut reject_offset = [0i64; 3];
        let mut accept_offset = [0i64; 3];
        for (i, e) in edges.iter().enumerate() {
            let max_dx = e.dx * (w - 1);
            let max_dy = e.dy * (h - 1);
            reject_offset[i] = max_dx.max(0) + max_dy.max(0);
            accept_offset[i] = max_dx + max_dy - reject_offset[i];
        }

        let block_min_x = setup.min_x - setup.min_x % w;
        let block_min_y = setup.min_y - setup.min_y % h;
        let mut w_block_row = setup.weights(block_min_x, block_min_y);

        let mut by = block_min_y;
        while by <= setup.max_y {
            let r_lo = (setup.min_y - by).max(0) as usize;
            let r_hi = (setup.max_y - by).min(h - 1) as usize;
            let mut w_block = w_block_row;

            let mut bx = block_min_x;
            while bx <= setup.max_x {
                let rejected = (0..3).any(|i| w_block[i] + reject_offset[i] < 0);
                if !rejected {
                    let c_lo = (setup.min_x - bx).max(0) as usize;
                    let c_hi = (setup.max_x - bx).min(w - 1) as usize;
                    let accepted = (0..3).all(|i| w_block[i] + accept_offset[i] >= 0);

                    let coverage = if accepted {
                        Self::rect_mask(r_lo, r_hi, c_lo, c_hi)
                    } else {
                        Self::partial_coverage(setup, w_block, r_lo, r_hi, c_lo, c_hi)
                    };

                    if coverage != 0 {
                        tiles.push(TileDescriptor {
                            coverage,
                            offset: bx as usize + by as usize * width,
                            w: [w_block[0], w_block[1]],
                        });
                    }
                }

                for i in 0..3 {
                    w_block[i] += edges[i].dx * w;
                }
                bx += w;
            }

            for i in 0..3 {
                w_block_row[i] += edges[i].dy * h;
            }
            by += h;
        }
    }

    fn partial_coverage(
        setup: &TriangleSetup,
        w_block: [i64; 3],
        r_lo: usize,
        r_hi: usize,
        c_lo: usize,
        c_hi: usize,
    ) -> u64 {
        let [e0, e1, e2] = setup.edges;
        let mut coverage = 0u64;
        for r in r_lo..=r_hi {
            let (ri, ci) = (r as i64, c_lo as i64);
            let mut w0 = w_block[0] + ri * e0.dy + ci * e0.dx;
            let mut w1 = w_block[1] + ri * e1.dy + ci * e1.dx;
            let mut w2 = w_block[2] + ri * e2.dy + ci * e2.dx;
            for c in c_lo..=c_hi {
                if (w0 | w1 | w2) >= 0 {
                    coverage |= 1 << (r * W + c);
                }
                w0 += e0.dx;
                w1 += e1.dx;
                w2 += e2.dx;
            }
        }
        coverage
    }

    /// Write the pixels of every recorded tile
    fn shade(setup: &TriangleSetup, tiles: &[TileDescriptor], pixels: &mut [u32], width: usize) {
        let [e0, e1, _] = setup.edges;
        for tile in tiles {
            let mut mask = tile.coverage;
            while mask != 0 {
                let bit = mask.trailing_zeros() as usize;
                mask &= mask - 1;
                let (r, c) = (bit / W, bit % W);
                let index = tile.offset + r * width + c;

                pixels[index] = match setup.constant_color {
                    Some(color) => color,
                    None => {
                        let (ri, ci) = (r as i64, c as i64);
                        let w0 = tile.w[0] + ri * e0.dy + ci * e0.dx;
                        let w1 = tile.w[1] + ri * e1.dy + ci * e1.dx;
                        setup.shade(w0, w1)
                    }
                };
            }
        }
    }
}

impl<const W: usize, const H: usize> TriangleFill for TiledFill<W, H> {
    fn fill(&self, tri: &Triangle, fb: &mut Framebuffer, scratch: &mut Scratch) {
        #[allow(clippy::let_unit_value)]
        let () = Self::VALID;

        let width = fb.width();
        let Some(setup) = TriangleSetup::new(tri, width, fb.height()) else {
            return;
        };

        scratch.tiles.clear();
        Self::bin(&setup, width, &mut scratch.tiles);
        Self::shade(&setup, &scratch.tiles, fb.pixels_mut(), width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::types::Color;

    fn binned<const W: usize, const H: usize>(tri: &Triangle, w: usize, h: usize) -> Vec<TileDescriptor> {
        let setup = TriangleSetup::new(tri, w, h).unwrap();
        let mut tiles = Vec::new();
        TiledFill::<W, H>::bin(&setup, w, &mut tiles);
        tiles
    }

    #[test]
    fn rect_mask_selects_rows_and_columns() {
        assert_eq!(TiledFill::<4, 4>::rect_mask(0, 3, 0, 3), 0xFFFF);
        assert_eq!(TiledFill::<4, 4>::rect_mask(1, 1, 1, 2), 0b0110 << 4);
        assert_eq!(TiledFill::<8, 8>::rect_mask(0, 7, 0, 7), u64::MAX);
    }

    #[test]
    fn interior_blocks_are_fully_covered() {
        let white = Color::WHITE.pack();
        let tri = Triangle::new([0, 0], [63, 0], [0, 63], white, white, white);
        let tiles = binned::<4, 4>(&tri, 64, 64);
        // The block at (4, 4) lies well inside the triangle
        let inner = tiles.iter().find(|t| t.offset == 4 + 4 * 64).unwrap();
        assert_eq!(inner.coverage, 0xFFFF);
        // Blocks past the hypotenuse are never recorded
        assert!(tiles.iter().all(|t| t.offset != 60 + 60 * 64));
    }

    #[test]
    fn coverage_is_clipped_to_the_framebuffer() {
        let white = Color::WHITE.pack();
        // Width 10 is not a multiple of the block size
        let tri = Triangle::new([-5, -5], [40, -5], [-5, 40], white, white, white);
        let tiles = binned::<8, 8>(&tri, 10, 10);
        for t in &tiles {
            let (bx, by) = (t.offset % 10, t.offset / 10);
            let mut mask = t.coverage;
            while mask != 0 {
                let bit = mask.trailing_zeros() as usize;
                mask &= mask - 1;
                assert!(bx + bit % 8 < 10);
                assert!(by + bit / 8 < 10);
            }
        }
    }

    #[test]
    fn tile_buffer_lives_in_scratch() {
        let mut fb = Framebuffer::new(32, 32).unwrap();
        let mut scratch = Scratch::default();
        let tri = Triangle::new([1, 1], [30, 2], [5, 29], 1, 2, 3);
        TiledFill::<4, 4>.fill(&tri, &mut fb, &mut scratch);
        assert!(!scratch.tiles.is_empty());
    }
}
