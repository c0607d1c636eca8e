//! Triangle setup and the scalar fill strategies.
//!
//! Every strategy shares [`TriangleSetup`]: winding canonicalization, the
//! clipped bounding box, the three edge functions and the color
//! interpolators. Strategies differ only in how they find covered pixels, and
//! they all evaluate coverage and color from the same exact integer edge
//! values, so their output is pixel-identical.
//!
//! Edge functions follow
//! <https://fgiesen.wordpress.com/2013/02/08/triangle-rasterization-in-practice/>.
//! No fill rule is applied: pixels lying exactly on an edge are drawn.

use serde::{Deserialize, Serialize};

use super::cpu::CpuFeatures;
use super::render::Framebuffer;
use super::scratch::Scratch;
use super::tiled::TiledFill;
use super::types::{pack_channels, unpack_channels};

/// Vertices beyond this distance from the origin are rejected; it keeps
/// every edge product inside `i64`.
pub const MAX_COORD: i32 = 1 << 29;

/// A screen-space triangle with one packed color per vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub positions: [[i32; 2]; 3],
    pub colors: [u32; 3],
}

impl Triangle {
    pub fn new(p0: [i32; 2], p1: [i32; 2], p2: [i32; 2], c0: u32, c1: u32, c2: u32) -> Self {
        Self {
            positions: [p0, p1, p2],
            colors: [c0, c1, c2],
        }
    }

    /// Doubled signed area; positive for the canonical winding
    pub fn signed_area(&self) -> i64 {
        let [[x0, y0], [x1, y1], [x2, y2]] = self.positions.map(|p| p.map(i64::from));
        (x0 - x2) * (y1 - y0) - (x1 - x0) * (y0 - y2)
    }

    /// Counter-clockwise copy (vertex 1 and 2 swapped with their colors when
    /// needed) and its positive area; `None` for zero area or coordinates
    /// past [`MAX_COORD`].
    fn canonical(&self) -> Option<(Triangle, i64, bool)> {
        let in_range = |v: &i32| (-MAX_COORD..=MAX_COORD).contains(v);
        if !self.positions.iter().flatten().all(in_range) {
            log::trace!("triangle {:?} exceeds the coordinate range", self.positions);
            return None;
        }

        let area = self.signed_area();
        if area == 0 {
            None
        } else if area < 0 {
            let [p0, p1, p2] = self.positions;
            let [c0, c1, c2] = self.colors;
            Some((Triangle::new(p0, p2, p1, c0, c2, c1), -area, true))
        } else {
            Some((*self, area, false))
        }
    }

    fn edges(&self) -> [Edge; 3] {
        let [p0, p1, p2] = self.positions.map(|p| p.map(i64::from));
        [
            Edge::new(p2[0], p2[1], p1[0], p1[1]),
            Edge::new(p0[0], p0[1], p2[0], p2[1]),
            Edge::new(p1[0], p1[1], p0[0], p0[1]),
        ]
    }

    /// Barycentric weights of pixel (x, y), in this triangle's vertex order,
    /// when the triangle covers it. Ignores the framebuffer bounds.
    pub fn barycentric(&self, x: i32, y: i32) -> Option<[f32; 3]> {
        let (ccw, area, swapped) = self.canonical()?;
        let [w0, w1, w2] = ccw.edges().map(|e| e.eval(x as i64, y as i64));
        if (w0 | w1 | w2) < 0 {
            return None;
        }
        let area = area as f32;
        let l = [w0 as f32 / area, w1 as f32 / area, w2 as f32 / area];
        Some(if swapped { [l[0], l[2], l[1]] } else { l })
    }
}

/// One edge function: `(x - x0) * dx + (y - y0) * dy`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Edge {
    pub x0: i64,
    pub y0: i64,
    pub dx: i64,
    pub dy: i64,
}

impl Edge {
    pub fn new(x0: i64, y0: i64, x1: i64, y1: i64) -> Self {
        Self { x0, y0, dx: y1 - y0, dy: x0 - x1 }
    }

    #[inline(always)]
    pub fn eval(&self, x: i64, y: i64) -> i64 {
        (x - self.x0) * self.dx + (y - self.y0) * self.dy
    }
}

/// Interpolation coefficients for one color channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct VertexAttribInterp {
    pub val2: f32,
    pub d02: f32,
    pub d12: f32,
}

impl VertexAttribInterp {
    fn new(v0: u32, v1: u32, v2: u32) -> Self {
        Self {
            val2: v2 as f32,
            d02: (v0 as i32 - v2 as i32) as f32,
            d12: (v1 as i32 - v2 as i32) as f32,
        }
    }

    // attr = a0*l0 + a1*l1 + a2*(1 - l0 - l1) = (a0 - a2)*l0 + (a1 - a2)*l1 + a2
    #[inline(always)]
    pub fn eval(&self, l0: f32, l1: f32) -> f32 {
        self.d02 * l0 + self.d12 * l1 + self.val2
    }
}

/// Everything a fill strategy needs for one triangle
#[derive(Debug, Clone)]
pub(crate) struct TriangleSetup {
    pub edges: [Edge; 3],
    inv_area: f32,
    channels: [VertexAttribInterp; 4],
    /// Set when all three vertex colors are equal
    pub constant_color: Option<u32>,
    pub min_x: i64,
    pub min_y: i64,
    pub max_x: i64,
    pub max_y: i64,
}

impl TriangleSetup {
    /// `None` when the triangle draws nothing: zero area, box clipped away,
    /// or coordinates past [`MAX_COORD`].
    pub fn new(tri: &Triangle, width: usize, height: usize) -> Option<Self> {
        // Make sure the triangle is CCW. If it's not swap points 1 and 2.
        let (ccw, area, _) = tri.canonical()?;
        let [p0, p1, p2] = ccw.positions.map(|p| p.map(i64::from));
        let [c0, c1, c2] = ccw.colors;

        let min_x = p0[0].min(p1[0]).min(p2[0]).max(0);
        let min_y = p0[1].min(p1[1]).min(p2[1]).max(0);
        let max_x = p0[0].max(p1[0]).max(p2[0]).min(width as i64 - 1);
        let max_y = p0[1].max(p1[1]).max(p2[1]).min(height as i64 - 1);
        if max_x - min_x <= 0 || max_y - min_y <= 0 {
            return None;
        }

        let [r0, g0, b0, a0] = unpack_channels(c0);
        let [r1, g1, b1, a1] = unpack_channels(c1);
        let [r2, g2, b2, a2] = unpack_channels(c2);

        Some(Self {
            edges: ccw.edges(),
            inv_area: 1.0 / area as f32,
            channels: [
                VertexAttribInterp::new(r0, r1, r2),
                VertexAttribInterp::new(g0, g1, g2),
                VertexAttribInterp::new(b0, b1, b2),
                VertexAttribInterp::new(a0, a1, a2),
            ],
            constant_color: (c0 == c1 && c1 == c2).then_some(c0),
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// Edge function values at a pixel
    #[inline(always)]
    pub fn weights(&self, x: i64, y: i64) -> [i64; 3] {
        [
            self.edges[0].eval(x, y),
            self.edges[1].eval(x, y),
            self.edges[2].eval(x, y),
        ]
    }

    /// Interpolated packed color from the first two edge values
    #[inline(always)]
    pub fn shade(&self, w0: i64, w1: i64) -> u32 {
        let l0 = w0 as f32 * self.inv_area;
        let l1 = w1 as f32 * self.inv_area;
        let [r, g, b, a] = self.channels.map(|ch| ch.eval(l0, l1) as u8 as u32);
        pack_channels(r, g, b, a)
    }

    #[inline(always)]
    pub fn row_offset(&self, y: i64, width: usize) -> usize {
        y as usize * width
    }
}

/// A triangle fill implementation
pub trait TriangleFill {
    /// Rasterize `tri` into `fb`; `scratch` may hold per-call data.
    fn fill(&self, tri: &Triangle, fb: &mut Framebuffer, scratch: &mut Scratch);
}

/// Evaluates every pixel of the clipped bounding box
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceFill;

impl TriangleFill for ReferenceFill {
    fn fill(&self, tri: &Triangle, fb: &mut Framebuffer, _scratch: &mut Scratch) {
        let width = fb.width();
        let Some(setup) = TriangleSetup::new(tri, width, fb.height()) else {
            return;
        };
        let [e0, e1, e2] = setup.edges;
        let pixels = fb.pixels_mut();

        let mut w_row = setup.weights(setup.min_x, setup.min_y);
        for y in setup.min_y..=setup.max_y {
            let row = setup.row_offset(y, width);
            let [mut w0, mut w1, mut w2] = w_row;
            for x in setup.min_x..=setup.max_x {
                if (w0 | w1 | w2) >= 0 {
                    pixels[row + x as usize] = setup.shade(w0, w1);
                }
                w0 += e0.dx;
                w1 += e1.dx;
                w2 += e2.dx;
            }
            w_row[0] += e0.dy;
            w_row[1] += e1.dy;
            w_row[2] += e2.dy;
        }
    }
}

/// Solves each row's covered x interval exactly, then shades it
#[derive(Debug, Clone, Copy, Default)]
pub struct SpanFill;

/// Inclusive range of steps `i` in `0..=last` with `w + i * dx >= 0`
#[inline(always)]
fn edge_span(w: i64, dx: i64, last: i64) -> Option<(i64, i64)> {
    if w >= 0 {
        if dx >= 0 {
            Some((0, last))
        } else {
            Some((0, (w / -dx).min(last)))
        }
    } else if dx > 0 {
        let first = (-w + dx - 1) / dx;
        (first <= last).then_some((first, last))
    } else {
        None
    }
}

impl TriangleFill for SpanFill {
    fn fill(&self, tri: &Triangle, fb: &mut Framebuffer, _scratch: &mut Scratch) {
        let width = fb.width();
        let Some(setup) = TriangleSetup::new(tri, width, fb.height()) else {
            return;
        };
        let [e0, e1, e2] = setup.edges;
        let last = setup.max_x - setup.min_x;
        let pixels = fb.pixels_mut();

        let mut w_row = setup.weights(setup.min_x, setup.min_y);
        for y in setup.min_y..=setup.max_y {
            let span = edge_span(w_row[0], e0.dx, last)
                .zip(edge_span(w_row[1], e1.dx, last))
                .zip(edge_span(w_row[2], e2.dx, last))
                .map(|((a, b), c)| (a.0.max(b.0).max(c.0), a.1.min(b.1).min(c.1)));

            if let Some((lo, hi)) = span {
                let row = setup.row_offset(y, width) + setup.min_x as usize;
                let mut w0 = w_row[0] + lo * e0.dx;
                let mut w1 = w_row[1] + lo * e1.dx;
                for i in lo..=hi {
                    pixels[row + i as usize] = setup.shade(w0, w1);
                    w0 += e0.dx;
                    w1 += e1.dx;
                }
            }

            w_row[0] += e0.dy;
            w_row[1] += e1.dy;
            w_row[2] += e2.dy;
        }
    }
}

/// Which fill implementation a context uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillStrategy {
    Reference,
    Span,
    Tiled4x4,
    Tiled8x8,
}

impl FillStrategy {
    pub const ALL: [FillStrategy; 4] = [
        FillStrategy::Reference,
        FillStrategy::Span,
        FillStrategy::Tiled4x4,
        FillStrategy::Tiled8x8,
    ];

    /// Pick the fastest strategy for the probed CPU
    pub fn select(features: CpuFeatures) -> Self {
        if features.contains(CpuFeatures::AVX2 | CpuFeatures::FMA) {
            FillStrategy::Tiled8x8
        } else if features.intersects(CpuFeatures::SSE2 | CpuFeatures::NEON) {
            FillStrategy::Tiled4x4
        } else {
            FillStrategy::Span
        }
    }

    pub fn fill(self, tri: &Triangle, fb: &mut Framebuffer, scratch: &mut Scratch) {
        match self {
            FillStrategy::Reference => ReferenceFill.fill(tri, fb, scratch),
            FillStrategy::Span => SpanFill.fill(tri, fb, scratch),
            FillStrategy::Tiled4x4 => TiledFill::<4, 4>.fill(tri, fb, scratch),
            FillStrategy::Tiled8x8 => TiledFill::<8, 8>.fill(tri, fb, scratch),
        }
    }
}
