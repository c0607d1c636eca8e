//! 2D affine math and the batch position transform

use serde::{Deserialize, Serialize};

/// 2D affine map from world to screen coordinates:
/// `x' = a*x + c*y + tx`, `y' = b*x + d*y + ty`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Affine2D {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Default for Affine2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine2D {
    pub const IDENTITY: Affine2D = Affine2D { a: 1.0, b: 0.0, c: 0.0, d: 1.0, tx: 0.0, ty: 0.0 };

    pub fn new(a: f32, b: f32, c: f32, d: f32, tx: f32, ty: f32) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    pub fn translation(tx: f32, ty: f32) -> Self {
        Self { tx, ty, ..Self::IDENTITY }
    }

    pub fn scaling(sx: f32, sy: f32) -> Self {
        Self { a: sx, d: sy, ..Self::IDENTITY }
    }

    /// Counter-clockwise rotation in radians (clockwise on a y-down screen)
    pub fn rotation(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self { a: cos, b: sin, c: -sin, d: cos, tx: 0.0, ty: 0.0 }
    }

    /// Apply `self` first, then `next`
    pub fn then(&self, next: &Affine2D) -> Affine2D {
        Affine2D {
            a: next.a * self.a + next.c * self.b,
            b: next.b * self.a + next.d * self.b,
            c: next.a * self.c + next.c * self.d,
            d: next.b * self.c + next.d * self.d,
            tx: next.a * self.tx + next.c * self.ty + next.tx,
            ty: next.b * self.tx + next.d * self.ty + next.ty,
        }
    }

    pub fn translate(self, tx: f32, ty: f32) -> Self {
        self.then(&Self::translation(tx, ty))
    }

    pub fn scale(self, sx: f32, sy: f32) -> Self {
        self.then(&Self::scaling(sx, sy))
    }

    pub fn rotate(self, radians: f32) -> Self {
        self.then(&Self::rotation(radians))
    }

    #[inline(always)]
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a * x + self.c * y + self.tx,
            self.b * x + self.d * y + self.ty,
        )
    }

    /// Map to integer screen space. Truncates toward zero, like a C cast.
    #[inline(always)]
    pub fn apply_to_screen(&self, x: f32, y: f32) -> [i32; 2] {
        let (sx, sy) = self.apply(x, y);
        [sx as i32, sy as i32]
    }
}

/// Transform object-space positions to integer screen positions.
///
/// Converts `min(positions.len(), out.len())` elements. Results are
/// truncated toward zero (so there is a half-pixel bias against rounding to
/// nearest), saturate at the `i32` range and map NaN to 0. Four positions are
/// processed per step with a scalar tail; the output does not depend on how
/// the input is batched.
pub fn transform_positions(positions: &[[f32; 2]], transform: &Affine2D, out: &mut [[i32; 2]]) {
    debug_assert_eq!(positions.len(), out.len());
    let n = positions.len().min(out.len());
    let (positions, out) = (&positions[..n], &mut out[..n]);

    let mut src = positions.chunks_exact(4);
    let mut dst = out.chunks_exact_mut(4);
    for (s, d) in (&mut src).zip(&mut dst) {
        let xs = [s[0][0], s[1][0], s[2][0], s[3][0]];
        let ys = [s[0][1], s[1][1], s[2][1], s[3][1]];
        let mut sx = [0.0f32; 4];
        let mut sy = [0.0f32; 4];
        for i in 0..4 {
            sx[i] = transform.a * xs[i] + transform.c * ys[i] + transform.tx;
            sy[i] = transform.b * xs[i] + transform.d * ys[i] + transform.ty;
        }
        for i in 0..4 {
            d[i] = [sx[i] as i32, sy[i] as i32];
        }
    }

    for (s, d) in src.remainder().iter().zip(dst.into_remainder()) {
        *d = transform.apply_to_screen(s[0], s[1]);
    }
}
