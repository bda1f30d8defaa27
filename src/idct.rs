//! An 8x8 inverse DCT over double precision floats
//!
//! The transform is the 2-D type-III DCT with the decoder side
//! normalization: sample `(x, y)` is
//! `(1/4) * sum_u sum_v a(u) * a(v) * C[v][u] * cos((2x+1)u*pi/16) * cos((2y+1)v*pi/16)`
//! with `a(0) = 1/sqrt(2)` and `a(k) = 1` otherwise. We run it as two 1-D
//! passes, rows then columns, each carrying a 0.5 scale.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

use crate::misc::DCT_BLOCK;

/// Precomputed cosine basis for the inverse transform
///
/// Built once per decode call and reused for every block of the scan.
pub(crate) struct Idct {
    /// `basis[x][u] = a(u) * cos((2x + 1) * u * pi / 16)`
    basis: [[f64; 8]; 8],
}

impl Idct {
    pub fn new() -> Idct {
        let mut basis = [[0.0; 8]; 8];

        for (x, row) in basis.iter_mut().enumerate() {
            for (u, entry) in row.iter_mut().enumerate() {
                let alpha = if u == 0 { FRAC_1_SQRT_2 } else { 1.0 };
                let angle = ((2 * x + 1) * u) as f64 * PI / 16.0;

                *entry = alpha * angle.cos();
            }
        }

        Idct { basis }
    }

    /// Transform 64 coefficients in natural order into spatial samples,
    /// in place
    pub fn inverse(&self, block: &mut [f64; DCT_BLOCK]) {
        let mut rows = [0.0; DCT_BLOCK];

        for y in 0..8 {
            for x in 0..8 {
                let mut acc = 0.0;

                for u in 0..8 {
                    acc += self.basis[x][u] * block[y * 8 + u];
                }

                rows[y * 8 + x] = acc * 0.5;
            }
        }

        for y in 0..8 {
            for x in 0..8 {
                let mut acc = 0.0;

                for v in 0..8 {
                    acc += self.basis[y][v] * rows[v * 8 + x];
                }

                block[y * 8 + x] = acc * 0.5;
            }
        }
    }
}
