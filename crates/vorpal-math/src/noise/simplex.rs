//! Simplex noise implementation.
//!
//! Pure Rust implementation of 2D, 3D and 4D simplex noise based on Stefan
//! Gustavson's reference implementation, hashed through the shared
//! permutation table. 1D noise is the 2D field sampled along `y = 0`.

use super::{fast_floor, Noise};
use crate::permutation::{perm, perm_mod12};

/// Simplex noise generator.
///
/// Stateless: every instance samples the same field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimplexNoise;

impl SimplexNoise {
    /// Skewing factor for 2D: (sqrt(3) - 1) / 2.
    const F2: f64 = 0.3660254037844386;
    /// Unskewing factor for 2D: (3 - sqrt(3)) / 6.
    const G2: f64 = 0.21132486540518713;
    /// Skewing factor for 3D.
    const F3: f64 = 1.0 / 3.0;
    /// Unskewing factor for 3D.
    const G3: f64 = 1.0 / 6.0;
    /// Skewing factor for 4D: (sqrt(5) - 1) / 4.
    const F4: f64 = 0.30901699437494745;
    /// Unskewing factor for 4D: (5 - sqrt(5)) / 20.
    const G4: f64 = 0.1381966011250105;

    /// Gradients to the edge midpoints of a cube. 2D uses the (x, y) part.
    const GRAD3: [[f64; 3]; 12] = [
        [1.0, 1.0, 0.0],
        [-1.0, 1.0, 0.0],
        [1.0, -1.0, 0.0],
        [-1.0, -1.0, 0.0],
        [1.0, 0.0, 1.0],
        [-1.0, 0.0, 1.0],
        [1.0, 0.0, -1.0],
        [-1.0, 0.0, -1.0],
        [0.0, 1.0, 1.0],
        [0.0, -1.0, 1.0],
        [0.0, 1.0, -1.0],
        [0.0, -1.0, -1.0],
    ];

    /// Gradients to the edge midpoints of a 4D hypercube.
    const GRAD4: [[f64; 4]; 32] = [
        [0.0, 1.0, 1.0, 1.0],
        [0.0, 1.0, 1.0, -1.0],
        [0.0, 1.0, -1.0, 1.0],
        [0.0, 1.0, -1.0, -1.0],
        [0.0, -1.0, 1.0, 1.0],
        [0.0, -1.0, 1.0, -1.0],
        [0.0, -1.0, -1.0, 1.0],
        [0.0, -1.0, -1.0, -1.0],
        [1.0, 0.0, 1.0, 1.0],
        [1.0, 0.0, 1.0, -1.0],
        [1.0, 0.0, -1.0, 1.0],
        [1.0, 0.0, -1.0, -1.0],
        [-1.0, 0.0, 1.0, 1.0],
        [-1.0, 0.0, 1.0, -1.0],
        [-1.0, 0.0, -1.0, 1.0],
        [-1.0, 0.0, -1.0, -1.0],
        [1.0, 1.0, 0.0, 1.0],
        [1.0, 1.0, 0.0, -1.0],
        [1.0, -1.0, 0.0, 1.0],
        [1.0, -1.0, 0.0, -1.0],
        [-1.0, 1.0, 0.0, 1.0],
        [-1.0, 1.0, 0.0, -1.0],
        [-1.0, -1.0, 0.0, 1.0],
        [-1.0, -1.0, 0.0, -1.0],
        [1.0, 1.0, 1.0, 0.0],
        [1.0, 1.0, -1.0, 0.0],
        [1.0, -1.0, 1.0, 0.0],
        [1.0, -1.0, -1.0, 0.0],
        [-1.0, 1.0, 1.0, 0.0],
        [-1.0, 1.0, -1.0, 0.0],
        [-1.0, -1.0, 1.0, 0.0],
        [-1.0, -1.0, -1.0, 0.0],
    ];

    /// Radial falloff contribution of one corner: `max(0, r² - d²)^4 * (g . d)`.
    #[inline]
    fn corner(r2: f64, d2: f64, dot: impl FnOnce() -> f64) -> f64 {
        let t = r2 - d2;
        if t < 0.0 {
            0.0
        } else {
            let t2 = t * t;
            t2 * t2 * dot()
        }
    }

    #[inline]
    fn dot2(g: &[f64; 3], x: f64, y: f64) -> f64 {
        g[0] * x + g[1] * y
    }

    #[inline]
    fn dot3(g: &[f64; 3], x: f64, y: f64, z: f64) -> f64 {
        g[0] * x + g[1] * y + g[2] * z
    }

    #[inline]
    fn dot4(g: &[f64; 4], x: f64, y: f64, z: f64, w: f64) -> f64 {
        g[0] * x + g[1] * y + g[2] * z + g[3] * w
    }
}

impl Noise for SimplexNoise {
    fn noise1(&self, x: f64) -> f64 {
        self.noise2(x, 0.0)
    }

    fn noise2(&self, x: f64, y: f64) -> f64 {
        // Skew the input space to determine which simplex cell we're in
        let s = (x + y) * Self::F2;
        let i = fast_floor(x + s);
        let j = fast_floor(y + s);

        // Unskew the cell origin back to (x, y) space
        let t = (i + j) as f64 * Self::G2;
        let x0 = x - (i as f64 - t);
        let y0 = y - (j as f64 - t);

        // For the 2D case, the simplex shape is an equilateral triangle.
        let (i1, j1) = if x0 > y0 {
            (1, 0) // lower triangle, XY order: (0,0)->(1,0)->(1,1)
        } else {
            (0, 1) // upper triangle, YX order: (0,0)->(0,1)->(1,1)
        };

        let x1 = x0 - i1 as f64 + Self::G2;
        let y1 = y0 - j1 as f64 + Self::G2;
        let x2 = x0 - 1.0 + 2.0 * Self::G2;
        let y2 = y0 - 1.0 + 2.0 * Self::G2;

        // Hash coordinates of the three simplex corners
        let ii = (i & 255) as usize;
        let jj = (j & 255) as usize;
        let gi0 = perm_mod12(ii + perm(jj));
        let gi1 = perm_mod12(ii + i1 + perm(jj + j1));
        let gi2 = perm_mod12(ii + 1 + perm(jj + 1));

        let n0 = Self::corner(0.5, x0 * x0 + y0 * y0, || {
            Self::dot2(&Self::GRAD3[gi0], x0, y0)
        });
        let n1 = Self::corner(0.5, x1 * x1 + y1 * y1, || {
            Self::dot2(&Self::GRAD3[gi1], x1, y1)
        });
        let n2 = Self::corner(0.5, x2 * x2 + y2 * y2, || {
            Self::dot2(&Self::GRAD3[gi2], x2, y2)
        });

        // Scale to return values in the interval [-1, 1]
        70.0 * (n0 + n1 + n2)
    }

    fn noise3(&self, x: f64, y: f64, z: f64) -> f64 {
        let s = (x + y + z) * Self::F3;
        let i = fast_floor(x + s);
        let j = fast_floor(y + s);
        let k = fast_floor(z + s);

        let t = (i + j + k) as f64 * Self::G3;
        let x0 = x - (i as f64 - t);
        let y0 = y - (j as f64 - t);
        let z0 = z - (k as f64 - t);

        // The simplex is a slightly irregular tetrahedron; pick it from the
        // magnitude ordering of the offsets.
        let ((i1, j1, k1), (i2, j2, k2)) = if x0 >= y0 {
            if y0 >= z0 {
                ((1, 0, 0), (1, 1, 0)) // X Y Z
            } else if x0 >= z0 {
                ((1, 0, 0), (1, 0, 1)) // X Z Y
            } else {
                ((0, 0, 1), (1, 0, 1)) // Z X Y
            }
        } else if y0 < z0 {
            ((0, 0, 1), (0, 1, 1)) // Z Y X
        } else if x0 < z0 {
            ((0, 1, 0), (0, 1, 1)) // Y Z X
        } else {
            ((0, 1, 0), (1, 1, 0)) // Y X Z
        };

        let x1 = x0 - i1 as f64 + Self::G3;
        let y1 = y0 - j1 as f64 + Self::G3;
        let z1 = z0 - k1 as f64 + Self::G3;
        let x2 = x0 - i2 as f64 + 2.0 * Self::G3;
        let y2 = y0 - j2 as f64 + 2.0 * Self::G3;
        let z2 = z0 - k2 as f64 + 2.0 * Self::G3;
        let x3 = x0 - 1.0 + 3.0 * Self::G3;
        let y3 = y0 - 1.0 + 3.0 * Self::G3;
        let z3 = z0 - 1.0 + 3.0 * Self::G3;

        let ii = (i & 255) as usize;
        let jj = (j & 255) as usize;
        let kk = (k & 255) as usize;
        let gi0 = perm_mod12(ii + perm(jj + perm(kk)));
        let gi1 = perm_mod12(ii + i1 + perm(jj + j1 + perm(kk + k1)));
        let gi2 = perm_mod12(ii + i2 + perm(jj + j2 + perm(kk + k2)));
        let gi3 = perm_mod12(ii + 1 + perm(jj + 1 + perm(kk + 1)));

        let n0 = Self::corner(0.6, x0 * x0 + y0 * y0 + z0 * z0, || {
            Self::dot3(&Self::GRAD3[gi0], x0, y0, z0)
        });
        let n1 = Self::corner(0.6, x1 * x1 + y1 * y1 + z1 * z1, || {
            Self::dot3(&Self::GRAD3[gi1], x1, y1, z1)
        });
        let n2 = Self::corner(0.6, x2 * x2 + y2 * y2 + z2 * z2, || {
            Self::dot3(&Self::GRAD3[gi2], x2, y2, z2)
        });
        let n3 = Self::corner(0.6, x3 * x3 + y3 * y3 + z3 * z3, || {
            Self::dot3(&Self::GRAD3[gi3], x3, y3, z3)
        });

        32.0 * (n0 + n1 + n2 + n3)
    }

    fn noise4(&self, x: f64, y: f64, z: f64, w: f64) -> f64 {
        let s = (x + y + z + w) * Self::F4;
        let i = fast_floor(x + s);
        let j = fast_floor(y + s);
        let k = fast_floor(z + s);
        let l = fast_floor(w + s);

        let t = (i + j + k + l) as f64 * Self::G4;
        let x0 = x - (i as f64 - t);
        let y0 = y - (j as f64 - t);
        let z0 = z - (k as f64 - t);
        let w0 = w - (l as f64 - t);

        // Rank the four offsets with six pairwise comparisons; rank 3 is the
        // largest coordinate.
        let mut rank = [0usize; 4];
        let offsets = [x0, y0, z0, w0];
        for a in 0..4 {
            for b in (a + 1)..4 {
                if offsets[a] > offsets[b] {
                    rank[a] += 1;
                } else {
                    rank[b] += 1;
                }
            }
        }

        // Threshold the ranks to get the integer offsets of the three
        // intermediate corners. The fifth corner is (1, 1, 1, 1).
        let step = |threshold: usize| rank.map(|r| usize::from(r >= threshold));
        let c1 = step(3);
        let c2 = step(2);
        let c3 = step(1);

        let x1 = x0 - c1[0] as f64 + Self::G4;
        let y1 = y0 - c1[1] as f64 + Self::G4;
        let z1 = z0 - c1[2] as f64 + Self::G4;
        let w1 = w0 - c1[3] as f64 + Self::G4;
        let x2 = x0 - c2[0] as f64 + 2.0 * Self::G4;
        let y2 = y0 - c2[1] as f64 + 2.0 * Self::G4;
        let z2 = z0 - c2[2] as f64 + 2.0 * Self::G4;
        let w2 = w0 - c2[3] as f64 + 2.0 * Self::G4;
        let x3 = x0 - c3[0] as f64 + 3.0 * Self::G4;
        let y3 = y0 - c3[1] as f64 + 3.0 * Self::G4;
        let z3 = z0 - c3[2] as f64 + 3.0 * Self::G4;
        let w3 = w0 - c3[3] as f64 + 3.0 * Self::G4;
        let x4 = x0 - 1.0 + 4.0 * Self::G4;
        let y4 = y0 - 1.0 + 4.0 * Self::G4;
        let z4 = z0 - 1.0 + 4.0 * Self::G4;
        let w4 = w0 - 1.0 + 4.0 * Self::G4;

        let ii = (i & 255) as usize;
        let jj = (j & 255) as usize;
        let kk = (k & 255) as usize;
        let ll = (l & 255) as usize;
        let hash = |c: [usize; 4]| {
            perm(ii + c[0] + perm(jj + c[1] + perm(kk + c[2] + perm(ll + c[3])))) % 32
        };
        let gi0 = hash([0, 0, 0, 0]);
        let gi1 = hash(c1);
        let gi2 = hash(c2);
        let gi3 = hash(c3);
        let gi4 = hash([1, 1, 1, 1]);

        let n0 = Self::corner(0.6, x0 * x0 + y0 * y0 + z0 * z0 + w0 * w0, || {
            Self::dot4(&Self::GRAD4[gi0], x0, y0, z0, w0)
        });
        let n1 = Self::corner(0.6, x1 * x1 + y1 * y1 + z1 * z1 + w1 * w1, || {
            Self::dot4(&Self::GRAD4[gi1], x1, y1, z1, w1)
        });
        let n2 = Self::corner(0.6, x2 * x2 + y2 * y2 + z2 * z2 + w2 * w2, || {
            Self::dot4(&Self::GRAD4[gi2], x2, y2, z2, w2)
        });
        let n3 = Self::corner(0.6, x3 * x3 + y3 * y3 + z3 * z3 + w3 * w3, || {
            Self::dot4(&Self::GRAD4[gi3], x3, y3, z3, w3)
        });
        let n4 = Self::corner(0.6, x4 * x4 + y4 * y4 + z4 * z4 + w4 * w4, || {
            Self::dot4(&Self::GRAD4[gi4], x4, y4, z4, w4)
        });

        // Sum up and scale the result to cover the range [-1, 1]
        27.0 * (n0 + n1 + n2 + n3 + n4)
    }
}
