//! # Matrix Rig
//!
//! Six potentiometers (three two-axis sticks spaced 120° apart) combined by
//! a fixed 6×6 integer coefficient matrix:
//!
//! ```text
//! raw[i] = (Σ_j coeff[i][j] * normalized[j]) / speed_divisor
//! ```
//!
//! Rows are output axes in computed order `[x, y, z, rx, ry, rz]`, columns
//! are input channels `[s1u, s1v, s2u, s2v, s3u, s3v]`. The division
//! truncates toward zero.
//!
//! The computed rotation axes do not line up with the host's 3D mouse
//! convention, so [`AXIS_REMAP`] reorders and negates them before dispatch.

use super::{KinematicMapper, MotionVector};

/// Number of potentiometer channels on the matrix rig
pub const MATRIX_CHANNELS: usize = 6;

/// Row = output axis, column = contribution of one normalized channel
pub type CoefficientMatrix = [[i32; MATRIX_CHANNELS]; 6];

/// Default divisor applied after the matrix product
pub const DEFAULT_SPEED_DIVISOR: i32 = 16;

/// Hand-tuned coefficients for the three-stick rig
pub const DEFAULT_COEFFICIENTS: CoefficientMatrix = [
    // s1u s1v s2u s2v s3u s3v
    [-8, 0, 4, 0, 4, 0],  // x
    [0, 0, -7, 0, 7, 0],  // y
    [0, 5, 0, 5, 0, 5],   // z
    [0, 8, 0, -4, 0, -4], // rx
    [0, 0, 0, 7, 0, -7],  // ry
    [5, 0, 5, 0, 5, 0],   // rz
];

/// Dispatched axis `i` takes computed axis `AXIS_REMAP[i].0`, times `AXIS_REMAP[i].1`.
///
/// Translation passes through; RX is the negated computed RY, RY is the
/// computed RX and RZ is negated.
pub const AXIS_REMAP: [(usize, i32); 6] = [(0, 1), (1, 1), (2, 1), (4, -1), (3, 1), (5, -1)];

/// Six-potentiometer coefficient-matrix mapper.
#[derive(Debug, Clone)]
pub struct MatrixRig {
    coefficients: CoefficientMatrix,
    speed_divisor: i32,
}

impl Default for MatrixRig {
    fn default() -> Self {
        Self::new(DEFAULT_COEFFICIENTS, DEFAULT_SPEED_DIVISOR)
    }
}

impl MatrixRig {
    /// Creates a mapper from a coefficient matrix and divisor.
    ///
    /// `speed_divisor` must be non-zero. [`Config::validate`] rejects zero,
    /// so a zero here is a build defect and trips a debug assertion.
    ///
    /// [`Config::validate`]: crate::config::Config::validate
    #[must_use]
    pub fn new(coefficients: CoefficientMatrix, speed_divisor: i32) -> Self {
        debug_assert_ne!(speed_divisor, 0, "speed divisor must be non-zero");
        Self {
            coefficients,
            speed_divisor,
        }
    }

    /// Divisor applied after the matrix product.
    #[must_use]
    pub fn speed_divisor(&self) -> i32 {
        self.speed_divisor
    }

    /// Matrix product in computed axis order, before remapping.
    #[must_use]
    pub fn raw_axes(&self, normalized: &[i32]) -> [i32; 6] {
        let mut out = [0i32; 6];
        for (axis, row) in out.iter_mut().zip(&self.coefficients) {
            let sum: i64 = row
                .iter()
                .zip(&normalized[..MATRIX_CHANNELS])
                .map(|(&c, &n)| i64::from(c) * i64::from(n))
                .sum();
            let scaled = sum / i64::from(self.speed_divisor);
            *axis = scaled.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        }
        out
    }
}

/// Reorders and negates computed axes into the dispatched layout.
#[must_use]
pub fn remap_axes(raw: [i32; 6]) -> [i32; 6] {
    let mut out = [0i32; 6];
    for (slot, &(source, sign)) in out.iter_mut().zip(&AXIS_REMAP) {
        *slot = raw[source].saturating_mul(sign);
    }
    out
}

impl KinematicMapper for MatrixRig {
    fn channel_count(&self) -> usize {
        MATRIX_CHANNELS
    }

    fn map(&self, normalized: &[i32]) -> MotionVector {
        MotionVector::from_axes(remap_axes(self.raw_axes(normalized)))
    }
}
