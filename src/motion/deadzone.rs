//! # Deadzone and Clamp
//!
//! Zeroes sensor noise near rest and saturates to the descriptor's logical
//! range.
//!
//! For every output scalar `v`:
//!
//! - `|v| < threshold` → 0
//! - `|v| > saturation` → `±saturation`
//! - otherwise `v` unchanged
//!
//! The same threshold decides the per-group [`ActiveChannelFlags`]: zoom and
//! roll are active above `threshold`, pan and orbit when the sum of their two
//! magnitudes exceeds `2 * threshold`.
//!
//! ## Usage
//!
//! ```
//! use spacestick::motion::deadzone::DeadzoneClamp;
//!
//! let dz = DeadzoneClamp::new(32, 500);
//! assert_eq!(dz.apply_scalar(20), 0);
//! assert_eq!(dz.apply_scalar(-120), -120);
//! assert_eq!(dz.apply_scalar(900), 500);
//! ```

use super::{ActiveChannelFlags, Axis3, MotionVector};

/// Logical range of every axis in the HID descriptor.
pub const OUTPUT_LIMIT: i32 = 500;

/// Default deadzone threshold in normalized ADC counts.
pub const DEFAULT_THRESHOLD: i32 = 32;

/// Deadzone gate followed by range saturation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadzoneClamp {
    threshold: i32,
    saturation: i32,
}

impl Default for DeadzoneClamp {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD, OUTPUT_LIMIT)
    }
}

impl DeadzoneClamp {
    /// Creates a gate with the given threshold and saturation bound.
    ///
    /// Negative values are treated as their magnitude.
    #[must_use]
    pub fn new(threshold: i32, saturation: i32) -> Self {
        Self {
            threshold: threshold.saturating_abs(),
            saturation: saturation.saturating_abs(),
        }
    }

    /// Deadzone threshold.
    #[must_use]
    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    /// Saturation bound.
    #[must_use]
    pub fn saturation(&self) -> i32 {
        self.saturation
    }

    /// Gates and clamps a single output value.
    #[must_use]
    pub fn apply_scalar(&self, value: i32) -> i32 {
        let magnitude = value.saturating_abs();
        if magnitude < self.threshold {
            0
        } else if magnitude > self.saturation {
            self.saturation * value.signum()
        } else {
            value
        }
    }

    fn apply_axes(&self, axes: Axis3) -> Axis3 {
        Axis3::new(
            self.apply_scalar(axes.x),
            self.apply_scalar(axes.y),
            self.apply_scalar(axes.z),
        )
    }

    /// Gates and clamps all six components.
    #[must_use]
    pub fn apply(&self, motion: MotionVector) -> MotionVector {
        MotionVector {
            translation: self.apply_axes(motion.translation),
            rotation: self.apply_axes(motion.rotation),
        }
    }

    /// Per-group activity of an unclamped motion vector.
    #[must_use]
    pub fn active_flags(&self, motion: &MotionVector) -> ActiveChannelFlags {
        let t = &motion.translation;
        let r = &motion.rotation;
        let pair = |a: i32, b: i32| i64::from(a).abs() + i64::from(b).abs();
        let single = i64::from(self.threshold);

        ActiveChannelFlags {
            zoom: i64::from(t.z).abs() > single,
            roll: i64::from(r.z).abs() > single,
            pan: pair(t.x, t.y) > 2 * single,
            orbit: pair(r.x, r.y) > 2 * single,
        }
    }
}
