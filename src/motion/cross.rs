//! # Cross Rig
//!
//! Four two-axis sticks (A, B, C, D) mounted symmetrically around the
//! center of the rig, each reporting a local `(u, v)` deflection.
//!
//! ```text
//!          B
//!          |
//!   A -----+----- C
//!          |
//!          D
//! ```
//!
//! Sticks pushed the same way add up to a push or twist of the whole knob,
//! while opposing sticks moved together cancel into pure pan or orbit:
//!
//! | Output | Expression |
//! |--------|------------|
//! | zoom | mean of A.v, B.v, C.v, D.v |
//! | roll | mean of A.u, B.u, C.u, D.u |
//! | pan.u | (C.u - A.u) / 2 |
//! | pan.v | (B.u - D.u) / 2 |
//! | orbit.u | (C.v - A.v) / 2 |
//! | orbit.v | (B.v - D.v) / 2 |
//!
//! All divisions truncate toward zero.

use super::{Axis3, KinematicMapper, MotionVector};

/// Channel indices in the order the sampler delivers them.
pub mod channels {
    /// Stick A, tangential axis
    pub const A_U: usize = 0;
    /// Stick A, radial axis
    pub const A_V: usize = 1;
    /// Stick B, tangential axis
    pub const B_U: usize = 2;
    /// Stick B, radial axis
    pub const B_V: usize = 3;
    /// Stick C, tangential axis
    pub const C_U: usize = 4;
    /// Stick C, radial axis
    pub const C_V: usize = 5;
    /// Stick D, tangential axis
    pub const D_U: usize = 6;
    /// Stick D, radial axis
    pub const D_V: usize = 7;

    /// Total channels on the cross rig
    pub const COUNT: usize = 8;
}

/// Normalized deflection of one stick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StickVector {
    pub u: i32,
    pub v: i32,
}

impl StickVector {
    #[must_use]
    pub const fn new(u: i32, v: i32) -> Self {
        Self { u, v }
    }
}

/// Motion in the cross rig's own terms, before it is laid onto device axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrossMotion {
    pub zoom: i32,
    pub roll: i32,
    pub pan: StickVector,
    pub orbit: StickVector,
}

impl CrossMotion {
    /// Applies the cross-rig kinematics to the four sticks.
    ///
    /// # Examples
    ///
    /// ```
    /// use spacestick::motion::cross::{CrossMotion, StickVector};
    ///
    /// let motion = CrossMotion::compute(
    ///     StickVector::new(100, 0),
    ///     StickVector::new(0, 100),
    ///     StickVector::new(-100, 0),
    ///     StickVector::new(0, -100),
    /// );
    /// assert_eq!(motion.pan, StickVector::new(-100, 0));
    /// assert_eq!(motion.orbit, StickVector::new(0, 100));
    /// ```
    #[must_use]
    pub fn compute(a: StickVector, b: StickVector, c: StickVector, d: StickVector) -> Self {
        Self {
            zoom: (a.v + b.v + c.v + d.v) / 4,
            roll: (a.u + b.u + c.u + d.u) / 4,
            pan: StickVector::new((c.u - a.u) / 2, (b.u - d.u) / 2),
            orbit: StickVector::new((c.v - a.v) / 2, (b.v - d.v) / 2),
        }
    }
}

impl From<CrossMotion> for MotionVector {
    /// Pan drives X/Y, zoom drives Z, orbit drives RX/RY and roll drives RZ.
    fn from(motion: CrossMotion) -> Self {
        Self {
            translation: Axis3::new(motion.pan.u, motion.pan.v, motion.zoom),
            rotation: Axis3::new(motion.orbit.u, motion.orbit.v, motion.roll),
        }
    }
}

/// Four-stick vector-geometry mapper.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossRig;

impl CrossRig {
    /// Splits the eight normalized channels into the four sticks.
    #[must_use]
    pub fn sticks(normalized: &[i32]) -> [StickVector; 4] {
        use channels::*;
        [
            StickVector::new(normalized[A_U], normalized[A_V]),
            StickVector::new(normalized[B_U], normalized[B_V]),
            StickVector::new(normalized[C_U], normalized[C_V]),
            StickVector::new(normalized[D_U], normalized[D_V]),
        ]
    }
}

impl KinematicMapper for CrossRig {
    fn channel_count(&self) -> usize {
        channels::COUNT
    }

    fn map(&self, normalized: &[i32]) -> MotionVector {
        let [a, b, c, d] = Self::sticks(normalized);
        CrossMotion::compute(a, b, c, d).into()
    }
}
