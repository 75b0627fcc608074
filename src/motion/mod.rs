//! # Motion Module
//!
//! Turns normalized channel values into a 6-DOF motion vector.
//!
//! This module handles:
//! - The fixed linear kinematic transform of each rig ([`cross`], [`matrix`])
//! - Deadzone gating and range clamping ([`deadzone`])
//! - Per-group activity flags used for edge tracking
//!
//! Both rigs implement [`KinematicMapper`]; which one runs is decided once at
//! startup from the build-time configuration.

pub mod cross;
pub mod deadzone;
pub mod matrix;

use crate::config::{MappingConfig, Rig};

use self::cross::CrossRig;
use self::matrix::MatrixRig;

/// Three signed axis values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Axis3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Axis3 {
    /// Creates an axis triplet.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Components in x, y, z order.
    #[must_use]
    pub fn to_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }
}

/// Six signed scalars: three translation axes and three rotation axes.
///
/// Recomputed in full every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionVector {
    /// X, Y, Z translation (report 1).
    pub translation: Axis3,
    /// RX, RY, RZ rotation (report 2).
    pub rotation: Axis3,
}

impl MotionVector {
    /// Builds a motion vector from `[x, y, z, rx, ry, rz]`.
    #[must_use]
    pub const fn from_axes(axes: [i32; 6]) -> Self {
        Self {
            translation: Axis3::new(axes[0], axes[1], axes[2]),
            rotation: Axis3::new(axes[3], axes[4], axes[5]),
        }
    }

    /// Components as `[x, y, z, rx, ry, rz]`.
    #[must_use]
    pub fn to_axes(self) -> [i32; 6] {
        let [x, y, z] = self.translation.to_array();
        let [rx, ry, rz] = self.rotation.to_array();
        [x, y, z, rx, ry, rz]
    }

    /// True when all six components are zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// Whether each output group carries deliberate input this tick.
///
/// Group names follow the cross rig: pan drives X/Y, zoom drives Z, orbit
/// drives RX/RY and roll drives RZ.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActiveChannelFlags {
    pub zoom: bool,
    pub roll: bool,
    pub pan: bool,
    pub orbit: bool,
}

impl ActiveChannelFlags {
    /// True if any group is active.
    #[must_use]
    pub fn any(&self) -> bool {
        self.zoom || self.roll || self.pan || self.orbit
    }

    /// Groups active now that were not active in `prev`.
    #[must_use]
    pub fn rising(&self, prev: &Self) -> Self {
        Self {
            zoom: self.zoom && !prev.zoom,
            roll: self.roll && !prev.roll,
            pan: self.pan && !prev.pan,
            orbit: self.orbit && !prev.orbit,
        }
    }

    /// Groups active in `prev` that are no longer active.
    #[must_use]
    pub fn falling(&self, prev: &Self) -> Self {
        prev.rising(self)
    }
}

/// Fixed linear transform from normalized channels to a [`MotionVector`].
pub trait KinematicMapper: Send {
    /// Number of normalized channels [`KinematicMapper::map`] consumes.
    fn channel_count(&self) -> usize;

    /// Maps one tick of normalized channel values.
    ///
    /// `normalized` must hold at least [`KinematicMapper::channel_count`]
    /// values, in the rig's channel order.
    fn map(&self, normalized: &[i32]) -> MotionVector;
}

/// Builds the mapper selected by the configuration.
#[must_use]
pub fn build_mapper(config: &MappingConfig) -> Box<dyn KinematicMapper> {
    match config.rig {
        Rig::Cross => Box::new(CrossRig),
        Rig::Matrix => Box::new(MatrixRig::new(config.coefficients, config.speed_divisor)),
    }
}
