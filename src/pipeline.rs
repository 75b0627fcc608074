//! # Sensor-to-Motion Pipeline
//!
//! Owns all per-process state (channel windows, calibration offsets, activity
//! flags) and runs one tick at a time:
//!
//! ```text
//! Sampler → RollingFilter → Calibrator → KinematicMapper → DeadzoneClamp
//! ```
//!
//! Dispatch to the host is left to the caller so the transport can be async.
//! The pipeline is driven from a single task through `&mut self`; nothing in
//! it is shared.
//!
//! ## Usage
//!
//! ```no_run
//! use spacestick::config::Config;
//! use spacestick::input::device::EvdevSampler;
//! use spacestick::pipeline::Pipeline;
//!
//! let config = Config::embedded()?;
//! let mut sampler = EvdevSampler::open(
//!     &config.sampler.device_path,
//!     &config.sampler.axes,
//!     config.sampler.adc_max,
//! )?;
//! let mut pipeline = Pipeline::new(&config);
//!
//! pipeline.calibrate(&mut sampler)?;
//! let tick = pipeline.tick(&mut sampler)?;
//! println!("{:?}", tick.motion);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use tracing::{debug, info, trace};

use crate::config::Config;
use crate::error::{Result, SpacestickError};
use crate::input::calibration::{Calibrator, MAX_CHANNELS};
use crate::input::Sampler;
use crate::motion::deadzone::DeadzoneClamp;
use crate::motion::{build_mapper, ActiveChannelFlags, KinematicMapper, MotionVector};

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Gated and clamped motion, ready for dispatch
    pub motion: MotionVector,
    /// Motion straight out of the mapper
    pub unclamped: MotionVector,
    /// Groups with deliberate input this tick
    pub active: ActiveChannelFlags,
    /// Groups that became active this tick
    pub engaged: ActiveChannelFlags,
    /// Groups that stopped being active this tick
    pub released: ActiveChannelFlags,
}

/// Per-process pipeline state
pub struct Pipeline {
    calibrator: Calibrator,
    mapper: Box<dyn KinematicMapper>,
    clamp: DeadzoneClamp,
    normalized: [i32; MAX_CHANNELS],
    active: ActiveChannelFlags,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("channels", &self.calibrator.len())
            .field("clamp", &self.clamp)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    /// Builds the pipeline described by `config`.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self::from_parts(
            build_mapper(&config.mapping),
            config.filter.window,
            DeadzoneClamp::new(config.deadzone.threshold, config.deadzone.saturation),
        )
    }

    /// Builds a pipeline from explicit stages.
    #[must_use]
    pub fn from_parts(mapper: Box<dyn KinematicMapper>, window: usize, clamp: DeadzoneClamp) -> Self {
        let channels = mapper.channel_count();
        Self {
            calibrator: Calibrator::new(channels, window),
            mapper,
            clamp,
            normalized: [0; MAX_CHANNELS],
            active: ActiveChannelFlags::default(),
        }
    }

    /// Number of analog channels read per tick.
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.calibrator.len()
    }

    /// Read access to the calibrator.
    #[must_use]
    pub fn calibrator(&self) -> &Calibrator {
        &self.calibrator
    }

    /// Latches the sampler and pushes one raw reading into every channel.
    fn sample<S: Sampler + ?Sized>(&mut self, sampler: &mut S) -> Result<()> {
        sampler.latch()?;
        for ch in 0..self.calibrator.len() {
            let raw = sampler.read(ch);
            self.calibrator.update(ch, i32::from(raw));
        }
        Ok(())
    }

    /// Fills every sample window and captures the resting baselines.
    ///
    /// Drives the sampler exactly `window` times, then zeroes. Call once,
    /// before the first [`Pipeline::tick`], with the sticks untouched.
    ///
    /// # Errors
    ///
    /// Returns sampler errors, or `Calibration` if already calibrated.
    pub fn calibrate<S: Sampler + ?Sized>(&mut self, sampler: &mut S) -> Result<()> {
        if self.calibrator.is_zeroed() {
            return Err(SpacestickError::Calibration(
                "offsets are captured once per power cycle".to_string(),
            ));
        }

        while !self.calibrator.is_primed() {
            self.sample(sampler)?;
        }
        self.calibrator.zero()?;

        info!("Calibrated {} channels, offsets {:?}", self.calibrator.len(), self.calibrator.offsets());
        Ok(())
    }

    /// Runs one sample → filter → normalize → map → clamp pass.
    ///
    /// # Errors
    ///
    /// Returns sampler errors, or `Calibration` if [`Pipeline::calibrate`]
    /// has not run yet.
    pub fn tick<S: Sampler + ?Sized>(&mut self, sampler: &mut S) -> Result<Tick> {
        if !self.calibrator.is_zeroed() {
            return Err(SpacestickError::Calibration(
                "tick before calibration".to_string(),
            ));
        }

        self.sample(sampler)?;
        let normalized = &mut self.normalized[..self.calibrator.len()];
        self.calibrator.normalize_into(normalized);
        trace!("Normalized inputs {:?}", normalized);

        let unclamped = self.mapper.map(normalized);
        let motion = self.clamp.apply(unclamped);

        let prev = self.active;
        let active = self.clamp.active_flags(&unclamped);
        let engaged = active.rising(&prev);
        let released = active.falling(&prev);
        self.active = active;

        if engaged.any() || released.any() {
            debug!("Active groups {:?} (engaged {:?}, released {:?})", active, engaged, released);
        }

        Ok(Tick {
            motion,
            unclamped,
            active,
            engaged,
            released,
        })
    }
}
