//! # Input Module
//!
//! Analog channel acquisition and conditioning.
//!
//! This module handles:
//! - Reading raw ADC counts per channel (the [`Sampler`] boundary)
//! - Rolling-average noise filtering
//! - Startup zeroing and baseline removal

pub mod calibration;
pub mod device;
pub mod filter;

use crate::error::Result;

/// Source of raw analog readings, one integer per physical channel.
///
/// `latch` is called once at the start of every tick; the following `read`
/// calls for that tick are served from what was latched. Every value
/// returned by `read` lies in `[0, adc_max)`.
#[cfg_attr(test, mockall::automock)]
pub trait Sampler {
    /// Captures the current state of all channels.
    fn latch(&mut self) -> Result<()>;

    /// Raw reading of `channel` from the last latch.
    fn read(&mut self, channel: usize) -> u16;
}
