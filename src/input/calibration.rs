//! # Calibration Module
//!
//! Startup zeroing of the analog channels.
//!
//! Every channel owns a [`RollingFilter`] and a calibration offset. The offset
//! is captured exactly once, after each channel's window has been filled with
//! real samples, and is then subtracted from every later filtered value so the
//! resting stick position reads as 0.
//!
//! ## Usage
//!
//! ```
//! use spacestick::input::calibration::Calibrator;
//!
//! let mut cal = Calibrator::new(2, 1);
//! cal.update(0, 512);
//! cal.update(1, 498);
//! cal.zero()?;
//!
//! cal.update(0, 612);
//! cal.update(1, 498);
//! assert_eq!(cal.normalize(0), 100);
//! assert_eq!(cal.normalize(1), 0);
//! # Ok::<(), spacestick::error::SpacestickError>(())
//! ```

use super::filter::RollingFilter;
use crate::error::{Result, SpacestickError};

/// One physical analog input: its sample window and baseline.
#[derive(Debug, Clone)]
pub struct Channel {
    filter: RollingFilter,
    offset: i32,
}

impl Channel {
    /// Creates a channel with an empty window and a zero offset.
    #[must_use]
    pub fn new(window: usize) -> Self {
        Self {
            filter: RollingFilter::new(window),
            offset: 0,
        }
    }

    /// Filtered value minus the calibration offset.
    #[must_use]
    pub fn normalized(&self) -> i32 {
        self.filter.average() - self.offset
    }

    /// Captured baseline.
    #[must_use]
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Read access to the channel's filter.
    #[must_use]
    pub fn filter(&self) -> &RollingFilter {
        &self.filter
    }
}

/// Most channels any rig reads.
pub const MAX_CHANNELS: usize = 8;

/// Per-channel baselines captured at startup.
///
/// Channels live in a fixed array of [`MAX_CHANNELS`] slots; only the first
/// `len` are sampled.
#[derive(Debug, Clone)]
pub struct Calibrator {
    channels: [Channel; MAX_CHANNELS],
    len: usize,
    zeroed: bool,
}

impl Calibrator {
    /// Creates `channel_count` channels, each averaging over `window` samples.
    ///
    /// `channel_count` must not exceed [`MAX_CHANNELS`].
    #[must_use]
    pub fn new(channel_count: usize, window: usize) -> Self {
        debug_assert!(channel_count <= MAX_CHANNELS, "too many channels");
        Self {
            channels: std::array::from_fn(|_| Channel::new(window)),
            len: channel_count.min(MAX_CHANNELS),
            zeroed: false,
        }
    }

    fn active(&self) -> &[Channel] {
        &self.channels[..self.len]
    }

    fn active_mut(&mut self) -> &mut [Channel] {
        &mut self.channels[..self.len]
    }

    /// Number of channels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when there are no channels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Feeds a raw sample into one channel's filter.
    ///
    /// # Panics
    ///
    /// Panics if `channel` is out of range.
    pub fn update(&mut self, channel: usize, raw: i32) {
        self.active_mut()[channel].filter.update(raw);
    }

    /// True once every channel's window is fully populated.
    #[must_use]
    pub fn is_primed(&self) -> bool {
        self.active().iter().all(|ch| ch.filter.is_full())
    }

    /// True after [`Calibrator::zero`] succeeded.
    #[must_use]
    pub fn is_zeroed(&self) -> bool {
        self.zeroed
    }

    /// Captures each channel's current average as its offset.
    ///
    /// # Errors
    ///
    /// Returns `Calibration` error if any window is not yet full, or if the
    /// offsets were already captured.
    pub fn zero(&mut self) -> Result<()> {
        if self.zeroed {
            return Err(SpacestickError::Calibration(
                "offsets are captured once per power cycle".to_string(),
            ));
        }

        if !self.is_primed() {
            return Err(SpacestickError::Calibration(
                "sample windows are not full yet".to_string(),
            ));
        }

        for ch in self.active_mut() {
            ch.offset = ch.filter.average();
        }
        self.zeroed = true;

        Ok(())
    }

    /// Filtered value of `channel` with its baseline removed.
    ///
    /// # Panics
    ///
    /// Panics if `channel` is out of range.
    #[must_use]
    pub fn normalize(&self, channel: usize) -> i32 {
        self.active()[channel].normalized()
    }

    /// Writes every channel's normalized value into `out`.
    ///
    /// Extra slots in `out` are left untouched.
    pub fn normalize_into(&self, out: &mut [i32]) {
        for (slot, ch) in out.iter_mut().zip(self.active()) {
            *slot = ch.normalized();
        }
    }

    /// Captured baselines in channel order, for the startup log.
    #[must_use]
    pub fn offsets(&self) -> Vec<i32> {
        self.active().iter().map(Channel::offset).collect()
    }

    /// Read access to a single channel.
    #[must_use]
    pub fn channel(&self, channel: usize) -> Option<&Channel> {
        self.active().get(channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(cal: &mut Calibrator, values: &[i32]) {
        for (ch, &raw) in values.iter().enumerate() {
            cal.update(ch, raw);
        }
    }

    #[test]
    fn test_zero_requires_full_windows() {
        let mut cal = Calibrator::new(2, 3);
        fill(&mut cal, &[500, 500]);
        fill(&mut cal, &[500, 500]);
        assert!(!cal.is_primed());
        assert!(cal.zero().is_err());
        assert!(!cal.is_zeroed());

        fill(&mut cal, &[500, 500]);
        assert!(cal.is_primed());
        assert!(cal.zero().is_ok());
        assert!(cal.is_zeroed());
    }

    #[test]
    fn test_zero_only_once() {
        let mut cal = Calibrator::new(1, 1);
        cal.update(0, 400);
        cal.zero().unwrap();

        cal.update(0, 900);
        match cal.zero() {
            Err(SpacestickError::Calibration(_)) => {}
            other => panic!("Expected Calibration error, got: {:?}", other),
        }
        // Baseline unchanged by the rejected call
        assert_eq!(cal.offsets(), vec![400]);
    }

    #[test]
    fn test_normalize_is_zero_at_rest() {
        let mut cal = Calibrator::new(3, 2);
        for _ in 0..2 {
            fill(&mut cal, &[510, 490, 100]);
        }
        cal.zero().unwrap();
        assert_eq!(cal.offsets(), vec![510, 490, 100]);

        fill(&mut cal, &[510, 490, 100]);
        for ch in 0..3 {
            assert_eq!(cal.normalize(ch), 0);
        }
    }

    #[test]
    fn test_normalize_subtracts_offset() {
        let mut cal = Calibrator::new(1, 1);
        cal.update(0, 512);
        cal.zero().unwrap();

        cal.update(0, 1000);
        assert_eq!(cal.normalize(0), 488);

        cal.update(0, 12);
        assert_eq!(cal.normalize(0), -500);
    }

    #[test]
    fn test_normalize_before_zero_returns_average() {
        let mut cal = Calibrator::new(1, 2);
        cal.update(0, 100);
        cal.update(0, 300);
        assert_eq!(cal.normalize(0), 200);
    }

    #[test]
    fn test_normalize_into() {
        let mut cal = Calibrator::new(2, 1);
        fill(&mut cal, &[100, 200]);
        cal.zero().unwrap();
        fill(&mut cal, &[150, 150]);

        let mut out = [0i32; 3];
        out[2] = 7;
        cal.normalize_into(&mut out);
        assert_eq!(out, [50, -50, 7]);
    }

    #[test]
    fn test_unused_slots_are_ignored() {
        let mut cal = Calibrator::new(2, 1);
        fill(&mut cal, &[100, 200]);
        assert!(cal.is_primed());
        cal.zero().unwrap();
        assert_eq!(cal.offsets(), vec![100, 200]);
    }

    #[test]
    #[should_panic]
    fn test_update_past_len_panics() {
        let mut cal = Calibrator::new(6, 1);
        cal.update(6, 512);
    }

    #[test]
    fn test_every_rig_fits() {
        use crate::config::Rig;
        assert!(Rig::Cross.channel_count() <= MAX_CHANNELS);
        assert!(Rig::Matrix.channel_count() <= MAX_CHANNELS);
    }

    #[test]
    fn test_channel_accessors() {
        let cal = Calibrator::new(8, 4);
        assert_eq!(cal.len(), 8);
        assert!(!cal.is_empty());
        assert_eq!(cal.channel(0).unwrap().filter().window(), 4);
        assert!(cal.channel(8).is_none());
    }
}
