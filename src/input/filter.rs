//! # Rolling Filter
//!
//! Smooths one channel's raw ADC samples with a rolling average over a
//! fixed-size circular window.
//!
//! The window lives in a fixed array of [`MAX_FILTER_WINDOW`] slots; only the
//! first `window` slots are used. Larger windows trade input latency for noise
//! reduction. A window of 1 passes samples straight through.
//!
//! ## Usage
//!
//! ```
//! use spacestick::input::filter::RollingFilter;
//!
//! let mut filter = RollingFilter::new(4);
//! for raw in [500, 502, 498, 501] {
//!     filter.update(raw);
//! }
//! assert_eq!(filter.average(), 500);
//! ```

/// Largest supported averaging window.
pub const MAX_FILTER_WINDOW: usize = 64;

/// Circular sample window with an explicit write cursor.
#[derive(Debug, Clone)]
pub struct RollingFilter {
    slots: [i32; MAX_FILTER_WINDOW],
    window: usize,
    cursor: usize,
    filled: usize,
}

impl RollingFilter {
    /// Creates an empty filter averaging over `window` samples.
    ///
    /// `window` must lie in `1..=MAX_FILTER_WINDOW`. [`Config::validate`]
    /// rejects anything else, so an out-of-range window is a build defect:
    /// debug builds assert, release builds clamp.
    ///
    /// [`Config::validate`]: crate::config::Config::validate
    #[must_use]
    pub fn new(window: usize) -> Self {
        debug_assert!(
            (1..=MAX_FILTER_WINDOW).contains(&window),
            "filter window out of range"
        );
        Self {
            slots: [0; MAX_FILTER_WINDOW],
            window: window.clamp(1, MAX_FILTER_WINDOW),
            cursor: 0,
            filled: 0,
        }
    }

    /// Number of samples averaged.
    #[must_use]
    pub fn window(&self) -> usize {
        self.window
    }

    /// Overwrites the slot under the cursor and advances the cursor.
    pub fn update(&mut self, raw: i32) {
        self.slots[self.cursor] = raw;
        self.cursor = (self.cursor + 1) % self.window;
        if self.filled < self.window {
            self.filled += 1;
        }
    }

    /// Integer mean of the window, truncated toward zero.
    ///
    /// Slots that have not been written yet count as zero.
    #[must_use]
    pub fn average(&self) -> i32 {
        let sum: i32 = self.slots[..self.window].iter().sum();
        sum / self.window as i32
    }

    /// True once every slot of the window holds a real sample.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.filled == self.window
    }

    /// Current write position, always in `0..window`.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}
