//! # Configuration Module
//!
//! Loads and validates the build-time configuration.
//!
//! The TOML document at `config/default.toml` is embedded into the binary with
//! `include_str!`, so every tunable (filter window, deadzone, rig selection,
//! coefficients, tick delay) is fixed when the firmware is built. Nothing is
//! read from the environment or the filesystem at runtime.

use serde::Deserialize;

use crate::error::{Result, SpacestickError};
use crate::input::filter::MAX_FILTER_WINDOW;
use crate::motion::cross;
use crate::motion::deadzone::{DEFAULT_THRESHOLD, OUTPUT_LIMIT};
use crate::motion::matrix::{CoefficientMatrix, DEFAULT_COEFFICIENTS, DEFAULT_SPEED_DIVISOR, MATRIX_CHANNELS};

/// Configuration compiled into the binary
const EMBEDDED_CONFIG: &str = include_str!("../config/default.toml");

/// Baud rates the HID bridge firmware accepts
const SUPPORTED_BAUD_RATES: [u32; 6] = [9600, 57600, 115200, 230400, 460800, 921600];

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub sampler: SamplerConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub deadzone: DeadzoneConfig,
    #[serde(default)]
    pub mapping: MappingConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub timing: TimingConfig,
}

/// Analog input configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SamplerConfig {
    /// evdev device path, empty to auto-detect
    #[serde(default)]
    pub device_path: String,

    /// ADC measuring range; raw readings lie in `[0, adc_max)`
    #[serde(default = "default_adc_max")]
    pub adc_max: u16,

    /// evdev `ABS_*` code of each channel, in rig channel order
    #[serde(default = "default_axes")]
    pub axes: Vec<u16>,
}

/// Rolling filter configuration
#[derive(Debug, Deserialize, Clone)]
pub struct FilterConfig {
    /// Samples per rolling average
    #[serde(default = "default_window")]
    pub window: usize,
}

/// Deadzone configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DeadzoneConfig {
    #[serde(default = "default_threshold")]
    pub threshold: i32,

    /// Must equal the descriptor's logical maximum (500)
    #[serde(default = "default_saturation")]
    pub saturation: i32,
}

/// Physical stick arrangement
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Rig {
    /// Four sticks around the center, vector geometry
    Cross,
    /// Six potentiometers, coefficient matrix
    Matrix,
}

impl Rig {
    /// Number of analog channels the rig reads
    #[must_use]
    pub fn channel_count(self) -> usize {
        match self {
            Rig::Cross => cross::channels::COUNT,
            Rig::Matrix => MATRIX_CHANNELS,
        }
    }
}

/// Kinematic mapping configuration
#[derive(Debug, Deserialize, Clone)]
pub struct MappingConfig {
    #[serde(default = "default_rig")]
    pub rig: Rig,

    /// Matrix rig only
    #[serde(default = "default_speed_divisor")]
    pub speed_divisor: i32,

    /// Matrix rig only
    #[serde(default = "default_coefficients")]
    pub coefficients: CoefficientMatrix,
}

/// HID bridge output configuration
#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    /// Serial device path, empty to auto-detect
    #[serde(default)]
    pub port: String,

    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,

    /// Coarse gate on report transmission
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Transmit all-zero reports on idle ticks too
    #[serde(default = "default_send_idle_reports")]
    pub send_idle_reports: bool,
}

/// Main loop timing
#[derive(Debug, Deserialize, Clone)]
pub struct TimingConfig {
    #[serde(default = "default_tick_delay_ms")]
    pub tick_delay_ms: u64,
}

// Default value functions
fn default_adc_max() -> u16 { 1024 }
fn default_axes() -> Vec<u16> { (0..cross::channels::COUNT as u16).collect() }

fn default_window() -> usize { 4 }

fn default_threshold() -> i32 { DEFAULT_THRESHOLD }
fn default_saturation() -> i32 { OUTPUT_LIMIT }

fn default_rig() -> Rig { Rig::Cross }
fn default_speed_divisor() -> i32 { DEFAULT_SPEED_DIVISOR }
fn default_coefficients() -> CoefficientMatrix { DEFAULT_COEFFICIENTS }

fn default_baud_rate() -> u32 { 115200 }
fn default_enabled() -> bool { true }
fn default_send_idle_reports() -> bool { true }

fn default_tick_delay_ms() -> u64 { 8 }

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            device_path: String::new(),
            adc_max: default_adc_max(),
            axes: default_axes(),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self { window: default_window() }
    }
}

impl Default for DeadzoneConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            saturation: default_saturation(),
        }
    }
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            rig: default_rig(),
            speed_divisor: default_speed_divisor(),
            coefficients: default_coefficients(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            port: String::new(),
            baud_rate: default_baud_rate(),
            enabled: default_enabled(),
            send_idle_reports: default_send_idle_reports(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self { tick_delay_ms: default_tick_delay_ms() }
    }
}

fn invalid(msg: impl Into<String>) -> SpacestickError {
    SpacestickError::Config(msg.into())
}

impl Config {
    /// Parse and validate the configuration embedded at build time
    ///
    /// # Errors
    ///
    /// Returns error if the embedded TOML is malformed or fails validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use spacestick::config::Config;
    ///
    /// let config = Config::embedded()?;
    /// assert!(config.filter.window >= 1);
    /// # Ok::<(), spacestick::error::SpacestickError>(())
    /// ```
    pub fn embedded() -> Result<Self> {
        Self::parse(EMBEDDED_CONFIG)
    }

    /// Parse and validate a TOML document
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - TOML parsing fails
    /// - Validation fails
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    pub fn validate(&self) -> Result<()> {
        // Division by the window size happens every tick
        if self.filter.window == 0 || self.filter.window > MAX_FILTER_WINDOW {
            return Err(invalid(format!(
                "filter window must be between 1 and {}",
                MAX_FILTER_WINDOW
            )));
        }

        if self.sampler.adc_max < 2 {
            return Err(invalid("adc_max must be at least 2"));
        }

        let expected = self.mapping.rig.channel_count();
        if self.sampler.axes.len() != expected {
            return Err(invalid(format!(
                "{:?} rig needs {} axes, {} configured",
                self.mapping.rig,
                expected,
                self.sampler.axes.len()
            )));
        }

        if self.mapping.speed_divisor == 0 {
            return Err(invalid("speed_divisor must not be zero"));
        }

        if self.deadzone.saturation != OUTPUT_LIMIT {
            return Err(invalid(format!(
                "saturation must be {} to match the HID descriptor",
                OUTPUT_LIMIT
            )));
        }

        if self.deadzone.threshold < 0 || self.deadzone.threshold > self.deadzone.saturation {
            return Err(invalid("threshold must be between 0 and saturation"));
        }

        if !SUPPORTED_BAUD_RATES.contains(&self.output.baud_rate) {
            return Err(invalid(format!(
                "baud_rate must be one of: {:?}",
                SUPPORTED_BAUD_RATES
            )));
        }

        if self.timing.tick_delay_ms == 0 || self.timing.tick_delay_ms > 1000 {
            return Err(invalid("tick_delay_ms must be between 1 and 1000"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_valid_config() -> Config {
        Config::default()
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(create_valid_config().validate().is_ok());
    }

    #[test]
    fn test_embedded_config_is_valid() {
        let config = Config::embedded().unwrap();
        assert_eq!(config.mapping.rig.channel_count(), config.sampler.axes.len());
    }

    #[test]
    fn test_parse_empty_document_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.filter.window, 4);
        assert_eq!(config.deadzone.threshold, 32);
        assert_eq!(config.deadzone.saturation, 500);
        assert_eq!(config.mapping.rig, Rig::Cross);
        assert_eq!(config.sampler.axes.len(), 8);
        assert!(config.output.enabled);
        assert!(config.output.send_idle_reports);
        assert_eq!(config.timing.tick_delay_ms, 8);
    }

    #[test]
    fn test_parse_matrix_rig() {
        let toml_content = r#"
[sampler]
axes = [0, 1, 2, 3, 4, 5]

[mapping]
rig = "matrix"
speed_divisor = 8
coefficients = [
    [1, 0, 0, 0, 0, 0],
    [0, 1, 0, 0, 0, 0],
    [0, 0, 1, 0, 0, 0],
    [0, 0, 0, 1, 0, 0],
    [0, 0, 0, 0, 1, 0],
    [0, 0, 0, 0, 0, 1],
]
"#;
        let config = Config::parse(toml_content).unwrap();
        assert_eq!(config.mapping.rig, Rig::Matrix);
        assert_eq!(config.mapping.speed_divisor, 8);
        assert_eq!(config.mapping.coefficients[3][3], 1);
    }

    #[test]
    fn test_parse_unknown_rig() {
        let result = Config::parse("[mapping]\nrig = \"triangle\"\n");
        assert!(matches!(result, Err(SpacestickError::Toml(_))));
    }

    #[test]
    fn test_filter_window_zero() {
        let mut config = create_valid_config();
        config.filter.window = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_filter_window_too_large() {
        let mut config = create_valid_config();
        config.filter.window = MAX_FILTER_WINDOW + 1;
        assert!(config.validate().is_err());

        config.filter.window = MAX_FILTER_WINDOW;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_filter_window_one_is_valid() {
        let mut config = create_valid_config();
        config.filter.window = 1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_speed_divisor_zero() {
        let mut config = create_valid_config();
        config.mapping.speed_divisor = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_axes_must_match_rig() {
        let mut config = create_valid_config();
        config.mapping.rig = Rig::Matrix;
        assert!(config.validate().is_err());

        config.sampler.axes = vec![0, 1, 2, 3, 4, 5];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_adc_max_too_small() {
        let mut config = create_valid_config();
        config.sampler.adc_max = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_saturation_is_fixed() {
        let mut config = create_valid_config();
        config.deadzone.saturation = 1000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_threshold_range() {
        let mut config = create_valid_config();
        config.deadzone.threshold = -1;
        assert!(config.validate().is_err());

        config.deadzone.threshold = 501;
        assert!(config.validate().is_err());

        config.deadzone.threshold = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_baud_rate() {
        let mut config = create_valid_config();
        config.output.baud_rate = 420000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_valid_baud_rates() {
        for &baud in &SUPPORTED_BAUD_RATES {
            let mut config = create_valid_config();
            config.output.baud_rate = baud;
            assert!(config.validate().is_ok(), "Baud rate {} should be valid", baud);
        }
    }

    #[test]
    fn test_tick_delay_range() {
        let mut config = create_valid_config();
        config.timing.tick_delay_ms = 0;
        assert!(config.validate().is_err());

        config.timing.tick_delay_ms = 1001;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_functions() {
        assert_eq!(default_adc_max(), 1024);
        assert_eq!(default_axes(), vec![0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(default_window(), 4);
        assert_eq!(default_threshold(), 32);
        assert_eq!(default_saturation(), 500);
        assert_eq!(default_rig(), Rig::Cross);
        assert_eq!(default_speed_divisor(), 16);
        assert_eq!(default_baud_rate(), 115200);
        assert!(default_enabled());
        assert!(default_send_idle_reports());
        assert_eq!(default_tick_delay_ms(), 8);
    }
}
