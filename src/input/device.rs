//! # evdev Analog Sampler
//!
//! Reads analog channels from a Linux input device using the evdev interface.
//!
//! Each channel is one absolute axis (`ABS_*` code) of a USB ADC board or
//! analog joystick board exposed as `/dev/input/eventN`. Raw axis values are
//! rebased to the axis minimum and clamped into `[0, adc_max)`.

use evdev::{AbsoluteAxisType, Device};
use std::path::Path;
use tracing::{debug, info};

use super::Sampler;
use crate::error::{Result, SpacestickError};

/// Directory scanned when no device path is configured
const INPUT_DIR: &str = "/dev/input";

/// Analog sampler backed by an evdev device
pub struct EvdevSampler {
    device: Device,
    device_path: String,
    axes: Vec<AbsoluteAxisType>,
    adc_max: u16,
    snapshot: Vec<u16>,
}

impl std::fmt::Debug for EvdevSampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvdevSampler")
            .field("device_path", &self.device_path)
            .field("axes", &self.axes)
            .field("adc_max", &self.adc_max)
            .finish_non_exhaustive()
    }
}

impl EvdevSampler {
    /// Open the analog input device
    ///
    /// With an empty `device_path`, scans all `/dev/input/event*` devices in
    /// sorted order and picks the first one that supports every axis in
    /// `axes`.
    ///
    /// # Errors
    ///
    /// - `SamplerNotFound`: no device exposes all configured axes
    /// - `Sampler`: the configured device cannot be opened or lacks an axis
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use spacestick::input::device::EvdevSampler;
    ///
    /// let sampler = EvdevSampler::open("", &[0, 1, 3, 4, 6, 7, 16, 17], 1024)?;
    /// println!("Sampling from: {}", sampler.device_path());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn open(device_path: &str, axes: &[u16], adc_max: u16) -> Result<Self> {
        let axes: Vec<AbsoluteAxisType> = axes.iter().map(|&code| AbsoluteAxisType(code)).collect();

        let (device, device_path) = if device_path.is_empty() {
            Self::detect(&axes)?
        } else {
            let device = Device::open(device_path).map_err(|e| {
                SpacestickError::Sampler(format!("Failed to open {}: {}", device_path, e))
            })?;
            if !supports_axes(&device, &axes) {
                return Err(SpacestickError::Sampler(format!(
                    "{} does not expose all configured axes",
                    device_path
                )));
            }
            (device, device_path.to_string())
        };

        info!(
            "Opened analog input {} ({}) with {} channels",
            device_path,
            device.name().unwrap_or("unnamed"),
            axes.len()
        );

        let snapshot = vec![0; axes.len()];
        Ok(Self {
            device,
            device_path,
            axes,
            adc_max,
            snapshot,
        })
    }

    /// Scan `/dev/input` for the first device exposing every axis
    fn detect(axes: &[AbsoluteAxisType]) -> Result<(Device, String)> {
        let input_dir = Path::new(INPUT_DIR);

        if !input_dir.exists() {
            return Err(SpacestickError::Sampler(format!(
                "{} directory not found",
                INPUT_DIR
            )));
        }

        let mut entries: Vec<_> = std::fs::read_dir(input_dir)
            .map_err(|e| SpacestickError::Sampler(format!("Failed to read {}: {}", INPUT_DIR, e)))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| SpacestickError::Sampler(format!("Failed to read directory entry: {}", e)))?;

        // Deterministic pick when several boards are attached
        entries.sort_by_key(|entry| entry.path());

        for entry in entries {
            let path = entry.path();

            match path.file_name() {
                Some(name) if name.to_string_lossy().starts_with("event") => {}
                _ => continue,
            }

            match Device::open(&path) {
                Ok(device) => {
                    debug!(
                        "Found input device: {} ({})",
                        path.display(),
                        device.name().unwrap_or("unnamed")
                    );

                    if supports_axes(&device, axes) {
                        return Ok((device, path.to_string_lossy().to_string()));
                    }
                }
                Err(e) => {
                    debug!("Could not open {}: {}", path.display(), e);
                }
            }
        }

        Err(SpacestickError::SamplerNotFound)
    }

    /// Path of the opened `/dev/input/eventX` device
    pub fn device_path(&self) -> &str {
        &self.device_path
    }
}

impl Sampler for EvdevSampler {
    fn latch(&mut self) -> Result<()> {
        let state = self
            .device
            .get_abs_state()
            .map_err(|e| SpacestickError::Sampler(format!("Failed to read axes: {}", e)))?;

        for (slot, axis) in self.snapshot.iter_mut().zip(&self.axes) {
            let info = state[axis.0 as usize];
            *slot = to_adc_count(info.value, info.minimum, self.adc_max);
        }

        Ok(())
    }

    fn read(&mut self, channel: usize) -> u16 {
        self.snapshot[channel]
    }
}

fn supports_axes(device: &Device, axes: &[AbsoluteAxisType]) -> bool {
    match device.supported_absolute_axes() {
        Some(supported) => axes.iter().all(|&axis| supported.contains(axis)),
        None => false,
    }
}

/// Rebase an axis value to its minimum and clamp into `[0, adc_max)`.
fn to_adc_count(value: i32, minimum: i32, adc_max: u16) -> u16 {
    let top = i64::from(adc_max.max(1)) - 1;
    (i64::from(value) - i64::from(minimum)).clamp(0, top) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_adc_count_rebases_to_minimum() {
        assert_eq!(to_adc_count(0, 0, 1024), 0);
        assert_eq!(to_adc_count(512, 0, 1024), 512);
        // Signed axes report -512..511
        assert_eq!(to_adc_count(-512, -512, 1024), 0);
        assert_eq!(to_adc_count(0, -512, 1024), 512);
    }

    #[test]
    fn test_to_adc_count_stays_below_max() {
        assert_eq!(to_adc_count(1024, 0, 1024), 1023);
        assert_eq!(to_adc_count(65535, 0, 4096), 4095);
        assert_eq!(to_adc_count(-10, 0, 4096), 0);
    }

    #[test]
    fn test_to_adc_count_extreme_values() {
        assert_eq!(to_adc_count(i32::MAX, i32::MIN, 1024), 1023);
        assert_eq!(to_adc_count(i32::MIN, i32::MAX, 1024), 0);
    }

    #[test]
    fn test_open_with_missing_device_returns_error() {
        let result = EvdevSampler::open("/dev/input/nonexistent_event_12345", &[0, 1], 1024);

        match result {
            Err(SpacestickError::Sampler(msg)) => {
                assert!(msg.contains("/dev/input/nonexistent_event_12345"));
            }
            other => panic!("Expected Sampler error, got: {:?}", other),
        }
    }

    // Integration test - only runs with real hardware
    #[test]
    #[ignore] // Run with: cargo test -- --ignored
    fn test_latch_with_real_hardware() {
        let mut sampler = EvdevSampler::open("", &[0, 1], 1024).expect("No analog device found");
        assert!(sampler.device_path().starts_with("/dev/input/event"));

        sampler.latch().expect("Failed to latch axes");
        assert!(sampler.read(0) < 1024);
        assert!(sampler.read(1) < 1024);
    }
}
