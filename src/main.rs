//! # Spacestick
//!
//! Reads an analog stick rig and reports it to the host as a multi-axis
//! 3D controller.

use anyhow::Result;
use tokio::time::{interval, Duration};
use tracing::{info, warn};

use spacestick::config::Config;
use spacestick::hid::descriptor::REPORT_DESCRIPTOR;
use spacestick::input::device::EvdevSampler;
use spacestick::output::dispatcher::OutputDispatcher;
use spacestick::pipeline::Pipeline;
use spacestick::serial::BridgeSerial;

/// Number of ticks between status log messages
const LOG_INTERVAL_TICKS: u64 = 1000;

/// Main entry point
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Set up logging with tracing subscriber
///    - Load the embedded configuration
///    - Open the analog input device and the HID bridge
///    - Register the report descriptor
///
/// 2. **Calibration**
///    - Fill every sample window with the sticks at rest
///    - Capture per-channel offsets
///
/// 3. **Main Loop**
///    - One sample → map → clamp → dispatch pass per tick
///    - Log status every 1000 ticks
///    - Handle Ctrl+C for graceful shutdown
///
/// A tick that fails (input device read or bridge write) is logged and
/// skipped; the next tick runs normally.
///
/// # Errors
///
/// Returns error if the configuration is invalid, either device cannot be
/// opened, or calibration fails.
///
/// # Examples
///
/// ```bash
/// RUST_LOG=spacestick=debug cargo run --release
/// ```
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Spacestick v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::embedded()?;
    info!(
        "Rig: {:?}, window {}, threshold {}",
        config.mapping.rig, config.filter.window, config.deadzone.threshold
    );

    let mut sampler = EvdevSampler::open(
        &config.sampler.device_path,
        &config.sampler.axes,
        config.sampler.adc_max,
    )?;
    info!("Analog input device at: {}", sampler.device_path());

    let serial = BridgeSerial::open(&config.output.port, config.output.baud_rate)?;
    let mut output = OutputDispatcher::new(
        serial,
        config.output.enabled,
        config.output.send_idle_reports,
    );
    output.register(&REPORT_DESCRIPTOR).await?;

    let mut pipeline = Pipeline::new(&config);
    info!("Calibrating, leave the sticks at rest");
    pipeline.calibrate(&mut sampler)?;

    let tick_delay = Duration::from_millis(config.timing.tick_delay_ms);
    let mut ticker = interval(tick_delay);

    info!("Starting report loop ({}ms per tick)", config.timing.tick_delay_ms);
    info!("Press Ctrl+C to exit");

    let mut tick_count: u64 = 0;
    let mut failed_ticks: u64 = 0;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                tick_count += 1;

                let tick = match pipeline.tick(&mut sampler) {
                    Ok(tick) => tick,
                    Err(e) => {
                        warn!("Failed to sample inputs: {}", e);
                        failed_ticks += 1;
                        continue;
                    }
                };

                if let Err(e) = output.send(&tick.motion).await {
                    warn!("Failed to send reports: {}", e);
                    failed_ticks += 1;
                }

                if tick_count % LOG_INTERVAL_TICKS == 0 {
                    info!(
                        "{} ticks, {} report pairs sent, {} failed, motion {:?}",
                        tick_count,
                        output.reports_sent(),
                        failed_ticks,
                        tick.motion.to_axes()
                    );
                }
            }

            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                info!("Total ticks: {}, report pairs sent: {}", tick_count, output.reports_sent());
                break;
            }
        }
    }

    Ok(())
}
