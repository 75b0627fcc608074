//! # Output Dispatcher
//!
//! Serializes each tick's motion vector into two reports and passes both to
//! the transport:
//!
//! | Report ID | Payload |
//! |-----------|---------|
//! | 1 | X, Y, Z (translation) |
//! | 2 | RX, RY, RZ (rotation) |
//!
//! By default every tick produces exactly one report pair, even when the
//! vector is all zero. Two switches narrow that down:
//!
//! - `enabled = false` suppresses transmission entirely.
//! - `send_idle_reports = false` skips all-zero ticks, except the first
//!   zero tick after activity so the host sees the release.

use tracing::debug;

use super::Transport;
use crate::error::Result;
use crate::hid::encoder::encode_axis_report;
use crate::hid::protocol::{REPORT_ID_ROTATION, REPORT_ID_TRANSLATION};
use crate::motion::MotionVector;

/// What happened to one tick's motion vector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Both reports were handed to the transport
    Sent,
    /// Output is disabled
    Disabled,
    /// All-zero tick skipped because the host already saw zero
    Idle,
}

/// Packages motion vectors into reports for a [`Transport`]
#[derive(Debug)]
pub struct OutputDispatcher<T: Transport> {
    transport: T,
    enabled: bool,
    send_idle_reports: bool,
    host_at_rest: bool,
    reports_sent: u64,
}

impl<T: Transport> OutputDispatcher<T> {
    /// Wraps `transport`.
    pub fn new(transport: T, enabled: bool, send_idle_reports: bool) -> Self {
        Self {
            transport,
            enabled,
            send_idle_reports,
            host_at_rest: true,
            reports_sent: 0,
        }
    }

    /// Registers the HID report descriptor with the transport.
    ///
    /// # Errors
    ///
    /// Propagates transport errors.
    pub async fn register(&mut self, descriptor: &[u8]) -> Result<()> {
        self.transport.register_descriptor(descriptor).await
    }

    /// Sends the translation and rotation reports for one tick.
    ///
    /// # Errors
    ///
    /// Propagates transport errors. A failed pair counts as not sent.
    pub async fn send(&mut self, motion: &MotionVector) -> Result<Dispatch> {
        if !self.enabled {
            return Ok(Dispatch::Disabled);
        }

        let at_rest = motion.is_zero();
        if !self.send_idle_reports && at_rest && self.host_at_rest {
            return Ok(Dispatch::Idle);
        }

        let translation = encode_axis_report(motion.translation);
        let rotation = encode_axis_report(motion.rotation);

        // Half a pair may reach the host; only a complete zero pair means rest
        self.host_at_rest = false;
        self.transport.send_report(REPORT_ID_TRANSLATION, &translation).await?;
        self.transport.send_report(REPORT_ID_ROTATION, &rotation).await?;

        self.host_at_rest = at_rest;
        self.reports_sent += 1;
        debug!("Sent report pair {:?}", motion.to_axes());

        Ok(Dispatch::Sent)
    }

    /// Report pairs sent so far.
    pub fn reports_sent(&self) -> u64 {
        self.reports_sent
    }

    /// Read access to the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }
}
