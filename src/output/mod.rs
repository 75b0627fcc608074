//! # Output Module
//!
//! Hands the motion vector to the host-facing transport.
//!
//! This module handles:
//! - The [`Transport`] boundary (descriptor registration, report sending)
//! - Splitting a [`MotionVector`](crate::motion::MotionVector) into the
//!   translation and rotation reports ([`dispatcher`])

pub mod dispatcher;

use async_trait::async_trait;

use crate::error::Result;

/// Carries HID reports to the host.
#[async_trait]
pub trait Transport: Send {
    /// Registers the HID report descriptor. Called once at startup.
    async fn register_descriptor(&mut self, descriptor: &[u8]) -> Result<()>;

    /// Sends one input report.
    async fn send_report(&mut self, report_id: u8, payload: &[u8]) -> Result<()>;
}
