//! Scan events and the status line they drive.

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::infra::{camera::CameraError, detector::ScanResult};

pub const UNSUPPORTED_MESSAGE: &str =
    "Barcode scanning is unsupported on this device. Type the barcode in manually.";

#[derive(Clone, Debug, PartialEq)]
pub enum ScanEvent {
    Requesting,
    Active,
    Unsupported,
    CameraFailed(CameraError),
    Scanned(ScanResult),
    Closed,
}

/// Sending half of the scanner's event channel.
#[derive(Clone, Debug)]
pub struct ScanEvents {
    tx: UnboundedSender<ScanEvent>,
}

impl ScanEvents {
    pub fn channel() -> (Self, UnboundedReceiver<ScanEvent>) {
        let (tx, rx) = unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn emit(&self, event: ScanEvent) {
        if self.tx.send(event).is_err() {
            debug!("scan event dropped; status receiver is gone");
        }
    }
}

/// Human-facing status text. Last write wins, nothing is kept.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatusReporter {
    message: Option<String>,
}

impl StatusReporter {
    pub fn report(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn clear(&mut self) {
        self.message = None;
    }

    pub fn current(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn apply(&mut self, event: &ScanEvent) {
        match event {
            ScanEvent::Requesting => self.report("Requesting camera…"),
            ScanEvent::Active => self.report("Point the camera at a barcode."),
            ScanEvent::Unsupported => self.report(UNSUPPORTED_MESSAGE),
            ScanEvent::CameraFailed(err) => self.report(err.guidance()),
            ScanEvent::Scanned(result) => self.report(format!("Scanned: {}", result.raw_value)),
            ScanEvent::Closed => self.clear(),
        }
    }
}
