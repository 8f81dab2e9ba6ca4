#![allow(dead_code)]

//! Barcode detection capability. Decoding itself lives outside this crate.

use std::future::Future;

use thiserror::Error;
use tracing::info;

use super::camera::Frame;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Symbology {
    UpcA,
    UpcE,
    Ean13,
    Ean8,
    Code128,
    Code39,
    Qr,
    Other(String),
}

impl Symbology {
    /// Maps detector format names (`upc_a`, `ean_13`, `qr_code`, ...) onto a tag.
    pub fn from_format(format: &str) -> Self {
        match format.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "upc_a" => Symbology::UpcA,
            "upc_e" => Symbology::UpcE,
            "ean_13" => Symbology::Ean13,
            "ean_8" => Symbology::Ean8,
            "code_128" => Symbology::Code128,
            "code_39" => Symbology::Code39,
            "qr" | "qr_code" => Symbology::Qr,
            _ => Symbology::Other(format.trim().to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Symbology::UpcA => "UPC-A",
            Symbology::UpcE => "UPC-E",
            Symbology::Ean13 => "EAN-13",
            Symbology::Ean8 => "EAN-8",
            Symbology::Code128 => "Code 128",
            Symbology::Code39 => "Code 39",
            Symbology::Qr => "QR",
            Symbology::Other(name) => name,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanResult {
    pub raw_value: String,
    pub symbology: Symbology,
}

impl ScanResult {
    pub fn new(raw_value: impl Into<String>, symbology: Symbology) -> Self {
        Self {
            raw_value: raw_value.into(),
            symbology,
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DetectError {
    #[error("frame could not be decoded: {0}")]
    Decode(String),
    #[error("frame not ready")]
    FrameNotReady,
}

pub trait Detector {
    fn detect(&self, frame: &Frame) -> impl Future<Output = Result<Vec<ScanResult>, DetectError>>;
}

/// Whether the host can decode barcodes at all. Resolved once at startup.
#[derive(Debug)]
pub enum DetectorStrategy<D> {
    Supported(D),
    Unsupported,
}

impl<D: Detector> DetectorStrategy<D> {
    pub fn probe(candidate: Option<D>) -> Self {
        match candidate {
            Some(detector) => {
                info!("barcode detector available");
                DetectorStrategy::Supported(detector)
            }
            None => {
                info!("no barcode detector on this host; scanning will report unsupported");
                DetectorStrategy::Unsupported
            }
        }
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, DetectorStrategy::Supported(_))
    }
}
