#![allow(dead_code)]

//! Camera capability consumed by the scanner. The host decides what backs it.

use std::{future::Future, sync::Arc};

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FacingMode {
    /// Rear camera, pointed away from the user.
    Environment,
    User,
}

impl FacingMode {
    /// `facingMode` constraint value understood by media devices.
    pub fn key(&self) -> &'static str {
        match self {
            FacingMode::Environment => "environment",
            FacingMode::User => "user",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CameraConstraints {
    pub facing: FacingMode,
    pub audio: bool,
}

impl CameraConstraints {
    pub fn rear_facing() -> Self {
        Self {
            facing: FacingMode::Environment,
            audio: false,
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CameraError {
    #[error("camera permission denied")]
    PermissionDenied,
    #[error("camera device error: {0}")]
    DeviceError(String),
    #[error("no camera capability on this host")]
    Unavailable,
}

impl CameraError {
    /// Guidance shown to the user when the grant fails.
    pub fn guidance(&self) -> String {
        match self {
            CameraError::PermissionDenied => {
                "Camera permission denied. Allow camera access for this app and try again.".to_string()
            }
            CameraError::DeviceError(detail) => {
                format!("Camera error: {detail}. Close other apps using the camera and retry.")
            }
            CameraError::Unavailable => {
                "No camera available on this device. Type the barcode in manually.".to_string()
            }
        }
    }
}

/// Where a frame's pixels live.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameSource {
    /// RGBA bytes copied into the process.
    Pixels(Arc<[u8]>),
    /// Frame still sitting in a webview video element, named by stream id.
    Webview(String),
}

/// A single captured video frame, handed to the detector as-is.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub sequence: u64,
    pub source: FrameSource,
}

impl Frame {
    pub fn blank(width: u32, height: u32, sequence: u64) -> Self {
        let len = width as usize * height as usize * 4;
        Self {
            width,
            height,
            sequence,
            source: FrameSource::Pixels(vec![0u8; len].into()),
        }
    }
}

/// Live hardware stream. `release` frees the underlying tracks and must be
/// safe to call more than once.
pub trait StreamHandle {
    fn current_frame(&self) -> Option<Frame>;
    fn release(&mut self);
}

pub trait CameraCapability {
    type Stream: StreamHandle;

    fn request(
        &self,
        constraints: &CameraConstraints,
    ) -> impl Future<Output = Result<Self::Stream, CameraError>>;
}
