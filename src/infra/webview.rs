//! Camera capture and barcode detection through the app's webview, driven by
//! the helpers in `assets/scanner.js`.

use std::cell::Cell;

use dioxus::prelude::document;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{
    camera::{CameraCapability, CameraConstraints, CameraError, Frame, FrameSource, StreamHandle},
    detector::{DetectError, Detector, ScanResult, Symbology},
};
use crate::util::{assets, generate_id};

/// `getUserMedia` in the webview.
#[derive(Clone, Copy, Debug, Default)]
pub struct WebviewCamera;

impl CameraCapability for WebviewCamera {
    type Stream = WebviewStream;

    async fn request(&self, constraints: &CameraConstraints) -> Result<WebviewStream, CameraError> {
        let id = generate_id("camera");
        let call = format!(
            "return await window.__sourcing.acquire({}, {}, {});",
            js_string(&id),
            js_string(constraints.facing.key()),
            constraints.audio
        );

        let pending = PendingAcquire::new(&id);
        let reply = run(&call).await;
        pending.settle();

        let (width, height) = decode_camera_reply(reply.map_err(CameraError::DeviceError)?)?;
        debug!(stream = %id, width, height, "webview camera granted");
        Ok(WebviewStream {
            id,
            width,
            height,
            sequence: Cell::new(0),
            released: false,
        })
    }
}

/// Tracks held by the webview under `id`.
#[derive(Debug)]
pub struct WebviewStream {
    id: String,
    width: u32,
    height: u32,
    sequence: Cell<u64>,
    released: bool,
}

impl StreamHandle for WebviewStream {
    fn current_frame(&self) -> Option<Frame> {
        if self.released {
            return None;
        }
        let sequence = self.sequence.get();
        self.sequence.set(sequence + 1);
        Some(Frame {
            width: self.width,
            height: self.height,
            sequence,
            source: FrameSource::Webview(self.id.clone()),
        })
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        release_in_webview(&self.id);
    }
}

/// Abandons a camera request whose future was dropped before the webview
/// answered. The webview stops the tracks as soon as they arrive.
struct PendingAcquire<'a> {
    id: &'a str,
    settled: bool,
}

impl<'a> PendingAcquire<'a> {
    fn new(id: &'a str) -> Self {
        Self { id, settled: false }
    }

    fn settle(mut self) {
        self.settled = true;
    }
}

impl Drop for PendingAcquire<'_> {
    fn drop(&mut self) {
        if !self.settled {
            debug!(stream = %self.id, "camera request abandoned");
            release_in_webview(self.id);
        }
    }
}

/// `BarcodeDetector` in the webview.
#[derive(Clone, Copy, Debug)]
pub struct WebviewDetector {
    _probed: (),
}

impl WebviewDetector {
    /// Asks the webview once whether it can decode barcodes at all.
    pub async fn discover() -> Option<Self> {
        match run("return window.__sourcing.supportsDetection();").await {
            Ok(Value::Bool(true)) => Some(Self { _probed: () }),
            Ok(_) => {
                debug!("webview has no BarcodeDetector");
                None
            }
            Err(err) => {
                warn!(error = %err, "barcode detector probe failed");
                None
            }
        }
    }
}

impl Detector for WebviewDetector {
    async fn detect(&self, frame: &Frame) -> Result<Vec<ScanResult>, DetectError> {
        let FrameSource::Webview(stream) = &frame.source else {
            return Err(DetectError::Decode("frame is not held by the webview".into()));
        };
        let call = format!("return await window.__sourcing.detect({});", js_string(stream));
        let reply = run(&call).await.map_err(DetectError::Decode)?;
        decode_detect_reply(reply)
    }
}

async fn run(call: &str) -> Result<Value, String> {
    let script = format!("{}\n{call}", assets::scanner_js());
    document::eval(&script)
        .await
        .map_err(|err| format!("{err:?}"))
}

fn release_in_webview(id: &str) {
    let script = format!(
        "{}\nwindow.__sourcing.release({});",
        assets::scanner_js(),
        js_string(id)
    );
    // The script runs once sent; nothing comes back worth waiting for.
    let _ = document::eval(&script);
}

fn js_string(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string())
}

#[derive(Debug, Deserialize)]
struct CameraReply {
    ok: bool,
    #[serde(default)]
    kind: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
}

fn decode_camera_reply(value: Value) -> Result<(u32, u32), CameraError> {
    let reply: CameraReply = serde_json::from_value(value)
        .map_err(|err| CameraError::DeviceError(format!("unexpected camera reply: {err}")))?;
    if reply.ok {
        return Ok((reply.width, reply.height));
    }
    Err(match reply.kind.as_str() {
        "denied" => CameraError::PermissionDenied,
        "unavailable" => CameraError::Unavailable,
        _ => CameraError::DeviceError(reply.message),
    })
}

#[derive(Debug, Deserialize)]
struct DetectReply {
    ok: bool,
    #[serde(default)]
    results: Vec<DetectedCode>,
    #[serde(default)]
    error: String,
}

#[derive(Debug, Deserialize)]
struct DetectedCode {
    raw_value: String,
    format: String,
}

fn decode_detect_reply(value: Value) -> Result<Vec<ScanResult>, DetectError> {
    let reply: DetectReply = serde_json::from_value(value)
        .map_err(|err| DetectError::Decode(format!("unexpected detector reply: {err}")))?;
    if !reply.ok {
        return Err(match reply.error.as_str() {
            "not_ready" => DetectError::FrameNotReady,
            _ => DetectError::Decode(reply.error),
        });
    }
    Ok(reply
        .results
        .into_iter()
        .map(|code| ScanResult::new(code.raw_value, Symbology::from_format(&code.format)))
        .collect())
}
