//! Capabilities the app wires in, picked once from config.

use serde::Deserialize;
use tracing::info;

use super::{
    camera::{CameraCapability, CameraConstraints, CameraError},
    webview::{WebviewCamera, WebviewDetector, WebviewStream},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScannerBackend {
    /// Camera and detector of the webview the UI renders in.
    #[default]
    Webview,
    /// No camera at all; start-scan reports it as unavailable.
    Disabled,
}

impl ScannerBackend {
    pub fn key(&self) -> &'static str {
        match self {
            ScannerBackend::Webview => "webview",
            ScannerBackend::Disabled => "disabled",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "webview" => Some(ScannerBackend::Webview),
            "disabled" | "none" | "off" => Some(ScannerBackend::Disabled),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum HostCamera {
    Webview(WebviewCamera),
    Disabled,
}

impl HostCamera {
    pub fn for_backend(backend: ScannerBackend) -> Self {
        match backend {
            ScannerBackend::Webview => HostCamera::Webview(WebviewCamera),
            ScannerBackend::Disabled => HostCamera::Disabled,
        }
    }
}

impl CameraCapability for HostCamera {
    type Stream = WebviewStream;

    async fn request(&self, constraints: &CameraConstraints) -> Result<WebviewStream, CameraError> {
        match self {
            HostCamera::Webview(camera) => camera.request(constraints).await,
            HostCamera::Disabled => Err(CameraError::Unavailable),
        }
    }
}

/// Detector for the backend, or `None` when it cannot decode barcodes.
pub async fn discover_detector(backend: ScannerBackend) -> Option<WebviewDetector> {
    match backend {
        ScannerBackend::Webview => WebviewDetector::discover().await,
        ScannerBackend::Disabled => {
            info!(backend = backend.key(), "barcode detection disabled");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            start_scan, CameraSessionManager, IntervalScheduler, ScanEvents, ScanOutcome,
            SessionState, StatusReporter,
        },
        infra::detector::DetectorStrategy,
    };

    #[test]
    fn backend_keys() {
        assert_eq!(ScannerBackend::from_key("Webview"), Some(ScannerBackend::Webview));
        assert_eq!(ScannerBackend::from_key(" none "), Some(ScannerBackend::Disabled));
        assert_eq!(ScannerBackend::from_key("usb"), None);
        assert_eq!(
            ScannerBackend::from_key(ScannerBackend::Disabled.key()),
            Some(ScannerBackend::Disabled)
        );
    }

    #[tokio::test]
    async fn disabled_backend_has_no_detector() {
        let detector = discover_detector(ScannerBackend::Disabled).await;
        assert!(detector.is_none());
        assert!(!DetectorStrategy::probe(detector).is_supported());
    }

    #[tokio::test]
    async fn disabled_camera_reports_unavailable() {
        let camera = HostCamera::for_backend(ScannerBackend::Disabled);
        let granted = camera.request(&CameraConstraints::rear_facing()).await;
        assert!(matches!(granted, Err(CameraError::Unavailable)));
    }

    #[tokio::test(start_paused = true)]
    async fn disabled_scan_ends_with_guidance() {
        let sessions =
            CameraSessionManager::new(HostCamera::for_backend(ScannerBackend::Disabled));
        let detector = DetectorStrategy::probe(discover_detector(ScannerBackend::Disabled).await);
        let (events, mut rx) = ScanEvents::channel();

        let outcome = start_scan(
            &sessions,
            &detector,
            IntervalScheduler::display_rate(),
            &events,
        )
        .await;

        assert_eq!(outcome, ScanOutcome::CameraUnavailable);
        assert_eq!(sessions.state(), SessionState::Stopped);

        let mut status = StatusReporter::default();
        while let Ok(event) = rx.try_recv() {
            status.apply(&event);
        }
        assert_eq!(
            status.current(),
            Some(CameraError::Unavailable.guidance().as_str())
        );
    }
}
