//! Frame-by-frame barcode detection for an Active camera session.

use tracing::{debug, info, trace};

use super::{
    scheduler::FrameScheduler,
    session::{CameraSessionManager, SessionHandle, StopGuard},
    status::{ScanEvent, ScanEvents},
};
use crate::infra::{
    camera::{CameraCapability, StreamHandle},
    detector::{Detector, DetectorStrategy, ScanResult},
};

#[derive(Clone, Debug, PartialEq)]
pub enum ScanOutcome {
    Detected(ScanResult),
    Unsupported,
    Cancelled,
    /// The camera never went Active; the session manager already reported why.
    CameraUnavailable,
}

pub struct DetectionLoop<'a, D, F> {
    detector: &'a DetectorStrategy<D>,
    scheduler: F,
}

impl<'a, D: Detector, F: FrameScheduler> DetectionLoop<'a, D, F> {
    pub fn new(detector: &'a DetectorStrategy<D>, scheduler: F) -> Self {
        Self {
            detector,
            scheduler,
        }
    }

    /// Polls the session's frames until the first non-empty barcode, the
    /// session stops, or its cancel flag is set. Per-frame detector errors
    /// are treated as noise and the next tick is scheduled as usual. If the
    /// future is dropped first, the session is stopped on the way out.
    pub async fn run<S: StreamHandle>(
        mut self,
        session: &SessionHandle<S>,
        events: &ScanEvents,
    ) -> ScanOutcome {
        let detector = match self.detector {
            DetectorStrategy::Supported(detector) => detector,
            DetectorStrategy::Unsupported => {
                events.emit(ScanEvent::Unsupported);
                session.stop();
                return ScanOutcome::Unsupported;
            }
        };

        let _guard = StopGuard::new(session.clone(), events);
        let cancel = session.cancel_flag();
        loop {
            if cancel.is_cancelled() || !session.is_active() {
                return ScanOutcome::Cancelled;
            }

            self.scheduler.next_tick().await;
            if cancel.is_cancelled() {
                return ScanOutcome::Cancelled;
            }

            let Some(frame) = session.current_frame() else {
                continue;
            };

            let detected = detector.detect(&frame).await;
            if cancel.is_cancelled() {
                debug!(session = session.id(), "detection finished after close; result dropped");
                return ScanOutcome::Cancelled;
            }

            let results = match detected {
                Ok(results) => results,
                Err(err) => {
                    trace!(session = session.id(), frame = frame.sequence, error = %err, "frame detection failed");
                    continue;
                }
            };

            if let Some(hit) = results.into_iter().find(|result| !result.raw_value.is_empty()) {
                info!(
                    session = session.id(),
                    symbology = hit.symbology.label(),
                    value = %hit.raw_value,
                    "barcode scanned"
                );
                events.emit(ScanEvent::Scanned(hit.clone()));
                session.stop();
                return ScanOutcome::Detected(hit);
            }
        }
    }
}

/// Start-scan trigger: acquire the camera, then run detection on it.
pub async fn start_scan<C, D, F>(
    sessions: &CameraSessionManager<C>,
    detector: &DetectorStrategy<D>,
    scheduler: F,
    events: &ScanEvents,
) -> ScanOutcome
where
    C: CameraCapability,
    D: Detector,
    F: FrameScheduler,
{
    let Some(session) = sessions.start(events).await else {
        return ScanOutcome::CameraUnavailable;
    };
    DetectionLoop::new(detector, scheduler).run(&session, events).await
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::sync::mpsc::UnboundedReceiver;

    use super::*;
    use crate::{
        domain::{
            scheduler::IntervalScheduler,
            session::SessionState,
            status::{StatusReporter, UNSUPPORTED_MESSAGE},
        },
        infra::{
            camera::CameraError,
            detector::{DetectError, Symbology},
            testing::{FakeCamera, ScriptedDetector},
        },
    };

    fn drain(rx: &mut UnboundedReceiver<ScanEvent>) -> Vec<ScanEvent> {
        let mut seen = Vec::new();
        while let Ok(event) = rx.try_recv() {
            seen.push(event);
        }
        seen
    }

    fn status_after(events: &[ScanEvent]) -> StatusReporter {
        let mut status = StatusReporter::default();
        for event in events {
            status.apply(event);
        }
        status
    }

    fn upc(value: &str) -> ScanResult {
        ScanResult::new(value, Symbology::UpcA)
    }

    #[tokio::test(start_paused = true)]
    async fn missing_detector_reports_unsupported_and_releases_camera() {
        let camera = FakeCamera::granting();
        let ledger = camera.ledger();
        let sessions = CameraSessionManager::new(camera);
        let detector: DetectorStrategy<ScriptedDetector> = DetectorStrategy::probe(None);
        let (events, mut rx) = ScanEvents::channel();

        let outcome = start_scan(
            &sessions,
            &detector,
            IntervalScheduler::display_rate(),
            &events,
        )
        .await;

        assert_eq!(outcome, ScanOutcome::Unsupported);
        assert_eq!(sessions.state(), SessionState::Stopped);
        assert_eq!(ledger.live(), 0);
        let status = status_after(&drain(&mut rx));
        assert_eq!(status.current(), Some(UNSUPPORTED_MESSAGE));
    }

    #[tokio::test(start_paused = true)]
    async fn start_then_close_without_detector_holds_nothing() {
        let camera = FakeCamera::granting();
        let ledger = camera.ledger();
        let sessions = CameraSessionManager::new(camera);
        let detector: DetectorStrategy<ScriptedDetector> = DetectorStrategy::Unsupported;
        let (events, _rx) = ScanEvents::channel();

        let session = sessions.start(&events).await.expect("camera granted");
        sessions.close(&events);
        let outcome = DetectionLoop::new(&detector, IntervalScheduler::display_rate())
            .run(&session, &events)
            .await;

        assert_eq!(outcome, ScanOutcome::Unsupported);
        assert_eq!(session.state(), SessionState::Stopped);
        assert!(!session.holds_stream());
        assert_eq!(ledger.live(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn transient_errors_are_retried_until_first_hit() {
        let camera = FakeCamera::granting();
        let ledger = camera.ledger();
        let sessions = CameraSessionManager::new(camera);
        let detector = ScriptedDetector::new(vec![
            Err(DetectError::Decode("blurry".into())),
            Ok(Vec::new()),
            Err(DetectError::FrameNotReady),
            Ok(vec![upc(""), upc("012345678905"), upc("999")]),
            Ok(vec![upc("never reached")]),
        ]);
        let calls = detector.calls();
        let detector = DetectorStrategy::probe(Some(detector));
        let (events, mut rx) = ScanEvents::channel();

        let outcome = start_scan(
            &sessions,
            &detector,
            IntervalScheduler::display_rate(),
            &events,
        )
        .await;

        assert_eq!(outcome, ScanOutcome::Detected(upc("012345678905")));
        assert_eq!(calls.get(), 4);
        assert_eq!(sessions.state(), SessionState::Stopped);
        assert_eq!(ledger.live(), 0);

        let seen = drain(&mut rx);
        let scanned: Vec<_> = seen
            .iter()
            .filter(|event| matches!(event, ScanEvent::Scanned(_)))
            .collect();
        assert_eq!(scanned.len(), 1);
        assert_eq!(
            status_after(&seen).current(),
            Some("Scanned: 012345678905")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn close_mid_detection_drops_the_pending_result() {
        let camera = FakeCamera::granting();
        let ledger = camera.ledger();
        let sessions = CameraSessionManager::new(camera);
        let detector = DetectorStrategy::probe(Some(
            ScriptedDetector::new(vec![Ok(vec![upc("012345678905")])])
                .with_latency(Duration::from_millis(100)),
        ));
        let (events, mut rx) = ScanEvents::channel();

        let (outcome, ()) = tokio::join!(
            start_scan(
                &sessions,
                &detector,
                IntervalScheduler::display_rate(),
                &events,
            ),
            async {
                tokio::time::sleep(Duration::from_millis(30)).await;
                sessions.close(&events);
                // Camera is already released while detection is still running.
                assert_eq!(ledger.live(), 0);
            }
        );

        assert_eq!(outcome, ScanOutcome::Cancelled);
        assert!(drain(&mut rx)
            .iter()
            .all(|event| !matches!(event, ScanEvent::Scanned(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_scan_task_releases_the_camera() {
        let camera = FakeCamera::granting();
        let ledger = camera.ledger();
        let sessions = CameraSessionManager::new(camera);
        let detector = DetectorStrategy::probe(Some(ScriptedDetector::new(Vec::new())));
        let (events, mut rx) = ScanEvents::channel();

        let finished = tokio::time::timeout(
            Duration::from_millis(50),
            start_scan(
                &sessions,
                &detector,
                IntervalScheduler::display_rate(),
                &events,
            ),
        )
        .await;

        assert!(finished.is_err());
        assert_eq!(sessions.state(), SessionState::Stopped);
        assert_eq!(ledger.live(), 0);
        let seen = drain(&mut rx);
        assert_eq!(seen.last(), Some(&ScanEvent::Closed));
        assert_eq!(status_after(&seen).current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn finished_scan_emits_no_close() {
        let sessions = CameraSessionManager::new(FakeCamera::granting());
        let detector = DetectorStrategy::probe(Some(ScriptedDetector::new(vec![Ok(vec![upc(
            "012345678905",
        )])])));
        let (events, mut rx) = ScanEvents::channel();

        start_scan(
            &sessions,
            &detector,
            IntervalScheduler::display_rate(),
            &events,
        )
        .await;

        assert!(!drain(&mut rx).contains(&ScanEvent::Closed));
    }

    #[tokio::test(start_paused = true)]
    async fn camera_denial_never_reaches_detection() {
        let sessions =
            CameraSessionManager::new(FakeCamera::failing(CameraError::DeviceError("busy".into())));
        let detector = ScriptedDetector::new(vec![Ok(vec![upc("1")])]);
        let calls = detector.calls();
        let detector = DetectorStrategy::probe(Some(detector));
        let (events, mut rx) = ScanEvents::channel();

        let outcome = start_scan(
            &sessions,
            &detector,
            IntervalScheduler::display_rate(),
            &events,
        )
        .await;

        assert_eq!(outcome, ScanOutcome::CameraUnavailable);
        assert_eq!(calls.get(), 0);
        assert_eq!(sessions.state(), SessionState::Stopped);
        let status = status_after(&drain(&mut rx));
        assert!(status.current().unwrap().starts_with("Camera error: busy"));
    }

    #[tokio::test(start_paused = true)]
    async fn restarting_cancels_the_running_loop() {
        let camera = FakeCamera::granting();
        let ledger = camera.ledger();
        let sessions = CameraSessionManager::new(camera);
        let detector = DetectorStrategy::probe(Some(ScriptedDetector::new(Vec::new())));
        let (events, _rx) = ScanEvents::channel();

        let (first, second) = tokio::join!(
            start_scan(
                &sessions,
                &detector,
                IntervalScheduler::display_rate(),
                &events,
            ),
            async {
                tokio::time::sleep(Duration::from_millis(40)).await;
                let session = sessions.start(&events).await.expect("second session");
                sessions.close(&events);
                session
            }
        );

        assert_eq!(first, ScanOutcome::Cancelled);
        assert_eq!(second.state(), SessionState::Stopped);
        assert_eq!(ledger.peak(), 1);
        assert_eq!(ledger.live(), 0);
    }
}
