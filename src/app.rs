use std::{rc::Rc, time::Duration};

use dioxus::{core::spawn_forever, prelude::*, signals::Signal};
use tokio::sync::OnceCell;
use tracing::debug;

use crate::{
    domain::{
        start_scan, CameraSessionManager, IntervalScheduler, ScanEvent, ScanEvents, SessionState,
        SourcingState, StatusReporter,
    },
    infra::{
        detector::DetectorStrategy,
        host::{discover_detector, HostCamera, ScannerBackend},
        webview::WebviewDetector,
    },
    ui::{
        components::toast::{push_toast, Toast, ToastKind, ToastMessage},
        pages::{SourcingPage, StagingPage},
        shell::Shell,
    },
    util::{
        assets,
        config::{config, SourcingConfig},
    },
};

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Sourcing {},
    #[route("/staging")]
    Staging {},
}

/// Scan triggers shared through context. Cloning shares the same session
/// manager, so there is never more than one camera session app-wide.
#[derive(Clone)]
pub struct Scanner {
    sessions: Rc<CameraSessionManager<HostCamera>>,
    detector: Rc<OnceCell<DetectorStrategy<WebviewDetector>>>,
    backend: ScannerBackend,
    events: ScanEvents,
    frame_interval: Duration,
}

impl Scanner {
    pub fn new(events: ScanEvents, config: &SourcingConfig) -> Self {
        Self {
            sessions: Rc::new(CameraSessionManager::new(HostCamera::for_backend(
                config.scanner_backend,
            ))),
            detector: Rc::new(OnceCell::new()),
            backend: config.scanner_backend,
            events,
            frame_interval: config.frame_interval(),
        }
    }

    /// Resolves the detector strategy on first use; later calls reuse it.
    async fn detector(&self) -> &DetectorStrategy<WebviewDetector> {
        self.detector
            .get_or_init(|| async { DetectorStrategy::probe(discover_detector(self.backend).await) })
            .await
    }

    pub fn probe_detector(&self) {
        let scanner = self.clone();
        let _ = spawn_forever(async move {
            scanner.detector().await;
        });
    }

    /// Start-scan trigger. The task belongs to the app root, not the
    /// component that fired it, so leaving the page does not cut it short.
    pub fn start(&self) {
        let scanner = self.clone();
        let _ = spawn_forever(async move {
            let detector = scanner.detector().await;
            let outcome = start_scan(
                &scanner.sessions,
                detector,
                IntervalScheduler::new(scanner.frame_interval),
                &scanner.events,
            )
            .await;
            debug!(?outcome, "scan task finished");
        });
    }

    pub fn close(&self) {
        self.sessions.close(&self.events);
    }

    pub fn state(&self) -> SessionState {
        self.sessions.state()
    }
}

#[component]
pub fn App() -> Element {
    let config = config();
    let state = use_signal(|| SourcingState::with_defaults(config));
    use_context_provider(|| state);

    let status = use_signal(StatusReporter::default);
    use_context_provider(|| status);

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts);

    let scanner = use_hook(move || {
        let (events, rx) = ScanEvents::channel();
        spawn(pump_scan_events(rx, state, status, toasts));
        let scanner = Scanner::new(events, config);
        scanner.probe_detector();
        scanner
    });
    use_context_provider(|| scanner.clone());

    use_drop({
        let scanner = scanner.clone();
        move || scanner.close()
    });

    rsx! {
        document::Link { rel: "icon", href: assets::favicon_data_uri() }
        document::Style { "{assets::main_css()}" }
        document::Style { "{assets::tailwind_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

/// Feeds scan events into the status line and the barcode binding.
async fn pump_scan_events(
    mut rx: tokio::sync::mpsc::UnboundedReceiver<ScanEvent>,
    mut state: Signal<SourcingState>,
    mut status: Signal<StatusReporter>,
    toasts: Signal<Vec<ToastMessage>>,
) {
    while let Some(event) = rx.recv().await {
        match &event {
            ScanEvent::Scanned(result) => state.with_mut(|st| st.record_scan(result)),
            ScanEvent::CameraFailed(err) => {
                push_toast(toasts, ToastKind::Warning, err.to_string());
            }
            _ => {}
        }
        status.with_mut(|st| st.apply(&event));
    }
}

#[component]
pub fn Sourcing() -> Element {
    rsx! { Shell { SourcingPage {} } }
}

#[component]
pub fn Staging() -> Element {
    rsx! { Shell { StagingPage {} } }
}
