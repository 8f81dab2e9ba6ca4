//! Camera session lifecycle: Idle → Requesting → Active → Stopped.
//!
//! A session owns its stream for exactly as long as it is Active. Every path
//! out of Active goes through [`CameraSession::stop`], which releases the
//! stream before the state flips to Stopped.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use tracing::{debug, warn};

use super::{
    cancel::CancelFlag,
    status::{ScanEvent, ScanEvents},
};
use crate::infra::camera::{CameraCapability, CameraConstraints, Frame, StreamHandle};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Requesting,
    Active,
    Stopped,
}

#[derive(Debug)]
pub struct CameraSession<S: StreamHandle> {
    id: u64,
    state: SessionState,
    stream: Option<S>,
    cancel: CancelFlag,
}

impl<S: StreamHandle> CameraSession<S> {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            state: SessionState::Idle,
            stream: None,
            cancel: CancelFlag::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn holds_stream(&self) -> bool {
        self.stream.is_some()
    }

    /// Idle/Stopped → Requesting. Returns false when already in flight.
    pub fn begin_request(&mut self) -> bool {
        match self.state {
            SessionState::Idle | SessionState::Stopped => {
                self.state = SessionState::Requesting;
                self.cancel = CancelFlag::new();
                debug!(session = self.id, "camera session requesting");
                true
            }
            SessionState::Requesting | SessionState::Active => false,
        }
    }

    /// Requesting → Active with the granted stream. A grant that lands after
    /// the session was stopped is released on the spot.
    pub fn attach(&mut self, mut stream: S) -> bool {
        if self.state != SessionState::Requesting {
            debug!(session = self.id, state = ?self.state, "late camera grant released");
            stream.release();
            return false;
        }
        self.stream = Some(stream);
        self.state = SessionState::Active;
        debug!(session = self.id, "camera session active");
        true
    }

    /// Requesting/Active → Stopped. Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.cancel.cancel();
        if let Some(mut stream) = self.stream.take() {
            stream.release();
        }
        if matches!(self.state, SessionState::Requesting | SessionState::Active) {
            self.state = SessionState::Stopped;
            debug!(session = self.id, "camera session stopped");
        }
    }
}

impl<S: StreamHandle> Drop for CameraSession<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Shared handle to one session, passed to whoever drives it.
#[derive(Debug)]
pub struct SessionHandle<S: StreamHandle> {
    inner: Rc<RefCell<CameraSession<S>>>,
}

impl<S: StreamHandle> Clone for SessionHandle<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S: StreamHandle> SessionHandle<S> {
    pub fn new(id: u64) -> Self {
        Self {
            inner: Rc::new(RefCell::new(CameraSession::new(id))),
        }
    }

    pub fn id(&self) -> u64 {
        self.inner.borrow().id
    }

    pub fn state(&self) -> SessionState {
        self.inner.borrow().state()
    }

    pub fn is_active(&self) -> bool {
        self.state() == SessionState::Active
    }

    pub fn holds_stream(&self) -> bool {
        self.inner.borrow().holds_stream()
    }

    pub fn cancel_flag(&self) -> CancelFlag {
        self.inner.borrow().cancel.clone()
    }

    pub fn current_frame(&self) -> Option<Frame> {
        self.inner
            .borrow()
            .stream
            .as_ref()
            .and_then(|stream| stream.current_frame())
    }

    pub fn begin_request(&self) -> bool {
        self.inner.borrow_mut().begin_request()
    }

    pub fn attach(&self, stream: S) -> bool {
        self.inner.borrow_mut().attach(stream)
    }

    pub fn stop(&self) {
        self.inner.borrow_mut().stop();
    }
}

/// Stops its session on drop if the session is still Requesting or Active.
/// Held by every future that awaits on a session, so tearing the future down
/// mid-await cannot leave the camera open with nothing driving it.
pub struct StopGuard<'a, S: StreamHandle> {
    session: SessionHandle<S>,
    events: &'a ScanEvents,
    armed: bool,
}

impl<'a, S: StreamHandle> StopGuard<'a, S> {
    pub fn new(session: SessionHandle<S>, events: &'a ScanEvents) -> Self {
        Self {
            session,
            events,
            armed: true,
        }
    }

    /// Hands the session back to its owner untouched.
    pub fn disarm(mut self) {
        self.armed = false;
    }
}

impl<S: StreamHandle> Drop for StopGuard<'_, S> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let running = matches!(
            self.session.state(),
            SessionState::Requesting | SessionState::Active
        );
        if running {
            debug!(session = self.session.id(), "scan task dropped; stopping session");
            self.session.stop();
            self.events.emit(ScanEvent::Closed);
        }
    }
}

/// Owns the camera capability and the one session allowed to hold it.
pub struct CameraSessionManager<C: CameraCapability> {
    camera: C,
    current: RefCell<Option<SessionHandle<C::Stream>>>,
    next_id: Cell<u64>,
}

impl<C: CameraCapability> CameraSessionManager<C> {
    pub fn new(camera: C) -> Self {
        Self {
            camera,
            current: RefCell::new(None),
            next_id: Cell::new(1),
        }
    }

    pub fn current(&self) -> Option<SessionHandle<C::Stream>> {
        self.current.borrow().clone()
    }

    pub fn state(&self) -> SessionState {
        self.current()
            .map(|session| session.state())
            .unwrap_or(SessionState::Idle)
    }

    /// Opens a fresh session on the rear camera, stopping whatever session
    /// came before it. Returns the handle only if the session went Active.
    pub async fn start(&self, events: &ScanEvents) -> Option<SessionHandle<C::Stream>> {
        if let Some(previous) = self.current.borrow_mut().take() {
            previous.stop();
        }

        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let session = SessionHandle::new(id);
        session.begin_request();
        *self.current.borrow_mut() = Some(session.clone());
        events.emit(ScanEvent::Requesting);

        let guard = StopGuard::new(session.clone(), events);
        let granted = self.camera.request(&CameraConstraints::rear_facing()).await;
        guard.disarm();

        match granted {
            Ok(stream) => {
                if !session.attach(stream) {
                    return None;
                }
                events.emit(ScanEvent::Active);
                Some(session)
            }
            Err(err) => {
                warn!(session = id, error = %err, "camera request failed");
                let superseded = session.state() != SessionState::Requesting;
                session.stop();
                if !superseded {
                    events.emit(ScanEvent::CameraFailed(err));
                }
                None
            }
        }
    }

    /// Close-scan trigger. Stops the current session immediately; a detection
    /// call already in flight is left to finish on its own.
    pub fn close(&self, events: &ScanEvents) {
        let Some(session) = self.current.borrow_mut().take() else {
            return;
        };
        let was_running = matches!(
            session.state(),
            SessionState::Requesting | SessionState::Active
        );
        session.stop();
        if was_running {
            events.emit(ScanEvent::Closed);
        }
    }
}
