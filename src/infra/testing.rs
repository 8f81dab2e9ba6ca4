//! Scripted camera and detector doubles for scanner tests.

use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    rc::Rc,
    time::Duration,
};

use super::{
    camera::{CameraCapability, CameraConstraints, CameraError, Frame, StreamHandle},
    detector::{DetectError, Detector, ScanResult},
};

/// Counts streams handed out and not yet released.
#[derive(Clone, Debug, Default)]
pub struct StreamLedger {
    live: Rc<Cell<usize>>,
    peak: Rc<Cell<usize>>,
    granted: Rc<Cell<usize>>,
}

impl StreamLedger {
    pub fn live(&self) -> usize {
        self.live.get()
    }

    pub fn peak(&self) -> usize {
        self.peak.get()
    }

    pub fn granted(&self) -> usize {
        self.granted.get()
    }

    fn open(&self) {
        self.granted.set(self.granted.get() + 1);
        self.live.set(self.live.get() + 1);
        self.peak.set(self.peak.get().max(self.live.get()));
    }

    fn close(&self) {
        self.live.set(self.live.get() - 1);
    }
}

pub struct FakeCamera {
    outcome: Result<(), CameraError>,
    grant_delay: Duration,
    ledger: StreamLedger,
    last_constraints: RefCell<Option<CameraConstraints>>,
}

impl FakeCamera {
    pub fn granting() -> Self {
        Self {
            outcome: Ok(()),
            grant_delay: Duration::ZERO,
            ledger: StreamLedger::default(),
            last_constraints: RefCell::new(None),
        }
    }

    pub fn failing(error: CameraError) -> Self {
        Self {
            outcome: Err(error),
            ..Self::granting()
        }
    }

    pub fn with_grant_delay(mut self, delay: Duration) -> Self {
        self.grant_delay = delay;
        self
    }

    pub fn ledger(&self) -> StreamLedger {
        self.ledger.clone()
    }

    pub fn last_constraints(&self) -> Option<CameraConstraints> {
        *self.last_constraints.borrow()
    }
}

impl CameraCapability for FakeCamera {
    type Stream = FakeStream;

    async fn request(&self, constraints: &CameraConstraints) -> Result<FakeStream, CameraError> {
        *self.last_constraints.borrow_mut() = Some(*constraints);
        if !self.grant_delay.is_zero() {
            tokio::time::sleep(self.grant_delay).await;
        }
        self.outcome.clone()?;
        self.ledger.open();
        Ok(FakeStream {
            ledger: self.ledger.clone(),
            released: false,
            frames: Cell::new(0),
        })
    }
}

#[derive(Debug)]
pub struct FakeStream {
    ledger: StreamLedger,
    released: bool,
    frames: Cell<u64>,
}

impl StreamHandle for FakeStream {
    fn current_frame(&self) -> Option<Frame> {
        if self.released {
            return None;
        }
        let sequence = self.frames.get();
        self.frames.set(sequence + 1);
        Some(Frame::blank(4, 4, sequence))
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.ledger.close();
        }
    }
}

/// Replays one scripted response per call; once the script runs dry every
/// further call returns no results.
pub struct ScriptedDetector {
    script: RefCell<VecDeque<Result<Vec<ScanResult>, DetectError>>>,
    latency: Duration,
    calls: Rc<Cell<usize>>,
}

impl ScriptedDetector {
    pub fn new(script: Vec<Result<Vec<ScanResult>, DetectError>>) -> Self {
        Self {
            script: RefCell::new(script.into()),
            latency: Duration::ZERO,
            calls: Rc::new(Cell::new(0)),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn calls(&self) -> Rc<Cell<usize>> {
        self.calls.clone()
    }
}

impl Detector for ScriptedDetector {
    async fn detect(&self, _frame: &Frame) -> Result<Vec<ScanResult>, DetectError> {
        self.calls.set(self.calls.get() + 1);
        let next = self.script.borrow_mut().pop_front();
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        next.unwrap_or_else(|| Ok(Vec::new()))
    }
}
