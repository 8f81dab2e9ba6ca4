//! Sourcing logic: estimator, staging bridge and the barcode scanner core.

pub mod app_state;
pub mod bindings;
pub mod cancel;
pub mod detection;
pub mod estimate;
pub mod scheduler;
pub mod session;
pub mod shipping;
pub mod staging;
pub mod status;

pub use app_state::SourcingState;
pub use bindings::{FieldBinding, Trigger};
pub use detection::{start_scan, ScanOutcome};
#[allow(unused_imports)]
pub use estimate::{compute, parse_amount, EstimateResult, ProfitVerdict, VerdictStatus};
pub use scheduler::IntervalScheduler;
#[allow(unused_imports)]
pub use session::{CameraSessionManager, SessionHandle, SessionState};
#[allow(unused_imports)]
pub use shipping::{default_labels, PresetLabel, ShippingPreset};
#[allow(unused_imports)]
pub use staging::{FieldAssignments, StagingField, StagingRecord};
pub use status::{ScanEvent, ScanEvents, StatusReporter};
