//! Pointer gesture state machines: range selection and task drag/resize.

pub mod capture;
pub mod drag;
pub mod selection;

pub use capture::{CaptureGuard, NoopCapture, PointerCapture, SharedCapture};
pub use drag::{candidate_dates, DragGesture, DragKind, DragRelease, DragState};
pub use selection::{DateRange, SelectionGesture, SelectionState};
