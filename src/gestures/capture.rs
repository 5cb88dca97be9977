// Scoped pointer capture
//
// While a gesture is armed or active the host routes every move/up event to
// the engine, even outside the grid. Capture is held by a guard stored inside
// the gesture session: dropping the session on commit, cancel, or pointer
// leave releases it exactly once.

use std::cell::RefCell;
use std::rc::Rc;

/// Host hook that installs and removes global move/up listeners.
pub trait PointerCapture {
    fn attach(&mut self);
    fn detach(&mut self);
}

pub type SharedCapture = Rc<RefCell<dyn PointerCapture>>;

/// Capture for hosts that already deliver every event to the engine.
#[derive(Debug, Default)]
pub struct NoopCapture;

impl PointerCapture for NoopCapture {
    fn attach(&mut self) {}
    fn detach(&mut self) {}
}

/// Releases pointer capture when dropped.
#[must_use = "capture is released as soon as the guard is dropped"]
pub struct CaptureGuard {
    capture: Option<SharedCapture>,
}

impl CaptureGuard {
    pub fn acquire(capture: &SharedCapture) -> Self {
        capture.borrow_mut().attach();
        Self {
            capture: Some(Rc::clone(capture)),
        }
    }

    /// A guard that holds nothing.
    pub fn detached() -> Self {
        Self { capture: None }
    }

    pub fn is_held(&self) -> bool {
        self.capture.is_some()
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        if let Some(capture) = self.capture.take() {
            match capture.try_borrow_mut() {
                Ok(mut capture) => capture.detach(),
                Err(_) => log::warn!("Pointer capture busy while releasing; listeners may leak"),
            }
        }
    }
}

impl std::fmt::Debug for CaptureGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureGuard")
            .field("held", &self.is_held())
            .finish()
    }
}
