//! Fullscreen state and the window-level side effects tied to it.
//!
//! Requests are fire-and-forget: `toggle` only queues a request for the host
//! window, and `is_fullscreen` changes solely when the host reports the actual
//! window state back through `sync`. A rejected request therefore leaves the
//! state untouched instead of drifting out of step with the window.

/// Tracks the window's fullscreen state and pending requests.
#[derive(Debug, Default)]
pub struct FullscreenController {
    is_fullscreen: bool,
    pending_request: Option<bool>,
}

impl FullscreenController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }

    /// Queue a request for the opposite of the current state.
    pub fn toggle(&mut self) {
        let target = !self.is_fullscreen;
        tracing::debug!(requested = target, "fullscreen requested");
        self.pending_request = Some(target);
    }

    /// The request to forward to the window, if any. Consumed on read.
    pub fn take_request(&mut self) -> Option<bool> {
        self.pending_request.take()
    }

    /// Apply the window's reported state. Returns `true` if it changed.
    pub fn sync(&mut self, actual: bool) -> bool {
        if self.is_fullscreen == actual {
            return false;
        }
        tracing::info!(fullscreen = actual, "fullscreen state changed");
        self.is_fullscreen = actual;
        true
    }
}

/// Something that can show or hide the pointer over the window.
pub trait CursorControl {
    fn set_cursor_visible(&self, visible: bool);
}

impl CursorControl for egui::Context {
    fn set_cursor_visible(&self, visible: bool) {
        self.send_viewport_cmd(egui::ViewportCommand::CursorVisible(visible));
    }
}

/// Hides the cursor for as long as it is alive.
///
/// Dropping the guard restores the cursor, so every exit path (leaving
/// fullscreen, a panic unwinding through the frame, closing the window) undoes
/// the effect.
pub struct CursorHideGuard<C: CursorControl> {
    control: C,
}

impl<C: CursorControl> CursorHideGuard<C> {
    pub fn acquire(control: C) -> Self {
        control.set_cursor_visible(false);
        Self { control }
    }
}

impl<C: CursorControl> Drop for CursorHideGuard<C> {
    fn drop(&mut self) {
        self.control.set_cursor_visible(true);
    }
}

/// Holds at most one [`CursorHideGuard`] and reconciles it with the wanted state.
pub struct ScopedCursor<C: CursorControl> {
    guard: Option<CursorHideGuard<C>>,
}

impl<C: CursorControl> Default for ScopedCursor<C> {
    fn default() -> Self {
        Self { guard: None }
    }
}

impl<C: CursorControl> ScopedCursor<C> {
    pub fn is_hidden(&self) -> bool {
        self.guard.is_some()
    }

    /// Acquire or release the effect so that it matches `hidden`.
    pub fn set_hidden(&mut self, hidden: bool, control: impl FnOnce() -> C) {
        match (hidden, self.guard.is_some()) {
            (true, false) => self.guard = Some(CursorHideGuard::acquire(control())),
            (false, true) => self.guard = None,
            _ => {}
        }
    }

    pub fn release(&mut self) {
        self.guard = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<bool>>>);

    impl CursorControl for Recorder {
        fn set_cursor_visible(&self, visible: bool) {
            self.0.borrow_mut().push(visible);
        }
    }

    #[test]
    fn toggle_only_queues_a_request() {
        let mut fullscreen = FullscreenController::new();
        fullscreen.toggle();

        assert!(!fullscreen.is_fullscreen());
        assert_eq!(fullscreen.take_request(), Some(true));
        assert_eq!(fullscreen.take_request(), None);
    }

    #[test]
    fn rejected_request_leaves_state_unchanged() {
        let mut fullscreen = FullscreenController::new();
        fullscreen.toggle();
        let _ = fullscreen.take_request();

        // The window never entered fullscreen.
        assert!(!fullscreen.sync(false));
        assert!(!fullscreen.is_fullscreen());
    }

    #[test]
    fn sync_follows_the_window() {
        let mut fullscreen = FullscreenController::new();
        assert!(fullscreen.sync(true));
        assert!(fullscreen.is_fullscreen());

        fullscreen.toggle();
        assert_eq!(fullscreen.take_request(), Some(false));
        assert!(fullscreen.sync(false));
    }

    #[test]
    fn cursor_is_restored_on_every_exit_path() {
        let recorder = Recorder::default();
        let mut cursor = ScopedCursor::default();

        cursor.set_hidden(true, || recorder.clone());
        cursor.set_hidden(true, || recorder.clone());
        assert!(cursor.is_hidden());
        cursor.set_hidden(false, || recorder.clone());
        assert_eq!(*recorder.0.borrow(), vec![false, true]);

        cursor.set_hidden(true, || recorder.clone());
        drop(cursor);
        assert_eq!(*recorder.0.borrow(), vec![false, true, false, true]);
    }
}
