//! Overlay exclusivity.
//!
//! A single [`ModalLock`] is shared by every overlay; at most one overlay
//! holds it at a time. The lock lives in the session store and is handed to
//! overlays by reference, so showing and hiding always goes through
//! [`ModalLock::try_acquire`] and [`ModalLock::release`].

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Search,
    NewNode,
    ConfirmDelete,
}

#[derive(Debug, Default)]
pub struct ModalLock {
    held: bool,
}

impl ModalLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Check-then-set. Returns false when another overlay already holds it.
    pub fn try_acquire(&mut self) -> bool {
        if self.held {
            return false;
        }
        self.held = true;
        true
    }

    pub fn release(&mut self) {
        self.held = false;
    }
}

/// Open/closed state of one overlay, gated by the shared lock.
#[derive(Debug)]
pub struct Modal {
    kind: ModalKind,
    open: bool,
}

impl Modal {
    pub fn new(kind: ModalKind) -> Self {
        Self { kind, open: false }
    }

    pub fn kind(&self) -> ModalKind {
        self.kind
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open this overlay. A no-op returning false while a different overlay
    /// holds the lock; returns true if the overlay is (now) open.
    pub fn show(&mut self, lock: &mut ModalLock) -> bool {
        if self.open {
            return true;
        }
        if !lock.try_acquire() {
            return false;
        }
        self.open = true;
        true
    }

    pub fn hide(&mut self, lock: &mut ModalLock) {
        if !self.open {
            return;
        }
        self.open = false;
        lock.release();
    }

    /// Shortcut behaviour: close when open, otherwise try to open.
    pub fn toggle(&mut self, lock: &mut ModalLock) -> bool {
        if self.open {
            self.hide(lock);
            return false;
        }
        self.show(lock)
    }
}
