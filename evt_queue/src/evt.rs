use crate::port::{CriticalSection, Mutex};
use core::cell::{Cell, RefCell};

/// A unit of deferred work, owned by the caller.
///
/// The queue threads its link through the event and records the handler to
/// run, but never owns or frees it. An event is identified by its address:
/// two distinct `Evt`s are never the same event, whatever they hold.
///
/// Both fields are only reachable inside a critical section. `handler` is
/// `Some` exactly while the event is linked into a queue.
pub struct Evt<'a, H = fn()> {
    handler: Mutex<RefCell<Option<H>>>,
    next: Mutex<Cell<Option<&'a Evt<'a, H>>>>,
}

impl<'a, H> Evt<'a, H> {
    pub const fn new() -> Evt<'a, H> {
        Evt {
            handler: Mutex::new(RefCell::new(None)),
            next: Mutex::new(Cell::new(None)),
        }
    }

    #[inline]
    pub(crate) fn is(&self, other: &Evt<'a, H>) -> bool {
        core::ptr::eq(self, other)
    }

    #[inline]
    pub(crate) fn next(&self, cs: CriticalSection<'_>) -> Option<&'a Evt<'a, H>> {
        self.next.borrow(cs).get()
    }

    #[inline]
    pub(crate) fn set_next(&self, cs: CriticalSection<'_>, next: Option<&'a Evt<'a, H>>) {
        self.next.borrow(cs).set(next)
    }

    /// Whether the event is currently linked into some queue
    pub(crate) fn is_linked(&self, cs: CriticalSection<'_>) -> bool {
        self.handler.borrow(cs).borrow().is_some()
    }

    /// Prepares the event to become the new tail of a chain.
    pub(crate) fn link(&self, cs: CriticalSection<'_>, handler: H) {
        self.set_next(cs, None);
        *self.handler.borrow(cs).borrow_mut() = Some(handler);
    }

    /// Takes the pending handler out, leaving the event unlinked from the
    /// handler's point of view. `next` is left as is.
    pub(crate) fn unlink(&self, cs: CriticalSection<'_>) -> Option<H> {
        self.handler.borrow(cs).borrow_mut().take()
    }
}

impl<'a, H> Default for Evt<'a, H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::interrupt;

    fn noop() {}

    #[test]
    fn new_evt_is_unlinked() {
        let evt: Evt = Evt::new();
        interrupt::free(|cs| {
            assert!(!evt.is_linked(cs));
            assert!(evt.next(cs).is_none());
        });
    }

    #[test]
    fn link_and_unlink() {
        let a: Evt = Evt::new();
        let b: Evt = Evt::new();
        interrupt::free(|cs| {
            a.link(cs, noop);
            a.set_next(cs, Some(&b));
            assert!(a.is_linked(cs));
            assert!(a.next(cs).is_some_and(|next| next.is(&b)));

            assert!(a.unlink(cs).is_some());
            assert!(!a.is_linked(cs));
            assert!(a.unlink(cs).is_none());

            // relinking always clears the stale successor
            a.link(cs, noop);
            assert!(a.next(cs).is_none());
        });
    }

    #[test]
    fn identity_is_by_address() {
        let a: Evt = Evt::new();
        let b: Evt = Evt::new();
        assert!(a.is(&a));
        assert!(!a.is(&b));
    }
}
