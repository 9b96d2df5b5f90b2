use crate::error::{PutError, PutResult, RemoveError, RemoveResult};
use crate::evt::Evt;
use crate::port::{interrupt, CriticalSection, Mutex};
use core::cell::Cell;

/// Deferred execution queue.
///
/// Interrupt handlers [`put`](EvtQueue::put) events, the main loop
/// [`execute`](EvtQueue::execute)s them in FIFO order. An event is queued at
/// most once: putting it again while it is pending is refused, so a burst of
/// interrupts collapses into a single deferred call.
///
/// The queue only links caller-owned [`Evt`]s together. Every access to the
/// chain happens inside a critical section, and no handler code (call or
/// drop) ever runs while that section is held.
pub struct EvtQueue<'a, H = fn()> {
    head: Mutex<Cell<Option<&'a Evt<'a, H>>>>,
}

enum Refused<H> {
    AlreadyQueued(H),
    ForeignQueue(H),
}

impl<'a, H> EvtQueue<'a, H> {
    pub const fn new() -> EvtQueue<'a, H> {
        EvtQueue {
            head: Mutex::new(Cell::new(None)),
        }
    }

    #[inline]
    fn head(&self, cs: CriticalSection<'_>) -> Option<&'a Evt<'a, H>> {
        self.head.borrow(cs).get()
    }

    #[inline]
    fn set_head(&self, cs: CriticalSection<'_>, head: Option<&'a Evt<'a, H>>) {
        self.head.borrow(cs).set(head)
    }

    /// Returns the event linked right before `evt`, or `None` if `evt` is not
    /// in the chain.
    ///
    /// The head has no predecessor: callers deal with an empty queue and with
    /// `evt` being the head before asking.
    fn find_predecessor(&self, cs: CriticalSection<'_>, evt: &Evt<'a, H>) -> Option<&'a Evt<'a, H>> {
        let mut iterating = match self.head(cs) {
            Some(head) if !head.is(evt) => head,
            _ => panic!("predecessor search on an empty queue or from the head"),
        };
        loop {
            match iterating.next(cs) {
                None => return None,
                Some(next) if next.is(evt) => return Some(iterating),
                Some(next) => iterating = next,
            }
        }
    }

    fn find_last(&self, cs: CriticalSection<'_>, head: &'a Evt<'a, H>) -> &'a Evt<'a, H> {
        let mut iterating = head;
        while let Some(next) = iterating.next(cs) {
            iterating = next;
        }
        iterating
    }

    fn contains(&self, cs: CriticalSection<'_>, evt: &Evt<'a, H>) -> bool {
        let mut iterating = self.head(cs);
        while let Some(current) = iterating {
            if current.is(evt) {
                return true;
            }
            iterating = current.next(cs);
        }
        false
    }

    /// Returns true if `evt` is currently waiting in this queue.
    pub fn is_queued(&self, evt: &Evt<'a, H>) -> bool {
        interrupt::free(|cs| self.contains(cs, evt))
    }

    /// Returns true if nothing is waiting for [`execute`](EvtQueue::execute).
    pub fn is_empty(&self) -> bool {
        interrupt::free(|cs| self.head(cs).is_none())
    }

    fn put_locked(&self, cs: CriticalSection<'_>, evt: &'a Evt<'a, H>, handler: H) -> Result<(), Refused<H>> {
        match self.head(cs) {
            None => {
                if evt.is_linked(cs) {
                    return Err(Refused::ForeignQueue(handler));
                }
                evt.link(cs, handler);
                self.set_head(cs, Some(evt));
            }
            Some(head) if head.is(evt) => return Err(Refused::AlreadyQueued(handler)),
            Some(head) => {
                if self.find_predecessor(cs, evt).is_some() {
                    return Err(Refused::AlreadyQueued(handler));
                }
                if evt.is_linked(cs) {
                    return Err(Refused::ForeignQueue(handler));
                }
                let last = self.find_last(cs, head);
                evt.link(cs, handler);
                last.set_next(cs, Some(evt));
            }
        }
        Ok(())
    }

    /// Queues `evt` so that `handler` runs on the next [`execute`](EvtQueue::execute).
    ///
    /// Safe to call from interrupt context. If `evt` is already pending the
    /// queue is left untouched, `handler` is dropped and
    /// [`PutError::AlreadyQueued`] is returned; the handler bound by the first
    /// `put` is the one that will run.
    ///
    /// # Panics
    ///
    /// If `evt` is pending in a different queue.
    pub fn put(&self, evt: &'a Evt<'a, H>, handler: H) -> PutResult {
        match interrupt::free(|cs| self.put_locked(cs, evt, handler)) {
            Ok(()) => Ok(()),
            Err(Refused::AlreadyQueued(rejected)) => {
                drop(rejected);
                log::debug!("put refused for evt {:p}: already queued", evt);
                Err(PutError::AlreadyQueued)
            }
            Err(Refused::ForeignQueue(rejected)) => {
                drop(rejected);
                panic!("event is linked into another queue")
            }
        }
    }

    fn remove_locked(&self, cs: CriticalSection<'_>, evt: &Evt<'a, H>) -> Result<Option<H>, RemoveError> {
        let head = self.head(cs).ok_or(RemoveError::NotQueued)?;
        if head.is(evt) {
            self.set_head(cs, head.next(cs));
        } else {
            let predecessor = self
                .find_predecessor(cs, evt)
                .ok_or(RemoveError::NotQueued)?;
            predecessor.set_next(cs, evt.next(cs));
        }
        Ok(evt.unlink(cs))
    }

    /// Takes `evt` back out of the queue before it runs.
    ///
    /// The relative order of the remaining events is preserved. Once
    /// [`execute`](EvtQueue::execute) has dequeued `evt` its handler is
    /// already running or done, and this returns [`RemoveError::NotQueued`].
    pub fn remove(&self, evt: &Evt<'a, H>) -> RemoveResult {
        match interrupt::free(|cs| self.remove_locked(cs, evt)) {
            Ok(handler) => {
                drop(handler);
                Ok(())
            }
            Err(err) => {
                log::debug!("remove refused for evt {:p}: {}", evt, err);
                Err(err)
            }
        }
    }

    /// Dequeues the head and hands back its handler.
    fn pop_locked(&self, cs: CriticalSection<'_>) -> Option<H> {
        let head = self.head(cs)?;
        self.set_head(cs, head.next(cs));
        match head.unlink(cs) {
            Some(handler) => Some(handler),
            None => panic!("queued event has no handler"),
        }
    }
}

impl<'a, H> EvtQueue<'a, H>
where
    H: FnOnce(),
{
    /// Runs every pending handler, in queue order, until the queue is empty.
    ///
    /// Call only from the main context, never from an interrupt handler and
    /// never from inside a handler. Each event is unlinked before its handler
    /// runs and the critical section is released around the call, so handlers
    /// may `put` (including their own event) and `remove`. Events put during
    /// the drain are run by this same call, after those already pending: a
    /// handler that always re-queues itself keeps `execute` from returning.
    pub fn execute(&self) {
        let mut dispatched: usize = 0;
        while let Some(handler) = interrupt::free(|cs| self.pop_locked(cs)) {
            handler();
            dispatched += 1;
            log::trace!("evt handler #{} done", dispatched);
        }
        log::trace!("evt queue drained, {} handler(s) run", dispatched);
    }
}

impl<'a, H> Default for EvtQueue<'a, H> {
    fn default() -> Self {
        Self::new()
    }
}
