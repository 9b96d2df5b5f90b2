/// Declares a module holding a process-wide [`EvtQueue`](crate::EvtQueue)
/// and free functions forwarding to it.
///
/// `define_evt_queue!(app_evts)` queues `fn()` handlers,
/// `define_evt_queue!(app_evts, MyHandler)` queues `MyHandler`s (which must be
/// `Send + FnOnce()`). Every invocation is an independent queue, so a
/// firmware can keep e.g. radio and application work apart:
///
/// ```text
/// define_evt_queue!(radio_evts);
/// static RX_DONE: Evt<'static> = Evt::new();
///
/// // interrupt handler
/// let _ = radio_evts::put(&RX_DONE, on_rx_done);
///
/// // main loop
/// loop {
///     radio_evts::execute();
///     // a put landing between the check and the wfi still wakes the core
///     cortex_m::interrupt::free(|_| {
///         if radio_evts::is_empty() {
///             cortex_m::asm::wfi();
///         }
///     });
/// }
/// ```
#[macro_export]
macro_rules! define_evt_queue {
    ($queue_mod:ident) => {
        $crate::define_evt_queue!($queue_mod, fn());
    };
    ($queue_mod:ident, $handler:ty) => {
        mod $queue_mod {
            #[allow(unused_imports)]
            use super::*;

            static QUEUE: $crate::EvtQueue<'static, $handler> = $crate::EvtQueue::new();

            #[allow(dead_code)]
            pub fn is_queued(evt: &$crate::Evt<'static, $handler>) -> bool {
                QUEUE.is_queued(evt)
            }

            #[allow(dead_code)]
            pub fn is_empty() -> bool {
                QUEUE.is_empty()
            }

            #[allow(dead_code)]
            pub fn put(evt: &'static $crate::Evt<'static, $handler>, handler: $handler) -> $crate::PutResult {
                QUEUE.put(evt, handler)
            }

            #[allow(dead_code)]
            pub fn remove(evt: &$crate::Evt<'static, $handler>) -> $crate::RemoveResult {
                QUEUE.remove(evt)
            }

            #[allow(dead_code)]
            pub fn execute() {
                QUEUE.execute()
            }
        }
    };
}
