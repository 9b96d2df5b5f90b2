//! Critical-region seam shared by interrupt and main context.
//!
//! Everything the queue touches is wrapped in a [`Mutex`] and only reachable
//! from inside [`interrupt::free`]. The region itself comes from the
//! `critical-section` crate: on single-core Cortex-M parts `cortex-m` masks
//! interrupts, on hosted targets the `std` implementation takes a global lock.

pub use critical_section::{CriticalSection, Mutex};

pub mod interrupt {
    use super::CriticalSection;

    /// Runs `f` inside the critical region and returns its result.
    ///
    /// The region nests: entering it from inside another one restores the
    /// outer state on exit instead of unmasking interrupts.
    #[inline]
    pub fn free<F, R>(f: F) -> R
    where
        F: FnOnce(CriticalSection<'_>) -> R,
    {
        critical_section::with(f)
    }
}
