//! # Synchronization Primitives
//!
//! Interrupt-safe critical section for the Cortex-M4. Used where state is
//! shared with an exception handler and no atomic fits, such as the SysTick
//! handler slot.

use cortex_m::interrupt;

/// Execute a closure with interrupts disabled.
///
/// Interrupts are disabled on entry and restored on exit. Keep the body
/// short: every cycle spent here delays the next tick.
///
/// # Usage
/// ```ignore
/// sync::critical_section(|cs| SLOT.borrow(cs).set(Some(value)));
/// ```
#[inline]
pub fn critical_section<F, R>(f: F) -> R
where
    F: FnOnce(&interrupt::CriticalSection) -> R,
{
    interrupt::free(f)
}
