//! # Tick Plumbing
//!
//! The boundary between the timer interrupt and the main loop.
//!
//! - [`TickSource`]: the periodic timer, programmed by the scheduler at init
//! - [`TickHandler`]: what the timer calls from interrupt context
//! - [`PendingTicks`]: the counter both contexts share
//!
//! The interrupt side may only call [`TickHandler::on_tick`], which for
//! [`PendingTicks`] is a single atomic increment. All table scanning and
//! callback invocation stays on the main loop.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::config::{SYST_RELOAD_MAX, SYST_RELOAD_MIN};
use crate::error::Error;

// ---------------------------------------------------------------------------
// Tick source interface
// ---------------------------------------------------------------------------

/// Notification invoked once per tick, from interrupt context.
///
/// Implementations must be O(1) and must not block. `Sync` because the
/// handler is reached from both the interrupt and the main loop.
pub trait TickHandler: Sync {
    fn on_tick(&self);
}

/// A hardware timer that raises one notification per tick interval.
///
/// The lifetime `'a` bounds how long the registered handler must live. The
/// SysTick port only accepts `'static` handlers since the exception can fire
/// at any time.
pub trait TickSource<'a> {
    /// Program the timer period. Fails with `ConfigurationFailure` if the
    /// hardware cannot produce `interval_ms`.
    fn arm_periodic(&mut self, interval_ms: u32) -> Result<(), Error>;

    /// Install the handler invoked on every tick. Replaces any previous one.
    fn register_callback(&mut self, handler: &'a dyn TickHandler) -> Result<(), Error>;

    /// Start counting. Ticks begin arriving after this returns.
    fn start(&mut self) -> Result<(), Error>;
}

// ---------------------------------------------------------------------------
// Pending-tick counter
// ---------------------------------------------------------------------------

/// Ticks received from the interrupt but not yet processed by the main loop.
///
/// Single producer (the tick interrupt), single consumer (the main loop).
/// Both sides use atomic read-modify-write, so an interrupt landing between
/// the consumer's read and write cannot lose an increment.
pub struct PendingTicks {
    count: AtomicU32,
}

impl PendingTicks {
    pub const fn new() -> Self {
        Self {
            count: AtomicU32::new(0),
        }
    }

    /// Record one tick. Safe to call from interrupt context.
    #[inline]
    pub fn notify(&self) {
        self.count.fetch_add(1, Ordering::Release);
    }

    /// Consume one pending tick if there is one.
    ///
    /// Returns `true` when a tick was taken and a dispatch pass is owed.
    #[inline]
    pub fn take_one(&self) -> bool {
        self.count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
            .is_ok()
    }

    /// Current backlog.
    #[inline]
    pub fn pending(&self) -> u32 {
        self.count.load(Ordering::Acquire)
    }
}

impl Default for PendingTicks {
    fn default() -> Self {
        Self::new()
    }
}

impl TickHandler for PendingTicks {
    #[inline]
    fn on_tick(&self) {
        self.notify();
    }
}

// ---------------------------------------------------------------------------
// Reload computation
// ---------------------------------------------------------------------------

/// Clock feeding the SysTick counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSource {
    /// Processor clock (AHB).
    Core,
    /// Processor clock divided by 8 (AHB/8).
    CoreDiv8,
}

impl ClockSource {
    /// Counter frequency for a given core clock.
    pub const fn counter_hz(self, core_hz: u32) -> u32 {
        match self {
            ClockSource::Core => core_hz,
            ClockSource::CoreDiv8 => core_hz / 8,
        }
    }
}

/// Compute the SysTick reload value for an interrupt every `interval_ms`.
///
/// The counter wraps after `reload + 1` cycles, hence the `- 1`. Intervals
/// that overflow the 24-bit counter, or that round to less than one cycle,
/// fail with `ConfigurationFailure`.
pub fn reload_for(interval_ms: u32, core_hz: u32, source: ClockSource) -> Result<u32, Error> {
    let cycles_per_ms = source.counter_hz(core_hz) / 1000;
    let reload = cycles_per_ms
        .checked_mul(interval_ms)
        .and_then(|cycles| cycles.checked_sub(1))
        .ok_or(Error::ConfigurationFailure)?;

    if !(SYST_RELOAD_MIN..=SYST_RELOAD_MAX).contains(&reload) {
        return Err(Error::ConfigurationFailure);
    }
    Ok(reload)
}

// ---------------------------------------------------------------------------
// Unit tests (host-only)
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SYSTEM_CLOCK_HZ;

    #[test]
    fn test_pending_ticks_accumulate() {
        let pending = PendingTicks::new();
        for _ in 0..5 {
            pending.on_tick();
        }
        assert_eq!(pending.pending(), 5);
    }

    #[test]
    fn test_take_one_never_underflows() {
        let pending = PendingTicks::new();
        assert!(!pending.take_one());

        pending.notify();
        pending.notify();
        assert!(pending.take_one());
        assert!(pending.take_one());
        assert!(!pending.take_one());
        assert_eq!(pending.pending(), 0);
    }

    #[test]
    fn test_reload_for_default_tick() {
        // 16 MHz core, 2 ms tick: 32_000 cycles
        assert_eq!(reload_for(2, SYSTEM_CLOCK_HZ, ClockSource::Core), Ok(31_999));
        assert_eq!(reload_for(2, SYSTEM_CLOCK_HZ, ClockSource::CoreDiv8), Ok(3_999));
    }

    #[test]
    fn test_reload_for_out_of_range() {
        // 16 MHz × 2 s = 32M cycles, beyond 24 bits
        assert_eq!(
            reload_for(2000, SYSTEM_CLOCK_HZ, ClockSource::Core),
            Err(Error::ConfigurationFailure)
        );
        assert_eq!(
            reload_for(0, SYSTEM_CLOCK_HZ, ClockSource::Core),
            Err(Error::ConfigurationFailure)
        );
        // A 1 kHz counter yields one cycle per ms: reload 0 is below the minimum
        assert_eq!(
            reload_for(1, 1000, ClockSource::Core),
            Err(Error::ConfigurationFailure)
        );
    }

    #[test]
    fn test_reload_for_max_interval() {
        // AHB/8 at 16 MHz gives 2000 cycles/ms; 8388 ms is the last fit
        assert_eq!(
            reload_for(8388, SYSTEM_CLOCK_HZ, ClockSource::CoreDiv8),
            Ok(16_775_999)
        );
        assert!(reload_for(8389, SYSTEM_CLOCK_HZ, ClockSource::CoreDiv8).is_err());
    }
}
