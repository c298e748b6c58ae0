//! # Cortex-M4 Port Layer
//!
//! SysTick-backed [`TickSource`] for ARM Cortex-M4 (Thumb-2) parts.
//!
//! ## Tick Path
//!
//! The SysTick exception fires once per tick interval. Its only job is to
//! call the registered [`TickHandler`], which for the scheduler is a single
//! atomic increment of the pending-tick counter. Everything else happens on
//! the main loop.
//!
//! ## Handler Registration
//!
//! The handler reference lives in a `cortex_m::interrupt::Mutex` and is
//! written inside a critical section. It is written before `start()` enables
//! the exception, so the ISR never observes a half-initialized slot.

use core::cell::Cell;

use cortex_m::interrupt::Mutex;
use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::SYST;
use cortex_m_rt::exception;

use crate::error::Error;
use crate::sync;
use crate::tick::{self, ClockSource, TickHandler, TickSource};

/// Handler invoked from the SysTick exception.
static TICK_HANDLER: Mutex<Cell<Option<&'static dyn TickHandler>>> =
    Mutex::new(Cell::new(None));

// ---------------------------------------------------------------------------
// SysTick tick source
// ---------------------------------------------------------------------------

/// Periodic tick source driven by the core SysTick timer.
pub struct SysTickSource {
    syst: SYST,
    clock: ClockSource,
    core_hz: u32,
}

impl SysTickSource {
    /// Take ownership of SysTick. `core_hz` is the processor clock feeding
    /// the counter (before the optional divide-by-8).
    pub fn new(syst: SYST, clock: ClockSource, core_hz: u32) -> Self {
        Self {
            syst,
            clock,
            core_hz,
        }
    }

    /// Halt the counter. No further ticks are raised until `start()`.
    pub fn stop(&mut self) {
        self.syst.disable_counter();
    }

    /// Cycles left before the next tick.
    pub fn current_value(&self) -> u32 {
        SYST::get_current()
    }

    /// Release the SysTick peripheral.
    pub fn free(self) -> SYST {
        self.syst
    }
}

impl TickSource<'static> for SysTickSource {
    /// Program the reload register for `interval_ms`.
    ///
    /// The counter is stopped while reprogramming and the current value is
    /// cleared so the first period is a full one.
    fn arm_periodic(&mut self, interval_ms: u32) -> Result<(), Error> {
        let reload = tick::reload_for(interval_ms, self.core_hz, self.clock)?;

        self.syst.disable_counter();
        self.syst.set_clock_source(match self.clock {
            ClockSource::Core => SystClkSource::Core,
            // AHB/8 is wired to the "external" reference on STM32 parts
            ClockSource::CoreDiv8 => SystClkSource::External,
        });
        self.syst.set_reload(reload);
        self.syst.clear_current();
        Ok(())
    }

    fn register_callback(&mut self, handler: &'static dyn TickHandler) -> Result<(), Error> {
        sync::critical_section(|cs| TICK_HANDLER.borrow(cs).set(Some(handler)));
        Ok(())
    }

    /// Enable the SysTick exception and start counting.
    fn start(&mut self) -> Result<(), Error> {
        let registered = sync::critical_section(|cs| TICK_HANDLER.borrow(cs).get().is_some());
        if !registered {
            return Err(Error::NullReference);
        }
        self.syst.enable_interrupt();
        self.syst.enable_counter();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SysTick handler
// ---------------------------------------------------------------------------

/// SysTick exception handler. Forwards the tick and returns.
#[exception]
fn SysTick() {
    let handler = sync::critical_section(|cs| TICK_HANDLER.borrow(cs).get());
    if let Some(handler) = handler {
        handler.on_tick();
    }
}
