//! # Kernel
//!
//! Firmware-level glue: wires the SysTick port, the pending-tick counter and
//! the scheduler together, and decides what happens when startup fails.
//!
//! ## Startup Sequence
//!
//! ```text
//! reset_handler (cortex-m-rt)
//!   └─► main()
//!         └─► kernel::run(SYST, table)      ← does not return
//!               ├─► Scheduler::init()       ← validate table, arm SysTick,
//!               │                             register PendingTicks
//!               └─► Scheduler::start()      ← enable SysTick, dispatch loop
//! ```
//!
//! Any startup error is logged and the core parks in `wfi`.

use log::error;

use crate::arch::SysTickSource;
use crate::config::{SYSTEM_CLOCK_HZ, TICK_INTERVAL_MS};
use crate::error::Error;
use crate::runnable::RunnableSpec;
use crate::scheduler::Scheduler;
use crate::tick::{ClockSource, PendingTicks};

/// Tick backlog shared between the SysTick exception and the main loop.
static PENDING: PendingTicks = PendingTicks::new();

/// Run `table` on the SysTick tick source. **Does not return.**
///
/// Call once, from thread mode. `PENDING` is a single static, so a second
/// scheduler would share its tick backlog with the first.
pub fn run(syst: cortex_m::peripheral::SYST, table: &[RunnableSpec<'static>]) -> ! {
    let mut source = SysTickSource::new(syst, ClockSource::Core, SYSTEM_CLOCK_HZ);
    let mut scheduler = Scheduler::new(&PENDING, TICK_INTERVAL_MS);

    let outcome = scheduler
        .init(table, &mut source)
        .and_then(|()| scheduler.start(&mut source));

    match outcome {
        Ok(never) => match never {},
        Err(err) => halt(err),
    }
}

/// Stop scheduling after an unrecoverable startup error.
fn halt(err: Error) -> ! {
    error!("scheduler halted: {}", err);
    loop {
        cortex_m::asm::wfi();
    }
}
