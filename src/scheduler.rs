//! # Scheduler
//!
//! Core scheduling logic. Owns the runnable table, consumes pending ticks on
//! the main loop and runs every runnable whose countdown has expired.
//!
//! ## Dispatch Pass
//!
//! One pass per consumed tick. For every slot, in table order:
//! 1. **Fire**: if `remaining_ms == 0` and a callback is present, run it to
//!    completion and rearm the countdown with `period_ms`
//! 2. **Advance**: subtract the tick interval, unconditionally
//!
//! The unconditional subtraction accounts for the tick being consumed, so a
//! runnable rearmed on pass `k` fires again on pass `k + period / tick`.
//! Pass `k` therefore observes elapsed time `k × tick`: a runnable with
//! delay `D` and period `P` fires at `D, D + P, D + 2P, ...`.
//!
//! ## Backpressure
//!
//! Ticks that pile up while a slow callback runs are replayed back-to-back,
//! one pass each, before the loop idles again. Nothing is dropped.

use core::convert::Infallible;

use log::{debug, info, trace, warn};

use crate::config::MAX_RUNNABLES;
use crate::error::Error;
use crate::runnable::{Runnable, RunnableSpec, RunnableState};
use crate::tick::{PendingTicks, TickSource};

// ---------------------------------------------------------------------------
// Runnable slot
// ---------------------------------------------------------------------------

/// One entry of the scheduler table: the integrator's spec paired with its
/// countdown.
#[derive(Clone, Copy)]
struct RunnableSlot<'a> {
    spec: RunnableSpec<'a>,
    state: RunnableState,
}

impl<'a> RunnableSlot<'a> {
    fn new(spec: RunnableSpec<'a>) -> Self {
        Self {
            state: RunnableState::new(&spec),
            spec,
        }
    }
}

/// Read-only snapshot of a table entry, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnableInfo<'a> {
    pub name: &'a str,
    pub period_ms: u32,
    pub initial_delay_ms: u32,
    pub remaining_ms: u32,
    pub activations: u32,
    pub has_callback: bool,
}

// ---------------------------------------------------------------------------
// Scheduler struct
// ---------------------------------------------------------------------------

/// The cooperative scheduler. One instance per device.
///
/// ## Design Notes
///
/// - Slots are stored inline in a fixed-size array (no heap)
/// - Slot `i` holds entry `i` of the configured table; index is priority
/// - The pending-tick counter is borrowed, so the same instance can be
///   handed to the tick source as its interrupt-context handler
pub struct Scheduler<'a> {
    /// Runnable table. Populated by `init()`, never shrinks.
    slots: [Option<RunnableSlot<'a>>; MAX_RUNNABLES],

    /// Number of leading slots covered by a configured table.
    count: usize,

    /// Tick backlog shared with the interrupt handler.
    pending: &'a PendingTicks,

    /// Milliseconds represented by one tick.
    tick_interval_ms: u32,

    /// Monotonic count of completed dispatch passes.
    passes: u64,

    /// Set once `init()` has armed the tick source.
    initialized: bool,
}

impl<'a> Scheduler<'a> {
    /// Create an empty scheduler bound to a pending-tick counter.
    pub const fn new(pending: &'a PendingTicks, tick_interval_ms: u32) -> Self {
        Self {
            slots: [None; MAX_RUNNABLES],
            count: 0,
            pending,
            tick_interval_ms,
            passes: 0,
            initialized: false,
        }
    }

    /// Build the runnable table and arm the tick source.
    ///
    /// The whole table is validated before any hardware is touched. Entry
    /// `i` of `table` lands in slot `i`; a slot that is already populated
    /// from an earlier call is left untouched, so calling `init()` twice
    /// does not reset running countdowns.
    ///
    /// # Errors
    /// - `InvalidInput`: zero tick interval, more than `MAX_RUNNABLES`
    ///   entries, or an entry with a zero period
    /// - any error from the tick source, unchanged
    pub fn init<S: TickSource<'a>>(
        &mut self,
        table: &[RunnableSpec<'a>],
        source: &mut S,
    ) -> Result<(), Error> {
        if self.tick_interval_ms == 0 || table.len() > MAX_RUNNABLES {
            return Err(Error::InvalidInput);
        }
        for spec in table {
            spec.validate()?;
            if !spec.is_tick_aligned(self.tick_interval_ms) {
                warn!(
                    "runnable '{}' ({} ms, delay {} ms) is not aligned to the {} ms tick",
                    spec.name, spec.period_ms, spec.initial_delay_ms, self.tick_interval_ms
                );
            }
        }

        source.arm_periodic(self.tick_interval_ms)?;
        source.register_callback(self.pending)?;

        for (index, spec) in table.iter().enumerate() {
            let slot = &mut self.slots[index];
            if slot.is_some() {
                continue;
            }
            *slot = Some(RunnableSlot::new(*spec));
            debug!(
                "slot {}: '{}' every {} ms after {} ms",
                index, spec.name, spec.period_ms, spec.initial_delay_ms
            );
        }

        self.count = self.count.max(table.len());
        self.initialized = true;
        info!(
            "scheduler initialized: {} runnables, {} ms tick",
            self.count, self.tick_interval_ms
        );
        Ok(())
    }

    /// Start the tick source and run the dispatch loop. **Does not return**
    /// unless startup fails.
    ///
    /// The loop busy-polls the pending-tick counter; each consumed tick is
    /// one dispatch pass.
    ///
    /// # Errors
    /// - `NullReference`: `init()` has not been called
    /// - any error from the tick source's `start()`, unchanged
    pub fn start<S: TickSource<'a>>(&mut self, source: &mut S) -> Result<Infallible, Error> {
        if !self.initialized {
            return Err(Error::NullReference);
        }
        source.start()?;
        info!("scheduler started");

        loop {
            if !self.poll() {
                core::hint::spin_loop();
            }
        }
    }

    /// Consume at most one pending tick and run its dispatch pass.
    ///
    /// Returns `false` when there was nothing to do.
    pub fn poll(&mut self) -> bool {
        if !self.pending.take_one() {
            return false;
        }
        self.dispatch();
        true
    }

    /// Drain the tick backlog, one pass per tick, including ticks that
    /// arrive while draining. Returns the number of passes run.
    pub fn run_pending(&mut self) -> u32 {
        let mut passes = 0;
        while self.poll() {
            passes += 1;
        }
        passes
    }

    /// Run one dispatch pass over the whole table.
    pub fn dispatch(&mut self) {
        let tick = self.tick_interval_ms;
        for slot in self.slots[..self.count].iter_mut().flatten() {
            if slot.state.is_due() {
                if let Some(callback) = slot.spec.callback {
                    trace!("run '{}'", slot.spec.name);
                    callback.run();
                    slot.state.rearm(slot.spec.period_ms);
                }
            }
            slot.state.advance(tick);
        }
        self.passes = self.passes.wrapping_add(1);
    }

    // -----------------------------------------------------------------------
    // Diagnostics
    // -----------------------------------------------------------------------

    /// Number of configured runnables.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Dispatch passes completed since startup.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Scheduler time: completed passes × tick interval.
    pub fn elapsed_ms(&self) -> u64 {
        self.passes * self.tick_interval_ms as u64
    }

    /// Ticks waiting to be dispatched.
    pub fn pending_ticks(&self) -> u32 {
        self.pending.pending()
    }

    /// Snapshot of the runnable in slot `index`.
    ///
    /// # Errors
    /// `InvalidInput` if `index` is past the configured table.
    pub fn runnable(&self, index: usize) -> Result<RunnableInfo<'a>, Error> {
        let slot = self
            .slots
            .get(index)
            .and_then(Option::as_ref)
            .ok_or(Error::InvalidInput)?;

        Ok(RunnableInfo {
            name: slot.spec.name,
            period_ms: slot.spec.period_ms,
            initial_delay_ms: slot.spec.initial_delay_ms,
            remaining_ms: slot.state.remaining_ms,
            activations: slot.state.activations,
            has_callback: slot.spec.callback.is_some(),
        })
    }
}

// ---------------------------------------------------------------------------
// Unit tests (host-only)
// ---------------------------------------------------------------------------
