//! # Runnable Model
//!
//! A runnable is a named periodic unit of work. The application describes
//! each one with an immutable [`RunnableSpec`]; the scheduler pairs it with a
//! mutable [`RunnableState`] holding the countdown to its next activation.
//!
//! ## Countdown Lifecycle
//!
//! ```text
//!   init: remaining = initial_delay_ms
//!              │
//!              ▼
//!   ┌────────────────────┐  remaining == 0   ┌──────────────────────┐
//!   │ remaining -= tick  │ ────────────────► │ run(); remaining =   │
//!   │ (every pass)       │ ◄──────────────── │ period_ms            │
//!   └────────────────────┘                   └──────────────────────┘
//! ```

use crate::error::Error;

// ---------------------------------------------------------------------------
// Callback capability
// ---------------------------------------------------------------------------

/// A periodic unit of work, invoked from main-loop context.
///
/// Implementations run to completion and must not block: a callback that
/// never returns stalls every other runnable.
pub trait Runnable {
    /// Execute one activation.
    fn run(&self);
}

impl<F: Fn()> Runnable for F {
    #[inline]
    fn run(&self) {
        self()
    }
}

// ---------------------------------------------------------------------------
// Runnable specification (immutable)
// ---------------------------------------------------------------------------

/// Static description of a runnable, supplied by the integrator.
#[derive(Clone, Copy)]
pub struct RunnableSpec<'a> {
    /// Diagnostic name.
    pub name: &'a str,

    /// Activation period in milliseconds. Must be non-zero.
    pub period_ms: u32,

    /// Time before the first activation, in milliseconds.
    pub initial_delay_ms: u32,

    /// Work to perform. `None` keeps the slot counting down without ever
    /// running anything.
    pub callback: Option<&'a dyn Runnable>,
}

impl<'a> RunnableSpec<'a> {
    /// Describe a runnable with a callback.
    pub const fn new(
        name: &'a str,
        period_ms: u32,
        initial_delay_ms: u32,
        callback: &'a dyn Runnable,
    ) -> Self {
        Self {
            name,
            period_ms,
            initial_delay_ms,
            callback: Some(callback),
        }
    }

    /// Describe a placeholder runnable with no callback.
    pub const fn idle(name: &'a str, period_ms: u32, initial_delay_ms: u32) -> Self {
        Self {
            name,
            period_ms,
            initial_delay_ms,
            callback: None,
        }
    }

    /// Reject specs that would misbehave at runtime. A zero period would
    /// leave the countdown pinned at zero after the first activation.
    pub fn validate(&self) -> Result<(), Error> {
        if self.period_ms == 0 {
            return Err(Error::InvalidInput);
        }
        Ok(())
    }

    /// Whether both period and start delay land on tick boundaries.
    pub fn is_tick_aligned(&self, tick_interval_ms: u32) -> bool {
        self.period_ms % tick_interval_ms == 0 && self.initial_delay_ms % tick_interval_ms == 0
    }
}

impl core::fmt::Debug for RunnableSpec<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RunnableSpec")
            .field("name", &self.name)
            .field("period_ms", &self.period_ms)
            .field("initial_delay_ms", &self.initial_delay_ms)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Runnable state (mutable, main-loop only)
// ---------------------------------------------------------------------------

/// Per-runnable runtime state, owned by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnableState {
    /// Milliseconds until the next activation. Zero means due.
    pub remaining_ms: u32,

    /// Number of times the callback has been invoked.
    pub activations: u32,
}

impl RunnableState {
    /// Seed the countdown with the spec's start delay.
    pub const fn new(spec: &RunnableSpec<'_>) -> Self {
        Self {
            remaining_ms: spec.initial_delay_ms,
            activations: 0,
        }
    }

    /// Check whether the runnable is due this pass.
    #[inline]
    pub fn is_due(&self) -> bool {
        self.remaining_ms == 0
    }

    /// Record an activation and rearm the countdown with the full period.
    pub fn rearm(&mut self, period_ms: u32) {
        self.remaining_ms = period_ms;
        self.activations = self.activations.wrapping_add(1);
    }

    /// Advance the countdown by one tick. Saturates at zero so a period
    /// that is not a multiple of the tick fires one tick late instead of
    /// wrapping around.
    #[inline]
    pub fn advance(&mut self, tick_interval_ms: u32) {
        self.remaining_ms = self.remaining_ms.saturating_sub(tick_interval_ms);
    }
}

// ---------------------------------------------------------------------------
// Unit tests (host-only)
// ---------------------------------------------------------------------------
