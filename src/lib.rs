//! # runnable-sched — Cooperative Runnable Scheduler
//!
//! A bare-metal, tick-driven cooperative scheduler for single-core
//! ARM Cortex-M4 microcontrollers.
//!
//! ## Overview
//!
//! The application declares a fixed table of *runnables*: periodic callbacks,
//! each with its own period and start delay. A hardware timer (SysTick) raises
//! an interrupt every [`config::TICK_INTERVAL_MS`]; the interrupt only bumps a
//! pending-tick counter. The main loop drains that counter one tick at a time
//! and, for each tick, walks the table in declaration order and runs every
//! runnable whose countdown reached zero.
//!
//! - **No preemption**: callbacks run to completion on the main loop
//! - **Table order is priority**: due runnables fire in ascending index order
//! - **Catch-up, never drop**: a backlog of ticks is replayed back-to-back
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              Application Runnables (main.rs)            │
//! ├────────────────────────────────────────────────────────┤
//! │                 Kernel glue (kernel.rs)                 │
//! │                  run() · halt on error                  │
//! ├──────────────────────────┬─────────────────────────────┤
//! │  Scheduler               │   Runnable Model            │
//! │  scheduler.rs            │   runnable.rs               │
//! │  ─ init()                │   ─ RunnableSpec            │
//! │  ─ start()               │   ─ RunnableState           │
//! │  ─ dispatch()            │   ─ Runnable trait          │
//! ├──────────────────────────┴─────────────────────────────┤
//! │        Tick plumbing (tick.rs) · Errors (error.rs)      │
//! │     PendingTicks · TickSource · TickHandler · reload    │
//! ├────────────────────────────────────────────────────────┤
//! │     Arch Port (arch/cortex_m4.rs) · sync.rs             │
//! │        SysTickSource · SysTick exception handler        │
//! ├────────────────────────────────────────────────────────┤
//! │         ARM Cortex-M4 Hardware (Thumb-2)                │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Interrupt / Main-Loop Handoff
//!
//! ```text
//! SysTick ISR ──► PendingTicks::notify()   (atomic +1, O(1))
//!                        │
//! main loop  ◄── PendingTicks::take_one()  (atomic -1 if > 0)
//!     └─► Scheduler::dispatch()  ──► runnable callbacks, table order
//! ```
//!
//! `PendingTicks` is the only datum shared between the two contexts. The
//! runnable table is touched by the main loop alone.
//!
//! ## Memory Model
//!
//! - **No heap**: all state is statically sized
//! - **No `alloc`**: pure `core`
//! - **Fixed-size table**: `[Option<RunnableSlot>; MAX_RUNNABLES]`

#![no_std]

pub mod config;
pub mod error;
pub mod runnable;
pub mod tick;
pub mod scheduler;

#[cfg(all(target_arch = "arm", target_os = "none"))]
pub mod arch;
#[cfg(all(target_arch = "arm", target_os = "none"))]
pub mod kernel;
#[cfg(all(target_arch = "arm", target_os = "none"))]
pub mod sync;

#[cfg(test)]
mod testing;

pub use error::Error;
pub use runnable::{Runnable, RunnableSpec, RunnableState};
pub use scheduler::{RunnableInfo, Scheduler};
pub use tick::{ClockSource, PendingTicks, TickHandler, TickSource};
