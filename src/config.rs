//! # Scheduler Configuration
//!
//! Compile-time constants governing the scheduler and the tick source.
//! All limits are fixed at compile time — no dynamic allocation.

/// Tick interval in milliseconds. The SysTick timer is programmed to fire
/// once per interval and every runnable countdown moves in steps of this
/// size, so periods and start delays should be multiples of it.
pub const TICK_INTERVAL_MS: u32 = 2;

/// Maximum number of runnables in the table. This bounds the static slot
/// array inside the scheduler.
pub const MAX_RUNNABLES: usize = 8;

/// System clock frequency in Hz (STM32F401 running from the 16 MHz HSI).
pub const SYSTEM_CLOCK_HZ: u32 = 16_000_000;

/// Smallest reload value accepted by the SysTick timer.
pub const SYST_RELOAD_MIN: u32 = 1;

/// Largest reload value accepted by the SysTick timer (24-bit counter).
pub const SYST_RELOAD_MAX: u32 = 0x00FF_FFFF;
