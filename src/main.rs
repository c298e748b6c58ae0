//! # Demo Firmware
//!
//! Runs three runnables on the 2 ms SysTick tick:
//!
//! | Runnable | Period | Delay | Behavior |
//! |----------|--------|-------|----------|
//! | `heartbeat` | 10 ms | 0 ms | Flips a software LED state |
//! | `sampler` | 4 ms | 2 ms | Accumulates a simulated sensor reading |
//! | `status` | 500 ms | 0 ms | Logs heartbeat and sample counters |
//!
//! `heartbeat` and `status` are both due on the first pass; table order puts
//! `heartbeat` first.
//!
//! Log output goes through semihosting, so run under a debugger or QEMU.

#![no_std]
#![no_main]

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use cortex_m_rt::entry;
use cortex_m_semihosting::hprintln;
use log::{info, LevelFilter, Log, Metadata, Record};
use panic_halt as _;

use runnable_sched::kernel;
use runnable_sched::RunnableSpec;

// ---------------------------------------------------------------------------
// Logging backend
// ---------------------------------------------------------------------------

/// `log` backend printing to the host debugger console.
struct SemihostingLogger;

impl Log for SemihostingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            hprintln!("[{}] {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: SemihostingLogger = SemihostingLogger;

// ---------------------------------------------------------------------------
// Runnables
// ---------------------------------------------------------------------------

static LED_ON: AtomicBool = AtomicBool::new(false);
static HEARTBEATS: AtomicU32 = AtomicU32::new(0);
static SAMPLES: AtomicU32 = AtomicU32::new(0);
static SAMPLE_SUM: AtomicU32 = AtomicU32::new(0);

fn heartbeat() {
    LED_ON.fetch_xor(true, Ordering::Relaxed);
    HEARTBEATS.fetch_add(1, Ordering::Relaxed);
}

fn sampler() {
    // Stand-in for an ADC read: a slow sawtooth
    let n = SAMPLES.fetch_add(1, Ordering::Relaxed);
    SAMPLE_SUM.fetch_add(n % 64, Ordering::Relaxed);
}

fn status() {
    let samples = SAMPLES.load(Ordering::Relaxed);
    let average = SAMPLE_SUM.load(Ordering::Relaxed) / samples.max(1);
    info!(
        "heartbeats={} led={} samples={} avg={}",
        HEARTBEATS.load(Ordering::Relaxed),
        LED_ON.load(Ordering::Relaxed),
        samples,
        average
    );
}

// ---------------------------------------------------------------------------
// Main entry point
// ---------------------------------------------------------------------------

/// Firmware entry point. Installs the logger, declares the runnable table
/// and hands control to the scheduler. Does not return.
#[entry]
fn main() -> ! {
    let cp = cortex_m::Peripherals::take().unwrap();

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }

    let table = [
        RunnableSpec::new("heartbeat", 10, 0, &heartbeat),
        RunnableSpec::new("sampler", 4, 2, &sampler),
        RunnableSpec::new("status", 500, 0, &status),
    ];

    kernel::run(cp.SYST, &table)
}
