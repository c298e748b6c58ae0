//! Host-side test doubles.

use crate::error::Error;
use crate::tick::{TickHandler, TickSource};

/// In-memory tick source. Records what the scheduler programs into it and
/// lets a test raise ticks by hand.
pub struct FakeTickSource<'a> {
    pub interval_ms: Option<u32>,
    pub handler: Option<&'a dyn TickHandler>,
    pub arm_calls: u32,
    pub started: bool,
    pub fail_arm: bool,
    pub fail_start: Option<Error>,
}

impl<'a> FakeTickSource<'a> {
    pub fn new() -> Self {
        Self {
            interval_ms: None,
            handler: None,
            arm_calls: 0,
            started: false,
            fail_arm: false,
            fail_start: None,
        }
    }

    /// Simulate `n` timer interrupts.
    pub fn fire(&self, n: u32) {
        let handler = self.handler.expect("no tick handler registered");
        for _ in 0..n {
            handler.on_tick();
        }
    }
}

impl<'a> TickSource<'a> for FakeTickSource<'a> {
    fn arm_periodic(&mut self, interval_ms: u32) -> Result<(), Error> {
        self.arm_calls += 1;
        if self.fail_arm {
            return Err(Error::ConfigurationFailure);
        }
        self.interval_ms = Some(interval_ms);
        Ok(())
    }

    fn register_callback(&mut self, handler: &'a dyn TickHandler) -> Result<(), Error> {
        self.handler = Some(handler);
        Ok(())
    }

    fn start(&mut self) -> Result<(), Error> {
        if let Some(err) = self.fail_start {
            return Err(err);
        }
        if self.handler.is_none() {
            return Err(Error::NullReference);
        }
        self.started = true;
        Ok(())
    }
}
