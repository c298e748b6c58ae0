//! # Architecture Abstraction Layer
//!
//! Hardware tick sources for the scheduler. Currently implements the
//! Cortex-M4 SysTick port; other timers plug in by implementing
//! [`TickSource`](crate::tick::TickSource) in a sibling module.

pub mod cortex_m4;

pub use cortex_m4::SysTickSource;
