//! # Errors
//!
//! Status codes returned by configuration-time operations. Dispatch itself
//! never fails: a runnable without a callback is skipped, not reported.

use core::fmt;

/// Error returned by scheduler and tick-source operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Malformed configuration: table larger than `MAX_RUNNABLES`, a zero
    /// period or tick interval, or an out-of-range table index.
    InvalidInput,
    /// A required callback or handler was never supplied.
    NullReference,
    /// The tick source rejected the requested interval.
    ConfigurationFailure,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidInput => f.write_str("invalid input"),
            Error::NullReference => f.write_str("missing callback or handler"),
            Error::ConfigurationFailure => f.write_str("tick source configuration failed"),
        }
    }
}
