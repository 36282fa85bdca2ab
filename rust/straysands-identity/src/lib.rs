#![warn(missing_docs)]

//! The identity ledger is the system of record for who owns each relay. The
//! hub never stores owners itself: every owner-gated operation asks an
//! [`IdentityLedger`] at call time, so a transfer is visible to the very next
//! call without any synchronization step.
//!
//! A [`VolatileIdentityLedger`] is available behind the `helpers` feature for
//! tests and for embedding the hub without an external ledger.

mod error;
pub use error::*;

mod relay;
pub use relay::*;

mod ledger;
pub use ledger::*;

#[cfg(any(test, feature = "helpers"))]
mod volatile;
#[cfg(any(test, feature = "helpers"))]
pub use volatile::*;
