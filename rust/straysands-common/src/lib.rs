#![warn(missing_docs)]

//! Light weight identifiers shared by every crate in the relay hub: BLAKE3
//! digests that name tags and permissions, and fixed-size account addresses.
//! Both display as base58 and parse back from their display form.

mod error;
pub use error::*;

mod hash;
pub use hash::*;

mod address;
pub use address::*;
