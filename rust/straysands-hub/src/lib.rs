#![warn(missing_docs)]

//! The relay hub keeps a registry of relays, a global dictionary of tags and
//! a per-relay capability ledger.
//!
//! # Ownership
//!
//! Relays are owned through an external [`IdentityLedger`]. The hub never
//! stores an owner: every owner-gated operation resolves the owner at call
//! time, so authority always follows the latest transfer.
//!
//! # Components
//!
//! | Type | Role |
//! |------|------|
//! | [`TagDictionary`] | Administrator-gated `hash → name` mapping, append only |
//! | [`RelayRegistry`] | Sequential relay ids, descriptive fields, per-relay [`TagSet`] |
//! | [`PermissionLedger`] | `(relay, key, subject) → granted`, owner-gated, diff-and-notify |
//! | [`Journal`] | Append-only log of [`HubEvent`]s for indexers |
//! | [`Hub`] | Serialized state machine tying the above together |
//! | [`SharedHub`] | [`Hub`] behind a single writer lock for concurrent hosts |
//!
//! # Example
//!
//! ```rust
//! use straysands_common::Address;
//! use straysands_hub::{Hub, HubSettings, PermissionKey};
//! use straysands_identity::VolatileIdentityLedger;
//!
//! # fn main() -> Result<(), straysands_hub::StraySandsHubError> {
//! let admin = Address::from([1; 20]);
//! let operator = Address::from([2; 20]);
//! let guest = Address::from([3; 20]);
//!
//! let mut hub = Hub::new(HubSettings::new(admin), VolatileIdentityLedger::new());
//! let relay = hub.register_relay(operator, "Relay #1", "https://relay1.example.org", Address::from([90; 20]))?;
//!
//! let key = PermissionKey::named("Can do Foo");
//! assert!(hub.set_permission(operator, relay, key, guest, true)?);
//! assert!(!hub.set_permission(operator, relay, key, guest, true)?);
//! assert!(hub.has_permission(relay, key, guest));
//! # Ok(())
//! # }
//! ```

pub use straysands_identity::{IdentityLedger, RelayId, Transfer};

mod error;
pub use error::*;

mod digest;

mod settings;
pub use settings::*;

mod event;
pub use event::*;

mod tags;
pub use tags::*;

mod relay;
pub use relay::*;

mod registry;
pub use registry::*;

mod permission;
pub use permission::*;

mod hub;
pub use hub::*;

mod shared;
pub use shared::*;
