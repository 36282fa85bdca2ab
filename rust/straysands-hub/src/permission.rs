use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use straysands_common::{Address, Digest};
use straysands_identity::{IdentityLedger, RelayId};

use crate::{PermissionChanged, StraySandsHubError, digest::digest_type};

/// Opaque identifier of a grantable action.
///
/// The ledger never interprets a key: two keys are the same permission only if
/// their bytes are equal. [`PermissionKey::named`] derives a key from a human
/// readable capability name.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PermissionKey(Digest);

digest_type!(PermissionKey);

impl PermissionKey {
    /// The key for a capability called `name`.
    pub fn named(name: &str) -> Self {
        Self(Digest::hash(name.as_bytes()))
    }
}

/// The composite key of a permission grant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Grant {
    /// The relay the grant is scoped to.
    pub relay: RelayId,
    /// The permission.
    pub key: PermissionKey,
    /// The account holding the permission.
    pub subject: Address,
}

/// Per-relay capability ledger.
///
/// Conceptually a map `(relay, key, subject) → bool` defaulting to `false`;
/// only `true` entries are stored. The current owner of a relay, resolved
/// through the identity ledger on every call, is the only account that may
/// change grants on it. Writing the value a grant already has is a silent
/// no-op, so the resulting [`PermissionChanged`] stream mirrors actual state
/// transitions.
#[derive(Clone, Debug, Default)]
pub struct PermissionLedger {
    granted: HashSet<Grant>,
}

impl PermissionLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether `subject` holds `key` on `relay`.
    ///
    /// Fails with [`StraySandsHubError::RelayNotFound`] for unknown relays and
    /// then with [`StraySandsHubError::NotRelayOwner`] if `caller` is not the
    /// current owner. Returns the change to report, or `None` when the grant
    /// already had the requested value.
    pub fn set_permission<L>(
        &mut self,
        identity: &L,
        caller: Address,
        relay: RelayId,
        key: PermissionKey,
        subject: Address,
        granted: bool,
    ) -> Result<Option<PermissionChanged>, StraySandsHubError>
    where
        L: IdentityLedger + ?Sized,
    {
        let owner = identity.owner_of(relay)?;
        if owner != caller {
            tracing::warn!(relay = %relay, caller = %caller, "Rejected permission change from non-owner");
            return Err(StraySandsHubError::NotRelayOwner { caller, relay });
        }

        let grant = Grant {
            relay,
            key,
            subject,
        };
        if self.granted.contains(&grant) == granted {
            tracing::trace!(relay = %relay, key = %key, subject = %subject, granted, "Permission unchanged");
            return Ok(None);
        }

        if granted {
            self.granted.insert(grant);
        } else {
            self.granted.remove(&grant);
        }
        tracing::info!(relay = %relay, key = %key, subject = %subject, granted, "Permission changed");
        Ok(Some(PermissionChanged {
            relay,
            key,
            subject,
            granted,
        }))
    }

    /// Whether `subject` holds `key` on `relay`. Never fails: unknown relays
    /// and unset grants read as `false`.
    pub fn has_permission(&self, relay: RelayId, key: PermissionKey, subject: Address) -> bool {
        self.granted.contains(&Grant {
            relay,
            key,
            subject,
        })
    }

    /// Number of grants currently held across all relays.
    pub fn len(&self) -> usize {
        self.granted.len()
    }

    /// Whether no grant is currently held.
    pub fn is_empty(&self) -> bool {
        self.granted.is_empty()
    }
}
