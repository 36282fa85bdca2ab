use std::collections::BTreeMap;

use straysands_common::Address;
use straysands_identity::{IdentityLedger, RelayId, Transfer};

use crate::{MetadataField, Relay, StraySandsHubError, TagHash};

/// Registry of relays and their descriptive state.
///
/// Mutators are owner-gated: each one resolves the relay's owner through the
/// identity ledger on every call, so nothing here goes stale after a transfer.
/// Unknown relays make mutators fail with
/// [`StraySandsHubError::RelayNotFound`], while the read accessors return the
/// zero value of their type instead.
#[derive(Clone, Debug, Default)]
pub struct RelayRegistry {
    last_id: RelayId,
    relays: BTreeMap<RelayId, Relay>,
}

impl RelayRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a relay owned by `caller`.
    ///
    /// The relay gets the next sequential id and is minted to `caller` in the
    /// identity ledger. Every check runs before the mint, so a rejected call
    /// leaves both the registry and the ledger untouched.
    pub fn register<L>(
        &mut self,
        identity: &mut L,
        caller: Address,
        name: &str,
        url: &str,
        signing_address: Address,
    ) -> Result<Transfer, StraySandsHubError>
    where
        L: IdentityLedger + ?Sized,
    {
        if url.is_empty() {
            return Err(StraySandsHubError::EmptyUrl);
        }
        if signing_address.is_zero() {
            return Err(StraySandsHubError::ZeroSigningAddress);
        }

        let relay = self.last_id.next();
        let transfer = identity.mint(relay, caller)?;

        self.last_id = relay;
        self.relays
            .insert(relay, Relay::new(name, url, signing_address));
        tracing::info!(relay = %relay, owner = %caller, url, "Registered relay");
        Ok(transfer)
    }

    /// Overwrite one metadata field of `relay`. Any value is accepted.
    pub fn set_metadata_field<L>(
        &mut self,
        identity: &L,
        caller: Address,
        relay: RelayId,
        field: MetadataField,
        value: &str,
    ) -> Result<(), StraySandsHubError>
    where
        L: IdentityLedger + ?Sized,
    {
        self.owned(identity, caller, relay)?.set_metadata(field, value);
        tracing::debug!(relay = %relay, field = ?field, "Updated relay metadata");
        Ok(())
    }

    /// Replace the URL of `relay`. Unlike registration, an empty URL is
    /// accepted.
    pub fn set_url<L>(
        &mut self,
        identity: &L,
        caller: Address,
        relay: RelayId,
        url: &str,
    ) -> Result<(), StraySandsHubError>
    where
        L: IdentityLedger + ?Sized,
    {
        self.owned(identity, caller, relay)?.url = url.to_owned();
        tracing::debug!(relay = %relay, url, "Updated relay URL");
        Ok(())
    }

    /// Replace the signing address of `relay`. Unlike registration, the zero
    /// address is accepted.
    pub fn set_signing_address<L>(
        &mut self,
        identity: &L,
        caller: Address,
        relay: RelayId,
        signing_address: Address,
    ) -> Result<(), StraySandsHubError>
    where
        L: IdentityLedger + ?Sized,
    {
        self.owned(identity, caller, relay)?.signing_address = signing_address;
        tracing::debug!(relay = %relay, signing_address = %signing_address, "Updated relay signing address");
        Ok(())
    }

    /// Attach `tag` to `relay`. Returns `false` when it was already attached.
    pub fn add_tag<L>(
        &mut self,
        identity: &L,
        caller: Address,
        relay: RelayId,
        tag: TagHash,
    ) -> Result<bool, StraySandsHubError>
    where
        L: IdentityLedger + ?Sized,
    {
        let added = self.owned(identity, caller, relay)?.tags.insert(tag);
        if added {
            tracing::debug!(relay = %relay, tag = %tag, "Added relay tag");
        } else {
            tracing::trace!(relay = %relay, tag = %tag, "Relay tag already present");
        }
        Ok(added)
    }

    /// Detach `tag` from `relay`. Returns `false` when it was not attached.
    pub fn remove_tag<L>(
        &mut self,
        identity: &L,
        caller: Address,
        relay: RelayId,
        tag: &TagHash,
    ) -> Result<bool, StraySandsHubError>
    where
        L: IdentityLedger + ?Sized,
    {
        let removed = self.owned(identity, caller, relay)?.tags.remove(tag);
        if removed {
            tracing::debug!(relay = %relay, tag = %tag, "Removed relay tag");
        } else {
            tracing::trace!(relay = %relay, tag = %tag, "Relay tag already absent");
        }
        Ok(removed)
    }

    /// The relay record, if registered.
    pub fn get(&self, relay: RelayId) -> Option<&Relay> {
        self.relays.get(&relay)
    }

    /// Whether `relay` is registered.
    pub fn contains(&self, relay: RelayId) -> bool {
        self.relays.contains_key(&relay)
    }

    /// The last id handed out; also the number of relays ever registered.
    pub fn last_id(&self) -> RelayId {
        self.last_id
    }

    /// URL of `relay`, empty if unknown.
    pub fn url(&self, relay: RelayId) -> &str {
        self.get(relay).map(|r| r.url.as_str()).unwrap_or_default()
    }

    /// Signing address of `relay`, zero if unknown.
    pub fn signing_address(&self, relay: RelayId) -> Address {
        self.get(relay)
            .map(|r| r.signing_address)
            .unwrap_or_default()
    }

    /// A metadata field of `relay`, empty if unknown.
    pub fn metadata_field(&self, relay: RelayId, field: MetadataField) -> &str {
        self.get(relay)
            .map(|r| r.metadata(field))
            .unwrap_or_default()
    }

    /// Number of tags on `relay`, zero if unknown.
    pub fn tags_count(&self, relay: RelayId) -> usize {
        self.get(relay).map(|r| r.tags.len()).unwrap_or_default()
    }

    /// Tag at `index` on `relay`; the null hash if the relay is unknown or
    /// the index is out of range.
    pub fn tag_at(&self, relay: RelayId, index: usize) -> TagHash {
        self.get(relay)
            .and_then(|r| r.tags.get(index))
            .copied()
            .unwrap_or_default()
    }

    /// Resolve the owner of `relay` and hand out its record if `caller` is
    /// that owner. Existence is checked before authority.
    fn owned<L>(
        &mut self,
        identity: &L,
        caller: Address,
        relay: RelayId,
    ) -> Result<&mut Relay, StraySandsHubError>
    where
        L: IdentityLedger + ?Sized,
    {
        let owner = identity.owner_of(relay)?;
        let record = self
            .relays
            .get_mut(&relay)
            .ok_or(StraySandsHubError::RelayNotFound(relay))?;
        if owner != caller {
            tracing::warn!(relay = %relay, caller = %caller, "Rejected relay update from non-owner");
            return Err(StraySandsHubError::NotRelayOwner { caller, relay });
        }
        Ok(record)
    }
}
