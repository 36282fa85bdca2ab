use straysands_common::Address;
use straysands_identity::{IdentityLedger, RelayId};

use crate::{
    HubSettings, Journal, MetadataField, PermissionKey, PermissionLedger, RelayRegistry,
    StraySandsHubError, TagDictionary, TagHash,
};

/// The relay hub as one serialized state machine.
///
/// Every mutator takes `&mut self`, so operations apply one at a time and in
/// a total order. Each mutator validates everything it needs before touching
/// state, which means a failed call has no observable effect, journal
/// included. Events are appended to the [`Journal`] only when state actually
/// changed.
#[derive(Debug)]
pub struct Hub<L> {
    settings: HubSettings,
    identity: L,
    tags: TagDictionary,
    relays: RelayRegistry,
    permissions: PermissionLedger,
    journal: Journal,
}

impl<L: IdentityLedger> Hub<L> {
    /// Creates an empty hub backed by `identity`.
    pub fn new(settings: HubSettings, identity: L) -> Self {
        tracing::debug!(administrator = %settings.administrator, "Starting relay hub");
        Self {
            tags: TagDictionary::new(settings.administrator),
            journal: Journal::with_capacity(settings.journal_capacity),
            relays: RelayRegistry::new(),
            permissions: PermissionLedger::new(),
            identity,
            settings,
        }
    }

    /// Register a tag. Only the administrator may do this.
    pub fn register_tag(
        &mut self,
        caller: Address,
        name: &str,
    ) -> Result<TagHash, StraySandsHubError> {
        let event = self.tags.register(caller, name)?;
        let hash = event.hash;
        self.journal.record(event);
        Ok(hash)
    }

    /// Register a relay owned by `caller` and return its id.
    ///
    /// Not idempotent: every successful call creates a new relay.
    pub fn register_relay(
        &mut self,
        caller: Address,
        name: &str,
        url: &str,
        signing_address: Address,
    ) -> Result<RelayId, StraySandsHubError> {
        let transfer = self
            .relays
            .register(&mut self.identity, caller, name, url, signing_address)?;
        let relay = transfer.relay;
        self.journal.record(transfer);
        Ok(relay)
    }

    /// Overwrite a metadata field of a relay the caller owns.
    pub fn set_relay_metadata_field(
        &mut self,
        caller: Address,
        relay: RelayId,
        field: MetadataField,
        value: &str,
    ) -> Result<(), StraySandsHubError> {
        self.relays
            .set_metadata_field(&self.identity, caller, relay, field, value)
    }

    /// Replace the URL of a relay the caller owns.
    pub fn set_relay_url(
        &mut self,
        caller: Address,
        relay: RelayId,
        url: &str,
    ) -> Result<(), StraySandsHubError> {
        self.relays.set_url(&self.identity, caller, relay, url)
    }

    /// Replace the signing address of a relay the caller owns.
    pub fn set_relay_signing_address(
        &mut self,
        caller: Address,
        relay: RelayId,
        signing_address: Address,
    ) -> Result<(), StraySandsHubError> {
        self.relays
            .set_signing_address(&self.identity, caller, relay, signing_address)
    }

    /// Attach a tag to a relay the caller owns. Returns whether it was added.
    pub fn add_relay_tag(
        &mut self,
        caller: Address,
        relay: RelayId,
        tag: TagHash,
    ) -> Result<bool, StraySandsHubError> {
        self.relays.add_tag(&self.identity, caller, relay, tag)
    }

    /// Detach a tag from a relay the caller owns. Returns whether it was
    /// removed.
    pub fn remove_relay_tag(
        &mut self,
        caller: Address,
        relay: RelayId,
        tag: &TagHash,
    ) -> Result<bool, StraySandsHubError> {
        self.relays.remove_tag(&self.identity, caller, relay, tag)
    }

    /// Grant or revoke `key` for `subject` on a relay the caller owns.
    ///
    /// Returns whether the stored value changed; a change is also appended to
    /// the journal. Safe to retry.
    pub fn set_permission(
        &mut self,
        caller: Address,
        relay: RelayId,
        key: PermissionKey,
        subject: Address,
        granted: bool,
    ) -> Result<bool, StraySandsHubError> {
        let change = self
            .permissions
            .set_permission(&self.identity, caller, relay, key, subject, granted)?;
        Ok(match change {
            Some(change) => {
                self.journal.record(change);
                true
            }
            None => false,
        })
    }

    /// Whether `subject` holds `key` on `relay`.
    pub fn has_permission(&self, relay: RelayId, key: PermissionKey, subject: Address) -> bool {
        self.permissions.has_permission(relay, key, subject)
    }

    /// The current owner of `relay`, resolved through the identity ledger.
    pub fn owner_of(&self, relay: RelayId) -> Result<Address, StraySandsHubError> {
        Ok(self.identity.owner_of(relay)?)
    }

    /// Whether `relay` is registered.
    pub fn relay_exists(&self, relay: RelayId) -> bool {
        self.relays.contains(relay)
    }

    /// Number of relays ever registered.
    pub fn relay_count(&self) -> u64 {
        self.relays.last_id().0
    }

    /// URL of `relay`, empty if unknown.
    pub fn relay_url(&self, relay: RelayId) -> &str {
        self.relays.url(relay)
    }

    /// Signing address of `relay`, zero if unknown.
    pub fn relay_signing_address(&self, relay: RelayId) -> Address {
        self.relays.signing_address(relay)
    }

    /// Metadata field of `relay`, empty if unknown.
    pub fn relay_metadata_field(&self, relay: RelayId, field: MetadataField) -> &str {
        self.relays.metadata_field(relay, field)
    }

    /// Number of tags on `relay`, zero if unknown.
    pub fn relay_tags_count(&self, relay: RelayId) -> usize {
        self.relays.tags_count(relay)
    }

    /// Tag at `index` on `relay`, the null hash if absent.
    pub fn relay_tag_at(&self, relay: RelayId, index: usize) -> TagHash {
        self.relays.tag_at(relay, index)
    }

    /// The name registered under `hash`, if any.
    pub fn tag_name(&self, hash: &TagHash) -> Option<&str> {
        self.tags.name_of(hash)
    }
}

impl<L> Hub<L> {
    /// The settings the hub was created with.
    pub fn settings(&self) -> &HubSettings {
        &self.settings
    }

    /// Everything the hub has reported so far.
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// The identity ledger.
    pub fn identity(&self) -> &L {
        &self.identity
    }

    /// Mutable access to the identity ledger, for hosts that apply transfers
    /// through it. The hub picks up ownership changes on its next call.
    pub fn identity_mut(&mut self) -> &mut L {
        &mut self.identity
    }

    /// The tag dictionary.
    pub fn tags(&self) -> &TagDictionary {
        &self.tags
    }

    /// The relay registry.
    pub fn relays(&self) -> &RelayRegistry {
        &self.relays
    }

    /// The capability ledger.
    pub fn permissions(&self) -> &PermissionLedger {
        &self.permissions
    }
}
