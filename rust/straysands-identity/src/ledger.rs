use straysands_common::Address;

use crate::{RelayId, StraySandsIdentityError, Transfer};

/// The subset of an identity ledger the hub consumes.
///
/// Implementations own relay identity. The hub only asks who currently owns a
/// relay and asks for new relays to be minted; it never caches the answer.
pub trait IdentityLedger {
    /// Resolve the current owner of `relay`.
    ///
    /// Fails with [`StraySandsIdentityError::NonexistentRelay`] when the id was
    /// never assigned.
    fn owner_of(&self, relay: RelayId) -> Result<Address, StraySandsIdentityError>;

    /// Assign `relay` to `to`.
    ///
    /// Fails with [`StraySandsIdentityError::AlreadyMinted`] if the ledger
    /// already knows the id and [`StraySandsIdentityError::InvalidReceiver`]
    /// for the zero address. Returns the mint transfer on success.
    fn mint(&mut self, relay: RelayId, to: Address) -> Result<Transfer, StraySandsIdentityError>;

    /// Whether `relay` has been assigned.
    fn exists(&self, relay: RelayId) -> bool {
        self.owner_of(relay).is_ok()
    }
}

impl<L: IdentityLedger + ?Sized> IdentityLedger for Box<L> {
    fn owner_of(&self, relay: RelayId) -> Result<Address, StraySandsIdentityError> {
        (**self).owner_of(relay)
    }

    fn mint(&mut self, relay: RelayId, to: Address) -> Result<Transfer, StraySandsIdentityError> {
        (**self).mint(relay, to)
    }

    fn exists(&self, relay: RelayId) -> bool {
        (**self).exists(relay)
    }
}
