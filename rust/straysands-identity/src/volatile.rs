//! Volatile in-memory identity ledger.
//!
//! Ownership lives in a map keyed by relay id and is lost when the ledger is
//! dropped. The primary use case is testing: it lets a test move a relay to a
//! new owner between two hub calls and observe that authority follows.

use std::collections::BTreeMap;

use straysands_common::Address;

use crate::{IdentityLedger, RelayId, StraySandsIdentityError, Transfer};

/// Volatile in-memory identity ledger.
#[derive(Debug, Default, Clone)]
pub struct VolatileIdentityLedger {
    owners: BTreeMap<RelayId, Address>,
    transfers: Vec<Transfer>,
}

impl VolatileIdentityLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move `relay` from its current owner to `to`.
    ///
    /// Only the current owner may transfer. Existence is checked first, then
    /// the caller, then the receiver.
    pub fn transfer(
        &mut self,
        caller: Address,
        relay: RelayId,
        to: Address,
    ) -> Result<Transfer, StraySandsIdentityError> {
        let owner = self.owner_of(relay)?;
        if owner != caller {
            tracing::warn!(relay = %relay, caller = %caller, "Rejected transfer from non-owner");
            return Err(StraySandsIdentityError::NotOwner { caller, relay });
        }
        if to.is_zero() {
            return Err(StraySandsIdentityError::InvalidReceiver(to));
        }

        self.owners.insert(relay, to);
        let transfer = Transfer {
            from: Some(owner),
            to,
            relay,
        };
        tracing::debug!(relay = %relay, from = %owner, to = %to, "Transferred relay");
        self.transfers.push(transfer.clone());
        Ok(transfer)
    }

    /// Every transfer this ledger recorded, mints included, oldest first.
    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    /// Number of relays currently owned by `owner`.
    pub fn balance_of(&self, owner: &Address) -> usize {
        self.owners.values().filter(|held| *held == owner).count()
    }
}

impl IdentityLedger for VolatileIdentityLedger {
    fn owner_of(&self, relay: RelayId) -> Result<Address, StraySandsIdentityError> {
        self.owners
            .get(&relay)
            .copied()
            .ok_or(StraySandsIdentityError::NonexistentRelay(relay))
    }

    fn mint(&mut self, relay: RelayId, to: Address) -> Result<Transfer, StraySandsIdentityError> {
        if to.is_zero() {
            return Err(StraySandsIdentityError::InvalidReceiver(to));
        }
        if !relay.is_assignable() || self.owners.contains_key(&relay) {
            return Err(StraySandsIdentityError::AlreadyMinted(relay));
        }

        self.owners.insert(relay, to);
        let transfer = Transfer {
            from: None,
            to,
            relay,
        };
        tracing::debug!(relay = %relay, to = %to, "Minted relay");
        self.transfers.push(transfer.clone());
        Ok(transfer)
    }
}
