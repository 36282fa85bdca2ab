use straysands_common::Address;
use thiserror::Error;

use crate::RelayId;

/// Errors reported by an identity ledger.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StraySandsIdentityError {
    /// The relay id was never assigned
    #[error("Relay {0} does not exist")]
    NonexistentRelay(RelayId),

    /// The relay id is already assigned to an owner
    #[error("Relay {0} has already been minted")]
    AlreadyMinted(RelayId),

    /// Ownership cannot be assigned to the zero address
    #[error("Invalid receiver: {0}")]
    InvalidReceiver(Address),

    /// The caller does not own the relay it tried to transfer
    #[error("Caller {caller} does not own relay {relay}")]
    NotOwner {
        /// The account that attempted the operation
        caller: Address,
        /// The relay it attempted to act on
        relay: RelayId,
    },
}
