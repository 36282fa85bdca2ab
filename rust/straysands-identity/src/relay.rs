use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use straysands_common::Address;

/// Identifier of a relay.
///
/// Ids are assigned sequentially starting at 1 and are never reused. Id 0
/// never refers to a relay.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RelayId(pub u64);

impl RelayId {
    /// The id following this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Whether this id can ever refer to a relay.
    pub fn is_assignable(&self) -> bool {
        self.0 != 0
    }
}

impl From<u64> for RelayId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Display for RelayId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A change of ownership recorded by the identity ledger.
///
/// Minting is a transfer with no previous owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// The previous owner, `None` when the relay was just minted.
    pub from: Option<Address>,
    /// The new owner.
    pub to: Address,
    /// The relay whose ownership changed.
    pub relay: RelayId,
}

impl Transfer {
    /// Whether this transfer assigned the relay for the first time.
    pub fn is_mint(&self) -> bool {
        self.from.is_none()
    }
}
