use straysands_common::Address;
use straysands_identity::{RelayId, StraySandsIdentityError};
use thiserror::Error;

use crate::TagHash;

/// Coarse classification of a [`StraySandsHubError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The operation referenced a relay that was never assigned
    NotFound,
    /// The caller lacks the authority the operation requires
    Unauthorized,
    /// A required argument was empty, zero or out of range
    InvalidInput,
    /// The entry already exists
    Duplicate,
    /// The identity ledger or an encoder failed in an unexpected way
    Internal,
}

/// The common error type used by this crate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StraySandsHubError {
    /// The relay id was never assigned
    #[error("Relay {0} does not exist")]
    RelayNotFound(RelayId),

    /// The caller is not the hub administrator
    #[error("Unauthorized account: {caller}")]
    UnauthorizedAccount {
        /// The account that attempted the operation
        caller: Address,
    },

    /// The caller is not the current owner of the relay
    #[error("Caller {caller} is not the owner of relay {relay}")]
    NotRelayOwner {
        /// The account that attempted the operation
        caller: Address,
        /// The relay it attempted to act on
        relay: RelayId,
    },

    /// A tag name was empty
    #[error("Invalid tag")]
    EmptyTagName,

    /// A tag with the same hash is already registered
    #[error("Tag already registered: {0}")]
    DuplicateTag(TagHash),

    /// A relay was registered without a URL
    #[error("Invalid relay URL")]
    EmptyUrl,

    /// A relay was registered with the zero signing address
    #[error("Invalid relay signing address")]
    ZeroSigningAddress,

    /// A metadata field index did not name a field
    #[error("Invalid metadata field index: {0}")]
    InvalidMetadataField(usize),

    /// The identity ledger rejected the operation
    #[error("Identity ledger failure: {0}")]
    Identity(StraySandsIdentityError),

    /// Settings could not be loaded
    #[error("Invalid settings: {0}")]
    Settings(String),

    /// The journal could not be encoded or decoded
    #[error("Journal encoding failed: {0}")]
    Encoding(String),
}

impl StraySandsHubError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::RelayNotFound(_) => ErrorKind::NotFound,
            Self::UnauthorizedAccount { .. } | Self::NotRelayOwner { .. } => {
                ErrorKind::Unauthorized
            }
            Self::EmptyTagName
            | Self::EmptyUrl
            | Self::ZeroSigningAddress
            | Self::InvalidMetadataField(_)
            | Self::Identity(StraySandsIdentityError::InvalidReceiver(_)) => {
                ErrorKind::InvalidInput
            }
            Self::DuplicateTag(_) => ErrorKind::Duplicate,
            Self::Identity(_) | Self::Settings(_) | Self::Encoding(_) => ErrorKind::Internal,
        }
    }
}

impl From<StraySandsIdentityError> for StraySandsHubError {
    fn from(value: StraySandsIdentityError) -> Self {
        match value {
            StraySandsIdentityError::NonexistentRelay(relay) => Self::RelayNotFound(relay),
            StraySandsIdentityError::NotOwner { caller, relay } => {
                Self::NotRelayOwner { caller, relay }
            }
            other => Self::Identity(other),
        }
    }
}

impl From<serde_json::Error> for StraySandsHubError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encoding(format!("{value}"))
    }
}
