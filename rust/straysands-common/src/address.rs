use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

use base58::ToBase58;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{StraySandsCommonError, hash::decode_base58};

/// The size of an account address in bytes.
pub const ADDRESS_SIZE: usize = 20;

/// An account identifier.
///
/// Addresses identify callers, relay owners, permission subjects and relay
/// signing keys. The all-zero address stands for "no account": it never owns
/// a relay and is rejected as a signing address at registration.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Address([u8; ADDRESS_SIZE]);

impl Address {
    /// The zero address.
    pub const ZERO: Address = Address([0u8; ADDRESS_SIZE]);

    /// Whether this is the zero address.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// The raw address bytes.
    pub fn bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.0
    }
}

impl From<[u8; ADDRESS_SIZE]> for Address {
    fn from(value: [u8; ADDRESS_SIZE]) -> Self {
        Address(value)
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = StraySandsCommonError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Ok(Address(value.try_into().map_err(|_| {
            StraySandsCommonError::InvalidLength {
                expected: ADDRESS_SIZE,
                actual: value.len(),
            }
        })?))
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.0.to_base58())
    }
}

impl Debug for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self, f)
    }
}

impl FromStr for Address {
    type Err = StraySandsCommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_base58(s, '@').map(Self)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let text = String::deserialize(deserializer)?;
            text.parse().map_err(serde::de::Error::custom)
        } else {
            <[u8; ADDRESS_SIZE]>::deserialize(deserializer).map(Self)
        }
    }
}
