use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

use base58::{FromBase58, ToBase58};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::StraySandsCommonError;

/// The size of a BLAKE3 digest in bytes.
pub const DIGEST_SIZE: usize = 32;

/// A BLAKE3 digest.
///
/// Tags are keyed by the digest of their display name and permission keys are
/// usually the digest of a human readable capability name. The hub never
/// interprets a digest beyond comparing its bytes.
///
/// # Examples
///
/// ```rust
/// use straysands_common::Digest;
///
/// let digest = Digest::hash(b"Can do Foo");
/// assert_eq!(digest, Digest::hash(b"Can do Foo"));
/// assert_ne!(digest, Digest::hash(b"Can do Bar"));
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Digest([u8; DIGEST_SIZE]);

impl Digest {
    /// Computes the BLAKE3 digest of the given bytes.
    pub fn hash(bytes: &[u8]) -> Self {
        Self(blake3::hash(bytes).into())
    }

    /// Computes a single digest over a sequence of byte chunks.
    pub fn hash_iter<'a, I>(chunks: I) -> Self
    where
        I: Iterator<Item = &'a [u8]>,
    {
        let mut hasher = blake3::Hasher::new();
        for chunk in chunks {
            hasher.update(chunk);
        }
        Self(hasher.finalize().into())
    }

    /// The raw digest bytes.
    pub fn bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }

    /// Whether this is the all-zero digest.
    pub fn is_null(&self) -> bool {
        self == NULL_DIGEST
    }
}

impl From<[u8; DIGEST_SIZE]> for Digest {
    fn from(value: [u8; DIGEST_SIZE]) -> Self {
        Digest(value)
    }
}

impl From<Digest> for [u8; DIGEST_SIZE] {
    fn from(value: Digest) -> Self {
        value.0
    }
}

impl TryFrom<&[u8]> for Digest {
    type Error = StraySandsCommonError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Ok(Digest(value.try_into().map_err(|_| {
            StraySandsCommonError::InvalidLength {
                expected: DIGEST_SIZE,
                actual: value.len(),
            }
        })?))
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Display for Digest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0.to_base58())
    }
}

impl Debug for Digest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self, f)
    }
}

impl FromStr for Digest {
    type Err = StraySandsCommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_base58(s, '#').map(Self)
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let text = String::deserialize(deserializer)?;
            text.parse().map_err(serde::de::Error::custom)
        } else {
            <[u8; DIGEST_SIZE]>::deserialize(deserializer).map(Self)
        }
    }
}

/// The all-zero digest.
pub const NULL_DIGEST: &Digest = &Digest([0u8; DIGEST_SIZE]);

/// Decode `<sigil><base58>` into a fixed-size byte array.
pub(crate) fn decode_base58<const SIZE: usize>(
    input: &str,
    sigil: char,
) -> Result<[u8; SIZE], StraySandsCommonError> {
    let encoded = input
        .strip_prefix(sigil)
        .ok_or(StraySandsCommonError::MissingSigil { expected: sigil })?;
    let bytes = encoded
        .from_base58()
        .map_err(|error| StraySandsCommonError::InvalidEncoding(format!("{error:?}")))?;
    let actual = bytes.len();
    bytes
        .try_into()
        .map_err(|_| StraySandsCommonError::InvalidLength {
            expected: SIZE,
            actual,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use testresult::TestResult;

    #[test]
    fn it_hashes_deterministically() {
        assert_eq!(Digest::hash(b"Games"), Digest::hash(b"Games"));
        assert_ne!(Digest::hash(b"Games"), Digest::hash(b"games"));
    }

    #[test]
    fn it_hashes_chunks_like_contiguous_bytes() {
        let chunked = Digest::hash_iter([b"Audio".as_slice(), b" & Video".as_slice()].into_iter());
        assert_eq!(chunked, Digest::hash(b"Audio & Video"));
    }

    #[test]
    fn it_parses_its_display_form() -> TestResult {
        let digest = Digest::hash(b"Documents");
        let parsed: Digest = digest.to_string().parse()?;
        assert_eq!(parsed, digest);
        Ok(())
    }

    #[test]
    fn it_rejects_malformed_text() {
        assert_eq!(
            "abc".parse::<Digest>(),
            Err(StraySandsCommonError::MissingSigil { expected: '#' })
        );
        assert!(matches!(
            "#0OIl".parse::<Digest>(),
            Err(StraySandsCommonError::InvalidEncoding(_))
        ));
        assert!(matches!(
            "#2g".parse::<Digest>(),
            Err(StraySandsCommonError::InvalidLength { expected: 32, .. })
        ));
    }

    #[test]
    fn it_rejects_short_slices() {
        assert_eq!(
            Digest::try_from([1u8; 4].as_slice()),
            Err(StraySandsCommonError::InvalidLength {
                expected: DIGEST_SIZE,
                actual: 4
            })
        );
    }

    #[test]
    fn it_recognizes_the_null_digest() {
        assert!(Digest::default().is_null());
        assert!(!Digest::hash(b"").is_null());
    }
}
