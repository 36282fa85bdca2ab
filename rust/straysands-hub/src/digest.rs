// Shared plumbing for identifiers that are a BLAKE3 digest underneath
macro_rules! digest_type {
    ( $struct:ident ) => {
        impl From<straysands_common::Digest> for $struct {
            fn from(value: straysands_common::Digest) -> Self {
                Self(value)
            }
        }

        impl From<$struct> for straysands_common::Digest {
            fn from(value: $struct) -> Self {
                value.0
            }
        }

        impl From<[u8; straysands_common::DIGEST_SIZE]> for $struct {
            fn from(value: [u8; straysands_common::DIGEST_SIZE]) -> Self {
                Self(value.into())
            }
        }

        impl std::ops::Deref for $struct {
            type Target = straysands_common::Digest;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl std::fmt::Display for $struct {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl std::str::FromStr for $struct {
            type Err = straysands_common::StraySandsCommonError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }
    };
}

pub(crate) use digest_type;
