//! Identifier types shared across the crate.

use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Byte length of every identifier in the system.
pub const ID_LEN: usize = 20;

macro_rules! id_type {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name([u8; ID_LEN]);

        impl $name {
            pub const fn new(bytes: [u8; ID_LEN]) -> Self {
                Self(bytes)
            }

            pub fn as_bytes(&self) -> &[u8; ID_LEN] {
                &self.0
            }
        }

        impl From<[u8; ID_LEN]> for $name {
            fn from(bytes: [u8; ID_LEN]) -> Self {
                Self(bytes)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let hex_str = String::deserialize(deserializer)?;
                let stripped = hex_str.strip_prefix("0x").unwrap_or(&hex_str);
                let decoded = hex::decode(stripped).map_err(de::Error::custom)?;
                let bytes: [u8; ID_LEN] = decoded
                    .try_into()
                    .map_err(|_| de::Error::custom(concat!("expected ", stringify!($name), " of 20 bytes")))?;
                Ok(Self(bytes))
            }
        }
    };
}

id_type! {
    /// Opaque identifier of a tradable asset: a yield-bearing token, a
    /// synthetic asset, a USD stable, a pool share, or the protocol stable.
    ///
    /// Equality is byte-exact; ids are immutable once created.
    AssetId
}

id_type! {
    /// Opaque identifier of an external liquidity venue instance.
    ///
    /// Distinct venues of the same kind (e.g. one pool manager per accepted
    /// collateral) are independent and not interchangeable.
    VenueRef
}

id_type! {
    /// Identity of the account a conversion settles against.
    AccountId
}
