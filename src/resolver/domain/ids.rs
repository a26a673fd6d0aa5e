//! Fixed-width identifier types for modules, configurations, selectors,
//! capability tags and module addresses.
//!
//! All identifiers are opaque byte strings. Hex text is always accepted with a
//! `0x` prefix and short values are left-padded, so `0x01` parses as the
//! selector `0x00000001`.

use super::ParseIdentifierError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Decodes `0x`-prefixed hex into `N` bytes, left-padding short input.
fn parse_hex<const N: usize>(
    kind: &'static str,
    value: &str,
) -> Result<[u8; N], ParseIdentifierError> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .ok_or_else(|| ParseIdentifierError::MissingHexPrefix {
            kind,
            value: value.to_owned(),
        })?;

    if digits.is_empty() || digits.len() > N * 2 {
        return Err(ParseIdentifierError::InvalidLength {
            kind,
            expected: N,
            value: value.to_owned(),
        });
    }

    let padded = format!("{digits:0>width$}", width = N * 2);
    let mut bytes = [0_u8; N];
    hex::decode_to_slice(&padded, &mut bytes).map_err(|_| ParseIdentifierError::InvalidHex {
        kind,
        value: value.to_owned(),
    })?;
    Ok(bytes)
}

/// Right-pads an ASCII label into `N` bytes.
fn encode_label<const N: usize>(
    kind: &'static str,
    label: &str,
) -> Result<[u8; N], ParseIdentifierError> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(ParseIdentifierError::EmptyLabel { kind });
    }
    if trimmed.len() > N {
        return Err(ParseIdentifierError::LabelTooLong {
            kind,
            max: N,
            value: label.to_owned(),
        });
    }

    let mut bytes = [0_u8; N];
    for (slot, byte) in bytes.iter_mut().zip(trimmed.bytes()) {
        *slot = byte;
    }
    Ok(bytes)
}

/// Returns the label encoded in `bytes` when it is printable ASCII followed
/// only by zero padding.
fn decode_label(bytes: &[u8]) -> Option<&str> {
    let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
    let (label, padding) = bytes.split_at(end);
    let printable = label
        .iter()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.' | b':'));

    if label.is_empty() || !printable || padding.iter().any(|b| *b != 0) {
        return None;
    }

    let text = std::str::from_utf8(label).ok()?;
    (!text.starts_with("0x") && !text.starts_with("0X")).then_some(text)
}

macro_rules! fixed_bytes_identifier {
    ($(#[$meta:meta])* $name:ident, $len:literal, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name([u8; $len]);

        impl $name {
            /// Width of the identifier in bytes.
            pub const LEN: usize = $len;

            /// The all-zero value.
            pub const ZERO: Self = Self([0; $len]);

            /// Creates the identifier from raw bytes.
            #[must_use]
            pub const fn from_bytes(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// Returns the raw bytes.
            #[must_use]
            pub const fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Returns `true` when every byte is zero.
            #[must_use]
            pub fn is_zero(&self) -> bool {
                self.0.iter().all(|b| *b == 0)
            }

            /// Returns the `0x`-prefixed lowercase hex form.
            #[must_use]
            pub fn to_hex(&self) -> String {
                format!("0x{}", hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name))
                    .field(&format_args!("{self}"))
                    .finish()
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

macro_rules! hex_display {
    ($name:ident, $len:literal, $kind:literal) => {
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl FromStr for $name {
            type Err = ParseIdentifierError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                parse_hex::<$len>($kind, value).map(Self)
            }
        }
    };
}

macro_rules! labelled_display {
    ($name:ident, $len:literal, $kind:literal) => {
        impl $name {
            /// Creates the identifier from a short ASCII label, right-padded
            /// with zeros.
            ///
            /// # Errors
            ///
            /// Returns [`ParseIdentifierError::EmptyLabel`] for a blank label
            /// and [`ParseIdentifierError::LabelTooLong`] when the label does
            /// not fit.
            pub fn from_label(label: &str) -> Result<Self, ParseIdentifierError> {
                encode_label::<$len>($kind, label).map(Self)
            }

            /// Returns the label when the identifier was built from one.
            #[must_use]
            pub fn label(&self) -> Option<&str> {
                decode_label(&self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.label() {
                    Some(label) => f.write_str(label),
                    None => f.write_str(&self.to_hex()),
                }
            }
        }

        /// Parses `0x`-prefixed hex, or otherwise treats the input as a label.
        impl FromStr for $name {
            type Err = ParseIdentifierError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let trimmed = value.trim();
                if trimmed.starts_with("0x") || trimmed.starts_with("0X") {
                    parse_hex::<$len>($kind, trimmed).map(Self)
                } else {
                    Self::from_label(trimmed)
                }
            }
        }
    };
}

fixed_bytes_identifier!(
    /// Stable identifier of a module in the catalog.
    ///
    /// The zero value is a sentinel rejected by every mutating call.
    ModuleId,
    32,
    "module id"
);
labelled_display!(ModuleId, 32, "module id");

fixed_bytes_identifier!(
    /// Identifier of a configuration (a named, versioned module composition).
    ///
    /// The zero value is a sentinel rejected by every mutating call.
    ConfigurationId,
    32,
    "configuration id"
);
labelled_display!(ConfigurationId, 32, "configuration id");

fixed_bytes_identifier!(
    /// Address a proxy delegates to once a selector is resolved.
    ModuleAddress,
    20,
    "module address"
);
hex_display!(ModuleAddress, 20, "module address");

impl ModuleAddress {
    /// The "no route" answer returned by resolution misses.
    pub const UNSET: Self = Self::ZERO;

    /// Returns `true` for [`ModuleAddress::UNSET`].
    #[must_use]
    pub fn is_unset(&self) -> bool {
        self.is_zero()
    }
}

fixed_bytes_identifier!(
    /// Opaque identifier of one callable entry point.
    Selector,
    4,
    "selector"
);
hex_display!(Selector, 4, "selector");

impl Selector {
    /// The null selector. It is never accepted in a declaration.
    pub const NULL: Self = Self::ZERO;

    /// Creates a selector from its big-endian integer value.
    #[must_use]
    #[expect(
        clippy::big_endian_bytes,
        reason = "identifiers use network byte order"
    )]
    pub const fn from_u32(value: u32) -> Self {
        Self(value.to_be_bytes())
    }
}

fixed_bytes_identifier!(
    /// Identifier asserting support for a bundle of related selectors.
    CapabilityTag,
    4,
    "capability tag"
);
hex_display!(CapabilityTag, 4, "capability tag");

impl CapabilityTag {
    /// Creates a capability tag from its big-endian integer value.
    #[must_use]
    #[expect(
        clippy::big_endian_bytes,
        reason = "identifiers use network byte order"
    )]
    pub const fn from_u32(value: u32) -> Self {
        Self(value.to_be_bytes())
    }
}

/// Revision number of a configuration.
///
/// Sealed versions start at 1. On reads, [`Version::LATEST`] (zero) selects
/// the most recent sealed version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(u64);

impl Version {
    /// Read-side alias for "the latest sealed version".
    pub const LATEST: Self = Self(0);

    /// Wraps a raw version number.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw version number.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns `true` for [`Version::LATEST`].
    #[must_use]
    pub const fn is_latest(self) -> bool {
        self.0 == 0
    }

    pub(crate) const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl From<u64> for Version {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_latest() {
            f.write_str("latest")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
