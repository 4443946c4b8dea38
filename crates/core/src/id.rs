//! Strongly-typed identifiers used across the catalog.
//!
//! Identifiers are plain integers on the wire (`#[serde(transparent)]`) but
//! distinct types in code so a category id can never be passed where a
//! product id is expected.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Identifier of a product. Always non-negative.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

/// Identifier of a category. `0` is the "no category" sentinel.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(i32);

macro_rules! impl_int_newtype {
    ($t:ty, $inner:ty, $name:literal) => {
        impl $t {
            /// Wrap a raw value, rejecting negative identifiers.
            pub fn new(value: $inner) -> DomainResult<Self> {
                if value < 0 {
                    return Err(DomainError::invalid_id(format!(
                        "{}: must not be negative (got {})",
                        $name, value
                    )));
                }
                Ok(Self(value))
            }

            pub fn get(self) -> $inner {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<$t> for $inner {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl TryFrom<$inner> for $t {
            type Error = DomainError;

            fn try_from(value: $inner) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .trim()
                    .parse::<$inner>()
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Self::new(value)
            }
        }
    };
}

impl_int_newtype!(ProductId, i64, "ProductId");
impl_int_newtype!(CategoryId, i32, "CategoryId");

impl ProductId {
    /// Infallible constructor for values that cannot be negative.
    pub const fn from_u32(value: u32) -> Self {
        Self(value as i64)
    }

    /// The identifier following this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl CategoryId {
    /// Sentinel for a product that belongs to no category.
    pub const NONE: CategoryId = CategoryId(0);

    /// Infallible constructor for values that cannot be negative.
    pub const fn from_u16(value: u16) -> Self {
        Self(value as i32)
    }

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

impl Default for CategoryId {
    fn default() -> Self {
        Self::NONE
    }
}
