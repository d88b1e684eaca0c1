//! Newtype wrappers around [`uuid::Uuid`] for every domain identifier.
//!
//! Distinct types keep a `ReceptionId` from being passed where a `PointId`
//! is expected. With the `sqlx` feature each type is a transparent
//! PostgreSQL `UUID`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Defines a newtype identifier around `Uuid`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[cfg_attr(feature = "sqlx", derive(sqlx::Type), sqlx(transparent))]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generate a fresh random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Return the inner UUID value.
            pub fn into_uuid(self) -> Uuid {
                self.0
            }

            /// Parse a path or body value, reporting a validation error that
            /// names the identifier.
            pub fn parse(value: &str) -> Result<Self, AppError> {
                value
                    .parse()
                    .map_err(|_| AppError::validation(concat!("Invalid ", $label, " format")))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

define_id!(
    /// Identifier of a pick-up point.
    PointId, "PVZ ID"
);

define_id!(
    /// Identifier of a goods reception.
    ReceptionId, "reception ID"
);

define_id!(
    /// Identifier of a received product.
    ProductId, "product ID"
);

define_id!(
    /// Identifier of a user (registered or throwaway dummy identity).
    UserId, "user ID"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_distinct() {
        assert_ne!(PointId::new(), PointId::new());
    }

    #[test]
    fn test_parse_valid() {
        let uuid = Uuid::new_v4();
        let id = PointId::parse(&uuid.to_string()).expect("should parse");
        assert_eq!(id.into_uuid(), uuid);
        assert_eq!(id.to_string(), uuid.to_string());
    }

    #[test]
    fn test_parse_invalid_is_validation_error() {
        let err = PointId::parse("not-a-uuid").expect_err("must fail");
        assert_eq!(err.kind, crate::error::ErrorKind::Validation);
        assert_eq!(err.message, "Invalid PVZ ID format");
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = ReceptionId::new();
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, format!("\"{}\"", id.0));
    }
}
