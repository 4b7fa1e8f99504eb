//! Entity identifiers
//!
//! Every table gets its own integer newtype, so a `CustomerId` can never be
//! handed to something expecting a `RestaurantId`. Identifiers are assigned
//! by the store on insert and are never reused.

use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Raw integer value as stored in SQLite
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.0))
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                i64::column_result(value).map(Self)
            }
        }
    };
}

entity_id!(
    /// Primary key of the `restaurants` table
    RestaurantId
);

entity_id!(
    /// Primary key of the `customers` table
    CustomerId
);

entity_id!(
    /// Primary key of the `reviews` table
    ReviewId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_bare_integer() {
        assert_eq!(RestaurantId(42).to_string(), "42");
        assert_eq!(CustomerId::from(7).get(), 7);
    }

    #[test]
    fn test_serde_is_transparent() {
        let json = serde_json::to_string(&ReviewId(3)).unwrap();
        assert_eq!(json, "3");
        let back: ReviewId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ReviewId(3));
    }

    #[test]
    fn test_sql_roundtrip() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let id: CustomerId = conn
            .query_row("SELECT ?1", [CustomerId(99)], |row| row.get(0))
            .unwrap();
        assert_eq!(id, CustomerId(99));
    }
}
