//! Identifiers for portfolio entities
//!
//! Ids come from the dashboard's own storage (usually UUID strings), so they
//! are opaque strings here. Each entity kind has its own newtype so an asset
//! id cannot be passed where a debt id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

string_id!(
    /// Unique identifier for an asset (holding) in the portfolio
    AssetId
);

string_id!(
    /// Unique identifier for a debt
    DebtId
);

string_id!(
    /// Unique identifier for a recurring or one-off cash event
    EventId
);
