//! Opaque identifier newtypes for lifecycle records.
//!
//! Identifiers are short uppercase correlation strings with a role prefix
//! (`INJ-`, `LOCK-`, `RSV-`, `AUTH-`, `PUB-`). Uniqueness is probabilistic
//! (time component plus random suffix); generation lives in `vusd-crypto`.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
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
    };
}

string_id! {
    /// Internal record id, unique per stored record.
    RecordId
}

string_id! {
    /// Correlation id for a USD injection (`INJ-` prefix).
    InjectionId
}

string_id! {
    /// Correlation id for a pending lock (`LOCK-` prefix).
    LockId
}

string_id! {
    /// Correlation id for a lock reserve (`RSV-` prefix).
    ReserveId
}

string_id! {
    /// Authorization code shared by a lock and its mint requests
    /// (`AUTH-` prefix). Primary lookup key for mint execution.
    AuthorizationCode
}

string_id! {
    /// Code identifying a mint-explorer publication (`PUB-` prefix).
    PublicationCode
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_str() {
        let id = LockId::new("LOCK-ABC-123");
        assert_eq!(id.as_str(), "LOCK-ABC-123");
        assert_eq!(id.to_string(), "LOCK-ABC-123");
    }

    #[test]
    fn serde_transparent() {
        let code = AuthorizationCode::new("AUTH-X");
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"AUTH-X\"");
        let back: AuthorizationCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, code);
    }
}
