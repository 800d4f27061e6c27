use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw identifier.
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// The raw identifier.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns `true` if the identifier is the empty string.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Short identifier (first 8 characters) for log lines and reports.
            pub fn short_id(&self) -> String {
                if self.0.chars().count() <= 8 {
                    return self.0.clone();
                }
                let head: String = self.0.chars().take(8).collect();
                format!("{head}...")
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self(raw.to_string())
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self(raw)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Document id of a hostel in the hostels collection.
    HostelId
);

string_id!(
    /// Identifier of a room, unique within the store (unlike the room number).
    RoomId
);

string_id!(
    /// Student registration number. A student occupies at most one room in a
    /// consistent state.
    StudentId
);

string_id!(
    /// Document id of a room allocation record.
    AllocationId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_id_truncates_long_ids() {
        let id = HostelId::new("abcdef0123456789");
        assert_eq!(id.short_id(), "abcdef01...");
    }

    #[test]
    fn short_id_keeps_short_ids() {
        let id = HostelId::new("h1");
        assert_eq!(id.short_id(), "h1");
    }

    #[test]
    fn serde_is_transparent() {
        let id = StudentId::new("REG/2021/001");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"REG/2021/001\"");
        let parsed: StudentId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn debug_names_the_kind() {
        let id = RoomId::new("r-101");
        assert_eq!(format!("{id:?}"), "RoomId(r-101)");
        assert_eq!(id.to_string(), "r-101");
    }

    #[test]
    fn default_is_empty() {
        assert!(AllocationId::default().is_empty());
        assert!(!AllocationId::from("a1").is_empty());
    }
}
