//! Strongly typed identifier wrappers.
//!
//! Both simulators name their entities with strings, but the two namespaces
//! must never be mixed up: an `AgentKey` is whatever Sim-A calls a traffic
//! participant, an `EntityId` is the name of a vehicle inside Sim-B.  The
//! wrappers are cheap to clone and hash so they can be used as map keys
//! without ceremony.

use std::fmt;

/// Generate a typed string identifier.
macro_rules! string_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[derive(serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        $vis struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[inline]
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
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<u64> for $name {
            fn from(n: u64) -> Self {
                Self(n.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id! {
    /// Sim-A's identifier for a non-ego traffic participant.  Opaque: the
    /// bridge only compares and hashes it.
    pub struct AgentKey;
}

string_id! {
    /// Name of a controllable entity inside Sim-B.
    pub struct EntityId;
}

impl AgentKey {
    /// The Sim-B entity a mirrored agent is materialized as.  Mirrors reuse
    /// the Sim-A key verbatim so both GUIs show the same label.
    pub fn mirror_entity(&self) -> EntityId {
        EntityId(self.0.clone())
    }
}

impl EntityId {
    /// Default name of the ego vehicle in Sim-B.
    pub const EGO_DEFAULT: &'static str = "p0";
}
