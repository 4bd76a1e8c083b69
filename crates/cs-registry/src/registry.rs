//! `IdentityRegistry`: which Sim-A agents already exist in Sim-B.
//!
//! # Policy
//!
//! The registry holds at most `capacity` entries.  Once it is full, *every*
//! identity is reported as known, registered or not: agents beyond capacity
//! are deliberately never mirrored so Sim-B's load stays bounded even when
//! Sim-A spawns more traffic than requested.
//!
//! Entries are never removed.  Agent identities are assumed stable for one
//! episode, and an agent that vanishes from Sim-A keeps its slot (and its
//! frozen Sim-B entity) until the session ends.

use cs_core::{AgentKey, EntityId};

use crate::{RegistryError, RegistryResult};

#[cfg(not(feature = "fx-hash"))]
type Map<K, V> = std::collections::HashMap<K, V>;
#[cfg(feature = "fx-hash")]
type Map<K, V> = rustc_hash::FxHashMap<K, V>;

/// Records that `agent` has been materialized in Sim-B as `mirror`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistryEntry {
    pub agent:  AgentKey,
    pub mirror: EntityId,
    /// Zero-based registration order.
    pub slot:   usize,
}

/// Capacity-bounded, append-only set of mirrored identities.
#[derive(Debug)]
pub struct IdentityRegistry {
    capacity: usize,
    /// Key → index into `entries`.
    index:    Map<AgentKey, usize>,
    entries:  Vec<RegistryEntry>,
}

impl IdentityRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            index:   Map::default(),
            entries: Vec::with_capacity(capacity),
        }
    }

    /// `true` if the registry is full or `agent` was registered before.
    ///
    /// A `false` answer is the only case in which the caller may call
    /// [`register`][Self::register].
    pub fn is_known(&self, agent: &AgentKey) -> bool {
        self.is_full() || self.index.contains_key(agent)
    }

    /// `true` only if `agent` holds a slot.  Unlike [`is_known`][Self::is_known]
    /// this ignores the capacity short-circuit.
    pub fn is_registered(&self, agent: &AgentKey) -> bool {
        self.index.contains_key(agent)
    }

    /// Allocate a slot for `agent` and return its entry.
    ///
    /// Fails without side effects when the registry is full or `agent` is
    /// already present.
    pub fn register(&mut self, agent: AgentKey) -> RegistryResult<RegistryEntry> {
        if self.index.contains_key(&agent) {
            return Err(RegistryError::AlreadyRegistered(agent));
        }
        if self.is_full() {
            return Err(RegistryError::CapacityExhausted { capacity: self.capacity });
        }

        let slot = self.entries.len();
        let entry = RegistryEntry { mirror: agent.mirror_entity(), agent, slot };
        self.index.insert(entry.agent.clone(), slot);
        self.entries.push(entry.clone());

        tracing::debug!(agent = %entry.agent, slot, capacity = self.capacity, "registered agent");
        if self.is_full() {
            tracing::info!(capacity = self.capacity, "mirror capacity reached; further agents are ignored");
        }
        Ok(entry)
    }

    pub fn get(&self, agent: &AgentKey) -> Option<&RegistryEntry> {
        self.index.get(agent).map(|&i| &self.entries[i])
    }

    /// All entries in registration order.
    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }
}
