//! Unit tests for cs-registry.

use cs_core::{AgentKey, EntityId};

use crate::{IdentityRegistry, RegistryError};

fn key(s: &str) -> AgentKey {
    AgentKey::from(s)
}

#[cfg(test)]
mod capacity {
    use super::*;

    #[test]
    fn zero_capacity_knows_everything() {
        let reg = IdentityRegistry::new(0);
        assert!(reg.is_full());
        assert!(reg.is_known(&key("A")));
        assert!(!reg.is_registered(&key("A")));
    }

    #[test]
    fn never_exceeds_capacity() {
        let mut reg = IdentityRegistry::new(3);
        let mut registered = 0;
        for i in 0..10u64 {
            let k = AgentKey::from(i);
            if !reg.is_known(&k) {
                reg.register(k).unwrap();
                registered += 1;
            }
            assert!(reg.len() <= 3);
        }
        assert_eq!(registered, 3);
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn overflow_identity_known_but_not_registered() {
        let mut reg = IdentityRegistry::new(1);
        reg.register(key("A")).unwrap();
        assert!(reg.is_known(&key("B")));
        assert!(!reg.is_registered(&key("B")));
        assert!(reg.get(&key("B")).is_none());
    }

    #[test]
    fn register_when_full_errors_without_side_effects() {
        let mut reg = IdentityRegistry::new(1);
        reg.register(key("A")).unwrap();
        assert_eq!(
            reg.register(key("B")),
            Err(RegistryError::CapacityExhausted { capacity: 1 })
        );
        assert_eq!(reg.len(), 1);
    }
}

#[cfg(test)]
mod identity {
    use super::*;

    #[test]
    fn registered_stays_known() {
        let mut reg = IdentityRegistry::new(5);
        assert!(!reg.is_known(&key("A")));
        let entry = reg.register(key("A")).unwrap();
        assert_eq!(entry.mirror, EntityId::from("A"));
        assert_eq!(entry.slot, 0);
        for _ in 0..100 {
            assert!(reg.is_known(&key("A")));
        }
    }

    #[test]
    fn duplicate_register_rejected() {
        let mut reg = IdentityRegistry::new(5);
        reg.register(key("A")).unwrap();
        assert_eq!(
            reg.register(key("A")),
            Err(RegistryError::AlreadyRegistered(key("A")))
        );
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn entries_in_registration_order() {
        let mut reg = IdentityRegistry::new(5);
        for k in ["C", "A", "B"] {
            reg.register(key(k)).unwrap();
        }
        let order: Vec<&str> = reg.entries().iter().map(|e| e.agent.as_str()).collect();
        assert_eq!(order, ["C", "A", "B"]);
        assert_eq!(reg.get(&key("B")).unwrap().slot, 2);
    }
}
