use cs_core::AgentKey;
use thiserror::Error;

/// Misuse of [`IdentityRegistry::register`][crate::IdentityRegistry::register].
///
/// The sync loop checks `is_known` first, so neither variant occurs in a
/// correct session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("registry capacity {capacity} exhausted")]
    CapacityExhausted { capacity: usize },

    #[error("agent {0} is already registered")]
    AlreadyRegistered(AgentKey),
}

pub type RegistryResult<T> = Result<T, RegistryError>;
