use cs_bridge::BridgeError;
use cs_registry::RegistryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("sync configuration error: {0}")]
    Config(String),

    #[error("Sim-A: {0}")]
    SimA(#[source] BridgeError),

    #[error("Sim-B: {0}")]
    SimB(#[source] BridgeError),

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("sync loop already terminated")]
    Terminated,

    #[error("cancelled before the session was established")]
    Cancelled,
}

pub type SyncResult<T> = Result<T, SyncError>;
