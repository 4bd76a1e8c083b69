use cs_core::EntityId;
use thiserror::Error;

/// Failures at the simulator boundary.
///
/// The sync loop sorts these into three buckets: transport failures (retried
/// before a session starts, fatal during one), entity-scoped failures (logged
/// and skipped), and everything else (fatal).
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    #[error("connection closed by peer")]
    Closed,

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("{command} failed: {message}")]
    Command { command: String, message: String },

    #[error("unknown entity {0}")]
    UnknownEntity(EntityId),

    #[error("entity {entity} rejected: {message}")]
    EntityRejected { entity: EntityId, message: String },

    #[error("entity {0} already exists")]
    DuplicateEntity(EntityId),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BridgeError {
    /// The connection itself is gone or never came up.
    pub fn is_transport(&self) -> bool {
        matches!(self, BridgeError::Transport(_) | BridgeError::Closed)
    }

    /// The failure concerns one entity only; the session can continue.
    pub fn is_entity_scoped(&self) -> bool {
        matches!(
            self,
            BridgeError::UnknownEntity(_) | BridgeError::EntityRejected { .. }
        )
    }
}

pub type BridgeResult<T> = Result<T, BridgeError>;
