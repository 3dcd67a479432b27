use bridge_traits::{BridgeError, ThreadId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Invalid semaphore bounds: initial count {initial} with limit {limit}")]
    InvalidSemaphoreBounds { initial: u32, limit: u32 },

    #[error("Failed to join {thread_id}: {reason}")]
    ThreadJoin { thread_id: ThreadId, reason: String },

    #[error("Invalid priority table: {0}")]
    InvalidPriorityTable(String),

    #[error("Host error: {0}")]
    Host(#[from] BridgeError),
}

pub type Result<T> = std::result::Result<T, SyncError>;
