//! Unified error types surfaced by the runtime API.
//!
//! Tree evaluation never fails; these errors cover worker coordination and
//! invalid setup only.
use thiserror::Error;
use tokio::sync::oneshot;

use game_core::ProfileError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("tick worker command channel closed")]
    CommandChannelClosed,

    #[error("tick worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("tick worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("invalid runtime configuration: {field} {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },

    #[error("invalid monster profile")]
    InvalidProfile(#[from] ProfileError),
}
