use std::time::Duration;

use thiserror::Error;

use crate::TreeHandle;

/// Failures at the boundary between a caller and the parser worker.
#[derive(Debug, Error)]
pub enum ParserError {
    #[error("parser did not respond within {0:?}")]
    Timeout(Duration),

    #[error("parser worker is not running")]
    Disconnected,

    #[error("expected a `{expected}` response from the parser, found `{found}`")]
    UnexpectedResponse { expected: &'static str, found: &'static str },

    #[error("parser has no tree for handle {0}")]
    UnknownHandle(TreeHandle),

    #[error("failed to spawn the parser worker")]
    Spawn(#[from] std::io::Error),
}
