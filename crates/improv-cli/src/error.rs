//! CLI error types.

use thiserror::Error;

use crate::transport::TransportError;
use improv_protocol::ProtocolError;

/// Errors that abort the current request.
#[derive(Error, Debug)]
pub enum CliError {
    /// The command could not be encoded (oversized credentials).
    #[error("cannot encode command: {0}")]
    Protocol(#[from] ProtocolError),

    /// The transport failed or the device stopped responding.
    #[error(transparent)]
    Transport(#[from] TransportError),
}
