//! Decoded events emitted by the frame decoder.

use std::fmt;

use crate::constants::RPC_CMD_SCAN_WIFI;
use crate::types::{CurrentState, ErrorState};

/// One interpreted frame from the device.
///
/// Events carry data, not formatting; the `Display` impl renders the
/// human-readable line a monitoring loop would print for each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeEvent {
    /// Current provisioning state.
    CurrentState(CurrentState),

    /// Device-reported error.
    ErrorState(ErrorState),

    /// One RPC result row.
    RpcResult {
        /// Id of the command this result answers.
        response_to: u8,
        /// The row's string records, in wire order.
        fields: Vec<String>,
    },
}

impl DecodeEvent {
    /// Whether a monitoring loop should stop after this event.
    ///
    /// Error frames always end the exchange, as does the `Stopped` state.
    /// RPC results end it too, with one exception: a non-empty scan result,
    /// since the device streams one scan frame per network with no end
    /// marker. Ending a scan is the caller's problem (usually a read
    /// timeout).
    pub fn is_terminal(&self) -> bool {
        match self {
            DecodeEvent::CurrentState(state) => *state == CurrentState::Stopped,
            DecodeEvent::ErrorState(_) => true,
            DecodeEvent::RpcResult { response_to, fields } => {
                !(*response_to == RPC_CMD_SCAN_WIFI && !fields.is_empty())
            }
        }
    }
}

impl fmt::Display for DecodeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeEvent::CurrentState(state) => fmt::Display::fmt(state, f),
            DecodeEvent::ErrorState(error) => fmt::Display::fmt(error, f),
            DecodeEvent::RpcResult { fields, .. } => write!(f, "{}", fields.join(" ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminality() {
        assert!(DecodeEvent::CurrentState(CurrentState::Stopped).is_terminal());
        assert!(!DecodeEvent::CurrentState(CurrentState::Authorized).is_terminal());
        assert!(!DecodeEvent::CurrentState(CurrentState::Provisioned).is_terminal());
        assert!(DecodeEvent::ErrorState(ErrorState::NoError).is_terminal());
        assert!(DecodeEvent::ErrorState(ErrorState::UnableToConnect).is_terminal());

        // Device info results end the exchange; scan rows keep it open.
        assert!(DecodeEvent::RpcResult {
            response_to: 3,
            fields: vec!["Ratgdo".to_string()],
        }
        .is_terminal());
        assert!(!DecodeEvent::RpcResult {
            response_to: RPC_CMD_SCAN_WIFI,
            fields: vec!["HomeNet".to_string()],
        }
        .is_terminal());
        // An empty result is terminal even for a scan.
        assert!(DecodeEvent::RpcResult {
            response_to: RPC_CMD_SCAN_WIFI,
            fields: vec![],
        }
        .is_terminal());
    }

    #[test]
    fn test_display_joins_fields() {
        let event = DecodeEvent::RpcResult {
            response_to: 3,
            fields: vec!["Ratgdo".to_string(), "2.0.0".to_string()],
        };
        assert_eq!(event.to_string(), "Ratgdo 2.0.0");
    }
}
