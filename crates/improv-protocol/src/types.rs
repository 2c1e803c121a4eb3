//! Status types reported by the device.

use std::fmt;

use crate::constants::*;

/// Provisioning state reported in a current-state frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentState {
    /// Wi-Fi provisioning is stopped.
    Stopped,
    /// Awaiting user authorization.
    AwaitingAuthorization,
    /// Authorized, ready for credentials.
    Authorized,
    /// Connecting to the network.
    Provisioning,
    /// Connected, provisioning complete.
    Provisioned,
}

impl CurrentState {
    /// Decode a state byte. Returns None for codes outside the defined range.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            STATE_STOPPED => Some(CurrentState::Stopped),
            STATE_AWAITING_AUTHORIZATION => Some(CurrentState::AwaitingAuthorization),
            STATE_AUTHORIZED => Some(CurrentState::Authorized),
            STATE_PROVISIONING => Some(CurrentState::Provisioning),
            STATE_PROVISIONED => Some(CurrentState::Provisioned),
            _ => None,
        }
    }

    /// Get the wire code for this state.
    pub fn code(&self) -> u8 {
        match self {
            CurrentState::Stopped => STATE_STOPPED,
            CurrentState::AwaitingAuthorization => STATE_AWAITING_AUTHORIZATION,
            CurrentState::Authorized => STATE_AUTHORIZED,
            CurrentState::Provisioning => STATE_PROVISIONING,
            CurrentState::Provisioned => STATE_PROVISIONED,
        }
    }
}

impl fmt::Display for CurrentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrentState::Stopped => write!(f, "WiFi stopped"),
            CurrentState::AwaitingAuthorization => write!(f, "Wifi awaiting authorization"),
            CurrentState::Authorized => write!(f, "Wifi authorized"),
            CurrentState::Provisioning => write!(f, "Wifi provisioning"),
            CurrentState::Provisioned => write!(f, "Wifi provisioned"),
        }
    }
}

/// Error reported in an error-state frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorState {
    /// No error.
    NoError,
    /// The RPC packet was malformed.
    InvalidRpcPacket,
    /// The RPC command id is not recognized.
    UnknownRpcCommand,
    /// The device could not connect with the given credentials.
    UnableToConnect,
    /// Unknown device-side error.
    UnknownError,
}

impl ErrorState {
    /// Get the wire code for this error.
    pub fn code(&self) -> u8 {
        match self {
            ErrorState::NoError => ERROR_NONE,
            ErrorState::InvalidRpcPacket => ERROR_INVALID_RPC_PACKET,
            ErrorState::UnknownRpcCommand => ERROR_UNKNOWN_RPC_COMMAND,
            ErrorState::UnableToConnect => ERROR_UNABLE_TO_CONNECT,
            ErrorState::UnknownError => ERROR_UNKNOWN,
        }
    }
}

impl From<u8> for ErrorState {
    /// Codes outside the defined range collapse to `UnknownError`.
    fn from(byte: u8) -> Self {
        match byte {
            ERROR_NONE => ErrorState::NoError,
            ERROR_INVALID_RPC_PACKET => ErrorState::InvalidRpcPacket,
            ERROR_UNKNOWN_RPC_COMMAND => ErrorState::UnknownRpcCommand,
            ERROR_UNABLE_TO_CONNECT => ErrorState::UnableToConnect,
            _ => ErrorState::UnknownError,
        }
    }
}

impl fmt::Display for ErrorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorState::NoError => write!(f, "No Error"),
            ErrorState::InvalidRpcPacket => write!(f, "Invalid RPC packet"),
            ErrorState::UnknownRpcCommand => write!(f, "Unknown RPC command"),
            ErrorState::UnableToConnect => write!(f, "Unable to connect"),
            ErrorState::UnknownError => write!(f, "Unknown Error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_labels() {
        let labels: Vec<String> = (0..=4)
            .map(|code| CurrentState::from_byte(code).unwrap().to_string())
            .collect();
        assert_eq!(
            labels,
            vec![
                "WiFi stopped",
                "Wifi awaiting authorization",
                "Wifi authorized",
                "Wifi provisioning",
                "Wifi provisioned",
            ]
        );
    }

    #[test]
    fn test_state_out_of_range() {
        assert_eq!(CurrentState::from_byte(5), None);
        assert_eq!(CurrentState::from_byte(0xFF), None);
    }

    #[test]
    fn test_error_labels() {
        let labels: Vec<String> = (0..=4).map(|code| ErrorState::from(code).to_string()).collect();
        assert_eq!(
            labels,
            vec![
                "No Error",
                "Invalid RPC packet",
                "Unknown RPC command",
                "Unable to connect",
                "Unknown Error",
            ]
        );
    }

    #[test]
    fn test_error_out_of_range_collapses() {
        assert_eq!(ErrorState::from(5), ErrorState::UnknownError);
        assert_eq!(ErrorState::from(0xFF), ErrorState::UnknownError);
    }

    #[test]
    fn test_codes_round_trip() {
        for code in 0..=4 {
            assert_eq!(CurrentState::from_byte(code).unwrap().code(), code);
            assert_eq!(ErrorState::from(code).code(), code);
        }
    }
}
