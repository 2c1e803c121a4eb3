//! Commands that can be sent to the device.

use crate::constants::*;
use crate::error::ProtocolError;
use crate::frame::build_command;

/// RPC commands understood by the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Set Wi-Fi credentials. The device attempts to join the network and
    /// reports progress through current-state frames.
    WifiSettings {
        /// Network SSID.
        ssid: String,
        /// Network password.
        password: String,
    },

    /// Query the current provisioning state.
    GetCurrentState,

    /// Query device information (name, firmware version, ...).
    GetDeviceInfo,

    /// Scan for Wi-Fi networks. The device streams one result frame per
    /// discovered network.
    ScanWifi,
}

impl Command {
    /// Get the RPC command id for this command.
    pub fn code(&self) -> u8 {
        match self {
            Command::WifiSettings { .. } => RPC_CMD_WIFI_SETTINGS,
            Command::GetCurrentState => RPC_CMD_CURRENT_STATE,
            Command::GetDeviceInfo => RPC_CMD_DEVICE_INFO,
            Command::ScanWifi => RPC_CMD_SCAN_WIFI,
        }
    }

    /// Encode the command to a complete wire frame.
    pub fn encode(&self) -> Result<Vec<u8>, ProtocolError> {
        match self {
            Command::WifiSettings { ssid, password } => {
                build_command(RPC_CMD_WIFI_SETTINGS, &[ssid.as_bytes(), password.as_bytes()])
            }
            Command::GetCurrentState => build_command(RPC_CMD_CURRENT_STATE, &[]),
            Command::GetDeviceInfo => build_command(RPC_CMD_DEVICE_INFO, &[]),
            Command::ScanWifi => build_command(RPC_CMD_SCAN_WIFI, &[]),
        }
    }
}
