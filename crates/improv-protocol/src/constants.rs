//! Protocol constants
//!
//! These constants define the frame header, packet types, RPC command ids,
//! and status codes used on the Improv serial wire.

// ============================================================================
// Framing
// ============================================================================

/// Frame header, sent as six ASCII bytes at the start of every frame.
pub const IMPROV_HEADER: &[u8] = b"IMPROV";
/// Protocol version carried in every frame.
pub const PROTOCOL_VERSION: u8 = 1;
/// Frame terminator, sent after the checksum and excluded from it.
pub const FRAME_TERMINATOR: u8 = b'\n';

// ============================================================================
// Packet Types
// ============================================================================

/// Current-state frame (device → host, single status byte).
pub const PACKET_TYPE_CURRENT_STATE: u8 = 1;
/// Error-state frame (device → host, single error byte).
pub const PACKET_TYPE_ERROR_STATE: u8 = 2;
/// RPC command frame (host → device).
pub const PACKET_TYPE_RPC_COMMAND: u8 = 3;
/// RPC result frame (device → host, string records).
pub const PACKET_TYPE_RPC_RESULT: u8 = 4;

// ============================================================================
// RPC Command Ids (host → device)
// ============================================================================

/// Set Wi-Fi credentials (SSID + password arguments).
pub const RPC_CMD_WIFI_SETTINGS: u8 = 1;
/// Query the current provisioning state.
pub const RPC_CMD_CURRENT_STATE: u8 = 2;
/// Query device information.
pub const RPC_CMD_DEVICE_INFO: u8 = 3;
/// Scan for Wi-Fi networks. The device streams one result frame per network.
pub const RPC_CMD_SCAN_WIFI: u8 = 4;

// ============================================================================
// Current-State Codes
// ============================================================================

/// Wi-Fi provisioning is stopped.
pub const STATE_STOPPED: u8 = 0;
/// Awaiting user authorization.
pub const STATE_AWAITING_AUTHORIZATION: u8 = 1;
/// Authorized, ready for credentials.
pub const STATE_AUTHORIZED: u8 = 2;
/// Connecting to the network.
pub const STATE_PROVISIONING: u8 = 3;
/// Connected, provisioning complete.
pub const STATE_PROVISIONED: u8 = 4;

// ============================================================================
// Error-State Codes
// ============================================================================

/// No error.
pub const ERROR_NONE: u8 = 0;
/// The RPC packet was malformed.
pub const ERROR_INVALID_RPC_PACKET: u8 = 1;
/// The RPC command id is not recognized.
pub const ERROR_UNKNOWN_RPC_COMMAND: u8 = 2;
/// The device could not connect with the given credentials.
pub const ERROR_UNABLE_TO_CONNECT: u8 = 3;
/// Unknown device-side error.
pub const ERROR_UNKNOWN: u8 = 4;

// ============================================================================
// Sizes
// ============================================================================

/// Maximum payload size (the length field is a single byte).
pub const MAX_PAYLOAD_SIZE: usize = 255;
/// Maximum size of a single RPC command argument.
pub const MAX_ARG_SIZE: usize = 255;
