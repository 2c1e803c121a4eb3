//! Frame encoding utilities.
//!
//! Every Improv frame has the same layout:
//!
//! ```text
//! +--------+---------+------+--------+------------------+----------+------+
//! | IMPROV | version | type | length | payload[0..len]  | checksum | '\n' |
//! +--------+---------+------+--------+------------------+----------+------+
//! ```
//!
//! The checksum is the low 8 bits of the sum of every preceding frame byte,
//! computed with the checksum position itself initialized to zero. The `\n`
//! terminator is sent after the checksum and excluded from it.

use crate::constants::*;
use crate::error::ProtocolError;

/// Encode a complete frame around the given payload.
///
/// Produces header, version, packet type, length, payload, checksum, and the
/// trailing newline. Fails if the payload does not fit the one-byte length
/// field.
pub fn encode_frame(packet_type: u8, payload: &[u8]) -> Result<Vec<u8>, ProtocolError> {
    if payload.len() > MAX_PAYLOAD_SIZE {
        return Err(ProtocolError::PayloadTooLarge {
            max: MAX_PAYLOAD_SIZE,
            actual: payload.len(),
        });
    }

    let mut frame = Vec::with_capacity(IMPROV_HEADER.len() + 4 + payload.len() + 2);
    frame.extend_from_slice(IMPROV_HEADER);
    frame.push(PROTOCOL_VERSION);
    frame.push(packet_type);
    frame.push(payload.len() as u8);
    frame.extend_from_slice(payload);
    frame.push(0); // checksum placeholder, included in the sum as zero

    let checksum = frame.iter().fold(0u8, |sum, &byte| sum.wrapping_add(byte));
    let last = frame.len() - 1;
    frame[last] = checksum;
    frame.push(FRAME_TERMINATOR);

    Ok(frame)
}

/// Build an RPC command frame from a command id and its arguments.
///
/// The payload is `[command_id, data_length]` followed by each argument as a
/// length-prefixed byte string, where `data_length` is the total byte cost of
/// the arguments (one length byte plus the bytes of each).
pub fn build_command(command_id: u8, args: &[&[u8]]) -> Result<Vec<u8>, ProtocolError> {
    let mut data_length = 0usize;
    for arg in args {
        if arg.len() > MAX_ARG_SIZE {
            return Err(ProtocolError::ArgumentTooLong {
                max: MAX_ARG_SIZE,
                actual: arg.len(),
            });
        }
        data_length += 1 + arg.len();
    }

    let mut payload = Vec::with_capacity(2 + data_length);
    payload.push(command_id);
    payload.push(data_length as u8);
    for arg in args {
        payload.push(arg.len() as u8);
        payload.extend_from_slice(arg);
    }

    if payload.len() > MAX_PAYLOAD_SIZE {
        return Err(ProtocolError::PayloadTooLarge {
            max: MAX_PAYLOAD_SIZE,
            actual: payload.len(),
        });
    }

    encode_frame(PACKET_TYPE_RPC_COMMAND, &payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Parse an encoded RPC command frame back into its command id and
    /// arguments, checking the fixed fields along the way.
    fn parse_command_frame(frame: &[u8]) -> (u8, Vec<Vec<u8>>) {
        assert_eq!(&frame[..6], IMPROV_HEADER);
        assert_eq!(frame[6], PROTOCOL_VERSION);
        assert_eq!(frame[7], PACKET_TYPE_RPC_COMMAND);
        let length = frame[8] as usize;
        let payload = &frame[9..9 + length];
        assert_eq!(frame.len(), 9 + length + 2); // checksum + terminator

        let command_id = payload[0];
        let data_length = payload[1] as usize;
        assert_eq!(payload.len(), 2 + data_length);

        let mut args = Vec::new();
        let mut pos = 2;
        while pos < payload.len() {
            let arg_len = payload[pos] as usize;
            pos += 1;
            args.push(payload[pos..pos + arg_len].to_vec());
            pos += arg_len;
        }
        (command_id, args)
    }

    #[test]
    fn test_frame_layout() {
        let frame = encode_frame(PACKET_TYPE_RPC_COMMAND, &[RPC_CMD_SCAN_WIFI, 0]).unwrap();
        assert_eq!(&frame[..6], b"IMPROV");
        assert_eq!(frame[6], 1);
        assert_eq!(frame[7], 3);
        assert_eq!(frame[8], 2);
        assert_eq!(frame[9], 4);
        assert_eq!(frame[10], 0);
        assert_eq!(*frame.last().unwrap(), b'\n');
    }

    #[test]
    fn test_checksum_is_byte_sum() {
        let frame = build_command(RPC_CMD_WIFI_SETTINGS, &[b"MySSID", b"MyPass"]).unwrap();
        // Sum everything before the checksum byte; the terminator is excluded.
        let sum: u8 = frame[..frame.len() - 2]
            .iter()
            .fold(0u8, |sum, &byte| sum.wrapping_add(byte));
        assert_eq!(frame[frame.len() - 2], sum);
    }

    #[test]
    fn test_round_trip_reconstructs_args() {
        let cases: Vec<(u8, Vec<&[u8]>)> = vec![
            (RPC_CMD_WIFI_SETTINGS, vec![b"MySSID", b"MyPass"]),
            (RPC_CMD_WIFI_SETTINGS, vec![b"", b"p"]),
            (RPC_CMD_SCAN_WIFI, vec![]),
            (RPC_CMD_DEVICE_INFO, vec![]),
        ];
        for (command_id, args) in cases {
            let frame = build_command(command_id, &args).unwrap();
            let (decoded_id, decoded_args) = parse_command_frame(&frame);
            assert_eq!(decoded_id, command_id);
            assert_eq!(decoded_args, args);
        }
    }

    #[test]
    fn test_no_arg_command_has_zero_data_length() {
        let frame = build_command(RPC_CMD_CURRENT_STATE, &[]).unwrap();
        assert_eq!(frame[8], 2); // payload is just [command_id, 0]
        assert_eq!(frame[9], RPC_CMD_CURRENT_STATE);
        assert_eq!(frame[10], 0);
    }

    #[test]
    fn test_argument_too_long_rejected() {
        let big = vec![b'x'; 256];
        let err = build_command(RPC_CMD_WIFI_SETTINGS, &[&big, b"p"]).unwrap_err();
        assert_eq!(err, ProtocolError::ArgumentTooLong { max: 255, actual: 256 });
    }

    #[test]
    fn test_payload_too_large_rejected() {
        // Two arguments that each fit their length prefix but overflow the
        // frame length field once combined.
        let a = vec![b'a'; 200];
        let b = vec![b'b'; 200];
        let err = build_command(RPC_CMD_WIFI_SETTINGS, &[&a, &b]).unwrap_err();
        assert!(matches!(err, ProtocolError::PayloadTooLarge { .. }));
    }
}
