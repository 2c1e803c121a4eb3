//! Request entry points and the blocking monitor loop.
//!
//! Each request writes one encoded command frame, flushes, then reads the
//! byte stream through the decoder until a terminal event: a device error, a
//! stopped state, or the RPC result that answers the command. Scans are the
//! exception; the device streams one result frame per network with no end
//! marker, so a scan ends when the transport read times out.

use improv_protocol::{Command, DecodeEvent, Decoder};
use tracing::debug;

use crate::error::CliError;
use crate::transport::{Transport, TransportError};

/// A provisioning session with one device.
pub struct ImprovClient<T: Transport> {
    transport: T,
}

impl<T: Transport> ImprovClient<T> {
    /// Create a client over an open transport.
    pub fn new(transport: T) -> Self {
        ImprovClient { transport }
    }

    /// Send Wi-Fi credentials and report provisioning progress.
    ///
    /// Prints each state transition; the exchange ends with the device's RPC
    /// result (typically a redirect URL once connected) or an error frame.
    pub fn request_wifi_settings(&mut self, ssid: &str, password: &str) -> Result<(), CliError> {
        self.send(&Command::WifiSettings {
            ssid: ssid.to_string(),
            password: password.to_string(),
        })?;
        self.monitor(false, |event| println!("{event}"))
    }

    /// Scan for Wi-Fi networks, printing one row per network.
    ///
    /// The scan is over when the device goes quiet for the transport's read
    /// timeout.
    pub fn request_scan(&mut self) -> Result<(), CliError> {
        self.send(&Command::ScanWifi)?;
        self.monitor(true, |event| println!("{event}"))
    }

    /// Fetch and print the device information row.
    pub fn request_device_info(&mut self) -> Result<(), CliError> {
        self.send(&Command::GetDeviceInfo)?;
        self.monitor(false, |event| println!("{event}"))
    }

    /// Fetch and print the current provisioning state.
    pub fn request_current_state(&mut self) -> Result<(), CliError> {
        self.send(&Command::GetCurrentState)?;
        self.monitor(false, |event| println!("{event}"))
    }

    /// Encode a command, write it, and flush.
    fn send(&mut self, command: &Command) -> Result<(), CliError> {
        debug!(command = command.code(), "sending RPC command");
        let frame = command.encode()?;
        self.transport.write_all(&frame)?;
        self.transport.flush()?;
        Ok(())
    }

    /// Read bytes through the decoder until a terminal event.
    ///
    /// With `end_on_timeout`, a read timeout ends the loop normally instead
    /// of failing; that is how the implicit end of a scan stream is detected.
    fn monitor<F>(&mut self, end_on_timeout: bool, mut handle: F) -> Result<(), CliError>
    where
        F: FnMut(&DecodeEvent),
    {
        let mut decoder = Decoder::new();
        loop {
            let byte = match self.transport.read_byte() {
                Ok(byte) => byte,
                Err(TransportError::TimedOut) if end_on_timeout => return Ok(()),
                Err(err) => return Err(err.into()),
            };
            if let Some(event) = decoder.push_byte(byte) {
                handle(&event);
                if event.is_terminal() {
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use improv_protocol::{
        encode_frame, ErrorState, CurrentState, PACKET_TYPE_CURRENT_STATE,
        PACKET_TYPE_ERROR_STATE, PACKET_TYPE_RPC_RESULT, RPC_CMD_SCAN_WIFI,
        RPC_CMD_WIFI_SETTINGS, STATE_AUTHORIZED, STATE_PROVISIONED, STATE_PROVISIONING,
        ERROR_UNABLE_TO_CONNECT,
    };
    use std::collections::VecDeque;

    /// In-memory transport: scripted receive bytes, captured writes.
    struct MemoryTransport {
        rx: VecDeque<u8>,
        tx: Vec<u8>,
    }

    impl MemoryTransport {
        fn new(rx: Vec<u8>) -> Self {
            MemoryTransport {
                rx: rx.into(),
                tx: Vec::new(),
            }
        }
    }

    impl Transport for MemoryTransport {
        fn read_byte(&mut self) -> Result<u8, TransportError> {
            self.rx.pop_front().ok_or(TransportError::TimedOut)
        }

        fn write_all(&mut self, data: &[u8]) -> Result<(), TransportError> {
            self.tx.extend_from_slice(data);
            Ok(())
        }

        fn flush(&mut self) -> Result<(), TransportError> {
            Ok(())
        }
    }

    fn result_frame(response_to: u8, records: &[&[u8]]) -> Vec<u8> {
        let data_length: usize = records.iter().map(|r| 1 + r.len()).sum();
        let mut payload = vec![response_to, data_length as u8];
        for record in records {
            payload.push(record.len() as u8);
            payload.extend_from_slice(record);
        }
        encode_frame(PACKET_TYPE_RPC_RESULT, &payload).unwrap()
    }

    #[test]
    fn test_send_writes_encoded_frame() {
        let mut client = ImprovClient::new(MemoryTransport::new(vec![]));
        client.send(&Command::GetDeviceInfo).unwrap();
        assert_eq!(client.transport.tx, Command::GetDeviceInfo.encode().unwrap());
    }

    #[test]
    fn test_monitor_stops_on_error_frame() {
        let rx = encode_frame(PACKET_TYPE_ERROR_STATE, &[ERROR_UNABLE_TO_CONNECT]).unwrap();
        let mut client = ImprovClient::new(MemoryTransport::new(rx));
        let mut events = Vec::new();
        client.monitor(false, |event| events.push(event.clone())).unwrap();
        assert_eq!(events, vec![DecodeEvent::ErrorState(ErrorState::UnableToConnect)]);
    }

    #[test]
    fn test_monitor_timeout_is_an_error_outside_scans() {
        let mut client = ImprovClient::new(MemoryTransport::new(vec![]));
        let result = client.monitor(false, |_| {});
        assert!(matches!(
            result,
            Err(CliError::Transport(TransportError::TimedOut))
        ));
    }

    #[test]
    fn test_scan_collects_rows_until_timeout() {
        let mut rx = result_frame(RPC_CMD_SCAN_WIFI, &[b"HomeNet -60 YES"]);
        rx.extend_from_slice(&result_frame(RPC_CMD_SCAN_WIFI, &[b"Cafe -82 NO"]));
        let mut client = ImprovClient::new(MemoryTransport::new(rx));
        let mut rows = Vec::new();
        client
            .monitor(true, |event| rows.push(event.to_string()))
            .unwrap();
        assert_eq!(rows, vec!["HomeNet -60 YES", "Cafe -82 NO"]);
    }

    #[test]
    fn test_wifi_settings_exchange_ends_on_result() {
        // State transitions followed by the RPC result carrying the
        // post-provisioning URL.
        let mut rx = Vec::new();
        for state in [STATE_AUTHORIZED, STATE_PROVISIONING, STATE_PROVISIONED] {
            rx.extend_from_slice(&encode_frame(PACKET_TYPE_CURRENT_STATE, &[state]).unwrap());
        }
        rx.extend_from_slice(&result_frame(RPC_CMD_WIFI_SETTINGS, &[b"http://ratgdo.local"]));

        let mut client = ImprovClient::new(MemoryTransport::new(rx));
        let mut events = Vec::new();
        client.monitor(false, |event| events.push(event.clone())).unwrap();
        assert_eq!(events.len(), 4);
        assert_eq!(
            events[2],
            DecodeEvent::CurrentState(CurrentState::Provisioned)
        );
        assert_eq!(events[3].to_string(), "http://ratgdo.local");
    }
}
