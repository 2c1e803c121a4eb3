//! Streaming frame decoder.
//!
//! Serial bytes arrive one at a time with no framing other than their
//! content, so decoding is an explicit state machine: each received byte
//! advances the state and may complete an event. Alignment is recovered by
//! sliding a window over the stream until it matches the `IMPROV` header, so
//! the decoder tolerates leading noise, partial frames, and mid-stream
//! garbage without ever failing.

use bytes::{Buf, BufMut, BytesMut};

use crate::constants::*;
use crate::events::DecodeEvent;
use crate::types::{CurrentState, ErrorState};

/// Decoder states, one per frame field being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeState {
    /// Sliding-window search for the frame header.
    SyncHeader,
    /// Expecting the protocol version byte.
    ReadVersion,
    /// Expecting the packet type byte.
    ReadType,
    /// Expecting the payload length byte.
    ReadLength,
    /// Expecting a current-state status byte.
    ReadStateByte,
    /// Expecting an error-state status byte.
    ReadErrorByte,
    /// Expecting the id of the command this result answers.
    ReadRpcResponseCmd,
    /// Expecting the remaining-data length of an RPC result.
    ReadRpcDataLen,
    /// Expecting the length prefix of the next string record.
    ReadRpcStrLen,
    /// Accumulating the bytes of the current string record.
    ReadRpcStrData,
}

/// Incremental decoder for device → host frames.
///
/// Feed bytes with [`push_byte`](Decoder::push_byte); every completed frame
/// is returned as a [`DecodeEvent`]. All per-frame counters live inside the
/// decoder, so one value tracks exactly one stream.
#[derive(Debug)]
pub struct Decoder {
    state: DecodeState,
    /// Sliding window of the most recent header-length bytes.
    window: BytesMut,
    /// Packet type of the frame being read.
    packet_type: u8,
    /// Command id an RPC result answers.
    response_to: u8,
    /// Payload bytes left in the current RPC result. Goes negative when a
    /// record's length prefix overruns the declared data length.
    data_remaining: i32,
    /// Bytes left in the current string record.
    str_remaining: u8,
    /// Accumulated bytes of the current string record.
    field: BytesMut,
    /// Completed records of the current result row.
    fields: Vec<String>,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    /// Create a decoder, synchronized to nothing yet.
    pub fn new() -> Self {
        Decoder {
            state: DecodeState::SyncHeader,
            window: BytesMut::with_capacity(IMPROV_HEADER.len() + 1),
            packet_type: 0,
            response_to: 0,
            data_remaining: 0,
            str_remaining: 0,
            field: BytesMut::new(),
            fields: Vec::new(),
        }
    }

    /// Advance the state machine by one received byte.
    ///
    /// Returns `Some(event)` when the byte completes an interpreted frame,
    /// `None` when more bytes are needed. Never fails: anything unexpected
    /// (bad version, unknown packet type, line noise) resynchronizes on the
    /// header instead.
    pub fn push_byte(&mut self, byte: u8) -> Option<DecodeEvent> {
        match self.state {
            DecodeState::SyncHeader => {
                // Printable ASCII only; anything else can't be part of the
                // header and clears the window.
                if !matches!(byte, 0x20..=0x7E) {
                    self.window.clear();
                    return None;
                }
                self.window.put_u8(byte);
                if self.window.len() > IMPROV_HEADER.len() {
                    self.window.advance(1);
                }
                if self.window[..] == *IMPROV_HEADER {
                    self.window.clear();
                    self.state = DecodeState::ReadVersion;
                }
                None
            }

            DecodeState::ReadVersion => {
                if byte == PROTOCOL_VERSION {
                    self.state = DecodeState::ReadType;
                } else {
                    log::trace!("version mismatch (0x{byte:02X}), resyncing");
                    self.state = DecodeState::SyncHeader;
                }
                None
            }

            DecodeState::ReadType => {
                self.packet_type = byte;
                self.state = DecodeState::ReadLength;
                None
            }

            DecodeState::ReadLength => {
                if byte == 0 {
                    // Nothing to read; drop the frame.
                    self.state = DecodeState::SyncHeader;
                    return None;
                }
                match self.packet_type {
                    PACKET_TYPE_RPC_RESULT => {
                        self.fields.clear();
                        self.state = DecodeState::ReadRpcResponseCmd;
                    }
                    PACKET_TYPE_CURRENT_STATE => self.state = DecodeState::ReadStateByte,
                    PACKET_TYPE_ERROR_STATE => self.state = DecodeState::ReadErrorByte,
                    other => {
                        log::trace!("unknown packet type 0x{other:02X}, resyncing");
                        self.state = DecodeState::SyncHeader;
                    }
                }
                None
            }

            DecodeState::ReadStateByte => {
                self.state = DecodeState::SyncHeader;
                CurrentState::from_byte(byte).map(DecodeEvent::CurrentState)
            }

            DecodeState::ReadErrorByte => {
                self.state = DecodeState::SyncHeader;
                Some(DecodeEvent::ErrorState(ErrorState::from(byte)))
            }

            DecodeState::ReadRpcResponseCmd => {
                self.response_to = byte;
                self.state = DecodeState::ReadRpcDataLen;
                None
            }

            DecodeState::ReadRpcDataLen => {
                if byte == 0 {
                    self.state = DecodeState::SyncHeader;
                    return Some(DecodeEvent::RpcResult {
                        response_to: self.response_to,
                        fields: Vec::new(),
                    });
                }
                self.data_remaining = i32::from(byte);
                self.state = DecodeState::ReadRpcStrLen;
                None
            }

            DecodeState::ReadRpcStrLen => {
                self.data_remaining -= 1;
                if byte == 0 {
                    // Degenerate zero-length record: keep the stream aligned
                    // by recording it as an empty field.
                    self.fields.push(String::new());
                    return self.finish_record_if_done();
                }
                self.str_remaining = byte;
                self.field.clear();
                self.state = DecodeState::ReadRpcStrData;
                None
            }

            DecodeState::ReadRpcStrData => {
                self.field.put_u8(byte);
                self.str_remaining -= 1;
                self.data_remaining -= 1;
                if self.str_remaining > 0 {
                    return None;
                }
                let record = String::from_utf8_lossy(&self.field).into_owned();
                self.fields.push(record);
                self.field.clear();
                self.finish_record_if_done()
            }
        }
    }

    /// After completing a record, either emit the finished result row or go
    /// read the next record's length prefix.
    fn finish_record_if_done(&mut self) -> Option<DecodeEvent> {
        if self.data_remaining <= 0 {
            self.state = DecodeState::SyncHeader;
            Some(DecodeEvent::RpcResult {
                response_to: self.response_to,
                fields: std::mem::take(&mut self.fields),
            })
        } else {
            self.state = DecodeState::ReadRpcStrLen;
            None
        }
    }

    /// Feed a slice of bytes, collecting every completed event.
    ///
    /// Convenience for callers that read in chunks rather than single bytes.
    pub fn push_bytes(&mut self, data: &[u8]) -> Vec<DecodeEvent> {
        data.iter().filter_map(|&byte| self.push_byte(byte)).collect()
    }
}
