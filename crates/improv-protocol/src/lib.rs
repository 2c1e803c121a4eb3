//! Improv Serial Wi-Fi Provisioning Protocol
//!
//! This crate provides types and utilities for provisioning Wi-Fi credentials
//! on embedded devices over the Improv serial protocol. The protocol exchanges
//! framed messages over a raw byte stream: the host sends RPC command frames
//! and the device answers with state updates, error reports, or RPC results.
//!
//! # Protocol Overview
//!
//! Every frame has the same layout:
//!
//! ```text
//! +--------+---------+------+--------+------------------+----------+------+
//! | IMPROV | version | type | length | payload[0..len]  | checksum | '\n' |
//! +--------+---------+------+--------+------------------+----------+------+
//! ```
//!
//! - **RPC commands** (host → device): set Wi-Fi credentials, query state,
//!   query device info, scan for networks
//! - **State / error frames** (device → host): single status byte
//! - **RPC results** (device → host): length-prefixed string records,
//!   one frame per result row
//!
//! Incoming bytes carry no framing other than their content, so decoding is
//! done by an explicit state machine that resynchronizes on the `IMPROV`
//! header after noise or partial frames.
//!
//! # Example
//!
//! ```rust,ignore
//! use improv_protocol::{Command, Decoder};
//!
//! // Build a command frame
//! let frame = Command::ScanWifi.encode()?;
//!
//! // Feed received bytes one at a time
//! let mut decoder = Decoder::new();
//! if let Some(event) = decoder.push_byte(byte) {
//!     println!("{event}");
//! }
//! ```

mod commands;
mod constants;
mod decoder;
mod error;
mod events;
mod frame;
mod types;

pub use commands::*;
pub use constants::*;
pub use decoder::*;
pub use error::*;
pub use events::*;
pub use frame::*;
pub use types::*;
