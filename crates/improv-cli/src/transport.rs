//! Byte-stream transports to the device.
//!
//! The protocol engine only needs blocking single-byte reads and buffered
//! writes, so the transport is a small trait with two implementations: a
//! physical serial port, and a TCP socket for firmware UARTs that are bridged
//! over the network.
//!
//! Read timeouts live here, at the transport boundary. The protocol engine
//! never deals with time; callers decide what a quiet device means (for a
//! network scan it means the scan is over).

use std::io::{Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use thiserror::Error;

/// Scheme prefix selecting the TCP transport in a device target string.
const TCP_SCHEME: &str = "tcp://";

/// Errors at the transport boundary.
#[derive(Error, Debug)]
pub enum TransportError {
    /// No byte arrived within the configured read timeout.
    #[error("read timed out")]
    TimedOut,

    /// The port or socket was closed by the other side.
    #[error("connection closed")]
    Closed,

    /// Serial port error (open, configuration).
    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// Underlying I/O error.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// A blocking byte stream to the device.
pub trait Transport {
    /// Read one byte, blocking up to the configured timeout.
    fn read_byte(&mut self) -> Result<u8, TransportError>;

    /// Write a buffer in full.
    fn write_all(&mut self, data: &[u8]) -> Result<(), TransportError>;

    /// Flush buffered writes to the device.
    fn flush(&mut self) -> Result<(), TransportError>;
}

impl Transport for Box<dyn Transport> {
    fn read_byte(&mut self) -> Result<u8, TransportError> {
        (**self).read_byte()
    }

    fn write_all(&mut self, data: &[u8]) -> Result<(), TransportError> {
        (**self).write_all(data)
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        (**self).flush()
    }
}

/// Map a read result from a `std::io` stream onto the transport error model.
fn read_one(stream: &mut impl Read) -> Result<u8, TransportError> {
    let mut buf = [0u8; 1];
    match stream.read(&mut buf) {
        Ok(0) => Err(TransportError::Closed),
        Ok(_) => Ok(buf[0]),
        Err(err)
            if err.kind() == std::io::ErrorKind::TimedOut
                || err.kind() == std::io::ErrorKind::WouldBlock =>
        {
            Err(TransportError::TimedOut)
        }
        Err(err) => Err(err.into()),
    }
}

/// A physical serial port.
pub struct SerialTransport {
    port: Box<dyn serialport::SerialPort>,
}

impl SerialTransport {
    /// Open a serial port at the given baud rate and read timeout.
    pub fn open(path: &str, baud: u32, timeout: Duration) -> Result<Self, TransportError> {
        let port = serialport::new(path, baud).timeout(timeout).open()?;
        Ok(SerialTransport { port })
    }
}

impl Transport for SerialTransport {
    fn read_byte(&mut self) -> Result<u8, TransportError> {
        read_one(&mut self.port)
    }

    fn write_all(&mut self, data: &[u8]) -> Result<(), TransportError> {
        self.port.write_all(data)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        self.port.flush()?;
        Ok(())
    }
}

/// A TCP connection to a bridged firmware UART.
pub struct TcpTransport {
    stream: TcpStream,
}

impl TcpTransport {
    /// Connect to `host:port` with the given read timeout.
    pub fn connect(addr: &str, timeout: Duration) -> Result<Self, TransportError> {
        let stream = TcpStream::connect(addr)?;
        stream.set_read_timeout(Some(timeout))?;
        Ok(TcpTransport { stream })
    }
}

impl Transport for TcpTransport {
    fn read_byte(&mut self) -> Result<u8, TransportError> {
        read_one(&mut self.stream)
    }

    fn write_all(&mut self, data: &[u8]) -> Result<(), TransportError> {
        self.stream.write_all(data)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        self.stream.flush()?;
        Ok(())
    }
}

/// Open a transport for a device target string.
///
/// `tcp://host:port` selects the TCP transport; anything else is treated as
/// a serial device path.
pub fn open(target: &str, baud: u32, timeout: Duration) -> Result<Box<dyn Transport>, TransportError> {
    if let Some(addr) = target.strip_prefix(TCP_SCHEME) {
        tracing::debug!(addr, "connecting to bridged UART");
        Ok(Box::new(TcpTransport::connect(addr, timeout)?))
    } else {
        tracing::debug!(path = target, baud, "opening serial port");
        Ok(Box::new(SerialTransport::open(target, baud, timeout)?))
    }
}
