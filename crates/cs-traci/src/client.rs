//! Blocking TraCI client over TCP.

use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::thread;
use std::time::Duration;

use cs_bridge::{BridgeError, BridgeResult};

use crate::codec::{Reader, Status, Writer, command_message};
use crate::constants::*;

/// Largest response accepted.  A length field above this is treated as a
/// corrupt stream rather than allocated.
pub const MAX_MESSAGE_LEN: usize = 64 * 1024 * 1024;

/// One TraCI connection.  Every request waits for its response.
pub struct TraciClient {
    stream: TcpStream,
    closed: bool,
}

impl TraciClient {
    /// Connect to the first of `addrs` that accepts.
    pub fn connect(addrs: &[SocketAddr]) -> BridgeResult<Self> {
        let stream = TcpStream::connect(addrs)?;
        stream.set_nodelay(true)?;
        Ok(Self { stream, closed: false })
    }

    /// Connect, retrying up to `retries` more times with `delay` between
    /// attempts.  Returns the last transport error when every attempt fails.
    pub fn connect_with_retries(
        addrs:   &[SocketAddr],
        retries: u32,
        delay:   Duration,
    ) -> BridgeResult<Self> {
        let mut attempt = 0;
        loop {
            match Self::connect(addrs) {
                Ok(client) => return Ok(client),
                Err(e) if e.is_transport() && attempt < retries => {
                    attempt += 1;
                    tracing::warn!(?addrs, attempt, retries, error = %e, "Sim-B not reachable, retrying");
                    thread::sleep(delay);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Send one command and return its response body, status already checked.
    ///
    /// The returned bytes start right after the status command.
    pub fn execute(&mut self, id: u8, payload: &[u8]) -> BridgeResult<Vec<u8>> {
        if self.closed {
            return Err(BridgeError::Closed);
        }
        self.stream.write_all(&command_message(id, payload))?;
        let body = self.read_message()?;

        let mut reader = Reader::new(&body);
        let status = Status::read(&mut reader)?;
        if status.command != id {
            return Err(BridgeError::Protocol(format!(
                "status for command 0x{:02X}, expected 0x{id:02X}",
                status.command
            )));
        }
        status.check()?;
        Ok(reader.rest().to_vec())
    }

    fn read_message(&mut self) -> BridgeResult<Vec<u8>> {
        let mut len = [0u8; 4];
        self.read_exact(&mut len)?;
        let len = u32::from_be_bytes(len) as usize;
        if len < 4 {
            return Err(BridgeError::Protocol(format!("message length {len} below header size")));
        }
        if len > MAX_MESSAGE_LEN {
            return Err(BridgeError::Protocol(format!(
                "message length {len} exceeds {MAX_MESSAGE_LEN} bytes"
            )));
        }
        let mut body = vec![0u8; len - 4];
        self.read_exact(&mut body)?;
        Ok(body)
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> BridgeResult<()> {
        self.stream.read_exact(buf).map_err(|e| match e.kind() {
            std::io::ErrorKind::UnexpectedEof => BridgeError::Closed,
            _ => BridgeError::Transport(e),
        })
    }

    /// API version number and server identification string.
    pub fn get_version(&mut self) -> BridgeResult<(i32, String)> {
        let body = self.execute(CMD_GETVERSION, &[])?;
        let mut reader = Reader::new(&body);
        let (id, mut payload) = reader.read_command()?;
        if id != CMD_GETVERSION {
            return Err(BridgeError::Protocol(format!("unexpected version response 0x{id:02X}")));
        }
        Ok((payload.read_i32()?, payload.read_string()?))
    }

    /// Advance the simulation by one step.
    pub fn simulation_step(&mut self) -> BridgeResult<()> {
        let body = self.execute(CMD_SIMSTEP, &0.0f64.to_be_bytes())?;
        // Subscription results follow; the bridge never subscribes.
        let subscriptions = Reader::new(&body).read_i32()?;
        if subscriptions != 0 {
            tracing::debug!(subscriptions, "ignoring subscription results");
        }
        Ok(())
    }

    /// Set a variable on an object: `[var][string object][typed value]`.
    pub fn set_variable(
        &mut self,
        command: u8,
        var:     u8,
        object:  &str,
        value:   &[u8],
    ) -> BridgeResult<()> {
        let mut payload = Writer::new();
        payload.write_u8(var).write_string(object).write_bytes(value);
        self.execute(command, payload.as_slice()).map(drop)
    }

    /// Ask Sim-B to close the session, then drop the socket.  Idempotent.
    pub fn close(&mut self) -> BridgeResult<()> {
        if self.closed {
            return Ok(());
        }
        let farewell = self.execute(CMD_CLOSE, &[]);
        self.closed = true;
        let shutdown = self.stream.shutdown(Shutdown::Both);
        farewell?;
        // Sim-B usually hangs up right after acknowledging the close.
        match shutdown {
            Err(e) if e.kind() != std::io::ErrorKind::NotConnected => Err(e.into()),
            _ => Ok(()),
        }
    }

    /// Address of the connected peer, if the socket still knows it.
    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.stream.peer_addr().ok()
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
