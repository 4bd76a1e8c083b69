//! TraCI byte codec.
//!
//! All integers and doubles are big-endian.  A message is a `u32` total length
//! (including the length field itself) followed by one or more commands:
//!
//! ```text
//! short:  [u8 len][u8 id][payload]            len = 2 + payload, ≤ 255
//! long:   [0][u32 len][u8 id][payload]        len = 6 + payload
//! ```
//!
//! Every response begins with a status command for the request:
//! `[len][id][u8 result][string description]`.

use cs_bridge::{BridgeError, BridgeResult};
use cs_core::Rgba;

use crate::constants::*;

// ── Writer ────────────────────────────────────────────────────────────────────

/// Growable big-endian encoder for one command payload.
#[derive(Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    #[inline]
    pub fn write_u8(&mut self, value: u8) -> &mut Self {
        self.buf.push(value);
        self
    }

    #[inline]
    pub fn write_i8(&mut self, value: i8) -> &mut Self {
        self.buf.extend_from_slice(&value.to_be_bytes());
        self
    }

    #[inline]
    pub fn write_i32(&mut self, value: i32) -> &mut Self {
        self.buf.extend_from_slice(&value.to_be_bytes());
        self
    }

    #[inline]
    pub fn write_u32(&mut self, value: u32) -> &mut Self {
        self.buf.extend_from_slice(&value.to_be_bytes());
        self
    }

    #[inline]
    pub fn write_f64(&mut self, value: f64) -> &mut Self {
        self.buf.extend_from_slice(&value.to_be_bytes());
        self
    }

    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Length-prefixed UTF-8, no type tag.
    pub fn write_string(&mut self, value: &str) -> &mut Self {
        self.write_u32(value.len() as u32);
        self.buf.extend_from_slice(value.as_bytes());
        self
    }

    // Typed values carry a one-byte type tag in front.

    pub fn typed_byte(&mut self, value: i8) -> &mut Self {
        self.write_u8(TYPE_BYTE).write_i8(value)
    }

    pub fn typed_int(&mut self, value: i32) -> &mut Self {
        self.write_u8(TYPE_INTEGER).write_i32(value)
    }

    pub fn typed_double(&mut self, value: f64) -> &mut Self {
        self.write_u8(TYPE_DOUBLE).write_f64(value)
    }

    pub fn typed_string(&mut self, value: &str) -> &mut Self {
        self.write_u8(TYPE_STRING).write_string(value)
    }

    pub fn typed_color(&mut self, color: Rgba) -> &mut Self {
        self.write_u8(TYPE_COLOR)
            .write_u8(color.r)
            .write_u8(color.g)
            .write_u8(color.b)
            .write_u8(color.a)
    }

    /// Compound header; the caller writes `items` typed values after it.
    pub fn compound(&mut self, items: i32) -> &mut Self {
        self.write_u8(TYPE_COMPOUND).write_i32(items)
    }
}

// ── Framing ───────────────────────────────────────────────────────────────────

/// Append command `id` with `payload` to `out`, choosing the short or long
/// form by size.
pub fn append_command(out: &mut Vec<u8>, id: u8, payload: &[u8]) {
    let short_len = 2 + payload.len();
    if short_len <= u8::MAX as usize {
        out.push(short_len as u8);
    } else {
        out.push(0);
        out.extend_from_slice(&((6 + payload.len()) as u32).to_be_bytes());
    }
    out.push(id);
    out.extend_from_slice(payload);
}

/// Wrap already-framed commands into a message.
pub fn frame_message(commands: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + commands.len());
    out.extend_from_slice(&((4 + commands.len()) as u32).to_be_bytes());
    out.extend_from_slice(commands);
    out
}

/// A single-command message.
pub fn command_message(id: u8, payload: &[u8]) -> Vec<u8> {
    let mut commands = Vec::with_capacity(6 + payload.len());
    append_command(&mut commands, id, payload);
    frame_message(&commands)
}

// ── Reader ────────────────────────────────────────────────────────────────────

/// Big-endian decoder over a received message body.
pub struct Reader<'a> {
    buffer:   &'a [u8],
    position: usize,
}

impl<'a> Reader<'a> {
    pub const fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, position: 0 }
    }

    #[inline]
    pub const fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.position)
    }

    /// Unread bytes.
    #[inline]
    pub fn rest(&self) -> &'a [u8] {
        &self.buffer[self.position.min(self.buffer.len())..]
    }

    fn take(&mut self, n: usize) -> BridgeResult<&'a [u8]> {
        if self.remaining() < n {
            return Err(BridgeError::Protocol(format!(
                "truncated response: wanted {n} bytes, {} left",
                self.remaining()
            )));
        }
        let slice = &self.buffer[self.position..self.position + n];
        self.position += n;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self) -> BridgeResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> BridgeResult<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_i32(&mut self) -> BridgeResult<i32> {
        self.take_array().map(i32::from_be_bytes)
    }

    pub fn read_u32(&mut self) -> BridgeResult<u32> {
        self.take_array().map(u32::from_be_bytes)
    }

    pub fn read_f64(&mut self) -> BridgeResult<f64> {
        self.take_array().map(f64::from_be_bytes)
    }

    pub fn read_string(&mut self) -> BridgeResult<String> {
        let len = self.read_u32()? as usize;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| BridgeError::Protocol(format!("string is not UTF-8: {e}")))
    }

    /// Read one framed command, returning its id and a reader over its payload.
    pub fn read_command(&mut self) -> BridgeResult<(u8, Reader<'a>)> {
        let (len, header) = match self.read_u8()? {
            0 => (self.read_u32()? as usize, 6),
            n => (n as usize, 2),
        };
        if len < header {
            return Err(BridgeError::Protocol(format!("command length {len} below header size")));
        }
        let id = self.read_u8()?;
        let payload = self.take(len - header)?;
        Ok((id, Reader::new(payload)))
    }
}

// ── Status ────────────────────────────────────────────────────────────────────

/// The status command that opens every response.
#[derive(Clone, Debug, PartialEq)]
pub struct Status {
    pub command:     u8,
    pub result:      u8,
    pub description: String,
}

impl Status {
    pub fn read(reader: &mut Reader<'_>) -> BridgeResult<Self> {
        let (command, mut payload) = reader.read_command()?;
        let result = payload.read_u8()?;
        let description = payload.read_string()?;
        Ok(Self { command, result, description })
    }

    #[inline]
    pub fn is_ok(&self) -> bool {
        self.result == RTYPE_OK
    }

    /// `Ok` for a successful status, otherwise [`BridgeError::Command`].
    pub fn check(self) -> BridgeResult<()> {
        if self.is_ok() {
            return Ok(());
        }
        let message = match (self.result, self.description.is_empty()) {
            (RTYPE_NOTIMPLEMENTED, true) => "not implemented".to_owned(),
            (RTYPE_ERR, true) => "error".to_owned(),
            (_, true) => format!("result 0x{:02X}", self.result),
            (_, false) => self.description,
        };
        Err(BridgeError::Command {
            command: command_name(self.command).to_owned(),
            message,
        })
    }
}
