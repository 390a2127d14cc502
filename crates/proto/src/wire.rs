// SPDX-License-Identifier: MIT

//! Length-prefixed JSON framing shared by the manager, agent and connector.
//!
//! Wire format: 4-byte length prefix (big-endian) + JSON payload, grounded
//! on the teacher's daemon IPC protocol doc comment (same framing, the
//! teacher ships it over a Unix/TCP socket; we reuse it for the
//! manager<->agent and connector<->CLI links described in spec.md §6).

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::{timeout, Duration};

/// Largest message this protocol will decode. Guards against a peer sending
/// a bogus length prefix and exhausting memory.
pub const MAX_MESSAGE_LEN: u32 = 16 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed message: {0}")]
    Json(#[from] serde_json::Error),

    #[error("message length {0} exceeds maximum {MAX_MESSAGE_LEN}")]
    MessageTooLarge(u32),

    #[error("timed out waiting for message")]
    Timeout,

    #[error("connection closed")]
    Closed,
}

/// Encode a value into a length-prefixed frame.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, ProtocolError> {
    let payload = serde_json::to_vec(value)?;
    let len = u32::try_from(payload.len()).map_err(|_| ProtocolError::MessageTooLarge(u32::MAX))?;
    let mut frame = Vec::with_capacity(4 + payload.len());
    frame.extend_from_slice(&len.to_be_bytes());
    frame.extend_from_slice(&payload);
    Ok(frame)
}

/// Decode a length-prefixed frame's payload into a value.
pub fn decode<T: DeserializeOwned>(payload: &[u8]) -> Result<T, ProtocolError> {
    Ok(serde_json::from_slice(payload)?)
}

/// Read one length-prefixed JSON message.
pub async fn read_message<T, R>(reader: &mut R) -> Result<T, ProtocolError>
where
    T: DeserializeOwned,
    R: AsyncRead + Unpin,
{
    let mut len_buf = [0u8; 4];
    match reader.read_exact(&mut len_buf).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Err(ProtocolError::Closed),
        Err(e) => return Err(e.into()),
    }
    let len = u32::from_be_bytes(len_buf);
    if len > MAX_MESSAGE_LEN {
        return Err(ProtocolError::MessageTooLarge(len));
    }
    let mut payload = vec![0u8; len as usize];
    reader.read_exact(&mut payload).await?;
    decode(&payload)
}

/// Write one length-prefixed JSON message.
pub async fn write_message<T, W>(writer: &mut W, value: &T) -> Result<(), ProtocolError>
where
    T: Serialize,
    W: AsyncWrite + Unpin,
{
    let frame = encode(value)?;
    writer.write_all(&frame).await?;
    writer.flush().await?;
    Ok(())
}

/// Read a message, failing with [`ProtocolError::Timeout`] if none arrives
/// within `deadline`.
pub async fn read_message_timeout<T, R>(reader: &mut R, deadline: Duration) -> Result<T, ProtocolError>
where
    T: DeserializeOwned,
    R: AsyncRead + Unpin,
{
    timeout(deadline, read_message(reader)).await.map_err(|_| ProtocolError::Timeout)?
}

/// Write a message, failing with [`ProtocolError::Timeout`] if it cannot be
/// sent within `deadline`.
pub async fn write_message_timeout<T, W>(
    writer: &mut W,
    value: &T,
    deadline: Duration,
) -> Result<(), ProtocolError>
where
    T: Serialize,
    W: AsyncWrite + Unpin,
{
    timeout(deadline, write_message(writer, value)).await.map_err(|_| ProtocolError::Timeout)?
}

#[cfg(test)]
#[path = "wire_tests.rs"]
mod tests;
