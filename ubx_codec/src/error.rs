use std::fmt;

use crate::ubx_packets::PayloadLen;

#[derive(Debug)]
pub enum MemWriterError<E>
where
    E: std::error::Error,
{
    NotEnoughMem,
    Custom(E),
}

impl<E> fmt::Display for MemWriterError<E>
where
    E: std::error::Error,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemWriterError::NotEnoughMem => f.write_str("Not enough memory error"),
            MemWriterError::Custom(e) => write!(f, "MemWriterError: {}", e),
        }
    }
}

impl<E> std::error::Error for MemWriterError<E> where E: std::error::Error {}

/// Errors reported while scanning and decoding a UBX byte stream.
///
/// None of them is fatal: after reporting one the parser is already hunting
/// for the next sync sequence, so the caller may keep feeding bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserError {
    /// Bytes were dropped while looking for a frame start
    SyncLost { discarded: usize },
    /// The trailer did not match the frame content. `expect` is the checksum
    /// computed over class, id, length and payload, `got` the received one.
    /// `frame` holds the whole rejected frame, sync chars and trailer included.
    ChecksumMismatch {
        expect: u16,
        got: u16,
        frame: Vec<u8>,
    },
    /// A checksum-valid frame whose class/id pair is not in the registry
    UnknownMessage {
        class: u8,
        msg_id: u8,
        payload: Vec<u8>,
    },
    /// The declared payload length is not one the message accepts
    LengthMismatch {
        packet: &'static str,
        expect: PayloadLen,
        got: usize,
    },
    /// The header declared a payload larger than the parser buffer bound
    OversizedMessage {
        class: u8,
        msg_id: u8,
        len: usize,
        max: usize,
    },
    InvalidField {
        packet: &'static str,
        field: &'static str,
    },
}

impl ParserError {
    /// Every stream error leaves the parser ready for the next frame.
    ///
    /// Escalation (for instance after too many errors in a row) is a decision
    /// for the caller.
    pub const fn is_recoverable(&self) -> bool {
        true
    }

    /// `(class, msg_id)` of the frame this error refers to, when known
    pub fn class_and_msg_id(&self) -> Option<(u8, u8)> {
        match self {
            ParserError::ChecksumMismatch { frame, .. } if frame.len() > 3 => {
                Some((frame[2], frame[3]))
            },
            ParserError::UnknownMessage { class, msg_id, .. }
            | ParserError::OversizedMessage { class, msg_id, .. } => Some((*class, *msg_id)),
            _ => None,
        }
    }
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParserError::SyncLost { discarded } => {
                write!(f, "Lost sync, discarded {} bytes", discarded)
            },
            ParserError::ChecksumMismatch { expect, got, .. } => write!(
                f,
                "Not valid packet's checksum, expect {:x}, got {:x}",
                expect, got
            ),
            ParserError::UnknownMessage {
                class,
                msg_id,
                payload,
            } => write!(
                f,
                "Unknown packet class {:#04x} id {:#04x} ({} bytes of payload)",
                class,
                msg_id,
                payload.len()
            ),
            ParserError::LengthMismatch {
                packet,
                expect,
                got,
            } => write!(
                f,
                "Invalid packet({}) length, expect {}, got {}",
                packet, expect, got
            ),
            ParserError::OversizedMessage {
                class,
                msg_id,
                len,
                max,
            } => write!(
                f,
                "Packet class {:#04x} id {:#04x} declares {} bytes of payload, limit is {}",
                class, msg_id, len, max
            ),
            ParserError::InvalidField { packet, field } => {
                write!(f, "Invalid field {} of packet {}", field, packet)
            },
        }
    }
}

impl std::error::Error for ParserError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeError {
    InvalidDate,
    InvalidTime,
    InvalidNanoseconds,
}

impl fmt::Display for DateTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateTimeError::InvalidDate => f.write_str("invalid date"),
            DateTimeError::InvalidTime => f.write_str("invalid time"),
            DateTimeError::InvalidNanoseconds => f.write_str("invalid nanoseconds"),
        }
    }
}

impl std::error::Error for DateTimeError {}
