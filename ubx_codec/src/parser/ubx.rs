//! UBX frame scanner: a byte-at-a-time state machine

use log::{debug, trace};

use super::{checksum::UbxChecksumCalc, Parser};
use crate::{
    constants::{
        UBX_CHECKSUM_LEN, UBX_CLASS_OFFSET, UBX_HEADER_LEN, UBX_MSG_ID_OFFSET, UBX_SYNC_CHAR_1,
        UBX_SYNC_CHAR_2,
    },
    error::ParserError,
    ubx_packets::{match_packet, MessageKey, UbxPacket},
};

/// Where the scanner is inside the current frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    /// Dropping bytes until `0xB5` shows up
    #[default]
    SeekSync1,
    /// Saw `0xB5`, the next byte must be `0x62`
    SeekSync2,
    /// Collecting class, id and the two length bytes
    ReadHeader,
    /// Collecting the declared number of payload bytes
    ReadPayload,
    /// Collecting `ck_a` and `ck_b`
    ReadChecksum,
}

impl Parser {
    /// Advance the scanner by one byte, returning the outcome of a frame if
    /// this byte ended one.
    pub(super) fn step(&mut self, byte: u8) -> Option<Result<UbxPacket, ParserError>> {
        match self.state {
            ScanState::SeekSync1 => {
                if byte == UBX_SYNC_CHAR_1 {
                    self.state = ScanState::SeekSync2;
                } else {
                    self.discarded += 1;
                }
                None
            },
            ScanState::SeekSync2 => {
                if byte == UBX_SYNC_CHAR_2 {
                    self.frame.clear();
                    self.frame.extend_from_slice(&[UBX_SYNC_CHAR_1, UBX_SYNC_CHAR_2]);
                    self.state = ScanState::ReadHeader;
                    return self.sync_acquired();
                }
                // the lone 0xB5 is garbage, the current byte may still start a frame
                self.discarded += 1;
                self.state = ScanState::SeekSync1;
                self.step(byte)
            },
            ScanState::ReadHeader => {
                self.frame.push(byte);
                if self.frame.len() < UBX_HEADER_LEN {
                    return None;
                }
                self.payload_len = usize::from(u16::from_le_bytes([self.frame[4], self.frame[5]]));
                if self.payload_len > usize::from(self.config.max_payload_len) {
                    return Some(Err(self.abandon_oversized()));
                }
                let (class, msg_id) = (self.frame[UBX_CLASS_OFFSET], self.frame[UBX_MSG_ID_OFFSET]);
                if let Some(key) = MessageKey::from_class_and_msg_id(class, msg_id) {
                    if !key.payload_len().admits_len(self.payload_len) {
                        return Some(Err(self.abandon_bad_length(key)));
                    }
                }
                self.state = if self.payload_len == 0 {
                    ScanState::ReadChecksum
                } else {
                    ScanState::ReadPayload
                };
                None
            },
            ScanState::ReadPayload => {
                self.frame.push(byte);
                if self.frame.len() == UBX_HEADER_LEN + self.payload_len {
                    self.state = ScanState::ReadChecksum;
                }
                None
            },
            ScanState::ReadChecksum => {
                self.frame.push(byte);
                if self.frame.len() < UBX_HEADER_LEN + self.payload_len + UBX_CHECKSUM_LEN {
                    return None;
                }
                self.state = ScanState::SeekSync1;
                Some(self.finish_frame())
            },
        }
    }

    fn sync_acquired(&mut self) -> Option<Result<UbxPacket, ParserError>> {
        if self.discarded == 0 {
            return None;
        }
        let discarded = core::mem::take(&mut self.discarded);
        trace!("dropped {} bytes before sync", discarded);
        self.stats.discarded_bytes += discarded;
        if self.config.report_sync_loss {
            Some(Err(ParserError::SyncLost { discarded }))
        } else {
            None
        }
    }

    /// Drops the frame start and rescans class, id and length as ordinary
    /// stream bytes, since the sync chars may have been a coincidence.
    fn replay_header(&mut self) {
        for byte in self.frame[UBX_CLASS_OFFSET..].iter().rev() {
            self.pending.push_front(*byte);
        }
        self.frame.clear();
        self.state = ScanState::SeekSync1;
    }

    fn abandon_oversized(&mut self) -> ParserError {
        let (class, msg_id) = (self.frame[UBX_CLASS_OFFSET], self.frame[UBX_MSG_ID_OFFSET]);
        debug!(
            "abandon frame class {:#04x} id {:#04x}: payload len {} over limit {}",
            class, msg_id, self.payload_len, self.config.max_payload_len
        );
        self.replay_header();
        self.stats.oversized_frames += 1;
        ParserError::OversizedMessage {
            class,
            msg_id,
            len: self.payload_len,
            max: usize::from(self.config.max_payload_len),
        }
    }

    /// A known key with a length it can never have is not a real frame start
    fn abandon_bad_length(&mut self, key: MessageKey) -> ParserError {
        debug!("abandon frame {}: payload len {} not accepted", key, self.payload_len);
        self.replay_header();
        self.stats.length_mismatches += 1;
        ParserError::LengthMismatch {
            packet: key.name(),
            expect: key.payload_len(),
            got: self.payload_len,
        }
    }

    fn finish_frame(&mut self) -> Result<UbxPacket, ParserError> {
        let trailer_start = self.frame.len() - UBX_CHECKSUM_LEN;
        let mut checksum = UbxChecksumCalc::new();
        checksum.update(&self.frame[UBX_CLASS_OFFSET..trailer_start]);
        let (ck_a, ck_b) = checksum.result();
        let (got_a, got_b) = (self.frame[trailer_start], self.frame[trailer_start + 1]);
        if (ck_a, ck_b) != (got_a, got_b) {
            let frame = core::mem::take(&mut self.frame);
            debug!(
                "drop frame class {:#04x} id {:#04x}: bad checksum",
                frame[UBX_CLASS_OFFSET], frame[UBX_MSG_ID_OFFSET]
            );
            self.stats.checksum_failures += 1;
            return Err(ParserError::ChecksumMismatch {
                expect: u16::from_le_bytes([ck_a, ck_b]),
                got: u16::from_le_bytes([got_a, got_b]),
                frame,
            });
        }

        let (class, msg_id) = (self.frame[UBX_CLASS_OFFSET], self.frame[UBX_MSG_ID_OFFSET]);
        let ret = match_packet(class, msg_id, &self.frame[UBX_HEADER_LEN..trailer_start]);
        self.frame.clear();
        match &ret {
            Ok(_) => self.stats.frames_decoded += 1,
            Err(ParserError::UnknownMessage { payload, .. }) => {
                debug!(
                    "unknown packet class {:#04x} id {:#04x}, {} bytes",
                    class,
                    msg_id,
                    payload.len()
                );
                self.stats.unknown_frames += 1;
            },
            Err(ParserError::LengthMismatch { packet, got, .. }) => {
                debug!("packet {} with unexpected length {}", packet, got);
                self.stats.length_mismatches += 1;
            },
            Err(err) => {
                debug!("packet class {:#04x} id {:#04x}: {}", class, msg_id, err);
                self.stats.invalid_fields += 1;
            },
        }
        ret
    }
}
