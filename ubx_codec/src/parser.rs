pub(crate) mod checksum;
mod ubx;

use std::collections::VecDeque;

use log::debug;

pub use ubx::ScanState;

use crate::{
    constants::{MAX_PAYLOAD_LEN, UBX_FRAME_OVERHEAD, UBX_HEADER_LEN},
    dispatcher::PacketSink,
    error::ParserError,
    ubx_packets::UbxPacket,
};

/// Tunables of a [`Parser`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Largest declared payload length accepted before a frame is abandoned
    /// with [`ParserError::OversizedMessage`]
    pub max_payload_len: u16,
    /// Surface [`ParserError::SyncLost`] when bytes are skipped before a frame
    pub report_sync_loss: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_payload_len: MAX_PAYLOAD_LEN,
            report_sync_loss: true,
        }
    }
}

impl ParserConfig {
    pub fn with_max_payload_len(mut self, max_payload_len: u16) -> Self {
        self.max_payload_len = max_payload_len;
        self
    }

    pub fn with_report_sync_loss(mut self, report_sync_loss: bool) -> Self {
        self.report_sync_loss = report_sync_loss;
        self
    }
}

/// Running totals since the parser was created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserStats {
    pub frames_decoded: usize,
    pub checksum_failures: usize,
    pub unknown_frames: usize,
    pub length_mismatches: usize,
    pub oversized_frames: usize,
    /// Checksum-valid frames of a known message with a meaningless field value
    pub invalid_fields: usize,
    /// Bytes skipped while hunting for sync, plus unread bytes that did not
    /// fit the parser buffer when a [`ParserIter`] was dropped
    pub discarded_bytes: usize,
}

/// Streaming parser for the UBX protocol.
///
/// Bytes may be handed over in chunks of any size; a frame split across
/// several calls is completed by later ones, and the results do not depend
/// on where the stream was split. One parser serves one byte stream.
#[derive(Debug, Default)]
pub struct Parser {
    config: ParserConfig,
    state: ScanState,
    /// The frame being assembled, sync chars included
    frame: Vec<u8>,
    payload_len: usize,
    /// Bytes to scan before any new input. Together with `frame` it never
    /// holds more than one maximum frame length.
    pending: VecDeque<u8>,
    discarded: usize,
    stats: ParserStats,
}

impl Parser {
    pub fn new(config: ParserConfig) -> Self {
        Self {
            config,
            frame: Vec::with_capacity(UBX_HEADER_LEN),
            ..Self::default()
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn stats(&self) -> &ParserStats {
        &self.stats
    }

    /// Bytes held back for a later call: the partial frame plus unread input
    pub fn buffer_len(&self) -> usize {
        self.frame.len() + self.pending.len()
    }

    pub fn is_buffer_empty(&self) -> bool {
        self.buffer_len() == 0
    }

    /// Largest frame accepted with the current config
    fn max_frame_len(&self) -> usize {
        usize::from(self.config.max_payload_len) + UBX_FRAME_OVERHEAD
    }

    /// Drop the partial frame and any unread bytes, and hunt for sync again.
    /// Statistics are kept.
    pub fn reset(&mut self) {
        self.state = ScanState::SeekSync1;
        self.frame.clear();
        self.payload_len = 0;
        self.pending.clear();
        self.discarded = 0;
    }

    /// Scan `new_data`, yielding packets and errors as they complete.
    ///
    /// Bytes the iterator has not reached when it is dropped stay in the
    /// parser and are scanned first on the next call, up to one maximum
    /// frame length. The rest is dropped and counted in
    /// [`ParserStats::discarded_bytes`].
    pub fn consume<'a>(&'a mut self, new_data: &'a [u8]) -> ParserIter<'a> {
        ParserIter {
            parser: self,
            data: new_data,
            off: 0,
        }
    }

    /// Scan `new_data` to the end and collect every result
    pub fn feed(&mut self, new_data: &[u8]) -> Vec<Result<UbxPacket, ParserError>> {
        self.consume(new_data).collect()
    }

    /// Scan `new_data` to the end, handing every result to `sink`
    pub fn dispatch<S: PacketSink + ?Sized>(&mut self, new_data: &[u8], sink: &mut S) {
        for res in self.consume(new_data) {
            sink.handle(res);
        }
    }
}

/// Iterator over the results of one [`Parser::consume`] call
pub struct ParserIter<'a> {
    parser: &'a mut Parser,
    data: &'a [u8],
    off: usize,
}

impl ParserIter<'_> {
    fn next_byte(&mut self) -> Option<u8> {
        if let Some(byte) = self.parser.pending.pop_front() {
            return Some(byte);
        }
        let byte = *self.data.get(self.off)?;
        self.off += 1;
        Some(byte)
    }
}

impl Iterator for ParserIter<'_> {
    type Item = Result<UbxPacket, ParserError>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(byte) = self.next_byte() {
            if let Some(res) = self.parser.step(byte) {
                return Some(res);
            }
        }
        None
    }
}

impl Drop for ParserIter<'_> {
    fn drop(&mut self) {
        let unread = &self.data[self.off..];
        let room = self
            .parser
            .max_frame_len()
            .saturating_sub(self.parser.buffer_len());
        let (kept, lost) = unread.split_at(unread.len().min(room));
        self.parser.pending.extend(kept);
        if !lost.is_empty() {
            debug!("parser buffer full, dropped {} unread bytes", lost.len());
            self.parser.stats.discarded_bytes += lost.len();
        }
        self.off = self.data.len();
    }
}
