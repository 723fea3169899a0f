//! Routing of scan results to the caller

use crate::{error::ParserError, ubx_packets::UbxPacket};

/// Receiver of decoded packets and stream errors
pub trait PacketSink {
    fn on_packet(&mut self, packet: UbxPacket);

    /// Every [`ParserError`] is recoverable, so ignoring them is a valid choice
    fn on_error(&mut self, _error: ParserError) {}

    fn handle(&mut self, res: Result<UbxPacket, ParserError>) {
        match res {
            Ok(packet) => self.on_packet(packet),
            Err(error) => self.on_error(error),
        }
    }
}

/// Implement sink for simple callbacks / closures
impl<F: FnMut(Result<UbxPacket, ParserError>)> PacketSink for F {
    fn on_packet(&mut self, packet: UbxPacket) {
        self(Ok(packet))
    }

    fn on_error(&mut self, error: ParserError) {
        self(Err(error))
    }
}

/// Hand every result of `results` to `sink`, in order
pub fn dispatch<I, S>(results: I, sink: &mut S)
where
    I: IntoIterator<Item = Result<UbxPacket, ParserError>>,
    S: PacketSink + ?Sized,
{
    for res in results {
        sink.handle(res);
    }
}
