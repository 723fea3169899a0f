mod packets;
mod registry;
mod types;

pub use packets::*;
pub use registry::*;
pub use types::*;

use crate::{
    constants::{
        UBX_CHECKSUM_LEN, UBX_CLASS_OFFSET, UBX_FRAME_OVERHEAD, UBX_HEADER_LEN,
        UBX_LENGTH_OFFSET, UBX_MSG_ID_OFFSET, UBX_SYNC_CHAR_1, UBX_SYNC_CHAR_2,
    },
    error::MemWriterError,
    parser::checksum::{ubx_checksum, UbxChecksumCalc},
};

/// Information about concrete UBX protocol's packet
pub trait UbxPacketMeta {
    const KEY: MessageKey;
    const CLASS: u8 = Self::KEY.class();
    const ID: u8 = Self::KEY.msg_id();
    const FIXED_PAYLOAD_LEN: Option<u16> = Self::KEY.payload_len().fixed();
    const MAX_PAYLOAD_LEN: u16 = Self::KEY.payload_len().max();
}

/// Abstraction for buffer creation/reallocation
/// to storing packet
pub trait MemWriter {
    type Error: std::error::Error;

    /// make sure that we have at least `len` bytes for writing
    fn reserve_allocate(&mut self, len: usize) -> Result<(), MemWriterError<Self::Error>>;
    fn write(&mut self, buf: &[u8]) -> Result<(), MemWriterError<Self::Error>>;
}

impl MemWriter for Vec<u8> {
    type Error = std::io::Error;

    fn reserve_allocate(&mut self, len: usize) -> Result<(), MemWriterError<Self::Error>> {
        self.reserve(len);
        Ok(())
    }

    fn write(&mut self, buf: &[u8]) -> Result<(), MemWriterError<Self::Error>> {
        let ret = <dyn std::io::Write>::write(self, buf).map_err(MemWriterError::Custom)?;
        if ret == buf.len() {
            Ok(())
        } else {
            Err(MemWriterError::NotEnoughMem)
        }
    }
}

/// Payload serialization of a packet this crate can emit
pub trait UbxPacketPayload: UbxPacketMeta {
    /// Length of the payload `write_payload` produces
    fn payload_len(&self) -> usize;

    /// Writes the payload into `out`, which is exactly `payload_len()` bytes
    /// long and zeroed, so reserved fields may be skipped.
    fn write_payload(&self, out: &mut [u8]);
}

pub trait UbxPacketCreator {
    /// Create packet and store bytes sequence to somewhere using `out`
    fn create_packet<T: MemWriter>(&self, out: &mut T) -> Result<(), MemWriterError<T::Error>>;

    /// The whole frame: sync chars, header, payload and checksum
    fn to_packet_bytes(&self) -> Vec<u8>;
}

impl<P: UbxPacketPayload> UbxPacketCreator for P {
    fn create_packet<T: MemWriter>(&self, out: &mut T) -> Result<(), MemWriterError<T::Error>> {
        let payload_len = self.payload_len();
        out.reserve_allocate(payload_len + UBX_FRAME_OVERHEAD)?;

        let len_bytes = (payload_len as u16).to_le_bytes();
        let header = [
            UBX_SYNC_CHAR_1,
            UBX_SYNC_CHAR_2,
            P::CLASS,
            P::ID,
            len_bytes[0],
            len_bytes[1],
        ];
        out.write(&header)?;
        let mut checksum_calc = UbxChecksumCalc::default();
        checksum_calc.update(&header[UBX_CLASS_OFFSET..]);

        let mut payload = vec![0u8; payload_len];
        self.write_payload(&mut payload);
        out.write(&payload)?;
        checksum_calc.update(&payload);

        let (ck_a, ck_b) = checksum_calc.result();
        out.write(&[ck_a, ck_b])?;
        Ok(())
    }

    fn to_packet_bytes(&self) -> Vec<u8> {
        let mut ret = vec![0u8; self.payload_len() + UBX_FRAME_OVERHEAD];
        fill_packet(self, &mut ret);
        ret
    }
}

/// Writes header, payload and checksum of `packet` into `out`, which must be
/// exactly `payload_len() + UBX_FRAME_OVERHEAD` zeroed bytes.
pub(crate) fn fill_packet<P: UbxPacketPayload + ?Sized>(packet: &P, out: &mut [u8]) {
    let payload_len = out.len() - UBX_FRAME_OVERHEAD;
    debug_assert_eq!(payload_len, packet.payload_len());
    packet.write_payload(&mut out[UBX_HEADER_LEN..UBX_HEADER_LEN + payload_len]);
    write_frame_envelope(P::CLASS, P::ID, out);
}

/// Fills in sync chars, class, id, length and checksum around the payload
/// already present in `out[UBX_HEADER_LEN..len - 2]`.
fn write_frame_envelope(class: u8, msg_id: u8, out: &mut [u8]) {
    let total = out.len();
    let payload_len = (total - UBX_FRAME_OVERHEAD) as u16;
    out[0] = UBX_SYNC_CHAR_1;
    out[1] = UBX_SYNC_CHAR_2;
    out[UBX_CLASS_OFFSET] = class;
    out[UBX_MSG_ID_OFFSET] = msg_id;
    out[UBX_LENGTH_OFFSET..UBX_HEADER_LEN].copy_from_slice(&payload_len.to_le_bytes());
    let (ck_a, ck_b) = ubx_checksum(&out[UBX_CLASS_OFFSET..total - UBX_CHECKSUM_LEN]);
    out[total - 2] = ck_a;
    out[total - 1] = ck_b;
}

/// Empty-payload request asking the receiver to output one message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UbxPoll(pub MessageKey);

impl UbxPoll {
    pub const PACKET_LEN: usize = UBX_FRAME_OVERHEAD;

    pub fn into_packet_bytes(self) -> [u8; Self::PACKET_LEN] {
        let mut ret = [0u8; Self::PACKET_LEN];
        write_frame_envelope(self.0.class(), self.0.msg_id(), &mut ret);
        ret
    }
}

/// A message decoded from a checksum-valid frame
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UbxPacket {
    NavPosLlh(NavPosLlh),
    NavSol(NavSol),
    NavVelNed(NavVelNed),
    RxmRaw(RxmRaw),
    RxmEph(RxmEph),
    CfgPrt(CfgPrt),
    CfgMsg(CfgMsg),
    CfgRst(CfgRst),
    CfgCfg(CfgCfg),
    MonVer(MonVer),
    AidIni(AidIni),
    AidHui(AidHui),
    AidAlm(AidAlm),
    AidEph(AidEph),
}

impl UbxPacket {
    pub fn key(&self) -> MessageKey {
        match self {
            UbxPacket::NavPosLlh(_) => NavPosLlh::KEY,
            UbxPacket::NavSol(_) => NavSol::KEY,
            UbxPacket::NavVelNed(_) => NavVelNed::KEY,
            UbxPacket::RxmRaw(_) => RxmRaw::KEY,
            UbxPacket::RxmEph(_) => RxmEph::KEY,
            UbxPacket::CfgPrt(_) => CfgPrt::KEY,
            UbxPacket::CfgMsg(_) => CfgMsg::KEY,
            UbxPacket::CfgRst(_) => CfgRst::KEY,
            UbxPacket::CfgCfg(_) => CfgCfg::KEY,
            UbxPacket::MonVer(_) => MonVer::KEY,
            UbxPacket::AidIni(_) => AidIni::KEY,
            UbxPacket::AidHui(_) => AidHui::KEY,
            UbxPacket::AidAlm(_) => AidAlm::KEY,
            UbxPacket::AidEph(_) => AidEph::KEY,
        }
    }

    pub fn class_and_msg_id(&self) -> (u8, u8) {
        self.key().class_and_msg_id()
    }

    pub fn name(&self) -> &'static str {
        self.key().name()
    }

    /// The typed command behind this packet, for the messages this crate can emit
    pub fn into_command(self) -> Option<Command> {
        match self {
            UbxPacket::CfgPrt(p) => Some(Command::CfgPrt(p)),
            UbxPacket::CfgMsg(p) => Some(Command::CfgMsg(p)),
            UbxPacket::CfgRst(p) => Some(Command::CfgRst(p)),
            UbxPacket::CfgCfg(p) => Some(Command::CfgCfg(p)),
            UbxPacket::AidIni(p) => Some(Command::AidIni(p)),
            UbxPacket::AidHui(p) => Some(Command::AidHui(p)),
            UbxPacket::AidAlm(p) => Some(Command::AidAlm(p)),
            UbxPacket::AidEph(p) => Some(Command::AidEph(p)),
            UbxPacket::NavPosLlh(_)
            | UbxPacket::NavSol(_)
            | UbxPacket::NavVelNed(_)
            | UbxPacket::RxmRaw(_)
            | UbxPacket::RxmEph(_)
            | UbxPacket::MonVer(_) => None,
        }
    }
}

/// Outgoing configuration / assistance message
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    CfgPrt(CfgPrt),
    CfgMsg(CfgMsg),
    CfgRst(CfgRst),
    CfgCfg(CfgCfg),
    AidIni(AidIni),
    AidHui(AidHui),
    AidAlm(AidAlm),
    AidEph(AidEph),
    Poll(UbxPoll),
}

impl Command {
    pub fn key(&self) -> MessageKey {
        match self {
            Command::CfgPrt(_) => CfgPrt::KEY,
            Command::CfgMsg(_) => CfgMsg::KEY,
            Command::CfgRst(_) => CfgRst::KEY,
            Command::CfgCfg(_) => CfgCfg::KEY,
            Command::AidIni(_) => AidIni::KEY,
            Command::AidHui(_) => AidHui::KEY,
            Command::AidAlm(_) => AidAlm::KEY,
            Command::AidEph(_) => AidEph::KEY,
            Command::Poll(poll) => poll.0,
        }
    }

    /// Serializes the command into exact wire bytes
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Command::CfgPrt(p) => p.to_packet_bytes(),
            Command::CfgMsg(p) => p.to_packet_bytes(),
            Command::CfgRst(p) => p.to_packet_bytes(),
            Command::CfgCfg(p) => p.to_packet_bytes(),
            Command::AidIni(p) => p.to_packet_bytes(),
            Command::AidHui(p) => p.to_packet_bytes(),
            Command::AidAlm(p) => p.to_packet_bytes(),
            Command::AidEph(p) => p.to_packet_bytes(),
            Command::Poll(poll) => poll.into_packet_bytes().to_vec(),
        }
    }
}

macro_rules! command_from {
    ($($packet:ident),*) => {
        $(
            impl From<$packet> for Command {
                fn from(packet: $packet) -> Self {
                    Command::$packet(packet)
                }
            }
        )*
    };
}

command_from!(CfgPrt, CfgMsg, CfgRst, CfgCfg, AidIni, AidHui, AidAlm, AidEph);

impl From<UbxPoll> for Command {
    fn from(poll: UbxPoll) -> Self {
        Command::Poll(poll)
    }
}

/// Encode any command into exact wire bytes
pub fn encode(command: &Command) -> Vec<u8> {
    command.encode()
}
