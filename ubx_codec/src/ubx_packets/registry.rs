//! Static table of the messages this crate understands.
//!
//! Every supported `(class, id)` pair is a variant of [`MessageKey`]; the
//! accepted payload lengths and the decode routine are resolved with an
//! exhaustive `match`, so adding a key without a decoder does not compile.

use core::fmt;

use super::{
    AidAlm, AidEph, AidHui, AidIni, CfgCfg, CfgMsg, CfgPrt, CfgRst, MonVer, NavPosLlh, NavSol,
    NavVelNed, RxmEph, RxmRaw, UbxPacket,
};
use crate::error::ParserError;

/// Message key: `class << 8 | id`
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MessageKey {
    /// NAV-POSLLH, 258
    NavPosLlh = 0x0102,
    /// NAV-SOL, 262
    NavSol = 0x0106,
    /// NAV-VELNED, 274
    NavVelNed = 0x0112,
    /// RXM-RAW, 528
    RxmRaw = 0x0210,
    /// RXM-EPH, 561
    RxmEph = 0x0231,
    CfgPrt = 0x0600,
    CfgMsg = 0x0601,
    CfgRst = 0x0604,
    CfgCfg = 0x0609,
    /// MON-VER, 2564
    MonVer = 0x0A04,
    AidIni = 0x0B01,
    AidHui = 0x0B02,
    AidAlm = 0x0B30,
    AidEph = 0x0B31,
}

impl MessageKey {
    pub const ALL: [MessageKey; 14] = [
        MessageKey::NavPosLlh,
        MessageKey::NavSol,
        MessageKey::NavVelNed,
        MessageKey::RxmRaw,
        MessageKey::RxmEph,
        MessageKey::CfgPrt,
        MessageKey::CfgMsg,
        MessageKey::CfgRst,
        MessageKey::CfgCfg,
        MessageKey::MonVer,
        MessageKey::AidIni,
        MessageKey::AidHui,
        MessageKey::AidAlm,
        MessageKey::AidEph,
    ];

    pub const fn from_raw(raw: u16) -> Option<Self> {
        let key = match raw {
            0x0102 => MessageKey::NavPosLlh,
            0x0106 => MessageKey::NavSol,
            0x0112 => MessageKey::NavVelNed,
            0x0210 => MessageKey::RxmRaw,
            0x0231 => MessageKey::RxmEph,
            0x0600 => MessageKey::CfgPrt,
            0x0601 => MessageKey::CfgMsg,
            0x0604 => MessageKey::CfgRst,
            0x0609 => MessageKey::CfgCfg,
            0x0A04 => MessageKey::MonVer,
            0x0B01 => MessageKey::AidIni,
            0x0B02 => MessageKey::AidHui,
            0x0B30 => MessageKey::AidAlm,
            0x0B31 => MessageKey::AidEph,
            _ => return None,
        };
        Some(key)
    }

    #[inline]
    pub const fn from_class_and_msg_id(class: u8, msg_id: u8) -> Option<Self> {
        Self::from_raw(u16::from_be_bytes([class, msg_id]))
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self as u16
    }

    #[inline]
    pub const fn class(self) -> u8 {
        (self.raw() >> 8) as u8
    }

    #[inline]
    pub const fn msg_id(self) -> u8 {
        (self.raw() & 0xff) as u8
    }

    pub const fn class_and_msg_id(self) -> (u8, u8) {
        (self.class(), self.msg_id())
    }

    pub const fn name(self) -> &'static str {
        match self {
            MessageKey::NavPosLlh => "NavPosLlh",
            MessageKey::NavSol => "NavSol",
            MessageKey::NavVelNed => "NavVelNed",
            MessageKey::RxmRaw => "RxmRaw",
            MessageKey::RxmEph => "RxmEph",
            MessageKey::CfgPrt => "CfgPrt",
            MessageKey::CfgMsg => "CfgMsg",
            MessageKey::CfgRst => "CfgRst",
            MessageKey::CfgCfg => "CfgCfg",
            MessageKey::MonVer => "MonVer",
            MessageKey::AidIni => "AidIni",
            MessageKey::AidHui => "AidHui",
            MessageKey::AidAlm => "AidAlm",
            MessageKey::AidEph => "AidEph",
        }
    }

    /// Payload lengths the receiver may put on the wire for this key
    pub const fn payload_len(self) -> PayloadLen {
        match self {
            MessageKey::NavPosLlh => PayloadLen::Fixed(28),
            MessageKey::NavSol => PayloadLen::Fixed(52),
            MessageKey::NavVelNed => PayloadLen::Fixed(36),
            MessageKey::RxmRaw => PayloadLen::Counted {
                fixed: 8,
                block: 24,
                count_offset: 6,
            },
            MessageKey::RxmEph | MessageKey::AidEph => PayloadLen::OneOf(&[8, 104]),
            MessageKey::CfgPrt => PayloadLen::Fixed(20),
            MessageKey::CfgMsg => PayloadLen::Fixed(3),
            MessageKey::CfgRst => PayloadLen::Fixed(4),
            MessageKey::CfgCfg => PayloadLen::Fixed(12),
            MessageKey::MonVer => PayloadLen::Repeated {
                fixed: 40,
                block: 30,
                max_blocks: 40,
            },
            MessageKey::AidIni => PayloadLen::Fixed(48),
            MessageKey::AidHui => PayloadLen::Fixed(72),
            MessageKey::AidAlm => PayloadLen::OneOf(&[8, 40]),
        }
    }

    /// Whether a typed encoder exists for this key
    pub const fn can_encode(self) -> bool {
        matches!(
            self,
            MessageKey::CfgPrt
                | MessageKey::CfgMsg
                | MessageKey::CfgRst
                | MessageKey::CfgCfg
                | MessageKey::AidIni
                | MessageKey::AidHui
                | MessageKey::AidAlm
                | MessageKey::AidEph
        )
    }

    /// Decode a payload (without header and checksum) as this message
    pub fn decode(self, payload: &[u8]) -> Result<UbxPacket, ParserError> {
        match self {
            MessageKey::NavPosLlh => NavPosLlh::from_payload(payload).map(UbxPacket::NavPosLlh),
            MessageKey::NavSol => NavSol::from_payload(payload).map(UbxPacket::NavSol),
            MessageKey::NavVelNed => NavVelNed::from_payload(payload).map(UbxPacket::NavVelNed),
            MessageKey::RxmRaw => RxmRaw::from_payload(payload).map(UbxPacket::RxmRaw),
            MessageKey::RxmEph => RxmEph::from_payload(payload).map(UbxPacket::RxmEph),
            MessageKey::CfgPrt => CfgPrt::from_payload(payload).map(UbxPacket::CfgPrt),
            MessageKey::CfgMsg => CfgMsg::from_payload(payload).map(UbxPacket::CfgMsg),
            MessageKey::CfgRst => CfgRst::from_payload(payload).map(UbxPacket::CfgRst),
            MessageKey::CfgCfg => CfgCfg::from_payload(payload).map(UbxPacket::CfgCfg),
            MessageKey::MonVer => MonVer::from_payload(payload).map(UbxPacket::MonVer),
            MessageKey::AidIni => AidIni::from_payload(payload).map(UbxPacket::AidIni),
            MessageKey::AidHui => AidHui::from_payload(payload).map(UbxPacket::AidHui),
            MessageKey::AidAlm => AidAlm::from_payload(payload).map(UbxPacket::AidAlm),
            MessageKey::AidEph => AidEph::from_payload(payload).map(UbxPacket::AidEph),
        }
    }
}

impl TryFrom<u16> for MessageKey {
    type Error = u16;

    fn try_from(raw: u16) -> Result<Self, Self::Error> {
        Self::from_raw(raw).ok_or(raw)
    }
}

impl From<MessageKey> for u16 {
    fn from(key: MessageKey) -> Self {
        key.raw()
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#06x})", self.name(), self.raw())
    }
}

/// Payload length predicate of a message key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadLen {
    Fixed(u16),
    /// One of a small set of lengths, each selecting its own layout
    OneOf(&'static [u16]),
    /// `fixed` bytes followed by any number (up to `max_blocks`) of `block`-sized repeats
    Repeated {
        fixed: u16,
        block: u16,
        max_blocks: u16,
    },
    /// `fixed` bytes followed by `payload[count_offset]` repeats of `block` bytes
    Counted {
        fixed: u16,
        block: u16,
        count_offset: usize,
    },
}

impl PayloadLen {
    pub fn accepts(self, payload: &[u8]) -> bool {
        let got = payload.len();
        match self {
            PayloadLen::Fixed(len) => got == usize::from(len),
            PayloadLen::OneOf(lens) => lens.iter().any(|len| usize::from(*len) == got),
            PayloadLen::Repeated {
                fixed,
                block,
                max_blocks,
            } => {
                let (fixed, block) = (usize::from(fixed), usize::from(block));
                got >= fixed
                    && (got - fixed) % block == 0
                    && (got - fixed) / block <= usize::from(max_blocks)
            },
            PayloadLen::Counted {
                fixed,
                block,
                count_offset,
            } => {
                let fixed = usize::from(fixed);
                got >= fixed
                    && got == fixed + usize::from(payload[count_offset]) * usize::from(block)
            },
        }
    }

    /// Whether a payload of `len` bytes could be accepted, judging by the
    /// declared length alone. Count fields are checked later by [`Self::accepts`].
    pub fn admits_len(self, len: usize) -> bool {
        match self {
            PayloadLen::Fixed(fixed) => len == usize::from(fixed),
            PayloadLen::OneOf(lens) => lens.iter().any(|l| usize::from(*l) == len),
            PayloadLen::Repeated { fixed, block, .. }
            | PayloadLen::Counted { fixed, block, .. } => {
                let (fixed, block) = (usize::from(fixed), usize::from(block));
                len >= fixed && (len - fixed) % block == 0 && len <= usize::from(self.max())
            },
        }
    }

    /// The only accepted length, for fixed-size messages
    pub const fn fixed(self) -> Option<u16> {
        match self {
            PayloadLen::Fixed(len) => Some(len),
            _ => None,
        }
    }

    /// Largest accepted length
    pub const fn max(self) -> u16 {
        match self {
            PayloadLen::Fixed(len) => len,
            PayloadLen::OneOf(lens) => {
                let mut max = 0;
                let mut i = 0;
                while i < lens.len() {
                    if lens[i] > max {
                        max = lens[i];
                    }
                    i += 1;
                }
                max
            },
            PayloadLen::Repeated {
                fixed,
                block,
                max_blocks,
            } => fixed + block * max_blocks,
            PayloadLen::Counted { fixed, block, .. } => fixed + block * (u8::MAX as u16),
        }
    }

    pub(crate) fn check(self, packet: &'static str, payload: &[u8]) -> Result<(), ParserError> {
        if self.accepts(payload) {
            Ok(())
        } else {
            Err(ParserError::LengthMismatch {
                packet,
                expect: self,
                got: payload.len(),
            })
        }
    }
}

impl fmt::Display for PayloadLen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadLen::Fixed(len) => write!(f, "{}", len),
            PayloadLen::OneOf(lens) => write!(f, "one of {:?}", lens),
            PayloadLen::Repeated { fixed, block, .. } => write!(f, "{} + {}*n", fixed, block),
            PayloadLen::Counted {
                fixed,
                block,
                count_offset,
            } => write!(f, "{} + {}*payload[{}]", fixed, block, count_offset),
        }
    }
}

/// Resolve `(class, msg_id)` in the registry and decode `payload` with it.
pub fn match_packet(class: u8, msg_id: u8, payload: &[u8]) -> Result<UbxPacket, ParserError> {
    match MessageKey::from_class_and_msg_id(class, msg_id) {
        Some(key) => key.decode(payload),
        None => Err(ParserError::UnknownMessage {
            class,
            msg_id,
            payload: payload.to_vec(),
        }),
    }
}
