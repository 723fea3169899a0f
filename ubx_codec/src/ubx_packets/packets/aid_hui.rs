use bitflags::bitflags;

use super::{
    get_f32, get_f64, get_i16, get_i32, get_u32, put_f32, put_f64, put_i16, put_i32, put_u32,
};
use crate::{error::ParserError, MessageKey, UbxPacketMeta, UbxPacketPayload};

/// GPS Health, UTC and ionosphere parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AidHui {
    /// Bitmask, every bit represents a GPS SV (1-32). A set bit means healthy.
    pub health: u32,

    /// UTC - parameter A0
    pub utc_a0: f64,

    /// UTC - parameter A1
    pub utc_a1: f64,

    /// UTC - reference time of week
    pub utc_tow: i32,

    /// UTC - reference week number
    pub utc_wnt: i16,

    /// UTC - time difference due to leap seconds before event
    pub utc_ls: i16,

    /// UTC - week number when next leap second event occurs
    pub utc_wnf: i16,

    /// UTC - day of week when next leap second event occurs
    pub utc_dn: i16,

    /// UTC - time difference due to leap seconds after event
    pub utc_lsf: i16,

    pub utc_spare: i16,

    /// Klobuchar - alpha 0..3
    pub klob_alpha: [f32; 4],

    /// Klobuchar - beta 0..3
    pub klob_beta: [f32; 4],

    pub flags: AidHuiFlags,
}

bitflags! {
    /// Which parameter groups of AID-HUI are valid
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct AidHuiFlags: u32 {
        const HEALTH_VALID = 1;
        const UTC_VALID = 2;
        const KLOB_VALID = 4;
    }
}

impl UbxPacketMeta for AidHui {
    const KEY: MessageKey = MessageKey::AidHui;
}

fn get_f32_quad(payload: &[u8], offset: usize) -> [f32; 4] {
    core::array::from_fn(|i| get_f32(payload, offset + 4 * i))
}

impl AidHui {
    pub fn from_payload(payload: &[u8]) -> Result<Self, ParserError> {
        Self::KEY.payload_len().check("AidHui", payload)?;
        Ok(Self {
            health: get_u32(payload, 0),
            utc_a0: get_f64(payload, 4),
            utc_a1: get_f64(payload, 12),
            utc_tow: get_i32(payload, 20),
            utc_wnt: get_i16(payload, 24),
            utc_ls: get_i16(payload, 26),
            utc_wnf: get_i16(payload, 28),
            utc_dn: get_i16(payload, 30),
            utc_lsf: get_i16(payload, 32),
            utc_spare: get_i16(payload, 34),
            klob_alpha: get_f32_quad(payload, 36),
            klob_beta: get_f32_quad(payload, 52),
            flags: AidHuiFlags::from_bits_retain(get_u32(payload, 68)),
        })
    }

    /// Health bit of GPS SV `prn` (1-32)
    pub fn is_healthy(&self, prn: u8) -> Option<bool> {
        match prn {
            1..=32 => Some(self.health & (1 << (prn - 1)) != 0),
            _ => None,
        }
    }
}

impl UbxPacketPayload for AidHui {
    fn payload_len(&self) -> usize {
        72
    }

    fn write_payload(&self, out: &mut [u8]) {
        put_u32(out, 0, self.health);
        put_f64(out, 4, self.utc_a0);
        put_f64(out, 12, self.utc_a1);
        put_i32(out, 20, self.utc_tow);
        put_i16(out, 24, self.utc_wnt);
        put_i16(out, 26, self.utc_ls);
        put_i16(out, 28, self.utc_wnf);
        put_i16(out, 30, self.utc_dn);
        put_i16(out, 32, self.utc_lsf);
        put_i16(out, 34, self.utc_spare);
        for (i, (alpha, beta)) in self.klob_alpha.iter().zip(&self.klob_beta).enumerate() {
            put_f32(out, 36 + 4 * i, *alpha);
            put_f32(out, 52 + 4 * i, *beta);
        }
        put_u32(out, 68, self.flags.bits());
    }
}

impl_fixed_packet_bytes!(AidHui, 72);
