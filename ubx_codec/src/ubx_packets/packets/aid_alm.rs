use super::{get_u32, get_u32_array, put_u32, put_u32_array};
use crate::{error::ParserError, MessageKey, UbxPacketMeta, UbxPacketPayload};

/// GPS Aiding Almanac Input/Output Message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AidAlm {
    /// SV ID for which this almanac data is
    pub svid: u32,

    /// Issue date of almanac, GPS week number. Zero means no almanac follows.
    pub week: u32,

    /// Almanac words 3..10 of the subframe, present only in the 40-byte form
    pub dwrd: Option<[u32; 8]>,
}

impl UbxPacketMeta for AidAlm {
    const KEY: MessageKey = MessageKey::AidAlm;
}

impl AidAlm {
    pub fn from_payload(payload: &[u8]) -> Result<Self, ParserError> {
        Self::KEY.payload_len().check("AidAlm", payload)?;
        let dwrd = (payload.len() == 40).then(|| get_u32_array(payload, 8));
        Ok(Self {
            svid: get_u32(payload, 0),
            week: get_u32(payload, 4),
            dwrd,
        })
    }
}

impl UbxPacketPayload for AidAlm {
    fn payload_len(&self) -> usize {
        if self.dwrd.is_some() {
            40
        } else {
            8
        }
    }

    fn write_payload(&self, out: &mut [u8]) {
        put_u32(out, 0, self.svid);
        put_u32(out, 4, self.week);
        if let Some(dwrd) = &self.dwrd {
            put_u32_array(out, 8, dwrd);
        }
    }
}
