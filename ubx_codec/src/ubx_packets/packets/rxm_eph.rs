use super::{get_u32, get_u32_array, put_u32, put_u32_array};
use crate::{error::ParserError, MessageKey, UbxPacketMeta};

/// Payload length when the receiver has no ephemeris for the satellite
pub(crate) const EPH_SHORT_LEN: usize = 8;
/// Payload length with all three subframes present
pub(crate) const EPH_FULL_LEN: usize = 104;

/// Subframes 1 to 3 of the GPS navigation message, eight 32-bit words each,
/// without parity bits. Bit-level meaning is left to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EphemerisSubframes {
    pub sf1: [u32; 8],
    pub sf2: [u32; 8],
    pub sf3: [u32; 8],
}

impl EphemerisSubframes {
    fn read(payload: &[u8]) -> Self {
        Self {
            sf1: get_u32_array(payload, 8),
            sf2: get_u32_array(payload, 40),
            sf3: get_u32_array(payload, 72),
        }
    }

    fn write(&self, out: &mut [u8]) {
        put_u32_array(out, 8, &self.sf1);
        put_u32_array(out, 40, &self.sf2);
        put_u32_array(out, 72, &self.sf3);
    }
}

/// Shared body of RXM-EPH and AID-EPH: both use the same two layouts
pub(crate) fn read_ephemeris(payload: &[u8]) -> (u32, u32, Option<EphemerisSubframes>) {
    let subframes = if payload.len() == EPH_FULL_LEN {
        Some(EphemerisSubframes::read(payload))
    } else {
        None
    };
    (get_u32(payload, 0), get_u32(payload, 4), subframes)
}

pub(crate) fn write_ephemeris(
    svid: u32,
    how: u32,
    subframes: Option<&EphemerisSubframes>,
    out: &mut [u8],
) {
    put_u32(out, 0, svid);
    put_u32(out, 4, how);
    if let Some(subframes) = subframes {
        subframes.write(out);
    }
}

pub(crate) fn ephemeris_len(subframes: Option<&EphemerisSubframes>) -> usize {
    if subframes.is_some() {
        EPH_FULL_LEN
    } else {
        EPH_SHORT_LEN
    }
}

/// GPS Aiding Ephemeris Input/Output Message, as output by the receiver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RxmEph {
    /// SV ID for which this ephemeris data is
    pub svid: u32,

    /// Hand-Over Word of first Subframe. Zero means no ephemeris follows.
    pub how: u32,

    /// Present only in the 104-byte form
    pub subframes: Option<EphemerisSubframes>,
}

impl UbxPacketMeta for RxmEph {
    const KEY: MessageKey = MessageKey::RxmEph;
}

impl RxmEph {
    pub fn from_payload(payload: &[u8]) -> Result<Self, ParserError> {
        Self::KEY.payload_len().check("RxmEph", payload)?;
        let (svid, how, subframes) = read_ephemeris(payload);
        Ok(Self {
            svid,
            how,
            subframes,
        })
    }

    pub fn has_ephemeris(&self) -> bool {
        self.subframes.is_some()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn short_form() {
        let mut payload = [0u8; 8];
        payload[0] = 17;
        let eph = RxmEph::from_payload(&payload).unwrap();
        assert_eq!(eph.svid, 17);
        assert_eq!(eph.how, 0);
        assert!(!eph.has_ephemeris());
    }

    #[test]
    fn full_form() {
        let mut payload = [0u8; 104];
        payload[0] = 5;
        payload[4..8].copy_from_slice(&0x0012_3456u32.to_le_bytes());
        payload[8..12].copy_from_slice(&0xaabb_ccddu32.to_le_bytes());
        payload[100..104].copy_from_slice(&7u32.to_le_bytes());
        let eph = RxmEph::from_payload(&payload).unwrap();
        let subframes = eph.subframes.unwrap();
        assert_eq!(eph.how, 0x0012_3456);
        assert_eq!(subframes.sf1[0], 0xaabb_ccdd);
        assert_eq!(subframes.sf3[7], 7);
    }
}
