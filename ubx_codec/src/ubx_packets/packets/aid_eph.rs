use super::rxm_eph::{ephemeris_len, read_ephemeris, write_ephemeris, EphemerisSubframes};
use crate::{error::ParserError, MessageKey, UbxPacketMeta, UbxPacketPayload};

/// GPS Aiding Ephemeris Input/Output Message
///
/// Sent to the receiver to upload ephemeris; without subframes it is the
/// 8-byte form, which also acts as a per-SV poll reply with no data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AidEph {
    pub svid: u32,
    pub how: u32,
    pub subframes: Option<EphemerisSubframes>,
}

impl UbxPacketMeta for AidEph {
    const KEY: MessageKey = MessageKey::AidEph;
}

impl AidEph {
    pub fn from_payload(payload: &[u8]) -> Result<Self, ParserError> {
        Self::KEY.payload_len().check("AidEph", payload)?;
        let (svid, how, subframes) = read_ephemeris(payload);
        Ok(Self {
            svid,
            how,
            subframes,
        })
    }

    /// The "no ephemeris" form for `svid`
    pub fn empty(svid: u32) -> Self {
        Self {
            svid,
            how: 0,
            subframes: None,
        }
    }
}

impl UbxPacketPayload for AidEph {
    fn payload_len(&self) -> usize {
        ephemeris_len(self.subframes.as_ref())
    }

    fn write_payload(&self, out: &mut [u8]) {
        write_ephemeris(self.svid, self.how, self.subframes.as_ref(), out);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::UbxPacketCreator;

    #[test]
    fn empty_frame() {
        let bytes = AidEph::empty(3).to_packet_bytes();
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[..6], &[0xb5, 0x62, 0x0b, 0x31, 0x08, 0x00]);
        assert_eq!(&bytes[6..14], &[3, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn full_payload_roundtrip() {
        let eph = AidEph {
            svid: 12,
            how: 0x2c_d4e0,
            subframes: Some(EphemerisSubframes {
                sf1: [1, 2, 3, 4, 5, 6, 7, 8],
                sf2: [0x00ff_ffff; 8],
                sf3: [9, 10, 11, 12, 13, 14, 15, 16],
            }),
        };
        let bytes = eph.to_packet_bytes();
        assert_eq!(bytes.len(), 104 + 8);
        assert_eq!(AidEph::from_payload(&bytes[6..110]).unwrap(), eph);
    }
}
