use bitflags::bitflags;

use super::{get_u16, get_u32, get_u8, put_u16, put_u32, put_u8};
use crate::{error::ParserError, MessageKey, UbxPacketMeta, UbxPacketPayload};

/// Port Configuration for a UART or USB port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CfgPrt {
    /// Port Identifier Number (0 or 1 for UART, 3 for USB)
    pub port_id: u8,
    /// TX ready PIN configuration
    pub tx_ready: u16,
    /// UART mode: character length, parity, stop bits
    pub mode: u32,
    /// Baudrate in bits/second, unused for USB
    pub baud_rate: u32,
    pub in_proto_mask: InProtoMask,
    pub out_proto_mask: OutProtoMask,
    pub flags: u16,
}

impl UbxPacketMeta for CfgPrt {
    const KEY: MessageKey = MessageKey::CfgPrt;
}

impl CfgPrt {
    pub const PORT_UART1: u8 = 1;
    pub const PORT_USB: u8 = 3;

    /// 8 data bits, no parity, 1 stop bit
    pub const MODE_8N1: u32 = 0x0000_08D0;

    pub fn from_payload(payload: &[u8]) -> Result<Self, ParserError> {
        Self::KEY.payload_len().check("CfgPrt", payload)?;
        Ok(Self {
            port_id: get_u8(payload, 0),
            // 1: reserved1
            tx_ready: get_u16(payload, 2),
            mode: get_u32(payload, 4),
            baud_rate: get_u32(payload, 8),
            in_proto_mask: InProtoMask::from_bits_retain(get_u16(payload, 12)),
            out_proto_mask: OutProtoMask::from_bits_retain(get_u16(payload, 14)),
            flags: get_u16(payload, 16),
            // 18..20: reserved2
        })
    }

    /// UART1 at `baud_rate`, 8N1, with the given protocols enabled
    pub fn uart1(baud_rate: u32, in_proto_mask: InProtoMask, out_proto_mask: OutProtoMask) -> Self {
        Self {
            port_id: Self::PORT_UART1,
            tx_ready: 0,
            mode: Self::MODE_8N1,
            baud_rate,
            in_proto_mask,
            out_proto_mask,
            flags: 0,
        }
    }
}

impl UbxPacketPayload for CfgPrt {
    fn payload_len(&self) -> usize {
        20
    }

    fn write_payload(&self, out: &mut [u8]) {
        put_u8(out, 0, self.port_id);
        put_u16(out, 2, self.tx_ready);
        put_u32(out, 4, self.mode);
        put_u32(out, 8, self.baud_rate);
        put_u16(out, 12, self.in_proto_mask.bits());
        put_u16(out, 14, self.out_proto_mask.bits());
        put_u16(out, 16, self.flags);
    }
}

impl_fixed_packet_bytes!(CfgPrt, 20);

bitflags! {
    /// A mask describing which input protocols are active
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct InProtoMask: u16 {
        const UBLOX = 1;
        const NMEA = 2;
        const RTCM = 4;
    }
}

bitflags! {
    /// A mask describing which output protocols are active
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct OutProtoMask: u16 {
        const UBLOX = 1;
        const NMEA = 2;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reserved_bytes_are_zero() {
        let prt = CfgPrt {
            port_id: 1,
            tx_ready: 0xffff,
            mode: u32::MAX,
            baud_rate: u32::MAX,
            in_proto_mask: InProtoMask::all(),
            out_proto_mask: OutProtoMask::all(),
            flags: 0xffff,
        };
        let bytes = prt.into_packet_bytes();
        let payload = &bytes[6..26];
        assert_eq!(payload[1], 0);
        assert_eq!(&payload[18..20], &[0, 0]);
        assert_eq!(CfgPrt::from_payload(payload).unwrap(), prt);
    }

    #[test]
    fn uart1_layout() {
        let prt = CfgPrt::uart1(
            115_200,
            InProtoMask::UBLOX,
            OutProtoMask::UBLOX | OutProtoMask::NMEA,
        );
        let bytes = prt.into_packet_bytes();
        assert_eq!(
            &bytes[6..26],
            &[1, 0, 0, 0, 0xd0, 0x08, 0, 0, 0x00, 0xc2, 0x01, 0x00, 1, 0, 3, 0, 0, 0, 0, 0]
        );
    }
}
