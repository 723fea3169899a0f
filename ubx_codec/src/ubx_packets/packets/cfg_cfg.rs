use bitflags::bitflags;

use super::{get_u32, put_u32};
use crate::{error::ParserError, MessageKey, UbxPacketMeta, UbxPacketPayload};

bitflags! {
    /// Configuration sections for CFG-CFG clear/save/load
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CfgCfgMask: u32 {
        /// Port settings
        const IO_PORT = 0x0001;
        /// Message configuration
        const MSG_CONF = 0x0002;
        /// INF message configuration
        const INF_MSG = 0x0004;
        /// Navigation configuration
        const NAV_CONF = 0x0008;
        /// Receiver manager configuration
        const RXM_CONF = 0x0010;
        /// Remote inventory configuration
        const RINV_CONF = 0x0200;
        /// Antenna configuration
        const ANT_CONF = 0x0400;
        /// Every section
        const ALL = 0x061F;
    }
}

/// Clear, Save and Load configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CfgCfg {
    /// Sections to restore to default in the current configuration
    pub clear_mask: CfgCfgMask,
    /// Sections to persist from the current configuration
    pub save_mask: CfgCfgMask,
    /// Sections to load from non-volatile memory
    pub load_mask: CfgCfgMask,
}

impl UbxPacketMeta for CfgCfg {
    const KEY: MessageKey = MessageKey::CfgCfg;
}

impl CfgCfg {
    pub fn from_payload(payload: &[u8]) -> Result<Self, ParserError> {
        Self::KEY.payload_len().check("CfgCfg", payload)?;
        Ok(Self {
            clear_mask: CfgCfgMask::from_bits_retain(get_u32(payload, 0)),
            save_mask: CfgCfgMask::from_bits_retain(get_u32(payload, 4)),
            load_mask: CfgCfgMask::from_bits_retain(get_u32(payload, 8)),
        })
    }

    pub fn save_all() -> Self {
        Self {
            clear_mask: CfgCfgMask::empty(),
            save_mask: CfgCfgMask::ALL,
            load_mask: CfgCfgMask::empty(),
        }
    }

    /// Revert to factory defaults: clear everything, then reload
    pub fn restore_defaults() -> Self {
        Self {
            clear_mask: CfgCfgMask::ALL,
            save_mask: CfgCfgMask::empty(),
            load_mask: CfgCfgMask::ALL,
        }
    }
}

impl UbxPacketPayload for CfgCfg {
    fn payload_len(&self) -> usize {
        12
    }

    fn write_payload(&self, out: &mut [u8]) {
        put_u32(out, 0, self.clear_mask.bits());
        put_u32(out, 4, self.save_mask.bits());
        put_u32(out, 8, self.load_mask.bits());
    }
}

impl_fixed_packet_bytes!(CfgCfg, 12);
