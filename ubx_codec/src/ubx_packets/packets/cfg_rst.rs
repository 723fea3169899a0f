use bitflags::bitflags;

use super::{get_u16, get_u8, put_u16, put_u8};
use crate::{error::ParserError, MessageKey, UbxPacketMeta, UbxPacketPayload};

/// Reset Receiver / Clear Backup Data Structures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CfgRst {
    /// Battery backed RAM sections to clear
    pub nav_bbr_mask: NavBbrMask,
    pub reset_mode: ResetMode,
}

impl UbxPacketMeta for CfgRst {
    const KEY: MessageKey = MessageKey::CfgRst;
}

impl CfgRst {
    pub const HOT: Self = Self {
        nav_bbr_mask: NavBbrPredefinedMask::HOT_START.mask(),
        reset_mode: ResetMode::HardwareResetImmediately,
    };

    pub const WARM: Self = Self {
        nav_bbr_mask: NavBbrPredefinedMask::WARM_START.mask(),
        reset_mode: ResetMode::HardwareResetImmediately,
    };

    pub const COLD: Self = Self {
        nav_bbr_mask: NavBbrPredefinedMask::COLD_START.mask(),
        reset_mode: ResetMode::HardwareResetImmediately,
    };

    pub fn from_payload(payload: &[u8]) -> Result<Self, ParserError> {
        Self::KEY.payload_len().check("CfgRst", payload)?;
        Ok(Self {
            nav_bbr_mask: NavBbrMask::from_bits_retain(get_u16(payload, 0)),
            reset_mode: ResetMode::try_from(get_u8(payload, 2)).map_err(|_| {
                ParserError::InvalidField {
                    packet: "CfgRst",
                    field: "reset_mode",
                }
            })?,
            // 3: reserved1
        })
    }
}

impl UbxPacketPayload for CfgRst {
    fn payload_len(&self) -> usize {
        4
    }

    fn write_payload(&self, out: &mut [u8]) {
        put_u16(out, 0, self.nav_bbr_mask.bits());
        put_u8(out, 2, self.reset_mode.into());
    }
}

impl_fixed_packet_bytes!(CfgRst, 4);

bitflags! {
    /// Battery-backed RAM sections to clear
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct NavBbrMask: u16 {
        const EPHEMERIS = 1;
        const ALMANAC = 2;
        const HEALTH = 4;
        const KLOBUCHAR = 8;
        const POSITION = 16;
        const CLOCK_DRIFT = 32;
        const OSCILLATOR_PARAMETER = 64;
        const UTC_CORRECTION_PARAMETERS = 0x80;
        const RTC = 0x100;
        const SFDR_PARAMETERS = 0x800;
        const SFDR_VEHICLE_MONITORING_PARAMETERS = 0x1000;
        const TCT_PARAMETERS = 0x2000;
        const AUTONOMOUS_ORBIT_PARAMETERS = 0x8000;
    }
}

/// Predefined values for `NavBbrMask`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavBbrPredefinedMask(u16);

impl NavBbrPredefinedMask {
    pub const HOT_START: NavBbrPredefinedMask = NavBbrPredefinedMask(0);
    pub const WARM_START: NavBbrPredefinedMask = NavBbrPredefinedMask(1);
    pub const COLD_START: NavBbrPredefinedMask = NavBbrPredefinedMask(0xFFFF);

    pub const fn mask(self) -> NavBbrMask {
        NavBbrMask::from_bits_retain(self.0)
    }
}

impl From<NavBbrPredefinedMask> for NavBbrMask {
    fn from(x: NavBbrPredefinedMask) -> Self {
        x.mask()
    }
}

/// Reset Type
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResetMode {
    /// Hardware reset (Watchdog) immediately
    HardwareResetImmediately,
    ControlledSoftwareReset,
    ControlledSoftwareResetGpsOnly,
    /// Hardware reset (Watchdog) after shutdown (>=FW6.0)
    HardwareResetAfterShutdown,
    ControlledGpsStop,
    ControlledGpsStart,
}

impl From<ResetMode> for u8 {
    fn from(mode: ResetMode) -> Self {
        match mode {
            ResetMode::HardwareResetImmediately => 0,
            ResetMode::ControlledSoftwareReset => 1,
            ResetMode::ControlledSoftwareResetGpsOnly => 2,
            ResetMode::HardwareResetAfterShutdown => 4,
            ResetMode::ControlledGpsStop => 8,
            ResetMode::ControlledGpsStart => 9,
        }
    }
}

impl TryFrom<u8> for ResetMode {
    type Error = u8;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(ResetMode::HardwareResetImmediately),
            1 => Ok(ResetMode::ControlledSoftwareReset),
            2 => Ok(ResetMode::ControlledSoftwareResetGpsOnly),
            4 => Ok(ResetMode::HardwareResetAfterShutdown),
            8 => Ok(ResetMode::ControlledGpsStop),
            9 => Ok(ResetMode::ControlledGpsStart),
            x => Err(x),
        }
    }
}
