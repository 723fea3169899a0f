use bitflags::bitflags;

use super::{get_i16, get_i32, get_u16, get_u32, get_u8};
use crate::{error::ParserError, MessageKey, UbxPacketMeta};

/// Navigation Solution Information
///
/// Position, velocity and time solution in ECEF, including accuracy figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavSol {
    /// GPS Millisecond Time of Week
    pub itow: u32,

    /// Fractional part of iTOW (range: +/-500000), ns
    pub ftow_ns: i32,

    /// GPS week number of the navigation epoch
    pub week: i16,

    pub fix_type: GpsFix,

    pub flags: NavStatusFlags,

    /// ECEF X coordinate (cm)
    pub ecef_x: i32,

    /// ECEF Y coordinate (cm)
    pub ecef_y: i32,

    /// ECEF Z coordinate (cm)
    pub ecef_z: i32,

    /// 3D Position Accuracy Estimate (cm)
    pub position_accuracy: u32,

    /// ECEF X velocity (cm/s)
    pub ecef_vx: i32,

    /// ECEF Y velocity (cm/s)
    pub ecef_vy: i32,

    /// ECEF Z velocity (cm/s)
    pub ecef_vz: i32,

    /// Speed Accuracy Estimate (cm/s)
    pub speed_accuracy: u32,

    /// Position DOP, scaled by 100
    pub pdop: u16,

    /// Number of SVs used in Nav Solution
    pub num_sv: u8,
}

impl UbxPacketMeta for NavSol {
    const KEY: MessageKey = MessageKey::NavSol;
}

impl NavSol {
    pub fn from_payload(payload: &[u8]) -> Result<Self, ParserError> {
        Self::KEY.payload_len().check("NavSol", payload)?;
        Ok(Self {
            itow: get_u32(payload, 0),
            ftow_ns: get_i32(payload, 4),
            week: get_i16(payload, 8),
            fix_type: GpsFix::from(get_u8(payload, 10)),
            flags: NavStatusFlags::from_bits_retain(get_u8(payload, 11)),
            ecef_x: get_i32(payload, 12),
            ecef_y: get_i32(payload, 16),
            ecef_z: get_i32(payload, 20),
            position_accuracy: get_u32(payload, 24),
            ecef_vx: get_i32(payload, 28),
            ecef_vy: get_i32(payload, 32),
            ecef_vz: get_i32(payload, 36),
            speed_accuracy: get_u32(payload, 40),
            pdop: get_u16(payload, 44),
            // 46: reserved1
            num_sv: get_u8(payload, 47),
            // 48..52: reserved2
        })
    }

    pub fn ecef_x_meters(&self) -> f64 {
        f64::from(self.ecef_x) * 1e-2
    }

    pub fn ecef_y_meters(&self) -> f64 {
        f64::from(self.ecef_y) * 1e-2
    }

    pub fn ecef_z_meters(&self) -> f64 {
        f64::from(self.ecef_z) * 1e-2
    }

    pub fn position_accuracy_meters(&self) -> f64 {
        f64::from(self.position_accuracy) * 1e-2
    }

    pub fn ecef_vx_mps(&self) -> f64 {
        f64::from(self.ecef_vx) * 1e-2
    }

    pub fn ecef_vy_mps(&self) -> f64 {
        f64::from(self.ecef_vy) * 1e-2
    }

    pub fn ecef_vz_mps(&self) -> f64 {
        f64::from(self.ecef_vz) * 1e-2
    }

    pub fn speed_accuracy_mps(&self) -> f64 {
        f64::from(self.speed_accuracy) * 1e-2
    }

    pub fn position_dop(&self) -> f32 {
        f32::from(self.pdop) * 1e-2
    }

    /// Fix is valid and within DOP and accuracy masks
    pub fn is_fix_ok(&self) -> bool {
        self.flags.contains(NavStatusFlags::GPS_FIX_OK)
    }
}

/// GPS fix Type
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GpsFix {
    NoFix,
    DeadReckoningOnly,
    Fix2D,
    Fix3D,
    GpsPlusDeadReckoning,
    TimeOnlyFix,
    Reserved(u8),
}

impl From<u8> for GpsFix {
    fn from(x: u8) -> Self {
        match x {
            0 => GpsFix::NoFix,
            1 => GpsFix::DeadReckoningOnly,
            2 => GpsFix::Fix2D,
            3 => GpsFix::Fix3D,
            4 => GpsFix::GpsPlusDeadReckoning,
            5 => GpsFix::TimeOnlyFix,
            x => GpsFix::Reserved(x),
        }
    }
}

impl From<GpsFix> for u8 {
    fn from(fix: GpsFix) -> Self {
        match fix {
            GpsFix::NoFix => 0,
            GpsFix::DeadReckoningOnly => 1,
            GpsFix::Fix2D => 2,
            GpsFix::Fix3D => 3,
            GpsFix::GpsPlusDeadReckoning => 4,
            GpsFix::TimeOnlyFix => 5,
            GpsFix::Reserved(x) => x,
        }
    }
}

bitflags! {
    /// Navigation Status Flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct NavStatusFlags: u8 {
        /// position and velocity valid and within DOP and ACC Masks
        const GPS_FIX_OK = 1;
        /// DGPS used
        const DIFF_SOLN = 2;
        /// Week Number valid
        const WKN_SET = 4;
        /// Time of Week valid
        const TOW_SET = 8;
    }
}
