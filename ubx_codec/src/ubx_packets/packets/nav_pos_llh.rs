use super::{get_i32, get_u32};
use crate::{error::ParserError, MessageKey, UbxPacketMeta};

/// Geodetic Position Solution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavPosLlh {
    /// GPS Millisecond Time of Week
    pub itow: u32,

    /// Longitude, degrees scaled by 1e7
    pub lon: i32,

    /// Latitude, degrees scaled by 1e7
    pub lat: i32,

    /// Height above Ellipsoid (mm)
    pub height: i32,

    /// Height above mean sea level (mm)
    pub height_msl: i32,

    /// Horizontal Accuracy Estimate (mm)
    pub h_acc: u32,

    /// Vertical Accuracy Estimate (mm)
    pub v_acc: u32,
}

impl UbxPacketMeta for NavPosLlh {
    const KEY: MessageKey = MessageKey::NavPosLlh;
}

impl NavPosLlh {
    pub fn from_payload(payload: &[u8]) -> Result<Self, ParserError> {
        Self::KEY.payload_len().check("NavPosLlh", payload)?;
        Ok(Self {
            itow: get_u32(payload, 0),
            lon: get_i32(payload, 4),
            lat: get_i32(payload, 8),
            height: get_i32(payload, 12),
            height_msl: get_i32(payload, 16),
            h_acc: get_u32(payload, 20),
            v_acc: get_u32(payload, 24),
        })
    }

    #[inline]
    pub fn lon_degrees(&self) -> f64 {
        f64::from(self.lon) * 1e-7
    }

    #[inline]
    pub fn lat_degrees(&self) -> f64 {
        f64::from(self.lat) * 1e-7
    }

    #[inline]
    pub fn height_meters(&self) -> f64 {
        f64::from(self.height) * 1e-3
    }

    #[inline]
    pub fn height_msl_meters(&self) -> f64 {
        f64::from(self.height_msl) * 1e-3
    }

    #[inline]
    pub fn h_acc_meters(&self) -> f64 {
        f64::from(self.h_acc) * 1e-3
    }

    #[inline]
    pub fn v_acc_meters(&self) -> f64 {
        f64::from(self.v_acc) * 1e-3
    }
}
