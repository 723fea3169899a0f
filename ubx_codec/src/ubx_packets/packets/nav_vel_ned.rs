use super::{get_i32, get_u32};
use crate::{error::ParserError, MessageKey, UbxPacketMeta};

/// Velocity Solution in NED
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavVelNed {
    /// GPS Millisecond Time of Week
    pub itow: u32,

    /// north velocity (cm/s)
    pub vel_north: i32,

    /// east velocity (cm/s)
    pub vel_east: i32,

    /// down velocity (cm/s)
    pub vel_down: i32,

    /// Speed 3-D (cm/s)
    pub speed_3d: u32,

    /// Ground speed (cm/s)
    pub ground_speed: u32,

    /// Heading of motion 2-D, degrees scaled by 1e5
    pub heading: i32,

    /// Speed Accuracy Estimate (cm/s)
    pub speed_accuracy: u32,

    /// Course / Heading Accuracy Estimate, degrees scaled by 1e5
    pub heading_accuracy: u32,
}

impl UbxPacketMeta for NavVelNed {
    const KEY: MessageKey = MessageKey::NavVelNed;
}

impl NavVelNed {
    pub fn from_payload(payload: &[u8]) -> Result<Self, ParserError> {
        Self::KEY.payload_len().check("NavVelNed", payload)?;
        Ok(Self {
            itow: get_u32(payload, 0),
            vel_north: get_i32(payload, 4),
            vel_east: get_i32(payload, 8),
            vel_down: get_i32(payload, 12),
            speed_3d: get_u32(payload, 16),
            ground_speed: get_u32(payload, 20),
            heading: get_i32(payload, 24),
            speed_accuracy: get_u32(payload, 28),
            heading_accuracy: get_u32(payload, 32),
        })
    }

    /// north velocity (m/s)
    pub fn vel_north_mps(&self) -> f64 {
        f64::from(self.vel_north) * 1e-2
    }

    /// east velocity (m/s)
    pub fn vel_east_mps(&self) -> f64 {
        f64::from(self.vel_east) * 1e-2
    }

    /// down velocity (m/s)
    pub fn vel_down_mps(&self) -> f64 {
        f64::from(self.vel_down) * 1e-2
    }

    pub fn speed_3d_mps(&self) -> f64 {
        f64::from(self.speed_3d) * 1e-2
    }

    pub fn ground_speed_mps(&self) -> f64 {
        f64::from(self.ground_speed) * 1e-2
    }

    pub fn heading_degrees(&self) -> f64 {
        f64::from(self.heading) * 1e-5
    }

    pub fn speed_accuracy_mps(&self) -> f64 {
        f64::from(self.speed_accuracy) * 1e-2
    }

    pub fn heading_accuracy_degrees(&self) -> f64 {
        f64::from(self.heading_accuracy) * 1e-5
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn heading_is_scaled_by_1e5() {
        let mut payload = [0u8; 36];
        payload[24..28].copy_from_slice(&18_000_000i32.to_le_bytes());
        payload[20..24].copy_from_slice(&1234u32.to_le_bytes());
        let vel = NavVelNed::from_payload(&payload).unwrap();
        assert_eq!(vel.heading, 18_000_000);
        assert!((vel.heading_degrees() - 180.0).abs() < 1e-9);
        assert!((vel.ground_speed_mps() - 12.34).abs() < 1e-9);
    }

    #[test]
    fn wrong_length() {
        assert!(matches!(
            NavVelNed::from_payload(&[0; 35]),
            Err(ParserError::LengthMismatch {
                packet: "NavVelNed",
                got: 35,
                ..
            })
        ));
    }
}
