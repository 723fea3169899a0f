use bitflags::bitflags;
use chrono::{DateTime, Datelike, Timelike, Utc};

use super::{get_i32, get_u16, get_u32, put_i32, put_u16, put_u32, ScaleBack};
use crate::{
    error::{DateTimeError, ParserError},
    MessageKey, Position, UbxPacketMeta, UbxPacketPayload,
};

/// Aiding position, time, frequency, clock drift
///
/// Position is either ECEF (cm) or, with [`AidIniFlags::LLA`], latitude and
/// longitude in degrees scaled by 1e7 and altitude in cm. Time is either
/// GPS week/TOW or, with [`AidIniFlags::UTC`], a packed UTC date and time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AidIni {
    pub ecef_x_or_lat: i32,
    pub ecef_y_or_lon: i32,
    pub ecef_z_or_alt: i32,
    /// Position accuracy, standard deviation (cm)
    pub pos_accuracy: u32,
    /// Time mark configuration
    pub time_cfg: u16,
    /// GPS week, or `(year - 2000) * 100 + month` in UTC form
    pub week_or_ym: u16,
    /// GPS TOW (ms), or `hour * 10000 + minute * 100 + second` in UTC form
    pub tow_or_hms: u32,
    /// Fractional part of the time (ns)
    pub tow_ns: i32,
    pub tm_accuracy_ms: u32,
    pub tm_accuracy_ns: u32,
    /// Clock drift (ns/s) or frequency (Hz scaled by 1e2)
    pub clk_drift_or_freq: i32,
    pub clk_drift_or_freq_accuracy: u32,
    pub flags: AidIniFlags,
}

bitflags! {
    /// Which fields of AID-INI are valid and how they are encoded
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct AidIniFlags: u32 {
        /// Position is valid
        const POS = 1 << 0;
        /// Time is valid
        const TIME = 1 << 1;
        /// Clock drift data contains valid clock drift
        const CLOCK_D = 1 << 2;
        /// Use time pulse
        const TP = 1 << 3;
        /// Clock drift data contains valid frequency
        const CLOCK_F = 1 << 4;
        /// Position is given in lat/long/alt
        const LLA = 1 << 5;
        /// Altitude is not valid
        const ALT_INV = 1 << 6;
        /// Use time of previous time pulse
        const PREV_TM = 1 << 7;
        /// Time is given as UTC date and time
        const UTC = 1 << 10;
    }
}

impl UbxPacketMeta for AidIni {
    const KEY: MessageKey = MessageKey::AidIni;
}

impl AidIni {
    pub fn from_payload(payload: &[u8]) -> Result<Self, ParserError> {
        Self::KEY.payload_len().check("AidIni", payload)?;
        Ok(Self {
            ecef_x_or_lat: get_i32(payload, 0),
            ecef_y_or_lon: get_i32(payload, 4),
            ecef_z_or_alt: get_i32(payload, 8),
            pos_accuracy: get_u32(payload, 12),
            time_cfg: get_u16(payload, 16),
            week_or_ym: get_u16(payload, 18),
            tow_or_hms: get_u32(payload, 20),
            tow_ns: get_i32(payload, 24),
            tm_accuracy_ms: get_u32(payload, 28),
            tm_accuracy_ns: get_u32(payload, 32),
            clk_drift_or_freq: get_i32(payload, 36),
            clk_drift_or_freq_accuracy: get_u32(payload, 40),
            flags: AidIniFlags::from_bits_retain(get_u32(payload, 44)),
        })
    }

    /// Set a lat/lon/alt position and mark it valid
    pub fn set_position(mut self, pos: Position) -> Self {
        let degrees = ScaleBack::<f64>(1e7);
        self.ecef_x_or_lat = degrees.as_i32(pos.lat);
        self.ecef_y_or_lon = degrees.as_i32(pos.lon);
        // Height is in centimeters, here
        self.ecef_z_or_alt = ScaleBack::<f64>(100.0).as_i32(pos.alt);
        self.flags |= AidIniFlags::POS | AidIniFlags::LLA;
        self
    }

    /// Set a UTC date and time and mark it valid.
    ///
    /// Packed as `yy * 100 + month` and `day * 1_000_000 + hhmmss`; only the
    /// years 2000 to 2099 fit.
    pub fn set_time(mut self, tm: DateTime<Utc>) -> Result<Self, DateTimeError> {
        let year_since_2000 = match tm.year() {
            yr @ 2000..=2099 => (yr - 2000) as u16,
            _ => return Err(DateTimeError::InvalidDate),
        };
        self.week_or_ym = year_since_2000 * 100 + tm.month() as u16;
        self.tow_or_hms =
            tm.day() * 1_000_000 + tm.hour() * 10_000 + tm.minute() * 100 + tm.second();
        self.tow_ns = i32::try_from(tm.nanosecond())
            .map_err(|_| DateTimeError::InvalidNanoseconds)?;
        self.flags |= AidIniFlags::TIME | AidIniFlags::UTC;
        Ok(self)
    }

    /// The position, when valid and given in lat/lon/alt form
    pub fn position(&self) -> Option<Position> {
        if !self.flags.contains(AidIniFlags::POS | AidIniFlags::LLA) {
            return None;
        }
        Some(Position {
            lat: f64::from(self.ecef_x_or_lat) * 1e-7,
            lon: f64::from(self.ecef_y_or_lon) * 1e-7,
            alt: f64::from(self.ecef_z_or_alt) * 1e-2,
        })
    }
}

impl UbxPacketPayload for AidIni {
    fn payload_len(&self) -> usize {
        48
    }

    fn write_payload(&self, out: &mut [u8]) {
        put_i32(out, 0, self.ecef_x_or_lat);
        put_i32(out, 4, self.ecef_y_or_lon);
        put_i32(out, 8, self.ecef_z_or_alt);
        put_u32(out, 12, self.pos_accuracy);
        put_u16(out, 16, self.time_cfg);
        put_u16(out, 18, self.week_or_ym);
        put_u32(out, 20, self.tow_or_hms);
        put_i32(out, 24, self.tow_ns);
        put_u32(out, 28, self.tm_accuracy_ms);
        put_u32(out, 32, self.tm_accuracy_ns);
        put_i32(out, 36, self.clk_drift_or_freq);
        put_u32(out, 40, self.clk_drift_or_freq_accuracy);
        put_u32(out, 44, self.flags.bits());
    }
}

impl_fixed_packet_bytes!(AidIni, 48);
