use chrono::prelude::*;

use super::packets::*;
use crate::error::DateTimeError;

/// Represents a world position, can be constructed from NavPosLlh packets.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// Longitude in degrees
    pub lon: f64,

    /// Latitude in degrees
    pub lat: f64,

    /// Altitude in meters
    pub alt: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Velocity {
    /// m/s over the ground
    pub speed: f64,

    /// Heading in degrees
    pub heading: f64,
}

impl From<&NavPosLlh> for Position {
    fn from(packet: &NavPosLlh) -> Self {
        Position {
            lon: packet.lon_degrees(),
            lat: packet.lat_degrees(),
            alt: packet.height_msl_meters(),
        }
    }
}

impl From<&NavVelNed> for Velocity {
    fn from(packet: &NavVelNed) -> Self {
        Velocity {
            speed: packet.ground_speed_mps(),
            heading: packet.heading_degrees(),
        }
    }
}

impl TryFrom<&AidIni> for DateTime<Utc> {
    type Error = DateTimeError;

    /// Unpacks the UTC date/time form of the AID-INI time fields
    fn try_from(ini: &AidIni) -> Result<Self, Self::Error> {
        if !ini.flags.contains(AidIniFlags::TIME | AidIniFlags::UTC) {
            return Err(DateTimeError::InvalidDate);
        }
        let hms = ini.tow_or_hms;
        let date = NaiveDate::from_ymd_opt(
            2000 + i32::from(ini.week_or_ym / 100),
            u32::from(ini.week_or_ym % 100),
            hms / 1_000_000,
        )
        .ok_or(DateTimeError::InvalidDate)?;
        let time = NaiveTime::from_hms_opt(hms / 10_000 % 100, hms / 100 % 100, hms % 100)
            .ok_or(DateTimeError::InvalidTime)?;
        const NANOS_LIM: u32 = 1_000_000_000;
        if ini.tow_ns.unsigned_abs() >= NANOS_LIM {
            return Err(DateTimeError::InvalidNanoseconds);
        }

        let dt = NaiveDateTime::new(date, time)
            + chrono::Duration::nanoseconds(i64::from(ini.tow_ns));
        Ok(dt.and_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_from_nav_pos_llh() {
        let llh = NavPosLlh {
            itow: 0,
            lon: -1_000_000_000,
            lat: 450_000_000,
            height: 0,
            height_msl: 12_500,
            h_acc: 1000,
            v_acc: 1000,
        };
        let pos = Position::from(&llh);
        assert!((pos.lon + 100.0).abs() < 1e-9);
        assert!((pos.lat - 45.0).abs() < 1e-9);
        assert!((pos.alt - 12.5).abs() < 1e-9);
    }

    #[test]
    fn aid_ini_time_roundtrip() {
        let tm = Utc.with_ymd_and_hms(2024, 2, 15, 12, 30, 15).unwrap()
            + chrono::Duration::nanoseconds(250);
        let ini = AidIni::default().set_time(tm).unwrap();
        assert_eq!(ini.tow_or_hms, 15_123_015);
        let back = DateTime::<Utc>::try_from(&ini).unwrap();
        assert_eq!(back, tm);

        let last = Utc.with_ymd_and_hms(2099, 12, 31, 23, 59, 59).unwrap();
        let ini = AidIni::default().set_time(last).unwrap();
        assert_eq!(DateTime::<Utc>::try_from(&ini).unwrap(), last);
    }

    #[test]
    fn aid_ini_day_zero_is_invalid() {
        let ini = AidIni {
            week_or_ym: 2402,
            tow_or_hms: 123_015,
            flags: AidIniFlags::TIME | AidIniFlags::UTC,
            ..AidIni::default()
        };
        assert_eq!(
            DateTime::<Utc>::try_from(&ini),
            Err(DateTimeError::InvalidDate)
        );
    }

    #[test]
    fn aid_ini_without_utc_time() {
        assert_eq!(
            DateTime::<Utc>::try_from(&AidIni::default()),
            Err(DateTimeError::InvalidDate)
        );
    }
}
