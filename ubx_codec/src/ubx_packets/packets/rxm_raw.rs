use super::{get_f32, get_f64, get_i16, get_i32, get_i8, get_u8};
use crate::{error::ParserError, MessageKey, UbxPacketMeta};

const HEADER_LEN: usize = 8;
const MEASUREMENT_LEN: usize = 24;

/// Raw Measurement Data
///
/// Carrier phase, pseudo-range and Doppler of every tracked channel.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RxmRaw {
    /// Measurement integer millisecond GPS time of week
    pub itow: i32,

    /// Measurement GPS week number
    pub week: i16,

    /// One entry per satellite, `num_sv` long on the wire
    pub measurements: Vec<RxmRawMeasurement>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RxmRawMeasurement {
    /// Carrier phase measurement (cycles)
    pub carrier_phase: f64,

    /// Pseudorange measurement (m)
    pub pseudo_range: f64,

    /// Doppler measurement (Hz)
    pub doppler: f32,

    /// Space Vehicle Number
    pub sv: u8,

    /// Nav Measurements Quality Indicator
    pub mes_qi: i8,

    /// Signal strength C/No (dBHz)
    pub cno: i8,

    /// Loss of lock indicator
    pub lli: u8,
}

impl UbxPacketMeta for RxmRaw {
    const KEY: MessageKey = MessageKey::RxmRaw;
}

impl RxmRaw {
    pub fn from_payload(payload: &[u8]) -> Result<Self, ParserError> {
        Self::KEY.payload_len().check("RxmRaw", payload)?;
        let measurements = payload[HEADER_LEN..]
            .chunks_exact(MEASUREMENT_LEN)
            .map(RxmRawMeasurement::from_block)
            .collect();
        Ok(Self {
            itow: get_i32(payload, 0),
            week: get_i16(payload, 4),
            measurements,
        })
    }

    pub fn num_sv(&self) -> usize {
        self.measurements.len()
    }
}

impl RxmRawMeasurement {
    fn from_block(block: &[u8]) -> Self {
        Self {
            carrier_phase: get_f64(block, 0),
            pseudo_range: get_f64(block, 8),
            doppler: get_f32(block, 16),
            sv: get_u8(block, 20),
            mes_qi: get_i8(block, 21),
            cno: get_i8(block, 22),
            lli: get_u8(block, 23),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn raw_payload(num_sv: u8) -> Vec<u8> {
        let mut payload = vec![0u8; HEADER_LEN + usize::from(num_sv) * MEASUREMENT_LEN];
        payload[0..4].copy_from_slice(&345_600_000i32.to_le_bytes());
        payload[4..6].copy_from_slice(&1_234i16.to_le_bytes());
        payload[6] = num_sv;
        for i in 0..usize::from(num_sv) {
            let block = &mut payload[HEADER_LEN + i * MEASUREMENT_LEN..][..MEASUREMENT_LEN];
            block[0..8].copy_from_slice(&(1000.5 + i as f64).to_le_bytes());
            block[8..16].copy_from_slice(&20_000_000.25f64.to_le_bytes());
            block[16..20].copy_from_slice(&(-1500.0f32).to_le_bytes());
            block[20] = 3 + i as u8;
            block[21] = 7;
            block[22] = 42;
            block[23] = 1;
        }
        payload
    }

    #[test]
    fn two_satellites() {
        let raw = RxmRaw::from_payload(&raw_payload(2)).unwrap();
        assert_eq!(raw.itow, 345_600_000);
        assert_eq!(raw.week, 1234);
        assert_eq!(raw.num_sv(), 2);
        assert_eq!(raw.measurements[1].carrier_phase, 1001.5);
        assert_eq!(raw.measurements[1].sv, 4);
        assert_eq!(raw.measurements[0].doppler, -1500.0);
        assert_eq!(raw.measurements[0].cno, 42);
    }

    #[test]
    fn no_satellites() {
        let raw = RxmRaw::from_payload(&raw_payload(0)).unwrap();
        assert!(raw.measurements.is_empty());
    }

    #[test]
    fn count_disagrees_with_length() {
        let mut payload = raw_payload(2);
        payload[6] = 1;
        assert!(matches!(
            RxmRaw::from_payload(&payload),
            Err(ParserError::LengthMismatch { got: 56, .. })
        ));
    }
}
