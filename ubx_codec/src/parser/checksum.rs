use crate::constants::{UBX_CHECKSUM_LEN, UBX_CLASS_OFFSET, UBX_HEADER_LEN};

/// UBX [Fletcher-16 checksum](https://en.wikipedia.org/wiki/Fletcher%27s_checksum) calculator supporting both streaming and single-shot validation
#[derive(Default, Clone, Copy)]
pub(crate) struct UbxChecksumCalc {
    ck_a: u8,
    ck_b: u8,
}

impl UbxChecksumCalc {
    pub(crate) const fn new() -> Self {
        Self { ck_a: 0, ck_b: 0 }
    }

    /// Update checksum with new bytes
    pub(crate) const fn update(&mut self, bytes: &[u8]) {
        let mut i = 0;
        while i < bytes.len() {
            self.update_byte(bytes[i]);
            i += 1;
        }
    }

    /// Update checksum with a single byte
    pub(crate) const fn update_byte(&mut self, byte: u8) {
        self.ck_a = self.ck_a.wrapping_add(byte);
        self.ck_b = self.ck_b.wrapping_add(self.ck_a);
    }

    /// Get the current checksum result
    pub(crate) const fn result(self) -> (u8, u8) {
        (self.ck_a, self.ck_b)
    }
}

/// The checksum is calculated over the packet, starting and including the CLASS field,
/// up until, but excluding, the Checksum Field.
/// So slice should start with the class id.
/// Returns `(ck_a, ck_b)`.
pub const fn ubx_checksum(data: &[u8]) -> (u8, u8) {
    let mut calc = UbxChecksumCalc::new();
    calc.update(data);
    calc.result()
}

/// Checksum a complete frame would need: computed over everything between the
/// sync chars and the trailer. The trailer itself is ignored.
///
/// Returns `None` when `frame` is shorter than header plus trailer.
pub fn frame_checksum(frame: &[u8]) -> Option<(u8, u8)> {
    if frame.len() < UBX_HEADER_LEN + UBX_CHECKSUM_LEN {
        return None;
    }
    Some(ubx_checksum(
        &frame[UBX_CLASS_OFFSET..frame.len() - UBX_CHECKSUM_LEN],
    ))
}

/// Recomputes the checksum of a complete frame and compares it against its
/// trailing two bytes.
pub fn verify_frame(frame: &[u8]) -> bool {
    match frame_checksum(frame) {
        Some(expect) => expect == (frame[frame.len() - 2], frame[frame.len() - 1]),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{UBX_SYNC_CHAR_1, UBX_SYNC_CHAR_2};

    const PACK_LEN: u8 = 2;
    const VALID_CK_A: u8 = 0x11;
    const VALID_CK_B: u8 = 0x38;
    // UBX-ACK-ACK packet: Class=0x05, ID=0x01, Length=0x0002, Payload=[0x04, 0x05], Checksum=[0x11, 0x38]
    const VALID_UBX_PACKET: [u8; 10] = [
        UBX_SYNC_CHAR_1,
        UBX_SYNC_CHAR_2, // Sync chars (not included in checksum)
        0x05,
        0x01, // Class and Message ID
        PACK_LEN,
        0x00, // Length (2 bytes)
        0x04,
        0x05, // Payload
        VALID_CK_A,
        VALID_CK_B, // Checksum
    ];

    #[test]
    fn test_streaming_checksum_valid() {
        let mut calc = UbxChecksumCalc::new();
        calc.update(&VALID_UBX_PACKET[2..8]);
        assert_eq!(calc.result(), (VALID_CK_A, VALID_CK_B));
    }

    #[test]
    fn test_streaming_checksum_incremental() {
        let mut calc = UbxChecksumCalc::new();
        for byte in &VALID_UBX_PACKET[2..8] {
            calc.update_byte(*byte);
        }
        assert_eq!(calc.result(), (VALID_CK_A, VALID_CK_B));
    }

    #[test]
    fn test_streaming_checksum_chunks() {
        let mut calc = UbxChecksumCalc::new();
        calc.update(&VALID_UBX_PACKET[2..4]); // Class and ID
        calc.update(&VALID_UBX_PACKET[4..6]); // Length
        calc.update(&VALID_UBX_PACKET[6..8]); // Payload
        assert_eq!(calc.result(), ubx_checksum(&VALID_UBX_PACKET[2..8]));
    }

    #[test]
    fn test_verify_frame() {
        assert!(verify_frame(&VALID_UBX_PACKET));
        assert_eq!(
            frame_checksum(&VALID_UBX_PACKET),
            Some((VALID_CK_A, VALID_CK_B))
        );

        let mut corrupted = VALID_UBX_PACKET;
        corrupted[9] = corrupted[9].wrapping_add(1);
        assert!(!verify_frame(&corrupted));
    }

    #[test]
    fn test_every_payload_mutation_is_rejected() {
        for pos in 6..8 {
            for delta in 1..=255u8 {
                let mut frame = VALID_UBX_PACKET;
                frame[pos] = frame[pos].wrapping_add(delta);
                assert!(!verify_frame(&frame), "pos {} delta {}", pos, delta);
            }
        }
    }

    #[test]
    fn test_short_frame_is_rejected() {
        assert_eq!(frame_checksum(&VALID_UBX_PACKET[..7]), None);
        assert!(!verify_frame(&VALID_UBX_PACKET[..7]));
    }

    #[test]
    fn test_empty_payload_checksum() {
        // CFG-PRT poll, no payload
        let (ck_a, ck_b) = ubx_checksum(&[0x06, 0x00, 0x00, 0x00]);
        assert_eq!((ck_a, ck_b), (0x06, 0x18));
    }

    #[allow(dead_code, reason = "constant time evaluated")]
    const fn is_checksum_valid(bytes: &[u8], expected_ck_a: u8, expected_ck_b: u8) -> bool {
        let mut calc = UbxChecksumCalc::new();
        calc.update(bytes);
        let (ck_a, ck_b) = calc.result();
        ck_a == expected_ck_a && ck_b == expected_ck_b
    }

    #[test]
    fn test_const_checksum_computation() {
        const _: () = {
            assert!(is_checksum_valid(
                &[
                    0x05, 0x01, // Class and Message ID
                    PACK_LEN, 0x00, // Length (2 bytes)
                    0x04, 0x05, // Payload
                ],
                VALID_CK_A,
                VALID_CK_B
            ));
        };
    }
}
