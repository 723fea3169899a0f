pub const UBX_SYNC_CHAR_1: u8 = 0xb5;
pub const UBX_SYNC_CHAR_2: u8 = 0x62;
pub(crate) const UBX_SYNC_SIZE: usize = 2;
pub(crate) const UBX_PAYLOAD_SIZE_LEN: usize = 2;
pub(crate) const UBX_CLASS_LEN: usize = 1;
pub(crate) const UBX_ID_LEN: usize = 1;
pub const UBX_HEADER_LEN: usize =
    UBX_SYNC_SIZE + UBX_PAYLOAD_SIZE_LEN + UBX_CLASS_LEN + UBX_ID_LEN;
pub const UBX_CHECKSUM_LEN: usize = 2;

/// Bytes a frame adds around its payload: header plus checksum trailer
pub const UBX_FRAME_OVERHEAD: usize = UBX_HEADER_LEN + UBX_CHECKSUM_LEN;

pub(crate) const UBX_CLASS_OFFSET: usize = 2; // After SYNC_CHAR_1, SYNC_CHAR_2
pub(crate) const UBX_MSG_ID_OFFSET: usize = 3; // After CLASS
pub(crate) const UBX_LENGTH_OFFSET: usize = 4; // After MSG_ID

/// Largest frame the receiver firmware ever emits (header and trailer included)
pub const MAX_FRAME_LEN: usize = 5000;

/// Default bound for a declared payload length
pub const MAX_PAYLOAD_LEN: u16 = (MAX_FRAME_LEN - UBX_FRAME_OVERHEAD) as u16;
