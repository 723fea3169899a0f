//! Payload layouts of the supported messages.
//!
//! Every field is read from or written to an explicit little-endian offset of
//! the payload slice; no layout depends on struct packing.

use num_traits::{Float, ToPrimitive};

macro_rules! le_field {
    ($get:ident, $put:ident, $ty:ty, $size:expr) => {
        #[inline]
        pub(crate) fn $get(payload: &[u8], offset: usize) -> $ty {
            let mut bytes = [0u8; $size];
            bytes.copy_from_slice(&payload[offset..offset + $size]);
            <$ty>::from_le_bytes(bytes)
        }

        #[inline]
        #[allow(dead_code, reason = "not every width is written by an encoder")]
        pub(crate) fn $put(out: &mut [u8], offset: usize, val: $ty) {
            out[offset..offset + $size].copy_from_slice(&val.to_le_bytes());
        }
    };
}

le_field!(get_u8, put_u8, u8, 1);
le_field!(get_i8, put_i8, i8, 1);
le_field!(get_u16, put_u16, u16, 2);
le_field!(get_i16, put_i16, i16, 2);
le_field!(get_u32, put_u32, u32, 4);
le_field!(get_i32, put_i32, i32, 4);
le_field!(get_f32, put_f32, f32, 4);
le_field!(get_f64, put_f64, f64, 8);

/// Reads `N` consecutive u32 words starting at `offset`
pub(crate) fn get_u32_array<const N: usize>(payload: &[u8], offset: usize) -> [u32; N] {
    let mut words = [0u32; N];
    for (i, word) in words.iter_mut().enumerate() {
        *word = get_u32(payload, offset + 4 * i);
    }
    words
}

pub(crate) fn put_u32_array(out: &mut [u8], offset: usize, words: &[u32]) {
    for (i, word) in words.iter().enumerate() {
        put_u32(out, offset + 4 * i, *word);
    }
}

/// Converts a physical value back into its integer wire form
pub(crate) struct ScaleBack<T: Float + ToPrimitive>(pub(crate) T);

impl<T: Float + ToPrimitive> ScaleBack<T> {
    /// Rounds to the nearest representable value, saturating at the `i32` range
    pub(crate) fn as_i32(&self, x: T) -> i32 {
        let x = (x * self.0).round();
        if x.is_nan() {
            return 0;
        }
        x.to_i32().unwrap_or(if x.is_sign_negative() {
            i32::MIN
        } else {
            i32::MAX
        })
    }
}

/// Adds `PACKET_LEN` and `into_packet_bytes` to a fixed-length emit-capable packet
macro_rules! impl_fixed_packet_bytes {
    ($packet:ty, $payload_len:expr) => {
        impl $packet {
            pub const PACKET_LEN: usize = $payload_len + $crate::constants::UBX_FRAME_OVERHEAD;

            #[inline]
            pub fn into_packet_bytes(self) -> [u8; Self::PACKET_LEN] {
                let mut ret = [0u8; Self::PACKET_LEN];
                $crate::ubx_packets::fill_packet(&self, &mut ret);
                ret
            }
        }
    };
}

mod aid_alm;
mod aid_eph;
mod aid_hui;
mod aid_ini;
mod cfg_cfg;
mod cfg_msg;
mod cfg_prt;
mod cfg_rst;
mod mon_ver;
mod nav_pos_llh;
mod nav_sol;
mod nav_vel_ned;
mod rxm_eph;
mod rxm_raw;

pub use aid_alm::*;
pub use aid_eph::*;
pub use aid_hui::*;
pub use aid_ini::*;
pub use cfg_cfg::*;
pub use cfg_msg::*;
pub use cfg_prt::*;
pub use cfg_rst::*;
pub use mon_ver::*;
pub use nav_pos_llh::*;
pub use nav_sol::*;
pub use nav_vel_ned::*;
pub use rxm_eph::*;
pub use rxm_raw::*;
