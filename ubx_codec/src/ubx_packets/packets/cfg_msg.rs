use super::{get_u8, put_u8};
use crate::{error::ParserError, MessageKey, UbxPacketMeta, UbxPacketPayload};

/// Set Message Rate on the current port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CfgMsg {
    pub msg_class: u8,
    pub msg_id: u8,
    /// Send rate on current Target: 0 disables, n means once every n solutions
    pub rate: u8,
}

impl UbxPacketMeta for CfgMsg {
    const KEY: MessageKey = MessageKey::CfgMsg;
}

impl CfgMsg {
    pub fn from_payload(payload: &[u8]) -> Result<Self, ParserError> {
        Self::KEY.payload_len().check("CfgMsg", payload)?;
        Ok(Self {
            msg_class: get_u8(payload, 0),
            msg_id: get_u8(payload, 1),
            rate: get_u8(payload, 2),
        })
    }

    pub fn set_rate_for<T: UbxPacketMeta>(rate: u8) -> Self {
        Self {
            msg_class: T::CLASS,
            msg_id: T::ID,
            rate,
        }
    }

    /// The registry key of the message whose rate is set, if supported
    pub fn target(&self) -> Option<MessageKey> {
        MessageKey::from_class_and_msg_id(self.msg_class, self.msg_id)
    }
}

impl UbxPacketPayload for CfgMsg {
    fn payload_len(&self) -> usize {
        3
    }

    fn write_payload(&self, out: &mut [u8]) {
        put_u8(out, 0, self.msg_class);
        put_u8(out, 1, self.msg_id);
        put_u8(out, 2, self.rate);
    }
}

impl_fixed_packet_bytes!(CfgMsg, 3);
