use crate::{error::ParserError, MessageKey, UbxPacketMeta};

const SW_VERSION_LEN: usize = 30;
const HW_VERSION_LEN: usize = 10;
const EXTENSION_LEN: usize = 30;

/// Receiver/Software Version
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonVer {
    pub software_version: String,
    pub hardware_version: String,
    /// Extended software information strings
    pub extensions: Vec<String>,
}

impl UbxPacketMeta for MonVer {
    const KEY: MessageKey = MessageKey::MonVer;
}

impl MonVer {
    pub fn from_payload(payload: &[u8]) -> Result<Self, ParserError> {
        Self::KEY.payload_len().check("MonVer", payload)?;
        let (software, rest) = payload.split_at(SW_VERSION_LEN);
        let (hardware, extensions) = rest.split_at(HW_VERSION_LEN);
        Ok(Self {
            software_version: read_cstr(software, "software_version")?,
            hardware_version: read_cstr(hardware, "hardware_version")?,
            extensions: extensions
                .chunks_exact(EXTENSION_LEN)
                .map(|ext| read_cstr(ext, "extension"))
                .collect::<Result<_, _>>()?,
        })
    }

    /// Value of a `KEY=value` extension, e.g. `PROTVER`
    pub fn extension_value(&self, key: &str) -> Option<&str> {
        self.extensions.iter().find_map(|ext| {
            ext.split_once('=')
                .and_then(|(k, v)| (k == key).then_some(v))
        })
    }
}

/// NUL-padded fixed field; the terminator must be present within the field
fn read_cstr(bytes: &[u8], field: &'static str) -> Result<String, ParserError> {
    let invalid = || ParserError::InvalidField {
        packet: "MonVer",
        field,
    };
    let null_pos = bytes.iter().position(|x| *x == 0).ok_or_else(invalid)?;
    core::str::from_utf8(&bytes[..null_pos])
        .map(str::to_owned)
        .map_err(|_| invalid())
}
