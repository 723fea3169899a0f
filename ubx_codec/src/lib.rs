//! # ubx_codec
//!
//! Streaming codec for the UBX binary protocol spoken by u-blox GPS receivers.
//! The transport (serial port, USB, file replay) stays with the caller: this
//! crate turns raw bytes into typed messages and typed commands into bytes.
//!
//! Constructing Packets
//! ====================
//!
//! Commands the receiver accepts implement `UbxPacketCreator`; the fixed-size
//! ones also provide `into_packet_bytes`, for example:
//! ```
//! use ubx_codec::{CfgMsg, NavPosLlh};
//!
//! let packet: [u8; 11] = CfgMsg::set_rate_for::<NavPosLlh>(1).into_packet_bytes();
//! assert_eq!(packet, [0xb5, 0x62, 0x06, 0x01, 0x03, 0x00, 0x01, 0x02, 0x01, 0x0e, 0x47]);
//! ```
//! To poll a message send an empty-payload frame with its key:
//! ```
//! use ubx_codec::{MessageKey, UbxPoll};
//!
//! let packet = UbxPoll(MessageKey::MonVer).into_packet_bytes();
//! assert_eq!(packet.len(), 8);
//! ```
//!
//! Parsing Packets
//! ===============
//!
//! Parsing packets happens by instantiating a `Parser` object and then adding
//! data into it using its `consume()` method. Partial frames are kept inside
//! the parser until the rest of the frame arrives with a later call.
//! ```
//! use ubx_codec::{Parser, UbxPacket};
//!
//! let mut parser = Parser::default();
//! let my_raw_data = vec![1, 2, 3, 4]; // From your serial port
//! for res in parser.consume(&my_raw_data) {
//!     match res {
//!         Ok(UbxPacket::NavPosLlh(pos)) => {
//!             println!("lat {} lon {}", pos.lat_degrees(), pos.lon_degrees());
//!         },
//!         Ok(_) => {},
//!         Err(err) => {
//!             // Malformed or unknown frame, the parser already moved on
//!             println!("{}", err);
//!         },
//!     }
//! }
//! ```
//! `Parser::dispatch` does the same loop for anything implementing
//! `PacketSink`, closures included.

pub use crate::{
    constants::{MAX_FRAME_LEN, MAX_PAYLOAD_LEN, UBX_SYNC_CHAR_1, UBX_SYNC_CHAR_2},
    dispatcher::{dispatch, PacketSink},
    error::{DateTimeError, MemWriterError, ParserError},
    parser::{
        checksum::{frame_checksum, ubx_checksum, verify_frame},
        Parser, ParserConfig, ParserIter, ParserStats, ScanState,
    },
    ubx_packets::*,
};

pub mod constants;
mod dispatcher;
mod error;
mod parser;
mod ubx_packets;
