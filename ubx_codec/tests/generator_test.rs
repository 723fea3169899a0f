use ubx_codec::{
    encode, AidEph, CfgCfg, CfgMsg, CfgPrt, CfgRst, Command, InProtoMask, MessageKey, NavBbrMask,
    NavBbrPredefinedMask, NavPosLlh, NavSol, OutProtoMask, Parser, ResetMode, UbxPacket,
    UbxPacketCreator, UbxPoll,
};

#[test]
fn test_cfg_msg_simple() {
    assert_eq!(
        [0xb5, 0x62, 0x06, 0x01, 0x03, 0x00, 0x01, 0x02, 0x01, 0x0E, 0x47],
        CfgMsg::set_rate_for::<NavPosLlh>(1).into_packet_bytes()
    );

    assert_eq!(
        [0xb5, 0x62, 0x06, 0x01, 0x03, 0x00, 0x01, 0x06, 0x01, 0x12, 0x4F],
        CfgMsg::set_rate_for::<NavSol>(1).into_packet_bytes()
    );
}

#[test]
fn test_cfg_rst() {
    assert_eq!(
        [0xb5, 0x62, 0x06, 0x04, 0x04, 0x00, 0xFF, 0xFF, 0x00, 0x00, 0x0C, 0x5D],
        CfgRst::COLD.into_packet_bytes()
    );

    let hot_soft = CfgRst {
        nav_bbr_mask: NavBbrPredefinedMask::HOT_START.into(),
        reset_mode: ResetMode::ControlledSoftwareReset,
    };
    assert_eq!(hot_soft.nav_bbr_mask, NavBbrMask::empty());
    assert_eq!(
        [0xb5, 0x62, 0x06, 0x04, 0x04, 0x00, 0x00, 0x00, 0x01, 0x00, 0x0F, 0x66],
        hot_soft.into_packet_bytes()
    );
}

#[test]
fn test_cfg_cfg_save_all() {
    assert_eq!(
        [
            0xb5, 0x62, 0x06, 0x09, 0x0c, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1f, 0x06, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x40, 0xb1
        ],
        CfgCfg::save_all().into_packet_bytes()
    );
}

#[test]
fn test_cfg_prt_uart1() {
    let prt = CfgPrt::uart1(
        115_200,
        InProtoMask::UBLOX,
        OutProtoMask::UBLOX | OutProtoMask::NMEA,
    );
    assert_eq!(
        [
            0xb5, 0x62, 0x06, 0x00, 0x14, 0x00, 0x01, 0x00, 0x00, 0x00, 0xd0, 0x08, 0x00, 0x00,
            0x00, 0xc2, 0x01, 0x00, 0x01, 0x00, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0xba, 0x4e
        ],
        prt.into_packet_bytes()
    );
}

#[test]
fn test_polls() {
    assert_eq!(
        [0xb5, 0x62, 0x01, 0x06, 0x00, 0x00, 0x07, 0x16],
        UbxPoll(MessageKey::NavSol).into_packet_bytes()
    );
    assert_eq!(
        vec![0xb5, 0x62, 0x0a, 0x04, 0x00, 0x00, 0x0e, 0x34],
        encode(&UbxPoll(MessageKey::MonVer).into())
    );
}

#[test]
fn test_variable_length_command() {
    assert_eq!(
        vec![
            0xb5, 0x62, 0x0b, 0x31, 0x08, 0x00, 0x07, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x4b, 0x27
        ],
        Command::from(AidEph::empty(7)).encode()
    );
}

#[test]
fn test_create_packet_into_vec() {
    let mut out = Vec::new();
    CfgRst::COLD.create_packet(&mut out).unwrap();
    CfgMsg::set_rate_for::<NavSol>(1)
        .create_packet(&mut out)
        .unwrap();
    assert_eq!(out.len(), 12 + 11);

    let res = Parser::default().feed(&out);
    assert_eq!(
        res,
        vec![
            Ok(UbxPacket::CfgRst(CfgRst::COLD)),
            Ok(UbxPacket::CfgMsg(CfgMsg::set_rate_for::<NavSol>(1))),
        ]
    );
}
