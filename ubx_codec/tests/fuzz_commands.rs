//! Every command the codec can emit must decode back to itself.

use proptest::prelude::*;
use ubx_codec::{
    AidAlm, AidEph, AidHui, AidHuiFlags, AidIni, AidIniFlags, CfgCfg, CfgCfgMask, CfgMsg, CfgPrt,
    CfgRst, Command, EphemerisSubframes, InProtoMask, NavBbrMask, OutProtoMask, Parser, ResetMode,
};

fn reset_mode_strategy() -> impl Strategy<Value = ResetMode> {
    prop_oneof![
        Just(ResetMode::HardwareResetImmediately),
        Just(ResetMode::ControlledSoftwareReset),
        Just(ResetMode::ControlledSoftwareResetGpsOnly),
        Just(ResetMode::HardwareResetAfterShutdown),
        Just(ResetMode::ControlledGpsStop),
        Just(ResetMode::ControlledGpsStart),
    ]
}

fn cfg_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(msg_class, msg_id, rate)| {
            Command::from(CfgMsg {
                msg_class,
                msg_id,
                rate,
            })
        }),
        (any::<u16>(), reset_mode_strategy()).prop_map(|(mask, reset_mode)| {
            Command::from(CfgRst {
                nav_bbr_mask: NavBbrMask::from_bits_retain(mask),
                reset_mode,
            })
        }),
        (any::<u32>(), any::<u32>(), any::<u32>()).prop_map(|(clear, save, load)| {
            Command::from(CfgCfg {
                clear_mask: CfgCfgMask::from_bits_retain(clear),
                save_mask: CfgCfgMask::from_bits_retain(save),
                load_mask: CfgCfgMask::from_bits_retain(load),
            })
        }),
        (
            any::<u8>(),
            any::<u16>(),
            any::<u32>(),
            any::<u32>(),
            any::<u16>(),
            any::<u16>(),
            any::<u16>()
        )
            .prop_map(|(port_id, tx_ready, mode, baud_rate, in_mask, out_mask, flags)| {
                Command::from(CfgPrt {
                    port_id,
                    tx_ready,
                    mode,
                    baud_rate,
                    in_proto_mask: InProtoMask::from_bits_retain(in_mask),
                    out_proto_mask: OutProtoMask::from_bits_retain(out_mask),
                    flags,
                })
            }),
    ]
}

fn aid_ini_strategy() -> impl Strategy<Value = Command> {
    (
        any::<[i32; 3]>(),
        any::<u32>(),
        any::<[u16; 3]>(),
        any::<u32>(),
        any::<i32>(),
        any::<[u32; 2]>(),
        any::<i32>(),
        any::<u32>(),
    )
        .prop_map(|(pos, pos_accuracy, time, tow_or_hms, tow_ns, tm_acc, clk, clk_acc)| {
            let [time_cfg, week_or_ym, flags] = time;
            Command::from(AidIni {
                ecef_x_or_lat: pos[0],
                ecef_y_or_lon: pos[1],
                ecef_z_or_alt: pos[2],
                pos_accuracy,
                time_cfg,
                week_or_ym,
                tow_or_hms,
                tow_ns,
                tm_accuracy_ms: tm_acc[0],
                tm_accuracy_ns: tm_acc[1],
                clk_drift_or_freq: clk,
                clk_drift_or_freq_accuracy: clk_acc,
                flags: AidIniFlags::from_bits_retain(u32::from(flags)),
            })
        })
}

fn aid_strategy() -> impl Strategy<Value = Command> {
    let words = any::<[u32; 8]>();
    prop_oneof![
        (any::<u32>(), any::<u32>(), proptest::option::of(words)).prop_map(|(svid, week, dwrd)| {
            Command::from(AidAlm { svid, week, dwrd })
        }),
        (
            any::<u32>(),
            any::<u32>(),
            proptest::option::of(any::<[[u32; 8]; 3]>())
        )
            .prop_map(|(svid, how, sf)| {
                Command::from(AidEph {
                    svid,
                    how,
                    subframes: sf.map(|[sf1, sf2, sf3]| EphemerisSubframes { sf1, sf2, sf3 }),
                })
            }),
        (
            any::<u32>(),
            -1.0e-3..1.0e-3f64,
            -1.0e-9..1.0e-9f64,
            any::<i32>(),
            any::<[i16; 6]>(),
            any::<[f32; 4]>().prop_filter("finite", |x| x.iter().all(|v| v.is_finite())),
            any::<[f32; 4]>().prop_filter("finite", |x| x.iter().all(|v| v.is_finite())),
            0u32..8,
        )
            .prop_map(|(health, utc_a0, utc_a1, utc_tow, utc, klob_alpha, klob_beta, flags)| {
                Command::from(AidHui {
                    health,
                    utc_a0,
                    utc_a1,
                    utc_tow,
                    utc_wnt: utc[0],
                    utc_ls: utc[1],
                    utc_wnf: utc[2],
                    utc_dn: utc[3],
                    utc_lsf: utc[4],
                    utc_spare: utc[5],
                    klob_alpha,
                    klob_beta,
                    flags: AidHuiFlags::from_bits_retain(flags),
                })
            }),
    ]
}

fn command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![cfg_strategy(), aid_ini_strategy(), aid_strategy()]
}

proptest! {
    #[test]
    fn test_decode_of_encode_is_identity(cmd in command_strategy()) {
        let bytes = cmd.encode();
        let mut parser = Parser::default();
        let mut res = parser.feed(&bytes);
        prop_assert_eq!(res.len(), 1);
        let packet = res.remove(0).unwrap();
        prop_assert_eq!(packet.key(), cmd.key());
        prop_assert_eq!(packet.into_command(), Some(cmd));
    }

    #[test]
    fn test_commands_back_to_back(cmds in proptest::collection::vec(command_strategy(), 1..8)) {
        let bytes: Vec<u8> = cmds.iter().flat_map(Command::encode).collect();
        let decoded: Vec<Command> = Parser::default()
            .feed(&bytes)
            .into_iter()
            .filter_map(|r| r.ok().and_then(|p| p.into_command()))
            .collect();
        prop_assert_eq!(decoded, cmds);
    }
}
