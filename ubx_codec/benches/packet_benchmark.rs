use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use ubx_codec::*;

/// A recorded-like stream: position, velocity and solution frames with some
/// line noise in between
fn sample_stream(epochs: usize) -> Vec<u8> {
    let mut data = Vec::new();
    for epoch in 0..epochs {
        let itow = (epoch as u32) * 1000;
        let mut llh = [0u8; 28];
        llh[0..4].copy_from_slice(&itow.to_le_bytes());
        llh[4..8].copy_from_slice(&85_000_000i32.to_le_bytes());
        llh[8..12].copy_from_slice(&472_500_000i32.to_le_bytes());
        data.extend(frame(MessageKey::NavPosLlh, &llh));

        let mut vel = [0u8; 36];
        vel[0..4].copy_from_slice(&itow.to_le_bytes());
        data.extend(frame(MessageKey::NavVelNed, &vel));

        let mut sol = [0u8; 52];
        sol[0..4].copy_from_slice(&itow.to_le_bytes());
        sol[10] = 3;
        data.extend(frame(MessageKey::NavSol, &sol));

        if epoch % 10 == 0 {
            data.extend([0x00, 0xb5, 0x13]);
        }
    }
    data
}

fn frame(key: MessageKey, payload: &[u8]) -> Vec<u8> {
    let mut frame = vec![UBX_SYNC_CHAR_1, UBX_SYNC_CHAR_2, key.class(), key.msg_id()];
    frame.extend((payload.len() as u16).to_le_bytes());
    frame.extend(payload);
    let (ck_a, ck_b) = ubx_checksum(&frame[2..]);
    frame.extend([ck_a, ck_b]);
    frame
}

fn parse_all(mut parser: Parser, data: &[u8], chunk_size: usize) -> usize {
    let mut count = 0;
    for chunk in data.chunks(chunk_size) {
        for res in parser.consume(chunk) {
            match res {
                Ok(_packet) => count += 1,
                Err(ParserError::SyncLost { .. }) => {},
                Err(e) => panic!("No errors allowed! got: {:?}", e),
            }
        }
    }
    count
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let data = sample_stream(1000);
    for chunk in &[1, 99, 100, 101, 256, 512, 1000, 1024] {
        c.bench_function(&format!("vec_parse_pos_{}", chunk), |b| {
            b.iter(|| {
                let parser = Parser::default();
                assert_eq!(parse_all(parser, black_box(&data), *chunk), 3000);
            })
        });
    }
    c.bench_function("encode_cfg_commands", |b| {
        b.iter(|| {
            let msg = CfgMsg::set_rate_for::<NavPosLlh>(black_box(1)).into_packet_bytes();
            let rst = CfgRst::COLD.into_packet_bytes();
            black_box((msg, rst))
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
