#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sonora_cng::{ComfortNoiseDecoder, MAX_FRAME_SIZE};

#[derive(Debug, Arbitrary)]
enum FuzzOp {
    UpdateSid(Vec<u8>),
    Generate { len: u16, new_period: bool },
    Reset,
}

fuzz_target!(|ops: Vec<FuzzOp>| {
    let mut decoder = ComfortNoiseDecoder::new();
    let mut out = vec![0i16; MAX_FRAME_SIZE + 1];

    for op in ops {
        match op {
            FuzzOp::UpdateSid(sid) => decoder.update_sid(&sid),
            FuzzOp::Generate { len, new_period } => {
                let len = usize::from(len) % (MAX_FRAME_SIZE + 2);
                let result = decoder.generate(&mut out[..len], new_period);
                assert_eq!(result.is_err(), len > MAX_FRAME_SIZE);
            }
            FuzzOp::Reset => decoder.reset(),
        }
    }
});
