#![no_main]

use deflate_fixtures::{encode, CompressionLevel, Strategy};
use flate2::read::DeflateDecoder;
use libfuzzer_sys::fuzz_target;
use std::io::Read;

fuzz_target!(|data: &[u8]| {
    // First byte picks the level, the rest is the payload
    let Some((&level, input)) = data.split_first() else {
        return;
    };
    let level = CompressionLevel::from_level(level % 10);

    for strategy in [Strategy::Stored, Strategy::FixedHuffman, Strategy::DynamicHuffman] {
        let input = match strategy {
            Strategy::Stored => &input[..input.len().min(65_535)],
            _ => input,
        };

        let stream = encode(input, strategy, level).expect("encoding must not fail");

        let mut decoded = Vec::new();
        DeflateDecoder::new(stream.as_bytes())
            .read_to_end(&mut decoded)
            .expect("stream must inflate");
        assert_eq!(decoded, input, "{} round trip", strategy);
    }
});
