//! End-to-end integration tests for deflate-fixtures.
//!
//! Every stream is inflated with flate2 as an independent reference decoder.

use std::collections::HashSet;
use std::io::Read;
use std::process::Command;

use flate2::read::DeflateDecoder;

use deflate_fixtures::fixture::FIXTURE_TEXT;
use deflate_fixtures::{
    builtin_fixtures, encode, CompressionLevel, DirectorySink, DriverConfig, Error,
    FixtureDescriptor, FixtureDriver, FixtureSink, Result, Strategy,
};

const ALL_STRATEGIES: [Strategy; 3] =
    [Strategy::Stored, Strategy::FixedHuffman, Strategy::DynamicHuffman];

// ============================================================================
// Test Data Generators
// ============================================================================

/// Generate random data using a simple PRNG
fn generate_random_data(size: usize, seed: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let mut state = seed;
    for _ in 0..size {
        // Simple xorshift PRNG
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        data.push((state & 0xFF) as u8);
    }
    data
}

/// Generate English-like text built from a small vocabulary (repeats often)
fn generate_text(size: usize) -> Vec<u8> {
    let words = [
        "deflate", "block", "huffman", "stored", "fixed", "dynamic", "window", "literal",
        "length", "distance", "the", "a", "of", "and", "code", "tree",
    ];
    let mut data = Vec::with_capacity(size);
    let mut state = 0x2545_F491u64;
    while data.len() < size {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        data.extend_from_slice(words[(state % words.len() as u64) as usize].as_bytes());
        data.push(if state % 11 == 0 { b'\n' } else { b' ' });
    }
    data.truncate(size);
    data
}

/// Inflate a raw DEFLATE stream
fn inflate(data: &[u8]) -> Vec<u8> {
    let mut decoder = DeflateDecoder::new(data);
    let mut result = Vec::new();
    decoder.read_to_end(&mut result).unwrap();
    result
}

/// Sink that records every attempt and fails for chosen names
#[derive(Default)]
struct RecordingSink {
    fail_on: HashSet<String>,
    attempts: Vec<String>,
    stored: Vec<(String, Vec<u8>)>,
}

impl FixtureSink for RecordingSink {
    fn store(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        self.attempts.push(name.to_string());
        if self.fail_on.contains(name) {
            return Err(Error::Persist {
                name: name.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        self.stored.push((name.to_string(), bytes.to_vec()));
        Ok(())
    }
}

// ============================================================================
// Round-Trip Tests
// ============================================================================

#[test]
fn test_roundtrip_boundary_lengths() {
    let source = generate_text(4096);
    for len in [0usize, 1, 3, 258, 259] {
        let input = &source[..len];
        for strategy in ALL_STRATEGIES {
            let stream = encode(input, strategy, CompressionLevel::default()).unwrap();
            assert_eq!(inflate(stream.as_bytes()), input, "{} at length {}", strategy, len);
        }
    }
}

#[test]
fn test_roundtrip_runs_at_match_limits() {
    for len in [3usize, 4, 258, 259, 260, 516, 1000] {
        let input = vec![b'q'; len];
        for strategy in ALL_STRATEGIES {
            let stream = encode(&input, strategy, CompressionLevel::Level9).unwrap();
            assert_eq!(inflate(stream.as_bytes()), input, "{} at length {}", strategy, len);
        }
    }
}

#[test]
fn test_roundtrip_multi_kilobyte_text() {
    let input = generate_text(20_000);
    for strategy in ALL_STRATEGIES {
        for level in [0u8, 1, 6, 9] {
            let stream = encode(&input, strategy, CompressionLevel::from_level(level)).unwrap();
            assert_eq!(inflate(stream.as_bytes()), input, "{} level {}", strategy, level);
        }
    }
}

#[test]
fn test_roundtrip_random_data() {
    let input = generate_random_data(50_000, 99999);
    for strategy in ALL_STRATEGIES {
        let stream = encode(&input, strategy, CompressionLevel::default()).unwrap();
        assert_eq!(inflate(stream.as_bytes()), input, "{}", strategy);
    }
}

#[test]
fn test_roundtrip_all_byte_values() {
    let input: Vec<u8> = (0..=255u8).chain((0..=255u8).rev()).collect();
    for strategy in ALL_STRATEGIES {
        let stream = encode(&input, strategy, CompressionLevel::default()).unwrap();
        assert_eq!(inflate(stream.as_bytes()), input, "{}", strategy);
    }
}

#[test]
fn test_roundtrip_matches_beyond_window() {
    // Repeats both inside and outside the 32 KiB window
    let mut input = generate_text(1_000);
    input.extend(generate_random_data(40_000, 7));
    input.extend(generate_text(1_000));
    for strategy in [Strategy::FixedHuffman, Strategy::DynamicHuffman] {
        let stream = encode(&input, strategy, CompressionLevel::Level9).unwrap();
        assert_eq!(inflate(stream.as_bytes()), input, "{}", strategy);
    }
}

// ============================================================================
// Determinism and Sizing
// ============================================================================

#[test]
fn test_encoding_is_deterministic() {
    let input = generate_text(8_000);
    for strategy in ALL_STRATEGIES {
        let first = encode(&input, strategy, CompressionLevel::Level9).unwrap();
        let second = encode(&input, strategy, CompressionLevel::Level9).unwrap();
        assert_eq!(first, second, "{}", strategy);
    }
}

#[test]
fn test_stored_sizing() {
    for len in [0usize, 1, 100, 65_535] {
        let input = generate_random_data(len, len as u64 + 1);
        let stream = encode(&input, Strategy::Stored, CompressionLevel::default()).unwrap();
        let bytes = stream.as_bytes();
        assert_eq!(bytes.len(), 1 + 4 + len);
        let stored_len = u16::from_le_bytes([bytes[1], bytes[2]]);
        let stored_nlen = u16::from_le_bytes([bytes[3], bytes[4]]);
        assert_eq!(stored_len as usize, len);
        assert_eq!(stored_nlen, 0xFFFF ^ stored_len);
    }
}

#[test]
fn test_stored_rejects_oversized_input() {
    let input = vec![0u8; 65_536];
    let err = encode(&input, Strategy::Stored, CompressionLevel::default()).unwrap_err();
    assert!(matches!(err, Error::StoredBlockTooLarge { len: 65_536, max: 65_535 }));

    // The Huffman strategies have no such limit
    let stream = encode(&input, Strategy::FixedHuffman, CompressionLevel::default()).unwrap();
    assert_eq!(inflate(stream.as_bytes()), input);
}

#[test]
fn test_strategies_are_distinguishable() {
    let input = b"The quick brown fox jumps over the lazy dog";
    let outputs: Vec<Vec<u8>> = ALL_STRATEGIES
        .iter()
        .map(|&s| encode(input, s, CompressionLevel::default()).unwrap().into_bytes())
        .collect();
    assert_ne!(outputs[0], outputs[1]);
    assert_ne!(outputs[1], outputs[2]);
    assert_ne!(outputs[0], outputs[2]);
}

#[test]
fn test_dynamic_not_larger_than_fixed_on_repetitive_text() {
    let input = generate_text(16_000);
    let fixed = encode(&input, Strategy::FixedHuffman, CompressionLevel::default()).unwrap();
    let dynamic = encode(&input, Strategy::DynamicHuffman, CompressionLevel::default()).unwrap();
    assert!(
        dynamic.len() <= fixed.len(),
        "dynamic {} bytes vs fixed {} bytes",
        dynamic.len(),
        fixed.len()
    );
    assert!(fixed.len() < input.len());
}

#[test]
fn test_higher_level_not_worse_on_text() {
    let input = generate_text(16_000);
    let fast = encode(&input, Strategy::FixedHuffman, CompressionLevel::Level1).unwrap();
    let none = encode(&input, Strategy::FixedHuffman, CompressionLevel::Level0).unwrap();
    assert!(fast.len() < none.len());
}

// ============================================================================
// End-to-End Scenarios
// ============================================================================

#[test]
fn test_stored_ten_byte_run_layout() {
    let stream = encode(b"aaaaaaaaaa", Strategy::Stored, CompressionLevel::default()).unwrap();
    let mut expected = vec![0b0000_0001, 0x0A, 0x00, 0xF5, 0xFF];
    expected.extend_from_slice(b"aaaaaaaaaa");
    assert_eq!(stream.as_bytes(), expected.as_slice());
    assert_eq!(stream.len(), 15);
}

#[test]
fn test_dynamic_ten_byte_run_beats_stored() {
    for level in [CompressionLevel::default(), CompressionLevel::Level9] {
        let stream = encode(b"aaaaaaaaaa", Strategy::DynamicHuffman, level).unwrap();
        assert_eq!(inflate(stream.as_bytes()), b"aaaaaaaaaa");
        assert!(stream.len() < 15, "{} bytes", stream.len());
        assert_eq!((stream.as_bytes()[0] >> 1) & 0b11, 2);
    }
}

#[test]
fn test_builtin_fixtures_roundtrip() {
    for fixture in builtin_fixtures() {
        let stream = encode(fixture.input(), fixture.strategy(), fixture.effective_level()).unwrap();
        assert_eq!(inflate(stream.as_bytes()), FIXTURE_TEXT.as_bytes(), "{}", fixture.name());
    }
}

// ============================================================================
// Driver and Sink
// ============================================================================

#[test]
fn test_independent_failure() {
    let fixtures = builtin_fixtures();
    let mut sink = RecordingSink::default();
    sink.fail_on.insert(fixtures[1].name().to_string());

    let report = FixtureDriver::new(DriverConfig::default()).run(&fixtures, &mut sink);

    // One attempt per descriptor, in table order
    let expected: Vec<String> = fixtures.iter().map(|f| f.name().to_string()).collect();
    assert_eq!(sink.attempts, expected);

    assert!(report.outcomes[0].is_success());
    assert!(report.outcomes[2].is_success());
    match &report.outcomes[1].result {
        Err(e) => assert!(e.is_persist(), "{:?}", e),
        Ok(_) => panic!("second fixture should have failed"),
    }
    assert!(!report.is_success());
    assert_eq!(report.succeeded().count(), 2);
    assert_eq!(sink.stored.len(), 2);
}

#[test]
fn test_directory_sink_writes_builtin_table() {
    let tmp = tempfile::tempdir().unwrap();
    let mut sink = DirectorySink::new(tmp.path());
    let config = DriverConfig { num_threads: 0, verify: true };

    let report = FixtureDriver::new(config).run(&builtin_fixtures(), &mut sink);
    assert!(report.is_success(), "{:?}", report);

    for fixture in builtin_fixtures() {
        let bytes = std::fs::read(tmp.path().join(fixture.name())).unwrap();
        assert_eq!(inflate(&bytes), FIXTURE_TEXT.as_bytes());
        let summary = report.outcome(fixture.name()).unwrap().result.as_ref().unwrap();
        assert_eq!(summary.output_len, bytes.len());
        assert_eq!(summary.input_len, FIXTURE_TEXT.len());
    }
}

#[test]
fn test_rerun_overwrites_fixture() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("nocompression-deflate.deflate");
    std::fs::write(&path, vec![0xAA; 4096]).unwrap();

    let mut sink = DirectorySink::new(tmp.path());
    let report = FixtureDriver::new(DriverConfig::default()).run(&builtin_fixtures(), &mut sink);
    assert!(report.is_success());

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len(), 5 + FIXTURE_TEXT.len());
    assert_eq!(inflate(&bytes), FIXTURE_TEXT.as_bytes());
}

#[test]
fn test_custom_table_with_explicit_levels() {
    let text = generate_text(3_000);
    let fixtures: Vec<FixtureDescriptor> = (0..=9u8)
        .map(|level| {
            FixtureDescriptor::new(format!("dyn-{}.deflate", level), text.clone(), Strategy::DynamicHuffman)
                .with_level(CompressionLevel::from_level(level))
        })
        .collect();

    let mut sink = RecordingSink::default();
    let report = FixtureDriver::new(DriverConfig { num_threads: 3, verify: true })
        .run(&fixtures, &mut sink);
    assert!(report.is_success());
    for (_, bytes) in &sink.stored {
        assert_eq!(inflate(bytes), text);
    }
}

// ============================================================================
// Binary CLI Tests
// ============================================================================

#[test]
fn test_cli_writes_fixtures() {
    let tmp = tempfile::tempdir().unwrap();
    let out_dir = tmp.path().join("test_data");

    let output = Command::new(env!("CARGO_BIN_EXE_deflate-fixtures"))
        .arg("--out-dir")
        .arg(&out_dir)
        .args(["--verify", "--quiet"])
        .output()
        .expect("Failed to run CLI");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    for fixture in builtin_fixtures() {
        let bytes = std::fs::read(out_dir.join(fixture.name())).unwrap();
        assert_eq!(inflate(&bytes), FIXTURE_TEXT.as_bytes());
    }
}

#[test]
fn test_cli_only_and_dump() {
    let tmp = tempfile::tempdir().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_deflate-fixtures"))
        .arg("--out-dir")
        .arg(tmp.path())
        .args(["--only", "nocompression-deflate.deflate", "--dump", "hex", "-q"])
        .output()
        .expect("Failed to run CLI");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("nocompression-deflate.deflate (stored)"));
    assert!(stdout.contains("000000: 01"));
    assert!(tmp.path().join("nocompression-deflate.deflate").exists());
    assert!(!tmp.path().join("fixed-comp-deflate.deflate").exists());
}

#[test]
fn test_cli_rejects_unknown_fixture() {
    let tmp = tempfile::tempdir().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_deflate-fixtures"))
        .arg("--out-dir")
        .arg(tmp.path())
        .args(["--only", "missing.deflate"])
        .output()
        .expect("Failed to run CLI");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_cli_list() {
    let output = Command::new(env!("CARGO_BIN_EXE_deflate-fixtures"))
        .arg("--list")
        .output()
        .expect("Failed to run CLI");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for fixture in builtin_fixtures() {
        assert!(stdout.contains(fixture.name()));
    }
}
