pub mod bits;
pub mod deflate;
pub mod error;
pub mod fixture;
pub mod huffman;

pub use bits::EncodedStream;
pub use deflate::tokens::LZ77Token;
pub use error::{Error, Result};
pub use fixture::{
    builtin_fixtures, DirectorySink, DriverConfig, FixtureDescriptor, FixtureDriver,
    FixtureOutcome, FixtureSink, FixtureSummary, RunReport,
};

use std::fmt;

use deflate::tokens::literal_tokens;
use deflate::{encode_stored, Matcher};
use huffman::HuffmanEncoder;

/// Compression level (0-9)
///
/// The level only sets how hard the LZ77 matcher searches; it never picks the
/// block type. Level 0 disables matching, levels 1-9 examine 4 to 4096 chain
/// candidates per position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum CompressionLevel {
    Level0 = 0,
    Level1 = 1,
    Level2 = 2,
    Level3 = 3,
    Level4 = 4,
    Level5 = 5,
    #[default]
    Level6 = 6,
    Level7 = 7,
    Level8 = 8,
    Level9 = 9,
}

impl CompressionLevel {
    /// Create from numeric level (0-9), clamped to valid range
    pub fn from_level(level: u8) -> Self {
        match level {
            0 => Self::Level0,
            1 => Self::Level1,
            2 => Self::Level2,
            3 => Self::Level3,
            4 => Self::Level4,
            5 => Self::Level5,
            6 => Self::Level6,
            7 => Self::Level7,
            8 => Self::Level8,
            _ => Self::Level9,
        }
    }

    /// Get numeric level (0-9)
    pub fn level(&self) -> u8 {
        *self as u8
    }

    /// Hash-chain candidates the matcher examines per position
    pub fn max_chain(&self) -> usize {
        match self {
            Self::Level0 => 0,
            Self::Level1 => 4,
            Self::Level2 => 8,
            Self::Level3 => 16,
            Self::Level4 => 32,
            Self::Level5 => 64,
            Self::Level6 => 128,
            Self::Level7 => 256,
            Self::Level8 => 1024,
            Self::Level9 => 4096,
        }
    }
}

/// DEFLATE block encoding strategy
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// One stored block, no compression (BTYPE = 00)
    Stored,
    /// One block with the predefined Huffman tables (BTYPE = 01)
    FixedHuffman,
    /// One block with per-block Huffman tables (BTYPE = 10)
    DynamicHuffman,
}

impl Strategy {
    /// BTYPE value written in the block header
    pub fn btype(&self) -> u8 {
        match self {
            Strategy::Stored => 0,
            Strategy::FixedHuffman => 1,
            Strategy::DynamicHuffman => 2,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Stored => "stored",
            Strategy::FixedHuffman => "fixed",
            Strategy::DynamicHuffman => "dynamic",
        };
        f.write_str(name)
    }
}

/// Encode `input` as a raw DEFLATE stream holding a single final block
///
/// `level` is ignored by [`Strategy::Stored`]. For
/// [`Strategy::DynamicHuffman`] both the matched and the literal-only token
/// streams are encoded and the shorter block is kept; on very short inputs
/// the length and distance symbols can cost more header bits than the match
/// saves.
pub fn encode(input: &[u8], strategy: Strategy, level: CompressionLevel) -> Result<EncodedStream> {
    let stream = match strategy {
        Strategy::Stored => {
            if level != CompressionLevel::default() {
                tracing::debug!(level = level.level(), "stored blocks ignore the level");
            }
            encode_stored(input, true)?
        }
        Strategy::FixedHuffman => {
            let tokens = Matcher::new(level).tokenize(input);
            HuffmanEncoder::fixed().encode(&tokens, true)?
        }
        Strategy::DynamicHuffman => {
            let encoder = HuffmanEncoder::dynamic();
            let tokens = Matcher::new(level).tokenize(input);
            let matched = encoder.encode(&tokens, true)?;

            if tokens.len() == input.len() {
                matched
            } else {
                let literal = encoder.encode(&literal_tokens(input), true)?;
                if literal.total_bits() < matched.total_bits() {
                    tracing::debug!(
                        matched_bits = matched.total_bits(),
                        literal_bits = literal.total_bits(),
                        "literal-only block is shorter"
                    );
                    literal
                } else {
                    matched
                }
            }
        }
    };

    tracing::debug!(
        %strategy,
        level = level.level(),
        input_bytes = input.len(),
        output_bytes = stream.len(),
        "encoded block"
    );

    Ok(stream)
}
