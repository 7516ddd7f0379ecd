use super::code::{canonical_codes, compute_code_lengths, HuffmanCode};
use super::tables::{
    fixed_distance_lengths, fixed_literal_lengths, END_OF_BLOCK, MAX_CL_CODE_LENGTH,
    MAX_CODE_LENGTH, NUM_CL_CODES, NUM_DISTANCE_CODES, NUM_LITERAL_CODES,
};
use crate::bits::{BitWriter, EncodedStream};
use crate::deflate::tables::{encode_distance, encode_length, CODE_LENGTH_ORDER};
use crate::deflate::tokens::LZ77Token;
use crate::error::{Error, Result};

/// Frequency counter for dynamic Huffman code generation
#[derive(Clone, Debug)]
pub struct FrequencyCounter {
    /// Frequencies for literal (0-255), EOB (256), and length codes (257-285)
    pub literal_freq: [u32; NUM_LITERAL_CODES],
    /// Frequencies for distance codes (0-29)
    pub distance_freq: [u32; NUM_DISTANCE_CODES],
}

impl FrequencyCounter {
    pub fn new() -> Self {
        Self { literal_freq: [0; NUM_LITERAL_CODES], distance_freq: [0; NUM_DISTANCE_CODES] }
    }

    /// Count frequencies from tokens, plus the end-of-block marker
    pub fn count_tokens(&mut self, tokens: &[LZ77Token]) -> Result<()> {
        for token in tokens {
            match *token {
                LZ77Token::Literal(byte) => {
                    self.literal_freq[byte as usize] += 1;
                }
                LZ77Token::Copy { length, distance } => {
                    let (len_code, dist_code) = match_codes(length, distance)?;
                    self.literal_freq[len_code as usize] += 1;
                    self.distance_freq[dist_code as usize] += 1;
                }
            }
        }
        self.literal_freq[END_OF_BLOCK] += 1;
        Ok(())
    }

    /// Get the number of literal/length codes needed (HLIT + 257)
    pub fn num_literal_codes(&self) -> usize {
        let last = (END_OF_BLOCK + 1..NUM_LITERAL_CODES)
            .rev()
            .find(|&i| self.literal_freq[i] > 0)
            .unwrap_or(END_OF_BLOCK);
        last + 1
    }

    /// Get the number of distance codes needed (HDIST + 1)
    pub fn num_distance_codes(&self) -> usize {
        let last = (0..NUM_DISTANCE_CODES).rev().find(|&i| self.distance_freq[i] > 0).unwrap_or(0);
        last + 1
    }
}

impl Default for FrequencyCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Length and distance symbols for a back-reference
fn match_codes(length: u16, distance: u16) -> Result<(u16, u16)> {
    match (encode_length(length), encode_distance(distance)) {
        (Some((len_code, _, _)), Some((dist_code, _, _))) => Ok((len_code, dist_code)),
        _ => Err(Error::InvalidMatch { length, distance }),
    }
}

/// DEFLATE block type produced by a [`HuffmanEncoder`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockKind {
    /// BTYPE = 01, predefined tables
    Fixed,
    /// BTYPE = 10, tables computed from the tokens and sent in the header
    Dynamic,
}

impl BlockKind {
    fn btype(self) -> u32 {
        match self {
            BlockKind::Fixed => 1,
            BlockKind::Dynamic => 2,
        }
    }
}

/// Huffman encoder for DEFLATE output
pub struct HuffmanEncoder {
    kind: BlockKind,
}

impl HuffmanEncoder {
    pub fn new(kind: BlockKind) -> Self {
        Self { kind }
    }

    pub fn fixed() -> Self {
        Self::new(BlockKind::Fixed)
    }

    pub fn dynamic() -> Self {
        Self::new(BlockKind::Dynamic)
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    /// Encode LZ77 tokens as one DEFLATE block, terminated by end-of-block
    pub fn encode(&self, tokens: &[LZ77Token], is_final: bool) -> Result<EncodedStream> {
        let mut writer = BitWriter::with_capacity(tokens.len() * 2 + 64);

        // Write block header
        writer.write_bit(is_final); // BFINAL
        writer.write_bits(self.kind.btype(), 2);

        match self.kind {
            BlockKind::Fixed => {
                let lit_codes = canonical_codes(&fixed_literal_lengths());
                let dist_codes = canonical_codes(&fixed_distance_lengths());
                encode_with_codes(&mut writer, tokens, &lit_codes, &dist_codes)?;
            }
            BlockKind::Dynamic => {
                let (lit_lengths, dist_lengths) = dynamic_lengths(tokens)?;
                write_dynamic_header(&mut writer, &lit_lengths, &dist_lengths);
                let lit_codes = canonical_codes(&lit_lengths);
                let dist_codes = canonical_codes(&dist_lengths);
                encode_with_codes(&mut writer, tokens, &lit_codes, &dist_codes)?;
            }
        }

        Ok(writer.finish())
    }
}

/// Compute literal/length and distance code lengths for a dynamic block
fn dynamic_lengths(tokens: &[LZ77Token]) -> Result<(Vec<u8>, Vec<u8>)> {
    let mut freq = FrequencyCounter::new();
    freq.count_tokens(tokens)?;

    let num_lit = freq.num_literal_codes();
    let num_dist = freq.num_distance_codes();

    let lit_lengths = compute_code_lengths(&freq.literal_freq[..num_lit], MAX_CODE_LENGTH);
    let mut dist_lengths = compute_code_lengths(&freq.distance_freq[..num_dist], MAX_CODE_LENGTH);

    // A block of literals still sends one distance code; give it one bit
    if dist_lengths.iter().all(|&l| l == 0) {
        dist_lengths[0] = 1;
    }

    Ok((lit_lengths, dist_lengths))
}

/// Write the dynamic Huffman block header (RFC 1951 section 3.2.7)
fn write_dynamic_header(writer: &mut BitWriter, lit_lengths: &[u8], dist_lengths: &[u8]) {
    let hlit = lit_lengths.len() - 257; // 0-29
    let hdist = dist_lengths.len() - 1; // 0-29

    // RLE encode the code lengths
    let combined_lengths: Vec<u8> =
        lit_lengths.iter().chain(dist_lengths.iter()).copied().collect();
    let rle_encoded = rle_encode_lengths(&combined_lengths);

    // Count frequencies of code length symbols (0-18)
    let mut cl_freq = [0u32; NUM_CL_CODES];
    for &(sym, _) in &rle_encoded {
        cl_freq[sym as usize] += 1;
    }

    let cl_lengths = compute_code_lengths(&cl_freq, MAX_CL_CODE_LENGTH);
    let cl_codes = canonical_codes(&cl_lengths);

    // Code lengths are sent in permuted order; trailing zeros are dropped
    let hclen = (0..NUM_CL_CODES)
        .rev()
        .find(|&i| cl_lengths[CODE_LENGTH_ORDER[i]] > 0)
        .map_or(4, |i| i + 1)
        .max(4);

    writer.write_bits(hlit as u32, 5);
    writer.write_bits(hdist as u32, 5);
    writer.write_bits((hclen - 4) as u32, 4);

    for &sym in CODE_LENGTH_ORDER.iter().take(hclen) {
        writer.write_bits(cl_lengths[sym] as u32, 3);
    }

    for &(sym, extra) in &rle_encoded {
        let entry = cl_codes[sym as usize];
        writer.write_bits_reversed(entry.code, entry.len);

        match sym {
            16 => writer.write_bits(extra as u32, 2), // 3-6 repeats
            17 => writer.write_bits(extra as u32, 3), // 3-10 zeros
            18 => writer.write_bits(extra as u32, 7), // 11-138 zeros
            _ => {}
        }
    }
}

/// Encode tokens using provided Huffman codes, then end-of-block
fn encode_with_codes(
    writer: &mut BitWriter,
    tokens: &[LZ77Token],
    lit_codes: &[HuffmanCode],
    dist_codes: &[HuffmanCode],
) -> Result<()> {
    for token in tokens {
        match *token {
            LZ77Token::Literal(byte) => {
                let entry = lit_codes[byte as usize];
                writer.write_bits_reversed(entry.code, entry.len);
            }
            LZ77Token::Copy { length, distance } => {
                let (len_code, len_extra, len_bits) =
                    encode_length(length).ok_or(Error::InvalidMatch { length, distance })?;
                let (dist_code, dist_extra, dist_bits) =
                    encode_distance(distance).ok_or(Error::InvalidMatch { length, distance })?;

                let entry = lit_codes[len_code as usize];
                writer.write_bits_reversed(entry.code, entry.len);
                writer.write_bits(len_extra as u32, len_bits);

                let entry = dist_codes[dist_code as usize];
                writer.write_bits_reversed(entry.code, entry.len);
                writer.write_bits(dist_extra as u32, dist_bits);
            }
        }
    }

    let eob = lit_codes[END_OF_BLOCK];
    writer.write_bits_reversed(eob.code, eob.len);
    Ok(())
}

/// RLE encode code lengths using symbols 16, 17, 18
fn rle_encode_lengths(lengths: &[u8]) -> Vec<(u8, u8)> {
    let mut result = Vec::new();
    let mut i = 0;

    while i < lengths.len() {
        let len = lengths[i];
        let run_len = lengths[i..].iter().take_while(|&&l| l == len).count();
        let mut run = run_len;

        if len == 0 {
            while run > 0 {
                if run >= 11 {
                    // Symbol 18: 11-138 zeros
                    let count = run.min(138);
                    result.push((18, (count - 11) as u8));
                    run -= count;
                } else if run >= 3 {
                    // Symbol 17: 3-10 zeros
                    let count = run.min(10);
                    result.push((17, (count - 3) as u8));
                    run -= count;
                } else {
                    result.push((0, 0));
                    run -= 1;
                }
            }
        } else {
            result.push((len, 0));
            run -= 1;

            // Symbol 16 repeats the previous length 3-6 times
            while run > 0 {
                if run >= 3 {
                    let count = run.min(6);
                    result.push((16, (count - 3) as u8));
                    run -= count;
                } else {
                    result.push((len, 0));
                    run -= 1;
                }
            }
        }

        i += run_len;
    }

    result
}
