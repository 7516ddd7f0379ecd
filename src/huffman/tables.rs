/// End-of-block symbol in the literal/length alphabet
pub const END_OF_BLOCK: usize = 256;

/// Literal/length symbols usable in a block (0-285)
pub const NUM_LITERAL_CODES: usize = 286;

/// Distance symbols usable in a block (0-29)
pub const NUM_DISTANCE_CODES: usize = 30;

/// Symbols in the code length alphabet (0-18)
pub const NUM_CL_CODES: usize = 19;

/// Maximum code length for literal/length and distance alphabets (RFC 1951)
pub const MAX_CODE_LENGTH: u8 = 15;

/// Maximum code length for the code length alphabet
pub const MAX_CL_CODE_LENGTH: u8 = 7;

/// Fixed Huffman literal/length code lengths (RFC 1951 section 3.2.6)
pub fn fixed_literal_lengths() -> [u8; 288] {
    let mut lengths = [0u8; 288];
    lengths[0..=143].fill(8); // 0-143: 8 bits
    lengths[144..=255].fill(9); // 144-255: 9 bits
    lengths[256..=279].fill(7); // 256-279: 7 bits
    lengths[280..=287].fill(8); // 280-287: 8 bits
    lengths
}

/// Fixed Huffman distance code lengths (all 5 bits)
pub fn fixed_distance_lengths() -> [u8; 32] {
    [5u8; 32]
}
