/// Represents a single token in the LZ77 stream
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LZ77Token {
    /// A literal byte
    Literal(u8),
    /// A back-reference: copy `length` bytes from `distance` bytes back
    Copy { length: u16, distance: u16 },
}

impl LZ77Token {
    /// Returns the uncompressed size this token represents
    pub fn uncompressed_size(&self) -> usize {
        match self {
            LZ77Token::Literal(_) => 1,
            LZ77Token::Copy { length, .. } => *length as usize,
        }
    }
}

/// Literal-only token stream for `input`
pub fn literal_tokens(input: &[u8]) -> Vec<LZ77Token> {
    input.iter().map(|&b| LZ77Token::Literal(b)).collect()
}
