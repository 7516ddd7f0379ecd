pub mod code;
pub mod encoder;
pub mod tables;

pub use code::{canonical_codes, compute_code_lengths, HuffmanCode};
pub use encoder::{BlockKind, HuffmanEncoder};
