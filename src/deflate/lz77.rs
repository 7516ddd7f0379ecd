//! Greedy LZ77 matcher with hash chains.
//!
//! At every position the matcher walks the chain of earlier positions that
//! share the same 3-byte hash, keeps the longest match (the nearest one on
//! ties), and either emits it and skips past it or emits a literal. There is
//! no lazy evaluation. Buckets and chain links live in plain vectors with no
//! randomized hashing, so identical input always produces identical tokens.

use super::tokens::{literal_tokens, LZ77Token};
use crate::CompressionLevel;

/// Minimum match length worth encoding
pub const MIN_MATCH: usize = 3;

/// Maximum match length (as per DEFLATE spec)
pub const MAX_MATCH: usize = 258;

/// Maximum distance to look back for matches (32KB window)
pub const MAX_DISTANCE: usize = 32768;

const WINDOW_MASK: usize = MAX_DISTANCE - 1;

const HASH_BITS: u32 = 15;
const HASH_SIZE: usize = 1 << HASH_BITS;

/// Sentinel for an empty hash bucket or chain link
const NIL: u32 = u32::MAX;

/// Greedy longest-match tokenizer
#[derive(Clone, Debug)]
pub struct Matcher {
    /// Candidates examined per position; 0 disables matching
    max_chain: usize,
}

impl Matcher {
    pub fn new(level: CompressionLevel) -> Self {
        Self { max_chain: level.max_chain() }
    }

    /// Candidates examined per position
    pub fn max_chain(&self) -> usize {
        self.max_chain
    }

    /// Split `input` into literals and back-references
    pub fn tokenize(&self, input: &[u8]) -> Vec<LZ77Token> {
        if self.max_chain == 0 {
            return literal_tokens(input);
        }

        let mut tokens = Vec::with_capacity(input.len());

        let mut chains = HashChains::new();
        let mut pos = 0;

        while pos < input.len() {
            match self.find_longest_match(&chains, input, pos) {
                Some((length, distance)) => {
                    tokens.push(LZ77Token::Copy { length: length as u16, distance: distance as u16 });
                    for p in pos..pos + length {
                        chains.insert(input, p);
                    }
                    pos += length;
                }
                None => {
                    tokens.push(LZ77Token::Literal(input[pos]));
                    chains.insert(input, pos);
                    pos += 1;
                }
            }
        }

        tokens
    }

    /// Longest match at `pos` as (length, distance), nearest first on ties
    fn find_longest_match(
        &self,
        chains: &HashChains,
        input: &[u8],
        pos: usize,
    ) -> Option<(usize, usize)> {
        let max_len = (input.len() - pos).min(MAX_MATCH);
        if max_len < MIN_MATCH {
            return None;
        }

        let mut best_len = 0;
        let mut best_dist = 0;
        let mut candidate = chains.head(input, pos);
        let mut remaining = self.max_chain;

        while let Some(cand) = candidate {
            if remaining == 0 {
                break;
            }
            remaining -= 1;

            let distance = pos - cand;
            if distance > MAX_DISTANCE {
                break;
            }

            let len = common_prefix(&input[cand..], &input[pos..], max_len);
            if len > best_len {
                best_len = len;
                best_dist = distance;
                if len == max_len {
                    break;
                }
            }

            candidate = chains.next(cand);
        }

        (best_len >= MIN_MATCH).then_some((best_len, best_dist))
    }
}

/// Hash heads plus a window-sized ring of back links
struct HashChains {
    head: Vec<u32>,
    prev: Vec<u32>,
}

impl HashChains {
    fn new() -> Self {
        Self { head: vec![NIL; HASH_SIZE], prev: vec![NIL; MAX_DISTANCE] }
    }

    /// Most recent earlier position sharing the hash at `pos`
    fn head(&self, input: &[u8], pos: usize) -> Option<usize> {
        let h = hash3(input, pos)?;
        match self.head[h] {
            NIL => None,
            p => Some(p as usize),
        }
    }

    /// Previous position on the chain through `pos`
    fn next(&self, pos: usize) -> Option<usize> {
        match self.prev[pos & WINDOW_MASK] {
            // Links must strictly decrease; anything else is a recycled slot
            p if p != NIL && (p as usize) < pos => Some(p as usize),
            _ => None,
        }
    }

    fn insert(&mut self, input: &[u8], pos: usize) {
        if let Some(h) = hash3(input, pos) {
            self.prev[pos & WINDOW_MASK] = self.head[h];
            self.head[h] = pos as u32;
        }
    }
}

/// Hash of the 3 bytes at `pos`, if there are 3 bytes left
#[inline]
fn hash3(input: &[u8], pos: usize) -> Option<usize> {
    let bytes = input.get(pos..pos + MIN_MATCH)?;
    let val = ((bytes[0] as u32) << 16) | ((bytes[1] as u32) << 8) | (bytes[2] as u32);
    Some((val.wrapping_mul(0x9E37_79B1) >> (32 - HASH_BITS)) as usize)
}

/// Length of the common prefix of `a` and `b`, capped at `max`
#[inline]
fn common_prefix(a: &[u8], b: &[u8], max: usize) -> usize {
    a.iter().zip(b.iter()).take(max).take_while(|(x, y)| x == y).count()
}
