use libdeflater::Decompressor;

use crate::bits::EncodedStream;
use crate::error::{Error, Result};

/// Inflate `stream` with libdeflate and require it to reproduce `expected`
pub fn verify_roundtrip(name: &str, stream: &EncodedStream, expected: &[u8]) -> Result<()> {
    let fail = |reason: String| Error::VerificationFailed { name: name.to_string(), reason };

    // One spare byte so an over-long stream shows up as a size mismatch
    let mut out = vec![0u8; expected.len() + 1];
    let mut decompressor = Decompressor::new();
    let written = decompressor
        .deflate_decompress(stream.as_bytes(), &mut out)
        .map_err(|e| fail(format!("inflate failed: {}", e)))?;

    if written != expected.len() {
        return Err(fail(format!("inflated {} bytes, expected {}", written, expected.len())));
    }
    if out[..written] != *expected {
        let at = out.iter().zip(expected).position(|(a, b)| a != b).unwrap_or(0);
        return Err(fail(format!("content differs at byte {}", at)));
    }
    Ok(())
}
