//! Byte dumps of encoded streams for eyeballing fixtures.

use std::fmt::Write;
use std::str::FromStr;

use crate::bits::EncodedStream;

const BYTES_PER_ROW: usize = 8;

/// How each byte is rendered in a dump
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DumpFormat {
    /// `0b`-style, MSB on the left, so DEFLATE fields read right to left
    #[default]
    Binary,
    Decimal,
    Hex,
}

impl FromStr for DumpFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "binary" | "bin" => Ok(Self::Binary),
            "decimal" | "dec" => Ok(Self::Decimal),
            "hex" => Ok(Self::Hex),
            other => Err(format!("unknown dump format '{}' (binary, decimal, hex)", other)),
        }
    }
}

/// Render `stream` as offset-prefixed rows
pub fn dump(stream: &EncodedStream, format: DumpFormat) -> String {
    let mut out = String::new();
    for (row, chunk) in stream.as_bytes().chunks(BYTES_PER_ROW).enumerate() {
        let _ = write!(out, "{:06x}:", row * BYTES_PER_ROW);
        for byte in chunk {
            let _ = match format {
                DumpFormat::Binary => write!(out, " {:08b}", byte),
                DumpFormat::Decimal => write!(out, " {:3}", byte),
                DumpFormat::Hex => write!(out, " {:02x}", byte),
            };
        }
        out.push('\n');
    }
    let _ = writeln!(
        out,
        "{} bytes, {} bits ({} valid in last byte)",
        stream.len(),
        stream.total_bits(),
        match stream.bit_length() {
            0 => 8,
            n => n,
        }
    );
    out
}
