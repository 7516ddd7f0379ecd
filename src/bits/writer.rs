/// A finished DEFLATE bitstream
///
/// `bit_length` is the number of valid bits in the last byte, or 0 when the
/// stream ended on a byte boundary. Padding bits are always zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedStream {
    bytes: Vec<u8>,
    bit_length: u8,
}

impl EncodedStream {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Valid bits in the final byte (0 if byte-aligned)
    pub fn bit_length(&self) -> u8 {
        self.bit_length
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of meaningful bits, excluding final padding
    pub fn total_bits(&self) -> usize {
        match self.bit_length {
            0 => self.bytes.len() * 8,
            n => (self.bytes.len() - 1) * 8 + n as usize,
        }
    }
}

/// Bit-level writer for DEFLATE output
///
/// Writes bits LSB-first to match DEFLATE format.
pub struct BitWriter {
    /// Accumulated output bytes
    output: Vec<u8>,
    /// Current byte being built
    current_byte: u8,
    /// Bits written to current byte (0-7)
    bits_in_byte: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { output: Vec::with_capacity(capacity), current_byte: 0, bits_in_byte: 0 }
    }

    /// Write `n` bits (0-32) from value in LSB-first order
    ///
    /// Callers must not pass values wider than `n` bits. Debug builds assert
    /// it; release builds drop the excess high bits.
    pub fn write_bits(&mut self, value: u32, n: u8) {
        debug_assert!(n <= 32, "bit width {} out of range", n);
        debug_assert!(n == 32 || value >> n == 0, "value {:#x} wider than {} bits", value, n);

        if n == 0 {
            return;
        }

        let mut val = value;
        let mut remaining = n.min(32);

        while remaining > 0 {
            let space = 8 - self.bits_in_byte;
            let to_write = remaining.min(space);

            let mask = (1u32 << to_write) - 1;
            self.current_byte |= ((val & mask) as u8) << self.bits_in_byte;

            val >>= to_write;
            self.bits_in_byte += to_write;
            remaining -= to_write;

            if self.bits_in_byte == 8 {
                self.output.push(self.current_byte);
                self.current_byte = 0;
                self.bits_in_byte = 0;
            }
        }
    }

    /// Write a single bit
    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        self.write_bits(bit as u32, 1);
    }

    /// Write bits in reversed order (for Huffman codes stored MSB-first)
    /// The code is `length` bits, with MSB first
    pub fn write_bits_reversed(&mut self, code: u32, length: u8) {
        let reversed = reverse_bits(code, length);
        self.write_bits(reversed, length);
    }

    /// Pad to byte boundary with zero bits
    pub fn align_to_byte(&mut self) {
        if self.bits_in_byte > 0 {
            self.output.push(self.current_byte);
            self.current_byte = 0;
            self.bits_in_byte = 0;
        }
    }

    /// Write a raw byte (must be byte-aligned)
    pub fn write_byte(&mut self, byte: u8) {
        if self.bits_in_byte == 0 {
            self.output.push(byte);
        } else {
            // Not aligned, write through bits
            self.write_bits(byte as u32, 8);
        }
    }

    /// Write a 16-bit value in little-endian
    pub fn write_u16_le(&mut self, value: u16) {
        self.write_byte(value as u8);
        self.write_byte((value >> 8) as u8);
    }

    /// Write raw bytes
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        if self.bits_in_byte == 0 {
            self.output.extend_from_slice(bytes);
        } else {
            for &b in bytes {
                self.write_byte(b);
            }
        }
    }

    /// Total bits written so far
    pub fn bit_len(&self) -> usize {
        self.output.len() * 8 + self.bits_in_byte as usize
    }

    /// Finish and return the padded stream
    pub fn finish(mut self) -> EncodedStream {
        let bit_length = self.bits_in_byte;
        self.align_to_byte();
        EncodedStream { bytes: self.output, bit_length }
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Reverse the bottom `n` bits of `value`
fn reverse_bits(value: u32, n: u8) -> u32 {
    let mut result = 0u32;
    let mut v = value;
    for _ in 0..n {
        result = (result << 1) | (v & 1);
        v >>= 1;
    }
    result
}
