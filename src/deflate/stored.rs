use crate::bits::{BitWriter, EncodedStream};
use crate::error::{Error, Result};

/// Largest payload a single stored block can carry (LEN is 16 bits)
pub const MAX_STORED_LEN: usize = 65535;

/// Emit `input` as one stored (BTYPE = 00) block
///
/// Layout: BFINAL, BTYPE, zero padding to the byte boundary, LEN and NLEN as
/// little-endian u16, then the bytes verbatim.
pub fn encode_stored(input: &[u8], is_final: bool) -> Result<EncodedStream> {
    if input.len() > MAX_STORED_LEN {
        return Err(Error::StoredBlockTooLarge { len: input.len(), max: MAX_STORED_LEN });
    }

    let len = input.len() as u16;
    let mut writer = BitWriter::with_capacity(input.len() + 5);

    writer.write_bit(is_final); // BFINAL
    writer.write_bits(0, 2); // BTYPE = 00
    writer.align_to_byte();

    writer.write_u16_le(len);
    writer.write_u16_le(!len);
    writer.write_bytes(input);

    Ok(writer.finish())
}
