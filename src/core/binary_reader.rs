use byteorder::{ByteOrder, LittleEndian};
use thiserror::Error;

pub const PUBKEY_LEN: usize = 32;

/// Little-endian cursor over an instruction or event payload.
///
/// Every read is bounds-checked; running off the end of the buffer is reported
/// as [`BinaryReaderError::Truncated`] and never zero-filled.
pub struct BinaryReader<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> BinaryReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            buffer: data,
            offset: 0,
        }
    }

    /// Consumes and discards `length` bytes (an already-routed discriminator).
    pub fn skip(&mut self, length: usize) -> Result<(), BinaryReaderError> {
        self.take(length).map(|_| ())
    }

    pub fn read_fixed_array(&mut self, length: usize) -> Result<&'a [u8], BinaryReaderError> {
        self.take(length)
    }

    pub fn read_u8(&mut self) -> Result<u8, BinaryReaderError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_bool(&mut self) -> Result<bool, BinaryReaderError> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_u32(&mut self) -> Result<u32, BinaryReaderError> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    pub fn read_u64(&mut self) -> Result<u64, BinaryReaderError> {
        Ok(LittleEndian::read_u64(self.take(8)?))
    }

    /// Little-endian `u64` from whatever is left of an 8-byte field, at least one byte.
    pub fn read_u64_available(&mut self) -> Result<u64, BinaryReaderError> {
        let length = self.remaining().clamp(1, 8);
        Ok(LittleEndian::read_uint(self.take(length)?, length))
    }

    pub fn read_i64(&mut self) -> Result<i64, BinaryReaderError> {
        Ok(LittleEndian::read_i64(self.take(8)?))
    }

    /// Borsh string: `u32` length prefix followed by UTF-8 bytes.
    pub fn read_string(&mut self) -> Result<String, BinaryReaderError> {
        let length = self.read_u32()? as usize;
        let bytes = self.take(length)?;
        String::from_utf8(bytes.to_vec()).map_err(BinaryReaderError::InvalidString)
    }

    /// System program seed string: `u64` length prefix, invalid UTF-8 is replaced.
    pub fn read_legacy_string(&mut self) -> Result<String, BinaryReaderError> {
        let raw_length = self.read_u64()?;
        let length = usize::try_from(raw_length).map_err(|_| BinaryReaderError::Truncated {
            length: usize::MAX,
            offset: self.offset,
            buffer_len: self.buffer.len(),
        })?;
        let bytes = self.take(length)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn read_pubkey(&mut self) -> Result<String, BinaryReaderError> {
        let bytes = self.take(PUBKEY_LEN)?;
        Ok(bs58::encode(bytes).into_string())
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    fn take(&mut self, length: usize) -> Result<&'a [u8], BinaryReaderError> {
        let end = self
            .offset
            .checked_add(length)
            .filter(|end| *end <= self.buffer.len())
            .ok_or(BinaryReaderError::Truncated {
                length,
                offset: self.offset,
                buffer_len: self.buffer.len(),
            })?;
        let slice = &self.buffer[self.offset..end];
        self.offset = end;
        Ok(slice)
    }
}

/// Encoder mirroring [`BinaryReader`], used to build payloads for fixtures.
#[derive(Debug, Default, Clone)]
pub struct BinaryWriter {
    buffer: Vec<u8>,
}

impl BinaryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.buffer.extend_from_slice(bytes);
        self
    }

    pub fn write_u8(&mut self, value: u8) -> &mut Self {
        self.buffer.push(value);
        self
    }

    pub fn write_bool(&mut self, value: bool) -> &mut Self {
        self.write_u8(u8::from(value))
    }

    pub fn write_u32(&mut self, value: u32) -> &mut Self {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_u64(&mut self, value: u64) -> &mut Self {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_i64(&mut self, value: i64) -> &mut Self {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_string(&mut self, value: &str) -> &mut Self {
        self.write_u32(value.len() as u32);
        self.write_bytes(value.as_bytes())
    }

    pub fn write_legacy_string(&mut self, value: &str) -> &mut Self {
        self.write_u64(value.len() as u64);
        self.write_bytes(value.as_bytes())
    }

    pub fn write_pubkey(&mut self, value: &str) -> Result<&mut Self, BinaryReaderError> {
        let bytes = bs58::decode(value)
            .into_vec()
            .map_err(|_| BinaryReaderError::InvalidPubkey(value.to_string()))?;
        if bytes.len() != PUBKEY_LEN {
            return Err(BinaryReaderError::InvalidPubkey(value.to_string()));
        }
        Ok(self.write_bytes(&bytes))
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }
}

/// A fixed record layout that can be read from and written to a payload.
pub trait Layout: Sized {
    fn read(reader: &mut BinaryReader<'_>) -> Result<Self, BinaryReaderError>;

    fn write(&self, writer: &mut BinaryWriter) -> Result<(), BinaryReaderError>;

    fn decode(data: &[u8]) -> Result<Self, BinaryReaderError> {
        let mut reader = BinaryReader::new(data);
        Self::read(&mut reader)
    }

    fn encode(&self) -> Result<Vec<u8>, BinaryReaderError> {
        let mut writer = BinaryWriter::new();
        self.write(&mut writer)?;
        Ok(writer.into_inner())
    }
}

#[derive(Debug, Error)]
pub enum BinaryReaderError {
    #[error("truncated input: trying to read {length} bytes at offset {offset} from buffer of length {buffer_len}")]
    Truncated {
        length: usize,
        offset: usize,
        buffer_len: usize,
    },
    #[error("failed to read string: {0}")]
    InvalidString(#[from] std::string::FromUtf8Error),
    #[error("invalid public key: {0}")]
    InvalidPubkey(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian_fields_in_order() {
        let mut writer = BinaryWriter::new();
        writer
            .write_u8(7)
            .write_u32(200_000)
            .write_u64(u64::MAX - 1)
            .write_i64(-42)
            .write_bool(true);
        let data = writer.into_inner();

        let mut reader = BinaryReader::new(&data);
        assert_eq!(reader.read_u8().unwrap(), 7);
        assert_eq!(reader.read_u32().unwrap(), 200_000);
        assert_eq!(reader.read_u64().unwrap(), u64::MAX - 1);
        assert_eq!(reader.read_i64().unwrap(), -42);
        assert!(reader.read_bool().unwrap());
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn reading_past_the_end_is_truncated() {
        let data = [1u8, 2, 3];
        let mut reader = BinaryReader::new(&data);
        reader.skip(1).unwrap();
        let err = reader.read_u64().unwrap_err();
        assert!(matches!(
            err,
            BinaryReaderError::Truncated {
                length: 8,
                offset: 1,
                buffer_len: 3
            }
        ));
    }

    #[test]
    fn short_trailing_field_reads_available_bytes() {
        let mut reader = BinaryReader::new(&[6]);
        assert_eq!(reader.read_u64_available().unwrap(), 6);
        assert!(matches!(
            reader.read_u64_available(),
            Err(BinaryReaderError::Truncated { length: 1, .. })
        ));

        let data = [9u8, 1, 0, 0, 0, 0, 0, 0, 0xff];
        let mut reader = BinaryReader::new(&data);
        assert_eq!(reader.read_u64_available().unwrap(), 0x109);
        assert_eq!(reader.remaining(), 1);
    }

    #[test]
    fn string_length_beyond_buffer_is_truncated() {
        let mut writer = BinaryWriter::new();
        writer.write_u32(10).write_bytes(b"abc");
        let data = writer.into_inner();
        let err = BinaryReader::new(&data).read_string().unwrap_err();
        assert!(matches!(err, BinaryReaderError::Truncated { .. }));
    }

    #[test]
    fn standard_string_rejects_invalid_utf8() {
        let mut writer = BinaryWriter::new();
        writer.write_u32(2).write_bytes(&[0xff, 0xfe]);
        let data = writer.into_inner();
        let err = BinaryReader::new(&data).read_string().unwrap_err();
        assert!(matches!(err, BinaryReaderError::InvalidString(_)));
    }

    #[test]
    fn legacy_string_replaces_invalid_utf8() {
        let mut writer = BinaryWriter::new();
        writer.write_u64(3).write_bytes(&[b'a', 0xff, b'b']);
        let data = writer.into_inner();
        let seed = BinaryReader::new(&data).read_legacy_string().unwrap();
        assert_eq!(seed, "a\u{fffd}b");
    }

    #[test]
    fn pubkey_round_trips_through_base58() {
        let key = bs58::encode([9u8; PUBKEY_LEN]).into_string();
        let mut writer = BinaryWriter::new();
        writer.write_pubkey(&key).unwrap();
        let data = writer.into_inner();
        assert_eq!(data.len(), PUBKEY_LEN);
        assert_eq!(BinaryReader::new(&data).read_pubkey().unwrap(), key);
    }

    #[test]
    fn short_pubkey_is_rejected_by_writer() {
        let mut writer = BinaryWriter::new();
        assert!(matches!(
            writer.write_pubkey("abc"),
            Err(BinaryReaderError::InvalidPubkey(_))
        ));
    }
}
