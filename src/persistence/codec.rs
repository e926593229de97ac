//! Little-endian binary reader/writer
//!
//! Strings are stored as a 7-bit variable-length byte count followed by the
//! UTF-8 bytes, so tables written by older builds of the game stay readable.

use super::PersistenceError;

/// Appends primitive values to a byte buffer
#[derive(Debug, Default)]
pub struct BinaryWriter {
    buf: Vec<u8>,
}

impl BinaryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_string(&mut self, value: &str) {
        let bytes = value.as_bytes();
        self.write_7bit_len(bytes.len());
        self.buf.extend_from_slice(bytes);
    }

    fn write_7bit_len(&mut self, len: usize) {
        let mut remaining = len as u32;
        while remaining >= 0x80 {
            self.buf.push(((remaining as u8) & 0x7f) | 0x80);
            remaining >>= 7;
        }
        self.buf.push(remaining as u8);
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Reads primitive values from a byte slice
#[derive(Debug)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> BinaryReader<'a> {
    /// A 32-bit length never needs more than 5 groups of 7 bits
    const MAX_LEN_BYTES: usize = 5;

    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8], PersistenceError> {
        let end = self
            .offset
            .checked_add(count)
            .filter(|end| *end <= self.data.len())
            .ok_or(PersistenceError::Truncated {
                offset: self.offset,
            })?;
        let slice = &self.data[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], PersistenceError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn read_u32(&mut self) -> Result<u32, PersistenceError> {
        Ok(u32::from_le_bytes(self.take_array()?))
    }

    pub fn read_i64(&mut self) -> Result<i64, PersistenceError> {
        Ok(i64::from_le_bytes(self.take_array()?))
    }

    pub fn read_string(&mut self) -> Result<String, PersistenceError> {
        let len = self.read_7bit_len()?;
        let bytes = self.take(len)?;
        Ok(String::from_utf8(bytes.to_vec())?)
    }

    fn read_7bit_len(&mut self) -> Result<usize, PersistenceError> {
        let mut value: u32 = 0;
        for group in 0..Self::MAX_LEN_BYTES {
            let byte = self.take(1)?[0];
            let bits = u32::from(byte & 0x7f);
            // The fifth group only has room for the top 4 bits
            if group == Self::MAX_LEN_BYTES - 1 && bits > 0x0f {
                return Err(PersistenceError::LengthOverflow);
            }
            value |= bits << (7 * group);
            if byte & 0x80 == 0 {
                return usize::try_from(value).map_err(|_| PersistenceError::LengthOverflow);
            }
        }
        Err(PersistenceError::LengthOverflow)
    }

    pub fn is_at_end(&self) -> bool {
        self.offset >= self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_string_has_single_length_byte() {
        let mut writer = BinaryWriter::new();
        writer.write_string("GAZ");
        assert_eq!(writer.into_bytes(), vec![3, b'G', b'A', b'Z']);
    }

    #[test]
    fn test_long_string_uses_multi_byte_length() {
        let long = "x".repeat(200);
        let mut writer = BinaryWriter::new();
        writer.write_string(&long);
        let bytes = writer.into_bytes();
        // 200 = 0b1_1001000 -> [0xC8, 0x01]
        assert_eq!(&bytes[..2], &[0xC8, 0x01]);
        assert_eq!(bytes.len(), 202);

        let mut reader = BinaryReader::new(&bytes);
        assert_eq!(reader.read_string().expect("string"), long);
        assert!(reader.is_at_end());
    }

    #[test]
    fn test_integers_are_little_endian() {
        let mut writer = BinaryWriter::new();
        writer.write_u32(0x0102_0304);
        writer.write_i64(-2);
        let bytes = writer.into_bytes();
        assert_eq!(&bytes[..4], &[4, 3, 2, 1]);

        let mut reader = BinaryReader::new(&bytes);
        assert_eq!(reader.read_u32().expect("u32"), 0x0102_0304);
        assert_eq!(reader.read_i64().expect("i64"), -2);
    }

    #[test]
    fn test_truncated_input_reports_offset() {
        let mut reader = BinaryReader::new(&[1, 2]);
        match reader.read_u32() {
            Err(PersistenceError::Truncated { offset }) => assert_eq!(offset, 0),
            other => panic!("expected truncation, got {:?}", other),
        }
    }

    #[test]
    fn test_runaway_length_prefix_is_rejected() {
        let mut reader = BinaryReader::new(&[0xff, 0xff, 0xff, 0xff, 0xff, 0x01]);
        assert!(matches!(
            reader.read_string(),
            Err(PersistenceError::LengthOverflow)
        ));
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let mut reader = BinaryReader::new(&[2, 0xff, 0xfe]);
        assert!(matches!(
            reader.read_string(),
            Err(PersistenceError::InvalidUtf8(_))
        ));
    }
}
