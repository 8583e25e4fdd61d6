//! A single Intel HEX record.

use std::fmt;

use crate::{HexError, Result};

/// Maximum number of data bytes carried by one record.
pub const MAX_RECORD_LENGTH: usize = 16;

/// Record type field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum RecordType {
    Data = 0,
    EndOfFile = 1,
    ExtendedLinearAddress = 4,
    StartLinearAddress = 5,
}

impl RecordType {
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// One Intel HEX record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HexRecord {
    length: u8,
    offset: u16,
    record_type: RecordType,
    data: [u8; MAX_RECORD_LENGTH],
}

impl HexRecord {
    /// Build a record carrying `payload`.
    ///
    /// # Errors
    ///
    /// Returns [`HexError::PayloadTooLong`] if `payload` exceeds
    /// [`MAX_RECORD_LENGTH`] bytes.
    pub fn new(record_type: RecordType, offset: u16, payload: &[u8]) -> Result<Self> {
        let length = u8::try_from(payload.len())
            .ok()
            .filter(|&len| usize::from(len) <= MAX_RECORD_LENGTH)
            .ok_or(HexError::PayloadTooLong(payload.len()))?;

        let mut data = [0u8; MAX_RECORD_LENGTH];
        data[..payload.len()].copy_from_slice(payload);

        Ok(Self {
            length,
            offset,
            record_type,
            data,
        })
    }

    /// Data record at the given 16-bit offset.
    ///
    /// # Errors
    ///
    /// Returns [`HexError::PayloadTooLong`] for more than 16 bytes.
    pub fn data(offset: u16, payload: &[u8]) -> Result<Self> {
        Self::new(RecordType::Data, offset, payload)
    }

    /// Extended linear address record for the segment starting at `paddr`.
    ///
    /// Both bytes come from the masked upper half-word, shifted by 24 and 16.
    #[must_use]
    pub const fn extended_linear_address(paddr: u32) -> Self {
        let upper = paddr & 0xFFFF_0000;
        let mut data = [0u8; MAX_RECORD_LENGTH];
        data[0] = (upper >> 24) as u8;
        data[1] = (upper >> 16) as u8;

        Self {
            length: 2,
            offset: 0,
            record_type: RecordType::ExtendedLinearAddress,
            data,
        }
    }

    /// Start linear address record holding `entry`, most significant byte first.
    #[must_use]
    pub const fn start_linear_address(entry: u32) -> Self {
        let be = entry.to_be_bytes();
        let mut data = [0u8; MAX_RECORD_LENGTH];
        data[0] = be[0];
        data[1] = be[1];
        data[2] = be[2];
        data[3] = be[3];

        Self {
            length: 4,
            offset: 0,
            record_type: RecordType::StartLinearAddress,
            data,
        }
    }

    #[must_use]
    pub const fn end_of_file() -> Self {
        Self {
            length: 0,
            offset: 0,
            record_type: RecordType::EndOfFile,
            data: [0u8; MAX_RECORD_LENGTH],
        }
    }

    #[must_use]
    pub const fn len(&self) -> u8 {
        self.length
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    #[must_use]
    pub const fn offset(&self) -> u16 {
        self.offset
    }

    #[must_use]
    pub const fn record_type(&self) -> RecordType {
        self.record_type
    }

    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.data[..usize::from(self.length)]
    }

    /// Two's complement of the byte sum of length, offset, type and payload.
    ///
    /// Accumulates modulo 256 at every step.
    #[must_use]
    pub fn checksum(&self) -> u8 {
        let [hi, lo] = self.offset.to_be_bytes();
        let header = self
            .length
            .wrapping_add(lo)
            .wrapping_add(hi)
            .wrapping_add(self.record_type.code());

        self.payload()
            .iter()
            .fold(header, |sum, &byte| sum.wrapping_add(byte))
            .wrapping_neg()
    }
}

impl fmt::Display for HexRecord {
    /// Record text without the line terminator.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            ":{:02X}{:04X}{:02X}",
            self.length,
            self.offset,
            self.record_type.code()
        )?;
        for byte in self.payload() {
            write!(f, "{byte:02X}")?;
        }
        write!(f, "{:02X}", self.checksum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Parse the hex digits after ':' back into raw bytes.
    fn line_bytes(line: &str) -> Vec<u8> {
        let digits = line.strip_prefix(':').unwrap();
        (0..digits.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&digits[i..i + 2], 16).unwrap())
            .collect()
    }

    #[test]
    fn test_end_of_file() {
        assert_eq!(HexRecord::end_of_file().to_string(), ":00000001FF");
    }

    #[test]
    fn test_extended_linear_address() {
        let record = HexRecord::extended_linear_address(0x0800_1234);
        assert_eq!(record.payload(), &[0x08, 0x00]);
        assert_eq!(record.to_string(), ":020000040800F2");
    }

    #[test]
    fn test_extended_linear_address_full_upper_half() {
        let record = HexRecord::extended_linear_address(0x1234_5678);
        assert_eq!(record.payload(), &[0x12, 0x34]);
        assert_eq!(record.to_string(), ":020000041234B4");
    }

    #[test]
    fn test_start_linear_address_big_endian() {
        let record = HexRecord::start_linear_address(0x0800_0201);
        assert_eq!(record.payload(), &[0x08, 0x00, 0x02, 0x01]);
        assert_eq!(record.to_string(), ":0400000508000201EC");
    }

    #[test]
    fn test_data_record_format() {
        let record = HexRecord::data(0x0010, &[0x10, 0x11, 0x12, 0x13]).unwrap();
        assert_eq!(record.to_string(), ":0400100010111213A6");
    }

    #[test]
    fn test_uppercase_and_padding() {
        let record = HexRecord::data(0x0A0B, &[0xAB, 0x0C]).unwrap();
        let text = record.to_string();
        assert!(text.starts_with(":020A0B00AB0C"));
        assert_eq!(text, text.to_uppercase());
    }

    #[test]
    fn test_checksum_wraps_every_step() {
        let record = HexRecord::data(0xFFFF, &[0xFF; MAX_RECORD_LENGTH]).unwrap();
        let sum: u32 = 16 + 0xFF + 0xFF + 16 * 0xFF;
        assert_eq!(u32::from(record.checksum()), (256 - sum % 256) % 256);
    }

    #[test]
    fn test_line_sums_to_zero() {
        let records = [
            HexRecord::data(0x1234, &[1, 2, 3, 0xFE, 0x80]).unwrap(),
            HexRecord::data(0, &[]).unwrap(),
            HexRecord::extended_linear_address(0xFFFF_FFFF),
            HexRecord::start_linear_address(0xDEAD_BEEF),
            HexRecord::end_of_file(),
        ];
        for record in &records {
            let sum = line_bytes(&record.to_string())
                .iter()
                .fold(0u8, |acc, &b| acc.wrapping_add(b));
            assert_eq!(sum, 0, "{record}");
        }
    }

    #[test]
    fn test_payload_too_long() {
        let err = HexRecord::data(0, &[0u8; 17]).unwrap_err();
        assert!(matches!(err, HexError::PayloadTooLong(17)));
    }
}
