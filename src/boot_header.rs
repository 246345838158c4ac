//! FX-BMP boot header layout
//!
//! Builds the 64-byte header at the start of a boot flash image: the card
//! signature block identifying the image as an FX-BMP card, followed by the
//! boot descriptor telling the firmware how to copy the program into RAM.
//!
// Copyright (c) 2025 Tommy Olsen
// Licensed under the MIT License.

/// Total header size (card signature block + boot descriptor block)
pub const HEADER_SIZE: usize = 64;
/// Card signature block size
pub const SIGNATURE_BLOCK_SIZE: usize = 40;

/// Leading magic bytes of the card signature block
pub const CARD_MAGIC: [u8; 3] = [0x24, 0x8A, 0xDF];
/// ASCII tag identifying the card type
pub const CARD_TAG: &[u8; 8] = b"PCFXCard";
/// Fixed card identification bytes following the tag
pub const CARD_ID_BYTES: [u8; 5] = [0x80, 0x00, 0x01, 0x01, 0x00];
/// Fixed card parameter bytes
pub const CARD_PARAM_BYTES: [u8; 16] = [
    0x01, 0x40, 0x00, 0x00, 0x01, 0xF9, 0x03, 0x00,
    0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// ASCII tag opening the boot descriptor block
pub const BOOT_TAG: &[u8; 8] = b"PCFXBoot";
/// Offset within the card where the program is stored (start of sector 1)
pub const BOOT_SOURCE_OFFSET: u32 = 0x1000;
/// RAM address the firmware copies the program to
pub const BOOT_DEST_ADDRESS: u32 = 0x8000;
/// Address the firmware jumps to after the copy
pub const BOOT_ENTRY_ADDRESS: u32 = 0x8000;

/// Byte offsets of the four boot descriptor fields within the header
pub const OFFSET_SOURCE: usize = 48;
pub const OFFSET_DEST: usize = 52;
pub const OFFSET_LENGTH: usize = 56;
pub const OFFSET_ENTRY: usize = 60;

/// The boot header of an FX-BMP flash image
///
/// Everything except the transfer length is fixed; the length is the size
/// of the program being placed on the card.
#[derive(Debug, Clone, Copy)]
pub struct BootHeader {
    transfer_length: u32,
}

impl BootHeader {
    /// Create a header for a program of the given size in bytes
    pub fn new(transfer_length: u32) -> Self {
        Self { transfer_length }
    }

    pub fn transfer_length(&self) -> u32 {
        self.transfer_length
    }

    /// Generate the complete 64-byte header
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut header = [0u8; HEADER_SIZE];

        header[..SIGNATURE_BLOCK_SIZE].copy_from_slice(&self.create_signature_block());
        header[SIGNATURE_BLOCK_SIZE..].copy_from_slice(&self.create_boot_descriptor());

        header
    }

    /// Create the card signature block (40 bytes)
    fn create_signature_block(&self) -> [u8; SIGNATURE_BLOCK_SIZE] {
        let mut block = [0u8; SIGNATURE_BLOCK_SIZE];

        // Magic bytes (3 bytes)
        block[0..3].copy_from_slice(&CARD_MAGIC);

        // Card type tag: "PCFXCard" (8 bytes)
        block[3..11].copy_from_slice(CARD_TAG);

        // Card identification (5 bytes)
        block[11..16].copy_from_slice(&CARD_ID_BYTES);

        // Card parameters (16 bytes)
        block[16..32].copy_from_slice(&CARD_PARAM_BYTES);

        // Reserved (8 bytes) - already zeros

        block
    }

    /// Create the boot descriptor block (24 bytes)
    ///
    /// Format: "PCFXBoot" tag, then four little-endian u32 fields:
    /// source offset in the card, RAM destination, transfer length,
    /// entry address.
    fn create_boot_descriptor(&self) -> [u8; HEADER_SIZE - SIGNATURE_BLOCK_SIZE] {
        let mut block = [0u8; HEADER_SIZE - SIGNATURE_BLOCK_SIZE];

        block[0..8].copy_from_slice(BOOT_TAG);
        block[8..12].copy_from_slice(&BOOT_SOURCE_OFFSET.to_le_bytes());
        block[12..16].copy_from_slice(&BOOT_DEST_ADDRESS.to_le_bytes());
        block[16..20].copy_from_slice(&self.transfer_length.to_le_bytes());
        block[20..24].copy_from_slice(&BOOT_ENTRY_ADDRESS.to_le_bytes());

        block
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    #[test]
    fn test_header_size() {
        let header = BootHeader::new(0x1234).to_bytes();
        assert_eq!(header.len(), 64);
    }

    #[test]
    fn test_signature_block_layout() {
        let header = BootHeader::new(10).to_bytes();

        assert_eq!(&header[0..3], &[0x24, 0x8A, 0xDF]);
        assert_eq!(&header[3..11], b"PCFXCard");
        assert_eq!(&header[11..16], &[0x80, 0x00, 0x01, 0x01, 0x00]);
        assert_eq!(&header[16..32], &CARD_PARAM_BYTES);
        assert_eq!(&header[32..40], &[0u8; 8]);
    }

    #[test]
    fn test_boot_descriptor_fields() {
        let header = BootHeader::new(0x0001_2345).to_bytes();

        assert_eq!(&header[40..48], b"PCFXBoot");
        assert_eq!(read_u32_le(&header, OFFSET_SOURCE), 0x1000);
        assert_eq!(read_u32_le(&header, OFFSET_DEST), 0x8000);
        assert_eq!(read_u32_le(&header, OFFSET_LENGTH), 0x0001_2345);
        assert_eq!(read_u32_le(&header, OFFSET_ENTRY), 0x8000);
    }

    #[test]
    fn test_transfer_length_little_endian() {
        let header = BootHeader::new(0xAABBCCDD).to_bytes();
        assert_eq!(&header[OFFSET_LENGTH..OFFSET_LENGTH + 4], &[0xDD, 0xCC, 0xBB, 0xAA]);
    }
}
