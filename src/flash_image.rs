//! Boot flash image builder
//!
//! Assembles a complete FX-BMP card image: boot header, zero fill up to the
//! 4 KB boot sector boundary, the program bytes, and optionally zero fill up
//! to the full 128 KB card capacity.
//!
// Copyright (c) 2025 Tommy Olsen
// Licensed under the MIT License.

use std::fs::File;
use std::io::Write;

use crate::boot_header::BootHeader;

/// Full capacity of an FX-BMP flash card
pub const CARD_SIZE: usize = 128 * 1024;
/// Size of the boot sector region preceding the program
pub const BOOT_SECTOR_SIZE: usize = 4096;
/// Largest program that fits on the card after the boot sector
pub const MAX_PROGRAM_SIZE: usize = CARD_SIZE - BOOT_SECTOR_SIZE;

/// Builder for FX-BMP boot flash images
pub struct FlashImageBuilder {
    program: Vec<u8>,
    pad_to_card_size: bool,
}

impl FlashImageBuilder {
    /// Create a new image builder
    ///
    /// # Arguments
    /// * `program` - Raw program bytes to place on the card
    /// * `pad_to_card_size` - Pad the image to the full 128 KB card size
    ///   (required by Mednafen's card image loader)
    ///
    /// Programs larger than 124 KB cannot fit on the card and are rejected.
    pub fn new(program: Vec<u8>, pad_to_card_size: bool) -> Result<Self, String> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(format!(
                "Program too large for flash card: {} bytes (max {} bytes)",
                program.len(),
                MAX_PROGRAM_SIZE
            ));
        }

        Ok(Self {
            program,
            pad_to_card_size,
        })
    }

    pub fn program_len(&self) -> usize {
        self.program.len()
    }

    /// Generate the complete boot flash image data
    pub fn generate_image_data(&self) -> Vec<u8> {
        let image_size = if self.pad_to_card_size {
            CARD_SIZE
        } else {
            BOOT_SECTOR_SIZE + self.program.len()
        };

        let mut output = Vec::with_capacity(image_size);

        // Boot header (64 bytes)
        let header = BootHeader::new(self.program.len() as u32);
        output.extend_from_slice(&header.to_bytes());

        // Zero fill the rest of the boot sector
        output.resize(BOOT_SECTOR_SIZE, 0x00);

        // Program bytes verbatim
        output.extend_from_slice(&self.program);

        // Trailing zero fill up to full card capacity
        if self.pad_to_card_size {
            output.resize(CARD_SIZE, 0x00);
        }

        output
    }

    /// Write the boot flash image to disk
    pub fn make_bootflash(&self, output_file: &str) -> Result<(), String> {
        let image_data = self.generate_image_data();
        let mut file = File::create(output_file)
            .map_err(|e| format!("Failed to create output file: {}", e))?;
        file.write_all(&image_data)
            .map_err(|e| format!("Failed to write image data: {}", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boot_header::{HEADER_SIZE, OFFSET_LENGTH, OFFSET_SOURCE};

    fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    #[test]
    fn test_image_without_padding() {
        let program: Vec<u8> = (0x01..=0x0A).collect();
        let builder = FlashImageBuilder::new(program.clone(), false).unwrap();
        let image = builder.generate_image_data();

        assert_eq!(image.len(), 4106);
        assert_eq!(&image[0..3], &[0x24, 0x8A, 0xDF]);
        assert_eq!(&image[3..11], b"PCFXCard");
        assert_eq!(read_u32_le(&image, OFFSET_SOURCE), 0x1000);
        assert_eq!(read_u32_le(&image, OFFSET_LENGTH), 10);
        assert_eq!(&image[4096..4106], &program[..]);
    }

    #[test]
    fn test_image_with_padding() {
        let program: Vec<u8> = (0x01..=0x0A).collect();
        let builder = FlashImageBuilder::new(program, true).unwrap();
        let image = builder.generate_image_data();

        assert_eq!(image.len(), CARD_SIZE);
        assert!(image[4106..].iter().all(|&b| b == 0x00));
    }

    #[test]
    fn test_padding_does_not_change_prefix() {
        let program = vec![0x55; 300];
        let plain = FlashImageBuilder::new(program.clone(), false)
            .unwrap()
            .generate_image_data();
        let padded = FlashImageBuilder::new(program, true)
            .unwrap()
            .generate_image_data();

        assert_eq!(plain.len(), 4396);
        assert_eq!(&padded[..plain.len()], &plain[..]);
    }

    #[test]
    fn test_boot_sector_is_zero_after_header() {
        let builder = FlashImageBuilder::new(vec![0xFF; 16], false).unwrap();
        let image = builder.generate_image_data();
        assert!(image[HEADER_SIZE..BOOT_SECTOR_SIZE].iter().all(|&b| b == 0x00));
    }

    #[test]
    fn test_max_size_program() {
        let program = vec![0xAB; MAX_PROGRAM_SIZE];
        let builder = FlashImageBuilder::new(program, true).unwrap();
        assert_eq!(builder.program_len(), MAX_PROGRAM_SIZE);
        let image = builder.generate_image_data();

        // Program fills the card exactly, no trailing bytes
        assert_eq!(image.len(), CARD_SIZE);
        assert_eq!(image[CARD_SIZE - 1], 0xAB);
    }

    #[test]
    fn test_oversized_program_rejected() {
        let program = vec![0x00; MAX_PROGRAM_SIZE + 1];
        assert!(FlashImageBuilder::new(program.clone(), true).is_err());
        assert!(FlashImageBuilder::new(program, false).is_err());
    }
}
