//! Program converter main API
//!
//! Converts a raw PC-FX program image into an FX-BMP boot flash image.
//!
// Copyright (c) 2025 Tommy Olsen
// Licensed under the MIT License.

use std::fs;

use crate::config::{Config, OUTPUT_SUFFIX};
use crate::flash_image::FlashImageBuilder;

pub struct ConvertProgram {
    config: Config,
}

impl ConvertProgram {
    /// Create a new converter with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Convert a program image to a boot flash file
    ///
    /// # Arguments
    /// * `input_path` - Path to the raw program image
    /// * `output_path` - Path to the output boot flash file
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err(String)` with user-friendly error message on failure
    pub fn convert(&self, input_path: &str, output_path: &str) -> Result<(), String> {
        let program = fs::read(input_path)
            .map_err(|e| format!("Failed to read program image {}: {}", input_path, e))?;

        let builder = FlashImageBuilder::new(program, self.config.mednafen_padding)?;

        builder.make_bootflash(output_path)
            .map_err(|e| format!("Failed to write boot flash image: {}", e))?;

        Ok(())
    }
}

/// Default output path: the input path with the .bootflash suffix appended
pub fn default_output_path(input_path: &str) -> String {
    format!("{}{}", input_path, OUTPUT_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("pcfx-bootflash-test-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(default_output_path("game.bin"), "game.bin.bootflash");
        assert_eq!(default_output_path("/tmp/a.out"), "/tmp/a.out.bootflash");
    }

    #[test]
    fn test_convert_roundtrip() {
        let input = temp_file("roundtrip.bin");
        let output = temp_file("roundtrip.bin.bootflash");
        fs::write(&input, [0x10, 0x20, 0x30, 0x40]).unwrap();

        let converter = ConvertProgram::new(Config::new(false));
        converter
            .convert(input.to_str().unwrap(), output.to_str().unwrap())
            .unwrap();

        let image = fs::read(&output).unwrap();
        assert_eq!(image.len(), 4100);
        assert_eq!(&image[3..11], b"PCFXCard");
        assert_eq!(&image[4096..], &[0x10, 0x20, 0x30, 0x40]);

        let _ = fs::remove_file(&input);
        let _ = fs::remove_file(&output);
    }

    #[test]
    fn test_convert_mednafen_padding() {
        let input = temp_file("padded.bin");
        let output = temp_file("padded.bin.bootflash");
        fs::write(&input, [0xAA; 32]).unwrap();

        let converter = ConvertProgram::new(Config::new(true));
        converter
            .convert(input.to_str().unwrap(), output.to_str().unwrap())
            .unwrap();

        let image = fs::read(&output).unwrap();
        assert_eq!(image.len(), 128 * 1024);
        assert!(image[4096 + 32..].iter().all(|&b| b == 0x00));

        let _ = fs::remove_file(&input);
        let _ = fs::remove_file(&output);
    }

    #[test]
    fn test_convert_missing_input() {
        let input = temp_file("does-not-exist.bin");
        let output = temp_file("does-not-exist.bin.bootflash");

        let converter = ConvertProgram::new(Config::default());
        let result = converter.convert(input.to_str().unwrap(), output.to_str().unwrap());

        assert!(result.is_err());
        assert!(!output.exists());
    }
}
