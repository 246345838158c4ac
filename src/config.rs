//! Global configuration for the boot flash converter
//!
//! Holds the conversion options shared by the GUI and CLI front-ends.
//!
//! This program is unlicensed and dedicated to the public domain.
//! Developed by Tommy Olsen.

/// Application version
pub const VERSION: &str = "1.1";

/// File suffix appended to the input path to form the output path
pub const OUTPUT_SUFFIX: &str = ".bootflash";

#[derive(Clone)]
pub struct Config {
    /// Pad the output to the full 128 KB card size (Mednafen mode)
    pub mednafen_padding: bool,
}

impl Config {
    pub fn new(mednafen_padding: bool) -> Self {
        Self { mednafen_padding }
    }
}

impl Default for Config {
    fn default() -> Self {
        // Unpadded output matches what the flash programmer expects
        Self::new(false)
    }
}
