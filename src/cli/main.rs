//! Command-line interface for PC-FX Boot Flash Converter
//!
//! Usage: pcfx-bootflash-converter-cli [-mednafen] <program>
//!
//! This program is unlicensed and dedicated to the public domain.
//! Developed by Tommy Olsen.

use std::env;
use std::path::Path;
use std::process;

// Import the library crate modules
use pcfx_bootflash_converter::config::{Config, VERSION};
use pcfx_bootflash_converter::convert_program::{default_output_path, ConvertProgram};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.contains(&"--help".to_string()) || args.contains(&"-h".to_string()) {
        print_usage(&args[0]);
        process::exit(0);
    }

    // The flag and the filename are accepted in either order
    let mut mednafen = false;
    let mut filenames: Vec<&String> = Vec::new();
    for arg in &args[1..] {
        if arg == "-mednafen" {
            mednafen = true;
        } else if arg.starts_with('-') {
            eprintln!("Error: Unknown option: {}", arg);
            eprintln!();
            print_usage(&args[0]);
            process::exit(1);
        } else {
            filenames.push(arg);
        }
    }

    if filenames.len() != 1 {
        print_usage(&args[0]);
        process::exit(1);
    }

    let input_path = filenames[0];
    let output_path = default_output_path(input_path);

    // Validate input file exists
    if !Path::new(input_path).exists() {
        eprintln!("Error: Input file not found: {}", input_path);
        eprintln!();
        print_usage(&args[0]);
        process::exit(1);
    }

    if input_path.to_lowercase().ends_with(".bootflash") {
        eprintln!("Warning: Input file already has a .bootflash suffix");
        eprintln!("         Expected a raw program image");
        eprintln!();
    }

    println!("PC-FX Boot Flash Converter v{} (CLI)", VERSION);
    println!();
    println!("Input:  {}", input_path);
    println!("Output: {}", output_path);
    if mednafen {
        println!("Mode:   padded to full 128 KB card (Mednafen)");
    }
    println!();
    println!("Converting...");

    let converter = ConvertProgram::new(Config::new(mednafen));
    match converter.convert(input_path, &output_path) {
        Ok(()) => {
            println!();
            println!("✓ Success!");
            println!("  Boot flash image written to: {}", output_path);
            println!();
            process::exit(0);
        }
        Err(e) => {
            eprintln!();
            eprintln!("✗ Conversion failed:");
            eprintln!("  {}", e);
            eprintln!();
            process::exit(1);
        }
    }
}

fn print_usage(program_name: &str) {
    let name = Path::new(program_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("pcfx-bootflash-converter-cli");

    println!("PC-FX Boot Flash Converter v{} (CLI)", VERSION);
    println!();
    println!("USAGE:");
    println!("  {} [-mednafen] <program>", name);
    println!();
    println!("DESCRIPTION:");
    println!("  Converts a raw PC-FX program image into a bootable FX-BMP flash");
    println!("  card image. The output is written next to the input file with a");
    println!("  .bootflash suffix, overwriting any existing file.");
    println!();
    println!("ARGUMENTS:");
    println!("  <program>     Path to the raw program image");
    println!();
    println!("OPTIONS:");
    println!("  -mednafen     Pad the image to the full 128 KB card size, as");
    println!("                expected by Mednafen's card image loader");
    println!("  -h, --help    Show this help message");
    println!();
    println!("EXAMPLES:");
    println!("  {} game.bin", name);
    println!("  {} -mednafen game.bin", name);
    println!("  {} game.bin -mednafen", name);
    println!();
}
