//! Converts raw PC-FX program images into bootable FX-BMP flash card images.
//!
// Copyright (c) 2025 Tommy Olsen
// Licensed under the MIT License.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use fltk::{prelude::*, *};
use fltk::button::{Button, CheckButton};
use fltk::dialog::NativeFileChooser;
use fltk::enums::{Color, FrameType};
use fltk::frame::Frame;
use fltk::image::SvgImage;
use fltk::input::Input;
use fltk::text::{TextBuffer, TextDisplay};
use fltk::window::Window;
use std::cell::RefCell;
use std::rc::Rc;
use std::path::Path;

use pcfx_bootflash_converter::config::{Config, VERSION};
use pcfx_bootflash_converter::convert_program::{default_output_path, ConvertProgram};

const WINDOW_WIDTH: i32 = 640;
const WINDOW_HEIGHT: i32 = 520;
const MARGIN: i32 = 25;
const FIELD_HEIGHT: i32 = 35;
const BUTTON_HEIGHT: i32 = 40;
const BUTTON_WIDTH: i32 = 120;
const BROWSE_BTN_WIDTH: i32 = 60;

fn main() {
    let app = app::App::default().with_scheme(app::Scheme::Gtk);

    let icon_svg = r##"<svg width="256" height="256" viewBox="0 0 24 24" fill="none"
     stroke="#000000" stroke-width="1.6" stroke-linecap="round" stroke-linejoin="round"
     xmlns="http://www.w3.org/2000/svg">
  <!-- memory card shell (PC-FX dark grey) -->
  <rect x="3.2" y="2.2" width="17.6" height="19.6" rx="2.2"
        fill="#4A4A52" stroke="#000000"/>
  <!-- notched corner -->
  <polygon points="16.4,2.2 20.8,6.6 20.8,2.2" fill="#FFFFFF" stroke="none"/>
  <!-- flash chip -->
  <rect x="7.0" y="8.6" width="7.2" height="7.2" rx="1.0" fill="#000000"/>
  <!-- connector pads -->
  <line x1="5.6" y1="19.2" x2="18.4" y2="19.2"/>
  <line x1="5.6" y1="20.4" x2="18.4" y2="20.4"/>
  <!-- boot arrow (green) -->
  <polygon points="15.8,9.4 19.6,11.6 15.8,13.8" fill="#27C93F" stroke="none"/>
</svg>"##;

    let mut window = Window::default()
        .with_size(WINDOW_WIDTH, WINDOW_HEIGHT)
        .with_label(&format!("PC-FX Boot Flash Converter v{}", VERSION));
    window.make_resizable(false);

    if let Ok(icon) = SvgImage::from_data(icon_svg) {
        window.set_icon(Some(icon));
    }

    let mut y_pos = MARGIN;

    let mut input_label = Frame::default()
        .with_pos(MARGIN, y_pos)
        .with_size(WINDOW_WIDTH - 2 * MARGIN, 25)
        .with_label("Select PC-FX program image:");
    input_label.set_label_size(13);
    input_label.set_align(enums::Align::Left | enums::Align::Inside);

    y_pos += 30;

    let input_field = Input::default()
        .with_pos(MARGIN, y_pos)
        .with_size(WINDOW_WIDTH - 2 * MARGIN - BROWSE_BTN_WIDTH - 10, FIELD_HEIGHT);

    let mut input_btn = Button::default()
        .with_pos(WINDOW_WIDTH - MARGIN - BROWSE_BTN_WIDTH, y_pos)
        .with_size(BROWSE_BTN_WIDTH, FIELD_HEIGHT)
        .with_label("Browse...");

    y_pos += FIELD_HEIGHT + 20;

    let mut output_label = Frame::default()
        .with_pos(MARGIN, y_pos)
        .with_size(WINDOW_WIDTH - 2 * MARGIN, 25)
        .with_label("Select output boot flash file:");
    output_label.set_label_size(13);
    output_label.set_align(enums::Align::Left | enums::Align::Inside);

    y_pos += 30;

    let output_field = Input::default()
        .with_pos(MARGIN, y_pos)
        .with_size(WINDOW_WIDTH - 2 * MARGIN - BROWSE_BTN_WIDTH - 10, FIELD_HEIGHT);

    let mut output_btn = Button::default()
        .with_pos(WINDOW_WIDTH - MARGIN - BROWSE_BTN_WIDTH, y_pos)
        .with_size(BROWSE_BTN_WIDTH, FIELD_HEIGHT)
        .with_label("Browse...");

    y_pos += FIELD_HEIGHT + 15;

    let mednafen_check = CheckButton::default()
        .with_pos(MARGIN, y_pos)
        .with_size(WINDOW_WIDTH - 2 * MARGIN, 25)
        .with_label("Pad image to full 128 KB card size (Mednafen)");

    y_pos += 40;

    // Status display
    let mut status_label = Frame::default()
        .with_pos(MARGIN, y_pos)
        .with_size(WINDOW_WIDTH - 2 * MARGIN, 25)
        .with_label("Status:");
    status_label.set_label_size(13);
    status_label.set_align(enums::Align::Left | enums::Align::Inside);

    y_pos += 30;

    let status_height = WINDOW_HEIGHT - y_pos - BUTTON_HEIGHT - 30;

    let status_buffer = TextBuffer::default();
    let mut status_display = TextDisplay::default()
        .with_pos(MARGIN, y_pos)
        .with_size(WINDOW_WIDTH - 2 * MARGIN, status_height);
    status_display.set_buffer(status_buffer.clone());
    status_display.wrap_mode(text::WrapMode::AtBounds, 0);
    status_display.set_frame(FrameType::DownBox);

    let button_y = WINDOW_HEIGHT - BUTTON_HEIGHT - 20;
    let button_spacing = 10;
    let total_button_width = 3 * BUTTON_WIDTH + 2 * button_spacing;
    let start_x = (WINDOW_WIDTH - total_button_width) / 2;

    let convert_x = start_x;
    let help_x = start_x + BUTTON_WIDTH + button_spacing;
    let quit_x = start_x + 2 * BUTTON_WIDTH + 2 * button_spacing;

    let mut convert_btn = Button::default()
        .with_pos(convert_x, button_y)
        .with_size(BUTTON_WIDTH, BUTTON_HEIGHT)
        .with_label("Convert");
    convert_btn.set_color(Color::from_rgb(70, 130, 180));
    convert_btn.set_label_color(Color::White);

    let mut help_btn = Button::default()
        .with_pos(help_x, button_y)
        .with_size(BUTTON_WIDTH, BUTTON_HEIGHT)
        .with_label("Help");

    let mut quit_btn = Button::default()
        .with_pos(quit_x, button_y)
        .with_size(BUTTON_WIDTH, BUTTON_HEIGHT)
        .with_label("Quit");

    window.end();
    window.show();

    // Shared state
    let input_field_rc = Rc::new(RefCell::new(input_field.clone()));
    let output_field_rc = Rc::new(RefCell::new(output_field.clone()));
    let mednafen_check_rc = Rc::new(RefCell::new(mednafen_check.clone()));
    let status_buffer_rc = Rc::new(RefCell::new(status_buffer));

    // Input browse
    {
        let input_field = input_field_rc.clone();
        let output_field = output_field_rc.clone();

        input_btn.set_callback(move |_| {
            let mut chooser = NativeFileChooser::new(dialog::NativeFileChooserType::BrowseFile);
            chooser.set_title("Select PC-FX Program Image");
            chooser.set_filter("All Files\t*");

            let current = input_field.borrow().value();
            if !current.is_empty() {
                if let Some(parent) = Path::new(&current).parent() {
                    let _ = chooser.set_directory(&parent.to_path_buf());
                }
            }

            chooser.show();
            let filename = chooser.filename();

            if !filename.as_os_str().is_empty() {
                let path_str = filename.to_string_lossy().to_string();
                input_field.borrow_mut().set_value(&path_str);

                // Default output = input path with .bootflash suffix appended
                output_field.borrow_mut().set_value(&default_output_path(&path_str));
            }
        });
    }

    // Output browse
    {
        let input_field = input_field_rc.clone();
        let output_field = output_field_rc.clone();

        output_btn.set_callback(move |_| {
            let mut chooser = NativeFileChooser::new(dialog::NativeFileChooserType::BrowseSaveFile);
            chooser.set_title("Save Boot Flash Image As");
            chooser.set_filter("Boot Flash Files\t*.bootflash\nAll Files\t*");
            chooser.set_option(dialog::FileDialogOptions::SaveAsConfirm);

            let input_path = input_field.borrow().value();
            if !input_path.is_empty() {
                let input = Path::new(&input_path);
                if let Some(parent) = input.parent() {
                    let _ = chooser.set_directory(&parent.to_path_buf());
                }
                let preset = default_output_path(&input_path);
                if let Some(name) = Path::new(&preset).file_name() {
                    chooser.set_preset_file(&name.to_string_lossy());
                }
            }

            chooser.show();
            let filename = chooser.filename();

            if !filename.as_os_str().is_empty() {
                output_field.borrow_mut().set_value(&filename.to_string_lossy());
            }
        });
    }

    help_btn.set_callback(|_| {
        show_help_window();
    });

    // Convert button
    {
        let input_field = input_field_rc.clone();
        let output_field = output_field_rc.clone();
        let mednafen_check = mednafen_check_rc.clone();
        let status_buffer = status_buffer_rc.clone();

        convert_btn.set_callback(move |btn| {
            let input_path = input_field.borrow().value();
            let output_path = output_field.borrow().value();
            let mednafen = mednafen_check.borrow().is_checked();

            status_buffer.borrow_mut().set_text("");

            if input_path.is_empty() {
                status_buffer.borrow_mut().set_text("Error: Please select an input program image");
                return;
            }

            if output_path.is_empty() {
                status_buffer.borrow_mut().set_text("Error: Please specify an output filename");
                return;
            }

            if !Path::new(&input_path).exists() {
                let msg = format!("Error: Input file not found:\n{}", input_path);
                status_buffer.borrow_mut().set_text(&msg);
                return;
            }

            if Path::new(&output_path).exists() {
                let choice = dialog::choice2_default(
                    &format!("The output file already exists:\n\n{}\n\nDo you want to overwrite it?", output_path),
                    "Cancel",
                    "Overwrite",
                    ""
                );

                if choice != Some(1) {
                    status_buffer.borrow_mut().set_text("Conversion cancelled by user.");
                    return;
                }
            }

            btn.deactivate();

            if mednafen {
                status_buffer.borrow_mut().set_text("Converting program image (padded to 128 KB)...\n");
            } else {
                status_buffer.borrow_mut().set_text("Converting program image...\n");
            }
            app::awake();

            let converter = ConvertProgram::new(Config::new(mednafen));
            match converter.convert(&input_path, &output_path) {
                Ok(()) => {
                    let success_msg = format!(
                        "Success!\n\nProgram image successfully converted to:\n{}",
                        output_path
                    );
                    status_buffer.borrow_mut().set_text(&success_msg);
                }
                Err(e) => {
                    let error_msg = format!("Conversion failed:\n\n{}", e);
                    status_buffer.borrow_mut().set_text(&error_msg);
                }
            }

            btn.activate();
        });
    }

    quit_btn.set_callback(|_| {
        app::quit();
    });

    window.set_callback(|_| {
        if app::event() == enums::Event::Close {
            app::quit();
        }
    });

    app.run().unwrap();
}

/// Show help window with usage instructions
fn show_help_window() {
    let help_width = 600;
    let help_height = 520;

    let mut help_window = Window::default()
        .with_size(help_width, help_height)
        .with_label(&format!("Help - PC-FX Boot Flash Converter v{}", VERSION));
    help_window.make_resizable(false);
    help_window.set_pos(
        (app::screen_size().0 as i32 - help_width) / 2,
        (app::screen_size().1 as i32 - help_height) / 2,
    );

    let help_text = format!(
        r#"PC-FX Boot Flash Converter v{}

Copyright (c) 2025 Tommy Olsen
Licensed under the MIT License.

===============================================================

OVERVIEW

Converts a raw PC-FX program image into a bootable image for
the FX-BMP flash backup memory card.

The output file starts with a 4 KB boot sector: a card
signature block identifying the FX-BMP card type, and a boot
descriptor that tells the firmware to copy the program from
card offset $1000 to RAM address $8000 and jump to it.
The program bytes follow the boot sector unchanged.

===============================================================

MEDNAFEN PADDING

Real flash programmers only need the boot sector and the
program. The Mednafen emulator expects external backup memory
images to be exactly 128 KB, so checking the padding option
fills the rest of the image with zero bytes.

The padded and unpadded outputs are identical up to the end of
the program; only the trailing zero fill differs.

===============================================================

QUICK START

1. Select the raw program image (e.g. the linker output).

2. The output name defaults to the input name with a
   .bootflash suffix. Change it if you like.

3. Check the 128 KB padding option if the image is for
   Mednafen rather than a flash programmer.

4. Click Convert.

===============================================================

LIMITATIONS

- Programs larger than 124 KB do not fit on the card after
  the 4 KB boot sector and are rejected.
- Only the FX-BMP card type is supported.
"#, VERSION);

    let mut text_buffer = TextBuffer::default();
    text_buffer.set_text(&help_text);

    let mut text_display = TextDisplay::default()
        .with_pos(15, 15)
        .with_size(help_width - 30, help_height - 70);
    text_display.set_buffer(text_buffer);
    text_display.wrap_mode(text::WrapMode::AtBounds, 0);
    text_display.set_frame(FrameType::DownBox);

    let mut close_btn = Button::default()
        .with_pos((help_width - 100) / 2, help_height - 45)
        .with_size(100, 35)
        .with_label("Close");

    help_window.end();
    help_window.make_modal(true);
    help_window.show();

    close_btn.set_callback({
        let mut win = help_window.clone();
        move |_| {
            win.hide();
        }
    });

    while help_window.shown() {
        app::wait();
    }
}
