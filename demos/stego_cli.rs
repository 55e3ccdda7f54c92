// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Example: hide and reveal a message in a PNG image.
//!
//! Set `RUST_LOG=debug` to trace the pipeline steps.
use std::fs;
use std::process::ExitCode;

use ciphercanvas_core::boundary::{error_response, stego_filename};

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("--reveal") if args.len() == 4 => reveal(&args[2], &args[3]),
        Some("--capacity") if args.len() == 3 => capacity(&args[2]),
        Some(_) if args.len() == 4 => hide(&args[1], &args[2], &args[3]),
        _ => {
            eprintln!("Usage: stego_cli <cover.png> <message> <password>");
            eprintln!("       stego_cli --reveal <stego.png> <password>");
            eprintln!("       stego_cli --capacity <cover.png>");
            ExitCode::FAILURE
        }
    }
}

fn hide(cover_path: &str, message: &str, password: &str) -> ExitCode {
    let Some(cover) = read(cover_path) else { return ExitCode::FAILURE };
    match ciphercanvas_core::hide(&cover, message, password) {
        Ok(stego) => {
            let out_path = stego_filename();
            if let Err(e) = fs::write(&out_path, &stego) {
                eprintln!("Could not write {out_path}: {e}");
                return ExitCode::FAILURE;
            }
            println!("Stego image written to: {out_path}");
            println!("Cover: {} bytes, Stego: {} bytes", cover.len(), stego.len());
            ExitCode::SUCCESS
        }
        Err(e) => report(&e),
    }
}

fn reveal(stego_path: &str, password: &str) -> ExitCode {
    let Some(stego) = read(stego_path) else { return ExitCode::FAILURE };
    match ciphercanvas_core::reveal(&stego, password) {
        Ok(message) => {
            println!("{message}");
            ExitCode::SUCCESS
        }
        Err(e) => report(&e),
    }
}

fn capacity(cover_path: &str) -> ExitCode {
    let Some(cover) = read(cover_path) else { return ExitCode::FAILURE };
    match ciphercanvas_core::Engine::default().capacity(&cover) {
        Ok(bytes) => {
            println!("Capacity: {bytes} bytes");
            ExitCode::SUCCESS
        }
        Err(e) => report(&e),
    }
}

fn read(path: &str) -> Option<Vec<u8>> {
    match fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            eprintln!("Could not read {path}: {e}");
            None
        }
    }
}

fn report(err: &ciphercanvas_core::StegoError) -> ExitCode {
    let (status, message) = error_response(err);
    eprintln!("Error ({status}): {message}");
    ExitCode::FAILURE
}
