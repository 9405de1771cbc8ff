//! Build script for pixie-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Parses and validates board.toml, then embeds it as postcard bytes

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use pixie_core::config::BoardConfig;

fn main() {
    setup_linker();
    embed_board_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Turn board.toml into OUT_DIR/board.bin
fn embed_board_config() {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");
    if !config_path.exists() {
        fail(
            "board.toml not found",
            "The firmware requires a board.toml in the pixie-firmware directory.",
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read board.toml", &e.to_string()),
    };

    let config: BoardConfig = match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => fail("Invalid board.toml", &e.to_string()),
    };

    if let Err(e) = config.validate() {
        fail("board.toml rejected", &format!("{:?}", e));
    }

    let bytes = match postcard::to_allocvec(&config) {
        Ok(bytes) => bytes,
        Err(e) => fail("Failed to encode board config", &e.to_string()),
    };

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("board.bin"), bytes).unwrap();

    println!(
        "cargo:warning=board.toml validated: {}x{}, {} keys, {} ms tick",
        config.display.width,
        config.display.height,
        config.keys.len(),
        config.scheduler.tick_period_ms
    );
}

/// Abort the build with a boxed diagnostic
fn fail(title: &str, detail: &str) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        format_error_lines(detail)
    );
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
