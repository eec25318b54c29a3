//! The small stateless helpers: formatting, passwords and file utilities.
//!
//! Run with: cargo run --example utilities

use std::error::Error;
use tabletext::format::{format_byte_size, format_duration, trim_whitespace};
use tabletext::fs::{append_line, create_file_if_absent, file_exists, truncate_file, TimestampMode};
use tabletext::password::generate_random_password;

fn main() -> Result<(), Box<dyn Error>> {
    let uptime = format_duration(200_000.0)?;
    println!(
        "uptime: {}d {}h {}m {}s",
        uptime.days, uptime.hours, uptime.minutes, uptime.seconds
    );
    println!("size: {}", format_byte_size(123_456_789.0)?);
    println!("trimmed: '{}'", trim_whitespace("\t padded \n"));
    println!("password: {}", generate_random_password(16));

    let log = std::env::temp_dir().join("tabletext-demo.log");
    if !file_exists(&log) {
        create_file_if_absent(&log)?;
    }
    append_line("demo started", &log, TimestampMode::Both)?;
    append_line("plain line", &log, "none".parse()?)?;
    print!("{}", std::fs::read_to_string(&log)?);

    truncate_file(&log)?;
    std::fs::remove_file(&log)?;
    Ok(())
}
