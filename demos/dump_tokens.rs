//! Tokenizes a file and prints the tokens as JSON.
//!
//! Run with: cargo run --example dump_tokens -- path/to/file.cfg [--naked] [--slash] [--title]
//!
//! Diagnostics go to stderr through `env_logger`; set `RUST_LOG=gendoc=info`
//! to see everything.

use gendoc::{Document, NamedStream, ParseOptions, TokenValue};
use std::error::Error;
use std::fs::File;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut path = None;
    let mut options = ParseOptions::NONE;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--naked" => options |= ParseOptions::ALLOW_NAKED_STRINGS,
            "--slash" => options |= ParseOptions::ALLOW_SLASH_COMMENTS,
            "--title" => options |= ParseOptions::FIRST_LINE_IS_TITLE,
            _ => path = Some(arg),
        }
    }
    let path = path.ok_or("usage: dump_tokens <file> [--naked] [--slash] [--title]")?;

    let mut doc = Document::new();
    let stream = NamedStream::new(path.clone(), File::open(&path)?);
    doc.load_from_stream(stream, options, gendoc::LogSink)?;

    let values: Vec<TokenValue> = doc.values().collect();
    println!("{}", serde_json::to_string_pretty(&values)?);
    if let Some(title) = doc.title_text() {
        log::info!("title: {}", title);
    }

    Ok(())
}
