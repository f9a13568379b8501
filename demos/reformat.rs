//! Rewrites a document in canonical form.
//!
//! Run with: cargo run --example reformat

use gendoc::{from_str_with_options, to_string, Diagnostics, Document, ParseOptions};
use std::error::Error;

const SOURCE: &str = "\
Heavy hauler 6x6
// chassis
mass   12500
wheels 6 , 0.55\ttrue  \"offroad\"
tires mud-terrain, 35   ; inches

// unterminated quote below
decal \"flames
";

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let options = ParseOptions::FIRST_LINE_IS_TITLE
        | ParseOptions::ALLOW_SLASH_COMMENTS
        | ParseOptions::ALLOW_NAKED_STRINGS;

    println!("Original:\n{}", SOURCE);

    // Anomalies are collected here instead of going to the log.
    let mut diags = Diagnostics::new();
    let mut doc = Document::new();
    doc.load_from_str(SOURCE, "hauler.cfg", options, &mut diags);
    for diag in &diags {
        println!("  {}", diag);
    }

    let canonical = to_string(&doc)?;
    println!("\nCanonical:\n{}", canonical);

    let again = from_str_with_options(&canonical, options);
    assert_eq!(to_string(&again)?, canonical);
    println!("✓ Canonical form is stable");

    Ok(())
}
