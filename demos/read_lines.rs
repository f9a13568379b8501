//! Walks a document line by line with `DocReader`.
//!
//! Run with: cargo run --example read_lines

use gendoc::{from_str, TokenValue};

const SOURCE: &str = "\
; nodes: id, x, y, z
node 1, 0.0, 0.0, 0.0
node 2, 1.5, 0.0, 0.0

; beams: from, to, breakable
beam 1, 2, false
beam 2, 3
";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let doc = from_str(SOURCE);
    let mut reader = doc.reader();

    // Comment-only and blank lines are skipped.
    if !reader.is_keyword() {
        reader.seek_next_line();
    }

    while !reader.end_of_file() {
        let keyword = reader.keyword_value().unwrap_or_default();
        let args = reader.count_line_args().saturating_sub(1);

        match &*keyword {
            "node" if args == 4 => {
                let id = reader.number_value_at(1).unwrap_or_default();
                let coords: Vec<f32> = (2..5).filter_map(|i| reader.number_value_at(i)).collect();
                println!("node {} at {:?}", id, coords);
            }
            "beam" => {
                let from = reader.number_value_at(1).unwrap_or_default();
                let to = reader.number_value_at(2).unwrap_or_default();
                // Optional trailing flag.
                let breakable = args < 3 || reader.bool_value_at(3).unwrap_or(true);
                println!("beam {} -> {} (breakable: {})", from, to, breakable);
            }
            other => {
                let rest: Vec<TokenValue> = (1..=args).filter_map(|i| reader.value_at(i)).collect();
                println!("skipping '{}' with {:?}", other, rest);
            }
        }

        if reader.seek_next_line() {
            break;
        }
    }
}
