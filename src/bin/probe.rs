// Copyright 2024 Lexi Robinson
// Licensed under the EUPL-1.2

//! Small manual debug aid: decode a captured wire message from a hex dump
//! and report what it parsed as. Point it at a `.hex` file (whitespace-
//! separated hex bytes, as captured from a packet trace) to sanity-check
//! framing without wiring up a full controller exchange.

use std::error::Error;

use omnilogic_local::wire::Message;

fn read_hex_file(path: &str) -> Result<Vec<u8>, Box<dyn Error>> {
    let text = std::fs::read_to_string(path)?;
    text.split_whitespace().map(|byte| u8::from_str_radix(byte, 16).map_err(Into::into)).collect()
}

fn probe_file(path: &str) -> Result<(), Box<dyn Error>> {
    let bytes = read_hex_file(path)?;
    let msg = Message::decode(&bytes)?;
    println!("{msg}");
    Ok(())
}

fn main() {
    for path in std::env::args().skip(1) {
        println!("probing {path}");
        match probe_file(&path) {
            Ok(()) => println!("  decoded ok"),
            Err(e) => eprintln!("  failed: {e}"),
        }
    }
}
