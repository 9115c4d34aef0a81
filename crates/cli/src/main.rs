//! # CLI
//!
//! A REPL-style driver that exercises a [`store::Store`]. Reads commands
//! from stdin, executes them against the store, and prints results to
//! stdout — the thin external collaborator described by the design's
//! §1/§6 "driver" note. It carries no invariants of its own.
//!
//! ## Commands
//!
//! ```text
//! INSERT key value   Insert or update a key-value pair
//! GET key            Look up a key (prints value or "(nil)")
//! COMPACT            Fold all segments into one
//! EXIT / QUIT        Shut down
//! ```
//!
//! ## Configuration
//!
//! ```text
//! KV_DATABASE_PATH     Segment directory        (default: "data_store_db")
//! KV_MEMORY_THRESHOLD  Tier 1 / tier 2 capacity  (default: 5)
//! KV_SPARSE_INTERVAL    Sparse index spacing      (default: 3)
//! ```
use anyhow::Result;
use config::StoreConfig;
use std::io::{self, BufRead, Write};
use store::Store;

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn main() -> Result<()> {
    env_logger::init();

    let database_path = env_or("KV_DATABASE_PATH", "data_store_db");
    let memory_threshold: usize = env_or("KV_MEMORY_THRESHOLD", "5").parse().unwrap_or(5);
    let sparse_interval: usize = env_or("KV_SPARSE_INTERVAL", "3").parse().unwrap_or(3);

    let config = StoreConfig::new(&database_path)
        .with_memory_threshold(memory_threshold)
        .with_sparse_interval(sparse_interval);
    let mut store = Store::new(config)?;

    println!(
        "store opened (database_path={database_path}, memory_threshold={memory_threshold}, sparse_interval={sparse_interval})"
    );
    println!("Commands: INSERT key value | GET key | COMPACT | EXIT");
    print!("> ");
    io::stdout().flush().ok();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let mut parts = line.split_whitespace();
        if let Some(cmd) = parts.next() {
            match cmd.to_uppercase().as_str() {
                "INSERT" | "SET" => {
                    if let Some(k) = parts.next() {
                        let v: String = parts.collect::<Vec<&str>>().join(" ");
                        if v.is_empty() {
                            println!("ERR usage: INSERT key value");
                        } else {
                            match store.insert(k.as_bytes().to_vec(), v.as_bytes().to_vec()) {
                                Ok(()) => println!("OK"),
                                Err(e) => println!("ERR insert failed: {e}"),
                            }
                        }
                    } else {
                        println!("ERR usage: INSERT key value");
                    }
                }
                "GET" => {
                    if let Some(k) = parts.next() {
                        match store.get(k.as_bytes()) {
                            Some(v) => println!("{}", String::from_utf8_lossy(&v)),
                            None => println!("(nil)"),
                        }
                    } else {
                        println!("ERR usage: GET key");
                    }
                }
                "COMPACT" => match store.compact() {
                    Ok(()) => println!("OK"),
                    Err(e) => println!("ERR compact failed: {e}"),
                },
                "EXIT" | "QUIT" => {
                    println!("bye");
                    break;
                }
                other => {
                    println!("unknown command: {other}");
                }
            }
        }

        print!("> ");
        io::stdout().flush().ok();
    }

    Ok(())
}
