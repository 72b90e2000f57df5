// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! serda-blob-sub - receive wire frames as opaque blobs
//!
//! Reads hex-encoded frames from stdin (one per line) and prints each payload
//! byte by byte, without interpreting it.

use clap::Parser;
use colored::*;
use serda::{BlobDatum, BlobTopic, Serdata, SerdataKind, Sertopic};
use serda_demo::{hex_decode, TopicArgs};
use std::io::{self, BufRead, Write};
use std::sync::Arc;

/// Print received blobs
#[derive(Parser, Debug)]
#[command(name = "serda-blob-sub")]
#[command(version)]
#[command(about = "Decode hex-encoded frames from stdin as opaque blobs")]
struct Args {
    #[command(flatten)]
    topic: TopicArgs,

    /// Maximum number of samples to receive (0 = unlimited)
    #[arg(short = 'n', long, default_value = "0")]
    count: u64,
}

fn main() {
    // Initialize logger for RUST_LOG-based debug output
    env_logger::init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let topic = Arc::new(Sertopic::new(
        args.topic.topic.clone(),
        args.topic.type_name.clone(),
        BlobTopic,
    ));

    eprintln!("{} {}", "Topic Name:".bold(), topic.name().cyan());
    if let Some(partition) = &args.topic.partition {
        eprintln!("{} {}", "Partition:".bold(), partition);
    }

    let stdout = io::stdout();
    let mut received = 0u64;
    for (lineno, line) in io::stdin().lock().lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let frame = hex_decode(&line).map_err(|e| format!("line {}: {}", lineno + 1, e))?;
        let datum = BlobDatum::from_ser_iov(&topic, SerdataKind::Data, &[&frame[..]], frame.len())?;
        log::debug!(
            "[serda-blob-sub] frame {} size={} hash={:#010x}",
            lineno + 1,
            datum.size(),
            datum.hash()
        );

        let mut out = stdout.lock();
        writeln!(out, "Payload:\n Size = {}", datum.size())?;
        for byte in datum.payload() {
            write!(out, "{} ", byte)?;
        }
        writeln!(out)?;
        out.flush()?;

        received += 1;
        if args.count != 0 && received >= args.count {
            break;
        }
    }

    eprintln!("{} {} sample(s)", "Received".green(), received);
    Ok(())
}
