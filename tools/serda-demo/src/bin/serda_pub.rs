// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! serda-pub - publish key/value sensor readings as CDR wire frames
//!
//! Writes one hex-encoded frame per line on stdout, ready to be piped into a
//! subscriber.

use clap::Parser;
use colored::*;
use serda::{KeyValueDatum, KeyValueSample, KeyValueTopic, Serdata, SerdataKind, Sertopic};
use serda_demo::{hex_encode, unique_topic_name, TopicArgs};
use std::io::{self, Write};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const READINGS: [(&str, &str); 2] = [
    ("/home/kitchen/sensor", "23.0"),
    ("/home/kitchen/C2O2", "0.07"),
];

/// Publish key/value samples
#[derive(Parser, Debug)]
#[command(name = "serda-pub")]
#[command(version)]
#[command(about = "Publish key/value samples as hex-encoded CDR frames")]
struct Args {
    #[command(flatten)]
    topic: TopicArgs,

    /// Number of publication rounds (0 = unlimited)
    #[arg(short = 'n', long, default_value = "1")]
    count: u64,

    /// Delay between rounds in milliseconds
    #[arg(short, long, default_value = "1000")]
    interval_ms: u64,

    /// Suffix the topic name so concurrent runs do not collide
    #[arg(short, long)]
    unique: bool,
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
    let topic_name = if args.unique {
        unique_topic_name(&args.topic.topic)
    } else {
        args.topic.topic.clone()
    };
    let topic = Arc::new(Sertopic::new(
        topic_name,
        args.topic.type_name.clone(),
        KeyValueTopic,
    ));

    eprintln!("{} {}", "Topic:".bold(), topic.name().cyan());
    eprintln!("{} {}", "Type:".bold(), topic.type_name());
    if let Some(partition) = &args.topic.partition {
        eprintln!("{} {}", "Partition:".bold(), partition);
    }

    let stdout = io::stdout();
    let mut round = 0u64;
    loop {
        for (key, value) in READINGS {
            let sample = KeyValueSample::new(key, value);
            let datum = KeyValueDatum::from_sample(&topic, SerdataKind::Data, &sample)?;
            let mut wire = vec![0u8; datum.size() as usize];
            datum.to_ser(0, wire.len(), &mut wire)?;
            log::info!(
                "[serda-pub] {} size={} keyhash={}",
                datum,
                datum.size(),
                datum.get_keyhash(false)
            );

            let mut out = stdout.lock();
            writeln!(out, "{}", hex_encode(&wire))?;
            out.flush()?;
        }

        round += 1;
        if args.count != 0 && round >= args.count {
            break;
        }
        thread::sleep(Duration::from_millis(args.interval_ms));
    }

    eprintln!("{} {} round(s)", "Published".green(), round);
    Ok(())
}
