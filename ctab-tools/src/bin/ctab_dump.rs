use anyhow::{Context, Result};
use clap::Parser;
use compose_core::types::CTAB_HEADER_SIZE;
use compose_core::CtabLoader;
use ctab_tools::{describe_output, format_sequence, init_logging};
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Compiled compose table inspector", long_about = None)]
struct Args {
    /// Compiled table (.ctab)
    input: PathBuf,

    /// Also print the raw header bytes
    #[arg(long)]
    raw: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let data = std::fs::read(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    info!("Read {} bytes from {}", data.len(), args.input.display());

    if args.raw {
        let end = data.len().min(CTAB_HEADER_SIZE);
        println!("Raw header: {}", hex::encode_upper(&data[..end]));
    }

    let file = CtabLoader::load(&data).context("parsing compiled table")?;
    let header = file.header;
    println!("Version: {}.{}", header.major_version, header.minor_version);
    println!(
        "Counts: {} keys, {} info, {} entries",
        header.key_count, header.info_count, header.entry_count
    );

    let table = file.into_table().context("building table")?;
    println!("Nodes: {}", table.node_count());

    let metadata = table.metadata();
    if !metadata.is_empty() {
        println!("\n=== INFO ===");
        for entry in metadata.entries() {
            let id = String::from_utf8_lossy(&entry.id);
            match std::str::from_utf8(&entry.data) {
                Ok(text) => println!("{}: {:?}", id, text),
                Err(_) => println!("{}: {} bytes", id, entry.data.len()),
            }
        }
    }

    println!("\n=== KEYS ===");
    for (i, key) in table.keys().iter().enumerate() {
        println!("Key[{}]: {}", i, key.name());
    }

    println!("\n=== ENTRIES ===");
    for (sequence, output) in table.entries() {
        println!("{} -> {}", format_sequence(&sequence), describe_output(output));
    }

    Ok(())
}
