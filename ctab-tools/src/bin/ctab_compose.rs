use anyhow::{Context, Result};
use clap::Parser;
use compose_core::{new_session, SequenceTable};
use ctab_tools::{describe_outcome, format_sequence, init_logging, run_script, Step};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Replay key names through a compose session",
    long_about = "Feeds each KEY to one session on the table and prints the outcome. \
                  Keys the engine hands back are fed again and shown as `again`. \
                  BS cancels the last key of a partial sequence, RESET drops it."
)]
struct Args {
    /// Compiled table (.ctab)
    table: PathBuf,

    /// Key names, `BS` or `RESET`
    #[arg(value_name = "KEY", required = true)]
    keys: Vec<String>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let table = SequenceTable::load_file(&args.table)
        .with_context(|| format!("loading {}", args.table.display()))?;
    let mut session = new_session(&table);

    let steps: Vec<Step> = args.keys.iter().map(|w| Step::parse(w)).collect();
    for delivery in run_script(&mut session, &steps) {
        let label = match &delivery.step {
            Step::Key(key) if delivery.redelivered => format!("  again {}", key.name()),
            Step::Key(key) => key.name().to_string(),
            Step::CancelLast => "BS".to_string(),
            Step::Reset => "RESET".to_string(),
        };
        let outcome = match &delivery.outcome {
            Some(outcome) => describe_outcome(outcome),
            None => "reset".to_string(),
        };

        if delivery.typed.is_empty() {
            println!("{:<16} {}", label, outcome);
        } else {
            println!("{:<16} {}  [{}]", label, outcome, format_sequence(&delivery.typed));
        }
    }

    if session.is_composing() {
        println!("(still composing: {})", format_sequence(session.typed()));
    }

    Ok(())
}
