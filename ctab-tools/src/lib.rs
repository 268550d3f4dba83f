//! Shared helpers for the table tools

use compose_core::{ComposeSession, Outcome, SymbolicKey};
use log::LevelFilter;

/// Initialize env_logger; each `-v` raises the default level one step.
/// `RUST_LOG` still wins when set.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

/// Space separated key names
pub fn format_sequence(sequence: &[SymbolicKey]) -> String {
    sequence
        .iter()
        .map(|k| k.name())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Output text with its code points, e.g. `"à" (U+00E0)`
pub fn describe_output(text: &str) -> String {
    let code_points: Vec<String> = text.chars().map(|c| format!("U+{:04X}", c as u32)).collect();
    format!("{:?} ({})", text, code_points.join(" "))
}

pub fn describe_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::NotComposing => "not composing".to_string(),
        Outcome::Continue => "continue".to_string(),
        Outcome::Idle => "idle".to_string(),
        Outcome::Commit(text) => format!("commit {}", describe_output(text)),
        Outcome::Abort { replay, then } => {
            format!("abort, replay [{}] then {}", format_sequence(replay), then.name())
        }
    }
}

/// One step of a replayed key script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Key(SymbolicKey),
    CancelLast,
    Reset,
}

impl Step {
    pub fn parse(word: &str) -> Step {
        match word {
            "BS" => Step::CancelLast,
            "RESET" => Step::Reset,
            name => Step::Key(SymbolicKey::new(name)),
        }
    }
}

/// One engine call made while running a script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub step: Step,
    /// `None` for a reset
    pub outcome: Option<Outcome>,
    /// Fed again by the engine's contract rather than typed by the user
    pub redelivered: bool,
    /// Keys buffered after the call
    pub typed: Vec<SymbolicKey>,
}

/// Runs `steps` through `session` the way a host would.
///
/// A key that forced a commit without being consumed is fed again, and the
/// key that aborted a sequence is fed again after the replay.
pub fn run_script(session: &mut ComposeSession<'_>, steps: &[Step]) -> Vec<Delivery> {
    let mut deliveries = Vec::new();
    for step in steps {
        match step {
            Step::Key(key) => deliver_key(session, key.clone(), false, &mut deliveries),
            Step::CancelLast => {
                let outcome = session.cancel_last();
                deliveries.push(Delivery {
                    step: step.clone(),
                    outcome: Some(outcome),
                    redelivered: false,
                    typed: session.typed().to_vec(),
                });
            }
            Step::Reset => {
                session.reset();
                deliveries.push(Delivery {
                    step: step.clone(),
                    outcome: None,
                    redelivered: false,
                    typed: Vec::new(),
                });
            }
        }
    }
    deliveries
}

fn deliver_key(
    session: &mut ComposeSession<'_>,
    key: SymbolicKey,
    redelivered: bool,
    deliveries: &mut Vec<Delivery>,
) {
    let consumed = session.accepts(&key);
    let outcome = session.advance(key.clone());
    deliveries.push(Delivery {
        step: Step::Key(key.clone()),
        outcome: Some(outcome.clone()),
        redelivered,
        typed: session.typed().to_vec(),
    });

    match outcome {
        Outcome::Commit(_) if !consumed => deliver_key(session, key, true, deliveries),
        Outcome::Abort { then, .. } => deliver_key(session, then, true, deliveries),
        _ => {}
    }
}
