//! Helpers for driving sessions in tests

use compose_core::{ComposeSession, Outcome, SymbolicKey};

/// Feed key names one by one and collect every outcome
pub fn advance_all(session: &mut ComposeSession<'_>, names: &[&str]) -> Vec<Outcome> {
    names
        .iter()
        .map(|name| session.advance(SymbolicKey::new(name)))
        .collect()
}

/// Deliver keys the way an event adapter does: re-deliver the key that
/// forced a commit, replay aborted keys, and collect the resulting text.
///
/// Ordinary (uncomposed) keys appear in the output as `<Name>`.
pub fn type_keys(session: &mut ComposeSession<'_>, names: &[&str]) -> String {
    let mut out = String::new();
    for name in names {
        deliver(session, SymbolicKey::new(name), &mut out);
    }
    out
}

fn deliver(session: &mut ComposeSession<'_>, key: SymbolicKey, out: &mut String) {
    let consumed = session.accepts(&key);
    match session.advance(key.clone()) {
        Outcome::NotComposing => out.push_str(&format!("<{}>", key)),
        Outcome::Continue | Outcome::Idle => {}
        Outcome::Commit(text) => {
            out.push_str(&text);
            if !consumed {
                deliver(session, key, out);
            }
        }
        Outcome::Abort { replay, then } => {
            for k in replay {
                out.push_str(&format!("<{}>", k));
            }
            deliver(session, then, out);
        }
    }
}

pub fn commit(text: &str) -> Outcome {
    Outcome::Commit(text.to_string())
}
