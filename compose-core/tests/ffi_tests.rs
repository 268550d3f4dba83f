mod common;

use std::ffi::{CStr, CString};
use std::ptr;

use common::*;
use compose_core::ffi::*;
use pretty_assertions::assert_eq;

fn empty_output() -> ComposeOutput {
    ComposeOutput {
        kind: -1,
        text: ptr::null_mut(),
        text_len: 0,
        redeliver_key: -1,
        replay: ptr::null_mut(),
        replay_len: 0,
        then_key: ptr::null_mut(),
    }
}

fn load_grave_table() -> *mut TableHandle {
    load_table(&grave_table())
}

fn load_table(table: &compose_core::SequenceTable) -> *mut TableHandle {
    let bytes = table.to_ctab().unwrap();
    let mut handle = ptr::null_mut();
    let result = unsafe { compose_table_load_from_memory(bytes.as_ptr(), bytes.len(), &mut handle) };
    assert_eq!(result, ComposeResult::Success);
    assert!(!handle.is_null());
    handle
}

unsafe fn advance(session: *mut SessionHandle, name: &str, output: &mut ComposeOutput) -> ComposeResult {
    let name = CString::new(name).unwrap();
    compose_session_advance(session, name.as_ptr(), output)
}

#[test]
fn test_ffi_commit() {
    unsafe {
        let table = load_grave_table();
        assert_eq!(compose_table_sequence_count(table), 2);
        let session = compose_session_new(table);
        let mut output = empty_output();

        assert_eq!(advance(session, "DeadGrave", &mut output), ComposeResult::Success);
        assert_eq!(output.kind, COMPOSE_OUTCOME_CONTINUE);
        assert_eq!(compose_session_is_composing(session), 1);

        advance(session, "LetterA", &mut output);
        assert_eq!(output.kind, COMPOSE_OUTCOME_COMMIT);
        assert_eq!(CStr::from_ptr(output.text).to_str().unwrap(), "à");
        assert_eq!(output.text_len, "à".len());
        assert_eq!(output.redeliver_key, 0);
        compose_output_free(&mut output);
        assert!(output.text.is_null());

        compose_session_free(session);
        compose_table_free(table);
    }
}

#[test]
fn test_ffi_prefix_commit_asks_for_redelivery() {
    unsafe {
        let table = load_table(&table_from(&[
            (&["X", "Y"], "p"),
            (&["X", "Y", "Z"], "q"),
            (&["W", "V"], "r"),
        ]));
        let session = compose_session_new(table);
        let mut output = empty_output();

        advance(session, "X", &mut output);
        advance(session, "Y", &mut output);
        assert_eq!(output.kind, COMPOSE_OUTCOME_CONTINUE);
        assert_eq!(output.redeliver_key, 0);

        advance(session, "W", &mut output);
        assert_eq!(output.kind, COMPOSE_OUTCOME_COMMIT);
        assert_eq!(CStr::from_ptr(output.text).to_str().unwrap(), "p");
        assert_eq!(output.redeliver_key, 1);
        compose_output_free(&mut output);

        // Feeding W again starts its own sequence
        advance(session, "W", &mut output);
        assert_eq!(output.kind, COMPOSE_OUTCOME_CONTINUE);
        advance(session, "V", &mut output);
        assert_eq!(output.kind, COMPOSE_OUTCOME_COMMIT);
        assert_eq!(CStr::from_ptr(output.text).to_str().unwrap(), "r");
        assert_eq!(output.redeliver_key, 0);
        compose_output_free(&mut output);

        compose_session_free(session);
        compose_table_free(table);
    }
}

#[test]
fn test_ffi_output_with_nul_is_exact() {
    unsafe {
        let table = load_table(&table_from(&[(&["A"], "a\0b")]));
        let session = compose_session_new(table);
        let mut output = empty_output();

        advance(session, "A", &mut output);
        assert_eq!(output.kind, COMPOSE_OUTCOME_COMMIT);
        assert!(!output.text.is_null());
        assert_eq!(output.text_len, 3);
        let bytes = std::slice::from_raw_parts(output.text as *const u8, output.text_len);
        assert_eq!(bytes, b"a\0b");
        compose_output_free(&mut output);
        assert_eq!(output.text_len, 0);

        compose_session_free(session);
        compose_table_free(table);
    }
}

#[test]
fn test_ffi_abort_lists_replay() {
    unsafe {
        let table = load_grave_table();
        let session = compose_session_new(table);
        let mut output = empty_output();

        advance(session, "DeadGrave", &mut output);
        advance(session, "LetterZ", &mut output);
        assert_eq!(output.kind, COMPOSE_OUTCOME_ABORT);
        assert_eq!(output.replay_len, 1);
        assert_eq!(CStr::from_ptr(*output.replay).to_str().unwrap(), "DeadGrave");
        assert_eq!(CStr::from_ptr(output.then_key).to_str().unwrap(), "LetterZ");
        compose_output_free(&mut output);
        assert!(output.replay.is_null());
        assert_eq!(compose_session_is_composing(session), 0);

        compose_session_free(session);
        compose_table_free(table);
    }
}

#[test]
fn test_ffi_cancel_and_reset() {
    unsafe {
        let table = load_grave_table();
        let session = compose_session_new(table);
        let mut output = empty_output();

        compose_session_cancel_last(session, &mut output);
        assert_eq!(output.kind, COMPOSE_OUTCOME_NOT_COMPOSING);

        advance(session, "DeadGrave", &mut output);
        compose_session_cancel_last(session, &mut output);
        assert_eq!(output.kind, COMPOSE_OUTCOME_IDLE);

        advance(session, "DeadGrave", &mut output);
        assert_eq!(compose_session_reset(session), ComposeResult::Success);
        assert_eq!(compose_session_is_composing(session), 0);

        compose_session_free(session);
        compose_table_free(table);
    }
}

#[test]
fn test_ffi_session_outlives_table_handle() {
    unsafe {
        let table = load_grave_table();
        let session = compose_session_new(table);
        compose_table_free(table);

        let mut output = empty_output();
        advance(session, "DeadGrave", &mut output);
        advance(session, "LetterE", &mut output);
        assert_eq!(output.kind, COMPOSE_OUTCOME_COMMIT);
        assert_eq!(CStr::from_ptr(output.text).to_str().unwrap(), "è");
        compose_output_free(&mut output);
        compose_session_free(session);
    }
}

#[test]
fn test_ffi_rejects_bad_input() {
    unsafe {
        let mut handle = ptr::null_mut();
        let garbage = b"not a table at all";
        assert_eq!(
            compose_table_load_from_memory(garbage.as_ptr(), garbage.len(), &mut handle),
            ComposeResult::ErrorLoadFailure
        );
        assert!(handle.is_null());

        assert_eq!(
            compose_table_load_from_memory(ptr::null(), 0, &mut handle),
            ComposeResult::ErrorInvalidParameter
        );

        let missing = CString::new("/nonexistent/table.ctab").unwrap();
        assert_eq!(
            compose_table_load_from_file(missing.as_ptr(), &mut handle),
            ComposeResult::ErrorLoadFailure
        );

        assert!(compose_session_new(ptr::null()).is_null());
        assert_eq!(compose_session_reset(ptr::null_mut()), ComposeResult::ErrorInvalidParameter);

        let mut output = empty_output();
        assert_eq!(
            advance(ptr::null_mut(), "DeadGrave", &mut output),
            ComposeResult::ErrorInvalidParameter
        );
    }
}

#[test]
fn test_ffi_empty_key_name() {
    unsafe {
        let table = load_grave_table();
        let session = compose_session_new(table);
        let mut output = empty_output();
        assert_eq!(advance(session, "", &mut output), ComposeResult::ErrorInvalidParameter);
        compose_session_free(session);
        compose_table_free(table);
    }
}

#[test]
fn test_ffi_version() {
    let version = unsafe { CStr::from_ptr(compose_get_version()) };
    assert_eq!(version.to_str().unwrap(), env!("CARGO_PKG_VERSION"));
}
