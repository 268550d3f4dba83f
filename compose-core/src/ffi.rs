//! Foreign Function Interface for the compose engine
//!
//! This module provides a C-compatible API so platform input-method hosts
//! can load a compiled table once and drive one session per input view.
//! Tables are reference counted: a session keeps its table alive even after
//! the table handle is freed.

use crate::engine::{ComposeState, Outcome};
use crate::table::SequenceTable;
use crate::types::SymbolicKey;
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};
use std::ptr;
use std::sync::{Arc, Mutex};

/// Opaque handle to a loaded sequence table
pub struct TableHandle {
    table: Arc<SequenceTable>,
}

/// Opaque handle to a compose session
pub struct SessionHandle {
    table: Arc<SequenceTable>,
    state: Mutex<ComposeState>,
}

/// Result codes for FFI functions
#[repr(C)]
#[derive(Debug, PartialEq)]
pub enum ComposeResult {
    Success = 0,
    ErrorInvalidHandle = -1,
    ErrorInvalidParameter = -2,
    ErrorLoadFailure = -3,
    ErrorUtf8Conversion = -4,
    ErrorEngineFailure = -5,
}

pub const COMPOSE_OUTCOME_NOT_COMPOSING: c_int = 0;
pub const COMPOSE_OUTCOME_CONTINUE: c_int = 1;
pub const COMPOSE_OUTCOME_COMMIT: c_int = 2;
pub const COMPOSE_OUTCOME_ABORT: c_int = 3;
pub const COMPOSE_OUTCOME_IDLE: c_int = 4;

/// Outcome of one session call. Release with `compose_output_free`.
#[repr(C)]
pub struct ComposeOutput {
    /// One of the `COMPOSE_OUTCOME_*` constants
    pub kind: c_int,
    /// Committed text (UTF-8), null unless `kind` is commit. Null-terminated,
    /// but `text_len` is authoritative since outputs may contain NUL.
    pub text: *mut c_char,
    /// Byte length of `text`, excluding the terminator
    pub text_len: usize,
    /// 1 when the key passed to `compose_session_advance` was not consumed by
    /// a commit and must be fed to the session again
    pub redeliver_key: c_int,
    /// Key names to replay as ordinary input, null unless `kind` is abort
    pub replay: *mut *mut c_char,
    pub replay_len: usize,
    /// Key to deliver again after the replay, null unless `kind` is abort
    pub then_key: *mut c_char,
}

impl ComposeOutput {
    fn clear(&mut self) {
        self.kind = COMPOSE_OUTCOME_NOT_COMPOSING;
        self.text = ptr::null_mut();
        self.text_len = 0;
        self.redeliver_key = 0;
        self.replay = ptr::null_mut();
        self.replay_len = 0;
        self.then_key = ptr::null_mut();
    }

    fn fill(&mut self, outcome: Outcome) {
        self.clear();
        match outcome {
            Outcome::NotComposing => self.kind = COMPOSE_OUTCOME_NOT_COMPOSING,
            Outcome::Continue => self.kind = COMPOSE_OUTCOME_CONTINUE,
            Outcome::Idle => self.kind = COMPOSE_OUTCOME_IDLE,
            Outcome::Commit(text) => {
                self.kind = COMPOSE_OUTCOME_COMMIT;
                self.text_len = text.len();
                self.text = into_text_buffer(text);
            }
            Outcome::Abort { replay, then } => {
                self.kind = COMPOSE_OUTCOME_ABORT;
                let names: Vec<*mut c_char> = replay.iter().map(|k| into_c_string(k.name())).collect();
                self.replay_len = names.len();
                self.replay = Box::into_raw(names.into_boxed_slice()) as *mut *mut c_char;
                self.then_key = into_c_string(then.name());
            }
        }
    }
}

/// Key names reaching this point arrived as C strings, so they hold no NUL
fn into_c_string(s: &str) -> *mut c_char {
    CString::new(s)
        .map(|c| c.into_raw())
        .unwrap_or(ptr::null_mut())
}

/// Exact output bytes plus a terminator; freed with `free_text_buffer`
fn into_text_buffer(text: String) -> *mut c_char {
    let mut bytes = text.into_bytes();
    bytes.push(0);
    Box::into_raw(bytes.into_boxed_slice()) as *mut c_char
}

unsafe fn free_text_buffer(text: *mut c_char, text_len: usize) {
    let _ = Box::from_raw(ptr::slice_from_raw_parts_mut(text as *mut u8, text_len + 1));
}

fn table_from_bytes(data: &[u8], out_table: *mut *mut TableHandle) -> ComposeResult {
    match SequenceTable::from_ctab(data) {
        Ok(table) => {
            let handle = Box::new(TableHandle {
                table: Arc::new(table),
            });
            unsafe { *out_table = Box::into_raw(handle) };
            ComposeResult::Success
        }
        Err(e) => {
            log::warn!("Failed to load compose table: {}", e);
            ComposeResult::ErrorLoadFailure
        }
    }
}

/// Loads a compiled table from a memory buffer
///
/// # Safety
/// `data` must point to `data_len` readable bytes and `out_table` must be a
/// valid pointer to write the new handle to.
#[no_mangle]
pub unsafe extern "C" fn compose_table_load_from_memory(
    data: *const u8,
    data_len: usize,
    out_table: *mut *mut TableHandle,
) -> ComposeResult {
    if data.is_null() || out_table.is_null() || data_len == 0 {
        return ComposeResult::ErrorInvalidParameter;
    }

    let data_slice = std::slice::from_raw_parts(data, data_len);
    table_from_bytes(data_slice, out_table)
}

/// Loads a compiled table file
///
/// # Safety
/// `path` must be a valid null-terminated string and `out_table` a valid
/// pointer to write the new handle to.
#[no_mangle]
pub unsafe extern "C" fn compose_table_load_from_file(
    path: *const c_char,
    out_table: *mut *mut TableHandle,
) -> ComposeResult {
    if path.is_null() || out_table.is_null() {
        return ComposeResult::ErrorInvalidParameter;
    }

    let path_str = match CStr::from_ptr(path).to_str() {
        Ok(s) => s,
        Err(_) => return ComposeResult::ErrorUtf8Conversion,
    };

    match std::fs::read(path_str) {
        Ok(data) => table_from_bytes(&data, out_table),
        Err(e) => {
            log::warn!("Failed to read compose table {}: {}", path_str, e);
            ComposeResult::ErrorLoadFailure
        }
    }
}

/// Frees a table handle. Sessions created from it stay valid.
///
/// # Safety
/// `handle` must come from a `compose_table_load_*` call and not be freed twice.
#[no_mangle]
pub unsafe extern "C" fn compose_table_free(handle: *mut TableHandle) {
    if !handle.is_null() {
        let _ = Box::from_raw(handle);
    }
}

/// Number of complete sequences in the table
///
/// # Safety
/// `handle` must be null or a live table handle.
#[no_mangle]
pub unsafe extern "C" fn compose_table_sequence_count(handle: *const TableHandle) -> usize {
    if handle.is_null() {
        return 0;
    }
    (*handle).table.len()
}

/// Creates an idle session on a table
///
/// # Safety
/// `table` must be null or a live table handle.
#[no_mangle]
pub unsafe extern "C" fn compose_session_new(table: *const TableHandle) -> *mut SessionHandle {
    if table.is_null() {
        return ptr::null_mut();
    }
    let handle = Box::new(SessionHandle {
        table: Arc::clone(&(*table).table),
        state: Mutex::new(ComposeState::new()),
    });
    Box::into_raw(handle)
}

/// Frees a session
///
/// # Safety
/// `handle` must come from `compose_session_new` and not be freed twice.
#[no_mangle]
pub unsafe extern "C" fn compose_session_free(handle: *mut SessionHandle) {
    if !handle.is_null() {
        let _ = Box::from_raw(handle);
    }
}

/// Feeds one key, named by its symbolic identity.
///
/// On a commit with `redeliver_key` set, call this again with the same key
/// after inserting the text. On an abort, replay `replay` as ordinary input
/// and then feed `then_key`.
///
/// # Safety
/// `handle` must be a live session, `key_name` a valid null-terminated
/// string and `output` a valid pointer. Release the output with
/// `compose_output_free`.
#[no_mangle]
pub unsafe extern "C" fn compose_session_advance(
    handle: *mut SessionHandle,
    key_name: *const c_char,
    output: *mut ComposeOutput,
) -> ComposeResult {
    if handle.is_null() || key_name.is_null() || output.is_null() {
        return ComposeResult::ErrorInvalidParameter;
    }

    let handle = &*handle;
    let output = &mut *output;
    output.clear();

    let name = match CStr::from_ptr(key_name).to_str() {
        Ok(s) if !s.is_empty() => s,
        Ok(_) => return ComposeResult::ErrorInvalidParameter,
        Err(_) => return ComposeResult::ErrorUtf8Conversion,
    };

    let key = SymbolicKey::new(name);
    match handle.state.lock() {
        Ok(mut state) => {
            let consumed = state.accepts(&handle.table, &key);
            let outcome = state.advance(&handle.table, key);
            let forced_commit = outcome.is_commit() && !consumed;
            output.fill(outcome);
            output.redeliver_key = forced_commit as c_int;
            ComposeResult::Success
        }
        Err(_) => ComposeResult::ErrorEngineFailure,
    }
}

/// Removes the last key of a partial sequence
///
/// # Safety
/// `handle` must be a live session and `output` a valid pointer.
#[no_mangle]
pub unsafe extern "C" fn compose_session_cancel_last(
    handle: *mut SessionHandle,
    output: *mut ComposeOutput,
) -> ComposeResult {
    if handle.is_null() || output.is_null() {
        return ComposeResult::ErrorInvalidParameter;
    }

    let handle = &*handle;
    let output = &mut *output;
    output.clear();

    match handle.state.lock() {
        Ok(mut state) => {
            output.fill(state.cancel_last());
            ComposeResult::Success
        }
        Err(_) => ComposeResult::ErrorEngineFailure,
    }
}

/// Discards any partial sequence
///
/// # Safety
/// `handle` must be null or a live session.
#[no_mangle]
pub unsafe extern "C" fn compose_session_reset(handle: *mut SessionHandle) -> ComposeResult {
    if handle.is_null() {
        return ComposeResult::ErrorInvalidParameter;
    }

    match (*handle).state.lock() {
        Ok(mut state) => {
            state.reset();
            ComposeResult::Success
        }
        Err(_) => ComposeResult::ErrorEngineFailure,
    }
}

/// Whether the session holds a partial sequence (0=false, 1=true)
///
/// # Safety
/// `handle` must be null or a live session.
#[no_mangle]
pub unsafe extern "C" fn compose_session_is_composing(handle: *const SessionHandle) -> c_int {
    if handle.is_null() {
        return 0;
    }
    match (*handle).state.lock() {
        Ok(state) => state.is_composing() as c_int,
        Err(_) => 0,
    }
}

/// Frees the strings owned by an output and clears it
///
/// # Safety
/// `output` must be null or point to an output filled by this library.
#[no_mangle]
pub unsafe extern "C" fn compose_output_free(output: *mut ComposeOutput) {
    if output.is_null() {
        return;
    }
    let output = &mut *output;

    if !output.text.is_null() {
        free_text_buffer(output.text, output.text_len);
    }
    if !output.then_key.is_null() {
        let _ = CString::from_raw(output.then_key);
    }
    if !output.replay.is_null() {
        let names = Box::from_raw(ptr::slice_from_raw_parts_mut(output.replay, output.replay_len));
        for name in names.iter() {
            if !name.is_null() {
                let _ = CString::from_raw(*name);
            }
        }
    }

    output.clear();
}

/// Get library version
#[no_mangle]
pub extern "C" fn compose_get_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}
