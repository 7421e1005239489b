// C ABI for hosts that embed the engine (editor front-ends).
// Every engine is an opaque handle owned by the caller; strings cross the
// boundary as UTF-8 JSON and must be released with `rijm_free_string`.
use crate::config::load_config;
use crate::slang::SlangTerm;
use crate::RhymeEngine;
use libc::c_char;
use serde::Serialize;
use std::ffi::{CStr, CString};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::ptr;

/// Pass as `max_results` to use the engine's configured result count.
pub const RIJM_CONFIGURED_MAX_RESULTS: u32 = u32::MAX;

#[derive(Serialize)]
struct FlowReply<'a> {
    syllables: &'a [usize],
    suggestion: &'a str,
}

unsafe fn read_str<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        return None;
    }
    CStr::from_ptr(s).to_str().ok()
}

fn into_c_string(json: String) -> *mut c_char {
    CString::new(json)
        .map(CString::into_raw)
        .unwrap_or(ptr::null_mut())
}

fn json_reply<F>(name: &str, fallback: &str, f: F) -> *mut c_char
where
    F: FnOnce() -> Option<String>,
{
    let json = catch_unwind(AssertUnwindSafe(f))
        .unwrap_or_else(|_| {
            tracing::error!("Panic in {}", name);
            None
        })
        .unwrap_or_else(|| fallback.to_string());
    into_c_string(json)
}

/// Creates an engine from the user's configuration, falling back to defaults.
#[no_mangle]
pub extern "C" fn rijm_engine_new() -> *mut RhymeEngine {
    let result = catch_unwind(|| {
        let config = load_config(None).unwrap_or_else(|e| {
            tracing::warn!("{}, using default configuration", e);
            Default::default()
        });
        Box::into_raw(Box::new(RhymeEngine::from_config(&config)))
    });
    result.unwrap_or_else(|_| {
        tracing::error!("Panic during engine initialization");
        ptr::null_mut()
    })
}

/// # Safety
/// `engine` must come from `rijm_engine_new` and not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn rijm_engine_free(engine: *mut RhymeEngine) {
    if !engine.is_null() {
        drop(Box::from_raw(engine));
    }
}

/// Returns a JSON array of rhyme candidates. `max_results` caps the list as in
/// `RhymeEngine::generate_rhymes` (0 yields `[]`); pass
/// [`RIJM_CONFIGURED_MAX_RESULTS`] for the configured count.
///
/// # Safety
/// `engine` must be a live handle; `line` a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn rijm_generate_rhymes(
    engine: *const RhymeEngine,
    line: *const c_char,
    max_results: u32,
) -> *mut c_char {
    let (Some(engine), Some(line)) = (engine.as_ref(), read_str(line)) else {
        return into_c_string("[]".to_string());
    };
    json_reply("generate_rhymes", "[]", || {
        let count = match max_results {
            RIJM_CONFIGURED_MAX_RESULTS => engine.max_results(),
            n => n as usize,
        };
        let candidates = engine.generate_rhymes::<&str>(line, &[], count);
        serde_json::to_string(&candidates).ok()
    })
}

/// Takes a JSON array of lines; returns `{"syllables": [...], "suggestion": "..."}`.
/// A `bpm` of 0 uses the engine's tempo.
///
/// # Safety
/// `engine` must be a live handle; `lines_json` a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn rijm_analyze_flow(
    engine: *const RhymeEngine,
    lines_json: *const c_char,
    bpm: u32,
) -> *mut c_char {
    const EMPTY: &str = r#"{"syllables":[],"suggestion":""}"#;
    let (Some(engine), Some(lines_json)) = (engine.as_ref(), read_str(lines_json)) else {
        return into_c_string(EMPTY.to_string());
    };
    json_reply("analyze_flow", EMPTY, || {
        let lines: Vec<String> = serde_json::from_str(lines_json).ok()?;
        let bpm = if bpm == 0 { engine.bpm() } else { bpm };
        let flow = crate::core::flow::analyze_flow(&lines, bpm);
        serde_json::to_string(&FlowReply {
            syllables: &flow.syllables,
            suggestion: flow.suggestion_text(),
        })
        .ok()
    })
}

/// # Safety
/// `engine` must be a live handle; `word` a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn rijm_detect_slang(
    engine: *const RhymeEngine,
    word: *const c_char,
) -> *mut c_char {
    const NOT_SLANG: &str = r#"{"isSlang":false,"confidence":0.0}"#;
    let (Some(engine), Some(word)) = (engine.as_ref(), read_str(word)) else {
        return into_c_string(NOT_SLANG.to_string());
    };
    json_reply("detect_slang", NOT_SLANG, || {
        serde_json::to_string(&engine.detect_slang(word)).ok()
    })
}

/// Adds or replaces a term given as a JSON object. Returns false when the JSON
/// is invalid or the term could not be saved; a term that failed to save is
/// still active in memory.
///
/// # Safety
/// `engine` must be a live handle not used concurrently; `term_json` a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn rijm_add_slang_term(
    engine: *mut RhymeEngine,
    term_json: *const c_char,
) -> bool {
    let (Some(engine), Some(term_json)) = (engine.as_mut(), read_str(term_json)) else {
        return false;
    };
    let Ok(term) = serde_json::from_str::<SlangTerm>(term_json) else {
        return false;
    };
    catch_unwind(AssertUnwindSafe(|| engine.add_slang_term(term).is_ok())).unwrap_or(false)
}

/// # Safety
/// `engine` must be a live handle not used concurrently; `term` a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn rijm_remove_slang_term(
    engine: *mut RhymeEngine,
    term: *const c_char,
) -> bool {
    let (Some(engine), Some(term)) = (engine.as_mut(), read_str(term)) else {
        return false;
    };
    catch_unwind(AssertUnwindSafe(|| engine.remove_slang_term(term).is_ok())).unwrap_or(false)
}

/// # Safety
/// `s` must come from one of the functions above and not be freed twice.
#[no_mangle]
pub unsafe extern "C" fn rijm_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}
